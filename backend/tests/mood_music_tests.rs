mod common;

use common::{parse_response_body, TestSetup};
use companion_backend::{
    inference::mock::MockTextGeneration,
    music::{
        fallback_playlist,
        mock::{MockCatalogOutcome, MockPlaylistCatalog},
        Playlist,
    },
    types::SpotifyCredentials,
};
use common_types::Emotion;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROUTE: &str = "/api/spotify-mood-music";

fn credentials() -> SpotifyCredentials {
    SpotifyCredentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
    }
}

fn catalog_playlist() -> Playlist {
    Playlist {
        name: "Sunny Day".to_string(),
        description: "Bright songs".to_string(),
        url: "https://open.spotify.com/playlist/sunny".to_string(),
        image: Some("https://i.scdn.co/image/sunny".to_string()),
        track_count: 30,
        owner: "Curator".to_string(),
    }
}

#[tokio::test]
async fn test_angry_with_failed_token_exchange_returns_rock_this() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_client" })))
        .expect(1)
        .mount(&server)
        .await;

    let context = TestSetup::with_upstream(&server, None, Some(credentials()));

    let response = context
        .send_post_request(ROUTE, json!({ "emotion": "angry" }))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;

    assert!(body["error"].is_string());
    assert_eq!(body["fallback"]["name"], "Rock This");
    assert_eq!(
        body["fallback"],
        serde_json::to_value(fallback_playlist(Emotion::Angry)).unwrap()
    );
}

#[tokio::test]
async fn test_missing_credentials_is_server_error() {
    let (context, _, catalog) = TestSetup::with_mocks(
        MockTextGeneration::new(),
        MockPlaylistCatalog::new(MockCatalogOutcome::MissingCredentials),
    );

    let response = context
        .send_post_request(ROUTE, json!({ "emotion": "sad" }))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body["fallback"]["name"], "Life Sucks");
    assert_eq!(catalog.queries().len(), 1);
}

#[tokio::test]
async fn test_found_playlist_is_returned() {
    let (context, _, catalog) = TestSetup::with_mocks(
        MockTextGeneration::new(),
        MockPlaylistCatalog::new(MockCatalogOutcome::Found(catalog_playlist())),
    );

    let response = context
        .send_post_request(ROUTE, json!({ "emotion": "happy", "mood": "energetic" }))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["emotion"], "happy");
    assert_eq!(body["playlist"]["trackCount"], 30);
    assert_eq!(body["playlist"], serde_json::to_value(catalog_playlist()).unwrap());
    assert!(body.get("isFallback").is_none());
    assert_eq!(catalog.queries(), vec!["energetic happy upbeat feel good"]);
}

#[tokio::test]
async fn test_soft_misses_serve_curated_playlist() {
    for outcome in [MockCatalogOutcome::NotFound, MockCatalogOutcome::SearchFails] {
        let (context, _, _) = TestSetup::with_mocks(
            MockTextGeneration::new(),
            MockPlaylistCatalog::new(outcome.clone()),
        );

        let response = context
            .send_post_request(ROUTE, json!({ "emotion": "anxious" }))
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::OK, "{outcome:?}");
        let body = parse_response_body(response).await;
        assert_eq!(body["playlist"]["name"], "Peaceful Piano", "{outcome:?}");
        assert_eq!(body["isFallback"], true, "{outcome:?}");
    }
}

#[tokio::test]
async fn test_missing_emotion_is_neutral() {
    let (context, _, catalog) = TestSetup::with_mocks(
        MockTextGeneration::new(),
        MockPlaylistCatalog::new(MockCatalogOutcome::NotFound),
    );

    let response = context
        .send_post_request(ROUTE, json!({}))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["emotion"], "neutral");
    assert_eq!(body["playlist"]["name"], "Chill Vibes");
    assert_eq!(catalog.queries(), vec!["chill vibes"]);
}

#[tokio::test]
async fn test_live_catalog_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playlists": { "items": [{
                "name": "Calm Down",
                "description": null,
                "external_urls": { "spotify": "https://open.spotify.com/playlist/calm" },
                "images": null,
                "tracks": { "total": 12 },
                "owner": null
            }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let context = TestSetup::with_upstream(&server, None, Some(credentials()));

    let response = context
        .send_post_request(ROUTE, json!({ "emotion": "stressed" }))
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(
        body["playlist"],
        json!({
            "name": "Calm Down",
            "description": "",
            "url": "https://open.spotify.com/playlist/calm",
            "image": null,
            "trackCount": 12,
            "owner": "Spotify"
        })
    );
}
