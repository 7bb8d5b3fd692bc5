use common_types::Emotion;

use super::Playlist;

struct CuratedPlaylist {
    name: &'static str,
    description: &'static str,
    url: &'static str,
    track_count: u32,
}

const HAPPY: CuratedPlaylist = CuratedPlaylist {
    name: "Happy Hits!",
    description: "Hits to boost your mood and fill you with happiness!",
    url: "https://open.spotify.com/playlist/37i9dQZF1DXdPec7aLTmlC",
    track_count: 100,
};

const SAD: CuratedPlaylist = CuratedPlaylist {
    name: "Life Sucks",
    description: "Songs to keep you company when everything feels heavy.",
    url: "https://open.spotify.com/playlist/37i9dQZF1DX3YSRoSdA634",
    track_count: 100,
};

const ANXIOUS: CuratedPlaylist = CuratedPlaylist {
    name: "Peaceful Piano",
    description: "Relax and indulge with beautiful piano pieces.",
    url: "https://open.spotify.com/playlist/37i9dQZF1DX4sWSpwq3LiO",
    track_count: 200,
};

const ANGRY: CuratedPlaylist = CuratedPlaylist {
    name: "Rock This",
    description: "The loudest rock tracks to let it all out.",
    url: "https://open.spotify.com/playlist/37i9dQZF1DXcF6B6QPhFDv",
    track_count: 50,
};

const NEUTRAL: CuratedPlaylist = CuratedPlaylist {
    name: "Chill Vibes",
    description: "Kick back to the best new and recent chill tunes.",
    url: "https://open.spotify.com/playlist/37i9dQZF1DX889U0CL85jj",
    track_count: 100,
};

const STRESSED: CuratedPlaylist = CuratedPlaylist {
    name: "Stress Relief",
    description: "Breathe deep and let the music melt your stress away.",
    url: "https://open.spotify.com/playlist/37i9dQZF1DWXe9gFZP0gtP",
    track_count: 75,
};

const fn curated(emotion: Emotion) -> &'static CuratedPlaylist {
    match emotion {
        Emotion::Happy => &HAPPY,
        Emotion::Sad => &SAD,
        Emotion::Anxious => &ANXIOUS,
        Emotion::Angry => &ANGRY,
        Emotion::Neutral => &NEUTRAL,
        Emotion::Stressed => &STRESSED,
    }
}

/// The fixed playlist served when the catalog cannot be searched
#[must_use]
pub fn fallback_playlist(emotion: Emotion) -> Playlist {
    let curated = curated(emotion);
    Playlist {
        name: curated.name.to_string(),
        description: curated.description.to_string(),
        url: curated.url.to_string(),
        image: None,
        track_count: curated.track_count,
        owner: "Spotify".to_string(),
    }
}

/// Catalog search terms for an emotion, optionally led by the app's mood label
#[must_use]
pub fn search_query(emotion: Emotion, mood: Option<&str>) -> String {
    let base = match emotion {
        Emotion::Happy => "happy upbeat feel good",
        Emotion::Sad => "sad songs comfort",
        Emotion::Anxious => "calm relaxing anxiety relief",
        Emotion::Angry => "angry rock release",
        Emotion::Neutral => "chill vibes",
        Emotion::Stressed => "stress relief relaxing",
    };

    match mood.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mood) => format!("{mood} {base}"),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_angry_is_rock_this() {
        let playlist = fallback_playlist(Emotion::Angry);
        assert_eq!(playlist.name, "Rock This");
        assert_eq!(playlist.owner, "Spotify");
    }

    #[test]
    fn test_unknown_emotion_gets_neutral_playlist() {
        let playlist = fallback_playlist(Emotion::from_tag(Some("confused")));
        assert_eq!(playlist, fallback_playlist(Emotion::Neutral));
        assert_eq!(playlist.name, "Chill Vibes");
    }

    #[test]
    fn test_every_emotion_has_distinct_playlist() {
        let names: std::collections::HashSet<String> =
            Emotion::iter().map(|e| fallback_playlist(e).name).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_search_query() {
        assert_eq!(search_query(Emotion::Sad, None), "sad songs comfort");
        assert_eq!(search_query(Emotion::Sad, Some("  ")), "sad songs comfort");
        assert_eq!(
            search_query(Emotion::Happy, Some("energetic")),
            "energetic happy upbeat feel good"
        );
    }
}
