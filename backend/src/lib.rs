//! Wellness companion backend: chat and mood music endpoints for the mobile app

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

/// Chat orchestration, personas and reply cleanup
pub mod chat;

/// Hosted text-generation client
pub mod inference;

/// Music catalog client and curated playlists
pub mod music;

/// HTTP routes
pub mod routes;

/// Router assembly and server startup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
