pub mod plex;
pub mod spotify;
