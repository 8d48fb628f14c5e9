pub mod background;
pub mod matching;
pub mod plex;
pub mod retry;
pub mod spotify;
pub mod sync;
