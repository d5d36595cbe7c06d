mod handles;
mod playlist;
mod track;

pub use handles::{AudioHandle, ImageHandle};
pub use playlist::Playlist;
pub use track::Track;
