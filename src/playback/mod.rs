//! Playback state machine shared by the audio and video surfaces.

mod controller;
mod session;
mod surface;

pub use controller::PlaybackController;
pub use session::PlaybackSession;
pub use surface::{MediaElement, PlaybackError};
