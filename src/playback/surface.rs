use crate::api::MediaKind;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The element refused to start: autoplay policy, decode or network failure.
    #[error("playback rejected: {0}")]
    Rejected(String),

    #[error("no source attached")]
    NoSource,
}

/// A single media element the controller can drive.
///
/// Handles are cheap to clone and share the underlying element. All methods
/// run on the UI thread.
#[async_trait(?Send)]
pub trait MediaElement {
    fn has_source(&self) -> bool;

    /// Point the element at `url` without starting playback.
    fn attach(&self, url: &str);

    /// Stop playback, drop the source and force a reload so no request for the
    /// previous source stays in flight.
    fn detach(&self);

    async fn play(&self) -> Result<(), PlaybackError>;

    fn pause(&self);

    fn set_looping(&self, looping: bool);

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Total duration in seconds, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn seek_to(&self, seconds: f64);
}

/// One of the two playback surfaces, tagged by the kind of media it plays.
pub enum Surface<'a, E> {
    Audio(&'a E),
    Video(&'a E),
}

impl<'a, E> Surface<'a, E> {
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Audio(_) => MediaKind::Audio,
            Self::Video(_) => MediaKind::Video,
        }
    }

    pub fn element(&self) -> &'a E {
        match self {
            Self::Audio(element) | Self::Video(element) => element,
        }
    }
}

/// The audio and video elements the controller multiplexes.
#[derive(Debug, Clone)]
pub struct Surfaces<E> {
    audio: E,
    video: E,
}

impl<E> Surfaces<E> {
    pub fn new(audio: E, video: E) -> Self {
        Self { audio, video }
    }

    pub fn get(&self, kind: MediaKind) -> Surface<'_, E> {
        match kind {
            MediaKind::Audio => Surface::Audio(&self.audio),
            MediaKind::Video => Surface::Video(&self.video),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Surface<'_, E>> {
        [Surface::Audio(&self.audio), Surface::Video(&self.video)].into_iter()
    }
}
