//! Binds the playback controller to real media elements.

use crate::playback::{PlaybackController, PlaybackSession};
use dioxus::prelude::*;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::DomMedia as Media;
#[cfg(target_arch = "wasm32")]
pub use web::toggle_fullscreen;
#[cfg(target_arch = "wasm32")]
use web::{mount, show_video};

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::BridgedMedia as Media;
#[cfg(not(target_arch = "wasm32"))]
pub use native::toggle_fullscreen;
#[cfg(not(target_arch = "wasm32"))]
use native::{mount, show_video};

pub type PlayerHandle = Rc<PlaybackController<Media>>;

/// Renders nothing. Attaches the elements once the document exists and keeps
/// the video surface in step with the session.
#[component]
pub fn MediaBridge() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();

    use_effect({
        let player = player.clone();
        move || {
            if !player.is_attached() {
                mount(&player);
            }
        }
    });

    use_effect(move || {
        show_video(session.read().video_visible);
    });

    rsx! {}
}
