use crate::components::{toggle_fullscreen, Icon, PlayerHandle};
use crate::playback::PlaybackSession;
use dioxus::prelude::*;

fn toggle_class(active: bool) -> &'static str {
    if active {
        "control-button is-active"
    } else {
        "control-button"
    }
}

#[component]
pub(super) fn ShuffleButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let active = session.read().shuffle_active;

    rsx! {
        button {
            class: toggle_class(active),
            aria_label: "Shuffle",
            aria_pressed: "{active}",
            onclick: move |_| player.toggle_shuffle(),
            Icon { name: "shuffle".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn LoopButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let active = session.read().loop_active;

    rsx! {
        button {
            class: toggle_class(active),
            aria_label: "Loop",
            aria_pressed: "{active}",
            onclick: move |_| player.toggle_loop(),
            Icon { name: "repeat".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let disabled = session.read().current_track.is_none();

    rsx! {
        button {
            class: "control-button",
            aria_label: "Previous",
            disabled,
            onclick: move |_| {
                let player = player.clone();
                spawn(async move { player.previous().await });
            },
            Icon { name: "prev".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let snapshot = session.read();
    // At the end of the list only shuffle has somewhere to go
    let disabled = snapshot.current_track.is_none()
        || (snapshot.is_last_track && !snapshot.shuffle_active);
    drop(snapshot);

    rsx! {
        button {
            class: "control-button",
            aria_label: "Next",
            disabled,
            onclick: move |_| {
                let player = player.clone();
                spawn(async move { player.next().await });
            },
            Icon { name: "next".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn PlayPauseButton() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let snapshot = session.read();
    let is_playing = snapshot.is_playing;
    let has_track = snapshot.current_track.is_some();
    let busy = snapshot.is_changing_track;
    drop(snapshot);

    rsx! {
        button {
            class: "control-button control-primary",
            aria_label: if is_playing { "Pause" } else { "Play" },
            disabled: !has_track,
            onclick: move |_| {
                if is_playing {
                    player.pause();
                } else {
                    let player = player.clone();
                    spawn(async move { player.play().await });
                }
            },
            if busy {
                Icon { name: "loader".to_string(), class: "icon".to_string() }
            } else if is_playing {
                Icon { name: "pause".to_string(), class: "icon".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "icon".to_string() }
            }
        }
    }
}

/// Shows or hides the video surface while a video is current.
#[component]
pub(super) fn VideoToggle() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let visible = session.read().video_visible;

    rsx! {
        button {
            class: toggle_class(visible),
            aria_label: if visible { "Hide video" } else { "Show video" },
            onclick: move |_| player.set_video_visible(!visible),
            Icon { name: "video".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn FullscreenButton() -> Element {
    rsx! {
        button {
            class: "control-button",
            aria_label: "Toggle fullscreen",
            onclick: move |_| toggle_fullscreen(),
            Icon { name: "maximize".to_string(), class: "icon".to_string() }
        }
    }
}
