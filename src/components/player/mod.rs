use crate::api::MediaKind;
use crate::components::{Icon, PlayerHandle, SongActions};
use crate::playback::PlaybackSession;
use dioxus::prelude::*;

mod controls;

use controls::{
    FullscreenButton, LoopButton, NextButton, PlayPauseButton, PrevButton, ShuffleButton,
    VideoToggle,
};

#[component]
pub fn PlayerBar() -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();
    let snapshot = session();

    let time = snapshot.time;
    let can_seek = snapshot.current_track.is_some();

    let on_seek = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            player.seek(percent / 100.0);
        }
    };

    rsx! {
        footer { class: "player-bar",
            div { class: "player-track",
                match &snapshot.current_track {
                    Some(track) => rsx! {
                        div { class: "player-cover",
                            match &track.cover_image {
                                Some(url) => rsx! {
                                    img { src: "{url}", alt: "{track.title}", loading: "lazy" }
                                },
                                None => rsx! {
                                    Icon {
                                        name: if track.kind == MediaKind::Video { "video".to_string() } else { "music".to_string() },
                                        class: "icon icon-muted".to_string(),
                                    }
                                },
                            }
                        }
                        div { class: "player-meta",
                            p { class: "player-title", "{track.title}" }
                            if snapshot.is_changing_track {
                                p { class: "player-subtitle", "Loading…" }
                            } else {
                                p { class: "player-subtitle", "{track.artist}" }
                            }
                        }
                        SongActions { track: track.clone() }
                    },
                    None => rsx! {
                        div { class: "player-cover",
                            Icon { name: "music".to_string(), class: "icon icon-muted".to_string() }
                        }
                        div { class: "player-meta",
                            p { class: "player-title muted", "Nothing playing" }
                            p { class: "player-subtitle", "Pick a song or video to start" }
                        }
                    },
                }
            }

            div { class: "player-center",
                div { class: "player-controls",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    LoopButton {}
                }
                div { class: "player-progress",
                    span { class: "player-time", "{time.current}" }
                    input {
                        r#type: "range",
                        min: "0",
                        max: "100",
                        step: "0.1",
                        disabled: !can_seek,
                        value: "{time.progress}",
                        class: "seek-bar",
                        oninput: on_seek,
                    }
                    span { class: "player-time", "{time.total}" }
                }
            }

            div { class: "player-extra",
                if snapshot.kind == MediaKind::Video && snapshot.current_track.is_some() {
                    VideoToggle {}
                    if snapshot.video_visible {
                        FullscreenButton {}
                    }
                }
            }
        }
    }
}
