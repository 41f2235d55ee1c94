use crate::api::{MediaKind, PlaylistId, Track, TrackId};
use crate::components::{Icon, LibraryHandle, Notices};
use crate::db::AppSettings;
use crate::library::LibrarySnapshot;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

/// Favorite toggle plus an add/remove menu over the user's playlists.
/// Renders nothing for videos or when signed out.
#[component]
pub fn SongActions(track: Track) -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let library_state = use_context::<Signal<LibrarySnapshot>>();
    let library = use_context::<LibraryHandle>();
    let notices = use_context::<Notices>();
    let mut menu_open = use_signal(|| false);
    let mut pending = use_signal(|| false);

    if track.kind != MediaKind::Audio || !app_settings().is_signed_in() {
        return rsx! {};
    }

    let track_id = track.id;
    let state = library_state();
    let favorite = state.is_favorite(track_id);
    let playlists: Vec<(PlaylistId, String, bool)> = state
        .playlists
        .iter()
        .map(|p| (p.id, p.name.clone(), state.playlist_contains(p.id, track_id)))
        .collect();

    let on_favorite = {
        let library = library.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            if pending() {
                return;
            }
            pending.set(true);
            let library = library.clone();
            spawn(async move {
                if favorite {
                    let outcome = library.remove_favorite(track_id).await;
                    notices.report(&outcome, "Removed from favorites");
                } else {
                    let outcome = library.add_favorite(track_id).await;
                    notices.report(&outcome, "Added to favorites");
                }
                pending.set(false);
            });
        }
    };

    rsx! {
        div { class: "song-actions",
            button {
                class: if favorite { "icon-button is-active" } else { "icon-button" },
                aria_label: if favorite { "Remove from favorites" } else { "Add to favorites" },
                disabled: pending(),
                onclick: on_favorite,
                Icon {
                    name: if favorite { "heart-filled".to_string() } else { "heart".to_string() },
                    class: "icon".to_string(),
                }
            }
            button {
                class: "icon-button",
                aria_label: "Playlist options",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    menu_open.set(!menu_open());
                },
                Icon { name: "more".to_string(), class: "icon".to_string() }
            }
            if menu_open() {
                div {
                    class: "song-menu",
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    p { class: "song-menu-title", "Playlists" }
                    if playlists.is_empty() {
                        p { class: "song-menu-empty", "No playlists yet" }
                    }
                    for (playlist_id, name, contains) in playlists {
                        PlaylistToggle {
                            key: "{playlist_id}",
                            playlist_id,
                            track_id,
                            name,
                            contains,
                            on_done: move |_| menu_open.set(false),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PlaylistToggle(
    playlist_id: PlaylistId,
    track_id: TrackId,
    name: String,
    contains: bool,
    on_done: EventHandler<()>,
) -> Element {
    let library = use_context::<LibraryHandle>();
    let notices = use_context::<Notices>();

    // The menu closes right away, so the mutation must outlive this component.
    let onclick = move |_: MouseEvent| {
        let library = library.clone();
        spawn_forever(async move {
            if contains {
                let outcome = library.remove_from_playlist(playlist_id, track_id).await;
                notices.report(&outcome, "Removed from playlist");
            } else {
                let outcome = library.add_to_playlist(playlist_id, track_id).await;
                notices.report(&outcome, "Added to playlist");
            }
        });
        on_done.call(());
    };

    rsx! {
        button { class: "song-menu-item", onclick,
            Icon {
                name: if contains { "minus".to_string() } else { "plus".to_string() },
                class: "icon".to_string(),
            }
            span { "{name}" }
            if contains {
                Icon { name: "check".to_string(), class: "icon icon-accent".to_string() }
            }
        }
    }
}
