use crate::api::{MediaKind, PlaylistId, Track};
use crate::components::{Icon, LibraryHandle, Notices, PlayerHandle, SongActions};
use crate::playback::PlaybackSession;
use dioxus::prelude::*;

/// Rows of tracks. Clicking a row makes this list the player's list for
/// its kind and selects the row.
#[component]
pub fn TrackList(
    tracks: Vec<Track>,
    kind: MediaKind,
    // Set when the rows belong to a playlist, adds a remove button per row
    playlist: Option<PlaylistId>,
) -> Element {
    let player = use_context::<PlayerHandle>();
    let session = use_context::<Signal<PlaybackSession>>();

    if tracks.is_empty() {
        return rsx! {
            p { class: "empty-state", "Nothing here yet." }
        };
    }

    let snapshot = session();

    rsx! {
        ol { class: "track-list",
            for (index, track) in tracks.iter().enumerate() {
                TrackRow {
                    key: "{track.kind}-{track.id}",
                    index,
                    track: track.clone(),
                    current: snapshot.is_current(track.id, kind),
                    playing: snapshot.is_playing,
                    playlist,
                    onselect: {
                        let player = player.clone();
                        let tracks = tracks.clone();
                        let id = track.id;
                        move |_| {
                            player.load_list(kind, tracks.clone());
                            let player = player.clone();
                            spawn(async move {
                                player.select_track(id, kind, None).await;
                            });
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn TrackRow(
    index: usize,
    track: Track,
    current: bool,
    playing: bool,
    #[props(!optional)]
    playlist: Option<PlaylistId>,
    onselect: EventHandler<()>,
) -> Element {
    let library = use_context::<LibraryHandle>();
    let notices = use_context::<Notices>();
    let number = index + 1;
    let track_id = track.id;

    let on_remove = move |evt: MouseEvent| {
        evt.stop_propagation();
        let Some(playlist_id) = playlist else {
            return;
        };
        let library = library.clone();
        spawn(async move {
            let outcome = library.remove_from_playlist(playlist_id, track_id).await;
            notices.report(&outcome, "Removed from playlist");
        });
    };

    rsx! {
        li {
            class: if current { "track-row is-current" } else { "track-row" },
            onclick: move |_| onselect.call(()),
            span { class: "track-index",
                if current && playing {
                    Icon { name: "music".to_string(), class: "icon icon-accent".to_string() }
                } else {
                    "{number}"
                }
            }
            div { class: "track-cover",
                if let Some(url) = track.cover_image.clone() {
                    img { src: "{url}", alt: "", loading: "lazy" }
                }
            }
            div { class: "track-meta",
                p { class: "track-title", "{track.title}" }
                p { class: "track-artist", "{track.artist}" }
            }
            span { class: "track-duration", "{track.duration}" }
            SongActions { track: track.clone() }
            if playlist.is_some() {
                button {
                    class: "icon-button",
                    aria_label: "Remove from playlist",
                    onclick: on_remove,
                    Icon { name: "trash".to_string(), class: "icon".to_string() }
                }
            }
        }
    }
}
