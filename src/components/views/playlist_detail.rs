use crate::api::{MediaKind, PlaylistId, Track, TrackId};
use crate::components::views::{ErrorState, LoadingState};
use crate::components::{AppView, Icon, LibraryHandle, Navigation, Notices, TrackList};
use crate::library::LibrarySnapshot;
use dioxus::prelude::*;

#[component]
pub fn PlaylistDetailView(playlist_id: PlaylistId) -> Element {
    let library_state = use_context::<Signal<LibrarySnapshot>>();
    let library = use_context::<LibraryHandle>();
    let navigation = use_context::<Navigation>();
    let notices = use_context::<Notices>();
    let mut deleting = use_signal(|| false);

    let mut loaded = use_resource({
        let library = library.clone();
        use_reactive!(|(playlist_id,)| {
            let library = library.clone();
            async move { library.load_playlist(playlist_id).await }
        })
    });

    // Songs added elsewhere (player bar, track menus) only exist in the
    // cache, so fetch the rows again when the cache gets ahead of them.
    use_effect(use_reactive!(|(playlist_id,)| {
        let shown: Option<Vec<TrackId>> = match &*loaded.read() {
            Some(Ok((_, tracks))) => Some(tracks.iter().map(|track| track.id).collect()),
            _ => None,
        };
        let Some(shown) = shown else {
            return;
        };
        if library_state.read().playlist_has_unlisted(playlist_id, &shown) {
            loaded.restart();
        }
    }));

    let (playlist, tracks) = match loaded() {
        None => return rsx! { LoadingState {} },
        Some(Err(err)) => return rsx! { ErrorState { message: err.to_string() } },
        Some(Ok(found)) => found,
    };

    // The cache tracks removals made from this page
    let state = library_state.read();
    let name = state
        .playlists
        .iter()
        .find(|p| p.id == playlist_id)
        .map(|p| p.name.clone())
        .unwrap_or(playlist.name);
    let tracks: Vec<Track> = tracks
        .into_iter()
        .filter(|track| state.playlist_contains(playlist_id, track.id))
        .collect();
    drop(state);
    let song_count = tracks.len();

    let on_delete = move |_| {
        if deleting() {
            return;
        }
        deleting.set(true);
        let library = library.clone();
        spawn(async move {
            let outcome = library.delete_playlist(playlist_id).await;
            notices.report(&outcome, "Playlist deleted");
            if outcome.is_ok() {
                navigation.reset_to(AppView::Playlists);
            } else {
                deleting.set(false);
            }
        });
    };

    rsx! {
        div { class: "page",
            div { class: "detail-header",
                div { class: "detail-cover",
                    Icon { name: "playlist".to_string(), class: "icon icon-muted".to_string() }
                }
                div { class: "detail-meta",
                    p { class: "detail-kicker", "Playlist" }
                    h1 { class: "detail-title", "{name}" }
                    p { class: "detail-subtitle", "{song_count} songs" }
                    button {
                        class: "danger-button",
                        disabled: deleting(),
                        onclick: on_delete,
                        Icon { name: "trash".to_string(), class: "icon".to_string() }
                        "Delete playlist"
                    }
                }
            }
            TrackList { tracks, kind: MediaKind::Audio, playlist: playlist_id }
        }
    }
}
