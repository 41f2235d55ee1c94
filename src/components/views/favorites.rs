use crate::api::{MediaKind, Track};
use crate::components::views::{ErrorState, LoadingState};
use crate::components::{LibraryHandle, TrackList};
use crate::db::AppSettings;
use crate::library::LibrarySnapshot;
use dioxus::prelude::*;

#[component]
pub fn FavoritesView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let library_state = use_context::<Signal<LibrarySnapshot>>();
    let library = use_context::<LibraryHandle>();

    // Refetched on mount and whenever the account changes
    let favorites = use_resource(move || {
        let _account = app_settings().auth_token;
        let library = library.clone();
        async move { library.refresh_favorites().await }
    });

    let body = match favorites() {
        None => rsx! { LoadingState {} },
        Some(Err(err)) => rsx! { ErrorState { message: err.to_string() } },
        Some(Ok(tracks)) => {
            // Rows disappear as soon as they are unfavorited
            let state = library_state.read();
            let tracks: Vec<Track> = tracks
                .into_iter()
                .filter(|track| state.is_favorite(track.id))
                .collect();
            drop(state);
            rsx! { TrackList { tracks, kind: MediaKind::Audio } }
        }
    };

    rsx! {
        div { class: "page",
            h2 { class: "section-title", "Favorites" }
            {body}
        }
    }
}
