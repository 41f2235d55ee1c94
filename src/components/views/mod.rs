//! One component per `AppView`.

use dioxus::prelude::*;

mod album_detail;
mod auth;
mod favorites;
mod home;
mod playlist_detail;
mod playlists;
mod search;
mod videos;

pub use album_detail::AlbumDetailView;
pub use auth::{LoginView, RegisterView};
pub use favorites::FavoritesView;
pub use home::HomeView;
pub use playlist_detail::PlaylistDetailView;
pub use playlists::PlaylistsView;
pub use search::SearchView;
pub use videos::VideosView;

#[component]
fn LoadingState() -> Element {
    rsx! {
        div { class: "loading-state",
            crate::components::Icon { name: "loader".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
fn ErrorState(message: String) -> Element {
    rsx! {
        p { class: "error-state", "{message}" }
    }
}
