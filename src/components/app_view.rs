//! Defines the shared application view state.

use crate::api::{AlbumId, PlaylistId};

#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    Home,
    Search(String),
    AlbumDetail(AlbumId),
    Videos,
    Favorites,
    Playlists,
    PlaylistDetail(PlaylistId),
    Login,
    Register,
}

impl AppView {
    /// Views that only make sense for a signed-in user.
    pub fn requires_account(&self) -> bool {
        matches!(
            self,
            Self::Favorites | Self::Playlists | Self::PlaylistDetail(_)
        )
    }
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::Home => "Home",
        AppView::Search(_) => "Search",
        AppView::AlbumDetail(_) => "Album",
        AppView::Videos => "Videos",
        AppView::Favorites => "Favorites",
        AppView::Playlists => "Playlists",
        AppView::PlaylistDetail(_) => "Playlist",
        AppView::Login => "Sign in",
        AppView::Register => "Create account",
    }
}
