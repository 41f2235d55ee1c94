use crate::api::{ApiClient, ApiResult, Playlist, PlaylistId, Track, TrackId};
use async_trait::async_trait;

/// The per-user endpoints the library cache is built from.
#[async_trait(?Send)]
pub trait LibraryRemote {
    async fn favorite_songs(&self) -> ApiResult<Vec<Track>>;
    async fn add_favorite(&self, track_id: TrackId) -> ApiResult<()>;
    async fn remove_favorite(&self, track_id: TrackId) -> ApiResult<()>;

    async fn playlists(&self) -> ApiResult<Vec<Playlist>>;
    async fn playlist(&self, playlist_id: PlaylistId) -> ApiResult<Playlist>;
    async fn playlist_songs(&self, playlist_id: PlaylistId) -> ApiResult<Vec<Track>>;
    async fn create_playlist(&self, name: &str) -> ApiResult<Playlist>;
    async fn delete_playlist(&self, playlist_id: PlaylistId) -> ApiResult<()>;
    async fn add_to_playlist(&self, playlist_id: PlaylistId, track_id: TrackId) -> ApiResult<()>;
    async fn remove_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> ApiResult<()>;
}

#[async_trait(?Send)]
impl LibraryRemote for ApiClient {
    async fn favorite_songs(&self) -> ApiResult<Vec<Track>> {
        ApiClient::favorite_songs(self).await
    }

    async fn add_favorite(&self, track_id: TrackId) -> ApiResult<()> {
        ApiClient::add_favorite(self, track_id).await
    }

    async fn remove_favorite(&self, track_id: TrackId) -> ApiResult<()> {
        ApiClient::remove_favorite(self, track_id).await
    }

    async fn playlists(&self) -> ApiResult<Vec<Playlist>> {
        ApiClient::playlists(self).await
    }

    async fn playlist(&self, playlist_id: PlaylistId) -> ApiResult<Playlist> {
        ApiClient::playlist(self, playlist_id).await
    }

    async fn playlist_songs(&self, playlist_id: PlaylistId) -> ApiResult<Vec<Track>> {
        ApiClient::playlist_songs(self, playlist_id).await
    }

    async fn create_playlist(&self, name: &str) -> ApiResult<Playlist> {
        ApiClient::create_playlist(self, name).await
    }

    async fn delete_playlist(&self, playlist_id: PlaylistId) -> ApiResult<()> {
        ApiClient::delete_playlist(self, playlist_id).await
    }

    async fn add_to_playlist(&self, playlist_id: PlaylistId, track_id: TrackId) -> ApiResult<()> {
        ApiClient::add_to_playlist(self, playlist_id, track_id).await
    }

    async fn remove_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> ApiResult<()> {
        ApiClient::remove_from_playlist(self, playlist_id, track_id).await
    }
}
