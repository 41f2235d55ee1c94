// Per-user endpoints: favorites and playlists. Reads without a token yield
// nothing; writes without a token fail before touching the network.
impl ApiClient {
    pub async fn favorite_songs(&self) -> ApiResult<Vec<Track>> {
        if !self.is_authenticated() {
            return Ok(Vec::new());
        }

        let url = self.music_endpoint("favorite_songs/list/");
        let records: Vec<SongRecord> = self
            .send_json("favorite_songs", self.authed(Method::GET, &url)?)
            .await?;
        Ok(songs_to_tracks(records, &self.config))
    }

    pub async fn add_favorite(&self, track_id: TrackId) -> ApiResult<()> {
        let url = self.music_endpoint("favorite_songs/");
        let builder = self
            .authed(Method::POST, &url)?
            .json(&SongIdBody { song_id: track_id });
        self.send_unit("add_favorite", builder).await
    }

    pub async fn remove_favorite(&self, track_id: TrackId) -> ApiResult<()> {
        let url = self.music_endpoint("favorite_songs/");
        let builder = self
            .authed(Method::DELETE, &url)?
            .json(&SongIdBody { song_id: track_id });
        self.send_unit("remove_favorite", builder).await
    }

    pub async fn playlists(&self) -> ApiResult<Vec<Playlist>> {
        if !self.is_authenticated() {
            return Ok(Vec::new());
        }

        let url = self.music_endpoint("playlists/");
        self.send_json("playlists", self.authed(Method::GET, &url)?)
            .await
    }

    pub async fn create_playlist(&self, name: &str) -> ApiResult<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Playlist name is required".to_string()));
        }

        let url = self.music_endpoint("playlists/");
        let builder = self
            .authed(Method::POST, &url)?
            .json(&PlaylistNameBody { name });
        self.send_json("create_playlist", builder).await
    }

    pub async fn playlist(&self, playlist_id: PlaylistId) -> ApiResult<Playlist> {
        let url = self.music_endpoint(&format!("playlists/{playlist_id}/"));
        self.send_json("playlist", self.authed(Method::GET, &url)?)
            .await
    }

    pub async fn playlist_songs(&self, playlist_id: PlaylistId) -> ApiResult<Vec<Track>> {
        let url = self.music_endpoint(&format!("playlists/{playlist_id}/songs/"));
        let records: Vec<SongRecord> = self
            .send_json("playlist_songs", self.authed(Method::GET, &url)?)
            .await?;
        Ok(songs_to_tracks(records, &self.config))
    }

    pub async fn delete_playlist(&self, playlist_id: PlaylistId) -> ApiResult<()> {
        let url = self.music_endpoint(&format!("playlists/{playlist_id}/delete/"));
        self.send_unit("delete_playlist", self.authed(Method::DELETE, &url)?)
            .await
    }

    pub async fn add_to_playlist(&self, playlist_id: PlaylistId, track_id: TrackId) -> ApiResult<()> {
        let url = self.music_endpoint(&format!("playlists/{playlist_id}/add_song/"));
        let builder = self
            .authed(Method::POST, &url)?
            .json(&SongIdBody { song_id: track_id });
        self.send_unit("add_to_playlist", builder).await
    }

    pub async fn remove_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> ApiResult<()> {
        let url = self.music_endpoint(&format!("playlists/{playlist_id}/remove_song/"));
        let builder = self
            .authed(Method::POST, &url)?
            .json(&SongIdBody { song_id: track_id });
        self.send_unit("remove_from_playlist", builder).await
    }
}
