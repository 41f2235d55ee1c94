// Public catalog endpoints: songs, albums, search and videos.
impl ApiClient {
    pub async fn songs(&self) -> Vec<Track> {
        let url = self.music_endpoint("songs/");
        let result = self
            .send_json::<Vec<SongRecord>>("songs", self.request(Method::GET, &url))
            .await;
        songs_to_tracks(or_fallback("songs", result, Vec::new()), &self.config)
    }

    pub async fn albums(&self) -> Vec<Album> {
        let url = self.music_endpoint("albums/");
        let result = self
            .send_json::<Vec<Album>>("albums", self.request(Method::GET, &url))
            .await;
        or_fallback("albums", result, Vec::new())
    }

    pub async fn album(&self, album_id: AlbumId) -> Option<Album> {
        let url = self.music_endpoint(&format!("albums/{album_id}/"));
        let result = self
            .send_json::<Album>("album", self.request(Method::GET, &url))
            .await
            .map(Some);
        or_fallback("album", result, None)
    }

    pub async fn songs_by_album(&self, album_id: AlbumId) -> Vec<Track> {
        let url = self.music_endpoint(&format!("albums/{album_id}/songs/"));
        let result = self
            .send_json::<Vec<SongRecord>>("songs_by_album", self.request(Method::GET, &url))
            .await;
        songs_to_tracks(or_fallback("songs_by_album", result, Vec::new()), &self.config)
    }

    pub async fn top_songs(&self, limit: u32) -> Vec<Track> {
        let url = self.music_endpoint(&format!("songs/top/?limit={limit}"));
        let result = self
            .send_json::<Vec<SongRecord>>("top_songs", self.request(Method::GET, &url))
            .await;
        songs_to_tracks(or_fallback("top_songs", result, Vec::new()), &self.config)
    }

    pub async fn search(&self, query: &str) -> ApiResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let url = self.music_endpoint(&format!("search?q={}", urlencoding::encode(query)));
        let payload: SearchPayload = self
            .send_json("search", self.request(Method::GET, &url))
            .await?;
        Ok(SearchResults::from_payload(payload, &self.config))
    }

    pub async fn videos(&self) -> ApiResult<Vec<Track>> {
        let url = self.music_endpoint("videos/");
        let records: Vec<VideoRecord> = self
            .send_json("videos", self.request(Method::GET, &url))
            .await?;
        Ok(videos_to_tracks(records, &self.config))
    }

    pub async fn video(&self, video_id: TrackId) -> ApiResult<Track> {
        let url = self.music_endpoint(&format!("videos/{video_id}/"));
        let record: VideoRecord = self
            .send_json("video", self.request(Method::GET, &url))
            .await?;
        Ok(Track::from_video(record, &self.config))
    }
}
