use super::notice::MutationError;
use super::remote::LibraryRemote;
use crate::api::{ApiResult, Playlist, PlaylistId, Track, TrackId};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Locally cached view of the signed-in user's favorites and playlists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibrarySnapshot {
    pub favorites: BTreeSet<TrackId>,
    pub playlists: Vec<Playlist>,
    /// Track ids per playlist, in playlist order. Only populated for
    /// playlists that have been loaded or mutated this session.
    pub playlist_tracks: HashMap<PlaylistId, Vec<TrackId>>,
}

impl LibrarySnapshot {
    pub fn is_favorite(&self, track_id: TrackId) -> bool {
        self.favorites.contains(&track_id)
    }

    pub fn playlist_contains(&self, playlist_id: PlaylistId, track_id: TrackId) -> bool {
        self.playlist_tracks
            .get(&playlist_id)
            .is_some_and(|ids| ids.contains(&track_id))
    }

    /// True when the cache holds tracks for `playlist_id` that `shown` lacks,
    /// i.e. something was added since those rows were fetched.
    pub fn playlist_has_unlisted(&self, playlist_id: PlaylistId, shown: &[TrackId]) -> bool {
        self.playlist_tracks
            .get(&playlist_id)
            .is_some_and(|ids| ids.iter().any(|id| !shown.contains(id)))
    }
}

type Listener = Rc<dyn Fn(&LibrarySnapshot)>;

/// Favorites and playlist mutations with an optimistic local cache.
///
/// Every mutation is a single remote call. The cache is patched only when the
/// call succeeds and is brought back in line with the server by the `refresh_*`
/// and `load_playlist` reads.
pub struct LibraryService<R> {
    remote: RefCell<R>,
    state: RefCell<LibrarySnapshot>,
    listeners: RefCell<Vec<Listener>>,
}

impl<R> LibraryService<R>
where
    R: LibraryRemote + Clone,
{
    pub fn new(remote: R) -> Self {
        Self {
            remote: RefCell::new(remote),
            state: RefCell::new(LibrarySnapshot::default()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Swap the remote (sign-in or sign-out) and drop everything cached for
    /// the previous user.
    pub fn set_remote(&self, remote: R) {
        *self.remote.borrow_mut() = remote;
        self.update(|state| *state = LibrarySnapshot::default());
    }

    pub fn subscribe(&self, listener: impl Fn(&LibrarySnapshot) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn snapshot(&self) -> LibrarySnapshot {
        self.state.borrow().clone()
    }

    pub fn is_favorite(&self, track_id: TrackId) -> bool {
        self.state.borrow().is_favorite(track_id)
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.state.borrow().playlists.clone()
    }

    pub async fn refresh_favorites(&self) -> ApiResult<Vec<Track>> {
        let tracks = self.remote().favorite_songs().await?;
        let ids: BTreeSet<TrackId> = tracks.iter().map(|track| track.id).collect();
        self.update(|state| state.favorites = ids);
        Ok(tracks)
    }

    pub async fn refresh_playlists(&self) -> ApiResult<Vec<Playlist>> {
        let playlists = self.remote().playlists().await?;
        let kept = playlists.clone();
        self.update(|state| {
            state
                .playlist_tracks
                .retain(|id, _| kept.iter().any(|p| p.id == *id));
            state.playlists = kept;
        });
        Ok(playlists)
    }

    /// Fetch a playlist and its songs, replacing whatever was cached for it.
    pub async fn load_playlist(&self, playlist_id: PlaylistId) -> ApiResult<(Playlist, Vec<Track>)> {
        let remote = self.remote();
        let playlist = remote.playlist(playlist_id).await?;
        let tracks = remote.playlist_songs(playlist_id).await?;

        let ids: Vec<TrackId> = tracks.iter().map(|track| track.id).collect();
        let fresh = playlist.clone();
        self.update(|state| {
            state.playlist_tracks.insert(playlist_id, ids);
            match state.playlists.iter_mut().find(|p| p.id == playlist_id) {
                Some(existing) => *existing = fresh,
                None => state.playlists.push(fresh),
            }
        });
        Ok((playlist, tracks))
    }

    pub async fn add_favorite(&self, track_id: TrackId) -> Result<(), MutationError> {
        self.remote()
            .add_favorite(track_id)
            .await
            .map_err(|err| {
                MutationError::from_api(err, "Song is already in your favorites", "add to favorites")
            })?;
        self.update(|state| {
            state.favorites.insert(track_id);
        });
        Ok(())
    }

    pub async fn remove_favorite(&self, track_id: TrackId) -> Result<(), MutationError> {
        self.remote()
            .remove_favorite(track_id)
            .await
            .map_err(|err| {
                MutationError::from_api(err, "Song is not in your favorites", "remove from favorites")
            })?;
        self.update(|state| {
            state.favorites.remove(&track_id);
        });
        Ok(())
    }

    pub async fn create_playlist(&self, name: &str) -> Result<Playlist, MutationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MutationError::validation("Playlist name is required"));
        }

        let playlist = self
            .remote()
            .create_playlist(name)
            .await
            .map_err(|err| {
                MutationError::from_api(
                    err,
                    "A playlist with that name already exists",
                    "create playlist",
                )
            })?;
        let created = playlist.clone();
        self.update(|state| {
            state.playlist_tracks.entry(created.id).or_default();
            state.playlists.push(created);
        });
        Ok(playlist)
    }

    pub async fn delete_playlist(&self, playlist_id: PlaylistId) -> Result<(), MutationError> {
        self.remote()
            .delete_playlist(playlist_id)
            .await
            .map_err(|err| MutationError::from_api(err, "Playlist is already gone", "delete playlist"))?;
        self.update(|state| {
            state.playlists.retain(|p| p.id != playlist_id);
            state.playlist_tracks.remove(&playlist_id);
        });
        Ok(())
    }

    pub async fn add_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<(), MutationError> {
        self.remote()
            .add_to_playlist(playlist_id, track_id)
            .await
            .map_err(|err| {
                MutationError::from_api(err, "Song is already in this playlist", "add to playlist")
            })?;
        self.update(|state| {
            let ids = state.playlist_tracks.entry(playlist_id).or_default();
            if !ids.contains(&track_id) {
                ids.push(track_id);
            }
        });
        Ok(())
    }

    pub async fn remove_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<(), MutationError> {
        self.remote()
            .remove_from_playlist(playlist_id, track_id)
            .await
            .map_err(|err| {
                MutationError::from_api(err, "Song is not in this playlist", "remove from playlist")
            })?;
        self.update(|state| {
            if let Some(ids) = state.playlist_tracks.get_mut(&playlist_id) {
                ids.retain(|id| *id != track_id);
            }
        });
        Ok(())
    }

    fn remote(&self) -> R {
        self.remote.borrow().clone()
    }

    fn update(&self, change: impl FnOnce(&mut LibrarySnapshot)) {
        change(&mut self.state.borrow_mut());
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiConfig, ApiError, MediaKind, SongRecord};
    use crate::library::notice::MutationErrorKind;
    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeServer {
        signed_in: bool,
        favorites: BTreeSet<TrackId>,
        playlists: Vec<Playlist>,
        songs: HashMap<PlaylistId, Vec<TrackId>>,
        calls: usize,
        outage: bool,
    }

    /// Mimics the server's duplicate handling: 400 with an "already" detail.
    #[derive(Clone, Default)]
    struct FakeRemote(Rc<RefCell<FakeServer>>);

    impl FakeRemote {
        fn signed_in() -> Self {
            let remote = Self::default();
            remote.0.borrow_mut().signed_in = true;
            remote
        }

        fn calls(&self) -> usize {
            self.0.borrow().calls
        }

        fn begin(&self) -> ApiResult<std::cell::RefMut<'_, FakeServer>> {
            let mut server = self.0.borrow_mut();
            server.calls += 1;
            if !server.signed_in {
                return Err(ApiError::Unauthenticated);
            }
            if server.outage {
                return Err(ApiError::Status {
                    status: 500,
                    detail: "Internal Server Error".into(),
                });
            }
            Ok(server)
        }
    }

    fn already(detail: &str) -> ApiError {
        ApiError::Status {
            status: 400,
            detail: detail.to_string(),
        }
    }

    fn track(id: TrackId) -> Track {
        Track::from_song(
            SongRecord {
                id,
                title: format!("Song {id}"),
                ..SongRecord::default()
            },
            &ApiConfig::new("http://h/api"),
        )
    }

    #[async_trait(?Send)]
    impl LibraryRemote for FakeRemote {
        async fn favorite_songs(&self) -> ApiResult<Vec<Track>> {
            let server = self.begin()?;
            Ok(server.favorites.iter().copied().map(track).collect())
        }

        async fn add_favorite(&self, track_id: TrackId) -> ApiResult<()> {
            let mut server = self.begin()?;
            if !server.favorites.insert(track_id) {
                return Err(already("Song already favorited"));
            }
            Ok(())
        }

        async fn remove_favorite(&self, track_id: TrackId) -> ApiResult<()> {
            let mut server = self.begin()?;
            server.favorites.remove(&track_id);
            Ok(())
        }

        async fn playlists(&self) -> ApiResult<Vec<Playlist>> {
            Ok(self.begin()?.playlists.clone())
        }

        async fn playlist(&self, playlist_id: PlaylistId) -> ApiResult<Playlist> {
            let server = self.begin()?;
            server
                .playlists
                .iter()
                .find(|p| p.id == playlist_id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    detail: "Not found.".into(),
                })
        }

        async fn playlist_songs(&self, playlist_id: PlaylistId) -> ApiResult<Vec<Track>> {
            let server = self.begin()?;
            let ids = server.songs.get(&playlist_id).cloned().unwrap_or_default();
            Ok(ids.into_iter().map(track).collect())
        }

        async fn create_playlist(&self, name: &str) -> ApiResult<Playlist> {
            let mut server = self.begin()?;
            let playlist = Playlist {
                id: server.playlists.len() as PlaylistId + 1,
                name: name.to_string(),
                user: Some(1),
                created_at: None,
            };
            server.playlists.push(playlist.clone());
            Ok(playlist)
        }

        async fn delete_playlist(&self, playlist_id: PlaylistId) -> ApiResult<()> {
            let mut server = self.begin()?;
            server.playlists.retain(|p| p.id != playlist_id);
            Ok(())
        }

        async fn add_to_playlist(&self, playlist_id: PlaylistId, track_id: TrackId) -> ApiResult<()> {
            let mut server = self.begin()?;
            let ids = server.songs.entry(playlist_id).or_default();
            if ids.contains(&track_id) {
                return Err(already("Song already exists in playlist"));
            }
            ids.push(track_id);
            Ok(())
        }

        async fn remove_from_playlist(
            &self,
            playlist_id: PlaylistId,
            track_id: TrackId,
        ) -> ApiResult<()> {
            let mut server = self.begin()?;
            if let Some(ids) = server.songs.get_mut(&playlist_id) {
                ids.retain(|id| *id != track_id);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn favorite_add_remove_and_duplicate() {
        let remote = FakeRemote::signed_in();
        let library = LibraryService::new(remote.clone());

        library.add_favorite(7).await.unwrap();
        assert!(library.is_favorite(7));

        library.remove_favorite(7).await.unwrap();
        assert!(!library.is_favorite(7));

        // Another client favorites 7 behind our back.
        remote.0.borrow_mut().favorites.insert(7);
        let before = library.snapshot();
        let err = library.add_favorite(7).await.unwrap_err();

        assert_eq!(err.kind, MutationErrorKind::Duplicate);
        assert_eq!(library.snapshot(), before);
        assert_eq!(remote.calls(), 3);
    }

    #[tokio::test]
    async fn blank_playlist_name_never_reaches_the_server() {
        let remote = FakeRemote::signed_in();
        let library = LibraryService::new(remote.clone());

        let err = library.create_playlist("   ").await.unwrap_err();

        assert_eq!(err.kind, MutationErrorKind::Validation);
        assert_eq!(remote.calls(), 0);
        assert!(library.playlists().is_empty());
    }

    #[tokio::test]
    async fn signed_out_mutations_are_rejected() {
        let library = LibraryService::new(FakeRemote::default());
        let err = library.add_favorite(1).await.unwrap_err();
        assert_eq!(err.kind, MutationErrorKind::Unauthenticated);
        assert!(!library.is_favorite(1));
    }

    #[tokio::test]
    async fn server_errors_leave_the_cache_alone() {
        let remote = FakeRemote::signed_in();
        let library = LibraryService::new(remote.clone());
        library.add_favorite(3).await.unwrap();

        remote.0.borrow_mut().outage = true;
        let err = library.remove_favorite(3).await.unwrap_err();

        assert_eq!(err.kind, MutationErrorKind::Generic);
        assert!(err.message.contains("500"));
        assert!(library.is_favorite(3));
    }

    #[tokio::test]
    async fn playlist_lifecycle_patches_the_cache() {
        let remote = FakeRemote::signed_in();
        let library = LibraryService::new(remote.clone());

        let road = library.create_playlist(" Road trip ").await.unwrap();
        assert_eq!(road.name, "Road trip");
        assert_eq!(library.playlists(), vec![road.clone()]);

        library.add_to_playlist(road.id, 4).await.unwrap();
        library.add_to_playlist(road.id, 5).await.unwrap();
        let err = library.add_to_playlist(road.id, 4).await.unwrap_err();
        assert_eq!(err.kind, MutationErrorKind::Duplicate);
        assert_eq!(library.snapshot().playlist_tracks[&road.id], vec![4, 5]);

        library.remove_from_playlist(road.id, 4).await.unwrap();
        assert!(!library.snapshot().playlist_contains(road.id, 4));
        assert!(library.snapshot().playlist_contains(road.id, 5));

        library.delete_playlist(road.id).await.unwrap();
        let snapshot = library.snapshot();
        assert!(snapshot.playlists.is_empty());
        assert!(!snapshot.playlist_tracks.contains_key(&road.id));
    }

    #[tokio::test]
    async fn additions_show_up_as_unlisted_tracks() {
        let remote = FakeRemote::signed_in();
        let library = LibraryService::new(remote.clone());
        let road = library.create_playlist("Road trip").await.unwrap();
        library.add_to_playlist(road.id, 4).await.unwrap();

        let shown = [4];
        assert!(!library.snapshot().playlist_has_unlisted(road.id, &shown));

        library.add_to_playlist(road.id, 5).await.unwrap();
        assert!(library.snapshot().playlist_has_unlisted(road.id, &shown));

        library.remove_from_playlist(road.id, 5).await.unwrap();
        library.remove_from_playlist(road.id, 4).await.unwrap();
        assert!(!library.snapshot().playlist_has_unlisted(road.id, &shown));
        assert!(!library.snapshot().playlist_has_unlisted(404, &shown));
    }

    #[tokio::test]
    async fn refresh_replaces_cached_state() {
        let remote = FakeRemote::signed_in();
        {
            let mut server = remote.0.borrow_mut();
            server.favorites.extend([1, 2]);
            server.playlists.push(Playlist {
                id: 9,
                name: "Gym".into(),
                user: Some(1),
                created_at: None,
            });
            server.songs.insert(9, vec![2, 1]);
        }
        let library = LibraryService::new(remote.clone());

        let favorites = library.refresh_favorites().await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].kind, MediaKind::Audio);
        assert!(library.is_favorite(1) && library.is_favorite(2));

        library.refresh_playlists().await.unwrap();
        let (playlist, tracks) = library.load_playlist(9).await.unwrap();
        assert_eq!(playlist.name, "Gym");
        assert_eq!(tracks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(library.snapshot().playlist_tracks[&9], vec![2, 1]);
        assert_eq!(library.playlists().len(), 1);
    }

    #[tokio::test]
    async fn switching_remote_clears_the_cache() {
        let library = LibraryService::new(FakeRemote::signed_in());
        library.add_favorite(1).await.unwrap();
        let seen = Rc::new(RefCell::new(0));
        let counter = seen.clone();
        library.subscribe(move |_| *counter.borrow_mut() += 1);

        library.set_remote(FakeRemote::default());

        assert!(!library.is_favorite(1));
        assert_eq!(*seen.borrow(), 1);
    }
}
