use super::session::{AttachedSource, PlaybackSession, TimeReadout};
use super::surface::{MediaElement, PlaybackError, Surfaces};
use crate::api::{MediaKind, Track, TrackId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

type Listener = Rc<dyn Fn(&PlaybackSession)>;

#[derive(Default)]
struct TrackLists {
    audio: Vec<Track>,
    video: Vec<Track>,
}

impl TrackLists {
    fn get(&self, kind: MediaKind) -> &[Track] {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }

    fn set(&mut self, kind: MediaKind, items: Vec<Track>) {
        match kind {
            MediaKind::Audio => self.audio = items,
            MediaKind::Video => self.video = items,
        }
    }
}

#[derive(Clone, Copy)]
enum Step {
    Previous,
    Next,
}

/// Drives the audio and video elements for the player bar.
///
/// Lifecycle: `new` → `attach` → operations and element callbacks →
/// `dispose`. Every operation that needs an element is a no-op outside that
/// window. Observers get a fresh [`PlaybackSession`] after every change.
///
/// Track switches are guarded by `is_changing_track`: a selection made while
/// another is in flight is dropped. Each switch also takes a transition token
/// and only attaches its source if the token is still current after yielding
/// once to the event loop, so a `dispose` in between cancels it.
pub struct PlaybackController<E> {
    surfaces: RefCell<Option<Surfaces<E>>>,
    session: RefCell<PlaybackSession>,
    lists: RefCell<TrackLists>,
    generation: Cell<u64>,
    rng: RefCell<StdRng>,
    listeners: RefCell<Vec<Listener>>,
}

impl<E> Default for PlaybackController<E>
where
    E: MediaElement + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> PlaybackController<E>
where
    E: MediaElement + Clone,
{
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            surfaces: RefCell::new(None),
            session: RefCell::new(PlaybackSession::default()),
            lists: RefCell::new(TrackLists::default()),
            generation: Cell::new(0),
            rng: RefCell::new(rng),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn attach(&self, audio: E, video: E) {
        let looping = self.session.borrow().loop_active;
        audio.set_looping(looping);
        video.set_looping(looping);
        *self.surfaces.borrow_mut() = Some(Surfaces::new(audio, video));
    }

    pub fn is_attached(&self) -> bool {
        self.surfaces.borrow().is_some()
    }

    /// Release both elements and cancel any transition still waiting to
    /// attach its source. Listeners are dropped after a final snapshot.
    pub fn dispose(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        let surfaces = self.surfaces.borrow_mut().take();
        if let Some(surfaces) = surfaces {
            for surface in surfaces.iter() {
                surface.element().detach();
            }
        }
        self.update(|s| {
            s.is_playing = false;
            s.is_changing_track = false;
            s.last_played = None;
        });
        self.listeners.borrow_mut().clear();
    }

    pub fn subscribe(&self, listener: impl Fn(&PlaybackSession) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn snapshot(&self) -> PlaybackSession {
        self.session.borrow().clone()
    }

    pub fn list(&self, kind: MediaKind) -> Vec<Track> {
        self.lists.borrow().get(kind).to_vec()
    }

    /// Replace the list for `kind`. The current track and play state are kept.
    pub fn load_list(&self, kind: MediaKind, items: Vec<Track>) {
        self.lists.borrow_mut().set(kind, items);
        let is_last = self.current_is_last();
        self.update(|s| s.is_last_track = is_last);
    }

    /// Start or resume the current track. Rejections leave the play flag
    /// false and are only logged.
    pub async fn play(&self) {
        let Some(track) = self.session.borrow().current_track.clone() else {
            return;
        };
        let Some(element) = self.element(track.kind) else {
            return;
        };

        if !element.has_source() {
            element.attach(&track.source_url);
            self.update(|s| {
                s.last_played = Some(AttachedSource {
                    kind: track.kind,
                    id: track.id,
                })
            });
        }
        self.start(&element).await;
    }

    pub fn pause(&self) {
        let Some(kind) = self.session.borrow().current_track.as_ref().map(|t| t.kind) else {
            return;
        };
        let Some(element) = self.element(kind) else {
            return;
        };
        element.pause();
        self.update(|s| s.is_playing = false);
    }

    /// Switch to track `id` of `kind`, looked up in `override_list` when given
    /// and in the stored list otherwise.
    pub async fn select_track(
        &self,
        id: TrackId,
        kind: MediaKind,
        override_list: Option<Vec<Track>>,
    ) {
        if self.session.borrow().is_changing_track {
            tracing::debug!("dropping selection of {kind} {id}: a track change is in progress");
            return;
        }
        let Some(surfaces) = self.surfaces() else {
            return;
        };

        let attached = AttachedSource { kind, id };
        let resume = self.session.borrow().last_played == Some(attached)
            && surfaces.get(kind).element().has_source();
        if resume {
            self.play().await;
            return;
        }

        self.update(|s| s.is_changing_track = true);

        let resolved = {
            let lists = self.lists.borrow();
            let list = override_list.as_deref().unwrap_or_else(|| lists.get(kind));
            list.iter()
                .position(|track| track.id == id)
                .map(|index| (list[index].clone(), index + 1 == list.len()))
        };
        let Some((track, is_last)) = resolved else {
            tracing::debug!("{kind} {id} is not in the active list");
            self.update(|s| s.is_changing_track = false);
            return;
        };

        let source_url = track.source_url.clone();
        self.update(|s| {
            s.current_track = Some(track);
            s.kind = kind;
            s.is_last_track = is_last;
            s.time = TimeReadout::default();
            s.video_visible = kind == MediaKind::Video;
        });

        let token = self.next_generation();
        for surface in surfaces.iter() {
            surface.element().detach();
        }
        self.update(|s| s.last_played = None);

        settle().await;

        if self.generation.get() != token {
            tracing::debug!("track change to {kind} {id} was superseded");
            return;
        }
        let Some(element) = self.element(kind) else {
            self.update(|s| s.is_changing_track = false);
            return;
        };

        element.attach(&source_url);
        self.update(|s| s.last_played = Some(attached));
        let outcome = element.play().await;

        // A dispose or a newer switch while `play` was pending owns the
        // session now, including its busy flag.
        if self.generation.get() != token {
            tracing::debug!("{kind} {id} started after its track change was superseded");
            return;
        }
        self.record_play(outcome);
        self.update(|s| s.is_changing_track = false);
    }

    pub async fn previous(&self) {
        if self.session.borrow().is_changing_track {
            return;
        }
        if let Some((id, kind)) = self.neighbour(Step::Previous) {
            self.select_track(id, kind, None).await;
        }
    }

    /// Advance to the next track. At the end of the list this only does
    /// something when shuffle is on.
    pub async fn next(&self) {
        if self.session.borrow().is_changing_track {
            return;
        }
        let shuffle = self.session.borrow().shuffle_active;
        match self.neighbour(Step::Next) {
            Some((id, kind)) => self.select_track(id, kind, None).await,
            None if shuffle => self.play_random().await,
            None => {}
        }
    }

    /// Pick uniformly among the tracks of the active list other than the
    /// current one.
    pub async fn play_random(&self) {
        let (kind, current_id) = {
            let session = self.session.borrow();
            if session.is_changing_track {
                return;
            }
            (session.kind, session.current_track.as_ref().map(|t| t.id))
        };

        if let Some(pick) = self.random_pick(kind, current_id) {
            self.select_track(pick, kind, None).await;
        }
    }

    pub fn toggle_loop(&self) {
        let looping = {
            let mut session = self.session.borrow_mut();
            session.loop_active = !session.loop_active;
            if session.loop_active {
                session.shuffle_active = false;
            }
            session.loop_active
        };
        self.push_looping(looping);
        self.notify();
    }

    pub fn toggle_shuffle(&self) {
        let cleared_loop = {
            let mut session = self.session.borrow_mut();
            session.shuffle_active = !session.shuffle_active;
            let cleared = session.shuffle_active && session.loop_active;
            if session.shuffle_active {
                session.loop_active = false;
            }
            cleared
        };
        if cleared_loop {
            self.push_looping(false);
        }
        self.notify();
    }

    /// Jump to `fraction` of the current element's duration.
    pub fn seek(&self, fraction: f64) {
        let kind = self.session.borrow().kind;
        let Some(element) = self.element(kind) else {
            return;
        };
        let Some(duration) = element.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        element.seek_to(fraction * duration);
    }

    /// Position tick from the element playing `kind`.
    pub fn on_time_update(&self, kind: MediaKind) {
        if kind != self.session.borrow().kind {
            return;
        }
        let Some(element) = self.element(kind) else {
            return;
        };
        if let Some(readout) = TimeReadout::measure(element.position(), element.duration()) {
            self.update(|s| s.time = readout);
        }
    }

    /// The element playing `kind` reached its end. Native looping never gets
    /// here, so loop mode only has to suppress advancing.
    pub async fn on_track_ended(&self, kind: MediaKind) {
        let (shuffle, looping, is_last) = {
            let session = self.session.borrow();
            if kind != session.kind || session.is_changing_track {
                return;
            }
            (
                session.shuffle_active,
                session.loop_active,
                session.is_last_track,
            )
        };

        if shuffle {
            let current_id = self.session.borrow().current_track.as_ref().map(|t| t.id);
            match self.random_pick(kind, current_id) {
                Some(pick) => self.select_track(pick, kind, None).await,
                None => self.update(|s| s.is_playing = false),
            }
        } else if is_last && !looping {
            self.update(|s| s.is_playing = false);
        } else if !looping {
            self.next().await;
        }
    }

    pub fn set_video_visible(&self, visible: bool) {
        self.update(|s| s.video_visible = visible);
    }

    fn surfaces(&self) -> Option<Surfaces<E>> {
        self.surfaces.borrow().clone()
    }

    fn element(&self, kind: MediaKind) -> Option<E> {
        self.surfaces
            .borrow()
            .as_ref()
            .map(|surfaces| surfaces.get(kind).element().clone())
    }

    fn push_looping(&self, looping: bool) {
        if let Some(surfaces) = self.surfaces() {
            for surface in surfaces.iter() {
                surface.element().set_looping(looping);
            }
        }
    }

    async fn start(&self, element: &E) {
        let outcome = element.play().await;
        self.record_play(outcome);
    }

    fn record_play(&self, outcome: Result<(), PlaybackError>) {
        match outcome {
            Ok(()) => self.update(|s| s.is_playing = true),
            Err(err) => {
                tracing::warn!("{err}");
                self.update(|s| s.is_playing = false);
            }
        }
    }

    fn random_pick(&self, kind: MediaKind, current_id: Option<TrackId>) -> Option<TrackId> {
        let lists = self.lists.borrow();
        let list = lists.get(kind);
        if list.len() <= 1 {
            return None;
        }
        let candidates: Vec<TrackId> = list
            .iter()
            .map(|track| track.id)
            .filter(|id| Some(*id) != current_id)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.borrow_mut().gen_range(0..candidates.len());
        Some(candidates[index])
    }

    fn next_generation(&self) -> u64 {
        let token = self.generation.get().wrapping_add(1);
        self.generation.set(token);
        token
    }

    fn neighbour(&self, step: Step) -> Option<(TrackId, MediaKind)> {
        let session = self.session.borrow();
        let current = session.current_track.as_ref()?;
        let lists = self.lists.borrow();
        let list = lists.get(session.kind);
        let index = list.iter().position(|track| track.id == current.id)?;
        let target = match step {
            Step::Previous => index.checked_sub(1)?,
            Step::Next => index + 1,
        };
        list.get(target).map(|track| (track.id, session.kind))
    }

    fn current_is_last(&self) -> bool {
        let session = self.session.borrow();
        let Some(current) = session.current_track.as_ref() else {
            return false;
        };
        let lists = self.lists.borrow();
        let list = lists.get(session.kind);
        match list.iter().position(|track| track.id == current.id) {
            Some(index) => index + 1 == list.len(),
            // Not in this list: `next` has no successor to move to, so the
            // bar treats it as the end until a list containing it is loaded.
            None => true,
        }
    }

    fn update(&self, change: impl FnOnce(&mut PlaybackSession)) {
        let changed = {
            let mut session = self.session.borrow_mut();
            let before = session.clone();
            change(&mut session);
            *session != before
        };
        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Resolves after yielding to the executor exactly once.
fn settle() -> Settle {
    Settle { yielded: false }
}

struct Settle {
    yielded: bool,
}

impl Future for Settle {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::playback::PlaybackError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeState {
        src: Option<String>,
        attached: Vec<String>,
        detaches: usize,
        playing: bool,
        reject: bool,
        looping: bool,
        position: f64,
        duration: Option<f64>,
        seeks: Vec<f64>,
        // Executor yields before `play` settles
        play_delay: usize,
    }

    #[derive(Clone, Default)]
    struct FakeMedia(Rc<RefCell<FakeState>>);

    impl FakeMedia {
        fn state(&self) -> std::cell::Ref<'_, FakeState> {
            self.0.borrow()
        }

        fn set(&self, change: impl FnOnce(&mut FakeState)) {
            change(&mut self.0.borrow_mut());
        }
    }

    #[async_trait(?Send)]
    impl MediaElement for FakeMedia {
        fn has_source(&self) -> bool {
            self.0.borrow().src.is_some()
        }

        fn attach(&self, url: &str) {
            let mut state = self.0.borrow_mut();
            state.src = Some(url.to_string());
            state.attached.push(url.to_string());
        }

        fn detach(&self) {
            let mut state = self.0.borrow_mut();
            state.src = None;
            state.playing = false;
            state.detaches += 1;
        }

        async fn play(&self) -> Result<(), PlaybackError> {
            let delay = self.0.borrow().play_delay;
            for _ in 0..delay {
                settle().await;
            }
            let mut state = self.0.borrow_mut();
            if state.reject {
                return Err(PlaybackError::Rejected("NotAllowedError".into()));
            }
            if state.src.is_none() {
                return Err(PlaybackError::NoSource);
            }
            state.playing = true;
            Ok(())
        }

        fn pause(&self) {
            self.0.borrow_mut().playing = false;
        }

        fn set_looping(&self, looping: bool) {
            self.0.borrow_mut().looping = looping;
        }

        fn position(&self) -> f64 {
            self.0.borrow().position
        }

        fn duration(&self) -> Option<f64> {
            self.0.borrow().duration
        }

        fn seek_to(&self, seconds: f64) {
            self.0.borrow_mut().seeks.push(seconds);
        }
    }

    fn config() -> ApiConfig {
        ApiConfig::new("http://host/api")
    }

    fn song(id: TrackId) -> Track {
        let config = config();
        Track {
            id,
            title: format!("Song {id}"),
            artist: "Artist".into(),
            cover_image: None,
            source_url: config.stream_url(MediaKind::Audio, id),
            duration: "03:00".into(),
            kind: MediaKind::Audio,
        }
    }

    fn video(id: TrackId) -> Track {
        let config = config();
        Track {
            id,
            title: format!("Clip {id}"),
            artist: "Video".into(),
            cover_image: None,
            source_url: config.stream_url(MediaKind::Video, id),
            duration: "01:00".into(),
            kind: MediaKind::Video,
        }
    }

    struct Rig {
        controller: PlaybackController<FakeMedia>,
        audio: FakeMedia,
        video: FakeMedia,
    }

    fn rig(ids: &[TrackId]) -> Rig {
        let controller = PlaybackController::with_rng(StdRng::seed_from_u64(7));
        let audio = FakeMedia::default();
        let video = FakeMedia::default();
        controller.attach(audio.clone(), video.clone());
        controller.load_list(MediaKind::Audio, ids.iter().copied().map(song).collect());
        Rig {
            controller,
            audio,
            video,
        }
    }

    fn attached_id(rig: &Rig) -> Option<TrackId> {
        rig.controller.snapshot().last_played_id()
    }

    #[tokio::test]
    async fn selections_while_busy_are_dropped() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;

        futures_util::join!(
            c.select_track(1, MediaKind::Audio, None),
            c.select_track(2, MediaKind::Audio, None),
            c.select_track(3, MediaKind::Audio, None),
        );

        assert_eq!(attached_id(&rig), Some(1));
        assert_eq!(rig.audio.state().attached, vec![song(1).source_url]);
        let session = c.snapshot();
        assert!(!session.is_changing_track);
        assert!(session.is_playing);
        assert_eq!(session.current_track.map(|t| t.id), Some(1));
    }

    #[tokio::test]
    async fn previous_and_next_are_dropped_while_busy() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;

        futures_util::join!(
            c.select_track(1, MediaKind::Audio, None),
            c.next(),
            c.previous(),
        );

        assert_eq!(attached_id(&rig), Some(1));
        assert_eq!(
            rig.audio.state().attached,
            vec![song(2).source_url, song(1).source_url]
        );
        assert!(!c.snapshot().is_changing_track);
    }

    #[tokio::test]
    async fn selection_after_busy_clears_goes_through() {
        let rig = rig(&[1, 2]);
        rig.controller.select_track(1, MediaKind::Audio, None).await;
        rig.controller.select_track(2, MediaKind::Audio, None).await;
        assert_eq!(attached_id(&rig), Some(2));
        assert_eq!(rig.audio.state().attached.len(), 2);
    }

    #[test]
    fn loop_and_shuffle_are_exclusive() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;

        c.toggle_loop();
        assert!(c.snapshot().loop_active);
        assert!(rig.audio.state().looping);
        assert!(rig.video.state().looping);

        c.toggle_shuffle();
        let session = c.snapshot();
        assert!(session.shuffle_active);
        assert!(!session.loop_active);
        assert!(!rig.audio.state().looping);

        c.toggle_loop();
        let session = c.snapshot();
        assert!(session.loop_active && !session.shuffle_active);

        c.toggle_loop();
        let session = c.snapshot();
        assert!(!session.loop_active && !session.shuffle_active);
    }

    #[tokio::test]
    async fn reselecting_the_attached_track_only_resumes() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;
        c.pause();
        assert!(!c.snapshot().is_playing);

        let detaches = rig.audio.state().detaches;
        c.select_track(2, MediaKind::Audio, None).await;

        assert!(c.snapshot().is_playing);
        assert_eq!(rig.audio.state().attached.len(), 1);
        assert_eq!(rig.audio.state().detaches, detaches);
    }

    #[tokio::test]
    async fn previous_at_start_is_a_no_op() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        let before = c.snapshot();

        c.previous().await;

        assert_eq!(c.snapshot(), before);
        assert_eq!(rig.audio.state().attached.len(), 1);
    }

    #[tokio::test]
    async fn next_walks_to_the_end_and_stops() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;
        assert!(!c.snapshot().is_last_track);

        c.next().await;
        assert_eq!(attached_id(&rig), Some(3));
        assert!(c.snapshot().is_last_track);

        c.next().await;
        assert_eq!(attached_id(&rig), Some(3));
        assert_eq!(rig.audio.state().attached.len(), 2);
    }

    #[tokio::test]
    async fn next_at_end_with_shuffle_picks_another_track() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(3, MediaKind::Audio, None).await;
        c.toggle_shuffle();

        c.next().await;

        let id = attached_id(&rig);
        assert!(matches!(id, Some(1) | Some(2)), "got {id:?}");
    }

    #[tokio::test]
    async fn previous_moves_back() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(3, MediaKind::Audio, None).await;
        c.previous().await;
        assert_eq!(attached_id(&rig), Some(2));
        assert!(!c.snapshot().is_last_track);
    }

    #[tokio::test]
    async fn time_readout_is_zero_padded() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        rig.audio.set(|s| {
            s.duration = Some(125.0);
            s.position = 9.0;
        });

        c.on_time_update(MediaKind::Audio);

        let time = c.snapshot().time;
        assert_eq!(time.total.to_string(), "02:05");
        assert_eq!(time.current.to_string(), "00:09");
        assert!((time.progress - 7.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn time_updates_from_the_other_surface_are_ignored() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        rig.video.set(|s| {
            s.duration = Some(60.0);
            s.position = 30.0;
        });

        c.on_time_update(MediaKind::Video);

        assert_eq!(c.snapshot().time, TimeReadout::default());
    }

    #[tokio::test]
    async fn ended_on_last_track_stops() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;
        assert!(c.snapshot().is_playing);

        c.on_track_ended(MediaKind::Audio).await;

        let session = c.snapshot();
        assert!(!session.is_playing);
        assert_eq!(session.last_played_id(), Some(2));
        assert_eq!(rig.audio.state().attached.len(), 1);
    }

    #[tokio::test]
    async fn ended_advances_unless_looping() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;

        c.toggle_loop();
        c.on_track_ended(MediaKind::Audio).await;
        assert_eq!(attached_id(&rig), Some(1));

        c.toggle_loop();
        c.on_track_ended(MediaKind::Audio).await;
        assert_eq!(attached_id(&rig), Some(2));
    }

    #[tokio::test]
    async fn ended_with_shuffle_plays_a_different_track() {
        let rig = rig(&[1, 2, 3, 4]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;
        c.toggle_shuffle();

        for _ in 0..5 {
            let before = attached_id(&rig);
            c.on_track_ended(MediaKind::Audio).await;
            let after = attached_id(&rig);
            assert!(after.is_some());
            assert_ne!(after, before);
        }
    }

    #[tokio::test]
    async fn ended_with_shuffle_and_nothing_else_stops() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        c.toggle_shuffle();

        c.on_track_ended(MediaKind::Audio).await;

        assert!(!c.snapshot().is_playing);
        assert_eq!(rig.audio.state().attached.len(), 1);
    }

    #[tokio::test]
    async fn play_random_needs_more_than_one_track() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        c.play_random().await;
        assert_eq!(rig.audio.state().attached.len(), 1);
    }

    #[tokio::test]
    async fn rejected_play_degrades_to_paused() {
        let rig = rig(&[1, 2]);
        rig.audio.set(|s| s.reject = true);

        rig.controller.select_track(1, MediaKind::Audio, None).await;

        let session = rig.controller.snapshot();
        assert!(!session.is_playing);
        assert!(!session.is_changing_track);
        assert_eq!(session.last_played_id(), Some(1));
    }

    #[tokio::test]
    async fn missing_id_is_a_silent_no_op() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        let before = c.snapshot();

        c.select_track(99, MediaKind::Audio, None).await;

        assert_eq!(c.snapshot(), before);
        assert_eq!(rig.audio.state().detaches, 1);
    }

    #[tokio::test]
    async fn override_list_resolves_the_selection() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;

        c.select_track(5, MediaKind::Audio, Some(vec![song(4), song(5)]))
            .await;

        let session = c.snapshot();
        assert_eq!(session.last_played_id(), Some(5));
        assert!(session.is_last_track);
        assert_eq!(c.list(MediaKind::Audio).len(), 2);
    }

    #[tokio::test]
    async fn video_selection_uses_the_video_surface() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.load_list(MediaKind::Video, vec![video(10), video(11)]);
        c.select_track(1, MediaKind::Audio, None).await;

        c.select_track(11, MediaKind::Video, None).await;

        let session = c.snapshot();
        assert!(session.video_visible);
        assert_eq!(session.kind, MediaKind::Video);
        assert!(session.is_last_track);
        assert!(!rig.audio.has_source());
        assert_eq!(rig.video.state().attached, vec![video(11).source_url]);

        c.set_video_visible(false);
        assert!(!c.snapshot().video_visible);
    }

    #[tokio::test]
    async fn play_attaches_the_current_track_when_needed() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.play().await;
        assert!(rig.audio.state().attached.is_empty());

        c.select_track(1, MediaKind::Audio, None).await;
        rig.audio.set(|s| s.src = None);
        c.play().await;

        assert_eq!(rig.audio.state().attached.len(), 2);
        assert!(c.snapshot().is_playing);
    }

    #[tokio::test]
    async fn seek_clamps_and_needs_a_duration() {
        let rig = rig(&[1]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;

        c.seek(0.5);
        assert!(rig.audio.state().seeks.is_empty());

        rig.audio.set(|s| s.duration = Some(200.0));
        c.seek(0.25);
        c.seek(1.5);
        c.seek(-1.0);
        assert_eq!(rig.audio.state().seeks, vec![50.0, 200.0, 0.0]);
    }

    #[tokio::test]
    async fn load_list_recomputes_last_track_flag() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        c.select_track(2, MediaKind::Audio, None).await;
        assert!(c.snapshot().is_last_track);

        c.load_list(MediaKind::Audio, vec![song(1), song(2), song(3)]);
        let session = c.snapshot();
        assert!(!session.is_last_track);
        assert_eq!(session.last_played_id(), Some(2));
        assert!(session.is_playing);
    }

    #[tokio::test]
    async fn current_track_outside_the_list_counts_as_last() {
        let rig = rig(&[1, 2, 3]);
        let c = &rig.controller;
        c.select_track(1, MediaKind::Audio, None).await;
        assert!(!c.snapshot().is_last_track);

        c.load_list(MediaKind::Audio, vec![song(4), song(5)]);
        assert!(c.snapshot().is_last_track);

        c.next().await;
        assert_eq!(attached_id(&rig), Some(1));
    }

    #[tokio::test]
    async fn operations_before_attach_do_nothing() {
        let controller: PlaybackController<FakeMedia> = PlaybackController::new();
        controller.load_list(MediaKind::Audio, vec![song(1)]);
        controller.select_track(1, MediaKind::Audio, None).await;
        controller.pause();
        controller.seek(0.5);
        let session = controller.snapshot();
        assert_eq!(session.current_track, None);
        assert!(!session.is_changing_track);
    }

    #[tokio::test]
    async fn dispose_cancels_a_pending_transition() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;

        futures_util::join!(c.select_track(1, MediaKind::Audio, None), async {
            c.dispose()
        });

        assert!(rig.audio.state().attached.is_empty());
        let session = c.snapshot();
        assert!(!session.is_changing_track);
        assert!(!c.is_attached());

        c.select_track(2, MediaKind::Audio, None).await;
        assert!(rig.audio.state().attached.is_empty());
    }

    #[tokio::test]
    async fn superseded_play_leaves_the_newer_change_busy() {
        let rig = rig(&[1, 2]);
        let c = &rig.controller;
        rig.audio.set(|s| s.play_delay = 3);
        let busy_when_first_finished = Cell::new(None);

        futures_util::join!(
            async {
                c.select_track(1, MediaKind::Audio, None).await;
                busy_when_first_finished.set(Some(c.snapshot().is_changing_track));
            },
            async {
                // Let the first change reach `play` before starting over.
                settle().await;
                c.dispose();
                c.attach(rig.audio.clone(), rig.video.clone());
                c.load_list(MediaKind::Audio, vec![song(1), song(2)]);
                c.select_track(2, MediaKind::Audio, None).await;
            },
        );

        assert_eq!(busy_when_first_finished.get(), Some(true));
        let session = c.snapshot();
        assert!(!session.is_changing_track);
        assert!(session.is_playing);
        assert_eq!(attached_id(&rig), Some(2));
        assert_eq!(session.current_track.map(|t| t.id), Some(2));
    }

    #[tokio::test]
    async fn listeners_see_every_change() {
        let rig = rig(&[1, 2]);
        let seen: Rc<RefCell<Vec<PlaybackSession>>> = Rc::default();
        let sink = seen.clone();
        rig.controller
            .subscribe(move |session| sink.borrow_mut().push(session.clone()));

        rig.controller.select_track(1, MediaKind::Audio, None).await;

        let seen = seen.borrow();
        assert!(seen.iter().any(|s| s.is_changing_track));
        let last = seen.last().unwrap();
        assert!(last.is_playing && !last.is_changing_track);
        assert_eq!(last.current_track.as_ref().map(|t| t.id), Some(1));
    }
}
