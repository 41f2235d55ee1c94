use crate::api::ApiClient;
use crate::components::views::{
    AlbumDetailView, FavoritesView, HomeView, LoginView, PlaylistDetailView, PlaylistsView,
    RegisterView, SearchView, VideosView,
};
use crate::components::{
    view_label, AppView, Icon, MediaBridge, Navigation, PlayerBar, PlayerHandle, Sidebar,
    ToastHost,
};
use crate::db::{load_settings, save_settings, AppSettings};
use crate::library::{LibraryService, LibrarySnapshot, MutationError, Notice, NOTICE_TTL};
use crate::playback::{PlaybackController, PlaybackSession};
use dioxus::core::{spawn_forever, Runtime, RuntimeGuard};
use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

pub type LibraryHandle = Rc<LibraryService<ApiClient>>;

/// Toasts currently on screen.
#[derive(Clone, Copy, PartialEq)]
pub struct Notices(Signal<Vec<Notice>>);

impl Notices {
    pub fn list(&self) -> Vec<Notice> {
        self.0.read().clone()
    }

    /// Show `notice` and drop it again after [`NOTICE_TTL`].
    pub fn push(&self, notice: Notice) {
        let id = notice.id;
        let mut notices = self.0;
        notices.write().push(notice);
        spawn_forever(async move {
            sleep(NOTICE_TTL).await;
            notices.write().retain(|n| n.id != id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        let mut notices = self.0;
        notices.write().retain(|n| n.id != id);
    }

    pub fn report<T>(&self, outcome: &Result<T, MutationError>, success: &str) {
        self.push(Notice::from_outcome(outcome, success));
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[component]
pub fn AppShell() -> Element {
    let current_view = use_signal(|| AppView::Home);
    let history = use_signal(Vec::<AppView>::new);
    let navigation = Navigation::new(current_view, history);
    let mut app_settings = use_signal(AppSettings::default);
    let mut settings_loaded = use_signal(|| false);
    let session = use_signal(PlaybackSession::default);
    let library_state = use_signal(LibrarySnapshot::default);
    let notices = Notices(use_signal(Vec::new));

    let player: PlayerHandle = use_hook(|| {
        let player = Rc::new(PlaybackController::new());
        let runtime = Runtime::current();
        player.subscribe(move |snapshot| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let mut session = session;
            session.set(snapshot.clone());
        });
        player
    });

    let library: LibraryHandle = use_hook(|| {
        let library = Rc::new(LibraryService::new(AppSettings::default().client()));
        let runtime = Runtime::current();
        library.subscribe(move |snapshot| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let mut library_state = library_state;
            library_state.set(snapshot.clone());
        });
        library
    });

    use_context_provider(|| navigation);
    use_context_provider(|| app_settings);
    use_context_provider(|| session);
    use_context_provider(|| library_state);
    use_context_provider(|| notices);
    use_context_provider(|| player.clone());
    use_context_provider(|| library.clone());

    use_drop({
        let player = player.clone();
        move || player.dispose()
    });

    // Load persisted settings once on mount
    use_effect(move || {
        spawn(async move {
            match load_settings().await {
                Ok(settings) => app_settings.set(settings),
                Err(err) => tracing::warn!(error = %err, "could not load settings"),
            }
            settings_loaded.set(true);
        });
    });

    // Point the library at the current account and pull its state
    use_effect({
        let library = library.clone();
        move || {
            let settings = app_settings();
            if !settings_loaded() {
                return;
            }
            library.set_remote(settings.client());
            if !settings.is_signed_in() {
                return;
            }
            let library = library.clone();
            spawn(async move {
                if let Err(err) = library.refresh_favorites().await {
                    tracing::warn!(error = %err, "could not load favorites");
                }
                if let Err(err) = library.refresh_playlists().await {
                    tracing::warn!(error = %err, "could not load playlists");
                }
            });
        }
    });

    // Persist settings whenever they change after the initial load
    use_effect(move || {
        let settings = app_settings();
        if !settings_loaded() {
            return;
        }
        spawn(async move {
            if let Err(err) = save_settings(settings).await {
                tracing::warn!(error = %err, "could not save settings");
            }
        });
    });

    let view = current_view();
    let signed_in = app_settings().is_signed_in();
    // Private views fall back to the sign-in form
    let shown = if view.requires_account() && !signed_in {
        AppView::Login
    } else {
        view.clone()
    };

    rsx! {
        div { class: "app-shell",
            Sidebar {}

            div { class: "app-main",
                header { class: "app-header",
                    if navigation.can_go_back() {
                        button {
                            class: "icon-button",
                            aria_label: "Go back",
                            onclick: move |_| {
                                let _ = navigation.go_back();
                            },
                            Icon {
                                name: "arrow-left".to_string(),
                                class: "icon".to_string(),
                            }
                        }
                    }
                    span { class: "app-header-title", "{view_label(&shown)}" }
                }

                main { class: "app-content",
                    match shown {
                        AppView::Home => rsx! { HomeView {} },
                        AppView::Search(query) => rsx! { SearchView { query } },
                        AppView::AlbumDetail(album_id) => rsx! { AlbumDetailView { album_id } },
                        AppView::Videos => rsx! { VideosView {} },
                        AppView::Favorites => rsx! { FavoritesView {} },
                        AppView::Playlists => rsx! { PlaylistsView {} },
                        AppView::PlaylistDetail(playlist_id) => rsx! { PlaylistDetailView { playlist_id } },
                        AppView::Login => rsx! { LoginView {} },
                        AppView::Register => rsx! { RegisterView {} },
                    }
                }
            }

            PlayerBar {}
        }

        ToastHost {}

        MediaBridge {}
    }
}
