use crate::components::views::{ErrorState, LoadingState};
use crate::components::{AppView, Icon, LibraryHandle, Navigation, Notices};
use crate::db::AppSettings;
use crate::library::LibrarySnapshot;
use dioxus::prelude::*;

#[component]
pub fn PlaylistsView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let library_state = use_context::<Signal<LibrarySnapshot>>();
    let library = use_context::<LibraryHandle>();
    let navigation = use_context::<Navigation>();
    let notices = use_context::<Notices>();

    let refresh = use_resource({
        let library = library.clone();
        move || {
            let _account = app_settings().auth_token;
            let library = library.clone();
            async move { library.refresh_playlists().await.map(|_| ()) }
        }
    });

    let playlists = library_state.read().playlists.clone();

    let body = match refresh() {
        None if playlists.is_empty() => rsx! { LoadingState {} },
        Some(Err(err)) => rsx! { ErrorState { message: err.to_string() } },
        _ if playlists.is_empty() => rsx! {
            p { class: "empty-state", "No playlists yet. Create one from the sidebar." }
        },
        _ => rsx! {
            ul { class: "playlist-grid",
                for playlist in playlists {
                    li { key: "{playlist.id}", class: "playlist-card",
                        button {
                            class: "playlist-open",
                            onclick: move |_| navigation.navigate_to(AppView::PlaylistDetail(playlist.id)),
                            Icon { name: "playlist".to_string(), class: "icon icon-muted".to_string() }
                            span { class: "playlist-name", "{playlist.name}" }
                        }
                        button {
                            class: "icon-button",
                            aria_label: "Delete playlist",
                            onclick: {
                                let library = library.clone();
                                move |_| {
                                    let library = library.clone();
                                    spawn(async move {
                                        let outcome = library.delete_playlist(playlist.id).await;
                                        notices.report(&outcome, "Playlist deleted");
                                    });
                                }
                            },
                            Icon { name: "trash".to_string(), class: "icon".to_string() }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "page",
            h2 { class: "section-title", "Playlists" }
            {body}
        }
    }
}
