use crate::api::{Album, MediaKind};
use crate::components::views::{ErrorState, LoadingState};
use crate::components::{AppView, Icon, Navigation, TrackList};
use crate::db::AppSettings;
use crate::diagnostics::{log_perf, started};
use dioxus::prelude::*;

const TOP_SONGS_LIMIT: u32 = 10;

#[component]
pub fn HomeView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let navigation = use_context::<Navigation>();

    let top_songs = use_resource(move || {
        let client = app_settings().client();
        async move {
            let started_at = started();
            let songs = client.top_songs(TOP_SONGS_LIMIT).await;
            log_perf("home.top_songs", started_at, &format!("count={}", songs.len()));
            songs
        }
    });

    let albums = use_resource(move || {
        let client = app_settings().client();
        async move { client.albums().await }
    });

    let videos = use_resource(move || {
        let client = app_settings().client();
        async move { client.videos().await }
    });

    rsx! {
        div { class: "page",
            section { class: "page-section",
                h2 { class: "section-title", "Top songs" }
                match top_songs() {
                    Some(tracks) => rsx! { TrackList { tracks, kind: MediaKind::Audio } },
                    None => rsx! { LoadingState {} },
                }
            }

            section { class: "page-section",
                h2 { class: "section-title", "Albums" }
                match albums() {
                    Some(albums) if albums.is_empty() => rsx! {
                        p { class: "empty-state", "No albums yet." }
                    },
                    Some(albums) => rsx! {
                        div { class: "album-grid",
                            for album in albums {
                                AlbumCard {
                                    key: "{album.id}",
                                    album: album.clone(),
                                    onclick: move |_| navigation.navigate_to(AppView::AlbumDetail(album.id)),
                                }
                            }
                        }
                    },
                    None => rsx! { LoadingState {} },
                }
            }

            section { class: "page-section",
                div { class: "section-header",
                    h2 { class: "section-title", "Videos" }
                    button {
                        class: "link-button",
                        onclick: move |_| navigation.navigate_to(AppView::Videos),
                        "See all"
                    }
                }
                match videos() {
                    Some(Ok(tracks)) => rsx! { TrackList { tracks, kind: MediaKind::Video } },
                    Some(Err(err)) => rsx! { ErrorState { message: err.to_string() } },
                    None => rsx! { LoadingState {} },
                }
            }
        }
    }
}

#[component]
pub fn AlbumCard(album: Album, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button { class: "album-card", onclick: move |e| onclick.call(e),
            div { class: "album-cover",
                match &album.cover_image {
                    Some(url) => rsx! {
                        img { src: "{url}", alt: "{album.name}", loading: "lazy" }
                    },
                    None => rsx! {
                        Icon { name: "album".to_string(), class: "icon icon-muted".to_string() }
                    },
                }
            }
            p { class: "album-name", "{album.name}" }
            p { class: "album-artist", "{album.artist}" }
        }
    }
}
