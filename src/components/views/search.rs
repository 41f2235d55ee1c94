use crate::api::{MediaKind, SearchFilter, SearchResults};
use crate::components::views::home::AlbumCard;
use crate::components::views::{ErrorState, LoadingState};
use crate::components::{AppView, Icon, Navigation, TrackList};
use crate::db::AppSettings;
use dioxus::prelude::*;

#[component]
pub fn SearchView(query: String) -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let navigation = use_context::<Navigation>();

    let mut filter = use_signal(SearchFilter::default);

    let searched = query.clone();
    let results = use_resource(use_reactive!(|(searched,)| {
        let client = app_settings().client();
        async move { client.search(&searched).await }
    }));

    let body = match results() {
        None => rsx! { LoadingState {} },
        Some(Err(err)) => rsx! { ErrorState { message: err.to_string() } },
        Some(Ok(found)) if found.is_empty() => rsx! {
            p { class: "empty-state", "No results for \"{query}\"." }
        },
        Some(Ok(found)) => {
            let active = filter();
            let shown = found.filtered(active);
            let nothing_shown = shown.is_empty();
            let SearchResults { songs, albums, artists, videos } = shown;
            rsx! {
                div { class: "filter-tabs", role: "tablist",
                    for option in SearchFilter::ALL {
                        button {
                            key: "{option.label()}",
                            role: "tab",
                            class: if option == active { "filter-tab is-active" } else { "filter-tab" },
                            aria_selected: option == active,
                            onclick: move |_| filter.set(option),
                            "{option.label()}"
                        }
                    }
                }
                if nothing_shown {
                    p { class: "empty-state", "Nothing in this tab." }
                }
                if !songs.is_empty() {
                    section { class: "page-section",
                        h2 { class: "section-title", "Songs" }
                        TrackList { tracks: songs.clone(), kind: MediaKind::Audio }
                    }
                }
                if !albums.is_empty() {
                    section { class: "page-section",
                        h2 { class: "section-title", "Albums" }
                        div { class: "album-grid",
                            for album in albums.iter().cloned() {
                                AlbumCard {
                                    key: "{album.id}",
                                    album: album.clone(),
                                    onclick: move |_| navigation.navigate_to(AppView::AlbumDetail(album.id)),
                                }
                            }
                        }
                    }
                }
                if !artists.is_empty() {
                    section { class: "page-section",
                        h2 { class: "section-title", "Artists" }
                        ul { class: "artist-list",
                            for artist in artists.iter() {
                                li { key: "{artist.name}", class: "artist-chip",
                                    Icon { name: "user".to_string(), class: "icon icon-muted".to_string() }
                                    span { "{artist.name}" }
                                }
                            }
                        }
                    }
                }
                if !videos.is_empty() {
                    section { class: "page-section",
                        h2 { class: "section-title", "Videos" }
                        TrackList { tracks: videos.clone(), kind: MediaKind::Video }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page",
            p { class: "detail-kicker", "Results for" }
            h1 { class: "detail-title", "{query}" }
            {body}
        }
    }
}
