use crate::api::{AlbumId, MediaKind};
use crate::components::views::{ErrorState, LoadingState};
use crate::components::{Icon, PlayerHandle, TrackList};
use crate::db::AppSettings;
use dioxus::prelude::*;

#[component]
pub fn AlbumDetailView(album_id: AlbumId) -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();
    let player = use_context::<PlayerHandle>();

    let album_data = use_resource(use_reactive!(|(album_id,)| {
        let client = app_settings().client();
        async move {
            futures_util::join!(client.album(album_id), client.songs_by_album(album_id))
        }
    }));

    let Some((album, songs)) = album_data() else {
        return rsx! { LoadingState {} };
    };
    let Some(album) = album else {
        return rsx! { ErrorState { message: "Album not found.".to_string() } };
    };

    let on_play_all = {
        let songs = songs.clone();
        move |_| {
            let Some(first) = songs.first().map(|track| track.id) else {
                return;
            };
            player.load_list(MediaKind::Audio, songs.clone());
            let player = player.clone();
            spawn(async move {
                player.select_track(first, MediaKind::Audio, None).await;
            });
        }
    };

    let song_count = songs.len();
    let has_songs = song_count > 0;

    rsx! {
        div { class: "page",
            div { class: "detail-header",
                div { class: "detail-cover",
                    match &album.cover_image {
                        Some(url) => rsx! {
                            img { src: "{url}", alt: "{album.name}" }
                        },
                        None => rsx! {
                            Icon { name: "album".to_string(), class: "icon icon-muted".to_string() }
                        },
                    }
                }
                div { class: "detail-meta",
                    p { class: "detail-kicker", "Album" }
                    h1 { class: "detail-title", "{album.name}" }
                    p { class: "detail-subtitle", "{album.artist} · {song_count} songs" }
                    button {
                        class: "primary-button",
                        disabled: !has_songs,
                        onclick: on_play_all,
                        Icon { name: "play".to_string(), class: "icon".to_string() }
                        "Play"
                    }
                }
            }
            TrackList { tracks: songs, kind: MediaKind::Audio }
        }
    }
}
