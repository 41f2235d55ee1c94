use crate::api::MediaKind;
use crate::components::views::{ErrorState, LoadingState};
use crate::components::TrackList;
use crate::db::AppSettings;
use dioxus::prelude::*;

#[component]
pub fn VideosView() -> Element {
    let app_settings = use_context::<Signal<AppSettings>>();

    let videos = use_resource(move || {
        let client = app_settings().client();
        async move { client.videos().await }
    });

    rsx! {
        div { class: "page",
            h2 { class: "section-title", "Videos" }
            match videos() {
                Some(Ok(tracks)) => rsx! { TrackList { tracks, kind: MediaKind::Video } },
                Some(Err(err)) => rsx! { ErrorState { message: err.to_string() } },
                None => rsx! { LoadingState {} },
            }
        }
    }
}
