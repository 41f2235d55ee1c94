use crate::api::MediaKind;
use crate::playback::{MediaElement, PlaybackController, PlaybackError};
use async_trait::async_trait;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, HtmlMediaElement};

const AUDIO_ELEMENT_ID: &str = "riffstream-audio";
const VIDEO_ELEMENT_ID: &str = "riffstream-video";
const VIDEO_VISIBLE_CLASS: &str = "video-surface is-visible";
const VIDEO_HIDDEN_CLASS: &str = "video-surface";

/// A `<audio>` or `<video>` element owned by the document body.
#[derive(Clone)]
pub struct DomMedia {
    element: HtmlMediaElement,
}

#[async_trait(?Send)]
impl MediaElement for DomMedia {
    fn has_source(&self) -> bool {
        self.element.has_attribute("src")
    }

    fn attach(&self, url: &str) {
        self.element.set_src(url);
    }

    fn detach(&self) {
        let _ = self.element.pause();
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        let promise = self
            .element
            .play()
            .map_err(|err| PlaybackError::Rejected(format!("{err:?}")))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| PlaybackError::Rejected(format!("{err:?}")))
    }

    fn pause(&self) {
        let _ = self.element.pause();
    }

    fn set_looping(&self, looping: bool) {
        self.element.set_loop(looping);
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn seek_to(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }
}

fn get_or_create(kind: MediaKind) -> Option<HtmlMediaElement> {
    let document = window()?.document()?;
    let (id, tag) = match kind {
        MediaKind::Audio => (AUDIO_ELEMENT_ID, "audio"),
        MediaKind::Video => (VIDEO_ELEMENT_ID, "video"),
    };

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlMediaElement>().ok();
    }

    let element: HtmlMediaElement = document.create_element(tag).ok()?.dyn_into().ok()?;
    element.set_id(id);
    element.set_attribute("preload", "metadata").ok()?;
    if kind == MediaKind::Video {
        element.set_class_name(VIDEO_HIDDEN_CLASS);
        element.set_attribute("playsinline", "true").ok()?;
    }
    document.body()?.append_child(&element).ok()?;
    Some(element)
}

/// Wire the element callbacks for `kind` into the controller. The `on*`
/// properties are replaced rather than added, so mounting twice is harmless.
fn wire(element: &HtmlMediaElement, kind: MediaKind, player: &Rc<PlaybackController<DomMedia>>) {
    let on_time = {
        let player = player.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            player.on_time_update(kind);
        }) as Box<dyn FnMut(_)>)
    };
    element.set_ontimeupdate(Some(on_time.as_ref().unchecked_ref()));
    element.set_onloadedmetadata(Some(on_time.as_ref().unchecked_ref()));
    on_time.forget();

    let on_ended = {
        let player = player.clone();
        Closure::wrap(Box::new(move |_: web_sys::Event| {
            let player = player.clone();
            wasm_bindgen_futures::spawn_local(async move {
                player.on_track_ended(kind).await;
            });
        }) as Box<dyn FnMut(_)>)
    };
    element.set_onended(Some(on_ended.as_ref().unchecked_ref()));
    on_ended.forget();
}

/// Create (or find) both elements and hand them to the controller.
pub fn mount(player: &Rc<PlaybackController<DomMedia>>) {
    let (Some(audio), Some(video)) = (
        get_or_create(MediaKind::Audio),
        get_or_create(MediaKind::Video),
    ) else {
        tracing::warn!("media elements could not be created");
        return;
    };

    wire(&audio, MediaKind::Audio, player);
    wire(&video, MediaKind::Video, player);
    player.attach(DomMedia { element: audio }, DomMedia { element: video });
}

/// Leaves fullscreen if anything is fullscreen, else puts the video there.
pub fn toggle_fullscreen() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
        return;
    }
    if let Some(video) = get_or_create(MediaKind::Video) {
        if let Err(err) = video.request_fullscreen() {
            tracing::warn!("fullscreen refused: {err:?}");
        }
    }
}

pub fn show_video(visible: bool) {
    if let Some(video) = get_or_create(MediaKind::Video) {
        video.set_class_name(if visible {
            VIDEO_VISIBLE_CLASS
        } else {
            VIDEO_HIDDEN_CLASS
        });
    }
}
