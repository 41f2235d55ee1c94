// Desktop webview bridge: the elements live in the webview and are driven
// through `document::eval`, with a polled mirror standing in for synchronous
// property reads.
use crate::api::MediaKind;
use crate::playback::{MediaElement, PlaybackController, PlaybackError};
use async_trait::async_trait;
use dioxus::prelude::*;
use serde::Deserialize;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

const BRIDGE_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__riffstreamMedia) {
    return true;
  }

  const element = (id, tag) => {
    let el = document.getElementById(id);
    if (!el) {
      el = document.createElement(tag);
      el.id = id;
      el.preload = "metadata";
      if (tag === "video") {
        el.className = "video-surface";
        el.setAttribute("playsinline", "true");
      }
      document.body.appendChild(el);
    }
    return el;
  };

  const elements = {
    audio: element("riffstream-audio", "audio"),
    video: element("riffstream-video", "video"),
  };

  window.__riffstreamMedia = {
    elements,
    apply(cmd) {
      const el = elements[cmd.target];
      if (!el) return;
      switch (cmd.type) {
        case "attach":
          el.src = cmd.src;
          break;
        case "detach":
          el.pause();
          el.removeAttribute("src");
          el.load();
          break;
        case "pause":
          el.pause();
          break;
        case "loop":
          el.loop = !!cmd.value;
          break;
        case "seek":
          try { el.currentTime = Math.max(0, cmd.position); } catch (_err) {}
          break;
        case "show":
          el.className = cmd.value ? "video-surface is-visible" : "video-surface";
          break;
        case "fullscreen":
          if (document.fullscreenElement) {
            document.exitFullscreen().catch(() => {});
          } else if (el.requestFullscreen) {
            el.requestFullscreen().catch(() => {});
          }
          break;
      }
    },
    snapshot() {
      const read = (el) => ({
        current_time: Number.isFinite(el.currentTime) ? el.currentTime : 0,
        duration: Number.isFinite(el.duration) ? el.duration : 0,
        ended: !!el.ended,
      });
      return { audio: read(elements.audio), video: read(elements.video) };
    },
  };
  return true;
})();
"#;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct ElementSnapshot {
    current_time: f64,
    duration: f64,
    ended: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct BridgeSnapshot {
    audio: ElementSnapshot,
    video: ElementSnapshot,
}

#[derive(Debug, Default)]
struct Mirror {
    has_source: bool,
    position: f64,
    duration: f64,
    ended: bool,
}

/// One element inside the webview plus the last values polled from it.
#[derive(Clone)]
pub struct BridgedMedia {
    kind: MediaKind,
    mirror: Rc<RefCell<Mirror>>,
}

impl BridgedMedia {
    fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            mirror: Rc::new(RefCell::new(Mirror::default())),
        }
    }

    fn command(&self, mut command: serde_json::Value) {
        command["target"] = json!(self.kind.label());
        send(command);
    }

    /// Fold a polled snapshot into the mirror. Returns `(moved, just_ended)`.
    fn absorb(&self, snapshot: ElementSnapshot) -> (bool, bool) {
        let mut mirror = self.mirror.borrow_mut();
        if !mirror.has_source {
            mirror.ended = false;
            return (false, false);
        }
        let moved = (mirror.position - snapshot.current_time).abs() > f64::EPSILON
            || (mirror.duration - snapshot.duration).abs() > f64::EPSILON;
        let just_ended = snapshot.ended && !mirror.ended;
        mirror.position = snapshot.current_time;
        mirror.duration = snapshot.duration;
        mirror.ended = snapshot.ended;
        (moved, just_ended)
    }
}

#[async_trait(?Send)]
impl MediaElement for BridgedMedia {
    fn has_source(&self) -> bool {
        self.mirror.borrow().has_source
    }

    fn attach(&self, url: &str) {
        {
            let mut mirror = self.mirror.borrow_mut();
            mirror.has_source = true;
            mirror.ended = false;
        }
        self.command(json!({ "type": "attach", "src": url }));
    }

    fn detach(&self) {
        *self.mirror.borrow_mut() = Mirror::default();
        self.command(json!({ "type": "detach" }));
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        let target = self.kind.label();
        let eval = document::eval(&format!(
            r#"const bridge = window.__riffstreamMedia;
            if (!bridge) return "media bridge missing";
            try {{
                await bridge.elements["{target}"].play();
                return null;
            }} catch (err) {{
                return String(err);
            }}"#
        ));
        match eval.join::<Option<String>>().await {
            Ok(None) => Ok(()),
            Ok(Some(reason)) => Err(PlaybackError::Rejected(reason)),
            Err(err) => Err(PlaybackError::Rejected(format!("{err:?}"))),
        }
    }

    fn pause(&self) {
        self.command(json!({ "type": "pause" }));
    }

    fn set_looping(&self, looping: bool) {
        self.command(json!({ "type": "loop", "value": looping }));
    }

    fn position(&self) -> f64 {
        self.mirror.borrow().position
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.mirror.borrow().duration;
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn seek_to(&self, seconds: f64) {
        self.mirror.borrow_mut().position = seconds;
        self.command(json!({ "type": "seek", "position": seconds }));
    }
}

fn send(command: serde_json::Value) {
    let script = format!(
        r#"(function () {{
            const bridge = window.__riffstreamMedia;
            if (!bridge) return false;
            bridge.apply({command});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

async fn snapshot() -> Option<BridgeSnapshot> {
    let eval = document::eval(
        r#"const bridge = window.__riffstreamMedia;
        return bridge ? bridge.snapshot() : null;"#,
    );
    eval.join::<Option<BridgeSnapshot>>().await.ok().flatten()
}

/// Install the bridge, hand both elements to the controller and start the
/// poll loop that stands in for `timeupdate`/`ended` events.
pub fn mount(player: &Rc<PlaybackController<BridgedMedia>>) {
    let _ = document::eval(BRIDGE_BOOTSTRAP_JS);

    let audio = BridgedMedia::new(MediaKind::Audio);
    let video = BridgedMedia::new(MediaKind::Video);
    player.attach(audio.clone(), video.clone());

    let player = Rc::downgrade(player);
    spawn(async move {
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            let Some(player) = player.upgrade() else {
                break;
            };
            if !player.is_attached() {
                break;
            }
            let Some(polled) = snapshot().await else {
                continue;
            };

            for (element, values) in [(&audio, polled.audio), (&video, polled.video)] {
                let (moved, just_ended) = element.absorb(values);
                if moved {
                    player.on_time_update(element.kind);
                }
                if just_ended {
                    player.on_track_ended(element.kind).await;
                }
            }
        }
    });
}

pub fn toggle_fullscreen() {
    send(json!({ "type": "fullscreen", "target": "video" }));
}

pub fn show_video(visible: bool) {
    send(json!({ "type": "show", "target": "video", "value": visible }));
}
