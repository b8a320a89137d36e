//! Browser camera and microphone access.
//!
//! `getUserMedia` runs through `document::eval`; the acquired `MediaStream`
//! objects stay on the JS side, keyed by stream id, and Rust only holds the
//! [`StreamHandle`].

use dioxus::prelude::*;
use serde::Deserialize;
use shared_types::media::{MediaDevices, MediaError, MediaKind, StreamHandle};

/// Element id of the `<video>` the camera stream is attached to.
pub const PREVIEW_ELEMENT_ID: &str = "session-preview";

const ACQUIRE_JS: &str = r#"
const kind = __KIND__;
const epoch = window.__ablelyfEpoch || 0;
try {
    if (!navigator.mediaDevices || !navigator.mediaDevices.getUserMedia) {
        return { name: "NotSupportedError", message: "getUserMedia is unavailable" };
    }
    const constraints = kind === "camera" ? { video: true } : { audio: true };
    const stream = await navigator.mediaDevices.getUserMedia(constraints);
    if ((window.__ablelyfEpoch || 0) !== epoch) {
        stream.getTracks().forEach((t) => t.stop());
        return { name: "AbortError", message: "The session view was closed" };
    }
    window.__ablelyfStreams = window.__ablelyfStreams || {};
    window.__ablelyfStreams[stream.id] = stream;
    if (kind === "camera") {
        const video = document.getElementById(__PREVIEW__);
        if (video) { video.srcObject = stream; }
    }
    return { id: stream.id };
} catch (e) {
    return { name: (e && e.name) || "Error", message: (e && e.message) || String(e) };
}
"#;

const RELEASE_JS: &str = r#"
const id = __ID__;
const streams = window.__ablelyfStreams || {};
const stream = streams[id];
if (stream) {
    stream.getTracks().forEach((t) => t.stop());
    delete streams[id];
}
const video = document.getElementById(__PREVIEW__);
if (video && video.srcObject && video.srcObject.id === id) { video.srcObject = null; }
"#;

const RELEASE_ALL_JS: &str = r#"
window.__ablelyfEpoch = (window.__ablelyfEpoch || 0) + 1;
const streams = window.__ablelyfStreams || {};
Object.keys(streams).forEach((id) => {
    streams[id].getTracks().forEach((t) => t.stop());
    delete streams[id];
});
const video = document.getElementById(__PREVIEW__);
if (video) { video.srcObject = null; }
"#;

#[derive(Debug, Deserialize)]
struct AcquireReply {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn acquire_script(kind: MediaKind) -> String {
    ACQUIRE_JS
        .replace("__KIND__", &js_string(kind.as_str()))
        .replace("__PREVIEW__", &js_string(PREVIEW_ELEMENT_ID))
}

fn release_all_script() -> String {
    RELEASE_ALL_JS.replace("__PREVIEW__", &js_string(PREVIEW_ELEMENT_ID))
}

/// [`MediaDevices`] backed by the browser's `navigator.mediaDevices`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserMedia;

impl MediaDevices for BrowserMedia {
    async fn acquire(&self, kind: MediaKind) -> Result<StreamHandle, MediaError> {
        let reply: AcquireReply = document::eval(&acquire_script(kind)).join().await.map_err(|e| {
            tracing::warn!(%e, %kind, "Media eval failed");
            MediaError::Unsupported
        })?;

        match reply.id {
            Some(id) => Ok(StreamHandle { id, kind }),
            None => Err(MediaError::from_dom_exception(kind, &reply.name, &reply.message)),
        }
    }

    fn release(&self, stream: &StreamHandle) {
        let script = RELEASE_JS
            .replace("__ID__", &js_string(&stream.id))
            .replace("__PREVIEW__", &js_string(PREVIEW_ELEMENT_ID));
        let _ = document::eval(&script);
    }
}

impl BrowserMedia {
    /// Stop every stream this page opened, including any whose
    /// `getUserMedia` call is still pending.
    pub fn release_all(&self) {
        let _ = document::eval(&release_all_script());
    }
}
