use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Camera,
    Microphone,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Camera => "camera",
            MediaKind::Microphone => "microphone",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Permission to use the {0} was denied")]
    PermissionDenied(MediaKind),
    #[error("No {0} was found on this device")]
    DeviceUnavailable(MediaKind),
    #[error("Media devices are not available here")]
    Unsupported,
    #[error("Could not start the {kind}: {message}")]
    Failed { kind: MediaKind, message: String },
}

impl MediaError {
    /// Map a browser `DOMException` name to an error.
    pub fn from_dom_exception(kind: MediaKind, name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => MediaError::PermissionDenied(kind),
            "NotFoundError" | "OverconstrainedError" => MediaError::DeviceUnavailable(kind),
            "NotSupportedError" | "TypeError" => MediaError::Unsupported,
            _ => MediaError::Failed {
                kind,
                message: message.to_string(),
            },
        }
    }
}

/// Opaque handle to a live capture stream owned by the device backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub id: String,
    pub kind: MediaKind,
}

// ── Trait ────────────────────────────────────────────────────────────

/// Access to capture devices.
#[allow(async_fn_in_trait)]
pub trait MediaDevices {
    /// Ask for a stream. May prompt the user and may fail.
    async fn acquire(&self, kind: MediaKind) -> Result<StreamHandle, MediaError>;

    /// Stop every track of the stream.
    fn release(&self, stream: &StreamHandle);
}

// ── Session state ───────────────────────────────────────────────────

/// Camera and microphone toggles for a video session.
///
/// A toggle is on exactly when a stream is stored for it; there is no
/// separate flag that could drift.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSession {
    camera: Option<StreamHandle>,
    microphone: Option<StreamHandle>,
}

impl MediaSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, kind: MediaKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn stream(&self, kind: MediaKind) -> Option<&StreamHandle> {
        self.slot(kind).as_ref()
    }

    /// Store an acquired stream, releasing any previous one of the same kind.
    pub fn attach<D: MediaDevices>(&mut self, devices: &D, stream: StreamHandle) {
        let kind = stream.kind;
        if let Some(old) = self.slot_mut(kind).replace(stream) {
            devices.release(&old);
        }
    }

    /// Turn a toggle off. Returns `false` if it was already off.
    pub fn detach<D: MediaDevices>(&mut self, devices: &D, kind: MediaKind) -> bool {
        match self.slot_mut(kind).take() {
            Some(stream) => {
                devices.release(&stream);
                true
            }
            None => false,
        }
    }

    /// Release everything, e.g. when the view unmounts.
    pub fn shutdown<D: MediaDevices>(&mut self, devices: &D) {
        self.detach(devices, MediaKind::Camera);
        self.detach(devices, MediaKind::Microphone);
    }

    /// Flip a toggle. Turning on acquires a stream; on failure the toggle
    /// stays off and nothing is stored.
    pub async fn toggle<D: MediaDevices>(
        &mut self,
        devices: &D,
        kind: MediaKind,
    ) -> Result<bool, MediaError> {
        if self.detach(devices, kind) {
            return Ok(false);
        }
        let stream = devices.acquire(kind).await?;
        self.attach(devices, stream);
        Ok(true)
    }

    fn slot(&self, kind: MediaKind) -> &Option<StreamHandle> {
        match kind {
            MediaKind::Camera => &self.camera,
            MediaKind::Microphone => &self.microphone,
        }
    }

    fn slot_mut(&mut self, kind: MediaKind) -> &mut Option<StreamHandle> {
        match kind {
            MediaKind::Camera => &mut self.camera,
            MediaKind::Microphone => &mut self.microphone,
        }
    }
}
