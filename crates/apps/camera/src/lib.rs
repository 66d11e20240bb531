//! Vision desktop app: a mirrored live camera preview.
//!
//! The camera is requested when the window mounts and every track is stopped when it unmounts,
//! including when permission resolves after the window already closed.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::*;

/// Message shown when the camera cannot be opened.
pub const CAMERA_ERROR_MESSAGE: &str = "Could not access camera. Please allow permissions.";

/// Preview lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraStatus {
    /// Waiting for the permission prompt or device.
    Initializing,
    /// Frames are streaming into the preview.
    Live,
    /// The device could not be opened.
    Failed(String),
}

impl CameraStatus {
    /// Overlay text for the preview, if any.
    pub fn overlay_text(&self) -> Option<&str> {
        match self {
            Self::Initializing => Some("Initializing..."),
            Self::Live => None,
            Self::Failed(message) => Some(message.as_str()),
        }
    }

    /// Maps a device request outcome to the next status.
    pub fn from_request<T, E: std::fmt::Display>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Live,
            Err(err) => {
                logging::warn!("camera request failed: {err}");
                Self::Failed(CAMERA_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[component]
/// Vision app window contents.
pub fn CameraApp() -> impl IntoView {
    let status = create_rw_signal(CameraStatus::Initializing);
    let video_ref = create_node_ref::<html::Video>();

    start_camera(status, video_ref);

    view! {
        <div class="app-camera">
            <Show
                when=move || !matches!(status.get(), CameraStatus::Failed(_))
                fallback=move || {
                    view! {
                        <div class="camera-error" role="alert">
                            {move || status.with(|s| s.overlay_text().map(str::to_string))}
                        </div>
                    }
                }
            >
                <video
                    node_ref=video_ref
                    class="camera-preview mirrored"
                    autoplay=true
                    playsinline=true
                    muted=true
                />
                <Show when=move || status.get() == CameraStatus::Initializing fallback=|| ()>
                    <div class="camera-overlay">"Initializing..."</div>
                </Show>
                <div class="camera-controls">
                    <button type="button" class="camera-shutter" aria-label="Capture"></button>
                </div>
            </Show>
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
fn start_camera(status: RwSignal<CameraStatus>, video_ref: NodeRef<html::Video>) {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use platform_host_web::media::{request_camera_stream, stop_media_stream};

    let alive = Rc::new(Cell::new(true));
    let active_stream = Rc::new(RefCell::new(None::<web_sys::MediaStream>));

    {
        let alive = alive.clone();
        let active_stream = active_stream.clone();
        on_cleanup(move || {
            alive.set(false);
            if let Some(stream) = active_stream.borrow_mut().take() {
                stop_media_stream(&stream);
            }
        });
    }

    spawn_local(async move {
        let result = request_camera_stream().await;
        if !alive.get() {
            if let Ok(stream) = &result {
                stop_media_stream(stream);
            }
            return;
        }
        status.set(CameraStatus::from_request(&result));
        if let Ok(stream) = result {
            if let Some(video) = video_ref.get_untracked() {
                video.set_src_object(Some(&stream));
            }
            *active_stream.borrow_mut() = Some(stream);
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn start_camera(status: RwSignal<CameraStatus>, _video_ref: NodeRef<html::Video>) {
    status.set(CameraStatus::from_request(&Err::<(), _>(
        "camera capture requires a browser host",
    )));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn overlay_follows_status() {
        assert_eq!(
            CameraStatus::Initializing.overlay_text(),
            Some("Initializing...")
        );
        assert_eq!(CameraStatus::Live.overlay_text(), None);
    }

    #[test]
    fn denied_request_shows_permission_message() {
        let denied: Result<(), String> = Err("NotAllowedError".to_string());
        let status = CameraStatus::from_request(&denied);
        assert_eq!(
            status,
            CameraStatus::Failed(CAMERA_ERROR_MESSAGE.to_string())
        );
        assert_eq!(status.overlay_text(), Some(CAMERA_ERROR_MESSAGE));

        assert_eq!(
            CameraStatus::from_request(&Ok::<_, String>(())),
            CameraStatus::Live
        );
    }
}
