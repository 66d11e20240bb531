//! Camera capture through `navigator.mediaDevices.getUserMedia`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Requests a video-only camera stream from the browser.
///
/// # Errors
///
/// Returns an error when media devices are unavailable or the user denies permission.
#[cfg(target_arch = "wasm32")]
pub async fn request_camera_stream() -> Result<web_sys::MediaStream, String> {
    let devices = web_sys::window()
        .ok_or_else(|| "window unavailable".to_string())?
        .navigator()
        .media_devices()
        .map_err(|e| format!("media devices unavailable: {e:?}"))?;

    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_video(&wasm_bindgen::JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| format!("getUserMedia rejected: {e:?}"))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("camera access denied: {e:?}"))?
        .dyn_into::<web_sys::MediaStream>()
        .map_err(|e| format!("unexpected getUserMedia result: {e:?}"))
}

/// Stops every track of `stream`, releasing the device.
#[cfg(target_arch = "wasm32")]
pub fn stop_media_stream(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Returns an error on targets without media devices.
///
/// # Errors
///
/// Always fails off-browser.
#[cfg(not(target_arch = "wasm32"))]
pub async fn request_camera_stream() -> Result<(), String> {
    Err("camera capture is only available when compiled for wasm32".to_string())
}

#[cfg(test)]
mod tests {
    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_camera_request_fails() {
        assert!(futures::executor::block_on(super::request_camera_stream()).is_err());
    }
}
