use skyfall::{FrameHost, FrameRequest, HostEnv, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// `requestAnimationFrame` plus window resize and document visibility events.
///
/// The callbacks are built by the runner, which owns the driver they call
/// into; the host only schedules and (un)registers them.
pub struct BrowserHost {
    window: Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut()>,
    on_visibility: Closure<dyn FnMut()>,
}

impl BrowserHost {
    pub fn new(
        window: Window,
        on_frame: Closure<dyn FnMut(f64)>,
        on_resize: Closure<dyn FnMut()>,
        on_visibility: Closure<dyn FnMut()>,
    ) -> Self {
        Self {
            window,
            on_frame,
            on_resize,
            on_visibility,
        }
    }
}

impl FrameHost for BrowserHost {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map(FrameRequest)
            .map_err(|e| log::warn!("requestAnimationFrame failed: {:?}", e))
            .ok()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let _ = self.window.cancel_animation_frame(request.0);
    }

    fn attach_listeners(&mut self) {
        let _ = self
            .window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        if let Some(document) = self.window.document() {
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                self.on_visibility.as_ref().unchecked_ref(),
            );
        }
    }

    fn detach_listeners(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        if let Some(document) = self.window.document() {
            let _ = document.remove_event_listener_with_callback(
                "visibilitychange",
                self.on_visibility.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Current inner window size in CSS pixels.
pub fn viewport_of(window: &Window) -> Viewport {
    let dim = |v: Result<wasm_bindgen::JsValue, _>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()) as f32, dim(window.inner_height()) as f32)
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

pub fn is_hidden(window: &Window) -> bool {
    window.document().map(|d| d.hidden()).unwrap_or(false)
}

/// Signals read once at mount.
pub fn host_env(window: &Window) -> HostEnv {
    HostEnv::new(viewport_of(window)).with_reduced_motion(prefers_reduced_motion(window))
}
