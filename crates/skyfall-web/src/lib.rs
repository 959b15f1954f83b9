pub mod canvas;
pub mod host;
pub mod runner;
pub mod storage;

pub use canvas::CanvasSurface;
pub use host::BrowserHost;
pub use runner::SkyRunner;
pub use storage::SessionStorageFlags;

use skyfall::{Backdrop, FrameClock, GeoCoord, IntroGate, Rng, Sky, SkyConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

#[cfg(feature = "vectors")]
use skyfall::VectorSurface;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

enum Mounted {
    Canvas(SkyRunner<CanvasSurface>),
    #[cfg(feature = "vectors")]
    Buffered(SkyRunner<VectorSurface>),
}

/// A mounted sky. Unmounting (or dropping the handle) stops it for good.
#[wasm_bindgen]
pub struct SkyHandle {
    mounted: Mounted,
}

#[wasm_bindgen]
impl SkyHandle {
    pub fn unmount(&self) {
        match &self.mounted {
            Mounted::Canvas(r) => r.unmount(),
            #[cfg(feature = "vectors")]
            Mounted::Buffered(r) => r.unmount(),
        }
    }

    pub fn entity_count(&self) -> u32 {
        match &self.mounted {
            Mounted::Canvas(r) => r.entity_count() as u32,
            #[cfg(feature = "vectors")]
            Mounted::Buffered(r) => r.entity_count() as u32,
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.mounted {
            Mounted::Canvas(r) => r.is_running(),
            #[cfg(feature = "vectors")]
            Mounted::Buffered(r) => r.is_running(),
        }
    }

    // ---- Vertex buffer accessors (buffered mounts only) ----

    pub fn vertices_ptr(&self) -> *const f32 {
        match &self.mounted {
            #[cfg(feature = "vectors")]
            Mounted::Buffered(r) => r.with_surface(VectorSurface::buffer_ptr).unwrap_or(std::ptr::null()),
            _ => std::ptr::null(),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        match &self.mounted {
            #[cfg(feature = "vectors")]
            Mounted::Buffered(r) => r.with_surface(|s| s.vertex_count() as u32).unwrap_or(0),
            _ => 0,
        }
    }
}

impl Drop for SkyHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn parse_config(config_json: Option<String>) -> Result<SkyConfig, JsValue> {
    match config_json {
        Some(json) => SkyConfig::from_json(&json).map_err(|e| {
            log::warn!("rejected sky config: {}", e);
            JsValue::from_str(&e.to_string())
        }),
        None => Ok(SkyConfig::default()),
    }
}

/// Build the sky for `backdrop`, seeding from the config or from `Math.random`.
fn build_sky(backdrop: &Backdrop, config: &SkyConfig) -> (Sky, FrameClock) {
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
    let sky = Sky::from_config(backdrop.scene(), config, Rng::new(seed));
    (sky, FrameClock::new(config.reference_frame_ms))
}

fn mount_canvas(canvas_id: &str, backdrop: Backdrop, config_json: Option<String>) -> Result<SkyHandle, JsValue> {
    let config = parse_config(config_json)?;
    let window = window()?;

    let surface = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(CanvasSurface::new);
    if surface.is_none() {
        log::warn!("{}: no 2-D canvas with id {:?}", backdrop.name(), canvas_id);
    }

    let (sky, clock) = build_sky(&backdrop, &config);
    let runner = SkyRunner::mount(&window, sky, surface, clock);
    Ok(SkyHandle {
        mounted: Mounted::Canvas(runner),
    })
}

/// Satellites, asteroids and comets over the page.
#[wasm_bindgen]
pub fn mount_overlay(canvas_id: &str, config_json: Option<String>) -> Result<SkyHandle, JsValue> {
    mount_canvas(canvas_id, Backdrop::Overlay, config_json)
}

#[wasm_bindgen]
pub fn mount_solar_system(
    canvas_id: &str,
    config_json: Option<String>,
    highlight: Option<String>,
) -> Result<SkyHandle, JsValue> {
    log::debug!("solar-system: highlight {:?}", highlight);
    mount_canvas(canvas_id, Backdrop::SolarSystem { highlight }, config_json)
}

#[wasm_bindgen]
pub fn mount_globe(
    canvas_id: &str,
    config_json: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<SkyHandle, JsValue> {
    let focus = lat.zip(lon).map(|(lat, lon)| GeoCoord { lat, lon });
    log::debug!("globe: focus {:?}", focus);
    mount_canvas(canvas_id, Backdrop::Globe { focus }, config_json)
}

/// Mount without a canvas: each frame tessellates into a vertex buffer the
/// page reads through `vertices_ptr` / `vertex_count` (6 floats per vertex).
#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn mount_buffered(variant: &str, config_json: Option<String>) -> Result<SkyHandle, JsValue> {
    let backdrop = Backdrop::from_name(variant)
        .ok_or_else(|| JsValue::from_str(&format!("unknown variant {:?}", variant)))?;
    let config = parse_config(config_json)?;
    let window = window()?;

    let surface = VectorSurface::new(host::viewport_of(&window));
    let (sky, clock) = build_sky(&backdrop, &config);
    let runner = SkyRunner::mount(&window, sky, Some(surface), clock);
    Ok(SkyHandle {
        mounted: Mounted::Buffered(runner),
    })
}

/// True once per browser session; the first call marks the intro as seen.
/// Without session storage the intro always plays.
#[wasm_bindgen]
pub fn intro_should_play() -> bool {
    match web_sys::window().as_ref().and_then(SessionStorageFlags::from_window) {
        Some(flags) => IntroGate::new(flags).should_play(),
        None => true,
    }
}
