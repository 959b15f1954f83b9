use std::cell::RefCell;
use std::rc::{Rc, Weak};

use skyfall::{FrameClock, FrameDriver, Rng, Sky, Surface};
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::host::{self, BrowserHost};

pub type BrowserDriver<S> = FrameDriver<S, BrowserHost, Rng>;

/// A mounted sky driven by the browser's frame loop.
///
/// The runner holds the only strong reference to the driver. The frame and
/// event callbacks hold weak ones, so dropping the runner drops them too.
pub struct SkyRunner<S: Surface + 'static> {
    driver: Rc<RefCell<BrowserDriver<S>>>,
}

impl<S: Surface + 'static> SkyRunner<S> {
    /// Wire the callbacks and mount. A missing surface or reduced motion
    /// leaves the driver disabled; nothing is scheduled.
    pub fn mount(window: &Window, sky: Sky, surface: Option<S>, clock: FrameClock) -> Self {
        let driver = Rc::new_cyclic(|weak: &Weak<RefCell<BrowserDriver<S>>>| {
            let host = BrowserHost::new(
                window.clone(),
                frame_callback(weak.clone()),
                resize_callback(weak.clone(), window.clone()),
                visibility_callback(weak.clone(), window.clone()),
            );
            RefCell::new(FrameDriver::new(sky, surface, host).with_clock(clock))
        });

        driver.borrow_mut().mount(host::host_env(window));
        Self { driver }
    }

    pub fn unmount(&self) {
        self.driver.borrow_mut().unmount();
    }

    pub fn entity_count(&self) -> usize {
        self.driver.borrow().sky().entity_count()
    }

    pub fn frames(&self) -> u64 {
        self.driver.borrow().frames()
    }

    pub fn is_running(&self) -> bool {
        self.driver.borrow().state() == skyfall::DriverState::Running
    }

    pub fn with_surface<T>(&self, f: impl FnOnce(&S) -> T) -> Option<T> {
        self.driver.borrow().surface().map(f)
    }
}

fn frame_callback<S: Surface + 'static>(
    weak: Weak<RefCell<BrowserDriver<S>>>,
) -> Closure<dyn FnMut(f64)> {
    Closure::new(move |timestamp: f64| {
        if let Some(driver) = weak.upgrade() {
            driver.borrow_mut().on_frame(timestamp);
        }
    })
}

fn resize_callback<S: Surface + 'static>(
    weak: Weak<RefCell<BrowserDriver<S>>>,
    window: Window,
) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(driver) = weak.upgrade() {
            driver.borrow_mut().on_resize(host::viewport_of(&window));
        }
    })
}

fn visibility_callback<S: Surface + 'static>(
    weak: Weak<RefCell<BrowserDriver<S>>>,
    window: Window,
) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(driver) = weak.upgrade() {
            driver.borrow_mut().on_visibility_change(host::is_hidden(&window));
        }
    })
}
