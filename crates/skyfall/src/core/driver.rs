//! Frame driver: the only entry point a host calls.
//!
//! ```text
//! Uninitialized --mount--> Armed --first request--> Running --unmount--> TornDown
//!       |
//!       +-- reduced motion / no surface: stays Uninitialized for good
//! ```
//!
//! Each granted frame clears the surface, ticks the sky and requests the
//! next frame. Teardown cancels the pending request and detaches listeners;
//! a frame callback that still arrives afterwards is ignored.

use crate::api::types::{HostEnv, Viewport};
use crate::bridge::host::{FrameHost, FrameRequest};
use crate::core::clock::FrameClock;
use crate::core::random::{RandomSource, Rng};
use crate::core::sky::Sky;
use crate::renderer::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Armed,
    Running,
    TornDown,
}

/// Why a driver declined to start. Not an error: the sky simply stays off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableReason {
    ReducedMotion,
    NoSurface,
}

pub struct FrameDriver<S: Surface, H: FrameHost, R: RandomSource = Rng> {
    state: DriverState,
    disabled: Option<DisableReason>,
    sky: Sky<R>,
    surface: Option<S>,
    host: H,
    clock: FrameClock,
    pending: Option<FrameRequest>,
    viewport: Viewport,
    frames: u64,
}

impl<S: Surface, H: FrameHost, R: RandomSource> FrameDriver<S, H, R> {
    /// `surface` is `None` when the host has no 2-D drawing support.
    pub fn new(sky: Sky<R>, surface: Option<S>, host: H) -> Self {
        Self {
            state: DriverState::Uninitialized,
            disabled: None,
            sky,
            surface,
            host,
            clock: FrameClock::default(),
            pending: None,
            viewport: Viewport::new(0.0, 0.0),
            frames: 0,
        }
    }

    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Start the sky, unless the host asks for reduced motion or cannot draw.
    pub fn mount(&mut self, env: HostEnv) {
        if self.state != DriverState::Uninitialized || self.disabled.is_some() {
            log::warn!("{}: mount ignored in state {:?}", self.sky.name(), self.state);
            return;
        }

        if env.reduced_motion {
            self.disable(DisableReason::ReducedMotion);
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            self.disable(DisableReason::NoSurface);
            return;
        };

        self.state = DriverState::Armed;
        self.viewport = env.viewport;
        surface.resize(env.viewport);
        self.sky.arm(self.clock.elapsed(), env.viewport);
        self.host.attach_listeners();
        log::info!(
            "{}: armed at {}x{} ({:?})",
            self.sky.name(),
            env.viewport.width,
            env.viewport.height,
            env.viewport.device_class(self.sky.breakpoint())
        );

        self.pending = self.host.request_frame();
        self.state = DriverState::Running;
    }

    fn disable(&mut self, reason: DisableReason) {
        log::info!("{}: disabled ({:?})", self.sky.name(), reason);
        self.disabled = Some(reason);
    }

    /// One host frame at `timestamp` (ms, monotonic).
    pub fn on_frame(&mut self, timestamp: f64) {
        if self.state != DriverState::Running {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        self.pending = None;
        self.clock.advance(timestamp);
        surface.clear();
        self.sky.tick(self.clock.elapsed(), self.viewport, surface);
        self.frames += 1;

        self.pending = self.host.request_frame();
        if self.pending.is_none() {
            log::warn!("{}: host refused the next frame", self.sky.name());
        }
    }

    /// Resize the surface. Entities keep their absolute positions.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.state != DriverState::Running {
            return;
        }
        log::debug!(
            "{}: resize to {}x{}",
            self.sky.name(),
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
    }

    /// While hidden the host stops delivering frames; on return the clock
    /// resyncs so the hidden gap does not count toward spawn timers.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if self.state == DriverState::Running && !hidden {
            self.clock.resync();
        }
    }

    /// Stop for good: cancel the pending frame and detach listeners.
    pub fn unmount(&mut self) {
        if self.state == DriverState::TornDown {
            return;
        }
        if let Some(request) = self.pending.take() {
            self.host.cancel_frame(request);
        }
        if self.state == DriverState::Running {
            self.host.detach_listeners();
            log::info!(
                "{}: torn down after {} frames",
                self.sky.name(),
                self.frames
            );
        }
        self.state = DriverState::TornDown;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn disabled_reason(&self) -> Option<DisableReason> {
        self.disabled
    }

    pub fn sky(&self) -> &Sky<R> {
        &self.sky
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Milliseconds of simulated time since the first frame.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scene::SceneSpec;
    use crate::bridge::host::ManualHost;
    use crate::components::entity::EntityKind;
    use crate::core::random::tests::Fixed;
    use crate::renderer::recording::RecordingSurface;

    const DESKTOP: Viewport = Viewport::new(1920.0, 1080.0);
    const FRAME_MS: f64 = 16.67;

    type Driver<R> = FrameDriver<RecordingSurface, ManualHost, R>;

    fn overlay<R: RandomSource>(rng: R) -> Driver<R> {
        FrameDriver::new(
            Sky::new(SceneSpec::overlay(), rng),
            Some(RecordingSurface::new()),
            ManualHost::new(),
        )
    }

    /// Deliver frames at a steady 60 Hz until `elapsed` reaches `until`.
    fn run_until<R: RandomSource>(driver: &mut Driver<R>, ts: &mut f64, until: f64) {
        while driver.elapsed() < until {
            assert!(driver.host().pending().is_some());
            *ts += FRAME_MS;
            driver.on_frame(*ts);
        }
    }

    #[test]
    fn mount_arms_and_requests_first_frame() {
        let mut d = overlay(Rng::new(1));
        assert_eq!(d.state(), DriverState::Uninitialized);
        d.mount(HostEnv::new(DESKTOP));
        assert_eq!(d.state(), DriverState::Running);
        assert_eq!(d.host().requested(), 1);
        assert!(d.host().is_listening());
        assert_eq!(d.surface().unwrap().size(), Some(DESKTOP));
        assert_eq!(d.sky().entity_count(), 0);
    }

    #[test]
    fn first_satellite_at_minimum_interval() {
        // Fixed(0.0) pins the satellite interval to 45,000 ms and its entry
        // to the left edge.
        let mut d = overlay(Fixed(0.0));
        d.mount(HostEnv::new(DESKTOP));
        let mut ts = 5_000.0;

        run_until(&mut d, &mut ts, 45_000.0 - FRAME_MS);
        assert_eq!(d.sky().entity_count(), 0);

        run_until(&mut d, &mut ts, 45_000.0);
        let sats = d.sky().population(EntityKind::Satellite).unwrap();
        assert_eq!(sats.len(), 1);
        assert_eq!(d.sky().entity_count(), 1);
        // Spawned at x = -20, then moved by one tick (speed 0.6).
        let x = sats.as_slice()[0].pos.x;
        assert!((x - (-20.0)).abs() <= 0.6 + 1e-3, "x = {x}");
    }

    #[test]
    fn reduced_motion_never_arms() {
        let mut d = overlay(Rng::new(1));
        d.mount(HostEnv::new(DESKTOP).with_reduced_motion(true));
        assert_eq!(d.state(), DriverState::Uninitialized);
        assert_eq!(d.disabled_reason(), Some(DisableReason::ReducedMotion));
        assert_eq!(d.host().requested(), 0);

        // Stray frames are ignored for 100 s of would-be time.
        let mut ts = 0.0;
        for _ in 0..6_000 {
            ts += FRAME_MS;
            d.on_frame(ts);
        }
        assert_eq!(d.sky().entity_count(), 0);
        assert_eq!(d.surface().unwrap().clear_count(), 0);
        assert_eq!(d.elapsed(), 0.0);

        // Disabling is terminal.
        d.mount(HostEnv::new(DESKTOP));
        assert_eq!(d.state(), DriverState::Uninitialized);
    }

    #[test]
    fn missing_surface_disables_silently() {
        let mut d: Driver<Rng> =
            FrameDriver::new(Sky::new(SceneSpec::overlay(), Rng::new(1)), None, ManualHost::new());
        d.mount(HostEnv::new(DESKTOP));
        assert_eq!(d.disabled_reason(), Some(DisableReason::NoSurface));
        assert_eq!(d.host().requested(), 0);
        assert!(!d.host().is_listening());
    }

    #[test]
    fn every_frame_clears_then_rearms() {
        let mut d = overlay(Rng::new(2));
        d.mount(HostEnv::new(DESKTOP));
        let mut ts = 0.0;
        for _ in 0..10 {
            ts += FRAME_MS;
            d.on_frame(ts);
        }
        assert_eq!(d.surface().unwrap().clear_count(), 10);
        assert_eq!(d.host().requested(), 11);
        assert_eq!(d.frames(), 10);
        // First frame counts as one reference tick; the rest use deltas.
        assert!((d.elapsed() - 10.0 * FRAME_MS).abs() < 1e-6);
    }

    #[test]
    fn unmount_cancels_and_detaches() {
        let mut d = overlay(Rng::new(3));
        d.mount(HostEnv::new(DESKTOP));
        d.on_frame(16.0);
        let pending = d.host().pending().unwrap();
        d.unmount();
        assert_eq!(d.state(), DriverState::TornDown);
        assert_eq!(d.host().cancelled(), &[pending]);
        assert!(!d.host().is_listening());

        // Late callbacks and resizes change nothing.
        let clears = d.surface().unwrap().clear_count();
        d.on_frame(32.0);
        d.on_resize(Viewport::new(100.0, 100.0));
        assert_eq!(d.surface().unwrap().clear_count(), clears);
        assert_eq!(d.surface().unwrap().size(), Some(DESKTOP));

        // Not reusable.
        d.mount(HostEnv::new(DESKTOP));
        assert_eq!(d.state(), DriverState::TornDown);
    }

    #[test]
    fn resize_round_trip_keeps_entities() {
        let scene = SceneSpec::new(
            "sats",
            vec![crate::components::kind::KindSpec::satellite()
                .with_interval(crate::core::random::Span::new(100.0, 200.0))],
        );
        let mut d: Driver<Rng> =
            FrameDriver::new(Sky::new(scene, Rng::new(5)), Some(RecordingSurface::new()), ManualHost::new());
        d.mount(HostEnv::new(DESKTOP));
        let mut ts = 0.0;
        run_until(&mut d, &mut ts, 2_000.0);
        assert!(d.sky().entity_count() > 0);

        let before: Vec<_> = d.sky().populations()[0].as_slice().to_vec();
        d.on_resize(Viewport::new(800.0, 600.0));
        assert_eq!(d.surface().unwrap().size(), Some(Viewport::new(800.0, 600.0)));
        d.on_resize(DESKTOP);
        assert_eq!(d.sky().populations()[0].as_slice(), before.as_slice());
        assert_eq!(d.viewport(), DESKTOP);
    }

    #[test]
    fn hidden_gap_does_not_fast_forward() {
        let mut d = overlay(Rng::new(6));
        d.mount(HostEnv::new(DESKTOP));
        d.on_frame(1_000.0);
        d.on_visibility_change(true);
        d.on_visibility_change(false);
        d.on_frame(1_000_000.0);
        assert!((d.elapsed() - 2.0 * FRAME_MS).abs() < 1e-6);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let trajectory = |seed| {
            let mut d = overlay(Rng::new(seed));
            d.mount(HostEnv::new(DESKTOP));
            let mut ts = 0.0;
            let mut counts = Vec::with_capacity(10_000);
            for i in 0..10_000 {
                // Uneven but fixed frame pacing.
                ts += if i % 7 == 0 { 33.0 } else { FRAME_MS };
                d.on_frame(ts);
                counts.push(d.sky().counts());
            }
            counts
        };
        let a = trajectory(1234);
        let b = trajectory(1234);
        assert_eq!(a, b);
        assert!(a.iter().any(|c| c.iter().sum::<usize>() > 0));
    }

    #[test]
    fn invariants_hold_over_long_run() {
        use crate::components::entity::Body;

        let mut d = FrameDriver::new(
            Sky::new(
                SceneSpec::new(
                    "busy",
                    SceneSpec::overlay()
                        .kinds
                        .into_iter()
                        .map(|k| k.with_interval(crate::core::random::Span::new(200.0, 800.0)))
                        .collect(),
                ),
                Rng::new(77),
            ),
            Some(RecordingSurface::new()),
            ManualHost::new(),
        );
        d.mount(HostEnv::new(DESKTOP));

        let mut silhouettes: std::collections::HashMap<u32, Vec<f32>> = Default::default();
        let mut ts = 0.0;
        for _ in 0..5_000 {
            ts += FRAME_MS;
            d.on_frame(ts);
            for pop in d.sky().populations() {
                for e in pop.iter() {
                    assert!((0.0..=1.0).contains(&e.opacity));
                    match &e.body {
                        Body::Comet(t) => assert!(t.age <= t.max_life),
                        Body::Asteroid(rock) => {
                            // Silhouettes never change after spawn.
                            let key = rock.silhouette.lobes()[0].to_bits();
                            let lobes = silhouettes.entry(key).or_insert_with(|| rock.silhouette.lobes().to_vec());
                            assert_eq!(lobes.as_slice(), rock.silhouette.lobes());
                        }
                        _ => {}
                    }
                }
            }
        }
        assert!(!silhouettes.is_empty());
    }
}
