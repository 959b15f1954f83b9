use crate::api::config::SkyConfig;
use crate::api::scene::SceneSpec;
use crate::api::types::{Viewport, MOBILE_BREAKPOINT};
use crate::components::entity::EntityKind;
use crate::core::population::Population;
use crate::core::random::{RandomSource, Rng};
use crate::renderer::surface::Surface;
use crate::systems::{cull, motion, render, spawn};

/// What one tick did, summed over all kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub culled: usize,
    pub drawn: usize,
}

/// One engine instance: the populations of a scene table and the random
/// source they spawn from.
///
/// Kinds run in table order, and each kind runs schedule, update, cull and
/// draw before the next kind starts.
pub struct Sky<R: RandomSource = Rng> {
    name: String,
    populations: Vec<Population>,
    rng: R,
    breakpoint: f32,
}

impl<R: RandomSource> Sky<R> {
    pub fn new(scene: SceneSpec, rng: R) -> Self {
        Self {
            name: scene.name,
            populations: scene.kinds.into_iter().map(Population::new).collect(),
            rng,
            breakpoint: MOBILE_BREAKPOINT,
        }
    }

    /// Build from a backdrop's scene, honoring config overrides.
    pub fn from_config(fallback: SceneSpec, config: &SkyConfig, rng: R) -> Self {
        Self::new(config.scene_or(fallback), rng).with_breakpoint(config.mobile_breakpoint)
    }

    pub fn with_breakpoint(mut self, breakpoint: f32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Give every kind its first randomized spawn time after `now`.
    pub fn arm(&mut self, now: f64, viewport: Viewport) {
        let device = viewport.device_class(self.breakpoint);
        for pop in &mut self.populations {
            let mut timer = pop.timer;
            timer.arm(now, pop.spec(), device, &mut self.rng);
            pop.timer = timer;
            log::debug!("{}: {:?} first spawn at {:.0} ms", self.name, pop.kind(), timer.next_at());
        }
    }

    /// Run one tick at elapsed time `now` and draw the result.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        now: f64,
        viewport: Viewport,
        surface: &mut S,
    ) -> TickReport {
        let device = viewport.device_class(self.breakpoint);
        let mut report = TickReport::default();

        for pop in &mut self.populations {
            if spawn::schedule(pop, now, viewport, device, &mut self.rng) {
                report.spawned += 1;
            }

            pop.iter_mut().for_each(motion::advance);

            let margin = pop.spec().cull_margin;
            report.culled += pop.cull(|e| cull::is_expired(e, viewport, margin));

            render::draw_all(surface, pop.as_slice());
            report.drawn += pop.len();
        }

        report
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn population(&self, kind: EntityKind) -> Option<&Population> {
        self.populations.iter().find(|p| p.kind() == kind)
    }

    /// Live entities across all kinds.
    pub fn entity_count(&self) -> usize {
        self.populations.iter().map(Population::len).sum()
    }

    /// Per-kind counts in table order.
    pub fn counts(&self) -> Vec<usize> {
        self.populations.iter().map(Population::len).collect()
    }

    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    /// Drop every live entity.
    pub fn clear(&mut self) {
        self.populations.iter_mut().for_each(Population::clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Body;
    use crate::components::kind::KindSpec;
    use crate::core::random::tests::Fixed;
    use crate::core::random::Span;
    use crate::renderer::recording::RecordingSurface;

    const DESKTOP: Viewport = Viewport::new(1920.0, 1080.0);

    #[test]
    fn arm_sets_first_spawn_times() {
        let mut sky = Sky::new(SceneSpec::overlay(), Fixed(0.0));
        sky.arm(0.0, DESKTOP);
        let times: Vec<f64> = sky.populations().iter().map(|p| p.timer().next_at()).collect();
        assert_eq!(times, vec![45_000.0, 60_000.0, 240_000.0]);

        let mut mobile = Sky::new(SceneSpec::overlay(), Fixed(0.0));
        mobile.arm(0.0, Viewport::new(390.0, 844.0));
        let times: Vec<f64> = mobile.populations().iter().map(|p| p.timer().next_at()).collect();
        assert_eq!(times, vec![90_000.0, 120_000.0, 360_000.0]);
    }

    #[test]
    fn tick_spawns_moves_and_draws() {
        let scene = SceneSpec::new(
            "test",
            vec![KindSpec::satellite().with_interval(Span::new(0.0, 0.0))],
        );
        let mut sky = Sky::new(scene, Rng::new(1));
        let mut surface = RecordingSurface::new();
        sky.arm(0.0, DESKTOP);
        let report = sky.tick(0.0, DESKTOP, &mut surface);
        assert_eq!(report, TickReport { spawned: 1, culled: 0, drawn: 1 });
        assert_eq!(surface.draw_groups(), 1);
    }

    #[test]
    fn comet_culled_on_the_tick_it_reaches_max_life() {
        // Fixed(0.5) pins every range to its midpoint: max_life = 300.
        let scene = SceneSpec::new("comets", vec![KindSpec::comet()]);
        let mut sky = Sky::new(scene, Fixed(0.5));
        let mut surface = RecordingSurface::new();
        sky.arm(0.0, DESKTOP);
        let first = sky.populations()[0].timer().next_at();
        assert_eq!(first, 300_000.0);

        let age_of = |sky: &Sky<Fixed>| match sky.populations()[0].iter().next().map(|e| &e.body) {
            Some(Body::Comet(tail)) => Some((tail.age, tail.max_life)),
            _ => None,
        };

        for tick in 1..300u32 {
            surface.clear();
            sky.tick(first + tick as f64 * 16.67, DESKTOP, &mut surface);
            assert_eq!(age_of(&sky), Some((tick, 300)));
            assert_eq!(surface.draw_groups(), 1);
            let opacity = sky.populations()[0].as_slice()[0].opacity;
            assert!((0.0..=1.0).contains(&opacity));
        }

        surface.clear();
        let report = sky.tick(first + 300.0 * 16.67, DESKTOP, &mut surface);
        assert_eq!(report.culled, 1);
        assert_eq!(age_of(&sky), None);

        surface.clear();
        sky.tick(first + 301.0 * 16.67, DESKTOP, &mut surface);
        assert_eq!(surface.draw_groups(), 0);
    }

    #[test]
    fn comet_above_margin_culled_on_spawn_tick() {
        // Fixed(0.0) puts the head at -30% of the height: -432 px on a
        // 1440 px viewport, outside the 250 px cull margin.
        let scene = SceneSpec::new(
            "comets",
            vec![KindSpec::comet().with_interval(Span::new(0.0, 0.0))],
        );
        let tall = Viewport::new(2560.0, 1440.0);
        let mut sky = Sky::new(scene.clone(), Fixed(0.0));
        let mut surface = RecordingSurface::new();
        sky.arm(0.0, tall);
        let report = sky.tick(0.0, tall, &mut surface);
        assert_eq!(report, TickReport { spawned: 1, culled: 1, drawn: 0 });
        assert_eq!(surface.draw_groups(), 0);

        // At 800 px the same draw lands at -240 px and survives.
        let short = Viewport::new(2560.0, 800.0);
        let mut sky = Sky::new(scene, Fixed(0.0));
        let mut surface = RecordingSurface::new();
        sky.arm(0.0, short);
        let report = sky.tick(0.0, short, &mut surface);
        assert_eq!(report, TickReport { spawned: 1, culled: 0, drawn: 1 });
    }

    #[test]
    fn orbiters_respect_cap() {
        let mut sky = Sky::new(SceneSpec::solar_system(), Rng::new(4));
        let mut surface = RecordingSurface::new();
        sky.arm(0.0, DESKTOP);
        let mut now = 0.0;
        for _ in 0..2_000 {
            now += 16.67;
            surface.clear();
            sky.tick(now, DESKTOP, &mut surface);
        }
        let planets = sky.population(EntityKind::Orbiter).unwrap();
        assert_eq!(planets.len(), 8);
    }

    #[test]
    fn breakpoint_from_config() {
        let config = SkyConfig {
            mobile_breakpoint: 500.0,
            ..SkyConfig::default()
        };
        let sky = Sky::from_config(SceneSpec::globe(), &config, Rng::new(1));
        assert_eq!(sky.breakpoint(), 500.0);
        assert_eq!(sky.name(), "globe");
    }
}
