use crate::clock::FrameClock;
use crate::config::{ConfigError, IndicatorConfig, IndicatorOptions};
use crate::geometry::{Point, Size, lerp, wrap};
use serde::Serialize;
use std::f64::consts::TAU;
use std::time::Duration;

/// Geometry of one item for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemFrame {
    pub index: usize,
    pub speed: f64,
    /// Fraction of the current cycle completed, before easing.
    pub raw_phase: f64,
    pub eased_phase: f64,
    /// Radians in `[0, 2π)`.
    pub angle: f64,
    pub size: Size,
    pub position: Point,
}

/// Side effects the host should apply after a lifecycle or layout change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleAction {
    pub should_redraw: bool,
    pub visibility: Option<bool>,
}

impl LifecycleAction {
    pub fn new(should_redraw: bool, visibility: Option<bool>) -> Self {
        Self {
            should_redraw,
            visibility,
        }
    }
}

#[derive(Debug)]
struct AnimationState {
    started_at: Duration,
    items: Vec<ItemFrame>,
}

pub struct IndicatorAnimator<C> {
    clock: C,
    config: IndicatorConfig,
    center: Point,
    state: Option<AnimationState>,
}

impl<C: FrameClock> IndicatorAnimator<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, IndicatorConfig::default())
    }

    pub fn with_config(clock: C, config: IndicatorConfig) -> Self {
        Self {
            clock,
            config,
            center: Point::default(),
            state: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Changes apply from the next frame on; a running animation keeps its
    /// start time.
    pub fn config_mut(&mut self) -> &mut IndicatorConfig {
        &mut self.config
    }

    /// Replaces the whole configuration. On error the previous one stays.
    pub fn configure(&mut self, options: IndicatorOptions) -> Result<(), ConfigError> {
        self.config = IndicatorConfig::try_from(options)?;
        log::debug!(
            "indicator configured: {} items, {}s cycle",
            self.config.item_count(),
            self.config.cycle_duration()
        );
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the host should currently show the indicator.
    pub fn is_visible(&self) -> bool {
        self.is_animating() || !self.config.hide_when_stopped()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Items computed by the last frame. Empty when stopped.
    pub fn current_items(&self) -> &[ItemFrame] {
        self.state
            .as_ref()
            .map(|s| s.items.as_slice())
            .unwrap_or_default()
    }

    /// Centers the circle in `bounds`.
    pub fn layout(&mut self, bounds: Size) -> LifecycleAction {
        let center = bounds.center();
        let changed = center != self.center;
        self.center = center;
        LifecycleAction::new(changed && self.is_animating(), None)
    }

    pub fn start_animating(&mut self) -> LifecycleAction {
        if self.is_animating() {
            return LifecycleAction::default();
        }

        let started_at = self.clock.now();
        self.clock.subscribe();
        self.state = Some(AnimationState {
            started_at,
            items: Vec::new(),
        });
        log::debug!("indicator started at {:?}", started_at);

        LifecycleAction::new(true, self.config.hide_when_stopped().then_some(true))
    }

    pub fn stop_animating(&mut self) -> LifecycleAction {
        if self.state.take().is_none() {
            return LifecycleAction::default();
        }

        self.clock.unsubscribe();
        log::debug!("indicator stopped");

        LifecycleAction::new(true, self.config.hide_when_stopped().then_some(false))
    }

    /// Frame callback. Recomputes the items from the clock's current time.
    /// Returns `None` when not animating.
    pub fn on_frame(&mut self) -> Option<&[ItemFrame]> {
        let now = self.clock.now();
        let started_at = self.state.as_ref()?.started_at;
        let elapsed = now.saturating_sub(started_at).as_secs_f64();

        let items = self.tick(elapsed);
        let state = self.state.as_mut()?;
        state.items = items;
        Some(state.items.as_slice())
    }

    /// Item geometry `elapsed` seconds into the animation.
    pub fn tick(&self, elapsed: f64) -> Vec<ItemFrame> {
        let config = &self.config;
        let count = config.item_count();
        let radius = config.radius() as f64;
        let easing = config.easing();

        (0..count)
            .map(|index| {
                let (speed, size) = interpolate(config, index);
                let base_angle = if count > 1 {
                    index as f64 * TAU / count as f64
                } else {
                    0.0
                };

                let raw_phase = wrap(elapsed * speed / config.cycle_duration(), 1.0);
                let eased_phase = easing.ease(raw_phase);
                let angle = wrap(base_angle + eased_phase * TAU, TAU);

                ItemFrame {
                    index,
                    speed,
                    raw_phase,
                    eased_phase,
                    angle,
                    size,
                    position: self.center.on_circle(radius, angle),
                }
            })
            .collect()
    }
}

/// Speed coefficient and size for `index`: first item gets the maximum of
/// both, last item gets speed 1.0 and the minimum size.
fn interpolate(config: &IndicatorConfig, index: usize) -> (f64, Size) {
    let count = config.item_count();
    if count <= 1 {
        return (1.0, config.max_item_size());
    }

    let t = index as f64 / (count - 1) as f64;
    (
        lerp(config.max_speed(), 1.0, t),
        config.max_item_size().lerp(config.min_item_size(), t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn scenario() -> IndicatorAnimator<ManualClock> {
        let options = IndicatorOptions {
            item_count: 6,
            radius: 20,
            cycle_duration: 4.0,
            max_speed: 1.6,
            max_item_size: Size::square(10.0),
            min_item_size: Size::square(4.0),
            ..Default::default()
        };
        let mut animator = IndicatorAnimator::new(ManualClock::default());
        animator.configure(options).unwrap();
        animator
    }

    #[test]
    fn test_raw_phase_scenario() {
        let frames = scenario().tick(2.0);
        assert_eq!(frames.len(), 6);
        assert!((frames[0].raw_phase - 0.8).abs() < 1e-12);
        assert!((frames[5].raw_phase - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_endpoints_of_interpolation() {
        let animator = scenario();
        for t in [0.0, 0.3, 2.0, 17.25] {
            let frames = animator.tick(t);
            let (first, last) = (frames[0], frames[5]);
            assert_eq!(first.size, Size::square(10.0));
            assert_eq!(first.speed, 1.6);
            assert_eq!(last.size, Size::square(4.0));
            assert_eq!(last.speed, 1.0);
        }
    }

    #[test]
    fn test_single_item_uses_max_size_and_unit_speed() {
        let mut animator = scenario();
        animator.config_mut().set_item_count(1);
        for t in [0.0, 1.0, 3.7, 100.0] {
            let frames = animator.tick(t);
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].size, Size::square(10.0));
            assert_eq!(frames[0].speed, 1.0);
        }
    }

    #[test]
    fn test_interpolation_is_monotonic() {
        let mut animator = scenario();
        animator.config_mut().set_item_count(9);
        let frames = animator.tick(1.0);
        for pair in frames.windows(2) {
            assert!(pair[0].speed > pair[1].speed);
            assert!(pair[0].size.width > pair[1].size.width);
            assert!(pair[0].size.height > pair[1].size.height);
        }
    }

    #[test]
    fn test_zero_items_is_empty() {
        let mut animator = scenario();
        animator.config_mut().set_item_count(0);
        for t in [0.0, 1.0, 50.0] {
            assert!(animator.tick(t).is_empty());
        }
    }

    #[test]
    fn test_eased_phase_is_periodic() {
        let animator = scenario();
        let base = animator.tick(0.7);
        for k in 1..5 {
            for item in &base {
                let period = 4.0 / item.speed;
                let later = animator.tick(0.7 + k as f64 * period)[item.index];
                assert!(
                    (later.eased_phase - item.eased_phase).abs() < 1e-9,
                    "item {} k {}",
                    item.index,
                    k
                );
            }
        }
    }

    #[test]
    fn test_angles_stay_in_range() {
        let animator = scenario();
        for step in 0..400 {
            for frame in animator.tick(step as f64 * 0.037) {
                assert!((0.0..TAU).contains(&frame.angle), "{frame:?}");
            }
        }
    }

    #[test]
    fn test_base_angles_spread_items() {
        let animator = scenario();
        let frames = animator.tick(0.0);
        for frame in &frames {
            let expected = frame.index as f64 * TAU / 6.0;
            assert!((frame.angle - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_positions_lie_on_circle() {
        let mut animator = scenario();
        animator.layout(Size::new(100.0, 60.0));
        assert_eq!(animator.center(), Point::new(50.0, 30.0));

        for frame in animator.tick(1.3) {
            let (dx, dy) = (frame.position.x - 50.0, frame.position.y - 30.0);
            assert!((dx.hypot(dy) - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let mut animator = scenario();

        assert!(animator.start_animating().should_redraw);
        assert_eq!(animator.start_animating(), LifecycleAction::default());
        assert!(animator.is_animating());
        assert_eq!(animator.clock().subscriptions(), 1);

        assert!(animator.stop_animating().should_redraw);
        assert_eq!(animator.stop_animating(), LifecycleAction::default());
        assert!(!animator.is_animating());
        assert!(!animator.clock().is_subscribed());
    }

    #[test]
    fn test_start_with_huge_item_count() {
        let mut animator = scenario();
        animator.config_mut().set_item_count(i64::MAX);

        assert!(animator.start_animating().should_redraw);
        assert!(animator.is_animating());
        assert!(animator.current_items().is_empty());
    }

    #[test]
    fn test_start_keeps_original_timestamp() {
        let mut animator = scenario();
        animator.clock_mut().set(Duration::from_secs(10));
        animator.start_animating();

        animator.clock_mut().advance(Duration::from_secs(1));
        animator.start_animating();
        animator.clock_mut().advance(Duration::from_secs(1));

        let frames = animator.on_frame().unwrap();
        assert!((frames[5].raw_phase - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hide_when_stopped_visibility() {
        let mut animator = scenario();
        assert!(animator.is_visible());

        animator.config_mut().set_hide_when_stopped(true);
        assert!(!animator.is_visible());

        assert_eq!(animator.start_animating().visibility, Some(true));
        assert!(animator.is_visible());
        assert_eq!(animator.stop_animating().visibility, Some(false));
        assert!(!animator.is_visible());
    }

    #[test]
    fn test_visibility_untouched_without_hide_when_stopped() {
        let mut animator = scenario();
        assert_eq!(animator.start_animating().visibility, None);
        assert_eq!(animator.stop_animating().visibility, None);
    }

    #[test]
    fn test_never_started_produces_nothing() {
        let mut animator = IndicatorAnimator::new(ManualClock::default());
        assert!(!animator.is_animating());
        assert!(animator.on_frame().is_none());
        assert!(animator.current_items().is_empty());
        assert!(!animator.clock().is_subscribed());
    }

    #[test]
    fn test_stop_discards_items() {
        let mut animator = scenario();
        animator.start_animating();
        animator.clock_mut().advance(Duration::from_millis(500));
        assert_eq!(animator.on_frame().map(<[_]>::len), Some(6));
        assert_eq!(animator.current_items().len(), 6);

        animator.stop_animating();
        assert!(animator.current_items().is_empty());
        assert!(animator.on_frame().is_none());
    }

    #[test]
    fn test_reconfigure_while_animating_keeps_elapsed_time() {
        let mut animator = scenario();
        animator.start_animating();
        animator.clock_mut().advance(Duration::from_secs(2));

        let options = IndicatorOptions {
            item_count: 2,
            cycle_duration: 8.0,
            ..IndicatorOptions::from(animator.config())
        };
        animator.configure(options).unwrap();

        let frames = animator.on_frame().unwrap();
        assert_eq!(frames.len(), 2);
        assert!((frames[1].raw_phase - 0.25).abs() < 1e-12);
        assert!(animator.is_animating());
    }

    #[test]
    fn test_rejected_configure_keeps_previous_config() {
        let mut animator = scenario();
        let before = animator.config().clone();
        let options = IndicatorOptions {
            cycle_duration: 0.0,
            ..Default::default()
        };
        assert!(animator.configure(options).is_err());
        assert_eq!(animator.config(), &before);
    }

    #[test]
    fn test_layout_requests_redraw_only_when_animating() {
        let mut animator = scenario();
        assert!(!animator.layout(Size::square(40.0)).should_redraw);
        animator.start_animating();
        assert!(animator.layout(Size::square(80.0)).should_redraw);
        assert!(!animator.layout(Size::square(80.0)).should_redraw);
    }
}
