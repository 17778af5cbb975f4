use std::time::Duration;

/// Per-frame notification source supplied by the host.
///
/// While subscribed, the host calls [`IndicatorAnimator::on_frame`] once per
/// display refresh. `now` must be monotonic; its epoch is irrelevant because
/// the animator only ever subtracts two readings.
///
/// [`IndicatorAnimator::on_frame`]: crate::animator::IndicatorAnimator::on_frame
pub trait FrameClock {
    fn now(&self) -> Duration;
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Clock advanced by hand. Used by tests and by the CLI sampler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    subscribed: bool,
    subscriptions: usize,
}

impl ManualClock {
    pub fn new(now: Duration) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Total number of `subscribe` calls seen.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn subscribe(&mut self) {
        self.subscribed = true;
        self.subscriptions += 1;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}
