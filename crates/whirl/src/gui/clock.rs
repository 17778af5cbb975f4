use gtk::prelude::*;
use gtk4 as gtk;
use orbit::FrameClock;
use std::time::Duration;

/// Frame source backed by the widget's GDK frame clock. While subscribed, every
/// display refresh queues a redraw and the draw function advances the animator.
pub struct TickClock {
    widget: gtk::DrawingArea,
    tick: Option<gtk::TickCallbackId>,
}

impl TickClock {
    pub fn new(widget: &gtk::DrawingArea) -> Self {
        Self {
            widget: widget.clone(),
            tick: None,
        }
    }
}

impl FrameClock for TickClock {
    // Same time base as `gdk::FrameClock::frame_time`, but never stale between
    // frames.
    fn now(&self) -> Duration {
        Duration::from_micros(glib::monotonic_time().max(0) as u64)
    }

    fn subscribe(&mut self) {
        if self.tick.is_none() {
            self.tick = Some(self.widget.add_tick_callback(|area, _| {
                area.queue_draw();
                glib::ControlFlow::Continue
            }));
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }
}
