pub mod animator;
pub mod clock;
pub mod color;
pub mod config;
pub mod easing;
pub mod geometry;
pub mod paint;

pub use animator::{IndicatorAnimator, ItemFrame, LifecycleAction};
pub use clock::{FrameClock, ManualClock};
pub use color::ItemColor;
pub use config::{ConfigError, IndicatorConfig, IndicatorOptions};
pub use easing::CubicBezier;
pub use geometry::{Point, Size};
pub use paint::{Canvas, ItemVisual, paint_items};
