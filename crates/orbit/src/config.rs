use crate::color::ItemColor;
use crate::easing::CubicBezier;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ITEM_COUNT: i64 = 6;
pub const DEFAULT_RADIUS: u32 = 20;
pub const DEFAULT_CYCLE_DURATION: f64 = 1.5;
pub const DEFAULT_MAX_SPEED: f64 = 1.6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cycle duration must be a positive number of seconds, got {0}")]
    CycleDuration(f64),
    #[error("max speed must be a non-negative finite number, got {0}")]
    MaxSpeed(f64),
    #[error("{name} must have non-negative finite dimensions, got {size:?}")]
    ItemSize { name: &'static str, size: Size },
    #[error("{name} must have finite coordinates, got {point:?}")]
    ControlPoint { name: &'static str, point: Point },
}

/// Raw, unvalidated indicator settings as they appear in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorOptions {
    pub item_count: i64,
    pub radius: u32,
    pub cycle_duration: f64,
    pub min_item_size: Size,
    pub max_item_size: Size,
    pub max_speed: f64,
    pub first_control_point: Point,
    pub second_control_point: Point,
    pub hide_when_stopped: bool,
    pub item_image: Option<PathBuf>,
    pub item_color: ItemColor,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        let easing = CubicBezier::default();
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            radius: DEFAULT_RADIUS,
            cycle_duration: DEFAULT_CYCLE_DURATION,
            min_item_size: Size::square(4.0),
            max_item_size: Size::square(10.0),
            max_speed: DEFAULT_MAX_SPEED,
            first_control_point: easing.first(),
            second_control_point: easing.second(),
            hide_when_stopped: false,
            item_image: None,
            item_color: ItemColor::default(),
        }
    }
}

/// Validated configuration owned by an animator.
///
/// Every setter leaves the configuration untouched when it returns an error.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    item_count: usize,
    radius: u32,
    cycle_duration: f64,
    min_item_size: Size,
    max_item_size: Size,
    max_speed: f64,
    easing: CubicBezier,
    hide_when_stopped: bool,
    item_image: Option<PathBuf>,
    item_color: ItemColor,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        let options = IndicatorOptions::default();
        Self {
            item_count: clamp_item_count(options.item_count),
            radius: options.radius,
            cycle_duration: options.cycle_duration,
            min_item_size: options.min_item_size,
            max_item_size: options.max_item_size,
            max_speed: options.max_speed,
            easing: CubicBezier::new(options.first_control_point, options.second_control_point),
            hide_when_stopped: options.hide_when_stopped,
            item_image: options.item_image,
            item_color: options.item_color,
        }
    }
}

impl TryFrom<IndicatorOptions> for IndicatorConfig {
    type Error = ConfigError;

    fn try_from(options: IndicatorOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            item_count: clamp_item_count(options.item_count),
            radius: options.radius,
            cycle_duration: check_cycle_duration(options.cycle_duration)?,
            min_item_size: check_size("min_item_size", options.min_item_size)?,
            max_item_size: check_size("max_item_size", options.max_item_size)?,
            max_speed: check_max_speed(options.max_speed)?,
            easing: CubicBezier::new(
                check_point("first_control_point", options.first_control_point)?,
                check_point("second_control_point", options.second_control_point)?,
            ),
            hide_when_stopped: options.hide_when_stopped,
            item_image: options.item_image,
            item_color: options.item_color,
        })
    }
}

impl From<&IndicatorConfig> for IndicatorOptions {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            item_count: config.item_count as i64,
            radius: config.radius,
            cycle_duration: config.cycle_duration,
            min_item_size: config.min_item_size,
            max_item_size: config.max_item_size,
            max_speed: config.max_speed,
            first_control_point: config.easing.first(),
            second_control_point: config.easing.second(),
            hide_when_stopped: config.hide_when_stopped,
            item_image: config.item_image.clone(),
            item_color: config.item_color,
        }
    }
}

impl IndicatorConfig {
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn cycle_duration(&self) -> f64 {
        self.cycle_duration
    }

    pub fn min_item_size(&self) -> Size {
        self.min_item_size
    }

    pub fn max_item_size(&self) -> Size {
        self.max_item_size
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn easing(&self) -> CubicBezier {
        self.easing
    }

    pub fn hide_when_stopped(&self) -> bool {
        self.hide_when_stopped
    }

    pub fn item_image(&self) -> Option<&Path> {
        self.item_image.as_deref()
    }

    pub fn item_color(&self) -> ItemColor {
        self.item_color
    }

    /// Smallest square that holds every item at any angle.
    pub fn extent(&self) -> f64 {
        let item = self.max_item_size.width.max(self.min_item_size.width).max(
            self.max_item_size
                .height
                .max(self.min_item_size.height),
        );
        2.0 * self.radius as f64 + item
    }

    /// Negative counts clamp to zero.
    pub fn set_item_count(&mut self, count: i64) {
        self.item_count = clamp_item_count(count);
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
    }

    pub fn set_cycle_duration(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.cycle_duration = check_cycle_duration(seconds)?;
        Ok(())
    }

    pub fn set_min_item_size(&mut self, size: Size) -> Result<(), ConfigError> {
        self.min_item_size = check_size("min_item_size", size)?;
        Ok(())
    }

    pub fn set_max_item_size(&mut self, size: Size) -> Result<(), ConfigError> {
        self.max_item_size = check_size("max_item_size", size)?;
        Ok(())
    }

    pub fn set_max_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        self.max_speed = check_max_speed(speed)?;
        Ok(())
    }

    pub fn set_control_points(&mut self, first: Point, second: Point) -> Result<(), ConfigError> {
        let first = check_point("first_control_point", first)?;
        let second = check_point("second_control_point", second)?;
        self.easing = CubicBezier::new(first, second);
        Ok(())
    }

    pub fn set_hide_when_stopped(&mut self, hide: bool) {
        self.hide_when_stopped = hide;
    }

    pub fn set_item_image(&mut self, image: Option<PathBuf>) {
        self.item_image = image;
    }

    pub fn set_item_color(&mut self, color: ItemColor) {
        self.item_color = color;
    }
}

fn clamp_item_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

fn check_cycle_duration(seconds: f64) -> Result<f64, ConfigError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(ConfigError::CycleDuration(seconds))
    }
}

fn check_max_speed(speed: f64) -> Result<f64, ConfigError> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(speed)
    } else {
        Err(ConfigError::MaxSpeed(speed))
    }
}

fn check_size(name: &'static str, size: Size) -> Result<Size, ConfigError> {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(size)
    } else {
        Err(ConfigError::ItemSize { name, size })
    }
}

fn check_point(name: &'static str, point: Point) -> Result<Point, ConfigError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(point)
    } else {
        Err(ConfigError::ControlPoint { name, point })
    }
}
