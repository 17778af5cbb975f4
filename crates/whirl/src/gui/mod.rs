pub mod app;
pub mod canvas;
pub mod clock;
pub mod theme;
pub mod window;

/// Empty space between the outermost item and the window edge.
pub const PADDING: f64 = 8.0;
