mod controller;
mod geometry;
mod input;

pub use controller::{Phase, ScrollLockController, ScrollState};
pub use geometry::ZoneGeometry;
pub use input::{Direction, Disposition, InputEvent, InputSource, NavKey, ScrollSurface};
