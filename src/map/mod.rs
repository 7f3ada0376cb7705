//! Map rendering: base map tile sources and overlay plugins.

pub mod basemap;
pub mod overlay;

pub use basemap::{BaseMap, BaseMaps};
pub use overlay::{PlateOverlay, QuakeOverlay};
