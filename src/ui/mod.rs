//! UI panels floating over the map.

pub mod event_panel;
pub mod layer_control;
pub mod legend;
pub mod status_pane;

pub use event_panel::render_event_panel;
pub use layer_control::{LayerControl, LayerSelection};
pub use legend::render_legend;
pub use status_pane::StatusPane;
