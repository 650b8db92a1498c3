//! Presentation-state engine for a browser desktop: window lifecycle and z-order, the spatial
//! icon grid, and rubber-band selection, driven through a single reducer per session.

pub mod apps;
pub mod config;
pub mod geometry;
pub mod icon_grid;
pub mod input;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod selection;
pub mod session;
pub mod window_manager;

pub use config::{ConfigError, DesktopConfig, GridConfig, WindowPlacementConfig};
pub use icon_grid::IconGrid;
pub use model::*;
pub use reducer::{
    context_menu_entries, reduce_desktop, DesktopAction, KeyCommand, ReducerError, RuntimeEffect,
};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use selection::{SelectionBox, SelectionEngine};
pub use session::DesktopSession;
pub use window_manager::{Placement, WindowManager};
