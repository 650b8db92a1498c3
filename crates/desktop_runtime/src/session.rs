//! One desktop session: the three engines, the active gesture, and the start-menu flag.

use crate::{
    apps,
    config::DesktopConfig,
    geometry::{Rect, Size},
    icon_grid::IconGrid,
    model::{DesktopSnapshot, IconId, IconRecord, InteractionState},
    selection::SelectionEngine,
    window_manager::{Placement, WindowManager},
};

#[derive(Debug, Clone)]
/// Owns every piece of mutable desktop state. Build one per desktop, mutate it only through
/// [`crate::reduce_desktop`], and hand [`DesktopSession::snapshot`] to renderers.
pub struct DesktopSession {
    pub(crate) config: DesktopConfig,
    pub(crate) windows: WindowManager,
    pub(crate) icons: IconGrid,
    pub(crate) selection: SelectionEngine,
    pub(crate) interaction: InteractionState,
    /// Measured icon bounds reported by the renderer; cleared whenever the layout changes.
    pub(crate) rendered_icon_bounds: Option<Vec<(IconId, Rect)>>,
    pub(crate) start_menu_open: bool,
}

impl DesktopSession {
    /// Starts a session seeded with the catalog's desktop icons.
    pub fn new(config: DesktopConfig, placement: Placement) -> Self {
        Self::with_icons(config, placement, apps::seed_desktop_icons())
    }

    pub fn with_icons(
        config: DesktopConfig,
        placement: Placement,
        icons: impl IntoIterator<Item = IconRecord>,
    ) -> Self {
        Self {
            windows: WindowManager::new(&config, placement),
            icons: IconGrid::with_icons(config.grid.clone(), icons),
            selection: SelectionEngine::new(config.selection_min_duration_ms),
            interaction: InteractionState::default(),
            rendered_icon_bounds: None,
            start_menu_open: false,
            config,
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn icons(&self) -> &IconGrid {
        &self.icons
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    /// The icon container is the viewport minus the taskbar strip.
    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        self.windows.set_viewport(viewport);
        self.icons.set_container_size(Size::new(
            viewport.width,
            (viewport.height - self.config.taskbar_height).max(0),
        ));
        self.rendered_icon_bounds = None;
    }

    /// Bounds used for rubber-band membership: measured ones when the renderer reported them,
    /// otherwise the grid layout.
    pub(crate) fn selection_targets(&self) -> Vec<(IconId, Rect)> {
        match &self.rendered_icon_bounds {
            Some(bounds) => bounds
                .iter()
                .filter(|(id, _)| self.icons.contains(id))
                .cloned()
                .collect(),
            None => self.icons.icon_bounds(),
        }
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            windows: self.windows.windows().to_vec(),
            paint_order: self.windows.paint_order(),
            taskbar: self.windows.taskbar_entries(),
            icons: self.icons.views(),
            selected: self.icons.selected_ids(),
            selection_box: self.selection.selection_rect(),
            grid: self.icons.metrics(),
            start_menu_open: self.start_menu_open,
        }
    }
}

impl Default for DesktopSession {
    fn default() -> Self {
        Self::new(DesktopConfig::default(), Placement::random())
    }
}
