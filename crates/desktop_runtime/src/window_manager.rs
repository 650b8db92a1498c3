//! Window lifecycle, focus, and z-order state machine.
//!
//! Each open window is in one of three states: focused, background, or minimized. Closing
//! removes it. Z-order values come from a counter that only moves forward, so ascending
//! `z_index` is always a valid paint order and closed windows never hand their value on.

use crate::{
    apps,
    config::DesktopConfig,
    geometry::{centered_with_jitter, Rect, Size},
    model::{OpenWindowRequest, TaskbarEntry, WindowId, WindowPatch, WindowRecord},
};

/// Viewport assumed until the host reports one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280, 800);

#[derive(Debug, Clone)]
/// Source of the per-axis jitter applied to default window positions.
pub enum Placement {
    Random(fastrand::Rng),
    /// Fixed unit offsets in `[-1, 1]`; `(0.0, 0.0)` places windows dead centre.
    Fixed { x: f64, y: f64 },
}

impl Placement {
    pub fn random() -> Self {
        Self::Random(fastrand::Rng::new())
    }

    pub fn centered() -> Self {
        Self::Fixed { x: 0.0, y: 0.0 }
    }

    fn next_unit(&mut self) -> (f64, f64) {
        match self {
            Self::Random(rng) => (rng.f64() * 2.0 - 1.0, rng.f64() * 2.0 - 1.0),
            Self::Fixed { x, y } => (*x, *y),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_z_index: u64,
    viewport: Size,
    taskbar_height: i32,
    max_jitter: i32,
    placement: Placement,
}

impl WindowManager {
    pub fn new(config: &DesktopConfig, placement: Placement) -> Self {
        Self {
            windows: Vec::new(),
            next_z_index: 1,
            viewport: DEFAULT_VIEWPORT,
            taskbar_height: config.taskbar_height,
            max_jitter: config.window.max_jitter,
            placement,
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport area above the taskbar.
    pub fn work_area(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.viewport.width,
            (self.viewport.height - self.taskbar_height).max(0),
        )
    }

    /// Opens a window, or focuses the existing window with the same id.
    ///
    /// Returns `true` when a new window was created.
    pub fn open(&mut self, request: OpenWindowRequest) -> bool {
        if self.contains(&request.id) {
            self.focus(&request.id);
            return false;
        }

        let size = request
            .size
            .unwrap_or_else(|| apps::default_window_size(request.id.as_str(), request.content.kind()));
        let position = request.position.unwrap_or_else(|| {
            let unit = self.placement.next_unit();
            centered_with_jitter(
                self.viewport,
                size,
                self.taskbar_height,
                self.max_jitter,
                unit,
            )
        });

        for window in &mut self.windows {
            window.is_focused = false;
        }
        let z_index = self.take_z_index();
        self.windows.push(WindowRecord {
            id: request.id,
            title: request.title,
            content: request.content,
            rect: Rect::from_origin_size(position, size),
            z_index,
            is_focused: true,
            minimized: false,
        });
        true
    }

    /// Focuses, restores, and raises `window_id`. Unknown ids are ignored.
    ///
    /// Returns `true` when the window exists.
    pub fn focus(&mut self, window_id: &WindowId) -> bool {
        let top = self.max_z_index();
        let Some(index) = self.index_of(window_id) else {
            return false;
        };

        if self.windows[index].z_index < top {
            let z_index = self.take_z_index();
            self.windows[index].z_index = z_index;
        }
        for (idx, window) in self.windows.iter_mut().enumerate() {
            window.is_focused = idx == index;
        }
        self.windows[index].minimized = false;
        true
    }

    /// Removes the window. No other window is focused in its place.
    pub fn close(&mut self, window_id: &WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != *window_id);
        self.windows.len() != before
    }

    pub fn minimize(&mut self, window_id: &WindowId) -> bool {
        let Some(window) = self.get_mut(window_id) else {
            return false;
        };
        window.minimized = true;
        window.is_focused = false;
        true
    }

    /// Applies a partial update. Focus flags keep the single-focus invariant: gaining focus
    /// clears it elsewhere and minimizing drops it.
    pub fn update(&mut self, window_id: &WindowId, patch: WindowPatch) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };

        if patch.focused == Some(true) {
            for window in &mut self.windows {
                window.is_focused = false;
            }
        }

        let window = &mut self.windows[index];
        if let Some(position) = patch.position {
            window.rect.x = position.x;
            window.rect.y = position.y;
        }
        if let Some(size) = patch.size {
            window.rect.w = size.width;
            window.rect.h = size.height;
        }
        if let Some(focused) = patch.focused {
            window.is_focused = focused;
        }
        if let Some(minimized) = patch.minimized {
            window.minimized = minimized;
            if minimized {
                window.is_focused = false;
            }
        }
        true
    }

    /// Taskbar button semantics: restore a minimized window, minimize the focused one, and
    /// focus a background one.
    pub fn toggle_activate(&mut self, window_id: &WindowId) -> bool {
        let Some(window) = self.get_mut(window_id) else {
            return false;
        };

        if window.minimized {
            window.is_focused = false;
            window.minimized = false;
            self.focus(window_id)
        } else if window.is_focused {
            window.minimized = true;
            window.is_focused = false;
            true
        } else {
            self.focus(window_id)
        }
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.index_of(window_id).is_some()
    }

    pub fn get(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == *window_id)
    }

    /// Windows in open order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| &w.id)
    }

    /// Window ids bottom to top.
    pub fn paint_order(&self) -> Vec<WindowId> {
        let mut ordered: Vec<&WindowRecord> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered.into_iter().map(|w| w.id.clone()).collect()
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.windows
            .iter()
            .map(|w| TaskbarEntry {
                id: w.id.clone(),
                title: w.title.clone(),
                focused: w.is_focused,
                minimized: w.minimized,
            })
            .collect()
    }

    fn get_mut(&mut self, window_id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == *window_id)
    }

    fn index_of(&self, window_id: &WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == *window_id)
    }

    fn max_z_index(&self) -> u64 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    fn take_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index = self.next_z_index.saturating_add(1);
        z_index
    }
}
