use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{GridCell, GridMetrics, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Stable window key. Windows opened from an icon reuse the icon id.
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&IconId> for WindowId {
    fn from(icon_id: &IconId) -> Self {
        Self(icon_id.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(pub String);

impl IconId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    App,
    File,
    Folder,
}

impl IconKind {
    /// App icons cannot be deleted, duplicated, or renamed from the context menu.
    pub fn is_user_mutable(self) -> bool {
        matches!(self, Self::File | Self::Folder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: IconId,
    pub title: String,
    pub kind: IconKind,
    /// Display-style tag forwarded to the renderer untouched.
    pub style: String,
    pub cell: GridCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Icon listing handed to file-explorer content.
pub struct IconSummary {
    pub id: IconId,
    pub title: String,
    pub kind: IconKind,
}

impl From<&IconRecord> for IconSummary {
    fn from(icon: &IconRecord) -> Self {
        Self {
            id: icon.id.clone(),
            title: icon.title.clone(),
            kind: icon.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Generic,
    FileExplorer,
    TextEditor,
    About,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// What a window displays. Only the tag is read here; payloads belong to content providers.
pub enum ContentDescriptor {
    Generic {
        payload: Value,
    },
    FileExplorer {
        icon_list: Vec<IconSummary>,
        static_payload: Value,
    },
    TextEditor {
        target_id: String,
    },
    About {
        payload: Value,
    },
}

impl ContentDescriptor {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Generic { .. } => ContentKind::Generic,
            Self::FileExplorer { .. } => ContentKind::FileExplorer,
            Self::TextEditor { .. } => ContentKind::TextEditor,
            Self::About { .. } => ContentKind::About,
        }
    }

    /// Opaque document key for text-editor content, passed through to the storage collaborator.
    pub fn storage_key(&self) -> Option<String> {
        match self {
            Self::TextEditor { target_id } => Some(platform_host::editor_document_key(target_id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub content: ContentDescriptor,
    pub rect: Rect,
    /// Paint order key; higher paints on top. Never reused.
    pub z_index: u64,
    pub is_focused: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub content: ContentDescriptor,
    /// Explicit position; centred with jitter when absent.
    pub position: Option<Point>,
    /// Explicit size; looked up in the default geometry table when absent.
    pub size: Option<Size>,
}

impl OpenWindowRequest {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: ContentDescriptor) -> Self {
        Self {
            id: WindowId::new(id),
            title: title.into(),
            content,
            position: None,
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Partial window update; `None` fields are left untouched.
pub struct WindowPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub minimized: Option<bool>,
    pub focused: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub focused: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    /// Horizontal direction of the handle: `-1` for the west side, `1` for the east side.
    pub fn horizontal(self) -> i32 {
        match self {
            Self::West | Self::NorthWest | Self::SouthWest => -1,
            Self::East | Self::NorthEast | Self::SouthEast => 1,
            Self::North | Self::South => 0,
        }
    }

    /// Vertical direction of the handle: `-1` for the north side, `1` for the south side.
    pub fn vertical(self) -> i32 {
        match self {
            Self::North | Self::NorthEast | Self::NorthWest => -1,
            Self::South | Self::SouthEast | Self::SouthWest => 1,
            Self::East | Self::West => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Part of the window frame that received a pointer-down.
pub enum ChromePart {
    TitleBar,
    Resize(ResizeEdge),
    /// Window body (content area); focuses without starting a gesture.
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// What the pointer went down on, as resolved by the renderer's hit test.
pub enum PointerTarget {
    Background,
    Icon(IconId),
    Window { window_id: WindowId, part: ChromePart },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextMenuCommand {
    Open,
    NewFile,
    NewFolder,
    Rename,
    Duplicate,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuEntry {
    pub command: ContextMenuCommand,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: Point,
    pub rect_start: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: Point,
    pub rect_start: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The single pointer gesture allowed at a time.
pub enum ActiveGesture {
    RubberBand,
    IconDrag { pointer_start: Point },
    WindowMove(DragSession),
    WindowResize(ResizeSession),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub gesture: Option<ActiveGesture>,
    pub last_pointer: Option<Point>,
    /// Set when a rubber band commits so the click event that trails its pointer-up does not
    /// clear the fresh selection.
    pub swallow_background_click: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Icon as the renderer should draw it.
pub struct IconView {
    pub id: IconId,
    pub title: String,
    pub kind: IconKind,
    pub style: String,
    pub cell: GridCell,
    /// Committed pixel bounds, container-relative.
    pub bounds: Rect,
    pub selected: bool,
    pub editing: bool,
    /// Visual position while the icon is part of an uncommitted drag.
    pub drag_position: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Immutable read model of one desktop session.
pub struct DesktopSnapshot {
    /// Windows in open order.
    pub windows: Vec<WindowRecord>,
    /// Window ids in ascending z order (bottom first).
    pub paint_order: Vec<WindowId>,
    pub taskbar: Vec<TaskbarEntry>,
    pub icons: Vec<IconView>,
    pub selected: Vec<IconId>,
    pub selection_box: Option<Rect>,
    pub grid: GridMetrics,
    pub start_menu_open: bool,
}

impl DesktopSnapshot {
    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| &w.id)
    }
}
