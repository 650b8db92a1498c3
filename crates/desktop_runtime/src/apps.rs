//! Built-in app catalog: seeded desktop icons, launcher entries, and default window geometry.

use std::sync::OnceLock;

use leptos::logging;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    geometry::{GridCell, Size},
    model::{
        ContentDescriptor, ContentKind, IconId, IconKind, IconRecord, IconSummary,
        OpenWindowRequest,
    },
};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

pub const GENERIC_WINDOW_SIZE: Size = Size::new(600, 400);
pub const TEXT_EDITOR_WINDOW_SIZE: Size = Size::new(800, 600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowDefaults {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    pub app_id: String,
    pub display_name: String,
    pub content: ContentKind,
    pub style: String,
    pub show_on_desktop: bool,
    pub show_in_launcher: bool,
    pub desktop_cell: Option<[i32; 2]>,
    pub window_defaults: Option<WindowDefaults>,
    pub payload: Option<String>,
}

fn parse_catalog(raw: &str) -> Vec<AppDescriptor> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        logging::warn!("app catalog parse failed: {err}");
        Vec::new()
    })
}

pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| parse_catalog(APP_CATALOG_JSON))
}

pub fn app_descriptor(app_id: &str) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| entry.app_id == app_id)
}

/// Apps listed in the start menu, in catalog order.
pub fn launcher_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

/// Icons placed on a fresh desktop, in catalog order.
pub fn seed_desktop_icons() -> Vec<IconRecord> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .filter_map(|entry| {
            let [x, y] = entry.desktop_cell?;
            Some(IconRecord {
                id: IconId::new(entry.app_id.clone()),
                title: entry.display_name.clone(),
                kind: IconKind::App,
                style: entry.style.clone(),
                cell: GridCell::new(x, y),
            })
        })
        .collect()
}

/// Default window size for `window_id`: the catalog entry if it declares one, otherwise by
/// content kind.
pub fn default_window_size(window_id: &str, kind: ContentKind) -> Size {
    if let Some(defaults) = app_descriptor(window_id).and_then(|entry| entry.window_defaults) {
        return Size::new(defaults.width, defaults.height);
    }
    match kind {
        ContentKind::TextEditor => TEXT_EDITOR_WINDOW_SIZE,
        ContentKind::Generic | ContentKind::FileExplorer | ContentKind::About => {
            GENERIC_WINDOW_SIZE
        }
    }
}

fn payload_value(payload: Option<&str>) -> Value {
    payload.map_or(Value::Null, |text| Value::String(text.to_string()))
}

fn content_for_app(
    entry: &AppDescriptor,
    window_id: &str,
    title: &str,
    icons: &[IconRecord],
) -> ContentDescriptor {
    match entry.content {
        ContentKind::FileExplorer => ContentDescriptor::FileExplorer {
            icon_list: icons.iter().map(IconSummary::from).collect(),
            static_payload: json!({
                "about": app_registry()
                    .iter()
                    .find(|app| app.content == ContentKind::About)
                    .and_then(|app| app.payload.clone()),
            }),
        },
        ContentKind::About => ContentDescriptor::About {
            payload: payload_value(entry.payload.as_deref()),
        },
        ContentKind::TextEditor => ContentDescriptor::TextEditor {
            target_id: window_id.to_string(),
        },
        ContentKind::Generic => ContentDescriptor::Generic {
            payload: entry
                .payload
                .as_deref()
                .map_or_else(|| json!(format!("Content for {title}")), |text| json!(text)),
        },
    }
}

/// Builds the open request for double-clicking `icon`. The window reuses the icon id and its
/// current title; `icons` is the live icon list handed to file-explorer content.
pub fn open_request_for_icon(icon: &IconRecord, icons: &[IconRecord]) -> OpenWindowRequest {
    let content = match (icon.kind, app_descriptor(icon.id.as_str())) {
        (IconKind::App, Some(entry)) => content_for_app(entry, icon.id.as_str(), &icon.title, icons),
        (IconKind::File, _) => ContentDescriptor::TextEditor {
            target_id: icon.id.to_string(),
        },
        (IconKind::App | IconKind::Folder, _) => ContentDescriptor::Generic {
            payload: json!(format!("Content for {}", icon.title)),
        },
    };
    OpenWindowRequest::new(icon.id.as_str(), icon.title.clone(), content)
}

/// Builds the open request for a start-menu launch.
pub fn open_request_for_app(app_id: &str, icons: &[IconRecord]) -> Option<OpenWindowRequest> {
    let entry = app_descriptor(app_id)?;
    let content = content_for_app(entry, app_id, &entry.display_name, icons);
    Some(OpenWindowRequest::new(
        app_id,
        entry.display_name.clone(),
        content,
    ))
}
