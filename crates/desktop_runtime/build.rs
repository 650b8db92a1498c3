use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    app_id: String,
    display_name: String,
    content: String,
    style: String,
    show_on_desktop: bool,
    show_in_launcher: bool,
    #[serde(default)]
    desktop_cell: Option<[i32; 2]>,
    #[serde(default)]
    window_defaults: Option<WindowDefaults>,
    #[serde(default)]
    payload: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppCatalog {
    schema_version: u32,
    apps: Vec<AppManifest>,
}

const CONTENT_KINDS: [&str; 4] = ["generic", "file-explorer", "text-editor", "about"];

fn validate(catalog: &AppCatalog, path: &str) {
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            catalog.schema_version
        );
    }

    let mut ids = HashSet::new();
    let mut cells = HashSet::new();
    for app in &catalog.apps {
        if !ids.insert(app.app_id.as_str()) {
            panic!("duplicate app id `{}` in {path}", app.app_id);
        }
        if !CONTENT_KINDS.contains(&app.content.as_str()) {
            panic!("unknown content kind `{}` for `{}`", app.content, app.app_id);
        }
        if let Some(size) = &app.window_defaults {
            if size.width <= 0 || size.height <= 0 {
                panic!("window defaults for `{}` must be positive", app.app_id);
            }
        }
        match (app.show_on_desktop, app.desktop_cell) {
            (true, Some(cell)) => {
                if cell[0] < 0 || cell[1] < 0 || !cells.insert(cell) {
                    panic!("desktop cell {cell:?} for `{}` is negative or taken", app.app_id);
                }
            }
            (true, None) => panic!("`{}` is shown on the desktop without a cell", app.app_id),
            (false, _) => {}
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app_catalog.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: AppCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    let json = serde_json::to_string_pretty(&catalog.apps).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated app catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
