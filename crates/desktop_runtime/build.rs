use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const KNOWN_CAPABILITIES: [&str; 3] = ["theme", "storage", "assistant"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppManifest {
    schema_version: u32,
    runtime_contract_version: String,
    app_id: String,
    display_name: String,
    icon: String,
    launcher_order: u32,
    #[serde(default)]
    show_on_desktop: bool,
    #[serde(default)]
    requested_capabilities: Vec<String>,
    window_defaults: WindowDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutConfig {
    cascade_origin: i32,
    cascade_step: i32,
    reserved_band_px: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyConfig {
    #[serde(default)]
    refocus_on_close: bool,
    #[serde(default)]
    restore_minimized_on_launch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DesktopConfig {
    layout: LayoutConfig,
    #[serde(default)]
    policy: PolicyConfig,
}

fn app_manifest_paths(root: &Path) -> Vec<PathBuf> {
    ["assistant", "browser", "notepad", "camera", "settings"]
        .iter()
        .map(|name| {
            root.join("..")
                .join("apps")
                .join(name)
                .join("app.manifest.toml")
        })
        .collect()
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn validate_manifest(path: &Path, manifest: &AppManifest) {
    if manifest.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }
    if !manifest.runtime_contract_version.starts_with("1.") {
        panic!(
            "runtime contract mismatch in {}: expected 1.x found {}",
            path.display(),
            manifest.runtime_contract_version
        );
    }
    if manifest.display_name.trim().is_empty() {
        panic!("empty display_name in {}", path.display());
    }
    for capability in &manifest.requested_capabilities {
        if !KNOWN_CAPABILITIES.contains(&capability.as_str()) {
            panic!(
                "unknown capability `{capability}` in {}; expected one of {KNOWN_CAPABILITIES:?}",
                path.display()
            );
        }
    }
    let size = &manifest.window_defaults;
    if size.width <= 0 || size.height <= 0 {
        panic!(
            "window_defaults must be positive in {}: {}x{}",
            path.display(),
            size.width,
            size.height
        );
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<AppManifest>::new();
    let mut seen_ids = BTreeSet::new();

    for path in app_manifest_paths(&crate_root) {
        let manifest: AppManifest = read_toml(&path);
        validate_manifest(&path, &manifest);
        if !seen_ids.insert(manifest.app_id.clone()) {
            panic!("duplicate app_id `{}` in {}", manifest.app_id, path.display());
        }
        manifests.push(manifest);
    }

    manifests.sort_by(|a, b| {
        a.launcher_order
            .cmp(&b.launcher_order)
            .then_with(|| a.app_id.cmp(&b.app_id))
    });

    let config_path = crate_root.join("desktop.toml");
    let config: DesktopConfig = read_toml(&config_path);
    if config.layout.reserved_band_px < 0 {
        panic!("reserved_band_px must not be negative in {}", config_path.display());
    }

    let catalog_json =
        serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let config_json = serde_json::to_string_pretty(&config).expect("serialize desktop config");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{catalog_json}\"##;\n\
/// Build-time generated desktop shell config JSON.\n\
pub const DESKTOP_CONFIG_JSON: &str = r##\"{config_json}\"##;\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
