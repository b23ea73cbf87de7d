use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::HotlineError;
use crate::format::paths::EditorKind;

pub const DEFAULT_GO_BINARY: &str = "go";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotlineConfig {
    #[serde(alias = "go_binary")]
    pub go_binary: Option<String>,
    #[serde(alias = "pprof_args")]
    pub pprof_args: Option<Vec<String>>,
    #[serde(alias = "timeout_ms")]
    pub timeout_ms: Option<u64>,
    pub editor: Option<EditorKind>,
    #[serde(alias = "project_root")]
    pub project_root: Option<String>,
    pub top: Option<usize>,
    pub exclude: Option<Vec<String>>,
}

impl HotlineConfig {
    pub fn go_binary(&self) -> &str {
        self.go_binary.as_deref().unwrap_or(DEFAULT_GO_BINARY)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    pub fn editor(&self) -> EditorKind {
        self.editor.unwrap_or_default()
    }

    /// `projectRoot` is taken relative to the directory the config was found in.
    pub fn project_root(&self, repo_root: &Path) -> PathBuf {
        match self.project_root.as_deref() {
            Some(raw) if !raw.trim().is_empty() => repo_root.join(raw.trim()),
            _ => repo_root.to_path_buf(),
        }
    }
}

pub fn find_repo_root(start: &Path) -> PathBuf {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| start.to_path_buf())
}

pub fn discover_config_path(repo_root: &Path) -> Option<PathBuf> {
    let names = [
        "hotline.toml",
        "hotline.config.json",
        "hotline.config.json5",
        "hotline.config.yaml",
        "hotline.config.yml",
        ".hotlinerc",
        ".hotlinerc.json",
        ".hotlinerc.yaml",
    ];
    names
        .into_iter()
        .map(|name| repo_root.join(name))
        .find(|p| p.is_file())
}

pub fn load_hotline_config(repo_root: &Path) -> Result<HotlineConfig, HotlineError> {
    if let Some(path) = discover_config_path(repo_root) {
        tracing::debug!(path = %path.display(), "loading config");
        return load_hotline_config_from_path(&path);
    }

    load_cargo_metadata_config(repo_root)
}

pub fn load_hotline_config_from_path(path: &Path) -> Result<HotlineConfig, HotlineError> {
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        // `.hotlinerc` has no extension and is read as JSON5.
        "json" | "json5" | "" => load_json_config(path),
        "yaml" | "yml" => load_yaml_config(path),
        "toml" => load_toml_config(path, TomlConfigSource::FullFile).map(|v| v.unwrap_or_default()),
        _ => Ok(HotlineConfig::default()),
    }
}

fn read_config_text(path: &Path) -> Result<String, HotlineError> {
    std::fs::read_to_string(path).map_err(|source| HotlineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json_config(path: &Path) -> Result<HotlineConfig, HotlineError> {
    let raw = read_config_text(path)?;
    json5::from_str::<HotlineConfig>(&raw)
        .or_else(|_| serde_json::from_str::<HotlineConfig>(&raw))
        .map_err(|err| HotlineError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn load_yaml_config(path: &Path) -> Result<HotlineConfig, HotlineError> {
    let raw = read_config_text(path)?;
    if raw.trim().is_empty() {
        return Ok(HotlineConfig::default());
    }
    serde_yaml::from_str::<HotlineConfig>(&raw).map_err(|err| HotlineError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TomlConfigSource {
    FullFile,
    CargoPackageMetadataHotline,
}

fn load_cargo_metadata_config(repo_root: &Path) -> Result<HotlineConfig, HotlineError> {
    let cargo_toml_path = repo_root.join("Cargo.toml");
    if cargo_toml_path.is_file() {
        if let Some(config) = load_toml_config(
            &cargo_toml_path,
            TomlConfigSource::CargoPackageMetadataHotline,
        )? {
            return Ok(config);
        }
    }
    Ok(HotlineConfig::default())
}

fn load_toml_config(
    path: &Path,
    source: TomlConfigSource,
) -> Result<Option<HotlineConfig>, HotlineError> {
    let raw = read_config_text(path)?;

    let toml_value =
        toml::from_str::<toml::Value>(&raw).map_err(|err| HotlineError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let maybe_table_value = match source {
        TomlConfigSource::FullFile => Some(toml_value),
        TomlConfigSource::CargoPackageMetadataHotline => {
            extract_cargo_package_metadata_hotline(&toml_value)
        }
    };

    let Some(table_value) = maybe_table_value else {
        return Ok(None);
    };

    table_value
        .try_into::<HotlineConfig>()
        .map(Some)
        .map_err(|err| HotlineError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn extract_cargo_package_metadata_hotline(value: &toml::Value) -> Option<toml::Value> {
    value
        .get("package")
        .and_then(|package| package.get("metadata"))
        .and_then(|metadata| metadata.get("hotline"))
        .cloned()
}
