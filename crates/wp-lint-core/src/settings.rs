use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use config::{Config, ConfigError, File, FileFormat, Value, ValueKind};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::{debug, warn};

/// Project-level config files, lowest precedence first.
const PROJECT_FILES: [&str; 2] = ["wp-cli.yml", "wp-cli.local.yml"];

/// Source of `lint.<key>` values that outrank every other resolution step.
pub trait ConfigProvider {
    /// Look up `lint.<key>`. `Ok(None)` when the key (or the whole config) is absent.
    fn lint_value(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// Fixed in-memory `lint` section. An empty map stands in for "no config at all".
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for MapConfig {
    fn lint_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }
}

/// Reads wp-cli style YAML files, later files winning.
///
/// Files are parsed on the first lookup and reused for the rest of the run.
#[derive(Debug)]
pub struct WpCliConfig {
    files: Vec<PathBuf>,
    cache: OnceCell<Layered>,
}

/// Everything taken from the config files once they are merged.
#[derive(Debug, Default)]
struct Layered {
    lint: HashMap<String, Value>,
    install_path: Option<PathBuf>,
}

impl WpCliConfig {
    /// Layer the given files, lowest precedence first. Missing files are skipped.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            cache: OnceCell::new(),
        }
    }

    /// Find config files the way wp-cli does.
    ///
    /// * global: `global_override` (normally `$WP_CLI_CONFIG_PATH`), else `~/.wp-cli/config.yml`
    /// * project: `wp-cli.yml` then `wp-cli.local.yml` in the nearest ancestor of `cwd`
    ///   holding either of them
    pub fn discover(cwd: &Path, home: Option<&Path>, global_override: Option<PathBuf>) -> Self {
        let mut files = Vec::new();
        let global = global_override
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| home.map(|home| home.join(".wp-cli").join("config.yml")));
        files.extend(global);
        files.extend(project_files(cwd));
        Self::new(files)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// WordPress root named by the top-level `path:` key.
    ///
    /// Relative values are resolved against the directory of the file that set them.
    pub fn install_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        Ok(self.layered()?.install_path.clone())
    }

    fn layered(&self) -> Result<&Layered, ConfigError> {
        self.cache.get_or_try_init(|| self.load())
    }

    fn load(&self) -> Result<Layered, ConfigError> {
        let mut layered = Layered::default();
        for path in &self.files {
            if !path.is_file() {
                continue;
            }
            debug!(file = %path.display(), "loading lint config");
            let file: WpCliFile = Config::builder()
                .add_source(File::from(path.as_path()).format(FileFormat::Yaml))
                .build()?
                .try_deserialize()?;

            if let Some(install) = file.path.filter(|p| !p.trim().is_empty()) {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                layered.install_path = Some(base.join(install.trim()));
            }
            layered.lint.extend(file.lint.unwrap_or_default());
        }
        Ok(layered)
    }
}

impl ConfigProvider for WpCliConfig {
    fn lint_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let Some(value) = self.layered()?.lint.get(key) else {
            return Ok(None);
        };
        match &value.kind {
            ValueKind::Nil => Ok(None),
            ValueKind::Table(_) | ValueKind::Array(_) => {
                warn!(key = %key, "ignoring non-scalar lint config value");
                Ok(None)
            }
            _ => value.clone().into_string().map(Some),
        }
    }
}

/// The parts of a wp-cli config file this tool reads; everything else is ignored.
#[derive(Deserialize, Default)]
struct WpCliFile {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    lint: Option<HashMap<String, Value>>,
}

fn project_files(cwd: &Path) -> Vec<PathBuf> {
    cwd.ancestors()
        .map(|dir| {
            PROJECT_FILES
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect::<Vec<_>>()
        })
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}
