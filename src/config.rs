use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default viewport over the Gulf of Gökova, (lon, lat).
pub const DEFAULT_CENTER: (f64, f64) = (28.3, 36.85);
pub const DEFAULT_ZOOM: f64 = 8.0;

const CONFIG_DIR_NAME: &str = "bayexpress-map";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Mapbox access token. Resolution order is the CLI flag, then the
    /// environment, then this field; no token anywhere is fatal.
    pub token: Option<String>,
    /// Initial viewport center, (lon, lat).
    pub center: (f64, f64),
    pub zoom: f64,
    /// Base URL for popup region links. Empty leaves the bare /tag/<tag>/
    /// path as emitted on the charter site itself.
    pub site_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            token: None,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            site_url: String::new(),
        }
    }
}

// --- GUI Config ---
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    map: MapConfig,
    gui: GuiConfig,
}

/// Configuration loaded once at startup. A missing file is not an error;
/// defaults are written so the token slot is discoverable.
pub struct AppContext {
    pub map_config: MapConfig,
    pub gui_config: GuiConfig,
    config_path: PathBuf,
}

impl AppContext {
    pub fn new(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(path) => path.to_path_buf(),
            None => {
                let config_dir = dirs::config_dir()
                    .context("no config dir found")?
                    .join(CONFIG_DIR_NAME);
                fs::create_dir_all(&config_dir)
                    .with_context(|| format!("creating {}", config_dir.display()))?;
                config_dir.join(CONFIG_FILE_NAME)
            }
        };

        let file = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            toml::from_str::<ConfigFile>(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?
        } else {
            let cfg = ConfigFile::default();
            let toml_str = toml::to_string_pretty(&cfg)?;
            fs::write(&config_path, toml_str)
                .with_context(|| format!("writing {}", config_path.display()))?;
            log::info!("created default config at {}", config_path.display());
            cfg
        };

        Ok(Self { map_config: file.map, gui_config: file.gui, config_path })
    }

    /// Patches only the [gui] section so runtime overrides of [map] values
    /// (CLI flags, environment token) never end up persisted.
    pub fn save_gui_config(&self, gui_config: &GuiConfig) -> Result<()> {
        let mut file: ConfigFile = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content).unwrap_or_default()
        } else {
            ConfigFile::default()
        };
        file.gui = gui_config.clone();
        let toml_str = toml::to_string_pretty(&file)?;
        fs::write(&self.config_path, toml_str)
            .with_context(|| format!("writing {}", self.config_path.display()))?;
        Ok(())
    }
}
