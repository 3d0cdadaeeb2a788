//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORBITAL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use orbital_core::SketchConfig;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Initial sketch settings
    #[serde(default)]
    pub sketch: SketchConfig,
    /// Simulation clock configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORBITAL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ORBITAL_SKETCH__GRAVITY_STRENGTH=4 -> sketch.gravity_strength = 4.0
        figment = figment.merge(Env::prefixed("ORBITAL_").split("__"));

        let mut config: AppConfig = figment.extract().map_err(ConfigError::from)?;
        config.sketch = config.sketch.sanitized();
        config.simulation = config.simulation.sanitized();
        Ok(config)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbital Shapes".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            resizable: true,
        }
    }
}

/// Simulation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physics steps per second
    pub tick_rate: f32,
    /// Most steps run to catch up after a slow frame
    pub max_ticks_per_frame: u32,
    /// Start with motion enabled
    pub start_running: bool,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 30.0,
            max_ticks_per_frame: 4,
            start_running: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Replace unusable values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            self.tick_rate = defaults.tick_rate;
        }
        self.max_ticks_per_frame = self.max_ticks_per_frame.max(1);
        self
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Prefer a discrete GPU
    pub high_performance: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            high_performance: false,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace) used when `RUST_LOG` is unset
    pub log_level: String,
    /// Show shape count and settings in the window title
    pub show_status: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_status: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
