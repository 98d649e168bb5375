use serde::Deserialize;
use std::fs;

use crate::controller::UPDATE_TIME_MS;
use crate::grid::MAX_SIZE_GRID;
use crate::viewport::{DEFAULT_VISIBLE_CELLS, MIN_SIZE_GRID};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Side of the simulated grid, odd
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Visible width at startup, odd
    #[serde(default = "default_visible_cells")]
    pub visible_cells: usize,
    /// Milliseconds between generations while running
    #[serde(default = "default_update_time_ms")]
    pub update_time_ms: u64,
    #[serde(default)]
    pub start_running: bool,
}

#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_pattern")]
    pub pattern: String,
    /// Absolute (row, col) cells; overrides `pattern` when present
    #[serde(default)]
    pub cells: Option<Vec<(usize, usize)>>,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_grid_line")]
    pub grid_line: [u8; 3],
    #[serde(default = "default_alive")]
    pub alive: [u8; 3],
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_window_title() -> String { "Game of Life".to_string() }
fn default_window_width() -> u32 { 640 }
fn default_window_height() -> u32 { 640 }
fn default_grid_size() -> usize { MAX_SIZE_GRID }
fn default_visible_cells() -> usize { DEFAULT_VISIBLE_CELLS }
fn default_update_time_ms() -> u64 { UPDATE_TIME_MS }
fn default_seed_pattern() -> String { "blinker".to_string() }
fn default_background() -> [u8; 3] { [255, 255, 255] }
fn default_grid_line() -> [u8; 3] { [0, 0, 0] }
fn default_alive() -> [u8; 3] { [0, 0, 0] }
fn default_show_grid_lines() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            visible_cells: default_visible_cells(),
            update_time_ms: default_update_time_ms(),
            start_running: false,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            pattern: default_seed_pattern(),
            cells: None,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_line: default_grid_line(),
            alive: default_alive(),
            show_grid_lines: default_show_grid_lines(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path, e);
                    log::warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default configuration", path);
                Config::default()
            }
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if sim.grid_size < MIN_SIZE_GRID || sim.grid_size % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.grid_size must be odd and at least {}, got {}",
                MIN_SIZE_GRID, sim.grid_size
            )));
        }
        if sim.visible_cells % 2 == 0
            || !(MIN_SIZE_GRID..=sim.grid_size).contains(&sim.visible_cells)
        {
            return Err(ConfigError::Invalid(format!(
                "simulation.visible_cells must be odd and within {}..={}, got {}",
                MIN_SIZE_GRID, sim.grid_size, sim.visible_cells
            )));
        }
        if sim.update_time_ms == 0 {
            return Err(ConfigError::Invalid("simulation.update_time_ms must be positive".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        if let Some(cells) = &self.seed.cells {
            if let Some(&(row, col)) = cells.iter().find(|&&(r, c)| r >= sim.grid_size || c >= sim.grid_size) {
                return Err(ConfigError::Invalid(format!(
                    "seed cell ({}, {}) outside {}x{} grid",
                    row, col, sim.grid_size, sim.grid_size
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.simulation.grid_size, 101);
        assert_eq!(config.simulation.visible_cells, 25);
        assert_eq!(config.simulation.update_time_ms, 500);
        assert!(!config.simulation.start_running);
        assert_eq!(config.seed.pattern, "blinker");
        assert_eq!(config.window.width, 640);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [simulation]
            update_time_ms = 100

            [seed]
            cells = [[1, 2], [3, 4]]
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.update_time_ms, 100);
        assert_eq!(config.simulation.grid_size, 101);
        assert_eq!(config.seed.cells, Some(vec![(1, 2), (3, 4)]));
        assert_eq!(config.seed.pattern, "blinker");
    }

    #[test]
    fn even_sizes_are_rejected() {
        let err = Config::from_toml_str("[simulation]\ngrid_size = 100").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = Config::from_toml_str("[simulation]\nvisible_cells = 24").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn visible_cells_larger_than_grid_is_rejected() {
        let err = Config::from_toml_str("[simulation]\ngrid_size = 11\nvisible_cells = 25").unwrap_err();
        assert!(err.to_string().contains("visible_cells"));
    }

    #[test]
    fn seed_cells_outside_grid_are_rejected() {
        let err = Config::from_toml_str("[simulation]\ngrid_size = 5\nvisible_cells = 5\n[seed]\ncells = [[5, 0]]")
            .unwrap_err();
        assert!(err.to_string().contains("(5, 0)"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[simulation\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from("definitely/not/here.toml");
        assert_eq!(config.simulation.grid_size, 101);
    }
}
