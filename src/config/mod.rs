// Configuration module for Action Tennis
// Handles loading and managing game configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config, parse_config};
pub use types::{Config, CpuConfig, DisplayConfig, KeyBindings, PhysicsConfig};
