use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no path is given.
pub const SETTINGS_FILE: &str = "surface-bridge.toml";

/// Environment variable overriding [`SETTINGS_FILE`].
pub const SETTINGS_ENV: &str = "SURFACE_BRIDGE_CONFIG";

/// Runtime settings of the surface host.
///
/// Every key is optional in the TOML file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings
{
        pub window: WindowSettings,
        pub chrome: ChromePreferences,
        pub assets: AssetSettings,
        pub logging: LoggingSettings,
}

impl Settings
{
        /// Loads settings from `$SURFACE_BRIDGE_CONFIG` or
        /// `./surface-bridge.toml`.
        pub fn from_file() -> anyhow::Result<Self>
        {
                let path = std::env::var_os(SETTINGS_ENV)
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));

                Self::from_path(&path)
        }

        pub fn from_path(path: &Path) -> anyhow::Result<Self>
        {
                let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;

                Self::from_toml(&text).with_context(|| format!("failed to parse {}", path.display()))
        }

        pub fn from_toml(text: &str) -> anyhow::Result<Self>
        {
                Ok(toml::from_str(text)?)
        }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings
{
        pub title: String,
}

impl Default for WindowSettings
{
        fn default() -> Self
        {
                Self {
                        title: "surface-bridge".to_string(),
                }
        }
}

/// Immersive/fullscreen presentation flags.
///
/// Applied best-effort: a platform that rejects them still gets a surface.
/// The layout flags keep the content from resizing when the system bars
/// hide and show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromePreferences
{
        pub immersive: bool,
        pub layout_stable: bool,
        pub layout_hide_navigation: bool,
        pub layout_fullscreen: bool,
        pub hide_navigation: bool,
        pub fullscreen: bool,
}

impl ChromePreferences
{
        pub const NONE: Self = Self {
                immersive: false,
                layout_stable: false,
                layout_hide_navigation: false,
                layout_fullscreen: false,
                hide_navigation: false,
                fullscreen: false,
        };

        /// Whether any flag asks the platform to hide its chrome.
        pub fn wants_fullscreen(&self) -> bool
        {
                self.fullscreen || self.layout_fullscreen || self.immersive
        }

        pub fn is_empty(&self) -> bool
        {
                *self == Self::NONE
        }
}

impl Default for ChromePreferences
{
        fn default() -> Self
        {
                Self {
                        immersive: true,
                        layout_stable: true,
                        layout_hide_navigation: true,
                        layout_fullscreen: true,
                        hide_navigation: true,
                        fullscreen: true,
                }
        }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings
{
        /// Directory used as the resource bundle on desktop targets.
        pub directory: PathBuf,
}

impl Default for AssetSettings
{
        fn default() -> Self
        {
                Self {
                        directory: PathBuf::from("assets"),
                }
        }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings
{
        /// `env_logger` filter, `RUST_LOG` takes precedence.
        pub filter: String,
        pub show_start_message: bool,
        pub show_exit_message: bool,
}

impl Default for LoggingSettings
{
        fn default() -> Self
        {
                Self {
                        filter: "info".to_string(),
                        show_start_message: true,
                        show_exit_message: true,
                }
        }
}
