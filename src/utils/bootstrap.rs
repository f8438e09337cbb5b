use std::sync::Once;

use crate::config::{LoggingSettings, Settings};

static INIT: Once = Once::new();

pub fn show_start_message(settings: &LoggingSettings)
{
        if !settings.show_start_message
        {
                return;
        }

        let banner = r#"
   ___ _   _ _ __ / _| __ _  ___ ___
  / __| | | | '__| |_ / _` |/ __/ _ \
  \__ \ |_| | |  |  _| (_| | (_|  __/
  |___/\__,_|_|  |_|  \__,_|\___\___|  bridge

 Surface lifecycle bridge built with winit, wgpu and Rust.
"#;

        log::info!("{banner}");
}

/// Initializes `env_logger` once. `RUST_LOG` overrides the configured filter.
pub fn config_logging(settings: &LoggingSettings)
{
        INIT.call_once(|| {
                let env = env_logger::Env::default().default_filter_or(settings.filter.as_str());

                let _ = env_logger::Builder::from_env(env).try_init();

                #[cfg(target_os = "android")]
                log::info!("Running on android.");

                #[cfg(not(target_os = "android"))]
                log::info!("Running on native.");
        });
}

/// Loads the settings file and initializes logging with its filter.
///
/// A missing or invalid file is reported once logging is up, then the
/// defaults are used.
pub fn bootstrap() -> Settings
{
        match Settings::from_file()
        {
                Ok(settings) =>
                {
                        config_logging(&settings.logging);
                        settings
                }
                Err(err) =>
                {
                        let settings = Settings::default();
                        config_logging(&settings.logging);
                        log::warn!("Failed to load settings: {err:#}, falling back to default");
                        settings
                }
        }
}
