//! surface-bridge: surface lifecycle coordination for native engines
//!
//! This crate sits between a platform display surface and a rendering engine
//! that lives outside of it. It does not draw anything itself. Its job is to
//! make sure the engine sees its three entry points in an order it can rely
//! on:
//!
//! - `init(width, height, bundle)` once per surface, before anything else,
//! - `resize(width, height)` on every surface geometry change,
//! - `step()` once per display refresh.
//!
//! # Components
//!
//! - [`host::SurfaceHost`] picks the display configuration (RGB8, no alpha,
//!   16-bit depth, no stencil, context version 3 or later), applies the
//!   immersive/fullscreen chrome best-effort, grabs the resource bundle and
//!   the display metrics, and installs the bridge.
//! - [`bridge::SurfaceLifecycleBridge`] is the state machine
//!   (`Uninitialized → Ready → Active → Destroyed`) that forwards each
//!   [`bridge::SurfaceCallbacks`] notification to the [`engine::NativeEngine`].
//!
//! # Initialization sizing
//!
//! The engine is initialized with the size of the *device display*, not the
//! size of the surface. The surface size only arrives with the first
//! `resize`. Engines must not assume the two are equal.
//!
//! # Running
//!
//! [`run()`] wires everything to a winit event loop with the demo
//! [`renderer::clear::ClearEngine`]. On Android the `android_main` symbol
//! exported by this library does the same through `android-native-activity`.
//!
//! Example native binary:
//! ```no_run
//! fn main() -> anyhow::Result<()>
//! {
//!         surface_bridge::run()
//! }
//! ```
//!
//! # Logging and errors
//!
//! - Logging goes through `log` and is initialized from the settings file
//!   (`surface-bridge.toml`, or the path in `SURFACE_BRIDGE_CONFIG`);
//!   `RUST_LOG` overrides the configured filter.
//! - Host construction fails with [`error::BridgeError`]; the application
//!   entry points return `anyhow::Result<()>`.

pub mod bridge;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod host;
pub mod platform;
pub mod renderer;
pub mod resource;
pub mod utils;

pub use bridge::{BridgeState, BridgeStats, SurfaceCallbacks, SurfaceLifecycleBridge};
pub use config::{ChromePreferences, Settings};
pub use display::{DisplayConfiguration, DisplayMetrics, SurfaceGeometry};
pub use engine::NativeEngine;
pub use error::BridgeError;
pub use host::{SurfaceHost, SurfaceHostBuilder, SurfacePlatform};
pub use resource::{AssetDirectory, ResourceBundleHandle};

#[cfg(target_os = "android")]
pub use resource::AndroidAssets;

/// Starts the surface driver and blocks until the surface goes away.
///
/// Behavior:
/// - Loads the settings and initializes logging, then prints the start
///   banner.
/// - Creates the event loop runner. The window, the surface host and the
///   engine are created on the first resume.
/// - Shows an exit message and returns.
///
/// # Returns
///
/// - `Ok(())` when the event loop exits cleanly.
/// - An error if the event loop fails or the platform cannot provide the
///   display configuration.
#[cfg(not(target_os = "android"))]
pub fn run() -> anyhow::Result<()>
{
        let settings = utils::bootstrap::bootstrap();

        utils::bootstrap::show_start_message(&settings.logging);

        let logging = settings.logging.clone();

        let runner = platform::SurfaceRunner::new(settings)?;

        runner.run()?;

        utils::exit::show_exit_message(&logging);

        Ok(())
}

/// Android counterpart of [`run()`], driven by the given activity.
#[cfg(target_os = "android")]
pub fn run(app: winit::platform::android::activity::AndroidApp) -> anyhow::Result<()>
{
        let settings = utils::bootstrap::bootstrap();

        utils::bootstrap::show_start_message(&settings.logging);

        let logging = settings.logging.clone();

        let runner = platform::SurfaceRunner::new(settings, app)?;

        runner.run()?;

        utils::exit::show_exit_message(&logging);

        Ok(())
}

/// Entry point called by `android-native-activity` once the activity exists.
#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(app: winit::platform::android::activity::AndroidApp)
{
        if let Err(e) = run(app)
        {
                log::error!("surface-bridge failed: {e:#}");
        }
}
