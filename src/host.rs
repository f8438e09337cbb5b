//! Surface host.
//!
//! Sets up the drawable surface through a [`SurfacePlatform`], then hands
//! every lifecycle callback to the [`SurfaceLifecycleBridge`] it installed.
//!
//! Construction goes through [`SurfaceHostBuilder`]:
//!
//! ```ignore
//! let mut host = SurfaceHostBuilder::new()
//!         .with_chrome(settings.chrome)
//!         .build(&mut platform, engine)?;
//!
//! // The platform driver now talks to the host.
//! host.on_create();
//! host.on_resize(800, 600);
//! host.on_frame();
//! ```

use crate::bridge::{BridgeState, SurfaceCallbacks, SurfaceLifecycleBridge};
use crate::config::ChromePreferences;
use crate::display::{DisplayConfiguration, DisplayMetrics};
use crate::engine::NativeEngine;
use crate::error::BridgeError;
use crate::resource::ResourceBundleHandle;

/// What the host needs from the windowing platform.
pub trait SurfacePlatform
{
        /// Commits the platform to `requested` or fails with
        /// [`BridgeError::ConfigurationUnavailable`].
        ///
        /// Implementations must not fall back to a weaker configuration.
        fn choose_configuration(
                &mut self,
                requested: &DisplayConfiguration,
        ) -> Result<(), BridgeError>;

        /// Applies immersive/fullscreen flags.
        ///
        /// May fail with [`BridgeError::ChromePreferenceUnsupported`], which
        /// the host ignores.
        fn apply_chrome(
                &mut self,
                chrome: &ChromePreferences,
        ) -> Result<(), BridgeError>;

        /// Handle to the packaged asset store.
        fn resource_bundle(&self) -> ResourceBundleHandle;

        /// Size of the physical device display.
        fn display_metrics(&self) -> DisplayMetrics;
}

/// Owns the display configuration and the installed lifecycle bridge.
#[derive(Debug)]
pub struct SurfaceHost<E: NativeEngine>
{
        configuration: DisplayConfiguration,

        chrome: ChromePreferences,

        chrome_applied: bool,

        bridge: SurfaceLifecycleBridge<E>,
}

impl<E: NativeEngine> SurfaceHost<E>
{
        /// Builds a host with the default configuration and chrome policy.
        pub fn new<P: SurfacePlatform + ?Sized>(
                platform: &mut P,
                engine: E,
        ) -> Result<Self, BridgeError>
        {
                SurfaceHostBuilder::new().build(platform, engine)
        }

        pub fn configuration(&self) -> &DisplayConfiguration
        {
                &self.configuration
        }

        pub fn chrome(&self) -> &ChromePreferences
        {
                &self.chrome
        }

        /// Whether the platform accepted the chrome flags.
        pub fn chrome_applied(&self) -> bool
        {
                self.chrome_applied
        }

        pub fn resource_bundle(&self) -> &ResourceBundleHandle
        {
                self.bridge.resource_bundle()
        }

        pub fn bridge(&self) -> &SurfaceLifecycleBridge<E>
        {
                &self.bridge
        }

        pub fn bridge_mut(&mut self) -> &mut SurfaceLifecycleBridge<E>
        {
                &mut self.bridge
        }

        pub fn state(&self) -> BridgeState
        {
                self.bridge.state()
        }

        /// Holds frames back until the surface is recreated.
        pub fn suspend(&mut self)
        {
                self.bridge.suspend();
        }

        /// Drives the bridge to [`BridgeState::Destroyed`].
        pub fn teardown(&mut self)
        {
                self.bridge.teardown();
        }
}

impl<E: NativeEngine> SurfaceCallbacks for SurfaceHost<E>
{
        fn on_create(&mut self)
        {
                self.bridge.on_create();
        }

        fn on_resize(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                self.bridge.on_resize(width, height);
        }

        fn on_frame(&mut self)
        {
                self.bridge.on_frame();
        }
}

/// A builder for [`SurfaceHost`].
///
/// Nothing touches the platform until [`SurfaceHostBuilder::build`].
#[derive(Debug, Clone)]
pub struct SurfaceHostBuilder
{
        configuration: DisplayConfiguration,

        chrome: ChromePreferences,
}

impl Default for SurfaceHostBuilder
{
        fn default() -> Self
        {
                Self::new()
        }
}

impl SurfaceHostBuilder
{
        /// Starts from [`DisplayConfiguration::RGB8_DEPTH16`] and full
        /// immersive chrome.
        pub fn new() -> Self
        {
                Self {
                        configuration: DisplayConfiguration::RGB8_DEPTH16,
                        chrome: ChromePreferences::default(),
                }
        }

        pub fn with_chrome(
                mut self,
                chrome: ChromePreferences,
        ) -> Self
        {
                self.chrome = chrome;
                self
        }

        /// Requests something other than the default configuration.
        pub fn with_configuration(
                mut self,
                configuration: DisplayConfiguration,
        ) -> Self
        {
                self.configuration = configuration;
                self
        }

        /// Finally builds the [`SurfaceHost`].
        ///
        /// In order: the configuration is chosen, the chrome flags are
        /// applied, the resource bundle and display metrics are fetched, and
        /// the bridge is installed. No engine entry point is called.
        ///
        /// # Errors
        ///
        /// [`BridgeError::ConfigurationUnavailable`] if the platform cannot
        /// provide the configuration. No bridge exists in that case.
        pub fn build<E, P>(
                self,
                platform: &mut P,
                engine: E,
        ) -> Result<SurfaceHost<E>, BridgeError>
        where
                E: NativeEngine,
                P: SurfacePlatform + ?Sized,
        {
                platform.choose_configuration(&self.configuration)?;

                log::info!("Display configuration: {}", self.configuration);

                let chrome_applied = if self.chrome.is_empty()
                {
                        false
                }
                else
                {
                        match platform.apply_chrome(&self.chrome)
                        {
                                Ok(()) => true,
                                Err(e) =>
                                {
                                        log::warn!("{e}, continuing with default chrome.");
                                        false
                                }
                        }
                };

                let bundle = platform.resource_bundle();

                let metrics = platform.display_metrics();

                log::info!(
                        "Display metrics: {}x{}, resource bundle: {}",
                        metrics.width,
                        metrics.height,
                        bundle.label()
                );

                let bridge = SurfaceLifecycleBridge::new(engine, bundle, metrics);

                Ok(SurfaceHost {
                        configuration: self.configuration,
                        chrome: self.chrome,
                        chrome_applied,
                        bridge,
                })
        }
}
