use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::bridge::SurfaceCallbacks;
use crate::config::{ChromePreferences, Settings};
use crate::display::{DisplayConfiguration, DisplayMetrics};
use crate::error::BridgeError;
use crate::host::{SurfaceHost, SurfaceHostBuilder, SurfacePlatform};
use crate::renderer::clear::ClearEngine;
use crate::renderer::formats;
use crate::resource::ResourceBundleHandle;

#[cfg(not(target_os = "android"))]
use crate::resource::AssetDirectory;

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

#[cfg(target_os = "android")]
use crate::resource::AndroidAssets;

/// [`SurfacePlatform`] backed by a winit window and wgpu.
pub struct WinitPlatform
{
        window: Arc<Window>,

        bundle: ResourceBundleHandle,
}

impl WinitPlatform
{
        pub fn new(
                window: Arc<Window>,
                bundle: ResourceBundleHandle,
        ) -> Self
        {
                Self {
                        window,
                        bundle,
                }
        }

        /// Display size of the monitor the window is on, or the window size
        /// when the platform reports no monitor.
        pub fn metrics_of(window: &Window) -> DisplayMetrics
        {
                window.current_monitor()
                        .map(|monitor| monitor.size())
                        .unwrap_or_else(|| window.inner_size())
                        .into()
        }

        async fn probe(
                &self,
                requested: &DisplayConfiguration,
        ) -> Result<(), String>
        {
                let instance = crate::renderer::instance();

                let surface = instance
                        .create_surface(self.window.clone())
                        .map_err(|e| e.to_string())?;

                let adapter = instance
                        .request_adapter(&wgpu::RequestAdapterOptions {
                                power_preference: wgpu::PowerPreference::HighPerformance,
                                compatible_surface: Some(&surface),
                                force_fallback_adapter: false,
                        })
                        .await
                        .map_err(|e| e.to_string())?;

                let caps = surface.get_capabilities(&adapter);

                let color = formats::color_format(requested, &caps.formats).ok_or_else(|| {
                        format!("no surface format among {:?}", caps.formats)
                })?;

                formats::alpha_mode(requested, &caps.alpha_modes).ok_or_else(|| {
                        format!("no matching alpha mode among {:?}", caps.alpha_modes)
                })?;

                if let Some(depth) = formats::depth_format(requested)?
                {
                        let features = adapter.get_texture_format_features(depth);

                        if !adapter.features().contains(depth.required_features())
                                || !features
                                        .allowed_usages
                                        .contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
                        {
                                return Err(format!("{depth:?} is not renderable"));
                        }
                }

                if !formats::required_limits(requested).check_limits(&adapter.limits())
                {
                        return Err(format!(
                                "{:?} adapter is below context version {}",
                                adapter.get_info().backend,
                                requested.context_version
                        ));
                }

                log::info!(
                        "Surface supports {color:?} on {:?}",
                        adapter.get_info().backend
                );

                Ok(())
        }
}

impl SurfacePlatform for WinitPlatform
{
        fn choose_configuration(
                &mut self,
                requested: &DisplayConfiguration,
        ) -> Result<(), BridgeError>
        {
                pollster::block_on(self.probe(requested))
                        .map_err(|reason| BridgeError::configuration_unavailable(*requested, reason))
        }

        fn apply_chrome(
                &mut self,
                chrome: &ChromePreferences,
        ) -> Result<(), BridgeError>
        {
                if chrome.wants_fullscreen()
                {
                        if self.window.current_monitor().is_none()
                        {
                                return Err(BridgeError::chrome_unsupported(
                                        "no monitor to go fullscreen on",
                                ));
                        }

                        self.window
                                .set_fullscreen(Some(Fullscreen::Borderless(None)));
                }

                if chrome.hide_navigation
                {
                        log::debug!("Navigation bar visibility is left to the platform.");
                }

                Ok(())
        }

        fn resource_bundle(&self) -> ResourceBundleHandle
        {
                self.bundle.clone()
        }

        fn display_metrics(&self) -> DisplayMetrics
        {
                Self::metrics_of(&self.window)
        }
}

/// Surface driver: turns winit events into lifecycle callbacks.
pub struct SurfaceDriver
{
        settings: Settings,

        bundle: ResourceBundleHandle,

        window: Option<Arc<Window>>,

        host: Option<SurfaceHost<ClearEngine>>,

        /// Set when the host could not be built.
        error: Option<BridgeError>,
}

impl SurfaceDriver
{
        pub fn new(
                settings: Settings,
                bundle: ResourceBundleHandle,
        ) -> Self
        {
                Self {
                        settings,
                        bundle,
                        window: None,
                        host: None,
                        error: None,
                }
        }

        pub fn host(&self) -> Option<&SurfaceHost<ClearEngine>>
        {
                self.host.as_ref()
        }

        pub fn error(&self) -> Option<&BridgeError>
        {
                self.error.as_ref()
        }

        fn create_window(
                &mut self,
                event_loop: &ActiveEventLoop,
        ) -> anyhow::Result<Arc<Window>>
        {
                if let Some(window) = &self.window
                {
                        return Ok(window.clone());
                }

                let attributes = Window::default_attributes().with_title(&self.settings.window.title);

                let window = Arc::new(event_loop.create_window(attributes)?);

                log::info!("Created window with ID: {:?}", window.id());

                self.window = Some(window.clone());

                Ok(window)
        }

        fn build_host(
                &mut self,
                window: Arc<Window>,
        ) -> Result<SurfaceHost<ClearEngine>, BridgeError>
        {
                let configuration = DisplayConfiguration::default();

                let mut platform = WinitPlatform::new(window.clone(), self.bundle.clone());

                SurfaceHostBuilder::new()
                        .with_configuration(configuration)
                        .with_chrome(self.settings.chrome)
                        .build(&mut platform, ClearEngine::new(window, configuration))
        }
}

impl ApplicationHandler for SurfaceDriver
{
        fn resumed(
                &mut self,
                event_loop: &ActiveEventLoop,
        )
        {
                // Android only hands out a native window once resumed, and takes
                // it away again on suspend. Every resume is a new surface.
                let window = match self.create_window(event_loop)
                {
                        Ok(window) => window,
                        Err(e) =>
                        {
                                log::error!("Failed to create window: {e:#}");
                                event_loop.exit();
                                return;
                        }
                };

                if self.host.is_none()
                {
                        match self.build_host(window.clone())
                        {
                                Ok(host) => self.host = Some(host),
                                Err(e) =>
                                {
                                        log::error!("{e}");
                                        self.error = Some(e);
                                        event_loop.exit();
                                        return;
                                }
                        }
                }

                let Some(host) = self.host.as_mut()
                else
                {
                        return;
                };

                host.bridge_mut()
                        .update_display_metrics(WinitPlatform::metrics_of(&window));

                host.on_create();

                let size = window.inner_size();

                host.on_resize(size.width, size.height);

                window.request_redraw();
        }

        fn suspended(
                &mut self,
                _event_loop: &ActiveEventLoop,
        )
        {
                let Some(host) = self.host.as_mut()
                else
                {
                        return;
                };

                // The surface must not outlive the native window on Android.
                host.suspend();
                host.bridge_mut().engine_mut().release();
        }

        fn window_event(
                &mut self,
                event_loop: &ActiveEventLoop,
                _window_id: WindowId,
                event: WindowEvent,
        )
        {
                let Some(host) = self.host.as_mut()
                else
                {
                        return;
                };

                match event
                {
                        WindowEvent::CloseRequested =>
                        {
                                log::info!("The close button was pressed; stopping");
                                host.teardown();
                                event_loop.exit();
                        }
                        WindowEvent::Resized(size) =>
                        {
                                host.on_resize(size.width, size.height);
                        }
                        WindowEvent::RedrawRequested =>
                        {
                                host.on_frame();

                                if let Some(window) = &self.window
                                {
                                        window.request_redraw();
                                }
                        }
                        _ => (),
                }
        }

        fn exiting(
                &mut self,
                _event_loop: &ActiveEventLoop,
        )
        {
                if let Some(host) = self.host.as_mut()
                {
                        host.teardown();
                }
        }
}

/// Runner for the [`SurfaceDriver`].
pub struct SurfaceRunner
{
        pub driver: SurfaceDriver,

        pub event_loop: EventLoop<()>,
}

impl SurfaceRunner
{
        /// Desktop runner, the bundle is the configured asset directory.
        #[cfg(not(target_os = "android"))]
        pub fn new(settings: Settings) -> anyhow::Result<Self>
        {
                let event_loop = EventLoop::new()?;

                let bundle = AssetDirectory::new(&settings.assets.directory).into_handle();

                Ok(Self {
                        driver: SurfaceDriver::new(settings, bundle),
                        event_loop,
                })
        }

        /// Android runner, the bundle is the activity's asset manager.
        #[cfg(target_os = "android")]
        pub fn new(
                settings: Settings,
                app: AndroidApp,
        ) -> anyhow::Result<Self>
        {
                use winit::platform::android::EventLoopBuilderExtAndroid;

                let event_loop = EventLoop::builder()
                        .with_android_app(app.clone())
                        .build()?;

                let bundle = AndroidAssets(app).into_handle();

                Ok(Self {
                        driver: SurfaceDriver::new(settings, bundle),
                        event_loop,
                })
        }

        /// Runs the event loop until the surface goes away.
        ///
        /// # Errors
        ///
        /// Fails if the event loop fails or the surface host could not be
        /// built, e.g. with [`BridgeError::ConfigurationUnavailable`].
        pub fn run(mut self) -> anyhow::Result<()>
        {
                self.event_loop.run_app(&mut self.driver)?;

                if let Some(e) = self.driver.error.take()
                {
                        return Err(e.into());
                }

                Ok(())
        }
}
