//! Demo engine that clears the surface with a slowly pulsing color.
//!
//! It implements the engine boundary with wgpu so the binary runs the whole
//! surface lifecycle end to end. Every `init` throws away the GPU state of the
//! previous surface before building a new one.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use winit::window::Window;

use crate::display::DisplayConfiguration;
use crate::engine::NativeEngine;
use crate::renderer::formats;
use crate::renderer::texture::DepthTexture;
use crate::resource::ResourceBundleHandle;

/// Asset read from the resource bundle at `init`, if present.
pub const PALETTE_ASSET: &str = "palette.toml";

/// Two colors the clear color oscillates between.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette
{
        pub from: [f64; 3],
        pub to: [f64; 3],

        /// Seconds for a full back-and-forth.
        pub period: f64,
}

impl Default for Palette
{
        fn default() -> Self
        {
                Self {
                        from: [0.2, 0.2, 0.2],
                        to: [0.1, 0.2, 0.4],
                        period: 4.0,
                }
        }
}

impl Palette
{
        /// Loads the palette from the bundle, falling back to the default.
        pub fn from_bundle(bundle: &ResourceBundleHandle) -> Self
        {
                let bytes = match bundle.read_asset(PALETTE_ASSET)
                {
                        Ok(bytes) => bytes,
                        Err(e) =>
                        {
                                log::debug!("No {PALETTE_ASSET} in {}: {e}", bundle.label());
                                return Self::default();
                        }
                };

                toml::from_slice(&bytes).unwrap_or_else(|e| {
                        log::warn!("Invalid {PALETTE_ASSET}: {e}, using the default palette.");
                        Self::default()
                })
        }

        /// Clear color `seconds` after start.
        pub fn color_at(
                &self,
                seconds: f64,
        ) -> wgpu::Color
        {
                let t = if self.period > 0.0
                {
                        0.5 - 0.5 * (seconds * std::f64::consts::TAU / self.period).cos()
                }
                else
                {
                        0.0
                };

                let mix = |i: usize| self.from[i] + (self.to[i] - self.from[i]) * t;

                wgpu::Color {
                        r: mix(0),
                        g: mix(1),
                        b: mix(2),
                        a: 1.0,
                }
        }
}

/// GPU resources of one surface incarnation.
#[derive(Debug)]
struct GpuState
{
        surface: wgpu::Surface<'static>,
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface_configuration: wgpu::SurfaceConfiguration,
        depth: Option<DepthTexture>,

        /// Set by the first non-empty `resize`.
        is_surface_configured: bool,
}

impl GpuState
{
        async fn new(
                window: Arc<Window>,
                configuration: &DisplayConfiguration,
                width: u32,
                height: u32,
        ) -> anyhow::Result<Self>
        {
                let instance = super::instance();

                let surface = instance.create_surface(window)?;

                let adapter = instance
                        .request_adapter(&wgpu::RequestAdapterOptions {
                                power_preference: wgpu::PowerPreference::HighPerformance,
                                compatible_surface: Some(&surface),
                                force_fallback_adapter: false,
                        })
                        .await
                        .map_err(|e| anyhow::anyhow!(e))?;

                log::info!("Adapter Info: {:#?}", adapter.get_info());

                let (device, queue) = adapter
                        .request_device(&wgpu::DeviceDescriptor {
                                label: Some("clear_engine_device"),
                                required_features: wgpu::Features::empty(),
                                required_limits: formats::device_limits(
                                        configuration,
                                        &adapter.limits(),
                                ),
                                memory_hints: Default::default(),
                                trace: wgpu::Trace::Off,
                        })
                        .await?;

                let caps = surface.get_capabilities(&adapter);

                let format = formats::color_format(configuration, &caps.formats)
                        .context("surface lost its color format")?;

                let alpha_mode = formats::alpha_mode(configuration, &caps.alpha_modes)
                        .context("surface lost its alpha mode")?;

                let (width, height) = formats::surface_extent(width, height, &device.limits());

                let surface_configuration = wgpu::SurfaceConfiguration {
                        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                        format,
                        width,
                        height,
                        // One frame per display refresh.
                        present_mode: wgpu::PresentMode::Fifo,
                        alpha_mode,
                        view_formats: vec![],
                        desired_maximum_frame_latency: 2,
                };

                surface.configure(&device, &surface_configuration);

                let depth = formats::depth_format(configuration)
                        .map_err(|e| anyhow::anyhow!(e))?
                        .map(|f| DepthTexture::new(&device, &surface_configuration, f));

                Ok(Self {
                        surface,
                        device,
                        queue,
                        surface_configuration,
                        depth,
                        is_surface_configured: false,
                })
        }

        fn configure(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                let (width, height) = formats::surface_extent(width, height, &self.device.limits());

                self.surface_configuration.width = width;
                self.surface_configuration.height = height;

                self.surface
                        .configure(&self.device, &self.surface_configuration);

                if let Some(depth) = &self.depth
                {
                        self.depth = Some(DepthTexture::new(
                                &self.device,
                                &self.surface_configuration,
                                depth.format,
                        ));
                }

                self.is_surface_configured = true;
        }

        fn render(
                &mut self,
                color: wgpu::Color,
        ) -> anyhow::Result<()>
        {
                let output = match self.surface.get_current_texture()
                {
                        Ok(frame) => frame,
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
                        {
                                // Reconfigure and skip this frame.
                                let (width, height) = (
                                        self.surface_configuration.width,
                                        self.surface_configuration.height,
                                );
                                self.configure(width, height);
                                return Ok(());
                        }
                        Err(e) => return Err(e.into()),
                };

                let view = output
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder =
                        self.device
                                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                        label: Some("Clear Encoder"),
                                });

                {
                        let depth_stencil_attachment =
                                self.depth.as_ref().map(|depth| {
                                        wgpu::RenderPassDepthStencilAttachment {
                                                view: &depth.view,
                                                depth_ops: depth.has_depth().then_some(
                                                        wgpu::Operations {
                                                                load: wgpu::LoadOp::Clear(1.0),
                                                                store: wgpu::StoreOp::Store,
                                                        },
                                                ),
                                                stencil_ops: depth.has_stencil().then_some(
                                                        wgpu::Operations {
                                                                load: wgpu::LoadOp::Clear(0),
                                                                store: wgpu::StoreOp::Store,
                                                        },
                                                ),
                                        }
                                });

                        let _render_pass =
                                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                        label: Some("clear_pass"),
                                        color_attachments: &[Some(
                                                wgpu::RenderPassColorAttachment {
                                                        view: &view,
                                                        resolve_target: None,
                                                        ops: wgpu::Operations {
                                                                load: wgpu::LoadOp::Clear(color),
                                                                store: wgpu::StoreOp::Store,
                                                        },
                                                },
                                        )],
                                        depth_stencil_attachment,
                                        occlusion_query_set: None,
                                        timestamp_writes: None,
                                });
                }

                self.queue.submit(std::iter::once(encoder.finish()));

                output.present();

                Ok(())
        }
}

/// [`NativeEngine`] that only clears the surface.
#[derive(Debug)]
pub struct ClearEngine
{
        window: Arc<Window>,

        configuration: DisplayConfiguration,

        palette: Palette,

        gpu: Option<GpuState>,

        started: Option<instant::Instant>,
}

impl ClearEngine
{
        pub fn new(
                window: Arc<Window>,
                configuration: DisplayConfiguration,
        ) -> Self
        {
                Self {
                        window,
                        configuration,
                        palette: Palette::default(),
                        gpu: None,
                        started: None,
                }
        }

        pub fn palette(&self) -> &Palette
        {
                &self.palette
        }

        /// Drops the GPU state bound to the current native window.
        pub fn release(&mut self)
        {
                if self.gpu.take().is_some()
                {
                        log::info!("Releasing GPU state of the previous surface.");
                }
        }
}

impl NativeEngine for ClearEngine
{
        fn init(
                &mut self,
                width: u32,
                height: u32,
                bundle: ResourceBundleHandle,
        )
        {
                self.release();

                self.palette = Palette::from_bundle(&bundle);

                let state = GpuState::new(self.window.clone(), &self.configuration, width, height);

                match pollster::block_on(state)
                {
                        Ok(state) => self.gpu = Some(state),
                        Err(e) => log::error!("Unable to initialize the GPU: {e:#}"),
                }

                self.started = Some(instant::Instant::now());
        }

        fn resize(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                let Some(gpu) = self.gpu.as_mut()
                else
                {
                        return;
                };

                if width == 0 || height == 0
                {
                        // Minimized, nothing to present to.
                        gpu.is_surface_configured = false;
                        return;
                }

                gpu.configure(width, height);
        }

        fn step(&mut self)
        {
                let Some(gpu) = self.gpu.as_mut()
                else
                {
                        return;
                };

                if !gpu.is_surface_configured
                {
                        return;
                }

                let seconds = self
                        .started
                        .map(|s| s.elapsed().as_secs_f64())
                        .unwrap_or_default();

                if let Err(e) = gpu.render(self.palette.color_at(seconds))
                {
                        log::error!("Unable to render {}", e);
                }
        }
}
