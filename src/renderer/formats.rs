//! Mapping of a [`DisplayConfiguration`] onto wgpu formats.
//!
//! Color channels must match exactly. Depth and stencil are satisfied by any
//! format with at least the requested precision. A request without alpha
//! needs an opaque composite mode.

use wgpu::{CompositeAlphaMode, TextureFormat};

use crate::display::DisplayConfiguration;

const RGBA8_FORMATS: &[TextureFormat] = &[
        TextureFormat::Bgra8UnormSrgb,
        TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Bgra8Unorm,
        TextureFormat::Rgba8Unorm,
];

/// Picks the surface color format for `config` out of `available`.
///
/// sRGB formats win, otherwise the platform's order is kept.
pub fn color_format(
        config: &DisplayConfiguration,
        available: &[TextureFormat],
) -> Option<TextureFormat>
{
        let candidates: &[TextureFormat] = match (
                config.red_bits,
                config.green_bits,
                config.blue_bits,
                config.alpha_bits,
        )
        {
                (8, 8, 8, 0 | 8) => RGBA8_FORMATS,
                (10, 10, 10, 0..=2) => &[TextureFormat::Rgb10a2Unorm],
                (16, 16, 16, 0 | 16) => &[TextureFormat::Rgba16Float],
                _ => return None,
        };

        let mut matching = available.iter().copied().filter(|f| candidates.contains(f));

        let first = matching.clone().next()?;

        Some(matching.find(|f| f.is_srgb()).unwrap_or(first))
}

/// Composite alpha mode that honors the requested alpha bits.
pub fn alpha_mode(
        config: &DisplayConfiguration,
        available: &[CompositeAlphaMode],
) -> Option<CompositeAlphaMode>
{
        if !config.has_alpha()
        {
                return available
                        .iter()
                        .copied()
                        .find(|m| *m == CompositeAlphaMode::Opaque);
        }

        available.iter().copied().find(|m| {
                matches!(
                        m,
                        CompositeAlphaMode::PreMultiplied
                                | CompositeAlphaMode::PostMultiplied
                                | CompositeAlphaMode::Inherit
                )
        })
}

/// Smallest depth/stencil format covering the request.
///
/// `Ok(None)` means no depth buffer was asked for. `Err` carries the reason
/// the request cannot be expressed at all.
pub fn depth_format(config: &DisplayConfiguration) -> Result<Option<TextureFormat>, String>
{
        let format = match (config.depth_bits, config.stencil_bits)
        {
                (0, 0) => return Ok(None),
                (0, 1..=8) => TextureFormat::Stencil8,
                (1..=16, 0) => TextureFormat::Depth16Unorm,
                (17..=24, 0) => TextureFormat::Depth24Plus,
                (25..=32, 0) => TextureFormat::Depth32Float,
                (1..=24, 1..=8) => TextureFormat::Depth24PlusStencil8,
                (25..=32, 1..=8) => TextureFormat::Depth32FloatStencil8,
                (depth, stencil) =>
                {
                        return Err(format!(
                                "no format with {depth} depth and {stencil} stencil bits"
                        ));
                }
        };

        Ok(Some(format))
}

/// Device limits a context of the requested version must provide.
///
/// Version 3 and below maps to the GLES 3 / WebGL 2 baseline.
pub fn required_limits(config: &DisplayConfiguration) -> wgpu::Limits
{
        if config.context_version <= 3
        {
                wgpu::Limits::downlevel_webgl2_defaults()
        }
        else
        {
                wgpu::Limits::downlevel_defaults()
        }
}

/// Limits to request from the device: the version baseline, with the texture
/// resolution the adapter actually supports.
///
/// The baseline alone caps 2D textures at 2048 pixels, smaller than many
/// phone and desktop displays.
pub fn device_limits(
        config: &DisplayConfiguration,
        adapter: &wgpu::Limits,
) -> wgpu::Limits
{
        required_limits(config).using_resolution(adapter.clone())
}

/// Surface size for `width` x `height` that the device can allocate.
pub fn surface_extent(
        width: u32,
        height: u32,
        limits: &wgpu::Limits,
) -> (u32, u32)
{
        let max_dim = limits.max_texture_dimension_2d.max(1);

        (width.clamp(1, max_dim), height.clamp(1, max_dim))
}
