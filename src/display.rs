use std::fmt;

/// Graphics-context configuration requested from the platform.
///
/// Chosen once when the [`crate::host::SurfaceHost`] is built and never
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayConfiguration
{
        pub red_bits: u8,
        pub green_bits: u8,
        pub blue_bits: u8,
        pub alpha_bits: u8,
        pub depth_bits: u8,
        pub stencil_bits: u8,

        /// Minimum context major version, e.g. `3` for OpenGL ES 3.
        pub context_version: u8,

        /// Accept any later version that stays compatible with
        /// `context_version`.
        pub backward_compatible: bool,
}

impl DisplayConfiguration
{
        /// RGB8 color, no alpha, 16-bit depth, no stencil, context version 3
        /// or anything backward compatible with it.
        pub const RGB8_DEPTH16: Self = Self {
                red_bits: 8,
                green_bits: 8,
                blue_bits: 8,
                alpha_bits: 0,
                depth_bits: 16,
                stencil_bits: 0,
                context_version: 3,
                backward_compatible: true,
        };

        pub fn has_alpha(&self) -> bool
        {
                self.alpha_bits > 0
        }

        pub fn has_depth(&self) -> bool
        {
                self.depth_bits > 0
        }

        pub fn has_stencil(&self) -> bool
        {
                self.stencil_bits > 0
        }

        /// Whether a context of `version` satisfies this request.
        pub fn accepts_version(
                &self,
                version: u8,
        ) -> bool
        {
                if self.backward_compatible
                {
                        version >= self.context_version
                }
                else
                {
                        version == self.context_version
                }
        }
}

impl Default for DisplayConfiguration
{
        fn default() -> Self
        {
                Self::RGB8_DEPTH16
        }
}

impl fmt::Display for DisplayConfiguration
{
        fn fmt(
                &self,
                f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result
        {
                write!(
                        f,
                        "rgb {}/{}/{}, alpha {}, depth {}, stencil {}, version {}{}",
                        self.red_bits,
                        self.green_bits,
                        self.blue_bits,
                        self.alpha_bits,
                        self.depth_bits,
                        self.stencil_bits,
                        self.context_version,
                        if self.backward_compatible { "+" } else { "" },
                )
        }
}

/// Size of the physical device display in pixels.
///
/// This is what the engine is initialized with, which is not necessarily the
/// size of the surface it ends up drawing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayMetrics
{
        pub width: u32,
        pub height: u32,
}

impl DisplayMetrics
{
        pub fn new(
                width: u32,
                height: u32,
        ) -> Self
        {
                Self {
                        width,
                        height,
                }
        }
}

impl From<winit::dpi::PhysicalSize<u32>> for DisplayMetrics
{
        fn from(size: winit::dpi::PhysicalSize<u32>) -> Self
        {
                Self::new(size.width, size.height)
        }
}

/// Current drawable size of the surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceGeometry
{
        pub width: u32,
        pub height: u32,
}

impl SurfaceGeometry
{
        pub fn new(
                width: u32,
                height: u32,
        ) -> Self
        {
                Self {
                        width,
                        height,
                }
        }

        pub fn is_empty(&self) -> bool
        {
                self.width == 0 || self.height == 0
        }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceGeometry
{
        fn from(size: winit::dpi::PhysicalSize<u32>) -> Self
        {
                Self::new(size.width, size.height)
        }
}

#[cfg(test)]
mod tests
{
        use super::*;

        #[test]
        fn default_policy_is_rgb8_depth16_es3()
        {
                let config = DisplayConfiguration::default();

                assert_eq!((config.red_bits, config.green_bits, config.blue_bits), (8, 8, 8));
                assert!(!config.has_alpha());
                assert_eq!(config.depth_bits, 16);
                assert!(!config.has_stencil());
                assert_eq!(config.context_version, 3);
                assert!(config.backward_compatible);
        }

        #[test]
        fn backward_compatible_accepts_newer_versions()
        {
                let config = DisplayConfiguration::RGB8_DEPTH16;

                assert!(!config.accepts_version(2));
                assert!(config.accepts_version(3));
                assert!(config.accepts_version(4));

                let strict = DisplayConfiguration {
                        backward_compatible: false,
                        ..config
                };

                assert!(strict.accepts_version(3));
                assert!(!strict.accepts_version(4));
        }

        #[test]
        fn display_format_is_compact()
        {
                assert_eq!(
                        DisplayConfiguration::RGB8_DEPTH16.to_string(),
                        "rgb 8/8/8, alpha 0, depth 16, stencil 0, version 3+"
                );
        }

        #[test]
        fn zero_sized_geometry_is_empty()
        {
                assert!(SurfaceGeometry::new(0, 600).is_empty());
                assert!(!SurfaceGeometry::new(800, 600).is_empty());
        }
}
