//! Platform glue.
//!
//! The winit event loop plays the surface driver: `resumed` becomes
//! `on_create`, `Resized` becomes `on_resize` and `RedrawRequested` becomes
//! `on_frame`, all delivered on the event loop thread.

pub mod platform_winit;

pub use platform_winit::{SurfaceDriver, SurfaceRunner, WinitPlatform};
