//! Engine boundary.
//!
//! The rendering engine is implemented elsewhere and is reached only through
//! the three entry points of [`NativeEngine`]. The bridge guarantees the call
//! order documented on each method; what the engine draws is its own concern.
//!
//! # Re-initialization
//!
//! `init` runs again every time the platform recreates the surface (for
//! example after the graphics context was lost while the app was in the
//! background). The bridge does not tell the engine to release what the
//! previous `init` allocated. Implementations must either be idempotently
//! re-initializable or free their previous native state at the start of
//! `init`, otherwise every context loss leaks.

use crate::resource::ResourceBundleHandle;

/// Entry points of the native rendering engine.
///
/// All three are infallible from the caller's perspective. An engine that
/// fails internally reports it through its own channels.
#[cfg_attr(test, mockall::automock)]
pub trait NativeEngine
{
        /// Called once per surface incarnation, before any `resize` or `step`.
        ///
        /// `width` and `height` are the device display metrics, not the size
        /// of the surface. The real surface size follows with the first
        /// `resize`.
        fn init(
                &mut self,
                width: u32,
                height: u32,
                bundle: ResourceBundleHandle,
        );

        /// Called on every surface geometry change after `init`.
        fn resize(
                &mut self,
                width: u32,
                height: u32,
        );

        /// Called once per requested frame after `init`.
        ///
        /// Renders with whatever geometry the engine last received.
        fn step(&mut self);
}

impl<E: NativeEngine + ?Sized> NativeEngine for Box<E>
{
        fn init(
                &mut self,
                width: u32,
                height: u32,
                bundle: ResourceBundleHandle,
        )
        {
                (**self).init(width, height, bundle)
        }

        fn resize(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                (**self).resize(width, height)
        }

        fn step(&mut self)
        {
                (**self).step()
        }
}
