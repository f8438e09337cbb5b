//! Surface lifecycle bridge.
//!
//! Turns the platform's surface notifications into the engine's
//! `init`/`resize`/`step` sequence:
//!
//! ```text
//!  Uninitialized --on_create--> Ready --on_resize--> Active
//!                                 |  ^                 |  ^
//!                        on_frame |  | on_create       |  | on_resize, on_frame
//!                                 v  |                 v  |
//!                               Ready <-- on_create -- Active
//!
//!  any state --teardown--> Destroyed
//! ```
//!
//! Every transition makes exactly one engine call. Callbacks that would break
//! the `init`-first ordering, or that arrive after teardown, make none. While
//! the surface is suspended, `resize` and `step` wait for the next
//! `on_create`.

use crate::display::{DisplayMetrics, SurfaceGeometry};
use crate::engine::NativeEngine;
use crate::resource::ResourceBundleHandle;

/// The three notifications a surface driver delivers.
///
/// The driver calls them serially from its rendering thread, never
/// concurrently and never re-entrantly.
pub trait SurfaceCallbacks
{
        /// The surface and its graphics context were (re)created.
        fn on_create(&mut self);

        /// The surface now measures `width` x `height` device pixels.
        fn on_resize(
                &mut self,
                width: u32,
                height: u32,
        );

        /// The display wants a new frame.
        fn on_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState
{
        /// No surface yet, the engine has not been initialized.
        Uninitialized,
        /// `init` was issued for the current surface, no geometry yet.
        Ready,
        /// At least one `resize` was issued since the last `init`.
        Active,
        /// The surface is gone. Terminal.
        Destroyed,
}

impl BridgeState
{
        /// Whether `resize` and `step` may reach the engine.
        pub fn is_initialized(&self) -> bool
        {
                matches!(self, Self::Ready | Self::Active)
        }
}

/// Counters of what the bridge dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeStats
{
        pub inits: u64,
        pub resizes: u64,
        pub steps: u64,

        /// Callbacks not forwarded because the engine was not initialized or
        /// the bridge was already destroyed.
        pub dropped: u64,

        /// Number of the current surface incarnation, `0` before the first
        /// `on_create`.
        pub incarnation: u32,
}

/// Forwards surface lifecycle callbacks to a [`NativeEngine`].
pub struct SurfaceLifecycleBridge<E: NativeEngine>
{
        engine: E,

        bundle: ResourceBundleHandle,

        metrics: DisplayMetrics,

        geometry: Option<SurfaceGeometry>,

        state: BridgeState,

        /// The native window went away; cleared by the next `on_create`.
        suspended: bool,

        stats: BridgeStats,
}

impl<E: NativeEngine> SurfaceLifecycleBridge<E>
{
        /// Creates a bridge in the [`BridgeState::Uninitialized`] state.
        ///
        /// Nothing is called on `engine` until the first
        /// [`SurfaceCallbacks::on_create`].
        pub fn new(
                engine: E,
                bundle: ResourceBundleHandle,
                metrics: DisplayMetrics,
        ) -> Self
        {
                Self {
                        engine,
                        bundle,
                        metrics,
                        geometry: None,
                        state: BridgeState::Uninitialized,
                        suspended: false,
                        stats: BridgeStats::default(),
                }
        }

        pub fn state(&self) -> BridgeState
        {
                self.state
        }

        pub fn stats(&self) -> BridgeStats
        {
                self.stats
        }

        /// Whether the surface was suspended and not recreated yet.
        pub fn is_suspended(&self) -> bool
        {
                self.suspended
        }

        /// Size of the surface from the most recent `on_resize`.
        pub fn geometry(&self) -> Option<SurfaceGeometry>
        {
                self.geometry
        }

        pub fn display_metrics(&self) -> DisplayMetrics
        {
                self.metrics
        }

        pub fn resource_bundle(&self) -> &ResourceBundleHandle
        {
                &self.bundle
        }

        pub fn engine(&self) -> &E
        {
                &self.engine
        }

        pub fn engine_mut(&mut self) -> &mut E
        {
                &mut self.engine
        }

        /// Replaces the display metrics used by subsequent `on_create` calls.
        ///
        /// Does not call the engine. An already initialized engine keeps the
        /// sizing it got until the surface is recreated.
        pub fn update_display_metrics(
                &mut self,
                metrics: DisplayMetrics,
        )
        {
                if metrics != self.metrics
                {
                        log::debug!(
                                "Display metrics changed: {}x{} -> {}x{}",
                                self.metrics.width,
                                self.metrics.height,
                                metrics.width,
                                metrics.height
                        );
                }

                self.metrics = metrics;
        }

        /// Marks the native window as temporarily gone.
        ///
        /// `resize` and `step` are held back until the next
        /// [`SurfaceCallbacks::on_create`] re-initializes the engine. Does
        /// not call the engine.
        pub fn suspend(&mut self)
        {
                if !self.state.is_initialized() || self.suspended
                {
                        return;
                }

                log::info!("Surface suspended, holding frames until it is recreated.");

                self.suspended = true;
        }

        /// Marks the surface as gone. Nothing reaches the engine afterwards.
        pub fn teardown(&mut self)
        {
                if self.state == BridgeState::Destroyed
                {
                        return;
                }

                log::info!(
                        "Surface destroyed after {} init(s), {} resize(s), {} step(s).",
                        self.stats.inits,
                        self.stats.resizes,
                        self.stats.steps
                );

                self.state = BridgeState::Destroyed;
        }

        /// Consumes the bridge and hands the engine back.
        pub fn into_engine(self) -> E
        {
                self.engine
        }

        fn drop_callback(
                &mut self,
                callback: &str,
        )
        {
                self.stats.dropped += 1;

                match self.state
                {
                        BridgeState::Destroyed =>
                        {
                                log::debug!("Ignoring {callback} on a destroyed surface.");
                        }
                        _ if self.suspended =>
                        {
                                log::debug!("Ignoring {callback} on a suspended surface.");
                        }
                        _ =>
                        {
                                log::warn!("Ignoring {callback} before the surface was created.");
                        }
                }
        }
}

impl<E: NativeEngine> SurfaceCallbacks for SurfaceLifecycleBridge<E>
{
        fn on_create(&mut self)
        {
                if self.state == BridgeState::Destroyed
                {
                        self.drop_callback("on_create");
                        return;
                }

                if self.state.is_initialized()
                {
                        log::info!("Surface recreated, re-initializing the engine.");
                }

                self.suspended = false;
                self.stats.incarnation += 1;
                self.stats.inits += 1;

                // Sized from the device display, not from the surface.
                let DisplayMetrics {
                        width,
                        height,
                } = self.metrics;

                log::info!(
                        "Engine init #{}: {}x{} with bundle {}",
                        self.stats.incarnation,
                        width,
                        height,
                        self.bundle.label()
                );

                self.engine.init(width, height, self.bundle.clone());

                self.state = BridgeState::Ready;
        }

        fn on_resize(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                if !self.state.is_initialized() || self.suspended
                {
                        self.drop_callback("on_resize");
                        return;
                }

                let geometry = SurfaceGeometry::new(width, height);

                if geometry.is_empty()
                {
                        log::debug!("Surface resized to an empty area: {width}x{height}");
                }

                self.geometry = Some(geometry);
                self.stats.resizes += 1;

                log::debug!("Engine resize: {width}x{height}");

                self.engine.resize(width, height);

                self.state = BridgeState::Active;
        }

        fn on_frame(&mut self)
        {
                if !self.state.is_initialized() || self.suspended
                {
                        self.drop_callback("on_frame");
                        return;
                }

                let start = instant::Instant::now();

                self.engine.step();

                self.stats.steps += 1;

                let duration = start.elapsed();

                log::trace!(
                        "Frame {} took: {:.2} ms",
                        self.stats.steps,
                        duration.as_secs_f64() * 1000.0
                );
        }
}

impl<E: NativeEngine> std::fmt::Debug for SurfaceLifecycleBridge<E>
{
        fn fmt(
                &self,
                f: &mut std::fmt::Formatter<'_>,
        ) -> std::fmt::Result
        {
                f.debug_struct("SurfaceLifecycleBridge")
                        .field("state", &self.state)
                        .field("suspended", &self.suspended)
                        .field("metrics", &self.metrics)
                        .field("geometry", &self.geometry)
                        .field("bundle", &self.bundle)
                        .field("stats", &self.stats)
                        .finish_non_exhaustive()
        }
}
