//! Lifecycle ordering tests against a recording engine and an in-memory
//! platform.

use std::sync::{Arc, Mutex};

use surface_bridge::{
        BridgeError, BridgeState, ChromePreferences, DisplayConfiguration, DisplayMetrics,
        NativeEngine, ResourceBundleHandle, SurfaceCallbacks, SurfaceHost, SurfaceHostBuilder,
        SurfacePlatform,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call
{
        Init(u32, u32, String),
        Resize(u32, u32),
        Step,
}

/// Engine that appends every call to a shared log.
#[derive(Debug, Clone, Default)]
struct RecordingEngine
{
        calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingEngine
{
        fn calls(&self) -> Vec<Call>
        {
                self.calls.lock().unwrap().clone()
        }
}

impl NativeEngine for RecordingEngine
{
        fn init(
                &mut self,
                width: u32,
                height: u32,
                bundle: ResourceBundleHandle,
        )
        {
                self.calls
                        .lock()
                        .unwrap()
                        .push(Call::Init(width, height, bundle.label().to_string()));
        }

        fn resize(
                &mut self,
                width: u32,
                height: u32,
        )
        {
                self.calls.lock().unwrap().push(Call::Resize(width, height));
        }

        fn step(&mut self)
        {
                self.calls.lock().unwrap().push(Call::Step);
        }
}

struct TestPlatform
{
        metrics: DisplayMetrics,
        supported: Vec<DisplayConfiguration>,
        chrome_supported: bool,
        bundle: ResourceBundleHandle,
}

impl TestPlatform
{
        fn phone() -> Self
        {
                Self {
                        metrics: DisplayMetrics::new(1080, 1920),
                        supported: vec![DisplayConfiguration::RGB8_DEPTH16],
                        chrome_supported: true,
                        bundle: ResourceBundleHandle::new("apk-assets", ()),
                }
        }
}

impl SurfacePlatform for TestPlatform
{
        fn choose_configuration(
                &mut self,
                requested: &DisplayConfiguration,
        ) -> Result<(), BridgeError>
        {
                if self.supported.contains(requested)
                {
                        Ok(())
                }
                else
                {
                        Err(BridgeError::configuration_unavailable(
                                *requested,
                                "no EGL config matches",
                        ))
                }
        }

        fn apply_chrome(
                &mut self,
                _chrome: &ChromePreferences,
        ) -> Result<(), BridgeError>
        {
                if self.chrome_supported
                {
                        Ok(())
                }
                else
                {
                        Err(BridgeError::chrome_unsupported("immersive mode unavailable"))
                }
        }

        fn resource_bundle(&self) -> ResourceBundleHandle
        {
                self.bundle.clone()
        }

        fn display_metrics(&self) -> DisplayMetrics
        {
                self.metrics
        }
}

fn host(engine: &RecordingEngine) -> SurfaceHost<RecordingEngine>
{
        SurfaceHost::new(&mut TestPlatform::phone(), engine.clone()).unwrap()
}

fn init_call() -> Call
{
        Call::Init(1080, 1920, "apk-assets".to_string())
}

/// Checks the init-first rule over a recorded call sequence.
fn assert_init_precedes_everything(calls: &[Call])
{
        let first_init = calls
                .iter()
                .position(|c| matches!(c, Call::Init(..)))
                .expect("resize/step without any init");

        assert!(
                calls[..first_init]
                        .iter()
                        .all(|c| matches!(c, Call::Init(..))),
                "engine called before init: {calls:?}"
        );
}

#[test]
fn phone_scenario()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        assert!(engine.calls().is_empty(), "construction must not call the engine");

        host.on_create();
        host.on_resize(800, 600);
        host.on_frame();
        host.on_frame();
        host.on_frame();
        host.on_resize(1200, 800);

        assert_eq!(
                engine.calls(),
                vec![
                        init_call(),
                        Call::Resize(800, 600),
                        Call::Step,
                        Call::Step,
                        Call::Step,
                        Call::Resize(1200, 800),
                ]
        );
        assert_eq!(host.state(), BridgeState::Active);
}

#[test]
fn init_uses_display_size_not_surface_size()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_create();
        host.on_resize(720, 1280);

        assert_eq!(engine.calls()[0], init_call());
        assert_eq!(engine.calls()[1], Call::Resize(720, 1280));
}

#[test]
fn double_create_yields_two_inits_before_anything_else()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_create();
        host.on_create();
        host.on_frame();
        host.on_resize(800, 600);

        assert_eq!(
                engine.calls(),
                vec![init_call(), init_call(), Call::Step, Call::Resize(800, 600)]
        );
        assert_eq!(host.bridge().stats().incarnation, 2);
}

#[test]
fn context_loss_reinitializes_after_active()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_create();
        host.on_resize(800, 600);
        host.on_frame();

        host.on_create();
        host.on_resize(800, 600);
        host.on_frame();

        let calls = engine.calls();
        let inits = calls.iter().filter(|c| matches!(c, Call::Init(..))).count();

        assert_eq!(inits, 2);
        assert_eq!(calls[3], init_call());
        assert_init_precedes_everything(&calls);
}

#[test]
fn resizes_are_forwarded_in_order_without_coalescing()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        let sizes: Vec<(u32, u32)> = (1..=50)
                .map(|i| (i * 10, i * 7))
                .chain([(500, 350); 5])
                .collect();

        host.on_create();

        for (w, h) in &sizes
        {
                host.on_resize(*w, *h);
        }

        let resizes: Vec<(u32, u32)> = engine
                .calls()
                .into_iter()
                .filter_map(|c| match c
                {
                        Call::Resize(w, h) => Some((w, h)),
                        _ => None,
                })
                .collect();

        assert_eq!(resizes, sizes);
}

#[test]
fn frames_map_one_to_one_to_steps()
{
        for n in [0usize, 1, 2, 60, 240]
        {
                let engine = RecordingEngine::default();
                let mut host = host(&engine);

                host.on_create();
                host.on_resize(800, 600);

                for _ in 0..n
                {
                        host.on_frame();
                }

                let steps = engine.calls().iter().filter(|c| **c == Call::Step).count();

                assert_eq!(steps, n);
                assert_eq!(host.bridge().stats().steps, n as u64);
        }
}

#[test]
fn callbacks_before_create_never_reach_the_engine()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_frame();
        host.on_resize(800, 600);

        assert!(engine.calls().is_empty());

        host.on_create();
        host.on_frame();

        assert_eq!(engine.calls(), vec![init_call(), Call::Step]);
        assert_eq!(host.bridge().stats().dropped, 2);
}

#[test]
fn interleaved_sequences_keep_init_first()
{
        // Deterministic pseudo-random driver sequences.
        let mut seed = 0x2545_f491_u32;

        for _ in 0..32
        {
                let engine = RecordingEngine::default();
                let mut host = host(&engine);

                for _ in 0..64
                {
                        seed ^= seed << 13;
                        seed ^= seed >> 17;
                        seed ^= seed << 5;

                        match seed % 4
                        {
                                0 => host.on_create(),
                                1 => host.on_resize(seed % 2000, (seed >> 8) % 2000),
                                _ => host.on_frame(),
                        }
                }

                let calls = engine.calls();

                if calls.iter().any(|c| !matches!(c, Call::Init(..)))
                {
                        assert_init_precedes_everything(&calls);
                }
        }
}

#[test]
fn teardown_stops_all_dispatch()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_create();
        host.on_resize(800, 600);
        host.teardown();

        host.on_create();
        host.on_resize(1, 1);
        host.on_frame();

        assert_eq!(engine.calls(), vec![init_call(), Call::Resize(800, 600)]);
        assert_eq!(host.state(), BridgeState::Destroyed);
}

#[test]
fn suspended_surface_reaches_the_engine_only_after_recreate()
{
        let engine = RecordingEngine::default();
        let mut host = host(&engine);

        host.on_create();
        host.on_resize(1080, 2400);
        host.on_frame();

        host.suspend();
        host.on_frame();
        host.on_frame();

        host.on_create();
        host.on_resize(1080, 2400);
        host.on_frame();

        assert_eq!(
                engine.calls(),
                vec![
                        init_call(),
                        Call::Resize(1080, 2400),
                        Call::Step,
                        init_call(),
                        Call::Resize(1080, 2400),
                        Call::Step,
                ]
        );
        assert_eq!(host.bridge().stats().dropped, 2);
}

#[test]
fn unavailable_configuration_installs_no_bridge()
{
        let engine = RecordingEngine::default();
        let mut platform = TestPlatform {
                supported: vec![],
                ..TestPlatform::phone()
        };

        let result = SurfaceHost::new(&mut platform, engine.clone());

        match result
        {
                Err(BridgeError::ConfigurationUnavailable {
                        requested,
                        ..
                }) => assert_eq!(requested, DisplayConfiguration::RGB8_DEPTH16),
                other => panic!("expected ConfigurationUnavailable, got {other:?}"),
        }

        assert!(engine.calls().is_empty());
}

#[test]
fn configuration_is_not_downgraded()
{
        let stencil = DisplayConfiguration {
                stencil_bits: 8,
                ..DisplayConfiguration::RGB8_DEPTH16
        };

        let result = SurfaceHostBuilder::new()
                .with_configuration(stencil)
                .build(&mut TestPlatform::phone(), RecordingEngine::default());

        assert!(matches!(
                result,
                Err(BridgeError::ConfigurationUnavailable { .. })
        ));
}

#[test]
fn chrome_failure_still_creates_the_surface()
{
        let engine = RecordingEngine::default();
        let mut platform = TestPlatform {
                chrome_supported: false,
                ..TestPlatform::phone()
        };

        let mut host = SurfaceHost::new(&mut platform, engine.clone()).unwrap();

        assert!(!host.chrome_applied());

        host.on_create();

        assert_eq!(engine.calls(), vec![init_call()]);
}

#[test]
fn bundle_is_shared_not_copied()
{
        let mut platform = TestPlatform::phone();
        let bundle = platform.bundle.clone();

        let host = SurfaceHost::new(&mut platform, RecordingEngine::default()).unwrap();

        assert!(host.resource_bundle().same_store(&bundle));
}
