//! End-to-end sequence export through the session.

use std::fs;
use std::sync::atomic::AtomicBool;

use simulacra::params::{DisplacementStrategy, HyperbolicDescriptor, Modulation, Parameters, Shape};
use simulacra::render::FrameRecorder;
use simulacra::session::Session;

fn animated_hyperbolic(strategy: DisplacementStrategy) -> Parameters {
    let mut params = Parameters {
        shape: Shape::Hyperbolic(HyperbolicDescriptor {
            width: 12,
            height: 12,
            resolution: 4.0,
            wave_range: (0.2, 0.8),
            amplify_range: (0.5, 2.0),
            ..HyperbolicDescriptor::default()
        }),
        ..Parameters::default()
    };
    let animation = &mut params.animation;
    animation.num_frames = 6;
    animation.frame_multiplier = 2;
    animation.animated = true;
    animation.modulation = Modulation::SineOfNoise;
    animation.scale_range = (0.05, 0.2);
    animation.radius_range = (0.3, 1.0);
    animation.strategy = strategy;
    for axis in [&mut animation.x, &mut animation.y, &mut animation.z] {
        axis.min = -5.0;
        axis.max = 5.0;
    }
    params
}

#[test]
fn test_sequence_frames_loop_seamlessly() {
    let dir = tempfile::tempdir().unwrap();
    for strategy in [DisplacementStrategy::Simplex, DisplacementStrategy::Brownian] {
        let mut params = animated_hyperbolic(strategy);
        params.export.directory = dir.path().join(strategy.name());
        let mut session = Session::new(params, dir.path().join("settings.json")).unwrap();

        let report = session.export_sequence(&AtomicBool::new(false)).unwrap();
        assert_eq!(report.frames_written, 12);
        assert!(!report.aborted);

        let out = dir.path().join(strategy.name());
        let first = fs::read_to_string(out.join("seq0000.obj")).unwrap();
        let middle = fs::read_to_string(out.join("seq0003.obj")).unwrap();
        let looped = fs::read_to_string(out.join("seq0006.obj")).unwrap();
        assert_ne!(first, middle);
        assert_eq!(first, looped);
        // Eleven strips, each pairing two columns of twelve rows
        assert_eq!(first.lines().filter(|l| l.starts_with("v ")).count(), 11 * 24);
    }
}

#[test]
fn test_sequence_starts_at_the_current_tick() {
    let dir = tempfile::tempdir().unwrap();
    let mut params = animated_hyperbolic(DisplacementStrategy::Simplex);
    params.animation.frame_multiplier = 1;
    params.export.directory = dir.path().join("live");
    let mut session = Session::new(params.clone(), dir.path().join("settings.json")).unwrap();
    let mut recorder = FrameRecorder::new();
    for _ in 0..2 {
        session.frame(&mut recorder).unwrap();
    }
    session.export_sequence(&AtomicBool::new(false)).unwrap();

    params.export.directory = dir.path().join("fresh");
    let mut fresh = Session::new(params, dir.path().join("settings.json")).unwrap();
    fresh.export_sequence(&AtomicBool::new(false)).unwrap();

    // Tick 2 of the live session matches frame 2 of a fresh export
    let live = fs::read_to_string(dir.path().join("live/seq0000.obj")).unwrap();
    let fresh = fs::read_to_string(dir.path().join("fresh/seq0002.obj")).unwrap();
    assert_eq!(live, fresh);
}

#[test]
fn test_abort_before_start_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut params = animated_hyperbolic(DisplacementStrategy::Ripple);
    params.export.directory = dir.path().join("out");
    let mut session = Session::new(params, dir.path().join("settings.json")).unwrap();

    let report = session.export_sequence(&AtomicBool::new(true)).unwrap();
    assert!(report.aborted);
    assert_eq!(report.frames_written, 0);
    assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
}
