use std::f32::consts::FRAC_PI_2;

use rand::Rng;
use village_viewer::{
    camera::{CameraAction, CameraController, Projection},
    config::CameraConfig,
};

use crate::common::test_utils::{assert_close, seeded_rng};

mod common;

const ALL_ACTIONS: [CameraAction; 6] = [
    CameraAction::TiltUp,
    CameraAction::TiltDown,
    CameraAction::RotateLeft,
    CameraAction::RotateRight,
    CameraAction::ZoomIn,
    CameraAction::ZoomOut,
];

#[test]
fn should_start_at_configured_orbit() {
    let config = CameraConfig::default();
    let camera = CameraController::new(&config);
    let state = camera.state();
    assert_eq!(state.angle, config.initial_angle);
    assert_eq!(state.pitch, config.initial_pitch);
    assert_eq!(state.distance, config.initial_distance);

    // angle π/2: the camera sits on +z, looking at the origin
    let eye = camera.view().eye;
    assert_close(eye.x, 0.0, 1e-4);
    assert_close(eye.y, 50.0 * config.initial_pitch.sin(), 1e-4);
    assert_close(eye.z, 50.0 * config.initial_pitch.cos(), 1e-4);
    assert_eq!(camera.view().target, config.target);
}

#[test]
fn should_keep_pitch_in_range_for_random_tilts() {
    let config = CameraConfig::default();
    let mut rng = seeded_rng(7);
    for _ in 0..50 {
        let mut camera = CameraController::new(&config);
        for _ in 0..200 {
            let action = if rng.random_bool(0.5) {
                CameraAction::TiltUp
            } else {
                CameraAction::TiltDown
            };
            camera.apply(action);
            let pitch = camera.state().pitch;
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch), "pitch {}", pitch);
        }
    }
}

#[test]
fn should_keep_distance_in_range_for_random_zooms() {
    let config = CameraConfig::default();
    let mut rng = seeded_rng(11);
    for _ in 0..50 {
        let mut camera = CameraController::new(&config);
        for _ in 0..200 {
            let action = if rng.random_bool(0.5) {
                CameraAction::ZoomIn
            } else {
                CameraAction::ZoomOut
            };
            camera.apply(action);
            let distance = camera.state().distance;
            assert!(
                (config.min_zoom..=config.max_zoom).contains(&distance),
                "distance {}",
                distance
            );
        }
    }
}

#[test]
fn should_never_go_below_min_height() {
    let config = CameraConfig::default();
    let mut rng = seeded_rng(23);
    let mut camera = CameraController::new(&config);
    for _ in 0..5_000 {
        let action = ALL_ACTIONS[rng.random_range(0..ALL_ACTIONS.len())];
        camera.apply(action);
        assert!(camera.view().eye.y >= config.min_height);
    }
}

#[test]
fn should_clamp_height_when_looking_from_below() {
    let config = CameraConfig::default();
    let mut camera = CameraController::new(&config);
    for _ in 0..100 {
        camera.apply(CameraAction::TiltDown);
    }
    assert_eq!(camera.state().pitch, -FRAC_PI_2);
    assert_eq!(camera.view().eye.y, config.min_height);
}

#[test]
fn should_stop_at_zoom_bounds() {
    let config = CameraConfig::default();
    let mut camera = CameraController::new(&config);
    for _ in 0..100 {
        camera.apply(CameraAction::ZoomIn);
    }
    assert_eq!(camera.state().distance, config.min_zoom);
    for _ in 0..100 {
        camera.apply(CameraAction::ZoomOut);
    }
    assert_eq!(camera.state().distance, config.max_zoom);
}

#[test]
fn should_rotate_in_opposite_directions() {
    let config = CameraConfig::default();
    let mut camera = CameraController::new(&config);
    camera.apply(CameraAction::RotateLeft);
    assert_close(camera.state().angle, config.initial_angle + config.rotation_step, 1e-6);
    camera.apply(CameraAction::RotateRight);
    camera.apply(CameraAction::RotateRight);
    assert_close(camera.state().angle, config.initial_angle - config.rotation_step, 1e-6);
}

#[test]
fn should_clamp_out_of_range_initial_values() {
    let config = CameraConfig {
        initial_pitch: 3.0,
        initial_distance: 500.0,
        ..Default::default()
    };
    let camera = CameraController::new(&config);
    assert_eq!(camera.state().pitch, FRAC_PI_2);
    assert_eq!(camera.state().distance, config.max_zoom);
}

#[test]
fn should_track_aspect_and_ignore_zero_sizes() {
    let mut projection = Projection::from_config(800, 600, &CameraConfig::default());
    assert_close(projection.aspect(), 800.0 / 600.0, 1e-6);
    projection.resize(1000, 500);
    assert_close(projection.aspect(), 2.0, 1e-6);
    projection.resize(0, 500);
    assert_close(projection.aspect(), 2.0, 1e-6);
}
