//! Tunables for the viewer.
//!
//! Every value has a default matching the hand-tuned demo scene. The only
//! runtime override is the asset root, read from `VILLAGE_ASSET_DIR`.

use std::{f32::consts::PI, path::PathBuf};

use cgmath::{Deg, Point3};

pub const ASSET_DIR_ENV: &str = "VILLAGE_ASSET_DIR";

#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Fixed point the camera orbits and looks at.
    pub target: Point3<f32>,
    pub initial_angle: f32,
    pub initial_pitch: f32,
    pub initial_distance: f32,
    /// Radians added/removed per rotate or tilt key press.
    pub rotation_step: f32,
    /// World units added/removed per zoom key press.
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// The camera never goes below this height, whatever the pitch.
    pub min_height: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Point3::new(0.0, 0.0, 0.0),
            initial_angle: PI / 2.0,
            initial_pitch: PI / 6.0,
            initial_distance: 50.0,
            rotation_step: 0.08,
            zoom_step: 2.0,
            min_zoom: 10.0,
            max_zoom: 100.0,
            min_height: 10.0,
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShadowSettings {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    /// Half-width of the orthographic shadow frustum.
    pub extent: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 256,
            near: 1.0,
            far: 200.0,
            extent: 50.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightConfig {
    pub initial_angle: f32,
    pub radius: f32,
    /// Radians the sun advances per frame.
    pub angular_step: f32,
    /// Height of the orbit above the anchor.
    pub height_offset: f32,
    pub ambient_colour: [f32; 3],
    pub ambient_intensity: f32,
    pub sun_colour: [f32; 3],
    pub sun_intensity: f32,
    pub shadow: ShadowSettings,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            initial_angle: 10.0,
            radius: 25.0,
            angular_step: 0.02,
            height_offset: 10.0,
            ambient_colour: [1.0, 1.0, 1.0],
            ambient_intensity: 0.4,
            sun_colour: [1.0, 1.0, 1.0],
            sun_intensity: 1.2,
            shadow: ShadowSettings::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DriftConfig {
    /// Instances wrap to `-bound` once they reach `bound` on the x axis.
    pub bound: f32,
    pub step: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            bound: 30.0,
            step: 0.3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub asset_root: PathBuf,
    pub clear_colour: wgpu::Color,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub drift: DriftConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("./assets"),
            // 0x87CEEB
            clear_colour: wgpu::Color {
                r: 0x87 as f64 / 255.0,
                g: 0xCE as f64 / 255.0,
                b: 0xEB as f64 / 255.0,
                a: 1.0,
            },
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            drift: DriftConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Defaults with the asset root taken from `VILLAGE_ASSET_DIR` if it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match std::env::var(ASSET_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => {
                log::info!("using asset root {dir} from {ASSET_DIR_ENV}");
                config.asset_root = PathBuf::from(dir);
            }
            _ => (),
        }
        config
    }
}
