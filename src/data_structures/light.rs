use cgmath::Point3;

use crate::config::{LightConfig, ShadowSettings};

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    pub colour: [f32; 3],
    pub intensity: f32,
}

/// A directional light aimed from `position` at `target`.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub colour: [f32; 3],
    pub intensity: f32,
    pub cast_shadow: bool,
    pub shadow: ShadowSettings,
}

#[derive(Clone, Debug)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

impl Lighting {
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            ambient: AmbientLight {
                colour: config.ambient_colour,
                intensity: config.ambient_intensity,
            },
            sun: DirectionalLight {
                // The sun stays where it is until the anchor shows up.
                position: Point3::new(0.0, 1.0, 0.0),
                target: Point3::new(0.0, 0.0, 0.0),
                colour: config.sun_colour,
                intensity: config.sun_intensity,
                cast_shadow: true,
                shadow: config.shadow.clone(),
            },
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}
