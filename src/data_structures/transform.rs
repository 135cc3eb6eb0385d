//! Local transforms of scene entities.
//!
//! Position, rotation and scale are kept separately so that placement code can
//! set each of them exactly as authored; the matrix form is only built when a
//! world transform is requested.

use std::ops::Mul;

use cgmath::{Euler, One, Quaternion, Rad, Vector3};

/// Position, rotation (as quaternion) and non-uniform scale of one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Builds a transform from authored values. `euler` is in radians and is
    /// applied x, then y, then z.
    pub fn from_parts(position: Vector3<f32>, euler: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: euler_to_quaternion(euler),
            scale,
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

pub fn euler_to_quaternion(euler: Vector3<f32>) -> Quaternion<f32> {
    if euler == Vector3::new(0.0, 0.0, 0.0) {
        return Quaternion::one();
    }
    Quaternion::from(Euler {
        x: Rad(euler.x),
        y: Rad(euler.y),
        z: Rad(euler.z),
    })
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

/**
 * Parent-to-child composition: `parent * local` gives the child's world
 * transform. The child's offset is scaled and rotated by the parent.
 */
impl<'a, 'b> Mul<&'b Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, rhs: &'b Transform) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let scaled_rhs_pos = Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        let new_position = self.position + (self.rotation * scaled_rhs_pos);

        Transform {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl Mul<Transform> for Transform {
    type Output = Self;

    fn mul(self, rhs: Transform) -> Self::Output {
        &self * &rhs
    }
}
