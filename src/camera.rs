//! Orbit camera driven by discrete key presses.
//!
//! The camera lives on a sphere around a fixed target. Key presses nudge the
//! spherical coordinates ([`CameraState`]) and every nudge is followed by a
//! recompute of the eye position ([`CameraView`]). Out-of-range requests are
//! clamped, never rejected.

use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix4, Point3, Rad, Vector3, perspective};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraAction {
    TiltUp,
    TiltDown,
    RotateLeft,
    RotateRight,
    ZoomIn,
    ZoomOut,
}

/// Spherical coordinates of the camera around `target`.
///
/// `pitch` stays within [-π/2, π/2] and `distance` within the configured zoom
/// range. `angle` is unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub target: Point3<f32>,
    pub angle: f32,
    pub pitch: f32,
    pub distance: f32,
}

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl CameraView {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y())
    }
}

#[derive(Debug)]
pub struct CameraController {
    state: CameraState,
    view: CameraView,
    rotation_step: f32,
    zoom_step: f32,
    min_zoom: f32,
    max_zoom: f32,
    min_height: f32,
}

impl CameraController {
    pub fn new(config: &CameraConfig) -> Self {
        let state = CameraState {
            target: config.target,
            angle: config.initial_angle,
            pitch: config.initial_pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
            distance: config
                .initial_distance
                .clamp(config.min_zoom, config.max_zoom),
        };
        let mut controller = Self {
            state,
            view: CameraView {
                eye: config.target,
                target: config.target,
            },
            rotation_step: config.rotation_step,
            zoom_step: config.zoom_step,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            min_height: config.min_height,
        };
        controller.update_view();
        controller
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    /// Applies one key transition and recomputes the view.
    pub fn apply(&mut self, action: CameraAction) {
        let state = &mut self.state;
        match action {
            CameraAction::TiltUp => state.pitch = (state.pitch + self.rotation_step).min(FRAC_PI_2),
            CameraAction::TiltDown => {
                state.pitch = (state.pitch - self.rotation_step).max(-FRAC_PI_2)
            }
            CameraAction::RotateLeft => state.angle += self.rotation_step,
            CameraAction::RotateRight => state.angle -= self.rotation_step,
            CameraAction::ZoomIn => {
                state.distance = (state.distance - self.zoom_step).max(self.min_zoom)
            }
            CameraAction::ZoomOut => {
                state.distance = (state.distance + self.zoom_step).min(self.max_zoom)
            }
        }
        self.update_view();
    }

    /// Recomputes the eye from the spherical state, keeping it above
    /// `min_height`.
    pub fn update_view(&mut self) {
        let CameraState {
            target,
            angle,
            pitch,
            distance,
        } = self.state;
        let (sin_angle, cos_angle) = angle.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let eye = Point3::new(
            target.x + distance * cos_angle * cos_pitch,
            (target.y + distance * sin_pitch).max(self.min_height),
            target.z + distance * sin_angle * cos_pitch,
        );
        self.view = CameraView { eye, target };
    }
}

/// Perspective projection; only the aspect ratio changes at runtime.
#[derive(Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn from_config(width: u32, height: u32, config: &CameraConfig) -> Self {
        Self::new(width, height, config.fovy, config.znear, config.zfar)
    }

    /// Zero-sized viewports (minimised windows) keep the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Camera data as the shaders see it.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, view: &CameraView, projection: &Projection) {
        self.view_position = view.eye.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * view.view_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
