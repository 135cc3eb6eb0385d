//! Raw input to viewer commands.
//!
//! Two key listeners run side by side, one for rotate/tilt and one for zoom,
//! so a single key press may produce a command from each. Key repeat is left
//! to the platform: every pressed event counts, released events never do.

use winit::{
    event::{ElementState, MouseButton},
    keyboard::{Key, NamedKey},
};

use crate::camera::CameraAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Camera(CameraAction),
    RerollMaterials,
    Resize { width: u32, height: u32 },
}

/// `w`/`s` tilt, `a`/`ArrowLeft` and `d`/`ArrowRight` rotate.
pub fn rotation_action(key: &Key) -> Option<CameraAction> {
    match key.as_ref() {
        Key::Character("w") => Some(CameraAction::TiltUp),
        Key::Character("s") => Some(CameraAction::TiltDown),
        Key::Character("a") | Key::Named(NamedKey::ArrowLeft) => Some(CameraAction::RotateLeft),
        Key::Character("d") | Key::Named(NamedKey::ArrowRight) => Some(CameraAction::RotateRight),
        _ => None,
    }
}

/// `ArrowUp` zooms in, `ArrowDown` zooms out.
pub fn zoom_action(key: &Key) -> Option<CameraAction> {
    match key.as_ref() {
        Key::Named(NamedKey::ArrowUp) => Some(CameraAction::ZoomIn),
        Key::Named(NamedKey::ArrowDown) => Some(CameraAction::ZoomOut),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Commands for one keyboard event. Unbound keys produce nothing.
    pub fn on_key(&self, key: &Key, state: ElementState) -> Vec<Command> {
        if !state.is_pressed() {
            return Vec::new();
        }
        [rotation_action(key), zoom_action(key)]
            .into_iter()
            .flatten()
            .map(Command::Camera)
            .collect()
    }

    /// A left click rerolls every decorated surface.
    pub fn on_mouse(&self, button: MouseButton, state: ElementState) -> Option<Command> {
        match (button, state.is_pressed()) {
            (MouseButton::Left, true) => Some(Command::RerollMaterials),
            _ => None,
        }
    }

    pub fn on_resize(&self, width: u32, height: u32) -> Option<Command> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Command::Resize { width, height })
    }
}
