use village_viewer::{
    camera::CameraAction,
    input::{Command, InputDispatcher},
};
use winit::{
    event::{ElementState, MouseButton},
    keyboard::{Key, NamedKey},
};

fn key(c: &str) -> Key {
    Key::Character(c.into())
}

#[test]
fn should_map_bound_keys() {
    let input = InputDispatcher::new();
    let pressed = ElementState::Pressed;
    let cases = [
        (key("w"), CameraAction::TiltUp),
        (key("s"), CameraAction::TiltDown),
        (key("a"), CameraAction::RotateLeft),
        (Key::Named(NamedKey::ArrowLeft), CameraAction::RotateLeft),
        (key("d"), CameraAction::RotateRight),
        (Key::Named(NamedKey::ArrowRight), CameraAction::RotateRight),
        (Key::Named(NamedKey::ArrowUp), CameraAction::ZoomIn),
        (Key::Named(NamedKey::ArrowDown), CameraAction::ZoomOut),
    ];
    for (key, action) in cases {
        assert_eq!(input.on_key(&key, pressed), vec![Command::Camera(action)]);
    }
}

#[test]
fn should_ignore_unbound_keys_and_releases() {
    let input = InputDispatcher::new();
    assert!(input.on_key(&key("q"), ElementState::Pressed).is_empty());
    assert!(input.on_key(&Key::Named(NamedKey::Space), ElementState::Pressed).is_empty());
    assert!(input.on_key(&key("w"), ElementState::Released).is_empty());
}

#[test]
fn should_reroll_on_left_click() {
    let input = InputDispatcher::new();
    assert_eq!(
        input.on_mouse(MouseButton::Left, ElementState::Pressed),
        Some(Command::RerollMaterials)
    );
    assert_eq!(input.on_mouse(MouseButton::Left, ElementState::Released), None);
    assert_eq!(input.on_mouse(MouseButton::Right, ElementState::Pressed), None);
}

#[test]
fn should_ignore_zero_sized_resizes() {
    let input = InputDispatcher::new();
    assert_eq!(
        input.on_resize(1024, 768),
        Some(Command::Resize {
            width: 1024,
            height: 768
        })
    );
    assert_eq!(input.on_resize(0, 768), None);
}
