use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, reset_and_read_input);
    }
}

/// The single point where hardware input becomes game actions. Every other
/// system reads `PlayerInput`; none of them touch `ButtonInput` directly.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    let mut axis = Vec2::ZERO;
    if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    input.move_axis = if axis != Vec2::ZERO {
        axis.normalize()
    } else {
        Vec2::ZERO
    };

    input.interact = keys.just_pressed(bindings.interact);
    input.cancel = keys.just_pressed(bindings.cancel);

    // Cursor position in window coordinates (top-left origin), which is the
    // space the UI panels lay their slots out in. None while the cursor is
    // outside the window.
    input.pointer = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position());
    input.pointer_pressed = mouse.just_pressed(MouseButton::Left);
    input.pointer_released = mouse.just_released(MouseButton::Left);
}
