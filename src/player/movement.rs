use bevy::prelude::*;

use crate::shared::*;
use crate::world::CurrentMap;

/// Core movement system. Reads the pre-digested `PlayerInput` axis, applies
/// velocity, updates facing, and checks collisions against the current map.
///
/// Movement is suspended entirely while a storage or station panel is open;
/// the player stands still until it closes.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    current: Res<CurrentMap>,
    interaction: Res<InteractionState>,
    mut query: Query<(&mut Transform, &mut PlayerMovement), With<Player>>,
) {
    let Ok((mut transform, mut movement)) = query.get_single_mut() else {
        return;
    };

    if interaction.is_panel_open() || input.move_axis == Vec2::ZERO {
        movement.is_moving = false;
        return;
    }

    movement.is_moving = true;

    // Prioritise vertical facing on diagonals; approaching stations and
    // crates from below is the common case on these maps.
    let dir = input.move_axis;
    if dir.y.abs() >= dir.x.abs() {
        movement.facing = if dir.y > 0.0 { Facing::Up } else { Facing::Down };
    } else {
        movement.facing = if dir.x > 0.0 { Facing::Right } else { Facing::Left };
    }

    let delta = dir * movement.speed * time.delta_secs();
    let pos = transform.translation.truncate();

    // Axis-separated collision so the player slides along walls instead of
    // sticking on diagonal input.
    let candidate_x = pos + Vec2::new(delta.x, 0.0);
    if !current.is_blocked(player_collider(candidate_x)) {
        transform.translation.x = candidate_x.x;
    }

    let candidate_y = Vec2::new(transform.translation.x, pos.y + delta.y);
    if !current.is_blocked(player_collider(candidate_y)) {
        transform.translation.y = candidate_y.y;
    }
}
