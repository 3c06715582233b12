use bevy::prelude::*;

use crate::shared::*;
use crate::world::CurrentMap;

/// Spawn the player entity at the current map's default spawn point.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    current: Res<CurrentMap>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    let spawn = current.def.default_spawn;

    commands.spawn((
        Player,
        PlayerMovement::default(),
        // Placeholder sprite, a blue rectangle taller than a tile.
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.75, TILE_SIZE * 1.25)),
            ..default()
        },
        // Z = 10 so the player draws above terrain and region markers.
        Transform::from_translation(Vec3::new(spawn.x, spawn.y, 10.0)),
        Visibility::default(),
    ));

    info!("Player spawned at {spawn:?}");
}
