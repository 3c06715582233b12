//! Player domain: spawning, movement with collision, the camera, and the
//! interact-key controller that opens and closes overlay panels.

mod camera;
mod interaction;
mod movement;
mod spawn;

use bevy::prelude::*;

use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        app.add_systems(
            Update,
            (
                movement::player_movement,
                interaction::interact_with_world.after(movement::player_movement),
                camera::camera_follow_player.after(movement::player_movement),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
