use bevy::prelude::*;

use crate::shared::*;
use crate::world::CurrentMap;

/// Smoothly follow the player with the camera using a lerp, clamped to the
/// current map's pixel bounds. A map smaller than the viewport on an axis is
/// centered on that axis instead of clamped.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<
        (&mut Transform, &OrthographicProjection),
        (With<Camera2d>, Without<Player>),
    >,
    current: Res<CurrentMap>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_tf.translation.truncate();

    // Snap when very far from the target (map transition teleport), lerp
    // otherwise.
    let far = (target - cam_tf.translation.truncate()).abs().max_element() > TILE_SIZE * 6.0;
    let smooth = if far {
        target
    } else {
        let t = (5.0 * time.delta_secs()).min(1.0);
        cam_tf.translation.truncate().lerp(target, t)
    };

    let half_vw = projection.area.width() / 2.0;
    let half_vh = projection.area.height() / 2.0;

    cam_tf.translation.x = clamp_axis(smooth.x, current.def.pixel_width, half_vw);
    cam_tf.translation.y = clamp_axis(smooth.y, current.def.pixel_height, half_vh);
}

fn clamp_axis(value: f32, map_extent: f32, half_view: f32) -> f32 {
    if map_extent <= half_view * 2.0 {
        map_extent / 2.0
    } else {
        value.clamp(half_view, map_extent - half_view)
    }
}
