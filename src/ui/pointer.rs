//! Pointer gestures over the slot layer: press picks a stack up, release
//! drops it, and the carried stack is drawn as a ghost under the cursor.

use bevy::prelude::*;

use crate::items::{transfer, ContainerStore, DragState};
use crate::shared::*;
use crate::world::CurrentMap;

use super::layout;

#[derive(Component)]
pub struct DragGhost;

#[derive(Component)]
pub struct DragGhostText;

#[derive(Component)]
pub struct HintText;

/// Translate pointer edges into drag calls.
///
/// A release anywhere that is not a slot resolves with `None`, which walks
/// the carried stack back to its origin container rather than dropping it
/// on the floor.
pub fn handle_pointer(
    input: Res<PlayerInput>,
    interaction: Res<InteractionState>,
    mut store: ResMut<ContainerStore>,
    mut drag: ResMut<DragState>,
    mut resolved: EventWriter<TransferResolvedEvent>,
) {
    if input.pointer_pressed && !drag.is_dragging() {
        if let Some(cursor) = input.pointer {
            if let Some(slot) = layout::hit_test(cursor, &store, &interaction) {
                if let Err(err) = transfer::begin_drag(&mut store, &mut drag, slot) {
                    debug!("pick-up rejected: {err:?}");
                }
            }
        }
    }

    if input.pointer_released && drag.is_dragging() {
        let carried = drag.carried().copied();
        let target = input
            .pointer
            .and_then(|cursor| layout::hit_test(cursor, &store, &interaction));
        match transfer::end_drag(&mut store, &mut drag, target) {
            Ok(result) => {
                if let Some(stack) = carried {
                    resolved.send(TransferResolvedEvent {
                        result,
                        kind: stack.kind,
                        quantity: stack.quantity,
                    });
                }
            }
            Err(err) => warn!("drop failed: {err:?}"),
        }
    }
}

/// Keep a ghost of the carried stack under the cursor while dragging.
pub fn update_drag_ghost(
    mut commands: Commands,
    input: Res<PlayerInput>,
    drag: Res<DragState>,
    mut ghosts: Query<(Entity, &mut Node), With<DragGhost>>,
    mut ghost_texts: Query<&mut Text, With<DragGhostText>>,
) {
    let Some(carried) = drag.carried() else {
        for (entity, _) in ghosts.iter() {
            commands.entity(entity).despawn_recursive();
        }
        return;
    };
    let Some(cursor) = input.pointer else {
        return;
    };

    if let Ok((_, mut node)) = ghosts.get_single_mut() {
        node.left = Val::Px(cursor.x - SLOT_SIZE / 2.0);
        node.top = Val::Px(cursor.y - SLOT_SIZE / 2.0);
        if let Ok(mut text) = ghost_texts.get_single_mut() {
            **text = format!("x{}", carried.quantity);
        }
        return;
    }

    commands
        .spawn((
            DragGhost,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(cursor.x - SLOT_SIZE / 2.0),
                top: Val::Px(cursor.y - SLOT_SIZE / 2.0),
                width: Val::Px(SLOT_SIZE),
                height: Val::Px(SLOT_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::FlexEnd,
                ..default()
            },
            BackgroundColor(carried.kind.swatch().with_alpha(0.8)),
            GlobalZIndex(200),
        ))
        .with_children(|ghost| {
            ghost.spawn((
                DragGhostText,
                Text::new(format!("x{}", carried.quantity)),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// One line of context above the inventory bar.
pub fn update_hint_text(
    interaction: Res<InteractionState>,
    current: Res<CurrentMap>,
    player_query: Query<&Transform, With<Player>>,
    mut hints: Query<&mut Text, With<HintText>>,
) {
    let Ok(mut text) = hints.get_single_mut() else {
        return;
    };

    if interaction.is_panel_open() {
        **text = "E or Esc: close".to_string();
        return;
    }

    let near = player_query.get_single().ok().and_then(|transform| {
        let reach = player_collider(transform.translation.truncate()).inflate(TILE_SIZE * 0.75);
        current.interactive_at(reach)
    });
    **text = match near {
        Some(region) => format!("E: open {}", region.name.replace('_', " ")),
        None => String::new(),
    };
}

pub fn spawn_hint_text(mut commands: Commands) {
    commands.spawn((
        HintText,
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(0.75, 0.75, 0.65)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCREEN_WIDTH / 2.0 - 200.0),
            top: Val::Px(SCREEN_HEIGHT - 120.0),
            width: Val::Px(400.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        GlobalZIndex(60),
    ));
}
