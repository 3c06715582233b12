//! Overlay panels: the always-visible inventory bar, the storage panel, and
//! the station panel with its progress bar.
//!
//! Every slot node is positioned from the same `layout` rects the pointer
//! system hit-tests, so the clickable area and the drawn area are one thing.

use bevy::prelude::*;

use crate::items::ContainerStore;
use crate::shared::*;
use crate::stations::CraftingStation;

use super::layout;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct InventoryBarRoot;

/// Root of whichever overlay panel is open. At most one exists.
#[derive(Component)]
pub struct PanelRoot;

/// Text inside a slot; updated every frame from the container store.
#[derive(Component)]
pub struct SlotText(pub SlotRef);

/// The colored fill of a slot's item swatch.
#[derive(Component)]
pub struct SlotSwatch(pub SlotRef);

#[derive(Component)]
pub struct ProgressFill;

#[derive(Component)]
pub struct ProducedText;

const SLOT_BG: Color = Color::srgba(0.2, 0.17, 0.14, 0.9);
const SLOT_BORDER: Color = Color::srgba(0.4, 0.35, 0.3, 0.8);
const PANEL_BG: Color = Color::srgba(0.12, 0.1, 0.08, 0.95);
const PANEL_BORDER: Color = Color::srgb(0.5, 0.4, 0.25);
const TITLE_COLOR: Color = Color::srgb(1.0, 0.9, 0.6);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// A slot node at an absolute window-space rect, with the swatch and text
/// children that the per-frame systems drive.
fn spawn_slot(parent: &mut ChildBuilder, rect: Rect, slot: SlotRef) {
    parent
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(rect.min.x),
                top: Val::Px(rect.min.y),
                width: Val::Px(rect.width()),
                height: Val::Px(rect.height()),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(SLOT_BG),
            BorderColor(SLOT_BORDER),
        ))
        .with_children(|node| {
            node.spawn((
                SlotSwatch(slot.clone()),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(14.0),
                    top: Val::Px(8.0),
                    width: Val::Px(rect.width() - 32.0),
                    height: Val::Px(rect.height() - 36.0),
                    ..default()
                },
                BackgroundColor(Color::NONE),
            ));
            node.spawn((
                SlotText(slot),
                Text::new(""),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn title_text(parent: &mut ChildBuilder, label: String, center_y: f32) {
    parent.spawn((
        Text::new(label),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(TITLE_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCREEN_WIDTH / 2.0 - 160.0),
            top: Val::Px(center_y),
            width: Val::Px(320.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
    ));
}

/// Always-visible inventory bar along the bottom edge.
pub fn spawn_inventory_bar(mut commands: Commands, store: Res<ContainerStore>) {
    let capacity = store
        .get(&ContainerId::Inventory)
        .map(|c| c.capacity())
        .unwrap_or(INVENTORY_SLOTS);

    commands
        .spawn((
            InventoryBarRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            GlobalZIndex(50),
        ))
        .with_children(|root| {
            for index in 0..capacity {
                spawn_slot(
                    root,
                    layout::inventory_slot_rect(index),
                    SlotRef::new(ContainerId::Inventory, index),
                );
            }
        });
}

fn spawn_storage_panel(commands: &mut Commands, store: &ContainerStore, id: &str) {
    let container_id = ContainerId::Storage(id.to_string());
    let Some(container) = store.get(&container_id) else {
        return;
    };
    let capacity = container.capacity();

    commands
        .spawn((
            PanelRoot,
            panel_backdrop_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            GlobalZIndex(40),
        ))
        .with_children(|root| {
            title_text(
                root,
                id.replace('_', " ").to_uppercase(),
                layout::STORAGE_ROW_CENTER_Y - 90.0,
            );
            for index in 0..capacity {
                spawn_slot(
                    root,
                    layout::storage_slot_rect(index, capacity),
                    SlotRef::new(container_id.clone(), index),
                );
            }
        });
}

fn spawn_station_panel(
    commands: &mut Commands,
    store: &ContainerStore,
    id: &str,
    kind: StationKind,
) {
    let input_id = ContainerId::StationInput(id.to_string());
    let output_id = ContainerId::StationOutput(id.to_string());
    let input_count = store.get(&input_id).map(|c| c.capacity()).unwrap_or(0);
    let output_count = store.get(&output_id).map(|c| c.capacity()).unwrap_or(0);

    commands
        .spawn((
            PanelRoot,
            panel_backdrop_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            GlobalZIndex(40),
        ))
        .with_children(|root| {
            title_text(
                root,
                kind.display_name().to_uppercase(),
                layout::STATION_INPUT_CENTER_Y - 90.0,
            );

            for index in 0..input_count {
                spawn_slot(
                    root,
                    layout::station_input_slot_rect(index, input_count),
                    SlotRef::new(input_id.clone(), index),
                );
            }

            // Progress bar between the input and output rows.
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(SCREEN_WIDTH / 2.0 - 150.0),
                    top: Val::Px(layout::STATION_INPUT_CENTER_Y + 50.0),
                    width: Val::Px(300.0),
                    height: Val::Px(14.0),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(SLOT_BG),
                BorderColor(PANEL_BORDER),
            ))
            .with_children(|bar| {
                bar.spawn((
                    ProgressFill,
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.85, 0.65, 0.2)),
                ));
            });

            root.spawn((
                ProducedText,
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.7)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(SCREEN_WIDTH / 2.0 - 150.0),
                    top: Val::Px(layout::STATION_OUTPUT_CENTER_Y + 50.0),
                    width: Val::Px(300.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Center),
            ));

            for index in 0..output_count {
                spawn_slot(
                    root,
                    layout::station_output_slot_rect(index, output_count),
                    SlotRef::new(output_id.clone(), index),
                );
            }
        });
}

fn panel_backdrop_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LIFECYCLE & PER-FRAME UPDATES
// ═══════════════════════════════════════════════════════════════════════

/// Spawn or despawn the overlay panel whenever the open panel changes.
pub fn update_panel_lifecycle(
    mut commands: Commands,
    interaction: Res<InteractionState>,
    store: Res<ContainerStore>,
    mut spawned: Local<Option<OpenPanel>>,
    roots: Query<Entity, With<PanelRoot>>,
) {
    if *spawned == interaction.open {
        return;
    }
    for entity in roots.iter() {
        commands.entity(entity).despawn_recursive();
    }
    *spawned = interaction.open.clone();

    match &interaction.open {
        Some(OpenPanel::Storage { id }) => spawn_storage_panel(&mut commands, &store, id),
        Some(OpenPanel::Station { id, kind }) => {
            spawn_station_panel(&mut commands, &store, id, *kind)
        }
        None => {}
    }
}

/// Drive every slot's text from the container store. Empty restricted
/// slots show their accepted kind dimmed, as a filling hint.
pub fn update_slot_texts(
    store: Res<ContainerStore>,
    mut texts: Query<(&SlotText, &mut Text, &mut TextColor)>,
) {
    for (slot, mut text, mut color) in &mut texts {
        let Some(container) = store.get(&slot.0.container) else {
            **text = String::new();
            continue;
        };
        match container.stack_at(slot.0.slot) {
            Some(stack) => {
                **text = format!("{} x{}", stack.kind.display_name(), stack.quantity);
                *color = TextColor(Color::WHITE);
            }
            None => {
                let accepted = container.slot(slot.0.slot).and_then(|s| s.accepted);
                match accepted {
                    Some(kind) => {
                        **text = kind.display_name().to_string();
                        *color = TextColor(Color::srgba(1.0, 1.0, 1.0, 0.35));
                    }
                    None => **text = String::new(),
                }
            }
        }
    }
}

pub fn update_slot_swatches(
    store: Res<ContainerStore>,
    mut swatches: Query<(&SlotSwatch, &mut BackgroundColor)>,
) {
    for (slot, mut bg) in &mut swatches {
        let stack = store
            .get(&slot.0.container)
            .and_then(|c| c.stack_at(slot.0.slot));
        *bg = BackgroundColor(match stack {
            Some(stack) => stack.kind.swatch(),
            None => Color::NONE,
        });
    }
}

/// Width of the progress fill tracks the open station's progress.
pub fn update_station_progress(
    interaction: Res<InteractionState>,
    stations: Query<&CraftingStation>,
    mut fills: Query<&mut Node, With<ProgressFill>>,
    mut produced_texts: Query<&mut Text, With<ProducedText>>,
) {
    let Some(open_id) = interaction.open_station_id() else {
        return;
    };
    let Some(station) = stations.iter().find(|s| s.id == open_id) else {
        return;
    };

    for mut node in &mut fills {
        node.width = Val::Percent(station.progress as f32 / PROGRESS_MAX as f32 * 100.0);
    }
    for mut text in &mut produced_texts {
        **text = format!("Cycles completed: {}", station.produced);
    }
}
