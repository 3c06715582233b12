//! UI domain: the inventory bar, overlay panels, and the pointer layer
//! that drives item transfers.

pub mod layout;
mod panels;
mod pointer;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Playing),
            (panels::spawn_inventory_bar, pointer::spawn_hint_text),
        );

        app.add_systems(
            Update,
            (
                // Gesture first, display after, so a transfer shows up the
                // same frame it resolves.
                pointer::handle_pointer,
                panels::update_panel_lifecycle,
                panels::update_slot_texts,
                panels::update_slot_swatches,
                panels::update_station_progress,
                pointer::update_drag_ghost,
                pointer::update_hint_text,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
