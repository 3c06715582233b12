//! Slot geometry and hit-testing, in window coordinates (top-left origin).
//!
//! These functions are the single source of truth for where a slot sits on
//! screen: the panel spawners position their nodes from the same rects the
//! pointer system hit-tests against, so what you see is what you click.

use bevy::prelude::*;

use crate::items::ContainerStore;
use crate::shared::*;

/// Gap between the inventory bar and the bottom edge of the window.
const INVENTORY_BAR_MARGIN: f32 = 16.0;

/// Vertical centers of the overlay panel slot rows.
pub const STORAGE_ROW_CENTER_Y: f32 = 400.0;
pub const STATION_INPUT_CENTER_Y: f32 = 360.0;
pub const STATION_OUTPUT_CENTER_Y: f32 = 470.0;

/// A horizontally centered row of `count` slots around `center_y`.
fn row_slot_rect(index: usize, count: usize, center_y: f32) -> Rect {
    let total = count as f32 * SLOT_SIZE + count.saturating_sub(1) as f32 * SLOT_PADDING;
    let x = (SCREEN_WIDTH - total) / 2.0 + index as f32 * (SLOT_SIZE + SLOT_PADDING);
    Rect::new(
        x,
        center_y - SLOT_SIZE / 2.0,
        x + SLOT_SIZE,
        center_y + SLOT_SIZE / 2.0,
    )
}

/// The always-visible inventory bar along the bottom edge.
pub fn inventory_slot_rect(index: usize) -> Rect {
    row_slot_rect(
        index,
        INVENTORY_SLOTS,
        SCREEN_HEIGHT - INVENTORY_BAR_MARGIN - SLOT_SIZE / 2.0,
    )
}

pub fn storage_slot_rect(index: usize, capacity: usize) -> Rect {
    row_slot_rect(index, capacity, STORAGE_ROW_CENTER_Y)
}

pub fn station_input_slot_rect(index: usize, count: usize) -> Rect {
    row_slot_rect(index, count, STATION_INPUT_CENTER_Y)
}

pub fn station_output_slot_rect(index: usize, count: usize) -> Rect {
    row_slot_rect(index, count, STATION_OUTPUT_CENTER_Y)
}

/// Map a cursor position to the slot under it, if any.
///
/// The inventory bar is tested first, so if a panel ever overlaps it the
/// inventory slot wins the tie. Panel slots only exist while their panel is
/// open; a closed panel's slots can never be hit.
pub fn hit_test(
    cursor: Vec2,
    store: &ContainerStore,
    interaction: &InteractionState,
) -> Option<SlotRef> {
    if let Some(inventory) = store.get(&ContainerId::Inventory) {
        for index in 0..inventory.capacity() {
            if inventory_slot_rect(index).contains(cursor) {
                return Some(SlotRef::new(ContainerId::Inventory, index));
            }
        }
    }

    match &interaction.open {
        Some(OpenPanel::Storage { id }) => {
            let container_id = ContainerId::Storage(id.clone());
            let capacity = store.get(&container_id)?.capacity();
            for index in 0..capacity {
                if storage_slot_rect(index, capacity).contains(cursor) {
                    return Some(SlotRef::new(container_id, index));
                }
            }
            None
        }
        Some(OpenPanel::Station { id, .. }) => {
            let input_id = ContainerId::StationInput(id.clone());
            if let Some(input) = store.get(&input_id) {
                let count = input.capacity();
                for index in 0..count {
                    if station_input_slot_rect(index, count).contains(cursor) {
                        return Some(SlotRef::new(input_id, index));
                    }
                }
            }
            let output_id = ContainerId::StationOutput(id.clone());
            if let Some(output) = store.get(&output_id) {
                let count = output.capacity();
                for index in 0..count {
                    if station_output_slot_rect(index, count).contains(cursor) {
                        return Some(SlotRef::new(output_id, index));
                    }
                }
            }
            None
        }
        None => None,
    }
}
