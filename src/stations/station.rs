//! Crafting station component and progress state machine.
//!
//! A station is composition, not inheritance: the `CraftingStation`
//! component carries the progress machine, while its input and output
//! slot rows are ordinary containers in the `ContainerStore` keyed by the
//! station's region name. One generic component covers the oven, mill,
//! and well; per-kind behavior lives entirely in `StationKind`'s
//! configuration.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component, Debug, Clone)]
pub struct CraftingStation {
    pub kind: StationKind,
    /// Region name from the map; also the container-store key.
    pub id: String,
    /// Interaction zone in world coordinates.
    pub region: Rect,
    /// Whether the station's interface is open. Progress only advances
    /// while it is.
    pub open: bool,
    /// 0..100; wraps to 0 on completion.
    pub progress: u8,
    /// Completed production cycles since the session started.
    pub produced: u32,
}

impl CraftingStation {
    pub fn new(kind: StationKind, id: impl Into<String>, region: Rect) -> Self {
        Self {
            kind,
            id: id.into(),
            region,
            open: false,
            progress: 0,
            produced: 0,
        }
    }

    /// Toggle the interface. No-op unless the player is adjacent; the
    /// caller computes adjacency, the rule lives here.
    pub fn toggle_interface(&mut self, is_player_adjacent: bool) -> bool {
        if !is_player_adjacent {
            return false;
        }
        self.open = !self.open;
        true
    }

    /// Advance the progress bar by `step` while open. Returns `true` on the
    /// tick that wraps past 100, exactly once per cycle.
    pub fn advance_progress(&mut self, step: u8) -> bool {
        if !self.open {
            return false;
        }
        self.progress = self.progress.saturating_add(step);
        if self.progress >= PROGRESS_MAX {
            self.progress = 0;
            self.produced += 1;
            true
        } else {
            false
        }
    }
}
