//! The single in-flight drag session.
//!
//! At most one stack is ever "in hand". Picking up atomically empties the
//! source slot; the gesture ends exactly once, either by placement or by
//! returning to the origin (see `transfer`).

use bevy::prelude::*;

use crate::shared::*;

/// `Idle ⇄ Dragging` is the whole lifecycle of a drag gesture.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        carried: ItemStack,
        origin: SlotRef,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The stack in hand, for display. Rendering reads this; it never
    /// mutates it.
    pub fn carried(&self) -> Option<&ItemStack> {
        match self {
            DragState::Dragging { carried, .. } => Some(carried),
            DragState::Idle => None,
        }
    }
}
