//! Fixed-capacity slot containers.
//!
//! A `Container` is the one storage shape in the game: the player
//! inventory, every world storage, and every station input/output row are
//! all instances of it. Capacity is set at construction and never changes.

use serde::{Deserialize, Serialize};

use crate::shared::{ItemKind, ItemStack, TransferError};

/// One addressable position inside a container. `accepted` restricts which
/// kind may legally occupy the slot; `None` means any kind is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slot {
    pub stack: Option<ItemStack>,
    pub accepted: Option<ItemKind>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    /// Whether this slot's restriction (if any) allows the given kind.
    pub fn accepts(&self, kind: ItemKind) -> bool {
        self.accepted.map_or(true, |k| k == kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    slots: Vec<Slot>,
}

impl Container {
    /// A container of `capacity` unrestricted slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
        }
    }

    /// A container whose slots each accept exactly one kind, the shape of
    /// a station input row.
    pub fn with_accepted(accepted: &[ItemKind]) -> Self {
        Self {
            slots: accepted
                .iter()
                .map(|&kind| Slot {
                    stack: None,
                    accepted: Some(kind),
                })
                .collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn stack_at(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(|s| s.stack.as_ref())
    }

    /// Add `quantity` of `kind` to the slot at `index`. Occupies an empty
    /// slot, accumulates onto a same-kind stack (uncapped), and rejects a
    /// restricted or mismatched slot without touching it. Quantity 0 is a
    /// no-op.
    pub fn add(
        &mut self,
        index: usize,
        kind: ItemKind,
        quantity: u32,
    ) -> Result<(), TransferError> {
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(TransferError::SlotIncompatible);
        };
        if !slot.accepts(kind) {
            return Err(TransferError::SlotIncompatible);
        }
        if quantity == 0 {
            return Ok(());
        }
        match slot.stack {
            None => {
                slot.stack = ItemStack::new(kind, quantity);
                Ok(())
            }
            Some(ref mut stack) if stack.kind == kind => {
                stack.quantity += quantity;
                Ok(())
            }
            Some(_) => Err(TransferError::SlotOccupiedByOtherKind),
        }
    }

    /// Take the full stack out of a slot. Returns `None` if the slot was
    /// already empty, an idempotent no-op rather than an error.
    pub fn remove(&mut self, index: usize) -> Option<ItemStack> {
        self.slots.get_mut(index).and_then(|s| s.stack.take())
    }

    pub fn find_first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_empty())
    }

    /// First empty slot whose restriction allows `kind`; the return-to-
    /// origin fallback must not park a stack in a slot that rejects it.
    pub fn find_first_empty_accepting(&self, kind: ItemKind) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_empty() && s.accepts(kind))
    }

    /// Merge onto an existing same-kind stack if one exists, otherwise take
    /// the first empty compatible slot. Returns `ContainerFull` if neither
    /// is available. This is how station production lands in an output row.
    pub fn deposit(&mut self, kind: ItemKind, quantity: u32) -> Result<(), TransferError> {
        if quantity == 0 {
            return Ok(());
        }
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.stack.as_ref().is_some_and(|st| st.kind == kind))
        {
            if let Some(ref mut stack) = slot.stack {
                stack.quantity += quantity;
            }
            return Ok(());
        }
        match self.find_first_empty_accepting(kind) {
            Some(index) => self.add(index, kind, quantity),
            None => Err(TransferError::ContainerFull),
        }
    }

    /// Total quantity of one kind across all slots (conservation checks).
    pub fn total_of(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.stack.as_ref())
            .filter(|st| st.kind == kind)
            .map(|st| st.quantity)
            .sum()
    }
}
