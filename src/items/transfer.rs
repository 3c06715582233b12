//! Drop resolution: the one authoritative rule set for moving stacks
//! between slots.
//!
//! Earlier drafts of this game grew several divergent copies of the
//! pick-up/merge/swap/return logic. This module is the single replacement:
//! `begin_drag` and `end_drag` are the only entry points that move items,
//! and every outcome is an explicit `TransferResult`.

use bevy::prelude::*;

use crate::shared::*;

use super::drag::DragState;
use super::store::ContainerStore;

/// Pick up the stack at `at`, emptying the slot and opening a drag session.
///
/// Only valid while idle: a second press during a drag is rejected without
/// touching the carried stack or origin. Clicking an empty slot is a no-op
/// that stays idle.
pub fn begin_drag(
    store: &mut ContainerStore,
    drag: &mut DragState,
    at: SlotRef,
) -> Result<(), TransferError> {
    if drag.is_dragging() {
        return Err(TransferError::DragAlreadyActive);
    }
    let Some(container) = store.get_mut(&at.container) else {
        return Ok(());
    };
    let Some(carried) = container.remove(at.slot) else {
        return Ok(());
    };
    debug!("picked up {:?} x{} from {:?}", carried.kind, carried.quantity, at);
    *drag = DragState::Dragging {
        carried,
        origin: at,
    };
    Ok(())
}

/// Resolve the drop of the carried stack at `target` (`None` = released
/// over no slot). Always returns to idle: a drag gesture is terminal, a
/// failed placement is not retried, it degrades to return-to-origin.
pub fn end_drag(
    store: &mut ContainerStore,
    drag: &mut DragState,
    target: Option<SlotRef>,
) -> Result<TransferResult, TransferError> {
    let DragState::Dragging { carried, origin } = std::mem::take(drag) else {
        return Err(TransferError::NoActiveDrag);
    };
    Ok(resolve_drop(store, carried, origin, target))
}

/// The drop rule set. `carried` is owned here; by the time this returns it
/// has landed somewhere (or, in the `Lost` case, nowhere).
fn resolve_drop(
    store: &mut ContainerStore,
    carried: ItemStack,
    origin: SlotRef,
    target: Option<SlotRef>,
) -> TransferResult {
    let Some(target) = target else {
        return return_to_origin(store, carried, &origin);
    };

    let Some(container) = store.get_mut(&target.container) else {
        return return_to_origin(store, carried, &origin);
    };
    let Some(slot) = container.slot(target.slot) else {
        return return_to_origin(store, carried, &origin);
    };

    match slot.stack {
        // Empty target: place, unless the slot restriction rejects the
        // carried kind, in which case fall through to return-to-origin.
        None => match container.add(target.slot, carried.kind, carried.quantity) {
            Ok(()) => TransferResult::Placed,
            Err(err) => {
                debug!("placement into {target:?} rejected ({err:?}), returning to origin");
                return_to_origin(store, carried, &origin)
            }
        },
        // Occupied by the same kind: merge, uncapped.
        Some(displaced) if displaced.kind == carried.kind => {
            match container.add(target.slot, carried.kind, carried.quantity) {
                Ok(()) => TransferResult::Merged,
                Err(err) => {
                    debug!("merge into {target:?} rejected ({err:?}), returning to origin");
                    return_to_origin(store, carried, &origin)
                }
            }
        }
        // Occupied by a different kind: true swap. The displaced stack
        // goes straight back to the origin slot, it is not picked up.
        Some(displaced) => try_swap(store, carried, &origin, &target, displaced),
    }
}

/// Swap `carried` into the target slot and the displaced stack into the
/// origin slot. Both restrictions are checked before anything moves; if
/// either side would end up holding a kind its slot rejects, the swap is
/// abandoned and the carried stack returns to its origin instead.
fn try_swap(
    store: &mut ContainerStore,
    carried: ItemStack,
    origin: &SlotRef,
    target: &SlotRef,
    displaced: ItemStack,
) -> TransferResult {
    let target_accepts = store
        .get(&target.container)
        .and_then(|c| c.slot(target.slot))
        .is_some_and(|s| s.accepts(carried.kind));
    let origin_accepts = store
        .get(&origin.container)
        .and_then(|c| c.slot(origin.slot))
        .is_some_and(|s| s.is_empty() && s.accepts(displaced.kind));

    if !target_accepts || !origin_accepts {
        debug!("swap between {origin:?} and {target:?} rejected, returning to origin");
        return return_to_origin(store, carried, origin);
    }

    // The pre-checks guarantee both adds succeed: the target slot accepts
    // the carried kind and is emptied first, the origin slot is empty and
    // accepts the displaced kind. Origin and target may be the same
    // container, so the two halves are applied sequentially.
    if let Some(container) = store.get_mut(&target.container) {
        container.remove(target.slot);
        let _ = container.add(target.slot, carried.kind, carried.quantity);
    }
    if let Some(container) = store.get_mut(&origin.container) {
        let _ = container.add(origin.slot, displaced.kind, displaced.quantity);
    }
    TransferResult::Swapped
}

/// Rule 1: back to the origin slot if it is still empty, else the first
/// empty compatible slot of the origin container, else the stack is lost.
///
/// The `Lost` arm reproduces the original behavior on a full origin
/// container. It reads like a bug rather than a design choice, so it is
/// kept visible: an explicit result variant plus a warning.
fn return_to_origin(
    store: &mut ContainerStore,
    carried: ItemStack,
    origin: &SlotRef,
) -> TransferResult {
    let Some(container) = store.get_mut(&origin.container) else {
        warn!(
            "origin container {:?} missing; {:?} x{} lost",
            origin.container, carried.kind, carried.quantity
        );
        return TransferResult::Lost;
    };

    let origin_open = container
        .slot(origin.slot)
        .is_some_and(|s| s.is_empty() && s.accepts(carried.kind));
    let landing = if origin_open {
        Some(origin.slot)
    } else {
        container.find_first_empty_accepting(carried.kind)
    };

    match landing {
        Some(index) => match container.add(index, carried.kind, carried.quantity) {
            Ok(()) => TransferResult::ReturnedToOrigin,
            Err(err) => {
                warn!(
                    "return-to-origin add failed ({err:?}); {:?} x{} lost",
                    carried.kind, carried.quantity
                );
                TransferResult::Lost
            }
        },
        None => {
            warn!(
                "origin container {:?} full; {:?} x{} lost",
                origin.container, carried.kind, carried.quantity
            );
            TransferResult::Lost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::container::Container;

    fn inv() -> ContainerId {
        ContainerId::Inventory
    }

    fn storage() -> ContainerId {
        ContainerId::Storage("barn".to_string())
    }

    fn setup() -> (ContainerStore, DragState) {
        let mut store = ContainerStore::default();
        store.insert(inv(), Container::new(4));
        store.insert(storage(), Container::new(4));
        (store, DragState::Idle)
    }

    fn population(store: &ContainerStore, drag: &DragState, kind: ItemKind) -> u32 {
        let in_hand = drag
            .carried()
            .filter(|s| s.kind == kind)
            .map_or(0, |s| s.quantity);
        store.total_of(kind) + in_hand
    }

    #[test]
    fn begin_drag_empties_source_slot() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(2, ItemKind::Flour, 5)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 2)).unwrap();

        assert!(store.get(&inv()).unwrap().slot(2).unwrap().is_empty());
        let carried = drag.carried().unwrap();
        assert_eq!(carried.kind, ItemKind::Flour);
        assert_eq!(carried.quantity, 5);
    }

    #[test]
    fn begin_drag_on_empty_slot_stays_idle() {
        let (mut store, mut drag) = setup();
        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn second_begin_drag_is_rejected_without_state_change() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Wheat, 1)
            .unwrap();
        store
            .get_mut(&inv())
            .unwrap()
            .add(1, ItemKind::Water, 9)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        let before = drag.clone();

        let err = begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 1));
        assert_eq!(err, Err(TransferError::DragAlreadyActive));
        assert_eq!(drag, before);
        // Slot 1 untouched.
        assert_eq!(
            store.get(&inv()).unwrap().stack_at(1).unwrap().quantity,
            9
        );
    }

    #[test]
    fn end_drag_without_session_is_an_error() {
        let (mut store, mut drag) = setup();
        assert_eq!(
            end_drag(&mut store, &mut drag, None),
            Err(TransferError::NoActiveDrag)
        );
    }

    #[test]
    fn drop_on_empty_slot_places() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Wheat, 3)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        let result = end_drag(&mut store, &mut drag, Some(SlotRef::new(storage(), 1))).unwrap();

        assert_eq!(result, TransferResult::Placed);
        assert_eq!(drag, DragState::Idle);
        assert_eq!(
            store.get(&storage()).unwrap().stack_at(1).unwrap().quantity,
            3
        );
    }

    #[test]
    fn drop_on_same_kind_merges() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Wheat, 3)
            .unwrap();
        store
            .get_mut(&storage())
            .unwrap()
            .add(2, ItemKind::Wheat, 4)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        let result = end_drag(&mut store, &mut drag, Some(SlotRef::new(storage(), 2))).unwrap();

        assert_eq!(result, TransferResult::Merged);
        assert_eq!(
            store.get(&storage()).unwrap().stack_at(2).unwrap().quantity,
            7
        );
        assert!(store.get(&inv()).unwrap().slot(0).unwrap().is_empty());
    }

    #[test]
    fn drop_on_other_kind_swaps_into_origin_slot() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(1, ItemKind::Flour, 5)
            .unwrap();
        store
            .get_mut(&storage())
            .unwrap()
            .add(0, ItemKind::Wheat, 1)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 1)).unwrap();
        let result = end_drag(&mut store, &mut drag, Some(SlotRef::new(storage(), 0))).unwrap();

        assert_eq!(result, TransferResult::Swapped);
        let target = store.get(&storage()).unwrap().stack_at(0).unwrap();
        assert_eq!((target.kind, target.quantity), (ItemKind::Flour, 5));
        let origin = store.get(&inv()).unwrap().stack_at(1).unwrap();
        assert_eq!((origin.kind, origin.quantity), (ItemKind::Wheat, 1));
    }

    #[test]
    fn drop_nowhere_round_trips_exactly() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(3, ItemKind::Water, 2)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 3)).unwrap();
        let result = end_drag(&mut store, &mut drag, None).unwrap();

        assert_eq!(result, TransferResult::ReturnedToOrigin);
        let restored = store.get(&inv()).unwrap().stack_at(3).unwrap();
        assert_eq!((restored.kind, restored.quantity), (ItemKind::Water, 2));
    }

    #[test]
    fn return_falls_back_to_first_open_slot() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(2, ItemKind::Water, 1)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 2)).unwrap();
        // Someone fills the origin slot while the stack is in hand.
        store
            .get_mut(&inv())
            .unwrap()
            .add(2, ItemKind::Bread, 1)
            .unwrap();

        let result = end_drag(&mut store, &mut drag, None).unwrap();
        assert_eq!(result, TransferResult::ReturnedToOrigin);
        assert_eq!(
            store.get(&inv()).unwrap().stack_at(0).unwrap().kind,
            ItemKind::Water
        );
    }

    #[test]
    fn full_origin_loses_the_stack() {
        let mut store = ContainerStore::default();
        store.insert(inv(), Container::new(1));
        let mut drag = DragState::Idle;
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Water, 1)
            .unwrap();
        assert_eq!(population(&store, &drag, ItemKind::Water), 1);

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        // Capacity-1 container, origin slot externally refilled.
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Bread, 1)
            .unwrap();

        let result = end_drag(&mut store, &mut drag, None).unwrap();
        assert_eq!(result, TransferResult::Lost);
        // Lost is the sole legitimate sink: Water population drops by 1.
        assert_eq!(population(&store, &drag, ItemKind::Water), 0);
    }

    #[test]
    fn incompatible_restricted_target_returns_to_origin() {
        let (mut store, mut drag) = setup();
        let oven_in = ContainerId::StationInput("oven_1".to_string());
        store.insert(
            oven_in.clone(),
            Container::with_accepted(&[ItemKind::Water, ItemKind::Flour]),
        );
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Wheat, 2)
            .unwrap();

        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        // Wheat into the Water-only slot: rejected, snaps back.
        let result = end_drag(&mut store, &mut drag, Some(SlotRef::new(oven_in.clone(), 0)))
            .unwrap();

        assert_eq!(result, TransferResult::ReturnedToOrigin);
        assert!(store.get(&oven_in).unwrap().slot(0).unwrap().is_empty());
        assert_eq!(
            store.get(&inv()).unwrap().stack_at(0).unwrap().quantity,
            2
        );
    }

    #[test]
    fn swap_that_would_violate_a_restriction_is_abandoned() {
        let (mut store, mut drag) = setup();
        let mill_in = ContainerId::StationInput("mill_1".to_string());
        store.insert(
            mill_in.clone(),
            Container::with_accepted(&[ItemKind::Wheat]),
        );
        store
            .get_mut(&mill_in)
            .unwrap()
            .add(0, ItemKind::Wheat, 6)
            .unwrap();
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Water, 1)
            .unwrap();

        // Water dropped on the wheat in the mill slot: the swap would put
        // Water into a Wheat-only slot, so nothing moves.
        begin_drag(&mut store, &mut drag, SlotRef::new(inv(), 0)).unwrap();
        let result =
            end_drag(&mut store, &mut drag, Some(SlotRef::new(mill_in.clone(), 0))).unwrap();

        assert_eq!(result, TransferResult::ReturnedToOrigin);
        assert_eq!(
            store.get(&mill_in).unwrap().stack_at(0).unwrap().quantity,
            6
        );
        assert_eq!(
            store.get(&inv()).unwrap().stack_at(0).unwrap().kind,
            ItemKind::Water
        );
    }

    #[test]
    fn conservation_across_a_gesture_sequence() {
        let (mut store, mut drag) = setup();
        store
            .get_mut(&inv())
            .unwrap()
            .add(0, ItemKind::Wheat, 5)
            .unwrap();
        store
            .get_mut(&storage())
            .unwrap()
            .add(0, ItemKind::Flour, 5)
            .unwrap();
        let wheat_before = population(&store, &drag, ItemKind::Wheat);
        let flour_before = population(&store, &drag, ItemKind::Flour);

        let gestures: Vec<(SlotRef, Option<SlotRef>)> = vec![
            (SlotRef::new(inv(), 0), Some(SlotRef::new(storage(), 0))), // swap
            (SlotRef::new(inv(), 0), Some(SlotRef::new(storage(), 1))), // place
            (SlotRef::new(storage(), 0), Some(SlotRef::new(storage(), 1))), // swap in place
            (SlotRef::new(storage(), 1), None),                         // return
        ];
        for (from, to) in gestures {
            begin_drag(&mut store, &mut drag, from).unwrap();
            let result = end_drag(&mut store, &mut drag, to).unwrap();
            assert_ne!(result, TransferResult::Lost);
            assert_eq!(population(&store, &drag, ItemKind::Wheat), wheat_before);
            assert_eq!(population(&store, &drag, ItemKind::Flour), flour_before);
        }
    }
}
