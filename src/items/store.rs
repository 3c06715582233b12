//! Session-wide container ownership.
//!
//! Every container (the player inventory, world storages, station input
//! and output rows) is owned by exactly one `ContainerStore` keyed by
//! `ContainerId`. Nothing else holds a slot array, so every mutation goes
//! through one resource and completes before the next begins.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

use super::container::Container;

#[derive(Resource, Debug, Default)]
pub struct ContainerStore {
    containers: HashMap<ContainerId, Container>,
}

impl ContainerStore {
    pub fn insert(&mut self, id: ContainerId, container: Container) {
        self.containers.insert(id, container);
    }

    /// Create the container if this id has never been seen, keeping any
    /// existing contents. World storages are registered this way on first
    /// open, using the capacity hint carried by the map region.
    pub fn ensure_with(&mut self, id: ContainerId, build: impl FnOnce() -> Container) {
        self.containers.entry(id).or_insert_with(build);
    }

    pub fn get(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn get_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    pub fn contains(&self, id: &ContainerId) -> bool {
        self.containers.contains_key(id)
    }

    /// Total quantity of one kind across every container. Together with the
    /// carried stack of an active drag this is the whole item population.
    pub fn total_of(&self, kind: ItemKind) -> u32 {
        self.containers.values().map(|c| c.total_of(kind)).sum()
    }
}

/// Registers the station's input and output containers under its region
/// name. Idempotent: revisiting a map keeps whatever the station held.
pub fn ensure_station_containers(store: &mut ContainerStore, id: &str, kind: StationKind) {
    store.ensure_with(ContainerId::StationInput(id.to_string()), || {
        Container::with_accepted(kind.input_slots())
    });
    store.ensure_with(ContainerId::StationOutput(id.to_string()), || {
        Container::new(kind.output_capacity())
    });
}

/// Seeds the session containers: the 8-slot player inventory starts with
/// a little wheat and flour to play with.
pub fn seed_session(mut store: ResMut<ContainerStore>) {
    let mut inventory = Container::new(INVENTORY_SLOTS);
    if let Err(err) = inventory
        .deposit(ItemKind::Wheat, 5)
        .and_then(|_| inventory.deposit(ItemKind::Flour, 5))
    {
        warn!("failed to seed starting inventory: {err:?}");
    }
    store.insert(ContainerId::Inventory, inventory);
    info!("Session containers seeded");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_with_keeps_existing_contents() {
        let mut store = ContainerStore::default();
        let id = ContainerId::Storage("barn".to_string());
        store.ensure_with(id.clone(), || Container::new(4));
        store
            .get_mut(&id)
            .unwrap()
            .add(0, ItemKind::Wheat, 3)
            .unwrap();

        // Re-opening the same storage must not wipe it.
        store.ensure_with(id.clone(), || Container::new(4));
        assert_eq!(store.get(&id).unwrap().total_of(ItemKind::Wheat), 3);
    }

    #[test]
    fn station_containers_have_configured_shapes() {
        let mut store = ContainerStore::default();
        ensure_station_containers(&mut store, "oven_1", StationKind::Oven);

        let input = store
            .get(&ContainerId::StationInput("oven_1".to_string()))
            .unwrap();
        assert_eq!(input.capacity(), 2);
        assert_eq!(input.slot(0).unwrap().accepted, Some(ItemKind::Water));
        assert_eq!(input.slot(1).unwrap().accepted, Some(ItemKind::Flour));

        let output = store
            .get(&ContainerId::StationOutput("oven_1".to_string()))
            .unwrap();
        assert_eq!(output.capacity(), STATION_OUTPUT_SLOTS);
    }
}
