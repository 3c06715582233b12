//! Headless integration tests for Millbrook.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins (skipping all rendering/UI), and verify the boot
//! sequence, the transfer engine, stations, and map transitions.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use millbrook::items::{transfer, Container, ContainerStore, DragState};
use millbrook::shared::*;
use millbrook::stations::CraftingStation;
use millbrook::world::CurrentMap;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with the shared resources, events, and the
/// pure-logic domain plugins registered. No rendering, windowing, or
/// asset loading.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    app.init_state::<GameState>();

    app.init_resource::<KeyBindings>()
        .init_resource::<PlayerInput>()
        .init_resource::<InteractionState>();

    app.add_event::<MapTransitionEvent>()
        .add_event::<TransferResolvedEvent>()
        .add_event::<StationProducedEvent>();

    app.add_plugins(millbrook::items::ItemsPlugin)
        .add_plugins(millbrook::world::WorldPlugin)
        .add_plugins(millbrook::stations::StationsPlugin)
        .add_plugins(millbrook::player::PlayerPlugin);

    app
}

/// Ticks until the boot sequence has landed in `Playing`.
fn boot(app: &mut App) {
    app.update(); // OnEnter(Boot): seed containers, spawn map
    app.update(); // apply Boot -> Playing
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::Playing);
}

/// Runs a transfer gesture against the app's container store.
fn gesture(app: &mut App, from: SlotRef, to: Option<SlotRef>) -> TransferResult {
    app.world_mut()
        .resource_scope(|world, mut store: Mut<ContainerStore>| {
            let mut drag = world.resource_mut::<DragState>();
            transfer::begin_drag(&mut *store, &mut *drag, from).unwrap();
            transfer::end_drag(&mut *store, &mut *drag, to).unwrap()
        })
}

fn total_items(store: &ContainerStore) -> u32 {
    [
        ItemKind::Wheat,
        ItemKind::Flour,
        ItemKind::Water,
        ItemKind::Bread,
    ]
    .into_iter()
    .map(|kind| store.total_of(kind))
    .sum()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn boot_seeds_inventory_and_registers_stations() {
    let mut app = build_test_app();
    boot(&mut app);

    let store = app.world().resource::<ContainerStore>();
    let inventory = store.get(&ContainerId::Inventory).unwrap();
    assert_eq!(inventory.capacity(), INVENTORY_SLOTS);
    assert_eq!(inventory.total_of(ItemKind::Wheat), 5);
    assert_eq!(inventory.total_of(ItemKind::Flour), 5);

    // The meadow's stations got their containers when the map spawned.
    for id in ["well_1", "mill_1", "oven_1"] {
        assert!(store.contains(&ContainerId::StationInput(id.to_string())));
        assert!(store.contains(&ContainerId::StationOutput(id.to_string())));
    }

    // Storage containers are lazy; none exists before its first open.
    assert!(!store.contains(&ContainerId::Storage("barn_crate".to_string())));
}

// ─────────────────────────────────────────────────────────────────────────────
// Transfers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn drag_from_inventory_into_storage_places_the_stack() {
    let mut app = build_test_app();
    boot(&mut app);

    app.world_mut()
        .resource_mut::<ContainerStore>()
        .insert(ContainerId::Storage("barn_crate".into()), Container::new(4));

    let result = gesture(
        &mut app,
        SlotRef::new(ContainerId::Inventory, 0),
        Some(SlotRef::new(ContainerId::Storage("barn_crate".into()), 2)),
    );
    assert_eq!(result, TransferResult::Placed);

    let store = app.world().resource::<ContainerStore>();
    assert_eq!(store.get(&ContainerId::Inventory).unwrap().total_of(ItemKind::Wheat), 0);
    let crate_box = store.get(&ContainerId::Storage("barn_crate".into())).unwrap();
    assert_eq!(crate_box.stack_at(2).unwrap().quantity, 5);
}

#[test]
fn mill_input_accepts_wheat_and_returns_flour_to_origin() {
    let mut app = build_test_app();
    boot(&mut app);

    // Wheat lands in the mill's restricted input slot.
    let result = gesture(
        &mut app,
        SlotRef::new(ContainerId::Inventory, 0),
        Some(SlotRef::new(ContainerId::StationInput("mill_1".into()), 0)),
    );
    assert_eq!(result, TransferResult::Placed);

    // Flour bounces back to where it came from.
    let result = gesture(
        &mut app,
        SlotRef::new(ContainerId::Inventory, 1),
        Some(SlotRef::new(ContainerId::StationInput("mill_1".into()), 0)),
    );
    assert_eq!(result, TransferResult::ReturnedToOrigin);

    let store = app.world().resource::<ContainerStore>();
    assert_eq!(store.get(&ContainerId::Inventory).unwrap().total_of(ItemKind::Flour), 5);
    let mill_input = store.get(&ContainerId::StationInput("mill_1".into())).unwrap();
    assert_eq!(mill_input.stack_at(0).unwrap().kind, ItemKind::Wheat);
}

#[test]
fn gesture_sequences_conserve_items() {
    let mut app = build_test_app();
    boot(&mut app);

    app.world_mut()
        .resource_mut::<ContainerStore>()
        .insert(ContainerId::Storage("barn_crate".into()), Container::new(4));

    let before = total_items(app.world().resource::<ContainerStore>());

    let inventory = |i| SlotRef::new(ContainerId::Inventory, i);
    let crate_slot = |i| SlotRef::new(ContainerId::Storage("barn_crate".into()), i);

    gesture(&mut app, inventory(0), Some(crate_slot(0))); // place
    gesture(&mut app, inventory(1), Some(crate_slot(0))); // swap (flour vs wheat)
    gesture(&mut app, crate_slot(0), Some(inventory(1))); // back out
    gesture(&mut app, inventory(1), None); // released over nothing
    gesture(&mut app, crate_slot(0), Some(crate_slot(0))); // dropped on own slot

    let after = total_items(app.world().resource::<ContainerStore>());
    assert_eq!(before, after);
}

// ─────────────────────────────────────────────────────────────────────────────
// Stations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn open_well_produces_water_every_full_cycle() {
    let mut app = build_test_app();
    boot(&mut app);

    // Open the well's interface directly; the sync system follows the
    // interaction state, so mark the panel open too.
    app.world_mut().resource_mut::<InteractionState>().open = Some(OpenPanel::Station {
        id: "well_1".into(),
        kind: StationKind::Well,
    });

    for _ in 0..(PROGRESS_MAX as usize) {
        app.update();
    }

    let store = app.world().resource::<ContainerStore>();
    let output = store.get(&ContainerId::StationOutput("well_1".into())).unwrap();
    assert_eq!(output.total_of(ItemKind::Water), 1);

    let mut stations = app.world_mut().query::<&CraftingStation>();
    let well = stations
        .iter(app.world())
        .find(|s| s.id == "well_1")
        .unwrap();
    assert_eq!(well.produced, 1);
    assert!(well.progress < PROGRESS_MAX);

    // The completion was announced. The cycle wrapped on the last tick, so
    // the event is still in the buffer.
    let events = app.world().resource::<Events<StationProducedEvent>>();
    let mut cursor = events.get_cursor();
    let fired: Vec<_> = cursor.read(events).collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].station, "well_1");
    assert_eq!(fired[0].kind, StationKind::Well);
}

#[test]
fn closed_stations_do_not_progress() {
    let mut app = build_test_app();
    boot(&mut app);

    for _ in 0..50 {
        app.update();
    }

    let mut stations = app.world_mut().query::<&CraftingStation>();
    for station in stations.iter(app.world()) {
        assert_eq!(station.progress, 0, "{} progressed while closed", station.id);
        assert_eq!(station.produced, 0);
    }
}

#[test]
fn station_progress_survives_closing_the_panel() {
    let mut app = build_test_app();
    boot(&mut app);

    let open = Some(OpenPanel::Station {
        id: "well_1".into(),
        kind: StationKind::Well,
    });
    app.world_mut().resource_mut::<InteractionState>().open = open.clone();
    for _ in 0..30 {
        app.update();
    }

    app.world_mut().resource_mut::<InteractionState>().open = None;
    for _ in 0..30 {
        app.update();
    }

    let mut stations = app.world_mut().query::<&CraftingStation>();
    let well = stations
        .iter(app.world())
        .find(|s| s.id == "well_1")
        .unwrap();
    assert!(
        well.progress >= 29 && well.progress <= 31,
        "progress should pause, not reset: {}",
        well.progress
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Interaction & maps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn interact_key_near_the_crate_opens_storage() {
    let mut app = build_test_app();
    boot(&mut app);
    app.update(); // OnEnter(Playing): spawn the player

    // Stand just right of the barn crate region.
    let mut players = app
        .world_mut()
        .query_filtered::<&mut Transform, With<Player>>();
    let mut transform = players.single_mut(app.world_mut());
    transform.translation.x = 420.0;
    transform.translation.y = 336.0;

    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();

    let interaction = app.world().resource::<InteractionState>();
    assert_eq!(
        interaction.open,
        Some(OpenPanel::Storage {
            id: "barn_crate".into()
        })
    );

    let store = app.world().resource::<ContainerStore>();
    let crate_box = store.get(&ContainerId::Storage("barn_crate".into())).unwrap();
    assert_eq!(crate_box.capacity(), 4);
}

#[test]
fn map_transition_swaps_the_map_and_keeps_containers() {
    let mut app = build_test_app();
    boot(&mut app);

    // Stash something in a storage first.
    app.world_mut()
        .resource_mut::<ContainerStore>()
        .insert(ContainerId::Storage("barn_crate".into()), Container::new(4));
    gesture(
        &mut app,
        SlotRef::new(ContainerId::Inventory, 0),
        Some(SlotRef::new(ContainerId::Storage("barn_crate".into()), 0)),
    );

    app.world_mut().send_event(MapTransitionEvent {
        to_map: MapId::Cottage,
        spawn: Vec2::new(100.0, 100.0),
    });
    app.update();

    assert_eq!(app.world().resource::<CurrentMap>().def.id, MapId::Cottage);

    let store = app.world().resource::<ContainerStore>();
    let crate_box = store.get(&ContainerId::Storage("barn_crate".into())).unwrap();
    assert_eq!(crate_box.total_of(ItemKind::Wheat), 5);
    assert_eq!(store.get(&ContainerId::Inventory).unwrap().total_of(ItemKind::Flour), 5);
}
