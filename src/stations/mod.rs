//! Stations domain: the oven, mill, and well.
//!
//! Station entities are spawned by the world domain when a map loads; this
//! plugin owns their per-frame behavior: progress ticking and the
//! production rule that fires when the bar wraps.

use bevy::prelude::*;

use crate::items::ContainerStore;
use crate::shared::*;

pub mod station;

pub use station::CraftingStation;

pub struct StationsPlugin;

impl Plugin for StationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_station_open_flags, tick_stations)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Advance every open station by one step per frame. On completion, apply
/// the kind's production rule.
fn tick_stations(
    mut stations: Query<&mut CraftingStation>,
    mut store: ResMut<ContainerStore>,
    mut produced_events: EventWriter<StationProducedEvent>,
) {
    for mut station in stations.iter_mut() {
        if !station.advance_progress(PROGRESS_STEP) {
            continue;
        }

        match station.kind.production() {
            ProductionRule::CounterOnly => {}
            ProductionRule::Emit(kind) => {
                let output_id = ContainerId::StationOutput(station.id.clone());
                match store.get_mut(&output_id) {
                    Some(output) => {
                        if let Err(err) = output.deposit(kind, 1) {
                            // Output row full: the cycle still counts, the
                            // item does not appear.
                            warn!(
                                "{} output full, dropped {:?} ({err:?})",
                                station.id, kind
                            );
                        }
                    }
                    None => warn!("{} has no output container", station.id),
                }
            }
        }

        info!(
            "{} ({}) completed cycle #{}",
            station.kind.display_name(),
            station.id,
            station.produced
        );
        produced_events.send(StationProducedEvent {
            station: station.id.clone(),
            kind: station.kind,
        });
    }
}

/// Keep station `open` flags honest against the interaction controller:
/// if the panel for a station was closed (or another panel opened), the
/// station must stop progressing.
fn sync_station_open_flags(
    interaction: Res<InteractionState>,
    mut stations: Query<&mut CraftingStation>,
) {
    let open_id = interaction.open_station_id();
    for mut station in stations.iter_mut() {
        let should_be_open = open_id == Some(station.id.as_str());
        if station.open != should_be_open {
            // Progress is deliberately kept across close/open; only the
            // ticking stops.
            station.open = should_be_open;
        }
    }
}
