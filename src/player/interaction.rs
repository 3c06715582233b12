use bevy::prelude::*;

use crate::items::{Container, ContainerStore};
use crate::shared::*;
use crate::stations::CraftingStation;
use crate::world::CurrentMap;
use crate::world::maps::InteractiveKind;

/// How far beyond the collision footprint the interact key reaches.
const INTERACT_REACH: f32 = TILE_SIZE * 0.75;

/// The interact-key controller. One system owns the whole open/close life of
/// overlay panels:
///
/// - panel open: E or Escape closes it
/// - panel closed: E over an interactive region opens storage or toggles a
///   station interface
///
/// The cooldown stops a held key from flapping a panel open and shut.
pub fn interact_with_world(
    time: Res<Time>,
    input: Res<PlayerInput>,
    current: Res<CurrentMap>,
    mut interaction: ResMut<InteractionState>,
    mut store: ResMut<ContainerStore>,
    mut stations: Query<&mut CraftingStation>,
    player_query: Query<&Transform, With<Player>>,
) {
    interaction.cooldown.tick(time.delta());

    if interaction.is_panel_open() {
        if (input.interact || input.cancel) && interaction.cooldown.finished() {
            if let Some(OpenPanel::Station { id, .. }) = &interaction.open {
                if let Some(mut station) = stations.iter_mut().find(|s| &s.id == id) {
                    station.toggle_interface(true);
                }
            }
            interaction.open = None;
            interaction.cooldown.reset();
        }
        return;
    }

    if !input.interact || !interaction.cooldown.finished() {
        return;
    }
    let Ok(transform) = player_query.get_single() else {
        return;
    };

    let reach = player_collider(transform.translation.truncate()).inflate(INTERACT_REACH);
    let Some(region) = current.interactive_at(reach) else {
        return;
    };

    match region.kind {
        InteractiveKind::Storage { capacity } => {
            // Storages are created lazily with the capacity hint from the
            // map; reopening an existing one keeps its contents.
            store.ensure_with(ContainerId::Storage(region.name.clone()), || {
                Container::new(capacity)
            });
            info!("Opened storage '{}'", region.name);
            interaction.open = Some(OpenPanel::Storage {
                id: region.name.clone(),
            });
            interaction.cooldown.reset();
        }
        InteractiveKind::Station(kind) => {
            let Some(mut station) = stations.iter_mut().find(|s| s.id == region.name) else {
                warn!("No station entity for region '{}'", region.name);
                return;
            };
            if station.toggle_interface(true) && station.open {
                info!("Opened {} '{}'", kind.display_name(), region.name);
                interaction.open = Some(OpenPanel::Station {
                    id: region.name.clone(),
                    kind,
                });
            }
            interaction.cooldown.reset();
        }
    }
}
