//! World domain plugin for Millbrook.
//!
//! Responsible for:
//! - Holding the current map definition (geometry + region metadata)
//! - Spawning map visuals and station entities when a map loads
//! - Map transitions through exit regions
//!
//! Map data is code-defined (`maps.rs`); no tile-file parsing happens here.

use bevy::prelude::*;

use crate::shared::*;
use crate::stations::CraftingStation;

pub mod maps;

use maps::{generate_map, InteractiveKind, MapDef};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentMap>()
            .add_systems(OnEnter(GameState::Boot), (spawn_initial_map, finish_boot).chain())
            .add_systems(
                Update,
                (check_exit_regions, handle_map_transition)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// The currently loaded map. Defaults to the meadow so any system that
/// runs before the boot sequence still sees valid geometry.
#[derive(Resource, Debug, Clone)]
pub struct CurrentMap {
    pub def: MapDef,
}

impl Default for CurrentMap {
    fn default() -> Self {
        Self {
            def: generate_map(MapId::Meadow),
        }
    }
}

impl CurrentMap {
    /// Whether a collider rect at this position hits a solid region or
    /// leaves the map. Exits are intentionally not solid.
    pub fn is_blocked(&self, collider: Rect) -> bool {
        if collider.min.x < 0.0
            || collider.min.y < 0.0
            || collider.max.x > self.def.pixel_width
            || collider.max.y > self.def.pixel_height
        {
            return true;
        }
        self.def
            .solids
            .iter()
            .any(|solid| !solid.intersect(collider).is_empty())
    }

    /// The interactive region containing the player's collider, if any.
    pub fn interactive_at(&self, collider: Rect) -> Option<&maps::InteractiveRegion> {
        self.def
            .interactives
            .iter()
            .find(|region| !region.rect.intersect(collider).is_empty())
    }
}

/// Marker for everything spawned per-map (visuals and region markers), so
/// a transition can despawn the lot.
#[derive(Component, Debug)]
pub struct MapDecor;

// ═══════════════════════════════════════════════════════════════════════
// MAP LOADING
// ═══════════════════════════════════════════════════════════════════════

fn region_center(rect: Rect) -> Vec3 {
    let c = rect.center();
    Vec3::new(c.x, c.y, 1.0)
}

/// Spawn the visual layer and station entities for a map definition.
/// Containers for stations are registered here so a station is usable the
/// moment it exists; storage containers wait for their first open (they
/// need no slot restrictions, only the capacity hint).
fn spawn_map(commands: &mut Commands, store: &mut crate::items::ContainerStore, def: &MapDef) {
    // Background
    commands.spawn((
        MapDecor,
        Sprite {
            color: def.background,
            custom_size: Some(Vec2::new(def.pixel_width, def.pixel_height)),
            ..default()
        },
        Transform::from_xyz(def.pixel_width / 2.0, def.pixel_height / 2.0, 0.0),
    ));

    // Solid regions
    for solid in &def.solids {
        commands.spawn((
            MapDecor,
            Sprite {
                color: Color::srgb(0.25, 0.22, 0.18),
                custom_size: Some(solid.size()),
                ..default()
            },
            Transform::from_translation(region_center(*solid)),
        ));
    }

    // Exit regions
    for exit in &def.exits {
        commands.spawn((
            MapDecor,
            Sprite {
                color: Color::srgba(0.9, 0.85, 0.3, 0.55),
                custom_size: Some(exit.rect.size()),
                ..default()
            },
            Transform::from_translation(region_center(exit.rect)),
        ));
    }

    // Interactive regions: tinted marker, plus a station entity where the
    // region hosts one.
    for region in &def.interactives {
        let tint = match region.kind {
            InteractiveKind::Storage { .. } => Color::srgb(0.55, 0.35, 0.15),
            InteractiveKind::Station(StationKind::Oven) => Color::srgb(0.7, 0.25, 0.2),
            InteractiveKind::Station(StationKind::Mill) => Color::srgb(0.6, 0.55, 0.4),
            InteractiveKind::Station(StationKind::Well) => Color::srgb(0.35, 0.4, 0.6),
        };
        commands.spawn((
            MapDecor,
            Sprite {
                color: tint,
                custom_size: Some(region.rect.size()),
                ..default()
            },
            Transform::from_translation(region_center(region.rect)),
        ));

        if let InteractiveKind::Station(kind) = region.kind {
            crate::items::ensure_station_containers(store, &region.name, kind);
            commands.spawn((
                MapDecor,
                CraftingStation::new(kind, region.name.clone(), region.rect),
            ));
        }
    }

    info!(
        "Loaded map {:?} ({} solids, {} interactives, {} exits)",
        def.id,
        def.solids.len(),
        def.interactives.len(),
        def.exits.len()
    );
}

fn spawn_initial_map(
    mut commands: Commands,
    mut store: ResMut<crate::items::ContainerStore>,
    current: Res<CurrentMap>,
) {
    spawn_map(&mut commands, &mut store, &current.def);
}

fn finish_boot(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Playing);
}

// ═══════════════════════════════════════════════════════════════════════
// TRANSITIONS
// ═══════════════════════════════════════════════════════════════════════

/// Walking into an exit region requests a transition. Suppressed while a
/// panel is open (movement is locked then anyway).
fn check_exit_regions(
    current: Res<CurrentMap>,
    interaction: Res<InteractionState>,
    player_query: Query<&Transform, With<Player>>,
    mut transitions: EventWriter<MapTransitionEvent>,
) {
    if interaction.is_panel_open() {
        return;
    }
    let Ok(transform) = player_query.get_single() else {
        return;
    };
    let collider = player_collider(transform.translation.truncate());

    for exit in &current.def.exits {
        if !exit.rect.intersect(collider).is_empty() {
            info!("Transitioning to {:?}", exit.to_map);
            transitions.send(MapTransitionEvent {
                to_map: exit.to_map,
                spawn: exit.spawn,
            });
            break;
        }
    }
}

/// Tear down the old map, load the new one, and reposition the player.
/// Containers are never torn down; a named storage keeps its contents
/// across any number of map changes.
fn handle_map_transition(
    mut commands: Commands,
    mut events: EventReader<MapTransitionEvent>,
    decor_query: Query<Entity, With<MapDecor>>,
    mut current: ResMut<CurrentMap>,
    mut store: ResMut<crate::items::ContainerStore>,
    mut interaction: ResMut<InteractionState>,
    mut player_query: Query<&mut Transform, With<Player>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if event.to_map == current.def.id {
        return;
    }

    for entity in decor_query.iter() {
        commands.entity(entity).despawn();
    }

    current.def = generate_map(event.to_map);
    interaction.open = None;
    let def = current.def.clone();
    spawn_map(&mut commands, &mut store, &def);

    if let Ok(mut transform) = player_query.get_single_mut() {
        transform.translation.x = event.spawn.x;
        transform.translation.y = event.spawn.y;
    }
}
