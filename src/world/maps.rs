//! Code-defined map data.
//!
//! Map files and their parsing are a host concern; the core consumes maps
//! as plain geometry plus metadata: solid regions, interactive regions
//! (world storage with a capacity hint, or a crafting station), and exit
//! regions paired with a destination map and spawn point. The two session
//! maps are defined here directly.

use bevy::prelude::*;

use crate::shared::*;

/// What an interactive region opens when the player interacts inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractiveKind {
    /// A world storage; `capacity` is the slot count used when the storage
    /// is first opened.
    Storage { capacity: usize },
    Station(StationKind),
}

#[derive(Debug, Clone)]
pub struct InteractiveRegion {
    /// Stable name; keys the region's container(s) in the store.
    pub name: String,
    pub rect: Rect,
    pub kind: InteractiveKind,
}

#[derive(Debug, Clone)]
pub struct ExitRegion {
    pub rect: Rect,
    pub to_map: MapId,
    /// Where the player appears on the destination map.
    pub spawn: Vec2,
}

#[derive(Debug, Clone)]
pub struct MapDef {
    pub id: MapId,
    pub pixel_width: f32,
    pub pixel_height: f32,
    pub background: Color,
    pub solids: Vec<Rect>,
    pub interactives: Vec<InteractiveRegion>,
    pub exits: Vec<ExitRegion>,
    /// Player spawn when the map is entered fresh (session start).
    pub default_spawn: Vec2,
}

fn tile_rect(tx: f32, ty: f32, tw: f32, th: f32) -> Rect {
    Rect::new(
        tx * TILE_SIZE,
        ty * TILE_SIZE,
        (tx + tw) * TILE_SIZE,
        (ty + th) * TILE_SIZE,
    )
}

pub fn generate_map(id: MapId) -> MapDef {
    match id {
        MapId::Meadow => meadow(),
        MapId::Cottage => cottage(),
    }
}

/// The outdoor map: larger than the window so the camera follows. Hosts
/// the well, the mill, the oven, and a storage crate by the barn wall.
fn meadow() -> MapDef {
    let width = 40.0 * TILE_SIZE; // 1920
    let height = 30.0 * TILE_SIZE; // 1440

    let mut solids = vec![
        // Map border walls
        tile_rect(0.0, 0.0, 40.0, 1.0),
        tile_rect(0.0, 29.0, 40.0, 1.0),
        tile_rect(0.0, 0.0, 1.0, 30.0),
        tile_rect(39.0, 0.0, 1.0, 30.0),
        // Pond
        tile_rect(28.0, 20.0, 6.0, 4.0),
        // Barn wall segment
        tile_rect(4.0, 4.0, 8.0, 2.0),
    ];

    let interactives = vec![
        InteractiveRegion {
            name: "well_1".to_string(),
            rect: tile_rect(20.0, 10.0, 2.0, 3.0),
            kind: InteractiveKind::Station(StationKind::Well),
        },
        InteractiveRegion {
            name: "mill_1".to_string(),
            rect: tile_rect(10.0, 18.0, 3.0, 4.0),
            kind: InteractiveKind::Station(StationKind::Mill),
        },
        InteractiveRegion {
            name: "oven_1".to_string(),
            rect: tile_rect(26.0, 6.0, 2.0, 3.0),
            kind: InteractiveKind::Station(StationKind::Oven),
        },
        InteractiveRegion {
            name: "barn_crate".to_string(),
            rect: tile_rect(6.0, 6.0, 2.0, 2.0),
            kind: InteractiveKind::Storage { capacity: 4 },
        },
    ];

    // Station bodies are solid too, so the player walks up to them rather
    // than through them.
    solids.push(tile_rect(20.0, 10.0, 2.0, 2.0));
    solids.push(tile_rect(10.0, 18.0, 3.0, 3.0));
    solids.push(tile_rect(26.0, 6.0, 2.0, 2.0));

    let exits = vec![ExitRegion {
        rect: tile_rect(38.0, 14.0, 1.0, 3.0),
        to_map: MapId::Cottage,
        spawn: Vec2::new(100.0, 100.0),
    }];

    MapDef {
        id: MapId::Meadow,
        pixel_width: width,
        pixel_height: height,
        background: Color::srgb(0.36, 0.6, 0.33),
        solids,
        interactives,
        exits,
        default_spawn: Vec2::new(300.0, 420.0),
    }
}

/// The indoor map: smaller than the window, so the camera sits fixed and
/// centered. One pantry storage, and the way back out.
fn cottage() -> MapDef {
    let width = 18.0 * TILE_SIZE; // 864
    let height = 14.0 * TILE_SIZE; // 672

    let solids = vec![
        tile_rect(0.0, 0.0, 18.0, 1.0),
        tile_rect(0.0, 13.0, 18.0, 1.0),
        tile_rect(0.0, 0.0, 1.0, 14.0),
        tile_rect(17.0, 0.0, 1.0, 14.0),
        // Table
        tile_rect(8.0, 6.0, 3.0, 2.0),
    ];

    let interactives = vec![InteractiveRegion {
        name: "pantry".to_string(),
        rect: tile_rect(14.0, 2.0, 2.0, 2.0),
        kind: InteractiveKind::Storage { capacity: 6 },
    }];

    let exits = vec![ExitRegion {
        rect: tile_rect(1.0, 11.0, 1.0, 2.0),
        to_map: MapId::Meadow,
        spawn: Vec2::new(100.0, 100.0),
    }];

    MapDef {
        id: MapId::Cottage,
        pixel_width: width,
        pixel_height: height,
        background: Color::srgb(0.55, 0.44, 0.3),
        solids,
        interactives,
        exits,
        default_spawn: Vec2::new(150.0, 150.0),
    }
}
