//! Shared components, resources, events, and states for Millbrook.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    /// One-frame setup state: seed the player inventory, build the first map.
    #[default]
    Boot,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════

/// Every item type in the game. Two stacks are mergeable iff their kind
/// is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Wheat,
    Flour,
    Water,
    Bread,
}

impl ItemKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::Wheat => "Wheat",
            ItemKind::Flour => "Flour",
            ItemKind::Water => "Water",
            ItemKind::Bread => "Bread",
        }
    }

    /// Placeholder swatch for slot rendering until real item art exists.
    pub fn swatch(self) -> Color {
        match self {
            ItemKind::Wheat => Color::srgb(0.85, 0.72, 0.3),
            ItemKind::Flour => Color::srgb(0.92, 0.9, 0.85),
            ItemKind::Water => Color::srgb(0.25, 0.45, 0.85),
            ItemKind::Bread => Color::srgb(0.72, 0.5, 0.25),
        }
    }
}

/// A kind paired with a positive quantity. A slot never holds a zero-stack;
/// emptiness is `Option::None` at the slot level.
///
/// Quantities are deliberately uncapped; there is no maximum stack size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub quantity: u32,
}

impl ItemStack {
    /// Returns `None` for quantity 0 so a zero-stack can never be built.
    pub fn new(kind: ItemKind, quantity: u32) -> Option<Self> {
        if quantity == 0 {
            None
        } else {
            Some(Self { kind, quantity })
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONTAINER ADDRESSING
// ═══════════════════════════════════════════════════════════════════════

/// Identifies one container in the session-wide `ContainerStore`.
///
/// Storage and station containers are keyed by the region name the map
/// assigns them, so the same named storage keeps its contents across map
/// reloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerId {
    Inventory,
    Storage(String),
    StationInput(String),
    StationOutput(String),
}

/// One addressable slot: a container plus an index into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub container: ContainerId,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(container: ContainerId, slot: usize) -> Self {
        Self { container, slot }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TRANSFER OUTCOMES & ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Outcome of resolving a drop against the active drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferResult {
    /// Carried stack placed into an empty target slot.
    Placed,
    /// Carried stack merged onto a same-kind target stack.
    Merged,
    /// Carried stack and the target's stack traded places.
    Swapped,
    /// Carried stack went back to the origin container.
    ReturnedToOrigin,
    /// The origin container had no room left for the return; the stack is
    /// gone. Kept for fidelity with the original behavior, surfaced as an
    /// explicit variant so callers and tests can detect it.
    Lost,
}

/// Local, recoverable item-transfer conditions. None of these ever
/// terminate the frame loop; they only change which `TransferResult` is
/// produced (or reject a drag before it starts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// The slot's accepted kind differs from the stack being added.
    SlotIncompatible,
    /// Add attempted against a full, mismatched, unrestricted slot.
    /// Callers must swap explicitly instead.
    SlotOccupiedByOtherKind,
    /// `end_drag` called with no drag in flight.
    NoActiveDrag,
    /// `begin_drag` called while a drag is already in flight.
    DragAlreadyActive,
    /// No empty slot available during the return-to-origin fallback.
    ContainerFull,
}

// ═══════════════════════════════════════════════════════════════════════
// STATIONS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    Oven,
    Mill,
    Well,
}

/// What a station does when its progress bar wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionRule {
    /// Bump the produced counter only.
    CounterOnly,
    /// Bump the counter and deposit one of the given kind into the
    /// station's output container.
    Emit(ItemKind),
}

impl StationKind {
    pub fn display_name(self) -> &'static str {
        match self {
            StationKind::Oven => "Oven",
            StationKind::Mill => "Mill",
            StationKind::Well => "Well",
        }
    }

    /// Accepted kind per input slot. The slice length is the input capacity.
    pub fn input_slots(self) -> &'static [ItemKind] {
        match self {
            StationKind::Oven => &[ItemKind::Water, ItemKind::Flour],
            StationKind::Mill => &[ItemKind::Wheat],
            StationKind::Well => &[],
        }
    }

    pub fn output_capacity(self) -> usize {
        STATION_OUTPUT_SLOTS
    }

    pub fn production(self) -> ProductionRule {
        match self {
            // Recipe-style input consumption is an extension point; the
            // oven and mill only count completed cycles for now.
            StationKind::Oven | StationKind::Mill => ProductionRule::CounterOnly,
            StationKind::Well => ProductionRule::Emit(ItemKind::Water),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD & MAPS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapId {
    Meadow,
    Cottage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Facing::Down
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: PLAYER_SPEED,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INTERACTION CONTROLLER
// ═══════════════════════════════════════════════════════════════════════

/// Which overlay panel is currently open, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenPanel {
    Storage { id: String },
    Station { id: String, kind: StationKind },
}

/// The single interaction context for one game session. Replaces the
/// scattered open/closed toggle flags of earlier drafts: UI-open state and
/// the interact-key repeat cooldown live here and nowhere else.
#[derive(Resource, Debug)]
pub struct InteractionState {
    pub open: Option<OpenPanel>,
    pub cooldown: Timer,
}

impl Default for InteractionState {
    fn default() -> Self {
        let mut cooldown = Timer::from_seconds(INTERACT_COOLDOWN_SECS, TimerMode::Once);
        // Start expired so the very first interact press registers.
        cooldown.tick(cooldown.duration());
        Self {
            open: None,
            cooldown,
        }
    }
}

impl InteractionState {
    pub fn is_panel_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_station_id(&self) -> Option<&str> {
        match &self.open {
            Some(OpenPanel::Station { id, .. }) => Some(id),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::KeyE,
            cancel: KeyCode::Escape,
        }
    }
}

/// The frame's hardware input translated into game actions. Written once
/// per frame in `PreUpdate`; every other system only reads it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub interact: bool,
    pub cancel: bool,
    /// Cursor position in screen coordinates (top-left origin), if the
    /// cursor is inside the window.
    pub pointer: Option<Vec2>,
    pub pointer_pressed: bool,
    pub pointer_released: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct MapTransitionEvent {
    pub to_map: MapId,
    pub spawn: Vec2,
}

/// Fired after every `end_drag`, successful or not, so UI/logging can react
/// without re-deriving the outcome.
#[derive(Event, Debug, Clone)]
pub struct TransferResolvedEvent {
    pub result: TransferResult,
    pub kind: ItemKind,
    pub quantity: u32,
}

/// A station's progress bar wrapped and its production rule fired.
#[derive(Event, Debug, Clone)]
pub struct StationProducedEvent {
    pub station: String,
    pub kind: StationKind,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 1400.0;
pub const SCREEN_HEIGHT: f32 = 900.0;

pub const TILE_SIZE: f32 = 48.0; // 16 px art at 3× scale
pub const PLAYER_SPEED: f32 = 200.0; // px/s

/// Collision footprint, smaller than the sprite so the player can slip
/// through tile-wide gaps. Anchored at the feet end of the sprite.
pub const PLAYER_COLLIDER_SIZE: Vec2 = Vec2::new(36.0, 24.0);

/// World-space collision rect for a player standing at `pos`.
pub fn player_collider(pos: Vec2) -> Rect {
    Rect::from_center_size(pos - Vec2::new(0.0, TILE_SIZE * 0.25), PLAYER_COLLIDER_SIZE)
}

pub const INVENTORY_SLOTS: usize = 8;
pub const STATION_OUTPUT_SLOTS: usize = 3;

pub const PROGRESS_MAX: u8 = 100;
pub const PROGRESS_STEP: u8 = 1; // per Update tick while a panel is open

pub const INTERACT_COOLDOWN_SECS: f32 = 0.3;

// UI slot geometry (screen coordinates, top-left origin)
pub const SLOT_SIZE: f32 = 64.0;
pub const SLOT_PADDING: f32 = 6.0;
