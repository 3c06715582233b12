//! Items domain: containers, the container store, the drag session, and
//! drop resolution. The UI translates pointer gestures into calls to
//! `transfer::begin_drag` / `transfer::end_drag`; nothing else moves items.

use bevy::prelude::*;

use crate::shared::*;

pub mod container;
pub mod drag;
pub mod store;
pub mod transfer;

pub use container::{Container, Slot};
pub use drag::DragState;
pub use store::{ensure_station_containers, ContainerStore};

pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContainerStore>()
            .init_resource::<DragState>()
            .add_systems(OnEnter(GameState::Boot), store::seed_session)
            .add_systems(Update, log_transfer_results.run_if(in_state(GameState::Playing)));
    }
}

/// Logs every resolved transfer. `Lost` gets a warning; it is the one
/// outcome that destroys items and deserves visibility in the log stream.
fn log_transfer_results(mut events: EventReader<TransferResolvedEvent>) {
    for event in events.read() {
        match event.result {
            TransferResult::Lost => warn!(
                "transfer lost {:?} x{}",
                event.kind, event.quantity
            ),
            result => debug!(
                "transfer {:?}: {:?} x{}",
                result, event.kind, event.quantity
            ),
        }
    }
}
