//! The game client seen by an organizer run.

use std::time::Duration;

use thiserror::Error;
use yao_filter_rs::Item;

/// Delay after opening a container or moving an item, so the client can
/// catch up.
pub const ACTION_DELAY: Duration = Duration::from_secs(1);

/// Errors reported by a game client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The item is not known to the client.
    #[error("item 0x{serial:x} not found")]
    ItemNotFound {
        /// Serial that was looked up.
        serial: u32,
    },

    /// The target container is not known to the client.
    #[error("container 0x{serial:x} not found")]
    ContainerNotFound {
        /// Serial that was looked up.
        serial: u32,
    },

    /// The client refused the action.
    #[error("{0}")]
    Rejected(String),
}

/// Result type for client actions.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Operations an organizer run needs from the game.
///
/// Serials are the game's item identities. Lookups return `None` when the
/// item is not known (not loaded, out of range, or gone).
pub trait GameClient {
    /// Serial of the player's backpack.
    fn backpack(&self) -> u32;

    /// Serial of the player's bank box.
    fn bank(&self) -> u32;

    /// Asks the operator to target a container.
    fn request_target(&mut self) -> Option<u32>;

    /// Looks up an item by serial.
    fn find_item(&self, serial: u32) -> Option<Item>;

    /// Finds the first item of the given type near the player.
    fn find_type(&self, graphic: u32) -> Option<Item>;

    /// Items directly inside a container (not recursive).
    fn items_in_container(&self, container: u32) -> Vec<Item>;

    /// The name-and-properties block of an item.
    fn name_and_properties(&self, serial: u32) -> Option<String>;

    /// Uses (double-clicks) an object. For containers this opens them.
    fn use_object(&mut self, serial: u32) -> ClientResult<()>;

    /// Walks until the object is within reach. Returns false if it could
    /// not be reached within `max_attempts` pathfinding attempts.
    fn move_within_reach(&mut self, serial: u32, max_attempts: u32) -> bool;

    /// Moves an item into a container.
    fn move_item(&mut self, serial: u32, destination: u32) -> ClientResult<()>;

    /// Waits for the client.
    fn pause(&mut self, duration: Duration);

    /// Shows a message to the operator.
    fn system_message(&mut self, message: &str);

    /// Opens a container and waits for its contents.
    ///
    /// Returns the container serial, or `None` (after telling the operator)
    /// when the container cannot be found or opened.
    fn open_container(&mut self, serial: u32) -> Option<u32> {
        if self.find_item(serial).is_none() {
            self.system_message(&format!("Failed to find container (0x{serial:x})"));
            return None;
        }
        if let Err(e) = self.use_object(serial) {
            self.system_message(&format!("Failed to open container (0x{serial:x}): {e}"));
            return None;
        }
        self.pause(ACTION_DELAY);
        Some(serial)
    }
}
