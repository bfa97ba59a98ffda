//! In-memory game client backed by a snapshot of containers.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use yao_filter_rs::Item;

use crate::capacity::{parse_contents, ContentsLine};
use crate::client::{ClientError, ClientResult, GameClient};

/// A saved view of the player's containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Serial of the player's backpack.
    pub backpack: u32,

    /// Serial of the player's bank box.
    pub bank: u32,

    /// Container returned when the operator is asked to target one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_target: Option<u32>,

    /// Every known item, including containers. `container` links an item
    /// to the container holding it.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Looks up an item by serial.
    pub fn find(&self, serial: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.serial == serial)
    }

    /// Items directly inside a container.
    pub fn items_in(&self, container: u32) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.container == Some(container))
    }

    fn find_mut(&mut self, serial: u32) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.serial == serial)
    }

    fn is_player_container(&self, serial: u32) -> bool {
        serial == self.backpack || serial == self.bank
    }
}

/// A [`GameClient`] that plays an organizer run against a [`Snapshot`].
///
/// Moves rewrite the item's `container` and keep the `Contents:` lines of
/// both containers in step. Pauses are accumulated instead of slept.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    snapshot: Snapshot,
    opened: BTreeSet<u32>,
    messages: Vec<String>,
    paused: Duration,
}

impl SnapshotClient {
    /// Creates a client over a snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            opened: BTreeSet::new(),
            messages: Vec::new(),
            paused: Duration::ZERO,
        }
    }

    /// Overrides the container returned by [`GameClient::request_target`].
    pub fn with_prompt_target(mut self, serial: u32) -> Self {
        self.snapshot.prompt_target = Some(serial);
        self
    }

    /// The current state of the snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Consumes the client, returning the updated snapshot.
    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Containers opened so far, in serial order.
    pub fn opened(&self) -> &BTreeSet<u32> {
        &self.opened
    }

    /// Messages shown to the operator so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Total time the run asked to wait.
    pub fn paused(&self) -> Duration {
        self.paused
    }

    fn exists(&self, serial: u32) -> bool {
        self.snapshot.is_player_container(serial) || self.snapshot.find(serial).is_some()
    }

    /// Returns true if `container` is `serial` or nested anywhere inside it.
    fn is_within(&self, container: u32, serial: u32) -> bool {
        let mut seen = BTreeSet::new();
        let mut cursor = Some(container);
        while let Some(current) = cursor {
            if current == serial {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            cursor = self.snapshot.find(current).and_then(|item| item.container);
        }
        false
    }

    fn adjust_contents(&mut self, container: u32, delta: i64) {
        if let Some(item) = self.snapshot.find_mut(container) {
            let updated = item
                .name_and_properties
                .as_deref()
                .map(|block| bump_contents(block, delta));
            if updated.is_some() {
                item.name_and_properties = updated;
            }
        }
    }
}

impl GameClient for SnapshotClient {
    fn backpack(&self) -> u32 {
        self.snapshot.backpack
    }

    fn bank(&self) -> u32 {
        self.snapshot.bank
    }

    fn request_target(&mut self) -> Option<u32> {
        self.snapshot.prompt_target
    }

    fn find_item(&self, serial: u32) -> Option<Item> {
        match self.snapshot.find(serial) {
            Some(item) => Some(item.clone()),
            None if serial == self.snapshot.backpack => Some(Item::new(serial, 0, "Backpack")),
            None if serial == self.snapshot.bank => Some(Item::new(serial, 0, "Bank Box")),
            None => None,
        }
    }

    fn find_type(&self, graphic: u32) -> Option<Item> {
        self.snapshot
            .items
            .iter()
            .find(|item| item.graphic == graphic)
            .cloned()
    }

    fn items_in_container(&self, container: u32) -> Vec<Item> {
        self.snapshot.items_in(container).cloned().collect()
    }

    fn name_and_properties(&self, serial: u32) -> Option<String> {
        self.snapshot
            .find(serial)
            .and_then(|item| item.name_and_properties.clone())
    }

    fn use_object(&mut self, serial: u32) -> ClientResult<()> {
        if !self.exists(serial) {
            return Err(ClientError::ItemNotFound { serial });
        }
        self.opened.insert(serial);
        Ok(())
    }

    fn move_within_reach(&mut self, serial: u32, _max_attempts: u32) -> bool {
        self.exists(serial)
    }

    fn move_item(&mut self, serial: u32, destination: u32) -> ClientResult<()> {
        if !self.exists(destination) {
            return Err(ClientError::ContainerNotFound {
                serial: destination,
            });
        }
        if self.snapshot.find(serial).is_none() {
            return Err(ClientError::ItemNotFound { serial });
        }
        if self.is_within(destination, serial) {
            return Err(ClientError::Rejected(format!(
                "cannot move 0x{serial:x} into itself or one of its containers"
            )));
        }
        let item = self
            .snapshot
            .find_mut(serial)
            .ok_or(ClientError::ItemNotFound { serial })?;

        let previous = item.container.replace(destination);
        if let Some(previous) = previous {
            self.adjust_contents(previous, -1);
        }
        self.adjust_contents(destination, 1);
        debug!(serial, destination, "moved item");
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }

    fn system_message(&mut self, message: &str) {
        debug!(message, "system message");
        self.messages.push(message.to_string());
    }
}

/// Rewrites the first `Contents: X/Y` line of a property block, adding
/// `delta` to `X`. Blocks without a readable line are returned unchanged.
fn bump_contents(block: &str, delta: i64) -> String {
    let contents = match parse_contents(block) {
        ContentsLine::Parsed(contents) => contents,
        ContentsLine::Missing | ContentsLine::Unreadable => return block.to_string(),
    };
    let current = (i64::from(contents.current) + delta).max(0);

    let mut replaced = false;
    let lines: Vec<String> = block
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if replaced || index == 0 || !line.trim().starts_with("Contents") {
                return line.to_string();
            }
            replaced = true;
            let rest = line
                .split_once('/')
                .map(|(_, rest)| rest)
                .unwrap_or_default();
            format!("Contents: {current}/{rest}")
        })
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKPACK: u32 = 0x4000_0001;
    const BANK: u32 = 0x4000_0002;
    const CHEST: u32 = 0x4000_0100;

    fn snapshot() -> Snapshot {
        Snapshot {
            backpack: BACKPACK,
            bank: BANK,
            prompt_target: None,
            items: vec![
                Item::new(CHEST, 0x0E42, "Wooden Chest")
                    .with_properties(["Contents: 1/125 Items, 3 Stones"]),
                Item::new(0x10, 0x0EB3, "Lute").in_container(BACKPACK),
                Item::new(0x11, 0x0DF2, "Wand").in_container(CHEST),
                Item::new(0x12, 0x0436, "Bank Vault"),
            ],
        }
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "backpack": 1,
            "bank": 2,
            "items": [
                { "serial": 16, "graphic": 3763, "hue": -1, "name": "Lute", "container": 1 }
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.prompt_target, None);
        assert_eq!(snapshot.items_in(1).count(), 1);
        assert_eq!(snapshot.find(16).map(|item| item.hue), Some(None));
    }

    #[test]
    fn test_find_item_knows_player_containers() {
        let client = SnapshotClient::new(snapshot());
        assert!(client.find_item(BACKPACK).is_some());
        assert!(client.find_item(BANK).is_some());
        assert!(client.find_item(0x999).is_none());
    }

    #[test]
    fn test_items_in_container() {
        let client = SnapshotClient::new(snapshot());
        let serials: Vec<u32> = client
            .items_in_container(CHEST)
            .iter()
            .map(|item| item.serial)
            .collect();
        assert_eq!(serials, vec![0x11]);
    }

    #[test]
    fn test_move_item_updates_container_and_contents() {
        let mut client = SnapshotClient::new(snapshot());
        client.move_item(0x10, CHEST).unwrap();

        let snapshot = client.into_snapshot();
        assert_eq!(snapshot.find(0x10).and_then(|item| item.container), Some(CHEST));
        assert_eq!(
            snapshot.find(CHEST).and_then(|item| item.name_and_properties.clone()),
            Some("Wooden Chest\nContents: 2/125 Items, 3 Stones".to_string())
        );
    }

    #[test]
    fn test_move_item_out_of_counted_container() {
        let mut client = SnapshotClient::new(snapshot());
        client.move_item(0x11, BACKPACK).unwrap();
        assert_eq!(
            client.name_and_properties(CHEST),
            Some("Wooden Chest\nContents: 0/125 Items, 3 Stones".to_string())
        );
    }

    #[test]
    fn test_move_item_errors() {
        let mut client = SnapshotClient::new(snapshot());
        assert_eq!(
            client.move_item(0x999, CHEST),
            Err(ClientError::ItemNotFound { serial: 0x999 })
        );
        assert_eq!(
            client.move_item(0x10, 0x999),
            Err(ClientError::ContainerNotFound { serial: 0x999 })
        );
        assert!(matches!(client.move_item(CHEST, CHEST), Err(ClientError::Rejected(_))));
    }

    #[test]
    fn test_move_item_rejects_nesting_into_descendant() {
        let mut snapshot = snapshot();
        snapshot.items.push(
            Item::new(0x20, 0x0E75, "Pouch")
                .in_container(CHEST)
                .with_properties(["Contents: 0/125"]),
        );
        snapshot.items[0].container = Some(BACKPACK);
        let mut client = SnapshotClient::new(snapshot);

        assert!(matches!(client.move_item(CHEST, 0x20), Err(ClientError::Rejected(_))));
        assert_eq!(client.snapshot().find(CHEST).and_then(|item| item.container), Some(BACKPACK));
        assert_eq!(client.snapshot().find(0x20).and_then(|item| item.container), Some(CHEST));

        client.move_item(0x20, BACKPACK).unwrap();
        client.move_item(CHEST, 0x20).unwrap();
        assert_eq!(client.snapshot().find(CHEST).and_then(|item| item.container), Some(0x20));
    }

    #[test]
    fn test_move_item_stops_on_existing_cycle() {
        let mut snapshot = snapshot();
        snapshot.items.push(Item::new(0x30, 0x0E75, "Pouch").in_container(0x31));
        snapshot.items.push(Item::new(0x31, 0x0E7D, "Box").in_container(0x30));
        let mut client = SnapshotClient::new(snapshot);

        client.move_item(0x10, 0x30).unwrap();
        assert_eq!(client.snapshot().find(0x10).and_then(|item| item.container), Some(0x30));
    }

    #[test]
    fn test_open_container_records_and_pauses() {
        let mut client = SnapshotClient::new(snapshot());
        assert_eq!(client.open_container(CHEST), Some(CHEST));
        assert!(client.opened().contains(&CHEST));
        assert_eq!(client.paused(), Duration::from_secs(1));

        assert_eq!(client.open_container(0x999), None);
        assert_eq!(client.messages(), ["Failed to find container (0x999)"]);
    }

    #[test]
    fn test_find_type_and_prompt_target() {
        let client = SnapshotClient::new(snapshot()).with_prompt_target(CHEST);
        assert_eq!(client.find_type(0x0436).map(|item| item.serial), Some(0x12));
        let mut client = client;
        assert_eq!(client.request_target(), Some(CHEST));
    }

    #[test]
    fn test_bump_contents_without_line() {
        assert_eq!(bump_contents("Bag\nWeight: 2", 1), "Bag\nWeight: 2");
        assert_eq!(bump_contents("Bag\nContents: 0/10", -1), "Bag\nContents: 0/10");
    }
}
