//! Organizer runs.
//!
//! A run groups organizers by source, collects the items of every source
//! (descending into child containers), and moves each item to the first
//! destination with room of the first organizer that selects it.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};
use yao_filter_rs::{Filter, Item};

use crate::capacity;
use crate::client::{GameClient, ACTION_DELAY};
use crate::config::OrganizerOptions;
use crate::organizer::{ContainerRef, Organizer};

/// Graphic of the bank vault that has to be used before the bank box opens.
pub const VAULT_GRAPHIC: u32 = 0x436;

/// Property marking an item as a container.
const CONTAINER_MARKER: &str = "contents:";

/// An item that was moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Serial of the moved item.
    pub serial: u32,
    /// Name of the moved item.
    pub name: String,
    /// Label of the organizer that selected it.
    pub organizer: String,
    /// Serial of the destination container.
    pub destination: u32,
}

/// An item that was selected but could not be moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveFailure {
    /// Serial of the item.
    pub serial: u32,
    /// Name of the item.
    pub name: String,
    /// Serial of the destination container.
    pub destination: u32,
    /// Client error message.
    pub reason: String,
}

/// An organizer none of whose destinations currently has room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Position of the organizer in the configuration.
    pub index: usize,
    /// Label of the organizer.
    pub organizer: String,
    /// The configured destinations.
    pub destinations: Vec<ContainerRef>,
}

/// Outcome of [`OrganizerRunner::process`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Items moved, in processing order.
    pub moves: Vec<MoveRecord>,
    /// Items whose move the client rejected.
    pub failures: Vec<MoveFailure>,
    /// Items collected from the sources.
    pub examined: usize,
    /// Items skipped by the ignore filter.
    pub ignored: usize,
    /// Items no organizer selected.
    pub unmatched: usize,
    /// Items selected only by organizers without a destination with room.
    pub no_capacity: usize,
    /// Why the run stopped early, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl RunReport {
    /// Returns true if the run processed every source.
    pub fn completed(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Runs organizers against a game client.
///
/// A runner remembers the container picked for `$Prompt` sources, so the
/// operator is asked at most once.
#[derive(Debug, Clone)]
pub struct OrganizerRunner {
    options: OrganizerOptions,
    prompt_serial: Option<u32>,
}

impl OrganizerRunner {
    /// Creates a runner with the given options.
    pub fn new(options: OrganizerOptions) -> Self {
        Self {
            options,
            prompt_serial: None,
        }
    }

    /// Uses `serial` for `$Prompt` sources instead of asking.
    pub fn with_prompt_serial(mut self, serial: u32) -> Self {
        self.prompt_serial = Some(serial);
        self
    }

    /// The container picked for `$Prompt` sources, if known.
    pub fn prompt_serial(&self) -> Option<u32> {
        self.prompt_serial
    }

    /// Reports organizers none of whose destinations has room.
    pub fn validate<C: GameClient>(&self, client: &C, organizers: &[Organizer]) -> Vec<ValidationIssue> {
        organizers
            .iter()
            .enumerate()
            .filter(|(_, organizer)| self.first_destination(client, &organizer.destinations).is_none())
            .map(|(index, organizer)| ValidationIssue {
                index,
                organizer: organizer.label(),
                destinations: organizer.destinations.clone(),
            })
            .collect()
    }

    /// Moves every selected item of every source.
    ///
    /// A source that cannot be resolved or opened stops the run; the
    /// report says why and keeps the moves made so far.
    pub fn process<C: GameClient>(
        &mut self,
        client: &mut C,
        organizers: &[Organizer],
        ignored: Option<&Filter>,
    ) -> RunReport {
        let mut report = RunReport::default();

        for (source, group) in group_by_source(organizers) {
            let Some(source_serial) = self.resolve_source(client, source) else {
                let reason = format!("No container selected for Source ({source}).");
                client.system_message(&reason);
                report.aborted = Some(reason);
                return report;
            };

            if client.open_container(source_serial).is_none() {
                let reason = format!("Failed to open Source ({source}).");
                client.system_message(&reason);
                report.aborted = Some(reason);
                return report;
            }

            let mut items = Vec::new();
            let mut visited = BTreeSet::from([source_serial]);
            self.gather_items(client, source_serial, ignored, &mut visited, &mut items, &mut report);
            report.examined += items.len();
            debug!(%source, items = items.len(), organizers = group.len(), "collected source items");

            let total = items.len();
            for (i, item) in items.iter().enumerate() {
                debug!(item = i + 1, total, serial = item.serial, "processing item");
                self.process_item(client, &group, item, &mut report);
            }
        }

        info!(
            moved = report.moves.len(),
            failed = report.failures.len(),
            ignored = report.ignored,
            unmatched = report.unmatched,
            no_capacity = report.no_capacity,
            "organizer run finished"
        );
        report
    }

    fn process_item<C: GameClient>(
        &self,
        client: &mut C,
        organizers: &[&Organizer],
        item: &Item,
        report: &mut RunReport,
    ) {
        let mut selected = false;

        for organizer in organizers {
            if !organizer.test(item) {
                continue;
            }
            selected = true;

            let Some(destination) = self.first_destination(client, &organizer.destinations) else {
                let message = format!(
                    "Skipping organizer. Failed to find Destination with capacity ({}).",
                    organizer.label()
                );
                warn!(serial = item.serial, organizer = %organizer.label(), "no destination with capacity");
                client.system_message(&message);
                continue;
            };

            if self.options.move_to_destination && !self.walk_to(client, destination) {
                client.system_message(&format!("Failed to move to Destination (0x{destination:x})."));
            }

            if self.options.output_item_move_messages {
                client.system_message(&format!("Moved ({}) to (0x{destination:x})", item.name));
            }

            match client.move_item(item.serial, destination) {
                Ok(()) => {
                    info!(serial = item.serial, name = %item.name, destination, "moved item");
                    report.moves.push(MoveRecord {
                        serial: item.serial,
                        name: item.name.clone(),
                        organizer: organizer.label(),
                        destination,
                    });
                }
                Err(e) => {
                    warn!(serial = item.serial, destination, error = %e, "move failed");
                    report.failures.push(MoveFailure {
                        serial: item.serial,
                        name: item.name.clone(),
                        destination,
                        reason: e.to_string(),
                    });
                }
            }
            client.pause(ACTION_DELAY);
            return;
        }

        if selected {
            report.no_capacity += 1;
        } else {
            report.unmatched += 1;
        }
    }

    fn resolve_source<C: GameClient>(&mut self, client: &mut C, source: ContainerRef) -> Option<u32> {
        match source {
            ContainerRef::Prompt => {
                if self.prompt_serial.is_none() {
                    client.system_message("Target the source container");
                    self.prompt_serial = client.request_target();
                }
                self.prompt_serial
            }
            ContainerRef::Backpack => Some(client.backpack()),
            ContainerRef::Bank => Some(client.bank()),
            ContainerRef::Serial(serial) => Some(serial),
        }
    }

    fn resolve_destination<C: GameClient>(&self, client: &C, destination: ContainerRef) -> Option<u32> {
        match destination {
            ContainerRef::Backpack => Some(client.backpack()),
            ContainerRef::Bank => Some(client.bank()),
            ContainerRef::Serial(serial) => Some(serial),
            ContainerRef::Prompt => None,
        }
    }

    /// First destination that exists and has room.
    fn first_destination<C: GameClient>(&self, client: &C, destinations: &[ContainerRef]) -> Option<u32> {
        destinations
            .iter()
            .filter_map(|destination| self.resolve_destination(client, *destination))
            .find(|serial| self.has_capacity(client, *serial))
    }

    fn has_capacity<C: GameClient>(&self, client: &C, serial: u32) -> bool {
        if client.find_item(serial).is_none() {
            return false;
        }
        let block = client.name_and_properties(serial);
        capacity::has_capacity(block.as_deref(), self.options.reserved_space)
    }

    fn gather_items<C: GameClient>(
        &self,
        client: &mut C,
        container: u32,
        ignored: Option<&Filter>,
        visited: &mut BTreeSet<u32>,
        items: &mut Vec<Item>,
        report: &mut RunReport,
    ) {
        for mut item in client.items_in_container(container) {
            if item.name_and_properties.is_none() {
                item.name_and_properties = client.name_and_properties(item.serial);
            }

            if ignored.is_some_and(|filter| filter.matches(&item)) {
                report.ignored += 1;
                continue;
            }

            if self.options.open_child_containers && item.has_property(CONTAINER_MARKER) {
                if !visited.insert(item.serial) {
                    warn!(serial = item.serial, "container already visited, skipping");
                    continue;
                }
                if client.open_container(item.serial).is_some() {
                    self.gather_items(client, item.serial, ignored, visited, items, report);
                }
                continue;
            }

            items.push(item);
        }
    }

    /// Walks to a destination. The bank needs its vault opened first.
    fn walk_to<C: GameClient>(&self, client: &mut C, destination: u32) -> bool {
        let attempts = self.options.max_path_attempts;

        if destination == client.bank() {
            let Some(vault) = client.find_type(VAULT_GRAPHIC) else {
                client.system_message("Failed to find Vault.");
                return false;
            };
            if !client.move_within_reach(vault.serial, attempts) {
                client.system_message("Failed to move to Vault.");
                return false;
            }
            if let Err(e) = client.use_object(vault.serial) {
                client.system_message(&format!("Failed to open Vault: {e}"));
                return false;
            }
            client.pause(ACTION_DELAY);
            true
        } else if destination == client.backpack() {
            true
        } else {
            client.move_within_reach(destination, attempts)
        }
    }
}

/// Groups organizers by source, keeping first-seen order of sources and
/// configuration order within a group. Organizers without destinations
/// are skipped.
fn group_by_source(organizers: &[Organizer]) -> Vec<(ContainerRef, Vec<&Organizer>)> {
    let mut groups: Vec<(ContainerRef, Vec<&Organizer>)> = Vec::new();

    for organizer in organizers {
        if organizer.destinations.is_empty() {
            warn!(organizer = %organizer.label(), "organizer has no destinations, skipping");
            continue;
        }
        match groups.iter_mut().find(|(source, _)| *source == organizer.source) {
            Some((_, group)) => group.push(organizer),
            None => groups.push((organizer.source, vec![organizer])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn organizer(source: ContainerRef, destinations: Vec<ContainerRef>) -> Organizer {
        Organizer::new(source, destinations, vec![Filter::name("x")])
    }

    #[test]
    fn test_group_by_source_first_seen_order() {
        let organizers = vec![
            organizer(ContainerRef::Bank, vec![ContainerRef::Serial(1)]).named("a"),
            organizer(ContainerRef::Backpack, vec![ContainerRef::Serial(2)]).named("b"),
            organizer(ContainerRef::Bank, vec![ContainerRef::Serial(3)]).named("c"),
        ];
        let groups = group_by_source(&organizers);
        let summary: Vec<(ContainerRef, Vec<String>)> = groups
            .into_iter()
            .map(|(source, group)| (source, group.iter().map(|o| o.label()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ContainerRef::Bank, vec!["a".to_string(), "c".to_string()]),
                (ContainerRef::Backpack, vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn test_group_by_source_skips_organizers_without_destinations() {
        let organizers = vec![
            organizer(ContainerRef::Backpack, vec![]),
            organizer(ContainerRef::Bank, vec![ContainerRef::Serial(1)]),
        ];
        let groups = group_by_source(&organizers);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, ContainerRef::Bank);
    }

    #[test]
    fn test_report_completed() {
        let mut report = RunReport::default();
        assert!(report.completed());
        report.aborted = Some("Failed to open Source (bank).".to_string());
        assert!(!report.completed());
    }
}
