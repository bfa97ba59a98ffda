//! Item organizer built on the yao filter engine.
//!
//! This crate provides:
//!
//! - [`Organizer`] and [`ContainerRef`] - what to move, from where, to where
//! - [`OrganizerConfig`] - the TOML configuration file and its resolution
//! - [`GameClient`] - the operations a run needs from the game
//! - [`OrganizerRunner`] - the run itself, producing a [`RunReport`]
//! - [`SnapshotClient`] and [`SnapshotStore`] - an in-memory client over a
//!   JSON snapshot of containers, and its on-disk storage
//!
//! # Example
//!
//! ```
//! use yao_filter_rs::Item;
//! use yao_organizer_rs::{
//!     GameClient, OrganizerConfig, OrganizerRunner, Snapshot, SnapshotClient,
//! };
//!
//! let config = OrganizerConfig::from_toml(
//!     r#"
//!     [options]
//!     move_to_destination = false
//!
//!     [[organizer]]
//!     source = "backpack"
//!     destinations = [100]
//!     filters = ["wand"]
//!     "#,
//! )?
//! .build()?;
//!
//! let snapshot = Snapshot {
//!     backpack: 1,
//!     bank: 2,
//!     prompt_target: None,
//!     items: vec![
//!         Item::new(100, 0x0E75, "Bag"),
//!         Item::new(10, 0x0DF2, "Wand").in_container(1),
//!     ],
//! };
//!
//! let mut client = SnapshotClient::new(snapshot);
//! let mut runner = OrganizerRunner::new(config.options.clone());
//! let report = runner.process(&mut client, &config.organizers, config.ignored.as_ref());
//!
//! assert_eq!(report.moves.len(), 1);
//! assert_eq!(client.items_in_container(100).len(), 1);
//! # Ok::<(), yao_organizer_rs::ConfigError>(())
//! ```

pub mod capacity;
pub mod client;
pub mod config;
pub mod organizer;
pub mod runner;
pub mod snapshot;
pub mod store;

pub use client::{ClientError, ClientResult, GameClient};
pub use config::{ConfigError, OrganizerConfig, OrganizerDef, OrganizerOptions, ResolvedConfig};
pub use organizer::{ContainerRef, Organizer, ParseContainerRefError};
pub use runner::{MoveFailure, MoveRecord, OrganizerRunner, RunReport, ValidationIssue};
pub use snapshot::{Snapshot, SnapshotClient};
pub use store::{SnapshotStore, SnapshotStoreError};
