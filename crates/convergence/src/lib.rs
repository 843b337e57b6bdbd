//! # Convergence
//!
//! A library for idempotent convergence planning.
//!
//! This crate provides the core abstractions for resolving a host to a
//! desired-state policy, diffing that policy against observed state, and
//! emitting the minimal ordered action list needed to converge.
//!
//! ## Core Concepts
//!
//! - **Host**: Platform identity (family + version) of the machine to converge
//! - **PolicyTable**: Immutable mapping from policy key to desired state
//! - **plan**: Pure function computing the actions needed to converge
//! - **Executor**: Boundary that applies actions and reports success/failure
//! - **NotificationBus**: Publish/subscribe channel for "resource changed" events
//!
//! ## Example
//!
//! ```
//! use convergence::{Host, PolicyTable, resolve, plan, ObservedState};
//!
//! let table = PolicyTable::from_entries([(
//!     convergence::PolicyKey::bucket("debian", "9"),
//!     convergence::DesiredState::new(
//!         ["openjdk-8-jdk", "openjdk-8-jre-headless"],
//!         Some("java-1.8.0-openjdk-amd64"),
//!     ),
//! )]);
//!
//! let host = Host::new("debian", "9.1");
//! let key = resolve(&host, &table).unwrap();
//! let desired = table.lookup(&key).unwrap();
//! let actions = plan(&desired, &ObservedState::default());
//! assert!(!actions.is_empty());
//! ```
//!
//! Planning never performs I/O and is deterministic: the same inputs always
//! produce the same plan, and re-planning against a converged state produces
//! an empty plan.

pub mod error;
pub mod executor;
pub mod notify;
pub mod planner;
pub mod policy;
pub mod resolver;
pub mod types;

// Re-export main types at crate root
pub use error::Error;
pub use executor::{Executor, SimulatedExecutor, apply};
pub use notify::{NotificationBus, NotificationEvent};
pub use planner::{
    DEFAULT_JAVA_SYMLINK_POLICY, DERIVE_ATTRIBUTES_POLICY, LICENSE_MARKER_PATH,
    VERSION_CHANGED_EVENT, plan,
};
pub use policy::PolicyTable;
pub use resolver::{resolve, resolve_desired};
pub use types::{Action, DesiredState, Host, ObservedState, PolicyKey};
