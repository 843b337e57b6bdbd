//! Error types for convergence planning and execution.
//!
//! Planning is pure and can only fail during upstream resolution: either
//! the host matches no supported platform, or the resolved key is missing
//! from the policy table. Execution failures are reported by executors and
//! never retried here - retry policy belongs to the executor.

use thiserror::Error;

/// Errors surfaced by resolution, lookup, and execution.
#[derive(Debug, Error)]
pub enum Error {
    /// No policy matches the host's platform family and version.
    ///
    /// Fatal: the run aborts before any action executes. Ambiguous or
    /// unsupported hosts must fail here, never fall through to a default.
    #[error("unsupported platform: {family} {version}")]
    UnknownPlatform {
        /// Platform family that failed to resolve
        family: String,
        /// Release version that failed to resolve
        version: String,
    },

    /// The resolved policy key has no entry in the table.
    #[error("no policy registered for key '{0}'")]
    PolicyNotFound(String),

    /// An executor failed to apply an action.
    ///
    /// Out of the planner's scope: the plan was valid at generation time,
    /// the environment changed or the collaborator failed.
    #[error("failed to apply {action}: {message}")]
    ActionExecution {
        /// Display form of the action that failed
        action: String,
        /// Collaborator-reported failure detail
        message: String,
    },
}

impl Error {
    /// Whether this error aborts a run before any action executes.
    pub fn is_planning_failure(&self) -> bool {
        matches!(self, Self::UnknownPlatform { .. } | Self::PolicyNotFound(_))
    }
}
