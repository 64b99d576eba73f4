//! Shared primitive types used across the entire engine.

/// Stable identifier for a person.
pub type PersonId = String;

/// Stable identifier for a project.
pub type ProjectId = String;

/// Stable identifier for an assignment record.
pub type AssignmentId = String;

/// Office/region code, stored uppercase ("MADRID", "NACIONAL", ...).
pub type Region = String;
