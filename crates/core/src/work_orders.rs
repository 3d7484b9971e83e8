//! Work order statuses, transitions, and bulk fan-out limits.
//!
//! `Overdue` is a derived display state, never stored: a Scheduled order
//! whose scheduled date has passed reports as Overdue at read time. The
//! stored status set is Scheduled / InProgress / Completed / Cancelled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::validate_count_range;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Work is planned for a future (or past, then Overdue) date.
pub const STATUS_SCHEDULED: &str = "scheduled";
/// A technician is on it.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Remediation finished.
pub const STATUS_COMPLETED: &str = "completed";
/// Abandoned before completion.
pub const STATUS_CANCELLED: &str = "cancelled";
/// Derived only: scheduled date has passed without the work starting.
pub const STATUS_OVERDUE: &str = "overdue";

/// All statuses that may be written to the database.
pub const VALID_STORED_STATUSES: &[&str] = &[
    STATUS_SCHEDULED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of assets a single bulk work-order request may target.
pub const MAX_BULK_WORK_ORDER_ASSETS: usize = 500;

/// Maximum length for a work order title.
pub const MAX_TITLE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Work order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Overdue,
}

impl WorkOrderStatus {
    /// Return the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => STATUS_SCHEDULED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
            Self::Cancelled => STATUS_CANCELLED,
            Self::Overdue => STATUS_OVERDUE,
        }
    }

    /// Parse a *stored* status from a string. `overdue` is rejected here
    /// because it is derived at read time and must never be persisted or
    /// requested as a target state.
    pub fn from_stored_str(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_SCHEDULED => Ok(Self::Scheduled),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            STATUS_OVERDUE => Err(CoreError::Validation(
                "'overdue' is derived from the scheduled date and cannot be set directly"
                    .to_string(),
            )),
            other => Err(CoreError::Validation(format!(
                "Unknown work order status: '{other}'. Valid statuses: {}",
                VALID_STORED_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether this stored status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Stored-status transition rules:
/// Scheduled -> InProgress | Cancelled; InProgress -> Completed | Cancelled.
pub fn can_transition(from: WorkOrderStatus, to: WorkOrderStatus) -> bool {
    use WorkOrderStatus::*;
    matches!(
        (from, to),
        (Scheduled, InProgress)
            | (Scheduled, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled)
    )
}

/// Validate a requested status transition, returning a Conflict error
/// naming both states when the move is not allowed.
pub fn validate_transition(from: WorkOrderStatus, to: WorkOrderStatus) -> Result<(), CoreError> {
    if !can_transition(from, to) {
        return Err(CoreError::Conflict(format!(
            "Cannot move work order from '{}' to '{}'",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Derived status
// ---------------------------------------------------------------------------

/// Effective display status: a Scheduled order past its scheduled date
/// reports as Overdue. All other statuses pass through unchanged.
pub fn effective_status(
    stored: WorkOrderStatus,
    scheduled_for: Option<NaiveDate>,
    today: NaiveDate,
) -> WorkOrderStatus {
    match (stored, scheduled_for) {
        (WorkOrderStatus::Scheduled, Some(date)) if date < today => WorkOrderStatus::Overdue,
        _ => stored,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the number of assets in a bulk work-order request.
pub fn validate_bulk_asset_count(count: usize) -> Result<(), CoreError> {
    validate_count_range(count, MAX_BULK_WORK_ORDER_ASSETS, "Bulk work order")
}

/// Validate a work order title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation(
            "Work order title must not be empty".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Work order title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
