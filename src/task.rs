//! Task data structure.
//!
//! A `Task` is one accepted row of the schedule table. Tasks are produced
//! once by the parser and handed to exactly one sprint at allocation time;
//! setting `sprint_number` there is the only mutation after creation.

use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// One unit of work parsed from the schedule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Stable sequential identifier (`T001`, `T002`, ...), assigned in
    /// document order, never reused.
    pub id: String,
    /// Free-text activity description.
    pub title: String,
    /// Estimated effort in hours, parsed from the duration cell.
    pub duration_hours: u32,
    /// Expected output of the activity.
    pub deliverable: String,
    pub priority: Priority,
    /// Story points on the configured scale; always >= 1.
    pub points: u32,
    /// Day number from the source table. Traceability only, never used for
    /// ordering.
    pub day_index: u32,
    /// Assigned once by the sprint allocator.
    pub sprint_number: Option<u32>,
}

impl Task {
    /// Format a sequential counter as a task id (`T001` for 1).
    pub fn make_id(counter: usize) -> String {
        format!("T{counter:03}")
    }
}
