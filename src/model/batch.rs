//! Batch handles, lanes, and outcome statistics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::entity::EntityRef;

/// Identifier of a dispatched batch. Never reused across dispatches.
pub type BatchId = Uuid;

/// Named queue a batch runs on, segregating entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Alliances and other small public batches.
    Public,
    /// Corporation batches.
    Corporations,
    /// Character batches.
    Characters,
}

impl Lane {
    /// All lanes.
    pub const ALL: [Lane; 3] = [Lane::Public, Lane::Corporations, Lane::Characters];

    /// Lane name as used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Public => "public",
            Lane::Corporations => "corporations",
            Lane::Characters => "characters",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned for an accepted batch.
///
/// Created by the execution backend when it accepts a submission; one handle corresponds to
/// exactly one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHandle {
    /// Unique batch identifier.
    pub id: BatchId,
    /// Display name, the entity's name or its placeholder.
    pub name: String,
    /// Lane the batch runs on.
    pub lane: Lane,
    /// Entity the batch synchronizes.
    pub entity: EntityRef,
    /// Number of tasks in the batch.
    pub total_tasks: usize,
    /// When the backend accepted the batch.
    pub created_at: DateTime<Utc>,
}

impl BatchHandle {
    /// Creates a handle with a fresh random ID.
    pub fn new(name: String, lane: Lane, entity: EntityRef, total_tasks: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            lane,
            entity,
            total_tasks,
            created_at: Utc::now(),
        }
    }
}

/// Task counts of a batch.
///
/// At finalization `succeeded + failed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Tasks that completed successfully.
    pub succeeded: usize,
    /// Tasks that failed, timed out, panicked, or never ran.
    pub failed: usize,
    /// Tasks in the batch.
    pub total: usize,
}

impl BatchStats {
    /// Final stats for a batch, deriving the success count from the failures.
    pub fn from_failures(total: usize, failed: usize) -> Self {
        let failed = failed.min(total);

        Self {
            succeeded: total - failed,
            failed,
            total,
        }
    }

    /// Tasks that have not reached a result yet.
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.succeeded + self.failed)
    }
}

/// Lifecycle state of a batch.
///
/// `Submitted -> Running -> {Completed | CompletedWithFailures | Errored} -> Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// Accepted by the backend, waiting on its lane.
    Submitted,
    /// Tasks are executing.
    Running,
    /// Every task succeeded.
    Completed,
    /// All tasks finished and at least one failed.
    CompletedWithFailures,
    /// The batch machinery itself failed.
    Errored,
    /// Outcome reported; terminal.
    Finalized,
}

/// Point-in-time view of a batch, as returned by batch queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSnapshot {
    /// Handle of the batch.
    pub handle: BatchHandle,
    /// Current lifecycle state.
    pub state: BatchState,
    /// Task counts so far.
    pub stats: BatchStats,
    /// Message of the batch-level error, if one occurred.
    pub error: Option<String>,
    /// When the batch was finalized.
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchSnapshot {
    /// Snapshot of a batch that was just accepted.
    pub fn submitted(handle: BatchHandle) -> Self {
        let stats = BatchStats {
            total: handle.total_tasks,
            ..Default::default()
        };

        Self {
            handle,
            state: BatchState::Submitted,
            stats,
            error: None,
            finished_at: None,
        }
    }

    /// Whether the batch has been finalized.
    pub fn is_finished(&self) -> bool {
        self.state == BatchState::Finalized
    }
}
