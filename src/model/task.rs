//! Task definitions for per-entity data collection.
//!
//! A [`Task`] fetches and persists one [`TaskCategory`] of data for one entity. Tasks are
//! created by the batch builder from registry descriptors, never mutated afterwards, and
//! consumed exactly once by the worker pool. A [`TaskSet`] keeps them in registry order.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::task::TaskError,
    model::{credential::Credential, entity::EntityRef},
};

/// Category of data a task collects.
///
/// Categories are shared across entity kinds where the data has the same meaning (for
/// example `Info` or `Contacts`); the entity kind of the task decides which endpoint is
/// used. `ContactLabels` is what the API calls "labels" for contacts, kept apart from
/// `MailLabels`. Variant names follow the ESI endpoint they collect from.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    // Identity and membership
    Info,
    Members,
    CorporationHistory,
    AllianceHistory,
    Affiliation,
    Divisions,
    Roles,
    RoleHistories,
    Titles,
    MemberTitles,
    MembersLimit,
    MemberTracking,
    Medals,
    IssuedMedals,
    Shareholders,

    // Character state
    Clones,
    Implants,
    Location,
    Online,
    Ship,
    Attributes,
    SkillQueue,
    Skills,
    Fittings,
    Fatigue,

    // Industry
    Blueprints,
    Facilities,
    IndustryJobs,
    Mining,
    MiningObservers,
    MiningObserverDetails,
    MiningExtractions,
    AgentsResearch,

    // Finance
    MarketOrders,
    MarketHistory,
    Planets,
    WalletBalance,
    WalletJournal,
    WalletTransactions,
    LoyaltyPoints,

    // Intel
    Standings,
    Contacts,
    ContactLabels,
    MailLabels,
    MailingLists,
    Mails,
    CalendarEvents,
    CalendarEventDetails,
    CalendarEventAttendees,

    // Structures
    Starbases,
    StarbaseDetails,
    Structures,
    CustomsOffices,
    CustomsOfficeLocations,

    // Assets
    Assets,
    AssetNames,
    AssetLocations,
    ContainerLogs,
}

impl TaskCategory {
    /// Stable snake_case identifier for logs and records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Info => "info",
            TaskCategory::Members => "members",
            TaskCategory::CorporationHistory => "corporation_history",
            TaskCategory::AllianceHistory => "alliance_history",
            TaskCategory::Affiliation => "affiliation",
            TaskCategory::Divisions => "divisions",
            TaskCategory::Roles => "roles",
            TaskCategory::RoleHistories => "role_histories",
            TaskCategory::Titles => "titles",
            TaskCategory::MemberTitles => "member_titles",
            TaskCategory::MembersLimit => "members_limit",
            TaskCategory::MemberTracking => "member_tracking",
            TaskCategory::Medals => "medals",
            TaskCategory::IssuedMedals => "issued_medals",
            TaskCategory::Shareholders => "shareholders",
            TaskCategory::Clones => "clones",
            TaskCategory::Implants => "implants",
            TaskCategory::Location => "location",
            TaskCategory::Online => "online",
            TaskCategory::Ship => "ship",
            TaskCategory::Attributes => "attributes",
            TaskCategory::SkillQueue => "skill_queue",
            TaskCategory::Skills => "skills",
            TaskCategory::Fittings => "fittings",
            TaskCategory::Fatigue => "fatigue",
            TaskCategory::Blueprints => "blueprints",
            TaskCategory::Facilities => "facilities",
            TaskCategory::IndustryJobs => "industry_jobs",
            TaskCategory::Mining => "mining",
            TaskCategory::MiningObservers => "mining_observers",
            TaskCategory::MiningObserverDetails => "mining_observer_details",
            TaskCategory::MiningExtractions => "mining_extractions",
            TaskCategory::AgentsResearch => "agents_research",
            TaskCategory::MarketOrders => "market_orders",
            TaskCategory::MarketHistory => "market_history",
            TaskCategory::Planets => "planets",
            TaskCategory::WalletBalance => "wallet_balance",
            TaskCategory::WalletJournal => "wallet_journal",
            TaskCategory::WalletTransactions => "wallet_transactions",
            TaskCategory::LoyaltyPoints => "loyalty_points",
            TaskCategory::Standings => "standings",
            TaskCategory::Contacts => "contacts",
            TaskCategory::ContactLabels => "contact_labels",
            TaskCategory::MailLabels => "mail_labels",
            TaskCategory::MailingLists => "mailing_lists",
            TaskCategory::Mails => "mails",
            TaskCategory::CalendarEvents => "calendar_events",
            TaskCategory::CalendarEventDetails => "calendar_event_details",
            TaskCategory::CalendarEventAttendees => "calendar_event_attendees",
            TaskCategory::Starbases => "starbases",
            TaskCategory::StarbaseDetails => "starbase_details",
            TaskCategory::Structures => "structures",
            TaskCategory::CustomsOffices => "customs_offices",
            TaskCategory::CustomsOfficeLocations => "customs_office_locations",
            TaskCategory::Assets => "assets",
            TaskCategory::AssetNames => "asset_names",
            TaskCategory::AssetLocations => "asset_locations",
            TaskCategory::ContainerLogs => "container_logs",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the arguments a task category's constructor takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgShape {
    /// The entity's ID.
    EntityId,
    /// A list of entity IDs, for bulk endpoints (character affiliation).
    EntityIds,
    /// Only the credential; the entity is implied by the token's owner.
    Credential,
    /// The entity's ID plus a credential with access to it.
    EntityIdWithCredential,
}

impl ArgShape {
    /// Whether a task of this shape can only run with a credential.
    pub fn requires_credential(&self) -> bool {
        matches!(self, ArgShape::Credential | ArgShape::EntityIdWithCredential)
    }
}

/// Constructor arguments of a task, in the shape its category was registered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskArgs<'a> {
    /// See [`ArgShape::EntityId`].
    EntityId(i64),
    /// See [`ArgShape::EntityIds`].
    EntityIds(Vec<i64>),
    /// See [`ArgShape::Credential`].
    Credential(&'a Credential),
    /// See [`ArgShape::EntityIdWithCredential`].
    EntityIdWithCredential(i64, &'a Credential),
}

/// A unit of work fetching and persisting one data category for one entity.
#[derive(Debug, Clone)]
pub struct Task {
    entity: EntityRef,
    category: TaskCategory,
    shape: ArgShape,
    credential: Option<Arc<Credential>>,
}

impl Task {
    /// Creates a task; the credential is shared with the other tasks of the batch.
    pub fn new(
        entity: EntityRef,
        category: TaskCategory,
        shape: ArgShape,
        credential: Option<Arc<Credential>>,
    ) -> Self {
        Self {
            entity,
            category,
            shape,
            credential,
        }
    }

    /// Entity the task collects data for.
    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    /// Category of data the task collects.
    pub fn category(&self) -> TaskCategory {
        self.category
    }

    /// Argument shape the task was registered with.
    pub fn shape(&self) -> ArgShape {
        self.shape
    }

    /// Credential attached to the task, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_deref()
    }

    /// Resolves the task's constructor arguments.
    ///
    /// Credential checks are deferred to execution time, so a credential-shaped task built
    /// without one fails here rather than when the batch is assembled.
    ///
    /// # Returns
    /// - `Ok(TaskArgs)` - Arguments in the registered shape
    /// - `Err(TaskError::MissingCredential)` - Shape requires a credential but none is attached
    pub fn args(&self) -> Result<TaskArgs<'_>, TaskError> {
        let id = self.entity.id;

        match (self.shape, self.credential()) {
            (ArgShape::EntityId, _) => Ok(TaskArgs::EntityId(id)),
            (ArgShape::EntityIds, _) => Ok(TaskArgs::EntityIds(vec![id])),
            (ArgShape::Credential, Some(credential)) => Ok(TaskArgs::Credential(credential)),
            (ArgShape::EntityIdWithCredential, Some(credential)) => {
                Ok(TaskArgs::EntityIdWithCredential(id, credential))
            }
            (_, None) => Err(TaskError::MissingCredential(self.category)),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.category, self.entity)
    }
}

/// Ordered set of tasks making up one batch.
///
/// Order is registry order: public categories first, then authenticated ones. The order
/// carries no execution meaning but is kept stable so batches are reproducible.
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Creates an empty task set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task, keeping insertion order.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Number of tasks in the set.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates the tasks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Categories of the tasks, in order.
    pub fn categories(&self) -> Vec<TaskCategory> {
        self.tasks.iter().map(Task::category).collect()
    }
}

impl From<Vec<Task>> for TaskSet {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl IntoIterator for TaskSet {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
