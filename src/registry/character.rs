//! Character task categories.
//!
//! Authenticated character endpoints identify the character through the token's owner, so
//! those categories only take the credential.

use crate::{
    model::task::{ArgShape, TaskCategory},
    registry::CategoryDescriptor,
};

const fn token(category: TaskCategory) -> CategoryDescriptor {
    CategoryDescriptor::new(category, ArgShape::Credential)
}

pub const PUBLIC: &[CategoryDescriptor] = &[
    CategoryDescriptor::new(TaskCategory::Info, ArgShape::EntityId),
    CategoryDescriptor::new(TaskCategory::CorporationHistory, ArgShape::EntityId),
    CategoryDescriptor::new(TaskCategory::Affiliation, ArgShape::EntityIds),
];

pub const AUTHENTICATED: &[CategoryDescriptor] = &[
    token(TaskCategory::Roles),
    token(TaskCategory::Titles),
    token(TaskCategory::Clones),
    token(TaskCategory::Implants),
    token(TaskCategory::Location),
    token(TaskCategory::Online),
    token(TaskCategory::Ship),
    token(TaskCategory::Attributes),
    token(TaskCategory::SkillQueue),
    token(TaskCategory::Skills),
    // military
    token(TaskCategory::Fittings),
    token(TaskCategory::Fatigue),
    token(TaskCategory::Medals),
    // industry
    token(TaskCategory::Blueprints),
    token(TaskCategory::IndustryJobs),
    token(TaskCategory::Mining),
    token(TaskCategory::AgentsResearch),
    // finance
    token(TaskCategory::MarketOrders),
    token(TaskCategory::MarketHistory),
    token(TaskCategory::Planets),
    token(TaskCategory::WalletBalance),
    token(TaskCategory::WalletJournal),
    token(TaskCategory::WalletTransactions),
    token(TaskCategory::LoyaltyPoints),
    // intel
    token(TaskCategory::Standings),
    token(TaskCategory::Contacts),
    token(TaskCategory::ContactLabels),
    token(TaskCategory::MailLabels),
    token(TaskCategory::MailingLists),
    token(TaskCategory::Mails),
    // calendar
    token(TaskCategory::CalendarEvents),
    token(TaskCategory::CalendarEventDetails),
    token(TaskCategory::CalendarEventAttendees),
    // assets
    token(TaskCategory::Assets),
    token(TaskCategory::AssetNames),
    token(TaskCategory::AssetLocations),
];
