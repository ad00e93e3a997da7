//! Corporation task categories.

use crate::{
    model::task::{ArgShape, TaskCategory},
    registry::CategoryDescriptor,
};

const fn director(category: TaskCategory) -> CategoryDescriptor {
    CategoryDescriptor::new(category, ArgShape::EntityIdWithCredential)
}

pub const PUBLIC: &[CategoryDescriptor] = &[
    CategoryDescriptor::new(TaskCategory::Info, ArgShape::EntityId),
    CategoryDescriptor::new(TaskCategory::AllianceHistory, ArgShape::EntityId),
];

pub const AUTHENTICATED: &[CategoryDescriptor] = &[
    director(TaskCategory::Divisions),
    director(TaskCategory::Roles),
    director(TaskCategory::RoleHistories),
    director(TaskCategory::Titles),
    director(TaskCategory::MemberTitles),
    director(TaskCategory::MembersLimit),
    director(TaskCategory::Members),
    director(TaskCategory::MemberTracking),
    director(TaskCategory::Medals),
    director(TaskCategory::IssuedMedals),
    // industry
    director(TaskCategory::Blueprints),
    director(TaskCategory::Facilities),
    director(TaskCategory::IndustryJobs),
    director(TaskCategory::MiningObservers),
    director(TaskCategory::MiningObserverDetails),
    // finance
    director(TaskCategory::MarketOrders),
    director(TaskCategory::MarketHistory),
    director(TaskCategory::Shareholders),
    director(TaskCategory::WalletBalance),
    director(TaskCategory::WalletJournal),
    director(TaskCategory::WalletTransactions),
    // intel
    director(TaskCategory::ContactLabels),
    director(TaskCategory::Standings),
    director(TaskCategory::Contacts),
    // structures
    director(TaskCategory::Starbases),
    director(TaskCategory::StarbaseDetails),
    director(TaskCategory::Structures),
    director(TaskCategory::MiningExtractions),
    director(TaskCategory::CustomsOffices),
    director(TaskCategory::CustomsOfficeLocations),
    // assets
    director(TaskCategory::Assets),
    director(TaskCategory::ContainerLogs),
    director(TaskCategory::AssetLocations),
    director(TaskCategory::AssetNames),
];
