//! Alliance task categories.

use crate::{
    model::task::{ArgShape, TaskCategory},
    registry::CategoryDescriptor,
};

pub const PUBLIC: &[CategoryDescriptor] = &[
    CategoryDescriptor::new(TaskCategory::Info, ArgShape::EntityId),
    CategoryDescriptor::new(TaskCategory::Members, ArgShape::EntityId),
];

pub const AUTHENTICATED: &[CategoryDescriptor] = &[
    CategoryDescriptor::new(TaskCategory::ContactLabels, ArgShape::EntityIdWithCredential),
    CategoryDescriptor::new(TaskCategory::Contacts, ArgShape::EntityIdWithCredential),
];
