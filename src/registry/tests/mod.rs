use crate::{
    error::registry::RegistryError,
    model::{
        entity::EntityKind,
        task::{ArgShape, TaskCategory},
    },
    registry::{CategoryDescriptor, KindTable, TaskRegistry},
};

mod standard;

fn public(category: TaskCategory) -> CategoryDescriptor {
    CategoryDescriptor::new(category, ArgShape::EntityId)
}

fn authenticated(category: TaskCategory) -> CategoryDescriptor {
    CategoryDescriptor::new(category, ArgShape::EntityIdWithCredential)
}

fn minimal_table() -> KindTable {
    KindTable::new(vec![public(TaskCategory::Info)], vec![])
}
