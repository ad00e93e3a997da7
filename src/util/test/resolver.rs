use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::{
    error::Error,
    model::entity::EntityRef,
    service::resolver::{EntityResolver, ResolvedEntity},
};

/// Resolver answering from a fixed name table.
#[derive(Default)]
pub struct FixedResolver {
    names: HashMap<EntityRef, String>,
    fail: bool,
    lookups: AtomicUsize,
}

impl FixedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose every lookup fails with a database error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, entity: EntityRef, name: impl Into<String>) -> Self {
        self.names.insert(entity, name.into());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityResolver for FixedResolver {
    async fn find_or_placeholder(&self, entity: EntityRef) -> Result<ResolvedEntity, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(DbErr::Custom("connection refused".to_string()).into());
        }

        Ok(match self.names.get(&entity) {
            Some(name) => ResolvedEntity::known(name.clone()),
            None => ResolvedEntity::placeholder(entity),
        })
    }
}
