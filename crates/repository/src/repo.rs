//! The generic repository facade.

use crate::{
    error::RepositoryError,
    pagination::Paginator,
    query::{QueryBuilder, SelectQuery, apply_criteria, apply_sorting},
    session::{EntityStore, Session},
};
use criteria::{Criteria, Sorting, Value};
use std::marker::PhantomData;
use tracing::debug;

const DEFAULT_ALIAS: &str = "o";

/// A persistable record the repository can manage.
pub trait Entity: Default + Send + Sync {
    /// Backing table name.
    const TABLE: &'static str;

    fn id(&self) -> Value;
}

/// Repository over one entity type, composed from a persistence session and
/// a query-executing store. No framework base class: both collaborators sit
/// behind narrow traits and everything else is criteria compilation.
pub struct EntityRepository<E, S, T>
where
    E: Entity,
    S: Session<E>,
    T: EntityStore<E>,
{
    session: S,
    store: T,
    alias: String,
    _marker: PhantomData<E>,
}

impl<E, S, T> EntityRepository<E, S, T>
where
    E: Entity,
    S: Session<E>,
    T: EntityStore<E>,
{
    pub fn new(session: S, store: T) -> Self {
        EntityRepository {
            session,
            store,
            alias: DEFAULT_ALIAS.to_string(),
            _marker: PhantomData,
        }
    }

    /// Overrides the table alias used in generated predicates.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// A blank entity instance.
    pub fn create(&self) -> E {
        E::default()
    }

    /// Registers the entity for persistence; flushes immediately when asked.
    pub async fn save(&self, entity: &E, and_flush: bool) -> Result<(), RepositoryError> {
        debug!(table = E::TABLE, and_flush, "persisting entity");
        self.session.persist(entity).await?;
        if and_flush {
            self.session.flush().await?;
        }
        Ok(())
    }

    /// Registers the entity for removal; flushes immediately when asked.
    pub async fn delete(&self, entity: &E, and_flush: bool) -> Result<(), RepositoryError> {
        debug!(table = E::TABLE, and_flush, "removing entity");
        self.session.remove(entity).await?;
        if and_flush {
            self.session.flush().await?;
        }
        Ok(())
    }

    /// Identity lookup through the session.
    pub async fn find(&self, id: impl Into<Value>) -> Result<Option<E>, RepositoryError> {
        let id = id.into();
        debug!(table = E::TABLE, %id, "loading entity by id");
        self.session.find_by_id(&id).await
    }

    /// The unfiltered collection.
    pub async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let query = self.base_query();
        self.store.fetch(&query).await
    }

    /// First entity matching the criteria, if any.
    pub async fn find_one_by(&self, criteria: &Criteria) -> Result<Option<E>, RepositoryError> {
        let mut query = self.base_query();
        apply_criteria(&mut query, criteria, &self.alias)?;

        debug!(table = E::TABLE, filters = criteria.len(), "loading one entity by criteria");
        self.store.fetch_one(&query).await
    }

    /// Entities matching the criteria, optionally sorted and windowed.
    pub async fn find_by(
        &self,
        criteria: &Criteria,
        sorting: Option<&Sorting>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<E>, RepositoryError> {
        let mut query = self.base_query();
        apply_criteria(&mut query, criteria, &self.alias)?;
        if let Some(sorting) = sorting {
            apply_sorting(&mut query, sorting, &self.alias);
        }
        if let Some(n) = limit {
            query.limit(n);
        }
        if let Some(n) = offset {
            query.offset(n);
        }

        debug!(table = E::TABLE, filters = criteria.len(), "loading entities by criteria");
        self.store.fetch(&query).await
    }

    /// A page cursor over the matching collection.
    pub fn find_paginated(
        &self,
        criteria: &Criteria,
        sorting: Option<&Sorting>,
    ) -> Result<Paginator<'_, E, T>, RepositoryError> {
        let mut query = self.base_query();
        apply_criteria(&mut query, criteria, &self.alias)?;
        if let Some(sorting) = sorting {
            apply_sorting(&mut query, sorting, &self.alias);
        }

        Ok(Paginator::new(query, &self.store))
    }

    fn base_query(&self) -> SelectQuery {
        SelectQuery::new(E::TABLE, &self.alias)
    }
}
