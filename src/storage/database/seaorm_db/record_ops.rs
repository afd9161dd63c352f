use crate::utils::error::{ApiError, Result};
use chrono::Utc;
use sea_orm::*;
use serde_json::{Map, Value};
use tracing::debug;

use super::super::entities::{self, record};
use super::types::Page;

/// Record repository over any connection or transaction
pub struct Records<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> Records<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a record by collection and key
    pub async fn find(&self, collection: &str, id: &str) -> Result<Option<record::Model>> {
        debug!("Finding record {}/{}", collection, id);

        entities::Record::find_by_id((collection.to_string(), id.to_string()))
            .one(self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// List records in creation order, optionally only those created by `owner`
    pub async fn list(
        &self,
        collection: &str,
        owner: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Page<record::Model>> {
        debug!(
            "Listing {} (page {}, limit {}, owner {:?})",
            collection, page, limit, owner
        );

        let mut query =
            entities::Record::find().filter(record::Column::Collection.eq(collection));
        if let Some(owner) = owner {
            query = query.filter(record::Column::CreatedBy.eq(owner));
        }

        let paginator = query
            .order_by_asc(record::Column::CreatedAt)
            .order_by_asc(record::Column::Id)
            .paginate(self.db, limit);

        let total = paginator.num_items().await.map_err(ApiError::Database)?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ApiError::Database)?;

        Ok(Page {
            items,
            page,
            limit,
            total,
        })
    }

    /// Insert a new record
    pub async fn insert(
        &self,
        collection: &str,
        id: &str,
        attributes: &Map<String, Value>,
        created_by: Option<&str>,
    ) -> Result<record::Model> {
        debug!("Creating record {}/{}", collection, id);

        let now = Utc::now().into();
        let model = record::Model {
            collection: collection.to_string(),
            id: id.to_string(),
            data: serde_json::to_string(attributes)?,
            created_by: created_by.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        entities::Record::insert(model.clone().into_active_model())
            .exec_without_returning(self.db)
            .await?;

        Ok(model)
    }

    /// Overwrite the attribute object of an existing record
    pub async fn update(
        &self,
        model: record::Model,
        attributes: &Map<String, Value>,
    ) -> Result<record::Model> {
        debug!("Updating record {}/{}", model.collection, model.id);

        let mut active: record::ActiveModel = model.into();
        active.data = Set(serde_json::to_string(attributes)?);
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map_err(ApiError::Database)
    }

    /// Delete a record; returns whether a row was removed
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        debug!("Deleting record {}/{}", collection, id);

        let result = entities::Record::delete_many()
            .filter(record::Column::Collection.eq(collection))
            .filter(record::Column::Id.eq(id))
            .exec(self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected > 0)
    }

    /// Count records of a collection
    pub async fn count(&self, collection: &str) -> Result<u64> {
        entities::Record::find()
            .filter(record::Column::Collection.eq(collection))
            .count(self.db)
            .await
            .map_err(ApiError::Database)
    }
}
