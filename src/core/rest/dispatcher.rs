//! Routes [`RestRequest`]s to the resource controllers inside a transaction

use super::request::{RestRequest, RestResponse};
use super::resource::ResourceRegistry;
use super::router::match_route;
use super::{records, users};
use crate::config::AuthConfig;
use crate::core::batch::RequestDispatcher;
use crate::storage::Database;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared handler chain for direct HTTP requests and batch sub-requests
#[derive(Debug, Clone)]
pub struct RestDispatcher {
    database: Arc<Database>,
    registry: Arc<ResourceRegistry>,
    prefix: String,
    auth: AuthConfig,
}

impl RestDispatcher {
    /// `prefix` is the normalized API prefix, e.g. `/api`
    pub fn new(
        database: Arc<Database>,
        registry: Arc<ResourceRegistry>,
        prefix: impl Into<String>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            database,
            registry,
            prefix: prefix.into(),
            auth,
        }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Route and run the controller on `db`; no transaction handling
    pub async fn handle<C: ConnectionTrait>(
        &self,
        db: &C,
        request: &RestRequest,
    ) -> Result<RestResponse> {
        let route = match_route(&self.prefix, &request.path)?;
        debug!(
            request_id = %request.context.request_id,
            "{} {} -> {}",
            request.method,
            request.path,
            route.name()
        );

        if route.name() == users::USERS_COLLECTION {
            return users::handle(db, &self.auth, route.id(), request).await;
        }

        let resource = self
            .registry
            .get(route.name())
            .ok_or_else(|| ApiError::not_found(format!("Resource {} not found", route.name())))?;
        records::handle(db, &resource, route.id(), request).await
    }

    /// Run the request in its own transaction, nested in `outer` when given
    pub async fn dispatch_in(
        &self,
        outer: Option<&DatabaseTransaction>,
        request: RestRequest,
    ) -> Result<RestResponse> {
        let txn = match outer {
            Some(outer) => outer.begin().await?,
            None => self.database.connection().begin().await?,
        };

        match self.handle(&txn, &request).await {
            Ok(response) if response.is_success() => {
                txn.commit().await?;
                Ok(response)
            }
            Ok(response) => {
                txn.rollback().await?;
                Ok(response)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(
                        request_id = %request.context.request_id,
                        "Rollback after failed request also failed: {}",
                        rollback_err
                    );
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl RequestDispatcher<DatabaseTransaction> for RestDispatcher {
    async fn dispatch(
        &self,
        transaction: Option<&DatabaseTransaction>,
        request: RestRequest,
    ) -> Result<RestResponse> {
        self.dispatch_in(transaction, request).await
    }
}
