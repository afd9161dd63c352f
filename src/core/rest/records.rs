//! Generic CRUD controller over declared record collections

use super::request::{HttpMethod, RestRequest, RestResponse};
use super::resource::ResourceDefinition;
use crate::config::Policy;
use crate::core::validation::{ValidationErrors, validate};
use crate::storage::database::Records;
use crate::storage::database::entities::record;
use crate::utils::error::{ApiError, Result};
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Query parameters for listing
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    /// Read `page`/`limit` from the request query
    pub fn from_request(request: &RestRequest) -> Result<Self> {
        let mut errors = ValidationErrors::default();
        let mut query = Self::default();

        if let Some(page) = request.query_param("page") {
            match page.parse::<u64>() {
                Ok(page) => query.page = page,
                Err(_) => errors.add("page", "The page must be an integer."),
            }
        }
        if let Some(limit) = request.query_param("limit") {
            match limit.parse::<u64>() {
                Ok(limit) => query.limit = limit,
                Err(_) => errors.add("limit", "The limit must be an integer."),
            }
        }
        errors.into_result()?;

        query.validate()?;
        Ok(query)
    }

    /// Validate pagination parameters
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(ApiError::validation("page", "Page must be greater than 0"));
        }
        if self.limit == 0 {
            return Err(ApiError::validation("limit", "Limit must be greater than 0"));
        }
        if self.limit > 1000 {
            return Err(ApiError::validation("limit", "Limit cannot exceed 1000"));
        }
        if self.page > u64::MAX / self.limit {
            return Err(ApiError::validation("page", "Page is out of range"));
        }
        Ok(())
    }
}

/// Serve one request against `resource`
pub async fn handle<C: ConnectionTrait>(
    db: &C,
    resource: &ResourceDefinition,
    id: Option<&str>,
    request: &RestRequest,
) -> Result<RestResponse> {
    if resource.policy != Policy::Public {
        request.context.require_user()?;
    }

    let records = Records::new(db);
    match (request.method, id) {
        (HttpMethod::Get, None) => index(&records, resource, request).await,
        (HttpMethod::Post, None) => store(&records, resource, request).await,
        (HttpMethod::Get, Some(id)) => show(&records, resource, id, request).await,
        (HttpMethod::Patch, Some(id)) => modify(&records, resource, id, request).await,
        (HttpMethod::Put, Some(id)) => replace_or_create(&records, resource, id, request).await,
        (HttpMethod::Delete, Some(id)) => destroy(&records, resource, id, request).await,
        (method, _) => Err(ApiError::method_not_allowed(format!(
            "Method {} is not allowed on {}",
            method, request.path
        ))),
    }
}

async fn index<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    request: &RestRequest,
) -> Result<RestResponse> {
    let query = PaginationQuery::from_request(request)?;
    let owner = match resource.policy {
        Policy::Owner => request.context.user_id(),
        _ => None,
    };

    let page = records
        .list(&resource.name, owner, query.page, query.limit)
        .await?;
    let data = page
        .items
        .iter()
        .map(|model| read_view(resource, model))
        .collect::<Result<Vec<_>>>()?;

    Ok(RestResponse::ok(json!({
        "data": data,
        "meta": {
            "page": page.page,
            "limit": page.limit,
            "total": page.total,
        },
    })))
}

async fn store<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    request: &RestRequest,
) -> Result<RestResponse> {
    let input = request.body_object()?;
    validate(&Value::Object(input.clone()), &resource.rules.create)?;

    let id = resource.key.generate();
    let model = records
        .insert(
            &resource.name,
            &id,
            &resource.fill(&input),
            request.context.user_id(),
        )
        .await?;

    debug!("Stored {}/{}", resource.name, model.id);
    Ok(RestResponse::created(write_view(&model)))
}

async fn show<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let model = find_visible(records, resource, id, request)
        .await?
        .ok_or_else(|| not_found(resource, id))?;

    Ok(RestResponse::ok(read_view(resource, &model)?))
}

async fn modify<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let model = find_visible(records, resource, id, request)
        .await?
        .ok_or_else(|| not_found(resource, id))?;

    let input = request.body_object()?;
    validate(&Value::Object(input.clone()), &resource.rules.modify)?;

    let mut attributes = model.attributes()?;
    attributes.extend(resource.fill(&input));

    let model = records.update(model, &attributes).await?;
    Ok(RestResponse::ok(write_view(&model)))
}

async fn replace_or_create<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let input = request.body_object()?;

    match records.find(&resource.name, id).await? {
        Some(model) if !visible_to(resource, &model, request) => Err(not_found(resource, id)),
        Some(model) => {
            validate(&Value::Object(input.clone()), resource.rules.for_replace())?;

            let mut attributes: Map<String, Value> = model
                .attributes()?
                .into_iter()
                .filter(|(key, _)| !resource.is_fillable(key))
                .collect();
            attributes.extend(resource.fill(&input));

            let model = records.update(model, &attributes).await?;
            Ok(RestResponse::ok(write_view(&model)))
        }
        None => {
            validate(&Value::Object(input.clone()), &resource.rules.create)?;

            let model = records
                .insert(
                    &resource.name,
                    id,
                    &resource.fill(&input),
                    request.context.user_id(),
                )
                .await?;
            Ok(RestResponse::created(write_view(&model)))
        }
    }
}

async fn destroy<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    if find_visible(records, resource, id, request).await?.is_some() {
        records.delete(&resource.name, id).await?;
    }
    Ok(RestResponse::no_content())
}

/// Under the owner policy, another caller's record behaves as if it were absent
fn visible_to(resource: &ResourceDefinition, model: &record::Model, request: &RestRequest) -> bool {
    resource.policy != Policy::Owner
        || (model.created_by.is_some() && model.created_by.as_deref() == request.context.user_id())
}

async fn find_visible<C: ConnectionTrait>(
    records: &Records<'_, C>,
    resource: &ResourceDefinition,
    id: &str,
    request: &RestRequest,
) -> Result<Option<record::Model>> {
    Ok(records
        .find(&resource.name, id)
        .await?
        .filter(|model| visible_to(resource, model, request)))
}

fn not_found(resource: &ResourceDefinition, id: &str) -> ApiError {
    ApiError::not_found(format!("No {} record found for key {}", resource.name, id))
}

fn meta(model: &record::Model, view: &mut Map<String, Value>) {
    view.insert("id".to_string(), Value::String(model.id.clone()));
    if let Some(created_by) = &model.created_by {
        view.insert("created_by".to_string(), Value::String(created_by.clone()));
    }
    view.insert(
        "created_at".to_string(),
        Value::String(model.created_at.to_rfc3339()),
    );
    view.insert(
        "updated_at".to_string(),
        Value::String(model.updated_at.to_rfc3339()),
    );
}

/// `{id, ...visible attributes, created_by?, created_at, updated_at}`
pub fn read_view(resource: &ResourceDefinition, model: &record::Model) -> Result<Value> {
    let mut view = resource.visible(model.attributes()?);
    meta(model, &mut view);
    Ok(Value::Object(view))
}

/// `{id, created_by?, created_at, updated_at}`
pub fn write_view(model: &record::Model) -> Value {
    let mut view = Map::new();
    meta(model, &mut view);
    Value::Object(view)
}
