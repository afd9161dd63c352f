//! Built-in users collection: registration, token login and self-service

use super::request::{HttpMethod, RestRequest, RestResponse};
use crate::config::AuthConfig;
use crate::core::validation::{RuleSet, Rules, validate};
use crate::storage::database::entities::user;
use crate::storage::database::{UserChanges, Users};
use crate::utils::auth::{generate_api_token, hash_api_token, hash_password, verify_password};
use crate::utils::error::{ApiError, Result};
use once_cell::sync::Lazy;
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Collection name the controller is mounted under
pub const USERS_COLLECTION: &str = "users";

static REGISTER_RULES: Lazy<Rules> = Lazy::new(|| {
    rules(&[
        ("email", "required|email|max:255"),
        ("password", "required|string|min:6"),
    ])
});

static MODIFY_RULES: Lazy<Rules> = Lazy::new(|| {
    rules(&[("email", "email|max:255"), ("password", "string|min:6")])
});

fn rules(pairs: &[(&str, &str)]) -> Rules {
    pairs
        .iter()
        .map(|(field, rule)| {
            let rule_set: RuleSet = rule.parse().expect("Invalid built-in user rule");
            (field.to_string(), rule_set)
        })
        .collect()
}

/// Serve one request against the users collection
pub async fn handle<C: ConnectionTrait>(
    db: &C,
    auth: &AuthConfig,
    id: Option<&str>,
    request: &RestRequest,
) -> Result<RestResponse> {
    let users = Users::new(db);
    match (request.method, id) {
        (HttpMethod::Post, None) => register(&users, auth, request).await,
        (HttpMethod::Get, Some(id)) if request.query_param("password").is_some() => {
            login(&users, auth, id, request).await
        }
        (HttpMethod::Get, Some(id)) => show(&users, id, request).await,
        (HttpMethod::Patch, Some(id)) => modify(&users, id, request).await,
        (HttpMethod::Delete, Some(id)) => destroy(&users, id, request).await,
        (method, _) => Err(ApiError::method_not_allowed(format!(
            "Method {} is not allowed on {}",
            method, request.path
        ))),
    }
}

async fn register<C: ConnectionTrait>(
    users: &Users<'_, C>,
    auth: &AuthConfig,
    request: &RestRequest,
) -> Result<RestResponse> {
    let input = Value::Object(request.body_object()?);
    validate(&input, &REGISTER_RULES)?;

    let email = string_field(&input, "email")?;
    let password = string_field(&input, "password")?;

    if users.find_by_email(email).await?.is_some() {
        return Err(ApiError::conflict("The email has already been taken."));
    }

    let token = generate_api_token(auth.token_length);
    let model = users
        .create(email, &hash_password(password)?, &hash_api_token(&token))
        .await?;

    info!("Registered user {}", model.id);
    Ok(RestResponse::created(with_token(&model, &token)))
}

async fn login<C: ConnectionTrait>(
    users: &Users<'_, C>,
    auth: &AuthConfig,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let password = request.query_param("password").unwrap_or_default();
    let invalid = || ApiError::unauthorized("Invalid credentials");

    let model = match users.find_by_id(id).await? {
        Some(model) => Some(model),
        None => users.find_by_email(id).await?,
    }
    .ok_or_else(invalid)?;

    if !verify_password(password, &model.password_hash)? {
        debug!("Password mismatch for user {}", model.id);
        return Err(invalid());
    }

    let token = generate_api_token(auth.token_length);
    let model = users.set_token(model, &hash_api_token(&token)).await?;
    Ok(RestResponse::ok(with_token(&model, &token)))
}

async fn show<C: ConnectionTrait>(
    users: &Users<'_, C>,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    request.context.require_user()?;

    let model = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user found for key {}", id)))?;
    Ok(RestResponse::ok(view(&model)))
}

async fn modify<C: ConnectionTrait>(
    users: &Users<'_, C>,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let model = own_account(users, id, request).await?;

    let input = Value::Object(request.body_object()?);
    validate(&input, &MODIFY_RULES)?;

    let mut changes = UserChanges::default();
    if let Some(email) = input.get("email").and_then(Value::as_str) {
        if email != model.email {
            if users.find_by_email(email).await?.is_some() {
                return Err(ApiError::conflict("The email has already been taken."));
            }
            changes.email = Some(email.to_string());
        }
    }
    if let Some(password) = input.get("password").and_then(Value::as_str) {
        changes.password_hash = Some(hash_password(password)?);
    }

    let model = users.update(model, changes).await?;
    Ok(RestResponse::ok(view(&model)))
}

async fn destroy<C: ConnectionTrait>(
    users: &Users<'_, C>,
    id: &str,
    request: &RestRequest,
) -> Result<RestResponse> {
    let model = own_account(users, id, request).await?;
    users.delete(&model.id).await?;
    Ok(RestResponse::no_content())
}

/// The caller's own account; others' accounts are forbidden
async fn own_account<C: ConnectionTrait>(
    users: &Users<'_, C>,
    id: &str,
    request: &RestRequest,
) -> Result<user::Model> {
    let caller = request.context.require_user()?;
    if caller.id != id {
        return Err(ApiError::forbidden("This action is unauthorized."));
    }

    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No user found for key {}", id)))
}

fn string_field<'v>(input: &'v Value, field: &str) -> Result<&'v str> {
    input
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation(field, format!("The {} must be a string.", field)))
}

/// `{id, email, created_at, updated_at}`
pub fn view(model: &user::Model) -> Value {
    json!({
        "id": model.id,
        "email": model.email,
        "created_at": model.created_at.to_rfc3339(),
        "updated_at": model.updated_at.to_rfc3339(),
    })
}

fn with_token(model: &user::Model, token: &str) -> Value {
    let mut body = view(model);
    body["api_token"] = Value::String(token.to_string());
    body
}
