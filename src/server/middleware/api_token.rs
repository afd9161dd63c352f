//! API token authentication middleware
//!
//! Resolves `Authorization: Bearer <token>` (or the configured query
//! parameter) to an [`AuthUser`] stored in the request extensions. Requests
//! without a token pass through anonymously; an unknown token is rejected.

use crate::core::rest::{AuthUser, parse_query};
use crate::server::AppState;
use crate::server::middleware::REQUEST_ID_HEADER;
use crate::server::routes::error_response;
use crate::storage::database::Users;
use crate::utils::auth::hash_api_token;
use crate::utils::error::{ApiError, Result as ApiResult};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// API token middleware for Actix-web
pub struct ApiTokenMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ApiTokenMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ApiTokenMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiTokenMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for API token middleware
pub struct ApiTokenMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ApiTokenMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(state) = state else {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            };

            let query_param = &state.config.auth().token_query_param;
            if let Some(token) = extract_token(req.headers(), req.query_string(), query_param) {
                let rejection = match authenticate(&state, &token).await {
                    Ok(Some(user)) => {
                        debug!("Authenticated user {}", user.id);
                        req.extensions_mut().insert(user);
                        None
                    }
                    Ok(None) => {
                        warn!("Rejected request with unknown API token");
                        Some(ApiError::unauthorized("Invalid token"))
                    }
                    Err(e) => Some(e),
                };

                if let Some(error) = rejection {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let response = error_response(&error, &request_id);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Bearer token from the headers, else the named query parameter
pub fn extract_token(headers: &HeaderMap, query: &str, query_param: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    parse_query(query)
        .remove(query_param)
        .filter(|token| !token.is_empty())
}

async fn authenticate(state: &AppState, token: &str) -> ApiResult<Option<AuthUser>> {
    let user = Users::new(state.database.connection())
        .find_by_token_hash(&hash_api_token(token))
        .await?;

    Ok(user.map(|user| AuthUser {
        id: user.id,
        email: user.email,
    }))
}
