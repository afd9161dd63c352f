//! Catch-all handler forwarding HTTP requests to the REST dispatcher

use super::{error_response, parse_body, request_context};
use crate::core::rest::{HttpMethod, RestRequest, RestResponse};
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

/// Any method on any path under the API prefix
pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    let context = request_context(&req);
    let request_id = context.request_id.clone();

    let result: Result<RestResponse> = async {
        let method: HttpMethod = req.method().as_str().parse()?;
        let body = parse_body(&body)?;
        let target = match req.query_string() {
            "" => req.path().to_string(),
            query => format!("{}?{}", req.path(), query),
        };

        let request = RestRequest::new(method, &target, body, context);
        state.dispatcher.dispatch_in(None, request).await
    }
    .await;

    match result {
        Ok(response) => render(response),
        Err(e) => error_response(&e, &request_id),
    }
}

/// HTTP form of a controller response
pub fn render(response: RestResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match response.body {
        Some(body) => HttpResponse::build(status).json(body),
        None => HttpResponse::build(status).finish(),
    }
}
