//! Common test utilities for restapi-rs
//!
//! - In-memory SQLite database support
//! - Test configuration and application state
//! - Request helpers
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures;
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let app = crate::test_app!(fixtures::test_state().await);
//!     let (user_id, token) = crate::register_user!(&app, "a@example.com");
//!     // ...
//! }
//! ```

pub mod database;
pub mod fixtures;

pub use database::TestDatabase;

/// Initialize the Actix service for an `AppState`
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(restapi_rs::server::create_app(
            actix_web::web::Data::new($state),
        ))
        .await
    };
}

/// Register a user through the API and return `(id, api_token)`
#[macro_export]
macro_rules! register_user {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/users")
            .set_json($crate::common::fixtures::register_body($email))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json($app, req).await;
        (
            body["id"].as_str().expect("registration returned no id").to_string(),
            body["api_token"]
                .as_str()
                .expect("registration returned no token")
                .to_string(),
        )
    }};
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
