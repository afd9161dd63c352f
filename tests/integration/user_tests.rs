//! Users collection and token authentication integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{PASSWORD, bearer, register_body, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_register() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::post()
            .uri("/api/users")
            .set_json(register_body("new@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["email"], "new@example.com");
        assert_eq!(body["api_token"].as_str().unwrap().len(), 60);
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let req = TestRequest::post()
            .uri("/api/users")
            .set_json(register_body("new@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"email": "not-an-email", "password": "x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_login_rotates_token() {
        let app = crate::test_app!(test_state().await);
        let (user_id, first) = crate::register_user!(&app, "login@example.com");

        let req = TestRequest::get()
            .uri(&format!("/api/users/login@example.com?password={}", PASSWORD))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], user_id.as_str());
        let second = body["api_token"].as_str().unwrap().to_string();
        assert_ne!(first, second);

        let req = TestRequest::get()
            .uri(&format!("/api/users/{}", user_id))
            .insert_header(bearer(&first))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::get()
            .uri(&format!("/api/users/{}", user_id))
            .insert_header(bearer(&second))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_failures() {
        let app = crate::test_app!(test_state().await);
        crate::register_user!(&app, "who@example.com");

        for uri in [
            "/api/users/who@example.com?password=wrong-password",
            "/api/users/nobody@example.com?password=whatever",
        ] {
            let req = TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["message"], "Invalid credentials");
        }
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::get()
            .uri("/api/orgs")
            .insert_header(bearer("definitely-not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key("x-request-id"));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Invalid token");
    }

    #[actix_web::test]
    async fn test_token_in_query_string() {
        let app = crate::test_app!(test_state().await);
        let (user_id, token) = crate::register_user!(&app, "query@example.com");

        let req = TestRequest::get()
            .uri(&format!("/api/users/{}?api_token={}", user_id, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_show_requires_authentication() {
        let app = crate::test_app!(test_state().await);
        let (user_id, _) = crate::register_user!(&app, "private@example.com");

        let req = TestRequest::get()
            .uri(&format!("/api/users/{}", user_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_users_manage_only_themselves() {
        let app = crate::test_app!(test_state().await);
        let (alice_id, alice) = crate::register_user!(&app, "alice@example.com");
        let (bob_id, _) = crate::register_user!(&app, "bob@example.com");

        let req = TestRequest::patch()
            .uri(&format!("/api/users/{}", bob_id))
            .insert_header(bearer(&alice))
            .set_json(json!({"email": "mallory@example.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::patch()
            .uri(&format!("/api/users/{}", alice_id))
            .insert_header(bearer(&alice))
            .set_json(json!({"email": "alice2@example.com"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "alice2@example.com");

        let req = TestRequest::delete()
            .uri(&format!("/api/users/{}", bob_id))
            .insert_header(bearer(&alice))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::delete()
            .uri(&format!("/api/users/{}", alice_id))
            .insert_header(bearer(&alice))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = TestRequest::get()
            .uri("/api/orgs")
            .insert_header(bearer(&alice))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_users_collection_is_not_listable() {
        let app = crate::test_app!(test_state().await);
        let req = TestRequest::get().uri("/api/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
