//! Generic resource CRUD integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{bearer, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_crud_lifecycle() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::post()
            .uri("/api/orgs")
            .set_json(json!({"name": "Acme", "country": "NL"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        let member = format!("/api/orgs/{}", id);

        let req = TestRequest::get().uri(&member).to_request();
        let org: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(org["name"], "Acme");
        assert_eq!(org["country"], "NL");

        // PATCH merges
        let req = TestRequest::patch()
            .uri(&member)
            .set_json(json!({"name": "Acme Corp"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = TestRequest::get().uri(&member).to_request();
        let org: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(org["name"], "Acme Corp");
        assert_eq!(org["country"], "NL");

        // PUT replaces
        let req = TestRequest::put()
            .uri(&member)
            .set_json(json!({"name": "Replaced"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = TestRequest::get().uri(&member).to_request();
        let org: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(org["name"], "Replaced");
        assert!(org.get("country").is_none());

        let req = TestRequest::delete().uri(&member).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = TestRequest::get().uri(&member).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::delete().uri(&member).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_put_creates_then_replaces() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::put()
            .uri("/api/orgs/acme")
            .set_json(json!({"name": "Acme"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "acme");

        let req = TestRequest::put()
            .uri("/api/orgs/acme")
            .set_json(json!({"name": "Acme 2"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_index_paginates() {
        let app = crate::test_app!(test_state().await);

        for name in ["a", "b", "c"] {
            let req = TestRequest::post()
                .uri("/api/orgs")
                .set_json(json!({"name": name}))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = TestRequest::get().uri("/api/orgs?page=2&limit=2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["meta"]["total"], 3);
        assert_eq!(body["meta"]["page"], 2);

        let req = TestRequest::get().uri("/api/orgs?limit=0").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = TestRequest::get()
            .uri("/api/orgs?page=18446744073709551615&limit=1000")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_only_fillable_attributes_are_stored() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::post()
            .uri("/api/orgs")
            .set_json(json!({"name": "Acme", "admin": true, "id": "forced"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_ne!(created["id"], "forced");

        let req = TestRequest::get()
            .uri(&format!("/api/orgs/{}", created["id"].as_str().unwrap()))
            .to_request();
        let org: Value = test::call_and_read_body_json(&app, req).await;
        assert!(org.get("admin").is_none());
    }

    #[actix_web::test]
    async fn test_validation_errors() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::post()
            .uri("/api/orgs")
            .set_json(json!({"name": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["validation"]["name"].is_array());
    }

    #[actix_web::test]
    async fn test_routing_errors() {
        let app = crate::test_app!(test_state().await);

        let cases = [
            (TestRequest::get().uri("/api/unknown"), StatusCode::NOT_FOUND),
            (TestRequest::get().uri("/api/orgs/1/extra"), StatusCode::NOT_FOUND),
            (TestRequest::get().uri("/elsewhere"), StatusCode::NOT_FOUND),
            (TestRequest::post().uri("/api/orgs/1"), StatusCode::METHOD_NOT_ALLOWED),
            (TestRequest::patch().uri("/api/orgs"), StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (req, status) in cases {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), status);
        }

        let req = TestRequest::post()
            .uri("/api/orgs")
            .insert_header(("content-type", "application/json"))
            .set_payload("{broken")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_authenticated_policy() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::get().uri("/api/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let (_, token) = crate::register_user!(&app, "p@example.com");
        let req = TestRequest::get()
            .uri("/api/projects")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_owner_policy() {
        let app = crate::test_app!(test_state().await);
        let (_, alice) = crate::register_user!(&app, "alice@example.com");
        let (_, bob) = crate::register_user!(&app, "bob@example.com");

        let req = TestRequest::post()
            .uri("/api/notes")
            .insert_header(bearer(&alice))
            .set_json(json!({"title": "Mine", "secret": "s3cret"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let member = format!("/api/notes/{}", created["id"].as_str().unwrap());

        let req = TestRequest::get()
            .uri(&member)
            .insert_header(bearer(&alice))
            .to_request();
        let note: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(note["title"], "Mine");
        assert!(note.get("secret").is_none());

        let req = TestRequest::get().uri(&member).insert_header(bearer(&bob)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::patch()
            .uri(&member)
            .insert_header(bearer(&bob))
            .set_json(json!({"title": "Stolen"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::put()
            .uri(&member)
            .insert_header(bearer(&bob))
            .set_json(json!({"title": "Stolen"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let req = TestRequest::delete().uri(&member).insert_header(bearer(&bob)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = TestRequest::get()
            .uri(&member)
            .insert_header(bearer(&alice))
            .to_request();
        let note: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(note["title"], "Mine");

        let req = TestRequest::get()
            .uri("/api/notes")
            .insert_header(bearer(&bob))
            .to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list["meta"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_health_and_request_id() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
    }
}
