//! Batch endpoint integration tests

#[cfg(test)]
mod tests {
    use crate::common::database::count_records;
    use crate::common::fixtures::{MAX_BATCH, bearer, sub_request, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use serde_json::{Value, json};

    fn batch(payload: Value) -> TestRequest {
        TestRequest::post().uri("/api/batch").set_json(payload)
    }

    fn statuses(body: &Value) -> Vec<u64> {
        body["responses"]
            .as_array()
            .expect("responses must be an array")
            .iter()
            .map(|entry| entry["status"].as_u64().unwrap_or_default())
            .collect()
    }

    #[actix_web::test]
    async fn test_multi_status_shape() {
        let app = crate::test_app!(test_state().await);

        let resp = test::call_service(
            &app,
            batch(json!([sub_request("POST", "orgs", json!({"name": "Acme"}))])).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::MULTI_STATUS);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(statuses(&body), vec![201]);
        let entry = &body["responses"][0]["body"];
        assert!(entry["id"].is_string());
        assert!(entry["created_at"].is_string());
    }

    #[actix_web::test]
    async fn test_cross_reference_feeds_later_request() {
        let app = crate::test_app!(test_state().await);
        let (_, token) = crate::register_user!(&app, "owner@example.com");

        let payload = json!({
            "requests": [
                sub_request("POST", "orgs", json!({"name": "Acme"})),
                sub_request("POST", "projects", json!({"org_id": "$(0.id)", "name": "Rocket for $(0.id)"})),
            ]
        });
        let body: Value = test::call_and_read_body_json(
            &app,
            batch(payload).insert_header(bearer(&token)).to_request(),
        )
        .await;
        assert_eq!(statuses(&body), vec![201, 201]);

        let org_id = body["responses"][0]["body"]["id"].as_str().unwrap().to_string();
        let project_id = body["responses"][1]["body"]["id"].as_str().unwrap().to_string();

        let req = TestRequest::get()
            .uri(&format!("/api/projects/{}", project_id))
            .insert_header(bearer(&token))
            .to_request();
        let project: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(project["org_id"], org_id.as_str());
        assert_eq!(project["name"], format!("Rocket for {}", org_id));
    }

    #[actix_web::test]
    async fn test_path_reference_to_own_body() {
        let app = crate::test_app!(test_state().await);

        let payload = json!([
            sub_request("PUT", "orgs/$(slug)", json!({"slug": "acme", "name": "Acme"})),
            sub_request("PATCH", "orgs/$(0.id)", json!({"name": "Acme Corp"})),
        ]);
        let body: Value = test::call_and_read_body_json(&app, batch(payload).to_request()).await;
        assert_eq!(statuses(&body), vec![201, 200]);
        assert_eq!(body["responses"][0]["body"]["id"], "acme");

        let req = TestRequest::get().uri("/api/orgs/acme").to_request();
        let org: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(org["name"], "Acme Corp");
        assert!(org.get("slug").is_none());
    }

    #[actix_web::test]
    async fn test_atomic_failure_rolls_back_everything() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = crate::test_app!(state);

        let payload = json!([
            sub_request("POST", "orgs", json!({"name": "First"})),
            sub_request("POST", "orgs", json!({"country": "NL"})),
            sub_request("POST", "orgs", json!({"name": "Third"})),
        ]);
        let resp = test::call_service(&app, batch(payload).to_request()).await;
        assert_eq!(resp.status(), StatusCode::MULTI_STATUS);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(statuses(&body), vec![201, 422, 424]);
        assert_eq!(
            body["responses"][1]["body"]["error"]["code"],
            "VALIDATION_ERROR"
        );
        assert_eq!(
            body["responses"][2]["body"]["error"]["message"],
            "Skipped because atomic operation failed"
        );

        assert_eq!(count_records(&database, "orgs").await, 0);
    }

    #[actix_web::test]
    async fn test_atomic_success_commits() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = crate::test_app!(state);

        let payload = json!({
            "atomic": true,
            "requests": [
                sub_request("POST", "orgs", json!({"name": "One"})),
                sub_request("POST", "orgs", json!({"name": "Two"})),
            ]
        });
        let body: Value = test::call_and_read_body_json(&app, batch(payload).to_request()).await;
        assert_eq!(statuses(&body), vec![201, 201]);
        assert_eq!(count_records(&database, "orgs").await, 2);
    }

    #[actix_web::test]
    async fn test_non_atomic_keeps_going() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = crate::test_app!(state);

        let payload = json!({
            "requests": [
                sub_request("POST", "orgs", json!({"name": "First"})),
                sub_request("POST", "orgs", json!({})),
                sub_request("POST", "orgs", json!({"name": "Third"})),
            ]
        });
        let body: Value = test::call_and_read_body_json(&app, batch(payload).to_request()).await;
        assert_eq!(statuses(&body), vec![201, 422, 201]);
        assert_eq!(count_records(&database, "orgs").await, 2);
    }

    #[actix_web::test]
    async fn test_unresolved_reference_is_a_sub_failure() {
        let app = crate::test_app!(test_state().await);

        let payload = json!({
            "requests": [
                sub_request("POST", "orgs", json!({})),
                sub_request("POST", "orgs", json!({"name": "$(0.id)"})),
                sub_request("POST", "orgs", json!({"name": "$(5.id)"})),
                sub_request("PUT", "orgs/$(missing)", json!({"name": "x"})),
            ]
        });
        let body: Value = test::call_and_read_body_json(&app, batch(payload).to_request()).await;
        assert_eq!(statuses(&body), vec![422, 400, 400, 400]);
        assert_eq!(
            body["responses"][1]["body"]["error"]["code"],
            "UNRESOLVED_REFERENCE"
        );
    }

    #[actix_web::test]
    async fn test_sub_requests_inherit_caller_identity() {
        let app = crate::test_app!(test_state().await);
        let (user_id, token) = crate::register_user!(&app, "writer@example.com");

        let payload = json!({"requests": [sub_request("POST", "notes", json!({"title": "t"}))]});

        let anonymous: Value =
            test::call_and_read_body_json(&app, batch(payload.clone()).to_request()).await;
        assert_eq!(statuses(&anonymous), vec![401]);

        let signed_in: Value = test::call_and_read_body_json(
            &app,
            batch(payload).insert_header(bearer(&token)).to_request(),
        )
        .await;
        assert_eq!(statuses(&signed_in), vec![201]);
        assert_eq!(signed_in["responses"][0]["body"]["created_by"], user_id.as_str());
    }

    #[actix_web::test]
    async fn test_identical_submissions_are_not_deduplicated() {
        let state = test_state().await;
        let database = state.database.clone();
        let app = crate::test_app!(state);

        let payload = json!([sub_request("POST", "orgs", json!({"name": "Same"}))]);
        for _ in 0..2 {
            let body: Value =
                test::call_and_read_body_json(&app, batch(payload.clone()).to_request()).await;
            assert_eq!(statuses(&body), vec![201]);
        }
        assert_eq!(count_records(&database, "orgs").await, 2);
    }

    #[actix_web::test]
    async fn test_sub_request_ids_derive_from_parent() {
        let app = crate::test_app!(test_state().await);

        let payload = json!({"requests": [sub_request("POST", "orgs", json!({}))]});
        let req = batch(payload)
            .insert_header(("x-request-id", "parent-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
            "parent-1"
        );

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["responses"][0]["body"]["error"]["request_id"],
            "parent-1-0"
        );
    }

    #[actix_web::test]
    async fn test_envelope_errors_reject_the_whole_call() {
        let app = crate::test_app!(test_state().await);

        let too_many: Vec<Value> = (0..=MAX_BATCH)
            .map(|_| sub_request("POST", "orgs", json!({"name": "x"})))
            .collect();

        for payload in [
            json!({"requests": "nope"}),
            json!([]),
            json!([{"method": "GET", "path": "orgs", "body": {}}]),
            json!([{"method": "POST", "body": {}}]),
            json!({"requests": [sub_request("POST", "orgs", json!({}))], "atomic": "yes"}),
            Value::Array(too_many),
        ] {
            let resp = test::call_service(&app, batch(payload.clone()).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", payload);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[actix_web::test]
    async fn test_malformed_json_and_wrong_method() {
        let app = crate::test_app!(test_state().await);

        let req = TestRequest::post()
            .uri("/api/batch")
            .insert_header(("content-type", "application/json"))
            .set_payload("[{")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::get().uri("/api/batch").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");

        let req = TestRequest::delete().uri("/api/batch").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
