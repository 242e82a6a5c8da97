//! Node execution over HTTP

#[cfg(test)]
mod tests {
    use crate::assert_failure;
    use crate::common::server::{PROCESS_PATH, TEST_API_KEY};
    use crate::common::{ItemFactory, MockDocuProx, PNG_BYTES};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use docuprox_batch::{BatchError, BatchManifest, Outcome, ProcessingError};
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    // ==================== Request Shape ====================

    #[tokio::test]
    async fn test_data_uri_item_posts_stripped_payload() {
        let api = MockDocuProx::start().await;
        Mock::given(method("POST"))
            .and(path(PROCESS_PATH))
            .and(header("x-auth", TEST_API_KEY))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({"template_id": "T1", "actual_image": "AAAA"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "processed"})))
            .expect(1)
            .mount(&api.server)
            .await;

        let batch = BatchManifest::new().with_item(ItemFactory::data_uri("T1", "AAAA"));
        let outputs = api.node(TIMEOUT).execute(&batch).await.unwrap();

        assert_eq!(outputs.len(), 1);
        match &outputs[0].json {
            Outcome::Success(success) => {
                assert!(success.success);
                assert_eq!(success.template_id, "T1");
                assert_eq!(success.response, json!({"status": "processed"}));
            }
            Outcome::Failure(failure) => panic!("unexpected failure: {}", failure.error),
        }
    }

    #[tokio::test]
    async fn test_upload_item_reads_attachment_from_disk() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"ok": true})).await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("page.png"), PNG_BYTES).unwrap();
        let manifest_path = dir.path().join("batch.json");
        std::fs::write(
            &manifest_path,
            serde_json::to_vec(&json!({
                "parameters": {"templateId": "invoice"},
                "items": [{"attachments": {"data": {"path": "page.png"}}}]
            }))
            .unwrap(),
        )
        .unwrap();

        let batch = BatchManifest::from_path(&manifest_path).await.unwrap();
        let outputs = api.node(TIMEOUT).execute(&batch).await.unwrap();
        assert!(outputs[0].is_success());

        let bodies = api.received_bodies().await;
        assert_eq!(
            bodies,
            vec![json!({"template_id": "invoice", "actual_image": STANDARD.encode(PNG_BYTES)})]
        );
    }

    // ==================== Failure Handling ====================

    #[tokio::test]
    async fn test_fail_fast_stops_at_first_bad_item() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"ok": true})).await;

        let batch = BatchManifest::new()
            .with_item(ItemFactory::base64("T0", "AAAA"))
            .with_item(ItemFactory::missing_template())
            .with_item(ItemFactory::base64("T2", "AAAA"));

        let err = api.node(TIMEOUT).execute(&batch).await.unwrap_err();
        assert_eq!(err.item_index(), 1);
        assert!(matches!(
            err,
            BatchError::Item {
                source: ProcessingError::MissingParameter { .. },
                ..
            }
        ));
        assert_eq!(api.received_bodies().await.len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_recorded_with_details() {
        let api = MockDocuProx::start().await;
        Mock::given(method("POST"))
            .and(path(PROCESS_PATH))
            .and(body_partial_json(json!({"template_id": "slow"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"late": true}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&api.server)
            .await;
        api.respond(200, json!({"ok": true})).await;

        let batch = BatchManifest::new()
            .with_continue_on_failure(true)
            .with_item(ItemFactory::base64("fast", "AAAA"))
            .with_item(ItemFactory::base64("slow", "BBBB"));

        let outputs = api
            .node(Duration::from_millis(300))
            .execute(&batch)
            .await
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].is_success());
        assert_eq!(assert_failure!(outputs[1]), "timeout of 300ms exceeded");

        let record = serde_json::to_value(&outputs[1]).unwrap();
        assert_eq!(record["json"]["success"], json!(false));
        assert_eq!(
            record["json"]["errorDetails"],
            json!({"code": "ETIMEDOUT", "timeoutMs": 300})
        );
        assert_eq!(record["pairedItem"], json!({"item": 1}));
    }

    #[tokio::test]
    async fn test_api_error_body_becomes_error_details() {
        let api = MockDocuProx::start().await;
        api.respond(422, json!({"message": "template not found"})).await;

        let batch = BatchManifest::new()
            .with_continue_on_failure(true)
            .with_item(ItemFactory::base64("missing-template", "AAAA"));

        let outputs = api.node(TIMEOUT).execute(&batch).await.unwrap();
        assert_eq!(
            assert_failure!(outputs[0]),
            "Request failed with status code 422"
        );

        let record = serde_json::to_value(&outputs[0]).unwrap();
        assert_eq!(
            record["json"]["errorDetails"],
            json!({"message": "template not found"})
        );
    }

    #[tokio::test]
    async fn test_api_error_aborts_with_prefix() {
        let api = MockDocuProx::start().await;
        api.respond(500, json!({"message": "internal"})).await;

        let batch = BatchManifest::new().with_item(ItemFactory::base64("T1", "AAAA"));
        let err = api.node(TIMEOUT).execute(&batch).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "DocuProx API Error: Request failed with status code 500 [item 0]"
        );
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected_by_server() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"ok": true})).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "unauthorized"})))
            .mount(&api.server)
            .await;

        let mut config = api.api_config(TIMEOUT);
        config.api_key = Some("wrong-key".to_string());
        let node = docuprox_batch::DocuProxNode::from_config(
            docuprox_batch::ReqwestTransport::new().unwrap(),
            &config,
        )
        .unwrap();

        let batch = BatchManifest::new()
            .with_continue_on_failure(true)
            .with_item(ItemFactory::base64("T1", "AAAA"));
        let outputs = node.execute(&batch).await.unwrap();
        assert_eq!(
            assert_failure!(outputs[0]),
            "Request failed with status code 401"
        );
    }

    #[tokio::test]
    async fn test_mixed_batch_keeps_order() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"ok": true})).await;

        let batch = BatchManifest::new()
            .with_continue_on_failure(true)
            .with_item(ItemFactory::base64("T0", "AAAA"))
            .with_item(ItemFactory::upload("T1", "missing"))
            .with_item(ItemFactory::missing_template())
            .with_item(ItemFactory::data_uri("T3", "CCCC"));

        let report = api.node(TIMEOUT).execute_with_summary(&batch).await.unwrap();

        let indices: Vec<_> = report.outputs.iter().map(|o| o.item_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(report.summary.succeeded, 2);
        assert_eq!(report.summary.failed, 2);
        assert_eq!(
            assert_failure!(report.outputs[2]),
            "Template ID is required"
        );
        assert_eq!(api.received_bodies().await.len(), 2);
    }
}
