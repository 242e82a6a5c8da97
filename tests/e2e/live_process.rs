//! Live process call

#[cfg(test)]
mod tests {
    use crate::skip_without_env;
    use docuprox_batch::config::Config;
    use docuprox_batch::{BatchManifest, DocuProxNode, ReqwestTransport};
    use serde_json::json;

    /// 1x1 transparent PNG
    const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[tokio::test]
    #[ignore]
    async fn test_live_process_returns_one_record() {
        skip_without_env!("DOCUPROX_API_KEY");
        skip_without_env!("DOCUPROX_TEST_TEMPLATE_ID");

        let config = Config::from_env().unwrap();
        let template_id = std::env::var("DOCUPROX_TEST_TEMPLATE_ID").unwrap();
        let node = DocuProxNode::from_config(ReqwestTransport::new().unwrap(), &config.api).unwrap();

        let batch = BatchManifest::new()
            .with_continue_on_failure(true)
            .with_item(json!({
                "templateId": template_id,
                "imageSource": "base64",
                "base64Image": format!("data:image/png;base64,{}", PIXEL_PNG)
            }));

        let outputs = node.execute(&batch).await.unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].item_index(), 0);
    }
}
