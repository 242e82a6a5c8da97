//! The `docuprox` binary

#[cfg(test)]
mod tests {
    use crate::common::server::TEST_API_KEY;
    use crate::common::{ItemFactory, MockDocuProx, PNG_BYTES};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::{Value, json};
    use std::process::Output;
    use tempfile::TempDir;
    use tokio::process::Command;

    fn docuprox() -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_docuprox"));
        command
            .env_remove("DOCUPROX_API_KEY")
            .env_remove("DOCUPROX_API_BASE")
            .env_remove("DOCUPROX_CONFIG")
            .env_remove("DOCUPROX_CONTINUE_ON_FAILURE")
            .env("DOCUPROX_LOG_LEVEL", "warn");
        command
    }

    fn stdout_json(output: &Output) -> Value {
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }

    #[tokio::test]
    async fn test_describe_prints_schema() {
        let output = docuprox().arg("describe").output().await.unwrap();
        assert!(output.status.success());

        let description = stdout_json(&output);
        assert_eq!(description["node"]["name"], "docuProx");
        assert_eq!(description["credentials"][0]["name"], "docuProxApi");
    }

    #[tokio::test]
    async fn test_version_names_commit() {
        let output = docuprox().arg("--version").output().await.unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim(), format!("docuprox {}", docuprox_batch::LONG_VERSION));
    }

    #[tokio::test]
    async fn test_run_yaml_manifest_with_path_attachment() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"ok": true})).await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("page.png"), PNG_BYTES).unwrap();
        let manifest = dir.path().join("batch.yaml");
        std::fs::write(
            &manifest,
            "parameters:\n  templateId: invoice\nitems:\n  - attachments:\n      data: { path: page.png }\n",
        )
        .unwrap();

        let output = docuprox()
            .env("DOCUPROX_API_KEY", TEST_API_KEY)
            .env("DOCUPROX_API_BASE", api.endpoint())
            .arg("run")
            .arg(&manifest)
            .output()
            .await
            .unwrap();
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let records = stdout_json(&output);
        assert_eq!(records[0]["json"]["success"], json!(true));
        assert_eq!(
            api.received_bodies().await,
            vec![json!({"template_id": "invoice", "actual_image": STANDARD.encode(PNG_BYTES)})]
        );
    }

    #[tokio::test]
    async fn test_run_without_key_fails() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("batch.yaml");
        std::fs::write(&manifest, "items: []\n").unwrap();

        let output = docuprox().arg("run").arg(&manifest).output().await.unwrap();
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("api.api_key"));
    }

    #[tokio::test]
    async fn test_run_writes_output_file() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({"fields": {"total": "9.99"}})).await;

        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("batch.json");
        std::fs::write(
            &manifest,
            serde_json::to_vec(&json!({
                "items": [
                    {"parameters": ItemFactory::data_uri("T1", "AAAA")},
                    {"parameters": ItemFactory::missing_template()}
                ]
            }))
            .unwrap(),
        )
        .unwrap();
        let out = dir.path().join("out.json");

        let output = docuprox()
            .env("DOCUPROX_API_KEY", TEST_API_KEY)
            .env("DOCUPROX_API_BASE", api.endpoint())
            .arg("run")
            .arg(&manifest)
            .arg("--continue-on-failure")
            .arg("--output")
            .arg(&out)
            .output()
            .await
            .unwrap();
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let records: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(records.as_array().map(Vec::len), Some(2));
        assert_eq!(records[0]["json"]["templateId"], "T1");
        assert_eq!(records[0]["json"]["response"]["fields"]["total"], "9.99");
        assert_eq!(records[1]["json"]["error"], "Template ID is required");
        assert_eq!(records[1]["pairedItem"]["item"], 1);
    }

    #[tokio::test]
    async fn test_run_fail_fast_exit_code() {
        let api = MockDocuProx::start().await;
        api.respond(200, json!({})).await;

        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("batch.yaml");
        std::fs::write(
            &manifest,
            "items:\n  - parameters:\n      templateId: ''\n      imageSource: base64\n      base64Image: AAAA\n",
        )
        .unwrap();

        let output = docuprox()
            .env("DOCUPROX_API_KEY", TEST_API_KEY)
            .env("DOCUPROX_API_BASE", api.endpoint())
            .arg("run")
            .arg(&manifest)
            .output()
            .await
            .unwrap();

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        assert!(
            String::from_utf8_lossy(&output.stderr).contains("Template ID is required [item 0]")
        );
    }
}
