#![allow(dead_code)]

use contract_relay::config::{FastApiSettings, Settings};
use contract_relay::startup::Application;
use metrics_exporter_prometheus::PrometheusHandle;
use reqwest::multipart::{Form, Part};
use service_core::config::ServerConfig;
use wiremock::MockServer;

pub const ANALYZE_PATH: &str = "/api/contracts/analyze";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Stand-in for the analysis engine.
    pub downstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with settings pointed at a fresh mock analysis engine;
    /// `customize` can adjust them before the app is built.
    pub async fn spawn_with(customize: impl FnOnce(&mut Settings)) -> Self {
        Self::spawn_inner(customize, None).await
    }

    /// Spawn with a Prometheus recorder handle so `/metrics` is served.
    pub async fn spawn_with_metrics(metrics: PrometheusHandle) -> Self {
        Self::spawn_inner(|_| {}, Some(metrics)).await
    }

    async fn spawn_inner(
        customize: impl FnOnce(&mut Settings),
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let downstream = MockServer::start().await;

        let mut settings = Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
                ..Default::default()
            },
            fastapi: FastApiSettings {
                url: downstream.uri(),
                timeout_ms: 5_000,
                connect_timeout_ms: 1_000,
            },
            ..Default::default()
        };
        customize(&mut settings);

        let app = Application::build(settings, metrics)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            downstream,
            client,
        }
    }

    /// Upload `content` as the `file` field, the way a browser form would.
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> reqwest::Response {
        let part = Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .expect("valid mime");
        self.post_form(Form::new().part("file", part)).await
    }

    pub async fn post_form(&self, form: Form) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, ANALYZE_PATH))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Bodies of every request the mock analysis engine has seen.
    pub async fn downstream_bodies(&self) -> Vec<Vec<u8>> {
        self.downstream
            .received_requests()
            .await
            .expect("request recording enabled")
            .into_iter()
            .map(|request| request.body)
            .collect()
    }
}

/// Whether `haystack` contains `needle` as a contiguous byte run.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
