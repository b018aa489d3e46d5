use std::{net::SocketAddr, sync::Arc};

use reqwest::Client;
use tokio::task;
use transform_sandbox::{http_server, test_helpers::create_test_app_config};

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_identity_factory(None).await
    }

    pub async fn with_identity_factory(factory: Option<&str>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");
        drop(listener); // Release port for the app to use

        let config = Arc::new(create_test_app_config(&addr.to_string(), factory));

        // Spawn the actual app server
        let server_handle = task::spawn(async move {
            http_server::run_server_from_config(config).await.expect("Server failed");
        });

        // Wait for server to start
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;

        Self { address: addr, server_handle, client: Client::new() }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.post(&url).json(body).send().await.expect("Request failed")
    }

    pub fn cleanup(self) {
        self.server_handle.abort();
    }
}
