//! Common test harness for ifoodapp integration tests.
//!
//! Provides a mock API server with a client pointed at it, and helpers for
//! answering list requests the way the server does.

use std::sync::{Arc, Once};
use std::time::Duration;

use ifoodapp::testing::InMemoryTransport;
use ifoodapp::{Client, ListConfig};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: Once = Once::new();

/// Installs a test log subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A mock API server and a client pointed at it.
pub struct TestFixture {
    pub server: MockServer,
    pub client: Client,
}

impl TestFixture {
    /// Starts a server with default list settings.
    pub async fn start() -> Self {
        Self::with_config(ListConfig::default()).await
    }

    /// Starts a server; the client hands `config` to its list controllers.
    pub async fn with_config(config: ListConfig) -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let client = Client::builder()
            .url(server.uri())
            .insecure()
            .list_config(config)
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client should build against the mock server");
        Self { server, client }
    }

    /// Answers `GET /<path>?sort=<sort>` with `body` and the given headers.
    pub async fn mount_list(
        &self,
        resource_path: &str,
        sort: &str,
        body: Value,
        link: Option<&str>,
        total_count: Option<&str>,
    ) {
        let mut response = ResponseTemplate::new(200).set_body_json(body);
        if let Some(link) = link {
            response = response.insert_header("link", link);
        }
        if let Some(total_count) = total_count {
            response = response.insert_header("x-total-count", total_count);
        }

        Mock::given(method("GET"))
            .and(path(resource_path))
            .and(query_param("sort", sort))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }
}

/// A client backed by an in-memory store.
#[allow(dead_code)]
pub fn in_memory_client(store: Arc<InMemoryTransport>, config: ListConfig) -> Client {
    init_tracing();
    Client::builder()
        .url("https://ifood.test")
        .list_config(config)
        .transport(store)
        .build()
        .expect("client should build with an injected transport")
}

/// A list body of entities with these ids.
pub fn with_ids(ids: &[i64]) -> Value {
    Value::Array(ids.iter().map(|id| json!({ "id": id })).collect())
}
