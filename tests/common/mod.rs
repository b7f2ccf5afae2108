use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

use textsum::config::Settings;

#[allow(dead_code)]
pub fn run_textsum(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

/// Isolated HOME and XDG directories for running the binary.
pub struct TestEnv {
    home: TempDir,
    config: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
        }
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_textsum"));
        command
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("TEXTSUM_MODEL_ENDPOINT")
            .env_remove("TEXTSUM_MODEL_NAME")
            .env_remove("TEXTSUM_SERVICE_URL")
            .env_remove("TEXTSUM_BIND")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("failed to execute textsum binary")
    }

    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }
}

/// Stand-in for the model server's generate endpoint.
#[allow(dead_code)]
pub struct StubModel {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[allow(dead_code)]
impl StubModel {
    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn stub_generate(State(state): State<StubState>, body: Bytes) -> (StatusCode, Json<Value>) {
    // Form bodies are kept as raw text so the stub can also pose as the service
    let recorded = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    state.requests.lock().unwrap().push(recorded);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.reply))
}

#[allow(dead_code)]
pub async fn spawn_model(reply: Value) -> StubModel {
    spawn_model_with(StatusCode::OK, reply, Duration::ZERO).await
}

#[allow(dead_code)]
pub async fn spawn_model_with(status: StatusCode, reply: Value, delay: Duration) -> StubModel {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        reply,
        delay,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/api/generate", post(stub_generate))
        .with_state(state);

    let addr = serve_in_background(app).await;

    StubModel {
        url: format!("http://{}/api/generate", addr),
        requests,
    }
}

/// Start the summarization service against the configured model endpoint.
#[allow(dead_code)]
pub async fn spawn_service(settings: &Settings) -> String {
    let backend = textsum::llm::build_backend(settings).expect("build model backend");
    let app = textsum::server::router(settings, backend).expect("build router");
    let addr = serve_in_background(app).await;
    format!("http://{}/summarize/", addr)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}

async fn serve_in_background(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });
    addr
}

/// Settings pointing at a stub model server.
#[allow(dead_code)]
pub fn settings_for(model_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.model.endpoint = model_url.to_string();
    settings
}
