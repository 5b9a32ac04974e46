use std::{
    fmt, fs,
    net::SocketAddr,
    path::Path,
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Router,
};
use tracing::{
    field::{Field, Visit},
    subscriber::DefaultGuard,
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};
use url::Url;

pub const IMPORT_PATH: &str = "/lighthouse/validators/keystore";

pub const PUBKEY: &str =
    "9612d7a727c9d0a22e185a1c768478dfe919cada9266988cb32359c11f2b7b27f4ae4040902382ae2910c15e2b420d07";

pub const KEYSTORE_JSON: &str = r#"{
    "crypto": {
        "kdf": {
            "function": "scrypt",
            "params": {
                "dklen": 32,
                "n": 262144,
                "p": 1,
                "r": 8,
                "salt": "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
            },
            "message": ""
        },
        "checksum": {
            "function": "sha256",
            "params": {},
            "message": "d2217fe5f3e9a1e34581ef8a78f7c9928e436d36dacc5e846690a5581e8ea484"
        },
        "cipher": {
            "function": "aes-128-ctr",
            "params": { "iv": "264daa3f303d7259501c93d997d84fe6" },
            "message": "06ae90d55fe0a6e9c5c3bc5b170827b2e5cce3929ed3f116c2811e6366dfe20f"
        }
    },
    "description": "This is a test keystore that uses scrypt to secure the secret.",
    "pubkey": "9612d7a727c9d0a22e185a1c768478dfe919cada9266988cb32359c11f2b7b27f4ae4040902382ae2910c15e2b420d07",
    "path": "m/12381/60/3141592653/589793238",
    "uuid": "1d85ae20-35c5-4611-98e8-aa14a633906f",
    "version": 4
}"#;

/// Write `keystore-A.json` and an unrelated `notes.txt` into `dir`.
pub fn write_keystore_dir(dir: &Path) -> eyre::Result<()> {
    fs::write(dir.join("keystore-A.json"), KEYSTORE_JSON)?;
    fs::write(dir.join("notes.txt"), "not a keystore")?;
    Ok(())
}

/// A request received by the mock validator client.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> eyre::Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self { status, body: body.to_owned() }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

struct MockState {
    import: MockResponse,
    fee_recipient: MockResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a mock validator client API running in a background task.
pub struct MockValidatorClient {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockValidatorClient {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("valid socket address")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Start a mock validator client that answers the keystore import and fee recipient
/// endpoints with the given responses, and 404 for everything else.
pub async fn spin_up_validator_client(
    import: MockResponse,
    fee_recipient: MockResponse,
) -> eyre::Result<MockValidatorClient> {
    let state = Arc::new(MockState { import, fee_recipient, requests: Mutex::new(Vec::new()) });
    let router = Router::new().fallback(handle).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            tracing::error!(?err, "Mock validator client error");
        }
    });

    Ok(MockValidatorClient { addr, state })
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_owned();
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        headers,
        body,
    });

    let response = if path == IMPORT_PATH {
        &state.import
    } else if path.starts_with("/eth/v1/validator/") && path.ends_with("/feerecipient") {
        &state.fee_recipient
    } else {
        return (StatusCode::NOT_FOUND, String::new());
    };

    (response.status, response.body.clone())
}

/// Events emitted by this crate, as `(level, message)` pairs in emission order.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    /// Capture events on the current thread until the returned guard is dropped.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::registry().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(Level, String)> {
        self.0.lock().unwrap().last().cloned()
    }

    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.events().into_iter().filter(|(l, _)| *l == level).map(|(_, msg)| msg).collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("vc_provisioner") {
            return;
        }

        let mut message = MessageVisitor::default();
        event.record(&mut message);
        self.0.lock().unwrap().push((*event.metadata().level(), message.0));
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
