//! # Shopfront Host
//!
//! The cart context host: it owns the shared [`state::CartStore`], wires it
//! to a durable slot store, and serves storefront commands as JSON lines.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Host                                   │
//! │                                                                         │
//! │  stdin ──► {"cmd":"add_to_cart","args":{...}}                           │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  ┌─────────────────────────────┐    ┌────────────────────────────────┐ │
//! │  │  commands::dispatch         │───►│  AppState                      │ │
//! │  │  (cart, config, amount)     │    │  CartStore + ConfigState       │ │
//! │  └─────────────────────────────┘    └───────────────┬────────────────┘ │
//! │               │                                     │                   │
//! │               ▼                                     ▼                   │
//! │  stdout ◄── {"ok":true,"data":{...}}     FileStore / MemoryStore        │
//! │                                                                         │
//! │  stderr ◄── tracing logs                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use serde::Serialize;
use serde_json::Value;
use shopfront_storage::{FileStore, MemoryStore, SlotStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::Invocation;
use error::ApiError;
use state::{AppState, ConfigState};

/// Runs the command loop until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Host Startup                                      │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,shopfront=debug, overridable with RUST_LOG          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • SHOPFRONT_* environment variables over defaults                   │
/// │                                                                         │
/// │  3. Open Slot Store ──────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/                                 │
/// │     • macOS: ~/Library/Application Support/com.shopfront.storefront/    │
/// │     • Unavailable → in-memory (logged)                                  │
/// │                                                                         │
/// │  4. Hydrate Cart ─────────────────────────────────────────────────────► │
/// │     • corrupt slot deleted, empty cart                                  │
/// │                                                                         │
/// │  5. Serve ────────────────────────────────────────────────────────────► │
/// │     • one JSON request per line, one JSON reply per line                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> std::io::Result<()> {
    init_tracing();

    info!("Starting Shopfront cart host");

    let config = ConfigState::from_env();
    let slots = open_slot_store(&config);
    let state = AppState::new(config, slots);

    info!(
        store = %state.config.store_name,
        locale = %state.config.locale,
        lines = state.cart.view(|cart, _| cart.line_count()),
        "State initialized"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = handle_line(&state, &line) else {
            continue;
        };
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_storage=trace` - Trace the slot store only
/// - Default: INFO, DEBUG for shopfront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    // try_init: a second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Chooses the slot backend for this run.
///
/// ## Resolution Order
/// 1. `in_memory` → [`MemoryStore`]
/// 2. `data_dir` override → [`FileStore`] there
/// 3. Platform data directory → [`FileStore`]
///
/// A directory that cannot be opened falls back to memory: the cart works
/// for the session and is lost on exit.
pub fn open_slot_store(config: &ConfigState) -> Arc<dyn SlotStore> {
    if config.in_memory {
        info!("Using in-memory slot store");
        return Arc::new(MemoryStore::new());
    }

    let Some(dir) = data_dir(config) else {
        warn!("Could not determine app data directory; using in-memory slot store");
        return Arc::new(MemoryStore::new());
    };

    match FileStore::open(&dir) {
        Ok(store) => {
            info!(?dir, "Slot directory opened");
            Arc::new(store)
        }
        Err(e) => {
            warn!(?dir, error = %e, "Slot directory unavailable; using in-memory slot store");
            Arc::new(MemoryStore::new())
        }
    }
}

fn data_dir(config: &ConfigState) -> Option<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Some(dir.clone());
    }
    ProjectDirs::from("com", "shopfront", "storefront").map(|dirs| dirs.data_dir().to_path_buf())
}

// =============================================================================
// Wire Protocol
// =============================================================================

/// One reply line.
///
/// ```json
/// {"ok":true,"data":{"items":[],"totals":{...},"drawerOpen":false}}
/// {"ok":false,"error":{"code":"INVALID_COMMAND","message":"Unknown command: x"}}
/// ```
#[derive(Debug, Serialize)]
pub struct Reply {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Reply {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Handles one request line. Blank lines produce no reply.
pub fn handle_line(state: &AppState, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let result = serde_json::from_str::<Invocation>(line)
        .map_err(ApiError::invalid_request)
        .and_then(|invocation| {
            debug!(cmd = %invocation.cmd, "Dispatching command");
            commands::dispatch(state, invocation)
        });

    if let Err(e) = &result {
        debug!(error = %e, "Command failed");
    }

    let reply = Reply::from(result);
    Some(serde_json::to_string(&reply).unwrap_or_else(|e| internal_reply(&e.to_string())))
}

/// Reply line used when a reply cannot be encoded.
fn internal_reply(message: &str) -> String {
    serde_json::json!({
        "ok": false,
        "error": { "code": "INTERNAL", "message": message },
    })
    .to_string()
}
