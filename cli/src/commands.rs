//! CLI Commands

use anyhow::Context;
use chainkv_core::{
    Chaincode, HandlerConfig, InvocationRequest, Response, StateMutator, StateVersion,
};
use chainkv_kvstore::KvChaincode;
use chainkv_state::{StateStore, TransactionStub};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Whether a successful invocation's writes are committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Invoke,
    Query,
}

/// Named handler configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// `read`/`write`, missing keys read as empty
    ReadWrite,
    /// `get`/`set`, missing keys are an error
    GetSet,
}

impl Preset {
    pub fn config(self) -> HandlerConfig {
        match self {
            Preset::ReadWrite => HandlerConfig::read_write(),
            Preset::GetSet => HandlerConfig::get_set(),
        }
    }
}

/// Result of running one invocation
#[derive(Debug)]
pub struct Outcome {
    pub response: Response,
    /// Version after commit; `None` when nothing was committed
    pub committed: Option<StateVersion>,
}

/// Pick the handler configuration from a file, a preset, or the default.
pub fn resolve_config(path: Option<&Path>, preset: Option<Preset>) -> anyhow::Result<HandlerConfig> {
    match (path, preset) {
        (Some(path), _) => Ok(HandlerConfig::load(path)?),
        (None, Some(preset)) => Ok(preset.config()),
        (None, None) => Ok(HandlerConfig::default()),
    }
}

/// Build the invocation from a request file or positional arguments.
pub fn build_request(
    request_file: Option<&PathBuf>,
    fcn: Option<String>,
    args: Vec<String>,
) -> anyhow::Result<InvocationRequest> {
    let mut request = match request_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading request file {}", path.display()))?;
            InvocationRequest::from_json(&content)
                .with_context(|| format!("parsing request file {}", path.display()))?
        }
        None => {
            let fcn = fcn.context("a function name or --request file is required")?;
            InvocationRequest::new("", fcn, args)
        }
    };

    if request.tx_id.is_empty() {
        request.tx_id = new_tx_id();
    }
    Ok(request)
}

pub fn new_tx_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Run `request` against `store`, committing on success in `Mode::Invoke`.
pub fn execute<S: StateMutator>(
    chaincode: &KvChaincode,
    store: &S,
    request: InvocationRequest,
    mode: Mode,
) -> anyhow::Result<Outcome> {
    info!(tx_id = %request.tx_id, "assigning transaction id");

    let mut stub = TransactionStub::new(request, store);
    let response = chaincode.invoke(&mut stub);

    let committed = match (mode, response.is_success()) {
        (Mode::Invoke, true) => Some(stub.commit().context("committing write set")?),
        (Mode::Invoke, false) => {
            warn!("transaction proposal was bad, nothing committed");
            None
        }
        (Mode::Query, _) => None,
    };

    Ok(Outcome {
        response,
        committed,
    })
}

/// Run the deployment-time `init` entry point.
pub fn initialize<S: StateMutator>(chaincode: &KvChaincode, store: &S) -> Response {
    let request = InvocationRequest::from_args(new_tx_id(), Vec::new());
    let mut stub = TransactionStub::new(request, store);
    chaincode.init(&mut stub)
}

/// Human-readable summary of an outcome
pub fn render(outcome: &Outcome) -> String {
    let response = &outcome.response;
    let mut out = format!("Status:  {}\n", response.status);
    if response.is_success() {
        out.push_str(&format!(
            "Payload: {}\n",
            String::from_utf8_lossy(&response.payload)
        ));
    } else {
        out.push_str(&format!("Message: {}\n", response.message));
    }
    if let Some(version) = outcome.committed {
        out.push_str(&format!("Committed at {}\n", version));
    }
    out
}

/// All committed entries, one `key = value` line each
pub fn render_state<S: StateStore>(store: &S) -> anyhow::Result<String> {
    let entries = store.all_entries()?;
    let mut out = format!("State version: {}\n", store.version());
    for entry in entries {
        out.push_str(&format!(
            "{} = {}\n",
            String::from_utf8_lossy(&entry.key),
            String::from_utf8_lossy(&entry.value)
        ));
    }
    Ok(out)
}
