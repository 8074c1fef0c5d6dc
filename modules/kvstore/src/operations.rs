//! Read and write operations

use chainkv_core::{ChaincodeError, ChaincodeResult, ChaincodeStub, MissingKeyPolicy};
use tracing::debug;

use crate::context::InvocationContext;

const READ_PARAMS: &str = "property key";
const WRITE_PARAMS: &str = "property key, new value";

/// Read the value stored under `args[0]`.
///
/// The payload is returned exactly as stored. What happens when the key
/// has no value is decided by `policy`.
pub fn read(
    ctx: &InvocationContext,
    stub: &dyn ChaincodeStub,
    args: &[String],
    policy: MissingKeyPolicy,
) -> ChaincodeResult<Vec<u8>> {
    if args.len() != 1 {
        return Err(ChaincodeError::argument_count(1, args.len(), READ_PARAMS));
    }
    let key = &args[0];

    debug!(parent: &ctx.span, "try to read property with key '{}'", key);
    let value = stub.get_state(key).map_err(|e| {
        debug!(parent: &ctx.span, "reading failed: {}", e);
        ChaincodeError::reading(e)
    })?;

    match value {
        Some(bytes) => {
            debug!(parent: &ctx.span, "read value: {}", String::from_utf8_lossy(&bytes));
            Ok(bytes)
        }
        None => {
            debug!(parent: &ctx.span, "no value for key '{}'", key);
            match policy {
                MissingKeyPolicy::EmptyPayload => Ok(Vec::new()),
                MissingKeyPolicy::NotFound => Err(ChaincodeError::KeyNotFound(key.clone())),
            }
        }
    }
}

/// Store `args[1]` under `args[0]`, replacing any previous value.
///
/// Echoes the written bytes back as the payload.
pub fn write(
    ctx: &InvocationContext,
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> ChaincodeResult<Vec<u8>> {
    if args.len() != 2 {
        return Err(ChaincodeError::argument_count(2, args.len(), WRITE_PARAMS));
    }
    let key = &args[0];
    let bytes = args[1].as_bytes().to_vec();

    debug!(parent: &ctx.span, "try to write property with key '{}'", key);
    stub.put_state(key, &bytes).map_err(ChaincodeError::writing)?;

    debug!(parent: &ctx.span, "written value: {}", String::from_utf8_lossy(&bytes));
    Ok(bytes)
}
