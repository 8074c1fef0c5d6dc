//! Response encoding

use chainkv_core::{ChaincodeError, ChaincodeResult, Response};
use tracing::error;

use crate::context::InvocationContext;

/// Success response carrying `payload` unmodified
pub fn success(payload: Vec<u8>) -> Response {
    Response {
        status: Response::OK,
        message: String::new(),
        payload,
    }
}

/// Error response carrying the error's message
pub fn error(ctx: &InvocationContext, err: &ChaincodeError) -> Response {
    let message = err.to_string();
    error!(parent: &ctx.span, "{}", message);
    Response {
        status: Response::ERROR,
        message,
        payload: Vec::new(),
    }
}

/// Map an operation outcome onto the host response shape
pub fn encode(ctx: &InvocationContext, result: ChaincodeResult<Vec<u8>>) -> Response {
    match result {
        Ok(payload) => success(payload),
        Err(err) => error(ctx, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let response = success(b"blue".to_vec());
        assert_eq!(response.status, Response::OK);
        assert!(response.message.is_empty());
        assert_eq!(response.payload, b"blue".to_vec());
    }

    #[test]
    fn test_error_shape() {
        let ctx = InvocationContext::new("tx1", "delete");
        let response = encode(&ctx, Err(ChaincodeError::UnknownFunction("delete".to_string())));
        assert_eq!(response.status, Response::ERROR);
        assert!(response.payload.is_empty());
        assert_eq!(response.message, "Received unknown function invocation: delete");
    }
}
