//! Host entry points

use chainkv_core::{
    Chaincode, ChaincodeError, ChaincodeResult, ChaincodeStub, HandlerConfig, Response,
};
use tracing::info;

use crate::context::InvocationContext;
use crate::response;
use crate::router::Router;

const INIT_PARAMS: &str = "constructor doesn't expect arguments";

/// Key-value handler
///
/// Holds only the immutable routing table, so one instance can serve any
/// number of concurrent invocations.
#[derive(Debug, Clone)]
pub struct KvChaincode {
    router: Router,
}

impl KvChaincode {
    pub fn new(config: &HandlerConfig) -> ChaincodeResult<Self> {
        config.validate()?;
        Ok(Self {
            router: Router::new(config),
        })
    }
}

impl Default for KvChaincode {
    fn default() -> Self {
        Self {
            router: Router::new(&HandlerConfig::default()),
        }
    }
}

impl Chaincode for KvChaincode {
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let ctx = InvocationContext::new(stub.tx_id(), "init");

        let count = stub.string_args().len();
        if count != 0 {
            return response::error(&ctx, &ChaincodeError::argument_count(0, count, INIT_PARAMS));
        }

        info!(parent: &ctx.span, "successfully initialized");
        response::success(Vec::new())
    }

    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let (function, args) = {
            let (function, params) = stub.function_and_parameters();
            (function.to_string(), params.to_vec())
        };
        let ctx = InvocationContext::new(stub.tx_id(), &function);

        let result = self.router.dispatch(&ctx, stub, &function, &args);
        response::encode(&ctx, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainkv_core::{InvocationRequest, MissingKeyPolicy};
    use chainkv_state::{MemoryStateStore, TransactionStub};

    #[test]
    fn test_init_without_arguments() {
        let store = MemoryStateStore::new();
        let mut stub = TransactionStub::new(InvocationRequest::from_args("tx0", vec![]), &store);

        let response = KvChaincode::default().init(&mut stub);
        assert!(response.is_success());
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_init_rejects_arguments() {
        let store = MemoryStateStore::new();
        let request = InvocationRequest::from_args("tx0", vec!["a".to_string(), "1".to_string()]);
        let mut stub = TransactionStub::new(request, &store);

        let response = KvChaincode::default().init(&mut stub);
        assert!(response.is_error());
        assert!(response.message.contains("Expecting 0"));
        assert!(response.message.contains("got 2"));
    }

    #[test]
    fn test_init_rejects_blank_argument() {
        let store = MemoryStateStore::new();
        let request = InvocationRequest::from_args("tx0", vec![String::new()]);
        let mut stub = TransactionStub::new(request, &store);

        let response = KvChaincode::default().init(&mut stub);
        assert!(response.is_error());
        assert!(response.message.contains("got 1"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = HandlerConfig {
            read_functions: vec!["x".to_string()],
            write_functions: vec!["x".to_string()],
            missing_key: MissingKeyPolicy::EmptyPayload,
        };
        assert!(matches!(KvChaincode::new(&config), Err(ChaincodeError::Config(_))));
    }

    #[test]
    fn test_chaincode_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KvChaincode>();
    }
}
