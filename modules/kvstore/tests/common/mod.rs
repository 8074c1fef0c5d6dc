//! Shared test harness: a minimal host that runs one invocation per
//! transaction against a store and commits successful write sets.

#![allow(dead_code)]

use chainkv_core::{
    Chaincode, ChaincodeStub, HandlerConfig, InvocationRequest, Response, StateError,
    StateMutator, StateResult,
};
use chainkv_kvstore::KvChaincode;
use chainkv_state::{MemoryStateStore, TransactionStub};

pub struct TestHost<S: StateMutator = MemoryStateStore> {
    pub chaincode: KvChaincode,
    pub store: S,
    next_tx: u64,
}

impl TestHost<MemoryStateStore> {
    pub fn new() -> Self {
        Self::with_config(HandlerConfig::default())
    }

    pub fn with_config(config: HandlerConfig) -> Self {
        Self::with_store(config, MemoryStateStore::new())
    }
}

impl<S: StateMutator> TestHost<S> {
    pub fn with_store(config: HandlerConfig, store: S) -> Self {
        Self {
            chaincode: KvChaincode::new(&config).expect("valid config"),
            store,
            next_tx: 0,
        }
    }

    /// Invoke `function` and commit the write set if the response is a success.
    pub fn invoke(&mut self, function: &str, args: &[&str]) -> Response {
        self.next_tx += 1;
        let request = InvocationRequest::new(
            format!("tx{}", self.next_tx),
            function,
            args.iter().map(|a| a.to_string()).collect(),
        );

        let mut stub = TransactionStub::new(request, &self.store);
        let response = self.chaincode.invoke(&mut stub);
        if response.is_success() {
            stub.commit().expect("commit");
        }
        response
    }
}

/// A stub whose every state access fails with a backend error
pub struct FaultyStub {
    pub request: InvocationRequest,
    pub message: String,
}

impl FaultyStub {
    pub fn new(function: &str, args: &[&str], message: &str) -> Self {
        Self {
            request: InvocationRequest::new(
                "tx-faulty",
                function,
                args.iter().map(|a| a.to_string()).collect(),
            ),
            message: message.to_string(),
        }
    }
}

impl ChaincodeStub for FaultyStub {
    fn tx_id(&self) -> &str {
        &self.request.tx_id
    }

    fn string_args(&self) -> &[String] {
        self.request.string_args()
    }

    fn function_and_parameters(&self) -> (&str, &[String]) {
        (self.request.function(), self.request.parameters())
    }

    fn get_state(&self, _key: &str) -> StateResult<Option<Vec<u8>>> {
        Err(StateError::Backend(self.message.clone()))
    }

    fn put_state(&mut self, _key: &str, _value: &[u8]) -> StateResult<()> {
        Err(StateError::Backend(self.message.clone()))
    }
}
