//! Invocation routing

use chainkv_core::{
    ChaincodeError, ChaincodeResult, ChaincodeStub, HandlerConfig, MissingKeyPolicy,
};
use std::collections::HashMap;
use tracing::debug;

use crate::context::InvocationContext;
use crate::operations;

/// Operations a function name can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Immutable function-name table
///
/// Names match exactly and case-sensitively.
#[derive(Debug, Clone)]
pub struct Router {
    routes: HashMap<String, Operation>,
    missing_key: MissingKeyPolicy,
}

impl Router {
    /// Build the table from `config`. Call `HandlerConfig::validate` first;
    /// a name listed twice keeps its last mapping.
    pub fn new(config: &HandlerConfig) -> Self {
        let reads = config
            .read_functions
            .iter()
            .map(|name| (name.clone(), Operation::Read));
        let writes = config
            .write_functions
            .iter()
            .map(|name| (name.clone(), Operation::Write));

        Self {
            routes: reads.chain(writes).collect(),
            missing_key: config.missing_key,
        }
    }

    pub fn missing_key(&self) -> MissingKeyPolicy {
        self.missing_key
    }

    pub fn resolve(&self, function: &str) -> ChaincodeResult<Operation> {
        self.routes
            .get(function)
            .copied()
            .ok_or_else(|| ChaincodeError::UnknownFunction(function.to_string()))
    }

    /// Run the operation `function` names against `stub`.
    pub fn dispatch(
        &self,
        ctx: &InvocationContext,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        debug!(parent: &ctx.span, "try to call function '{}' with {} args", function, args.len());

        match self.resolve(function)? {
            Operation::Read => operations::read(ctx, stub, args, self.missing_key),
            Operation::Write => operations::write(ctx, stub, args),
        }
    }
}
