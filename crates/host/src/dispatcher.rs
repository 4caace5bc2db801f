//! Invocation dispatch.
//!
//! The dispatcher is the single boundary between the transport layer
//! and tool handlers: it resolves names against the registry, validates
//! arguments against the descriptor, and converts every handler outcome
//! into an [`InvocationResult`] envelope. No raw handler failure detail
//! crosses this boundary; the full error chain goes to the log only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    InvocationArgs, InvocationContext, ParamKind, ToolDescriptor, ToolError, ToolRegistry,
};

/// Terminal outcome of one invocation, produced exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationResult {
    Success { payload: Value },
    Failure { error: ToolError },
}

impl InvocationResult {
    pub fn success(payload: Value) -> Self {
        InvocationResult::Success { payload }
    }

    pub fn failure(error: ToolError) -> Self {
        InvocationResult::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            InvocationResult::Success { payload } => Some(payload),
            InvocationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            InvocationResult::Success { .. } => None,
            InvocationResult::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ToolError> {
        match self {
            InvocationResult::Success { payload } => Ok(payload),
            InvocationResult::Failure { error } => Err(error),
        }
    }
}

/// Resolves and runs tool invocations against a fixed registry.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// The registry is frozen once handed to the dispatcher; all
    /// further access is read-only and safe to share across tasks.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Descriptors in registration order, for capability advertisement.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.list()
    }

    /// Run one invocation to completion.
    ///
    /// Validation failures are returned without calling the handler.
    /// Cancellation is observed at handler entry; handlers observe it
    /// again at their suspension points.
    pub async fn invoke(
        &self,
        name: &str,
        args: InvocationArgs,
        cx: &InvocationContext,
    ) -> InvocationResult {
        let Some((descriptor, handler)) = self.registry.lookup(name) else {
            warn!(tool = name, "invocation of unknown tool");
            return InvocationResult::failure(ToolError::NotFound(name.to_string()));
        };

        if let Err(err) = validate_args(descriptor, &args) {
            warn!(tool = name, %err, "rejected invocation arguments");
            return InvocationResult::failure(err);
        }

        if cx.is_cancelled() {
            return InvocationResult::failure(ToolError::Cancelled);
        }

        debug!(tool = name, correlation_id = %cx.correlation_id(), "dispatching invocation");

        match handler.call(args, cx).await {
            Ok(payload) => InvocationResult::success(payload),
            Err(err) => InvocationResult::failure(sanitize(name, err)),
        }
    }
}

/// Convert a handler failure into a caller-safe error.
///
/// Typed [`ToolError`]s a handler returns deliberately pass through
/// unchanged; anything else is logged in full and surfaced as a short
/// `HandlerFailure` message.
fn sanitize(name: &str, err: anyhow::Error) -> ToolError {
    match err.downcast::<ToolError>() {
        Ok(tool_err) => tool_err,
        Err(other) => {
            error!(tool = name, error = ?other, "handler failed");
            ToolError::HandlerFailure(format!("tool '{name}' failed"))
        }
    }
}

/// Check `args` against the descriptor before the handler runs.
///
/// Required parameters must be present and type-correct; a required
/// string that is empty or whitespace-only counts as invalid, not
/// merely absent. No partial binding: the first mismatch wins.
/// Undeclared extra arguments are tolerated.
fn validate_args(descriptor: &ToolDescriptor, args: &InvocationArgs) -> Result<(), ToolError> {
    for param in &descriptor.params {
        let Some(value) = args.get(&param.name) else {
            if param.required {
                return Err(ToolError::InvalidArgument(format!(
                    "missing required argument '{}'",
                    param.name
                )));
            }
            continue;
        };

        if !param.kind.matches(value) {
            return Err(ToolError::InvalidArgument(format!(
                "argument '{}' must be of type {}",
                param.name,
                param.kind.type_name()
            )));
        }

        if param.required
            && param.kind == ParamKind::String
            && value.as_str().is_some_and(|s| s.trim().is_empty())
        {
            return Err(ToolError::InvalidArgument(format!(
                "argument '{}' must not be blank",
                param.name
            )));
        }
    }

    Ok(())
}
