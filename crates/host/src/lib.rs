//! Tool-invocation host core.
//!
//! This crate implements the host side of a model-tool calling setup: a
//! fixed set of named, typed operations is advertised to an external
//! caller, invocation requests are dispatched to the matching handler,
//! and every outcome is normalized into a result/error envelope.
//!
//! # Overview
//!
//! - **ToolDescriptor**: static metadata (name, description, parameter
//!   schema) for one operation.
//! - **ToolRegistry**: name → (descriptor, handler); populated once at
//!   startup, read-only while serving.
//! - **InvocationContext**: per-call state carrying the cancellation
//!   signal and, when the caller advertised support, a sampling channel
//!   for reverse requests back to the caller.
//! - **Dispatcher**: resolves a (name, arguments) pair, validates the
//!   arguments, runs the handler, and converts any failure into a
//!   caller-safe [`ToolError`].
//!
//! # Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use host::{
//!     Dispatcher, InvocationArgs, InvocationContext, ParamKind, ParamSpec, ToolDescriptor,
//!     ToolHandler, ToolRegistry,
//! };
//! use serde_json::Value;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ToolHandler for Echo {
//!     async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
//!         let message = args.str("message").unwrap_or_default();
//!         Ok(Value::String(format!("Echo: {message}")))
//!     }
//! }
//!
//! # async fn example() -> host::Result<()> {
//! let mut registry = ToolRegistry::new();
//! registry.register(
//!     ToolDescriptor::new("echo", "Echoes the message back to the caller.")
//!         .with_param(ParamSpec::required("message", ParamKind::String)),
//!     Echo,
//! )?;
//!
//! let dispatcher = Dispatcher::new(registry);
//! let cx = InvocationContext::new(CancellationToken::new());
//! let args = InvocationArgs::new().set("message", "hello");
//! let result = dispatcher.invoke("echo", args, &cx).await;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

mod args;
mod context;
mod descriptor;
mod dispatcher;
mod error;
mod registry;
pub mod sampling;

pub use args::InvocationArgs;
pub use context::{CallbackChannel, InvocationContext, SamplingEnvelope};
pub use descriptor::{ParamKind, ParamSpec, ToolDescriptor};
pub use dispatcher::{Dispatcher, InvocationResult};
pub use error::{Result, ToolError};
pub use registry::{ToolHandler, ToolRegistry};
pub use sampling::{Content, SamplingMessage, SamplingRequest, SamplingResponse};
