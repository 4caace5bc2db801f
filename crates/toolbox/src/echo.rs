//! Echo tools.

use async_trait::async_trait;
use host::{InvocationArgs, InvocationContext, ParamKind, ParamSpec, ToolDescriptor, ToolHandler};
use serde_json::Value;

/// Echoes the message back to the caller.
pub struct EchoTool;

impl EchoTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("echo", "Echoes the message back to the caller.")
            .with_param(ParamSpec::required("message", ParamKind::String))
    }
}

#[async_trait]
impl ToolHandler for EchoTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let message = args.str("message").unwrap_or_default();
        Ok(Value::String(format!("Echo: {message}")))
    }
}

/// Echoes the message with its characters reversed.
pub struct ReverseEchoTool;

impl ReverseEchoTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("reverse_echo", "Echoes the message sent, in reverse.")
            .with_param(ParamSpec::required("message", ParamKind::String))
    }
}

#[async_trait]
impl ToolHandler for ReverseEchoTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let message = args.str("message").unwrap_or_default();
        Ok(Value::String(message.chars().rev().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    fn cx() -> InvocationContext {
        InvocationContext::new(CancellationToken::new())
    }

    #[tokio::test]
    async fn echo_prefixes_the_message() {
        let args = InvocationArgs::new().set("message", "hello");
        let result = EchoTool.call(args, &cx()).await.unwrap();
        assert_eq!(result, Value::String("Echo: hello".to_string()));
    }

    #[tokio::test]
    async fn reverse_echo_reverses_characters() {
        let args = InvocationArgs::new().set("message", "stressed");
        let result = ReverseEchoTool.call(args, &cx()).await.unwrap();
        assert_eq!(result, Value::String("desserts".to_string()));
    }
}
