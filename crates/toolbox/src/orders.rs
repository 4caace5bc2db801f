//! Order processing tools.
//!
//! Deterministic success stubs; a real implementation would talk to an
//! external order system behind the same descriptors.

use async_trait::async_trait;
use host::{InvocationArgs, InvocationContext, ParamKind, ParamSpec, ToolDescriptor, ToolHandler};
use serde_json::Value;
use tracing::info;

/// Places an order for the specified item.
pub struct PlaceOrderTool;

impl PlaceOrderTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("place_order", "Places an order for the specified item.")
            .with_param(ParamSpec::required("item_name", ParamKind::String))
    }
}

#[async_trait]
impl ToolHandler for PlaceOrderTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let item_name = args.str("item_name").unwrap_or_default();
        info!(item_name, "processing order");

        info!(item_name, "order placed");
        Ok(Value::String("success".to_string()))
    }
}

/// Executes a refund for the specified item.
pub struct ExecuteRefundTool;

impl ExecuteRefundTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("execute_refund", "Executes a refund for the specified item.")
            .with_param(ParamSpec::required("item_name", ParamKind::String))
    }
}

#[async_trait]
impl ToolHandler for ExecuteRefundTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let item_name = args.str("item_name").unwrap_or_default();
        info!(item_name, "processing refund");

        info!(item_name, "refund executed");
        Ok(Value::String("success".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn order_and_refund_report_success() {
        let cx = InvocationContext::new(CancellationToken::new());
        let args = InvocationArgs::new().set("item_name", "Pro Tennis Racket");

        let placed = PlaceOrderTool.call(args.clone(), &cx).await.unwrap();
        assert_eq!(placed, Value::String("success".to_string()));

        let refunded = ExecuteRefundTool.call(args, &cx).await.unwrap();
        assert_eq!(refunded, Value::String("success".to_string()));
    }
}
