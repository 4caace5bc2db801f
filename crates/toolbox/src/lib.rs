//! Demonstration tool handlers for the invocation host.
//!
//! Each tool is a small deterministic body behind the host's
//! [`host::ToolHandler`] trait. The mailbox summarizer is the one
//! exception: it delegates the actual summary to the caller through a
//! sampling request and fails when the caller lacks that capability.
//! Input validation (required parameters, blank strings) happens once
//! in the dispatcher, not per tool.

mod datetime;
mod document;
mod echo;
mod mailbox;
mod orders;
mod weather;

pub use datetime::CurrentDateTimeTool;
pub use document::ReadDocumentTool;
pub use echo::{EchoTool, ReverseEchoTool};
pub use mailbox::SummarizeUnreadEmailsTool;
pub use orders::{ExecuteRefundTool, PlaceOrderTool};
pub use weather::WeatherTool;

use std::path::PathBuf;

use host::{Result, ToolRegistry};

/// Build a registry with every demonstration tool.
///
/// `documents_dir` is the directory `read_document` serves from.
pub fn default_registry(documents_dir: impl Into<PathBuf>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool::descriptor(), EchoTool)?;
    registry.register(ReverseEchoTool::descriptor(), ReverseEchoTool)?;
    registry.register(CurrentDateTimeTool::descriptor(), CurrentDateTimeTool)?;
    registry.register(WeatherTool::descriptor(), WeatherTool)?;
    registry.register(PlaceOrderTool::descriptor(), PlaceOrderTool)?;
    registry.register(ExecuteRefundTool::descriptor(), ExecuteRefundTool)?;
    registry.register(
        SummarizeUnreadEmailsTool::descriptor(),
        SummarizeUnreadEmailsTool,
    )?;
    registry.register(
        ReadDocumentTool::descriptor(),
        ReadDocumentTool::new(documents_dir),
    )?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use host::{Dispatcher, InvocationArgs, InvocationContext, ToolError};
    use serde_json::json;
    use tokio_util::sync::CancellationToken;

    fn dispatcher() -> Dispatcher {
        let dir = std::env::temp_dir();
        Dispatcher::new(default_registry(dir).unwrap())
    }

    fn cx() -> InvocationContext {
        InvocationContext::new(CancellationToken::new())
    }

    #[tokio::test]
    async fn weather_through_the_dispatcher() {
        let dispatcher = dispatcher();

        let args = InvocationArgs::new().set("city", "Boston");
        let result = dispatcher.invoke("get_weather_for_city", args, &cx()).await;
        assert_eq!(result.payload(), Some(&json!("61 and rainy")));

        let args = InvocationArgs::new().set("city", "Nowhere");
        let result = dispatcher.invoke("get_weather_for_city", args, &cx()).await;
        assert_eq!(result.payload(), Some(&json!("31 and snowing")));
    }

    #[tokio::test]
    async fn blank_city_is_rejected_before_the_handler() {
        let dispatcher = dispatcher();
        let args = InvocationArgs::new().set("city", "   ");
        let result = dispatcher.invoke("get_weather_for_city", args, &cx()).await;
        assert!(matches!(result.error(), Some(ToolError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn blank_item_name_is_rejected_for_orders_and_refunds() {
        let dispatcher = dispatcher();
        for tool in ["place_order", "execute_refund"] {
            let args = InvocationArgs::new().set("item_name", "");
            let result = dispatcher.invoke(tool, args, &cx()).await;
            assert!(matches!(result.error(), Some(ToolError::InvalidArgument(_))));
        }
    }

    #[tokio::test]
    async fn summarize_without_sampling_fails_capability() {
        let dispatcher = dispatcher();
        let result = dispatcher
            .invoke("summarize_unread_emails", InvocationArgs::new(), &cx())
            .await;
        assert!(matches!(
            result.error(),
            Some(ToolError::CapabilityUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn advertised_tools_keep_registration_order() {
        let dispatcher = dispatcher();
        let names: Vec<_> = dispatcher
            .list_tools()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            [
                "echo",
                "reverse_echo",
                "get_current_datetime_utc",
                "get_weather_for_city",
                "place_order",
                "execute_refund",
                "summarize_unread_emails",
                "read_document",
            ]
        );
    }
}
