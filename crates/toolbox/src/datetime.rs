//! Date/time tool.

use async_trait::async_trait;
use chrono::Utc;
use host::{InvocationArgs, InvocationContext, ToolDescriptor, ToolHandler};
use serde_json::Value;
use tracing::debug;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Retrieves the current date time in UTC. Takes no input.
pub struct CurrentDateTimeTool;

impl CurrentDateTimeTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "get_current_datetime_utc",
            "Retrieves the current date time in UTC.",
        )
    }
}

#[async_trait]
impl ToolHandler for CurrentDateTimeTool {
    async fn call(&self, _args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let now = Utc::now().format(DATETIME_FORMAT).to_string();
        debug!(%now, "current UTC date time retrieved");
        Ok(Value::String(now))
    }
}
