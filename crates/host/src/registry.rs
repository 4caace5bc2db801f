//! Tool registration and lookup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{InvocationArgs, InvocationContext, Result, ToolDescriptor, ToolError};

/// Trait implemented by every tool body.
///
/// Handlers receive arguments already validated against the tool's
/// descriptor, plus the per-invocation context. A failure the caller is
/// meant to see (capability missing, cancellation) is returned as a
/// typed [`ToolError`] inside the `anyhow` chain; anything else is
/// caught and sanitized at the dispatch boundary.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: InvocationArgs, cx: &InvocationContext) -> anyhow::Result<Value>;
}

/// Registered tools, keyed by name.
///
/// Registration is append-only and happens before serving begins; after
/// that the registry is shared read-only across concurrent invocations.
pub struct ToolRegistry {
    index: HashMap<String, usize>,
    entries: Vec<(ToolDescriptor, Arc<dyn ToolHandler>)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register a tool. Rejects duplicates, leaving the prior entry
    /// intact.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: impl ToolHandler + 'static,
    ) -> Result<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ToolError::DuplicateName(descriptor.name.clone()));
        }

        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push((descriptor, Arc::new(handler)));
        Ok(())
    }

    /// Resolve a tool by name.
    pub fn lookup(&self, name: &str) -> Option<(&ToolDescriptor, &Arc<dyn ToolHandler>)> {
        let idx = *self.index.get(name)?;
        let (descriptor, handler) = &self.entries[idx];
        Some((descriptor, handler))
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.entries.iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
