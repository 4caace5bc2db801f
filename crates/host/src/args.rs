//! Invocation arguments.

use serde_json::{Map, Value};

use crate::ToolError;

/// Arguments supplied by the caller for one invocation.
///
/// A thin wrapper over a JSON object. Validation against the tool's
/// descriptor happens in the dispatcher before the handler runs, so
/// handlers may read declared parameters without re-checking types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationArgs(Map<String, Value>);

impl InvocationArgs {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insertion, mainly for tests and in-process callers.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String accessor for declared string parameters.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for InvocationArgs {
    fn from(values: Map<String, Value>) -> Self {
        Self(values)
    }
}

impl TryFrom<Value> for InvocationArgs {
    type Error = ToolError;

    /// Accepts a JSON object or `null` (no arguments).
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(ToolError::InvalidArgument(format!(
                "arguments must be a JSON object, got {other}"
            ))),
        }
    }
}
