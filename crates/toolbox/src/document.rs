//! Document reading tool.

use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;
use host::{
    InvocationArgs, InvocationContext, ParamKind, ParamSpec, ToolDescriptor, ToolError,
    ToolHandler,
};
use serde_json::Value;
use tracing::{debug, info};

/// Reads a named text document from a directory fixed at registration.
///
/// The base directory is an external collaborator wired in at startup;
/// the tool itself never consults configuration or the environment.
pub struct ReadDocumentTool {
    base_dir: PathBuf,
}

impl ReadDocumentTool {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "read_document",
            "Reads a text document by name and returns its content.",
        )
        .with_param(ParamSpec::required("name", ParamKind::String))
    }
}

#[async_trait]
impl ToolHandler for ReadDocumentTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let name = args.str("name").unwrap_or_default();

        // Bare file names only; the base directory is the boundary.
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(ToolError::InvalidArgument(format!(
                "document name '{name}' must be a bare file name"
            ))
            .into());
        }

        let path = self.base_dir.join(name);
        debug!(path = %path.display(), "reading document");

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read document '{name}'"))?;

        if content.trim().is_empty() {
            anyhow::bail!("document '{name}' is empty or contains only whitespace");
        }

        info!(name, bytes = content.len(), "document read");
        Ok(Value::String(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tokio_util::sync::CancellationToken;

    fn cx() -> InvocationContext {
        InvocationContext::new(CancellationToken::new())
    }

    #[tokio::test]
    async fn reads_an_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("job.txt")).unwrap();
        writeln!(file, "Senior deckhand, full time.").unwrap();

        let tool = ReadDocumentTool::new(dir.path());
        let args = InvocationArgs::new().set("name", "job.txt");
        let result = tool.call(args, &cx()).await.unwrap();
        assert!(result.as_str().unwrap().contains("Senior deckhand"));
    }

    #[tokio::test]
    async fn missing_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ReadDocumentTool::new(dir.path());

        let args = InvocationArgs::new().set("name", "absent.txt");
        let err = tool.call(args, &cx()).await.unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[tokio::test]
    async fn blank_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blank.txt"), "   \n\t").unwrap();

        let tool = ReadDocumentTool::new(dir.path());
        let args = InvocationArgs::new().set("name", "blank.txt");
        let err = tool.call(args, &cx()).await.unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn path_traversal_is_rejected_as_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ReadDocumentTool::new(dir.path());

        let args = InvocationArgs::new().set("name", "../etc/passwd");
        let err = tool.call(args, &cx()).await.unwrap_err();
        let tool_err = err.downcast::<ToolError>().unwrap();
        assert!(matches!(tool_err, ToolError::InvalidArgument(_)));
    }
}
