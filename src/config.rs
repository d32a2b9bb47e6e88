use std::path::PathBuf;

use tracing::{debug, info};

use crate::generate::DocKind;

/// Model identifiers the hosted provider is known to serve.
pub const SUPPORTED_MODELS: &[&str] = &["llama-3.3-70b-versatile", "llama-3.1-8b-instant"];

/// Fully resolved runtime configuration: static file settings merged with
/// environment secrets.
#[derive(Debug)]
pub struct RunConfig {
    pub generate: GenerateSettings,
    pub output: OutputConfig,
    /// Provider API key, if one was found in the environment. The CLI
    /// falls back to an interactive prompt when this is absent.
    pub api_key: Option<String>,
}

impl RunConfig {
    pub fn trace_loaded(&self) {
        info!(
            model = %self.generate.model,
            kinds = self.generate.kinds.len(),
            output_dir = %self.output.dir.display(),
            format = self.output.format.extension(),
            api_key_present = self.api_key.is_some(),
            "Loaded RunConfig"
        );
        debug!(generate = ?self.generate, output = ?self.output, "Config loaded (full debug)");
    }
}

#[derive(Debug)]
pub struct GenerateSettings {
    pub model: String,
    pub kinds: Vec<DocKind>,
}

#[derive(Debug)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
}

/// Download format for the generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Markdown
    }
}
