//! Documentation generation: prompt construction and the completion call
//! against the hosted LLM endpoint.
//!
//! The [`CompletionClient`] trait is the seam between prompt logic and
//! transport. [`GroqClient`] is the production implementation; tests use
//! the generated mock to run the full generation path without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::extract::FileContentMap;

/// Hard prefix cut applied to the context blob so the prompt stays inside
/// the provider's input budget. No chunking or summarization beyond this.
pub const MAX_CONTEXT_CHARS: usize = 60_000;

/// Fixed sampling temperature for every completion call.
pub const COMPLETION_TEMPERATURE: f32 = 0.5;

/// Fixed output token ceiling for every completion call.
pub const MAX_COMPLETION_TOKENS: u32 = 4096;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The kind of document to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Readme,
    ApiDocs,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Readme => "readme",
            DocKind::ApiDocs => "api_docs",
        }
    }

    /// Base name of the output file (`README` / `API_DOCS`), completed by
    /// the configured output extension.
    pub fn output_basename(&self) -> &'static str {
        match self {
            DocKind::Readme => "README",
            DocKind::ApiDocs => "API_DOCS",
        }
    }
}

impl From<&str> for DocKind {
    fn from(s: &str) -> Self {
        match s {
            "readme" | "Readme" | "README" => DocKind::Readme,
            "api_docs" | "api-docs" | "apidocs" => DocKind::ApiDocs,
            other => {
                warn!(kind = other, "Unknown document kind, defaulting to readme");
                DocKind::Readme
            }
        }
    }
}

const README_TEMPLATE: &str = r#"You are an expert technical writer.
Generate a comprehensive README.md for the following codebase.

CRITICAL INSTRUCTION:
1. The FIRST line MUST be the actual Project Name as a top-level header (# Project Name).
2. Do NOT use generic headings like "Project Title & Description".
3. You MUST include a "Usage Examples" section with actual code blocks.

Include sections for:
- Key Features
- Installation Instructions
- Usage Examples (MUST include code blocks)
- Project Structure (if apparent)

Codebase Context:
{context}

Output strictly valid Markdown.
"#;

const API_DOCS_TEMPLATE: &str = r#"You are an expert technical writer.
Generate detailed API Documentation or Developer Guide for the following codebase.
Focus on explaining the key modules, classes, and functions.

Codebase Context:
{context}

Output strictly valid Markdown.
"#;

/// Concatenates extracted file contents into the single context blob sent
/// to the model, each file framed with its relative path and a code fence.
pub fn build_context(files: &FileContentMap) -> String {
    let mut combined = String::new();
    for (path, content) in files {
        combined.push_str(&format!("\nFile: {path}\n```\n{content}\n```\n"));
    }
    combined
}

/// Prefix cut at a char boundary; shorter input passes through untouched.
pub fn truncate_context(context: &str) -> &str {
    match context.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((idx, _)) => &context[..idx],
        None => context,
    }
}

/// Selects the template for `kind` and embeds the (truncated) context.
pub fn render_prompt(kind: DocKind, context: &str) -> String {
    let template = match kind {
        DocKind::Readme => README_TEMPLATE,
        DocKind::ApiDocs => API_DOCS_TEMPLATE,
    };
    template.replace("{context}", truncate_context(context))
}

/// A single completion exchange with the hosted model.
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Transport seam for the text-completion endpoint.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one prompt and returns the generated text.
    async fn complete<'a>(
        &self,
        req: CompletionRequest<'a>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

/// Production client for the Groq OpenAI-compatible chat completions API.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete<'a>(
        &self,
        req: CompletionRequest<'a>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let body = ChatRequest {
            model: req.model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: req.prompt.to_string(),
            }],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            return Err(format!("completion API returned {status}: {detail}").into());
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or("completion response contained no choices")?;
        Ok(choice.message.content)
    }
}

/// Generates one document from the context blob.
///
/// Never fails: transport or API errors are converted into a human-readable
/// error string returned in place of the document, so the caller always has
/// something to display.
pub async fn generate(
    client: &dyn CompletionClient,
    context: &str,
    model: &str,
    kind: DocKind,
) -> String {
    info!(kind = kind.as_str(), model = model, "Requesting completion");
    let prompt = render_prompt(kind, context);
    let request = CompletionRequest {
        prompt: &prompt,
        model,
        temperature: COMPLETION_TEMPERATURE,
        max_tokens: MAX_COMPLETION_TOKENS,
    };

    match client.complete(request).await {
        Ok(text) => {
            info!(kind = kind.as_str(), size = text.len(), "Completion received");
            text
        }
        Err(e) => {
            error!(error = ?e, kind = kind.as_str(), "Completion call failed");
            format!("Error generating documentation: {e}")
        }
    }
}
