//! Coordinating module for the acquire-generate-write pipeline.

use std::path::PathBuf;

use tracing::{error, info};

use crate::config::RunConfig;
use crate::download;
use crate::generate::{self, build_context, CompletionClient, DocKind};
use crate::history::{DocumentationResult, HistoryLog};

/// Uniform user-facing message for every acquisition failure mode. Callers
/// cannot tell "repository had no usable files" from "acquisition failed";
/// the logs keep the distinction.
pub const ACQUISITION_FAILED_MSG: &str =
    "Failed to process repository. Please check the URL or try again.";

/// Outcome of one pipeline run, mirrored back to the caller.
#[derive(Debug)]
pub struct DocReport {
    pub repo_url: String,
    pub documents: Vec<DocumentReport>,
}

#[derive(Debug)]
pub struct DocumentReport {
    pub kind: DocKind,
    pub filename: String,
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub bytes: usize,
}

/// Entrypoint: acquire the repository, build the context blob, generate
/// each configured document sequentially, write the outputs, and record
/// the run in the session history.
pub async fn generate_docs(
    config: &RunConfig,
    client: &dyn CompletionClient,
    repo_url: &str,
    history: &mut HistoryLog,
) -> Result<DocReport, String> {
    info!(repo_url = repo_url, "[DOCGEN] Starting documentation pipeline");

    let files = download::acquire(repo_url).await;
    if files.is_empty() {
        error!(repo_url = repo_url, "[DOCGEN][ERROR] Repository yielded no usable files");
        return Err(ACQUISITION_FAILED_MSG.to_string());
    }
    info!(files = files.len(), "[DOCGEN] Repository content acquired");

    let context = build_context(&files);
    info!(context_len = context.len(), "[DOCGEN] Context blob built");

    if let Err(e) = std::fs::create_dir_all(&config.output.dir) {
        error!(error = ?e, dir = %config.output.dir.display(), "[DOCGEN][ERROR] Failed to create output directory");
        return Err(format!(
            "Failed to create output directory {}: {e}",
            config.output.dir.display()
        ));
    }

    let mut readme = String::new();
    let mut api_docs = String::new();
    let mut documents = Vec::new();

    // One document after another; no parallel fan-out across kinds.
    for kind in &config.generate.kinds {
        let text = generate::generate(client, &context, &config.generate.model, *kind).await;

        let filename = format!(
            "{}.{}",
            kind.output_basename(),
            config.output.format.extension()
        );
        let path = config.output.dir.join(&filename);
        if let Err(e) = std::fs::write(&path, &text) {
            error!(error = ?e, path = %path.display(), "[DOCGEN][ERROR] Failed to write document");
            return Err(format!("Failed to write {}: {e}", path.display()));
        }
        info!(file = %filename, bytes = text.len(), "[DOCGEN] Wrote document");

        documents.push(DocumentReport {
            kind: *kind,
            filename,
            path,
            mime_type: config.output.format.mime_type(),
            bytes: text.len(),
        });
        match kind {
            DocKind::Readme => readme = text,
            DocKind::ApiDocs => api_docs = text,
        }
    }

    history.record(DocumentationResult {
        url: repo_url.to_string(),
        readme,
        api_docs,
    });
    info!(history_len = history.len(), "[DOCGEN] Session history updated");

    Ok(DocReport {
        repo_url: repo_url.to_string(),
        documents,
    })
}
