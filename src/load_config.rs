use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::{GenerateSettings, OutputConfig, OutputFormat, RunConfig, SUPPORTED_MODELS};
use crate::generate::DocKind;

#[derive(Deserialize)]
struct StaticConfig {
    generate: GenerateSection,
    output: OutputSection,
}

#[derive(Deserialize)]
struct GenerateSection {
    model: String,
    #[serde(default)]
    kinds: Vec<String>,
}

#[derive(Deserialize)]
struct OutputSection {
    dir: std::path::PathBuf,
    #[serde(default)]
    format: Option<String>,
}

/// Loads the static YAML config file (no secrets) and merges the provider
/// API key from the environment. The key stays optional here so callers
/// can still prompt interactively before failing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let model = static_conf.generate.model;
    if !SUPPORTED_MODELS.contains(&model.as_str()) {
        error!(model = %model, "Unsupported generate.model in config");
        anyhow::bail!(
            "Unsupported generate.model: {} (supported: {})",
            model,
            SUPPORTED_MODELS.join(", ")
        );
    }

    // An empty kinds list means "generate everything we know how to".
    let kinds: Vec<DocKind> = if static_conf.generate.kinds.is_empty() {
        vec![DocKind::Readme, DocKind::ApiDocs]
    } else {
        static_conf
            .generate
            .kinds
            .iter()
            .map(|k| DocKind::from(k.as_str()))
            .collect()
    };

    let format = match static_conf.output.format.as_deref() {
        None => OutputFormat::default(),
        Some("md") | Some("markdown") => OutputFormat::Markdown,
        Some("txt") | Some("text") => OutputFormat::Text,
        Some(other) => {
            error!(format = %other, "Unsupported output.format in config");
            anyhow::bail!("Unsupported output.format: {} (expected md or txt)", other);
        }
    };

    let api_key = match std::env::var("GROQ_API_KEY") {
        Ok(key) if !key.is_empty() => {
            info!("GROQ_API_KEY found in env");
            Some(key)
        }
        _ => None,
    };

    let config = RunConfig {
        generate: GenerateSettings {
            model,
            kinds,
        },
        output: OutputConfig {
            dir: static_conf.output.dir,
            format,
        },
        api_key,
    };

    config.trace_loaded();
    Ok(config)
}
