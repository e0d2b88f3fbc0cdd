use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use veridex_core::batch::run::BatchRunner;
use veridex_core::model::ModelEndpoint;
use veridex_core::model::gemini::{GeminiClient, GeminiConfig};
use veridex_core::model::offline::NoopModel;
use veridex_core::package::sidecar::SidecarReader;
use veridex_core::pipeline::{self, Pipeline};

mod args;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so verdict JSON on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = args::Args::parse();

    match args.command {
        args::Command::Analyze {
            artifact,
            format,
            out,
            api_key,
            offline,
        } => {
            let pipeline = build_pipeline(api_key, offline)?;
            let verdict = pipeline.analyze(&artifact).await?;

            let output = match format {
                args::OutputFormat::Json => serde_json::to_string_pretty(&verdict)?,
                args::OutputFormat::Text => pipeline::render_text(&verdict),
            };
            match out {
                Some(path) => std::fs::write(path, &output)?,
                None => print!("{output}"),
            }

            std::process::exit(verdict.tier.exit_code());
        }

        args::Command::Batch {
            dataset_root,
            output_dir,
            api_key,
            offline,
        } => {
            let runner = BatchRunner::new(build_pipeline(api_key, offline)?);
            let summary = runner.run(&dataset_root, &output_dir).await?;
            println!("{summary}");
        }
    }

    Ok(())
}

fn build_pipeline(api_key: Option<String>, offline: bool) -> Result<Pipeline> {
    let model: Arc<dyn ModelEndpoint> = if offline {
        Arc::new(NoopModel)
    } else {
        let api_key = api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!(
                "no model API key configured; model calls will fail soft \
                 (pass --offline to run rule-only on purpose)"
            );
        }
        Arc::new(GeminiClient::new(GeminiConfig {
            api_key,
            ..Default::default()
        })?)
    };

    Ok(Pipeline::new(Arc::new(SidecarReader), model))
}
