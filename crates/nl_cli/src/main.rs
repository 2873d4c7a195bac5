use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nl_core::config::KNOWN_MODELS;
use nl_core::{ContentFetcher, NewsletterConfig, SummaryGenerator};
use nl_fetch::HttpFetcher;
use nl_inference::{create_generator, DummyGenerator, GeneratorKind};
use nl_pipeline::{BatchReport, Pipeline};
use nl_render::{EmailHtmlRenderer, JsonRenderer, Renderer, TextRenderer};
use tracing::{info, warn};

mod args;
mod logging;

use args::{BuildArgs, Cli, Commands, Format};
use logging::init_logging;

fn load_config(cli: &Cli) -> anyhow::Result<NewsletterConfig> {
    let config = match &cli.config {
        Some(path) => NewsletterConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => NewsletterConfig::default(),
    };
    let config = match &cli.model {
        Some(model) => config.with_model(model.as_str()),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

async fn read_to_string(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn log_failures(report: &BatchReport) {
    for (_, error) in report.failures() {
        warn!("⚠️ {}", error);
    }
}

async fn fetch(config: NewsletterConfig, urls_file: &Path) -> anyhow::Result<()> {
    let urls = read_to_string(urls_file).await?;
    let fetcher: Arc<dyn ContentFetcher> = Arc::new(HttpFetcher::with_defaults()?);
    let generator: Arc<dyn SummaryGenerator> = Arc::new(DummyGenerator::new());
    let mut pipeline = Pipeline::new(fetcher, generator, config)?;

    let report = pipeline.intake(&urls).await;
    for item in pipeline.snapshot() {
        match item.content.as_deref() {
            Some(content) => println!("ok\t{}\t{} chars", item.url, content.chars().count()),
            None => println!("missing\t{}", item.url),
        }
    }
    log_failures(&report);
    Ok(())
}

async fn build(config: NewsletterConfig, args: BuildArgs) -> anyhow::Result<()> {
    let urls = read_to_string(&args.urls_file).await?;

    let kind = if args.offline { GeneratorKind::Dummy } else { GeneratorKind::OpenAi };
    let generator = create_generator(
        kind,
        nl_inference::Config {
            api_key: args.api_key.clone(),
            base_url: args.base_url.clone(),
            timeout_secs: config.request_timeout_secs,
        },
    )?;
    let fetcher: Arc<dyn ContentFetcher> = Arc::new(HttpFetcher::with_defaults()?);
    let mut pipeline = Pipeline::new(fetcher, generator, config)?;

    let report = pipeline.intake(&urls).await;
    log_failures(&report);

    for (url, path) in &args.contents {
        let text = read_to_string(path).await?;
        pipeline.set_content(url, &text)?;
        info!("📝 Manual content for {} from {}", url, path.display());
    }

    let report = pipeline.summarize_all().await;
    log_failures(&report);

    // IncompleteItems names every url that still blocks the newsletter
    let payload = pipeline.assemble()?;

    let renderer: Box<dyn Renderer> = match args.format {
        Format::Html => Box::new(EmailHtmlRenderer::new()),
        Format::Json => Box::new(JsonRenderer),
        Format::Text => Box::new(TextRenderer),
    };
    let document = renderer.render(&payload)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, document)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("💌 Newsletter written to {}", path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Build(args) => build(config, args).await?,
        Commands::Fetch { urls_file } => fetch(config, &urls_file).await?,
        Commands::Settings => println!("{}", serde_json::to_string_pretty(&config)?),
        Commands::Models => {
            for model in KNOWN_MODELS {
                let marker = if *model == config.model_id { "*" } else { " " };
                println!("{} {}", marker, model);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_applies_model_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model_id": "gpt-4", "content_truncation_limit": 1000}}"#).unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["nl", "settings", "--config", path.as_str()]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.model_id, "gpt-4");
        assert_eq!(config.content_truncation_limit, 1000);

        let cli = Cli::try_parse_from(["nl", "settings", "--config", path.as_str(), "--model", "gpt-4-turbo-preview"]).unwrap();
        assert_eq!(load_config(&cli).unwrap().model_id, "gpt-4-turbo-preview");
    }

    #[test]
    fn test_load_config_rejects_empty_model() {
        let cli = Cli::try_parse_from(["nl", "models", "--model", ""]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
