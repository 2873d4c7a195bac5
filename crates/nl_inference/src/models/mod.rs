use std::str::FromStr;
use std::sync::Arc;

use nl_core::{Error, Result, SummaryGenerator};
use tracing::info;

use crate::{Config, DEFAULT_BASE_URL};

pub mod dummy;
pub mod openai;

pub use dummy::DummyGenerator;
pub use openai::OpenAiGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    OpenAi,
    Dummy,
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "dummy" | "offline" => Ok(Self::Dummy),
            other => Err(Error::Config(format!("Unknown generator: {}", other))),
        }
    }
}

pub fn create_generator(kind: GeneratorKind, config: Config) -> Result<Arc<dyn SummaryGenerator>> {
    let generator: Arc<dyn SummaryGenerator> = match kind {
        GeneratorKind::OpenAi => {
            // Compatible endpoints may serve requests without a key.
            if config.api_key.is_none() && config.base_url.trim_end_matches('/') == DEFAULT_BASE_URL {
                return Err(Error::Config(
                    "An API key is required for the OpenAI API".to_string(),
                ));
            }
            Arc::new(OpenAiGenerator::new(config)?)
        }
        GeneratorKind::Dummy => Arc::new(DummyGenerator::new()),
    };
    info!("🧠 Summary generator: {}", generator.name());
    Ok(generator)
}
