use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds an email newsletter from a list of article urls", long_about = None)]
pub struct Cli {
    /// JSON file with model id, prompts and limits. Defaults apply to missing keys.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Overrides the model id from the configuration
    #[arg(long, global = true)]
    pub model: Option<String>,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, summarize and render a newsletter
    Build(BuildArgs),
    /// Fetch every url and report which ones need manual content
    Fetch {
        urls_file: PathBuf,
    },
    /// Print the effective configuration
    Settings,
    /// List the models offered in settings
    Models,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// File with one article url per line
    pub urls_file: PathBuf,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = nl_inference::DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Use the local generator instead of the language model
    #[arg(long)]
    pub offline: bool,
    #[arg(long, value_enum, default_value_t = Format::Html)]
    pub format: Format,
    /// Article text for a url whose fetch failed, as URL=PATH (repeatable)
    #[arg(long = "content", value_parser = parse_content_arg)]
    pub contents: Vec<(String, PathBuf)>,
    /// Write the newsletter here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Html,
    Json,
    Text,
}

/// Splits `URL=PATH` on the last `=`, since query strings contain `=` too.
pub fn parse_content_arg(value: &str) -> Result<(String, PathBuf), String> {
    let (url, path) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected URL=PATH, got '{}'", value))?;
    let (url, path) = (url.trim(), path.trim());
    if url.is_empty() || path.is_empty() {
        return Err(format!("expected URL=PATH, got '{}'", value));
    }
    Ok((url.to_string(), PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_arg() {
        let (url, path) = parse_content_arg("https://a.example/x?id=3=/tmp/a.txt").unwrap();
        assert_eq!(url, "https://a.example/x?id=3");
        assert_eq!(path, PathBuf::from("/tmp/a.txt"));

        assert!(parse_content_arg("https://a.example/x").is_err());
        assert!(parse_content_arg("=/tmp/a.txt").is_err());
        assert!(parse_content_arg("https://a.example/x=").is_err());
    }

    #[test]
    fn test_build_args() {
        let cli = Cli::try_parse_from([
            "nl",
            "build",
            "urls.txt",
            "--offline",
            "--format",
            "json",
            "--content",
            "https://a.example/x=a.txt",
            "--content",
            "https://b.example/y=b.txt",
            "--model",
            "gpt-4",
        ])
        .unwrap();

        assert_eq!(cli.model.as_deref(), Some("gpt-4"));
        match cli.command {
            Commands::Build(args) => {
                assert!(args.offline);
                assert_eq!(args.format, Format::Json);
                assert_eq!(args.urls_file, PathBuf::from("urls.txt"));
                assert_eq!(args.contents.len(), 2);
                assert_eq!(args.contents[1].0, "https://b.example/y");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["nl", "build", "urls.txt", "--format", "pdf"]).is_err());
    }
}
