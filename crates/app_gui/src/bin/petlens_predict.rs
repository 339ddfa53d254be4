//! Headless companion: classify one image and print the sentence.

use anyhow::Result;
use clap::Parser;
use petlens_core::{ClientConfig, HttpClassifier, Language, ResultView, SelectedFile, Submission};
use std::path::PathBuf;
use std::process::ExitCode;

/// Classify an image with the PetLens service
#[derive(Parser, Debug)]
#[command(name = "petlens-predict")]
#[command(version = env!("PETLENS_VERSION"))]
#[command(about = "Classify one image and print the result sentence")]
struct Cli {
    /// Image file to upload
    image: PathBuf,

    /// Endpoint URL (overrides config file and PETLENS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Message language: pt or en
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Config file (default: the user's PetLens config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unsupported language: {code}"))
}

impl Cli {
    /// Config file, then environment, then flags.
    fn client_config(&self) -> ClientConfig {
        let path = self.config.clone().or_else(ClientConfig::default_path);
        let mut config = ClientConfig::resolve(path.as_deref());
        if let Some(endpoint) = &self.endpoint {
            config.endpoint_url = endpoint.clone();
        }
        config
    }

    fn language(&self, config: &ClientConfig) -> Language {
        self.lang.or(config.language).unwrap_or_else(|| {
            sys_locale::get_locale()
                .map(|tag| Language::from_locale(&tag))
                .unwrap_or_default()
        })
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = cli.client_config();
    let language = cli.language(&config);

    let classifier = HttpClassifier::new(&config)?;
    let file = SelectedFile::new(cli.image);
    let mut submission = Submission::new();
    let view = submission.run(&classifier, Some(&file));
    println!("{}", view.render(language).text());
    Ok(matches!(view, ResultView::Prediction(_)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::fs;

    #[test]
    fn parses_image_and_flags() {
        let cli = Cli::try_parse_from([
            "petlens-predict",
            "--lang",
            "en",
            "cat.jpg",
            "--endpoint=http://h/p/",
        ])
        .unwrap();
        assert_eq!(cli.image, PathBuf::from("cat.jpg"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://h/p/"));
        assert_eq!(cli.lang, Some(Language::English));
    }

    #[test]
    fn help_and_version_are_not_errors() {
        let help = Cli::try_parse_from(["petlens-predict", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        let version = Cli::try_parse_from(["petlens-predict", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["petlens-predict"]).is_err());
        assert!(Cli::try_parse_from(["petlens-predict", "a.jpg", "b.jpg"]).is_err());
        assert!(Cli::try_parse_from(["petlens-predict", "--verbose", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["petlens-predict", "--lang", "de", "a.jpg"]).is_err());
    }

    #[test]
    fn config_file_reaches_resolved_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "field_name = \"image\"\nlanguage = \"english\"\n").unwrap();
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["petlens-predict", "--config", path_arg, "cat.jpg"])
            .unwrap();
        let config = cli.client_config();
        assert_eq!(config.field_name, "image");
        assert_eq!(cli.language(&config), Language::English);

        let cli = Cli::try_parse_from([
            "petlens-predict",
            "-c",
            path_arg,
            "--lang",
            "pt",
            "--endpoint",
            "http://10.0.0.5:8000/predict/",
            "cat.jpg",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.endpoint_url, "http://10.0.0.5:8000/predict/");
        assert_eq!(cli.language(&config), Language::Portuguese);
    }
}
