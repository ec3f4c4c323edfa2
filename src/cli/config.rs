// CLI arguments
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tagtext - extract text and metadata from ID3-tagged MP3 files
#[derive(Parser, Debug)]
#[command(name = "tagtext")]
#[command(about = "Extract searchable text and metadata from ID3-tagged MP3 files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Parser extension to use, overriding the configuration
    #[arg(long, value_name = "NAME", global = true)]
    pub parser: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for parse results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse MP3 file(s) into document records
    Parse {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Pre-existing metadata as KEY=VALUE (repeatable)
        #[arg(short, long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse every file in a directory matching a pattern
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.mp3")
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,
    },

    /// Report which ID3 tag a file carries
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// List registered extensions
    Extensions,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("Content-Type=audio/mpeg"),
            Ok(("Content-Type".to_string(), "audio/mpeg".to_string()))
        );
        assert_eq!(parse_key_value("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_cli_parses_parse_command() {
        let cli = Cli::try_parse_from([
            "tagtext", "--format", "json", "parse", "a.mp3", "b.mp3", "-m", "k=v",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Parse { files, meta, output } => {
                assert_eq!(files, vec!["a.mp3", "b.mp3"]);
                assert_eq!(meta, vec![("k".to_string(), "v".to_string())]);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
