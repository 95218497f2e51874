use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use mathsight_scan::{Language, LineIndex, NotationFamily, ScanOptions, Token, scan};

#[derive(Parser)]
#[command(name = "mathsight")]
#[command(about = "Extract math formulas from documentation comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a tokenized source file and emit located formulas as JSON
    Scan {
        /// Source language of the file
        #[arg(long, value_enum)]
        language: CliLanguage,
        /// Path to the token dump (JSON array of tokens)
        #[arg(long, value_name = "FILE")]
        tokens: PathBuf,
        /// Notation families to scan for; defaults per language
        #[arg(long, value_enum)]
        notation: Vec<CliNotation>,
        /// Path to the source file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLanguage {
    C,
    Cpp,
    Python,
}

impl From<CliLanguage> for Language {
    fn from(value: CliLanguage) -> Self {
        match value {
            CliLanguage::C => Language::C,
            CliLanguage::Cpp => Language::Cpp,
            CliLanguage::Python => Language::Python,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliNotation {
    Doxygen,
    Markdown,
    Sphinx,
}

impl From<CliNotation> for NotationFamily {
    fn from(value: CliNotation) -> Self {
        match value {
            CliNotation::Doxygen => NotationFamily::Doxygen,
            CliNotation::Markdown => NotationFamily::Markdown,
            CliNotation::Sphinx => NotationFamily::Sphinx,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan {
            language,
            tokens,
            notation,
            path,
        } => {
            let source = fs::read_to_string(path)?;
            let dump = fs::read_to_string(tokens)?;
            let tokens: Vec<Token> = serde_json::from_str(&dump)?;

            let language = Language::from(*language);
            let options = if notation.is_empty() {
                ScanOptions::for_language(language)
            } else {
                ScanOptions {
                    notations: notation.iter().map(|n| NotationFamily::from(*n)).collect(),
                }
            };

            let index = LineIndex::new(&source);
            let formulas = scan(&tokens, language, &index, &options);
            println!("{}", serde_json::to_string_pretty(&formulas)?);
        }
    }
    Ok(())
}
