//! stcg CLI: compile a template file and run it against a data model.
//!
//! ```text
//! stcg [-d model.json] [-o out.c] template.stcg
//! ```
//!
//! The data model (JSON, or YAML for any other extension) becomes the run
//! data. Output goes to `--output` or stdout.

mod data;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use stcg::{Generator, Options};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stcg",
    about = "Scripted Template Content Generator",
    version
)]
struct Cli {
    /// Template file
    template: PathBuf,

    /// Data model file (JSON, or YAML for other extensions)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// YAML file with compile options; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Code begin block marker
    #[arg(long, alias = "code_begin")]
    code_begin: Option<String>,

    /// Code end block marker
    #[arg(long, alias = "code_end")]
    code_end: Option<String>,

    /// Output begin block marker
    #[arg(long, alias = "output_begin")]
    output_begin: Option<String>,

    /// Output end block marker
    #[arg(long, alias = "output_end")]
    output_end: Option<String>,

    /// Keep the text right after code blocks untouched
    #[arg(long)]
    no_trim: bool,

    /// Characters of context shown around syntax errors
    #[arg(long, value_name = "N")]
    debug_len: Option<usize>,

    /// Print the compiled program instead of running it
    #[arg(long)]
    emit_program: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => {
                let yaml = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Options::from_yaml(&yaml)?
            }
            None => Options::default(),
        };

        if let Some(marker) = &self.code_begin {
            options.code_begin = marker.clone();
        }
        if let Some(marker) = &self.code_end {
            options.code_end = marker.clone();
        }
        if let Some(marker) = &self.output_begin {
            options.output_begin = marker.clone();
        }
        if let Some(marker) = &self.output_end {
            options.output_end = marker.clone();
        }
        if self.no_trim {
            options.trim_after_code = false;
        }
        if let Some(len) = self.debug_len {
            options.debug_len = len;
        }

        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    let template = fs::read_to_string(&cli.template)
        .with_context(|| format!("failed to read template {}", cli.template.display()))?;

    let generator = Generator::compile(&template, &options)?;
    info!(
        template = %cli.template.display(),
        fragments = generator.program().fragments(),
        "compiled template"
    );

    let rendered = if cli.emit_program {
        generator.program().to_string()
    } else {
        let model = match &cli.data {
            Some(path) => data::load(path)?,
            None => serde_json::Map::new(),
        };
        generator.run(&model)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = rendered.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "stcg",
            "--code-begin",
            "<%",
            "--code-end",
            "%>",
            "--no-trim",
            "--debug-len",
            "3",
            "t.txt",
        ]);
        let options = cli.options().unwrap();
        assert_eq!(options.code_begin, "<%");
        assert_eq!(options.code_end, "%>");
        assert_eq!(options.output_begin, "[>");
        assert!(!options.trim_after_code);
        assert_eq!(options.debug_len, 3);
    }

    #[test]
    fn test_underscore_aliases() {
        let cli = Cli::parse_from(["stcg", "--output_begin", "{{", "--output_end", "}}", "t"]);
        let options = cli.options().unwrap();
        assert_eq!(options.output_begin, "{{");
        assert_eq!(options.output_end, "}}");
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("stcg.yaml");
        fs::write(&config, "code_begin: '<?'\ncode_end: '?>'\ndebug_len: 9\n").unwrap();

        let config = config.to_str().unwrap();
        let cli = Cli::parse_from(["stcg", "--config", config, "--debug-len", "2", "t"]);
        let options = cli.options().unwrap();
        assert_eq!(options.code_begin, "<?");
        assert_eq!(options.code_end, "?>");
        assert_eq!(options.debug_len, 2);
        assert!(options.trim_after_code);
    }
}
