//! CLI definition, tracing setup, and the bundle command.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use scriptbundle_core::{BundleOutcome, BundleReport, ProgressReporter, run_bundle};
use scriptbundle_shared::{BundleConfig, ConfigOverrides, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// scriptbundle: merge every script of a project into one versioned file.
///
/// With no arguments, bundles `Assets/**/*.cs` into
/// `AllScripts_CS/AllScripts<NNNN>.txt`.
#[derive(Parser)]
#[command(
    name = "scriptbundle",
    version,
    about = "Merge every script under a project folder into one versioned text file.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to ./scriptbundle.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory searched recursively for scripts [default: Assets].
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory receiving the versioned bundles [default: AllScripts_CS].
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Bundle filename prefix [default: AllScripts].
    #[arg(long)]
    pub base_name: Option<String>,

    /// Extension of the files to bundle, e.g. `cs`, `.cs` or `*.cs` [default: .cs].
    #[arg(long)]
    pub ext: Option<String>,

    /// Also collect dot-files and descend into dot-directories.
    #[arg(long)]
    pub include_hidden: bool,

    /// Exit immediately instead of waiting for Enter.
    #[arg(long)]
    pub no_pause: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_dir: self.root.clone(),
            output_dir: self.out.clone(),
            base_name: self.base_name.clone(),
            extension: self.ext.clone(),
            include_hidden: self.include_hidden.then_some(true),
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scriptbundle=warn",
        1 => "scriptbundle=info",
        2 => "scriptbundle=debug",
        _ => "scriptbundle=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the bundle command, then wait for acknowledgment on every outcome.
///
/// A fatal error is reported once, on stdout, and turns into a failing exit
/// status.
pub(crate) fn run(cli: Cli) -> ExitCode {
    let status = match cmd_bundle(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!();
            println!("❌ Falha ao gerar o arquivo unificado: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    };

    if !cli.no_pause {
        pause_for_acknowledgment();
    }

    status
}

/// Every cause of `report`, outermost first, joined with `: `.
fn error_chain(report: &Report) -> String {
    report
        .chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

fn resolve_config(cli: &Cli) -> Result<BundleConfig> {
    let cwd = std::env::current_dir().wrap_err("cannot determine working directory")?;
    let config = load_config(cli.config.as_deref(), &cwd)?.with_overrides(cli.overrides());
    Ok(config)
}

fn cmd_bundle(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    info!(
        root = %config.root_dir.display(),
        output = %config.output_dir.display(),
        base_name = %config.base_name,
        extension = %config.extension,
        "bundling scripts"
    );

    let reporter = CliProgress::new();
    let outcome = run_bundle(&config, &reporter);
    reporter.finish();

    match outcome? {
        BundleOutcome::NoFilesFound { root, extension } => {
            println!(
                "Nenhum arquivo {extension} encontrado dentro da pasta '{}'.",
                root.display()
            );
            println!("Certifique-se de que este script está na pasta raiz do seu projeto Unity.");
        }
        BundleOutcome::Written(report) => print_summary(&report, &config),
    }

    Ok(())
}

fn print_summary(report: &BundleReport, config: &BundleConfig) {
    println!(
        "✅ Processo concluído! Os arquivos {} foram unificados em '{}'.",
        config.normalized_extension(),
        report.output_path.display()
    );
    println!();
    println!("  Versão:       {}", report.version);
    println!("  Arquivos:     {}", report.file_count);
    if report.latin1_fallbacks > 0 {
        println!("  Latin-1:      {}", report.latin1_fallbacks);
    }
    if report.placeholders > 0 {
        println!("  Com erro:     {}", report.placeholders);
    }
    println!("  Tamanho:      {} bytes", report.bytes_written);
    println!("  Tempo:        {:.2}s", report.elapsed.as_secs_f64());
    println!();
}

/// Block until Enter is pressed. Skipped when stdin is not a terminal.
fn pause_for_acknowledgment() {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return;
    }

    print!("Pressione Enter para sair...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Writing [{current}/{total}] {name}"));
    }

    fn done(&self, _report: &BundleReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() {
        let cli = Cli::try_parse_from(["scriptbundle"]).unwrap();
        let config = BundleConfig::default().with_overrides(cli.overrides());
        assert_eq!(config, BundleConfig::default());
        assert!(!cli.no_pause);
    }

    #[test]
    fn flags_override_fields_independently() {
        let cli = Cli::try_parse_from([
            "scriptbundle",
            "--root",
            "Game",
            "--ext",
            "*.shader",
            "--include-hidden",
            "--no-pause",
        ])
        .unwrap();
        let config = BundleConfig::default().with_overrides(cli.overrides());
        assert_eq!(config.root_dir, PathBuf::from("Game"));
        assert_eq!(config.normalized_extension(), ".shader");
        assert!(config.include_hidden);
        assert_eq!(config.output_dir, PathBuf::from("AllScripts_CS"));
        assert_eq!(config.base_name, "AllScripts");
        assert!(cli.no_pause);
    }

    #[test]
    fn error_chain_lists_every_cause() {
        let report = Report::new(io::Error::other("disk gone")).wrap_err("cannot write bundle");
        assert_eq!(error_chain(&report), "cannot write bundle: disk gone");
    }

    #[test]
    fn absent_hidden_flag_keeps_config_value() {
        let cli = Cli::try_parse_from(["scriptbundle"]).unwrap();
        let base = BundleConfig {
            include_hidden: true,
            ..BundleConfig::default()
        };
        assert!(base.with_overrides(cli.overrides()).include_hidden);
    }
}
