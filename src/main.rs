//! quickcalc: a calculator that lives in your launcher.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickcalc::services::calculator;
use quickcalc::{App, CalcError, Config, HistoryStore, Platform};

#[derive(Parser)]
#[command(name = "quickcalc")]
#[command(about = "Quick calculator for rofi and other dmenu-style launchers", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/quickcalc/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// History file (overrides the config)
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Chooser program (overrides the config)
    #[arg(long, value_name = "PROGRAM")]
    chooser: Option<String>,

    /// Evaluate one expression, print the result and exit
    #[arg(long, short = 'e', value_name = "EXPR")]
    eval: Option<String>,

    /// Empty the history file and exit
    #[arg(long)]
    clear_history: bool,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// List the functions and constants expressions may use
    #[arg(long)]
    functions: bool,

    /// Log debug output to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "quickcalc=debug"
    } else {
        "quickcalc=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.functions {
        println!("constants: pi, e, tau");
        println!("functions: {}", calculator::functions::FUNCTIONS.join(", "));
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(expr) = cli.eval {
        return Ok(match calculator::calculate(&expr) {
            Some(result) => {
                println!("{}", result);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Invalid expression: {}", expr);
                ExitCode::FAILURE
            }
        });
    }

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path);
    if let Some(history) = cli.history {
        config.history.path = Some(history);
    }
    if let Some(chooser) = cli.chooser {
        config.chooser.program = chooser;
    }

    if cli.write_config {
        config
            .save_to(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("Wrote {}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let history_path = config.history.resolved_path();
    let mut history = HistoryStore::load(&history_path, config.history.capacity);

    if cli.clear_history {
        history.clear();
        history
            .save()
            .with_context(|| format!("clearing {}", history_path.display()))?;
        return Ok(ExitCode::SUCCESS);
    }

    let platform = Platform::from_config(&config);
    let mut app = App::new(&config, history, platform);

    if !app.chooser_available() {
        return Err(CalcError::ChooserMissing(config.chooser.program.clone()))
            .context("install it or set [chooser] program in the config");
    }

    tracing::debug!(
        chooser = %config.chooser.program,
        history = %history_path.display(),
        "starting"
    );
    app.run()?;
    Ok(ExitCode::SUCCESS)
}
