use clap::Parser;
use pick_bot::cli::commands::{cmd_inspect, cmd_match, cmd_run};
use pick_bot::cli::config::{Cli, Commands, Settings, load_config};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref());
    let settings = Settings::resolve(&cli, &config);

    match cli.command {
        Commands::Run {
            document,
            script,
            format,
            output,
        } => {
            // CLI > config > defaults
            let format = format.unwrap_or_else(|| config.run.format.clone());
            let output = output.or_else(|| config.run.output.clone());
            cmd_run(&settings, &document, &script, &format, output.as_deref())
        }
        Commands::Inspect { document } => {
            cmd_inspect(&settings, &document)?;
            Ok(true)
        }
        Commands::Match { document, a, b } => cmd_match(&settings, &document, &a, &b),
    }
}
