use clap::Parser;
use color_eyre::eyre::Result;
use std::path::Path;
use std::process::ExitCode;
use stoa::console::ConsoleHandle;
use stoa::handlers::{run_build, run_watch};

#[derive(clap::Parser)]
#[clap(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate the ActivityPub documents once
    Build {
        input_dir: String,
        output_dir: String,
        /// site config, defaults to <INPUT_DIR>/config.toml
        #[arg(long)]
        config: Option<String>,
    },
    /// Regenerate whenever the input changes
    Watch {
        input_dir: String,
        output_dir: String,
        #[arg(long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut console = ConsoleHandle::new()?;
    let args = Args::parse();
    if let Err(report) = match args.command {
        Command::Build {
            input_dir,
            output_dir,
            config,
        } => {
            run_build(
                &mut console,
                Path::new(&input_dir),
                Path::new(&output_dir),
                config.as_deref().map(Path::new),
            )
            .await
        }
        Command::Watch {
            input_dir,
            output_dir,
            config,
        } => {
            run_watch(
                &mut console,
                Path::new(&input_dir),
                Path::new(&output_dir),
                config.as_deref().map(Path::new),
            )
            .await
        }
    } {
        console.log_report(report)?;
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
