use std::process::ExitCode;

use clap::{Parser, Subcommand};

use versync_cli::{
    logging,
    manifest::{ArtifactPaths, run_manifest_command},
    parse_silent, resolve_project,
    validation::parse_mode,
    verify::{OutputFormat, render_report, run_verify_command},
    version_cmd::run_version_command,
};

#[derive(Parser, Debug)]
#[command(
    name = "versync",
    author,
    version,
    about = "Keep release artifacts on the canonical version and verify locale bundles."
)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Propagate the canonical version (mode 0) or print one of its components (modes 1-3).
    Version {
        /// A path inside the project's scripts directory
        anchor: String,
        /// 0 rewrites artifacts and prints the version; 1, 2, 3 print that component
        mode: String,
        /// `true` or `1` to log warnings only
        silent: Option<String>,
    },

    /// Check every resource key reference against every locale bundle.
    Verify {
        /// A path inside the project's scripts directory
        anchor: String,
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the release manifest for the current version.
    Manifest {
        /// A path inside the project's scripts directory
        anchor: String,
        /// Portable executable
        #[arg(long)]
        portable: String,
        /// Windows installer
        #[arg(long)]
        win: String,
        /// macOS installer
        #[arg(long)]
        mac: String,
        /// A published manifest to compare the current version against
        #[arg(long)]
        against: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let silent = match &args.commands {
        Commands::Version { silent, .. } => parse_silent(silent.as_deref()),
        _ => false,
    };
    logging::init(silent);

    match run(args.commands) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, String> {
    match command {
        Commands::Version { anchor, mode, .. } => {
            let mode = parse_mode(&mode)?;
            let project = resolve_project(&anchor)?;
            let today = chrono::Local::now().date_naive();
            println!("{}", run_version_command(&project, mode, today)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { anchor, json } => {
            let project = resolve_project(&anchor)?;
            let report = run_verify_command(&project)?;
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            println!("{}", render_report(&report, format)?);
            Ok(ExitCode::from(report.exit_code() as u8))
        }
        Commands::Manifest {
            anchor,
            portable,
            win,
            mac,
            against,
        } => {
            let project = resolve_project(&anchor)?;
            let artifacts = ArtifactPaths { portable, win, mac };
            print!(
                "{}",
                run_manifest_command(&project, &artifacts, against.as_deref())?
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
