use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use auto_changeset::cli::{run_pipeline, RunOptions, RunOutcome};
use auto_changeset::config::{self, GitBackend, Workspace};
use auto_changeset::git::{Git2Repository, GitCliRepository, Repository};
use auto_changeset::ui;

#[derive(clap::Parser)]
#[command(
    name = "auto-changeset",
    version,
    about = "Generate a changeset from conventional commits since the last release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Working directory of the package")]
    cwd: PathBuf,

    #[arg(long, help = "Print the changeset without writing it")]
    dry_run: bool,

    #[arg(long, help = "Query history with the git executable instead of libgit2")]
    git_cli: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let config = match config::load_config(args.config.as_deref(), &args.cwd) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workspace = Workspace::new(&args.cwd, &config);
    let backend = if args.git_cli {
        GitBackend::Cli
    } else {
        config.git.backend
    };

    ui::display_status("Checking for conventional commits...");

    let options = RunOptions {
        dry_run: args.dry_run,
    };
    let open_repo = || -> auto_changeset::Result<Box<dyn Repository>> {
        Ok(match backend {
            GitBackend::Libgit2 => {
                Box::new(Git2Repository::open(&workspace.working_dir)?) as Box<dyn Repository>
            }
            GitBackend::Cli => Box::new(GitCliRepository::new(&workspace.working_dir)),
        })
    };

    match run_pipeline(&workspace, &config, &options, open_repo) {
        Ok(RunOutcome::Skipped(notice)) => ui::display_notice(&notice),
        Ok(RunOutcome::Generated(generated)) => ui::display_generated(&generated),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
