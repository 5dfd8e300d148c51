use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auto_semver::boundary::BoundaryWarning;
use auto_semver::config::{self, Config};
use auto_semver::domain::VersionBump;
use auto_semver::git::Git2Repository;
use auto_semver::release;
use auto_semver::resolver::VersionResolver;
use auto_semver::ui;
use auto_semver::SemverError;

const LOG_ENV_VAR: &str = "AUTOSEMVER_LOG";

#[derive(Parser)]
#[command(
    name = "auto-semver",
    version,
    about = "Derive semantic versions from git tags and conventional commits"
)]
struct Args {
    #[arg(short = 'C', long, global = true, default_value = ".", help = "Repository location")]
    path: PathBuf,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version of the checked-out commit (default)
    Version {
        #[arg(long, help = "Explain how the version was derived (on stderr)")]
        explain: bool,
    },
    /// Create an annotated release tag at HEAD
    Release(ReleaseArgs),
}

#[derive(ClapArgs)]
struct ReleaseArgs {
    #[arg(long, group = "increment", help = "Force a major release")]
    major: bool,

    #[arg(long, group = "increment", help = "Force a minor release")]
    minor: bool,

    #[arg(long, group = "increment", help = "Force a patch release")]
    patch: bool,

    #[arg(short, long, help = "Tag annotation message")]
    message: Option<String>,

    #[arg(long, help = "Preview the tag without creating it")]
    dry_run: bool,

    #[arg(short, long, help = "Skip confirmation prompt")]
    yes: bool,
}

impl ReleaseArgs {
    fn increment(&self) -> Option<VersionBump> {
        if self.major {
            Some(VersionBump::Major)
        } else if self.minor {
            Some(VersionBump::Minor)
        } else if self.patch {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        if e
            .downcast_ref::<SemverError>()
            .is_some_and(SemverError::is_fatal_repository_error)
        {
            ui::display_status("Run inside a git repository with at least one commit, or pass --path");
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

    // Logs go to stderr so stdout carries only the version
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let repo = Git2Repository::open(&args.path)
        .with_context(|| format!("cannot open git repository at '{}'", args.path.display()))?;
    let config = load_config(args.config.as_deref(), repo.workdir())?;

    match args.command {
        None => print_version(&repo, config, false),
        Some(Command::Version { explain }) => print_version(&repo, config, explain),
        Some(Command::Release(release_args)) => run_release(&repo, &config, &release_args),
    }
}

fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    config::load_config(config_path, repo_root).context("failed to load configuration")
}

fn print_version(repo: &Git2Repository, config: Config, explain: bool) -> Result<()> {
    let resolved = VersionResolver::new(config).resolve(repo)?;

    if explain {
        for warning in BoundaryWarning::collect(&resolved) {
            ui::display_boundary_warning(&warning);
        }
        ui::display_explanation(&resolved);
    }

    ui::display_version(&resolved);
    Ok(())
}

fn run_release(repo: &Git2Repository, config: &Config, args: &ReleaseArgs) -> Result<()> {
    let plan = release::plan_release(repo, config, args.increment(), args.message.clone())?;

    let previous = plan.previous.as_ref().map(|tag| tag.name.as_str());
    ui::display_proposed_tag(previous, &plan.tag_name);

    if args.dry_run {
        ui::display_status(&format!(
            "Dry run: would create tag {} at {}",
            plan.tag_name, plan.target
        ));
        return Ok(());
    }

    if !args.yes && !ui::confirm_action(&format!("Create tag {}?", plan.tag_name))? {
        eprintln!("Tag creation cancelled by user.");
        return Ok(());
    }

    ui::display_status(&format!("Creating tag: {}", plan.tag_name));
    release::create_release(repo, &plan)
        .with_context(|| format!("failed to create tag '{}'", plan.tag_name))?;
    ui::display_success(&format!("Created tag: {}", plan.tag_name));

    ui::display_manual_push_instruction(&plan.tag_name, "origin");
    Ok(())
}
