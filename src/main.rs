use anyhow::Result;
use clap::Parser;

use site_deploy::cli::{DeployOutcome, Deployer};
use site_deploy::domain::CommitMessage;
use site_deploy::runner::SystemRunner;
use site_deploy::{config, guard, ui};

#[derive(clap::Parser)]
#[command(
    name = "site-deploy",
    version,
    about = "Commit, build and publish a static site to its publishing branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Commit message (skips the prompt)")]
    message: Option<String>,

    #[arg(long, help = "Stream all command output and log debug details")]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    config.behavior.debug |= args.debug;

    init_logging(config.behavior.debug);
    log::debug!("loaded config: {:?}", config);

    let cwd = std::env::current_dir()?;

    let repo = match guard::ensure_repository(&cwd) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_deploy_error(&e);
            std::process::exit(e.exit_code());
        }
    };

    let runner = SystemRunner::new(config.behavior.debug).current_dir(&cwd);
    let deployer = Deployer::new(&repo, &runner, &config).with_workdir(&cwd);

    let outcome = deployer.run(|default| match args.message.as_deref() {
        Some(message) => Ok(CommitMessage::from_input(message, default)),
        None => ui::prompt_commit_message(default),
    });

    match outcome {
        Ok(DeployOutcome::Deployed { message }) => {
            log::debug!("deployed with message {:?}", message.as_str());
            Ok(())
        }
        Ok(DeployOutcome::WrongBranch { branch }) => {
            log::debug!("skipped deployment from branch '{}'", branch);
            Ok(())
        }
        Err(e) => {
            ui::display_deploy_error(&e);
            std::process::exit(e.exit_code());
        }
    }
}
