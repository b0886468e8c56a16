use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jira_pr_linker::actions;
use jira_pr_linker::app::{self, Outcome};
use jira_pr_linker::cli::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    match app::run(args).await {
        Ok(Outcome::NoIssueKey) => {}
        Ok(Outcome::Linked { key, .. }) => {
            tracing::info!(key = %key, "Pull request linked");
        }
        Err(err) => {
            actions::set_failed(&actions::failure_message(&err));
            process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
