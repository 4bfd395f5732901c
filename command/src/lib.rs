use crate::cmds::{build_cli, run};
use clap::{App, ArgMatches};
use tracing_subscriber::EnvFilter;

use utility::Error;

pub mod cmds;
pub(crate) mod faas;
pub(crate) mod replicas;

type Result = std::result::Result<(), State>;

#[derive(thiserror::Error, Debug)]
pub enum State {
    #[error("command matched")]
    Matched,
    #[error("{0}")]
    Custom(String),
    #[error("{0}")]
    Error(#[from] Error),
}

pub async fn exec() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = build_cli();
    let args: ArgMatches = app.get_matches();
    if let Err(err) = run(&args).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

pub(crate) trait CommandAppend {
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static>;
}
