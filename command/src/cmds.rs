use crate::faas::Faas;
use crate::replicas::{GetReplicas, SetReplicas};
use crate::{CommandAppend, State};
use clap::{App, AppSettings, ArgMatches};
use utility::{Error, Result};

const ABOUT_MSG: &str = "Query and scale OpenFaaS functions through the provider API used by the autoscaler";

pub fn build_cli() -> App<'static, 'static> {
    let app = App::new("faas-scaler")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about(ABOUT_MSG);

    let app = Faas::append_subcommand(app);
    let app = GetReplicas::append_subcommand(app);
    let app = SetReplicas::append_subcommand(app);
    app
}

pub async fn run(args: &ArgMatches<'_>) -> Result<()> {
    match dispatch_command(args).await {
        Ok(_) => Err(Error::Custom(
            "command not matched, run with --help for usage".to_string(),
        )),
        Err(s) => match s {
            State::Matched => Ok(()),
            State::Error(e) => Err(e),
            state => Err(Error::Custom(state.to_string())),
        },
    }
}

pub async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
    GetReplicas::dispatch_command(args).await?;
    SetReplicas::dispatch_command(args).await
}
