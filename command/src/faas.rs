use crate::{CommandAppend, State};
use clap::{App, Arg, ArgMatches};
use config::gateway_config::GatewayConfig;
use proxy::ExternalServiceQuery;

pub const DEFAULT_NAMESPACE: &str = "openfaas-fn";

pub(crate) struct Faas;

impl CommandAppend for Faas {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .takes_value(true)
                .help("Path to YAML file with the gateway configuration, environment is used when absent"),
        )
        .arg(
            Arg::with_name("gateway")
                .long("gateway")
                .short("g")
                .takes_value(true)
                .global(true)
                .help("Functions provider URL starting with http(s)://, overrides the configuration"),
        )
    }
}

impl Faas {
    /// loads the configuration named by --config (or the environment)
    /// and applies --gateway on top of it
    pub(crate) fn load_config(
        args: &ArgMatches<'_>,
        r_args: &ArgMatches<'_>,
    ) -> std::result::Result<GatewayConfig, State> {
        let mut config = match global_value(args, r_args, "config") {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::from_env()?,
        };
        if let Some(gateway) = global_value(args, r_args, "gateway") {
            config.functions_provider_url = gateway.to_string();
            config.validate()?;
        }
        Ok(config)
    }

    pub(crate) fn service_query(
        args: &ArgMatches<'_>,
        r_args: &ArgMatches<'_>,
    ) -> std::result::Result<ExternalServiceQuery, State> {
        let config = Self::load_config(args, r_args)?;
        Ok(ExternalServiceQuery::from_config(&config)?)
    }
}

// global flags may be given before or after the subcommand
fn global_value<'a>(
    args: &'a ArgMatches<'_>,
    r_args: &'a ArgMatches<'_>,
    name: &str,
) -> Option<&'a str> {
    r_args.value_of(name).or_else(|| args.value_of(name))
}
