use crate::faas::{Faas, DEFAULT_NAMESPACE};
use crate::{CommandAppend, State};
use clap::{App, ArgMatches, SubCommand};
use proxy::ServiceQuery;

pub(crate) struct GetReplicas;
pub(crate) struct SetReplicas;

impl CommandAppend for GetReplicas {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.subcommand(
            SubCommand::with_name("get-replicas")
                .about(
                    r#"Show replicas and scaling bounds of a function as seen by the autoscaler
	Example: faas-scaler get-replicas echo -n openfaas-fn"#,
                )
                .args_from_usage(
                    "<FUNCTION-NAME>                 'Name of the function'
                    -n, --namespace [namespace]     'Namespace of the function'",
                ),
        )
    }
}

impl GetReplicas {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(r_args) = args.subcommand_matches("get-replicas") {
            let function_name = r_args.value_of("FUNCTION-NAME").ok_or_else(|| {
                State::Custom(
                    "function name is required like: faas-scaler get-replicas FUNCTION_NAME"
                        .to_string(),
                )
            })?;
            let namespace = r_args.value_of("namespace").unwrap_or(DEFAULT_NAMESPACE);

            let query = Faas::service_query(args, r_args)?;
            let res = query.get_replicas(function_name, namespace).await?;
            let out = serde_json::to_string_pretty(&res)
                .map_err(|e| State::Custom(format!("can't print response: {}", e)))?;
            println!("{}", out);

            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}

impl CommandAppend for SetReplicas {
    #[inline(always)]
    fn append_subcommand(app: App<'static, 'static>) -> App<'static, 'static> {
        app.subcommand(
            SubCommand::with_name("set-replicas")
                .about(
                    r#"Ask the provider to run the given number of replicas of a function
	Example: faas-scaler set-replicas echo 3 -n openfaas-fn"#,
                )
                .args_from_usage(
                    "<FUNCTION-NAME>                 'Name of the function'
                    <REPLICAS>                      'Desired replica count'
                    -n, --namespace [namespace]     'Namespace of the function'",
                ),
        )
    }
}

impl SetReplicas {
    #[inline(always)]
    pub(crate) async fn dispatch_command(args: &ArgMatches<'_>) -> crate::Result {
        if let Some(r_args) = args.subcommand_matches("set-replicas") {
            let function_name = r_args.value_of("FUNCTION-NAME").ok_or_else(|| {
                State::Custom(
                    "function name is required like: faas-scaler set-replicas FUNCTION_NAME 3"
                        .to_string(),
                )
            })?;
            let replicas = r_args.value_of("REPLICAS").unwrap_or_default();
            let replicas = replicas.parse::<u64>().map_err(|_| {
                State::Custom(format!(
                    "replicas should be a non-negative integer, got: {:?}",
                    replicas
                ))
            })?;
            let namespace = r_args.value_of("namespace").unwrap_or(DEFAULT_NAMESPACE);

            let query = Faas::service_query(args, r_args)?;
            query.set_replicas(function_name, namespace, replicas).await?;
            println!(
                "Scaled {}.{} to {} replica(s)",
                function_name, namespace, replicas
            );

            Err(State::Matched)
        } else {
            Ok(())
        }
    }
}
