mod cli;
mod dispatch;

use clap::Parser;
use eyre::WrapErr;
use serde_json::Value;

use wasapi_core::rpc::JsonRpcReply;
use wasapi_core::{console_sink, HttpTransport, PartialConfig, Settled, WalletClient};

use dispatch::Outcome;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // stdout belongs to the sink; tracing goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let sink = console_sink();
    let config = PartialConfig {
        json_rpc: Some(args.json_rpc.clone()),
        id: Some(args.id.clone()),
        host: Some(args.host.clone()),
        port: Some(args.port),
        username: args.username.clone(),
        password: args.password.clone(),
        verbose: Some(args.verbose),
        sink: Some(sink.clone()),
        extensions: cli::parse_extensions(&args.extensions)?,
    }
    .normalize()
    .wrap_err("invalid configuration")?;
    let verbose = config.verbose();

    if verbose {
        sink.log("VERBOSE: Config");
        sink.log(config.redacted());
    }

    let params: Vec<Value> = serde_json::from_str(&args.args)
        .wrap_err_with(|| format!("args must be a JSON array, got `{}`", args.args))?;
    if verbose {
        sink.log(format!("Method: {}", args.method));
        sink.log(format!("Args: {}", args.args));
    }

    let transport = HttpTransport::new().wrap_err("build HTTP transport")?;
    let client = WalletClient::new(transport, config);
    tracing::debug!(url = %client.config().url(), method = %args.method, "dispatching");

    let outcome = dispatch::dispatch(&client, &args.method, &params)
        .await
        .wrap_err_with(|| format!("while calling `{}` on {}", args.method, client.config().url()))?;

    let result = match outcome {
        Outcome::Reply(body) if args.unwrap => JsonRpcReply::from_value(body)?.into_result()?,
        Outcome::Reply(body) | Outcome::Built(body) => body,
        Outcome::Settled(settled) => {
            if args.method.eq_ignore_ascii_case("stop") {
                if verbose {
                    sink.log(format!("Stop sent; daemon answered: {}", settled.is_answered()));
                }
                return Ok(());
            }
            match settled {
                Settled::Answered(body) => body,
                Settled::Interrupted(err) => Value::String(err.to_string()),
            }
        }
    };

    if verbose {
        sink.log("Result:");
    }
    sink.log(serde_json::to_string_pretty(&result)?);
    Ok(())
}
