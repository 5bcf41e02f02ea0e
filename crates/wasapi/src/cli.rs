use clap::Parser;
use eyre::eyre;
use serde_json::{Map, Value};

/// wasapi: call any Wasabi wallet JSON-RPC method from the command line.
///
/// Note: RPC must be enabled and running on the Wasabi Wallet instance.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Method to call, e.g. `getStatus` or `getstatus`.
    pub method: String,

    /// Positional method arguments as a JSON array, e.g. '["Wallet0", ""]'.
    #[arg(default_value = "[]")]
    pub args: String,

    /// JSON-RPC protocol version.
    #[arg(short = 'j', long, default_value = "2.0")]
    pub json_rpc: String,

    /// Request id.
    #[arg(short, long, default_value = "1")]
    pub id: String,

    /// Host of the RPC instance, including the scheme.
    #[arg(short = 'o', long, default_value = "http://127.0.0.1", env = "WASAPI_HOST")]
    pub host: String,

    /// Port of the RPC instance.
    #[arg(short, long, default_value = "37128", env = "WASAPI_PORT")]
    pub port: u16,

    /// RPC username.
    #[arg(long, env = "WASAPI_RPC_USER")]
    pub username: Option<String>,

    /// RPC password. Basic auth is only sent when this is set.
    #[arg(long, env = "WASAPI_RPC_PASS")]
    pub password: Option<String>,

    /// Turn on verbose output, for debugging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra configuration entry `KEY=VALUE` (repeatable). VALUE is parsed as
    /// JSON when possible. Overrides the named options above.
    #[arg(long = "ext", value_name = "KEY=VALUE")]
    pub extensions: Vec<String>,

    /// Print only the JSON-RPC `result` and fail on a daemon `error`.
    #[arg(long)]
    pub unwrap: bool,
}

pub fn parse_extensions(entries: &[String]) -> eyre::Result<Map<String, Value>> {
    let mut extensions = Map::new();
    for entry in entries {
        let (key, raw) = entry
            .split_once('=')
            .ok_or_else(|| eyre!("extension `{entry}` must be KEY=VALUE"))?;
        if key.is_empty() {
            return Err(eyre!("extension `{entry}` has an empty key"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        extensions.insert(key.to_owned(), value);
    }
    Ok(extensions)
}
