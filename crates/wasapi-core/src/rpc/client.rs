use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::CoreError;
use crate::logging::LogSink;
use crate::types::{Coin, SendRequest, Settled, DEFAULT_WALLET_NAME};

use super::auth::basic_auth_header;
use super::protocol::{build_envelope, JsonRpcRequest};
use super::{HttpRequest, HttpResponse, Transport};

/// Wasabi wallet daemon client.
///
/// Every method funnels through [`WalletClient::post`]: build the envelope,
/// send it through the injected transport, classify the response. The
/// client holds no per-call state, so concurrent calls are independent.
pub struct WalletClient<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> WalletClient<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_envelope<'a>(&'a self, method: &'a str, params: Value) -> JsonRpcRequest<'a> {
        build_envelope(&self.config, method, params)
    }

    /// Send `method` with `params` and return the parsed response body.
    pub async fn post(&self, method: &str, params: Value) -> Result<Value, CoreError> {
        let url = self.config.url();
        let envelope = self.build_envelope(method, params);
        let body = serde_json::to_string(&envelope).map_err(|e| CoreError::Encode(e.to_string()))?;
        let headers = self.request_headers();

        let sink = self.config.sink();
        if self.config.verbose() {
            sink.log(format!("Url :{url}"));
            sink.log("Data:");
            sink.log(to_params(&envelope)?);
            sink.log("Headers:");
            sink.log(redacted_headers(&headers));
        }

        debug!(rpc.id = self.config.id(), rpc.method = method, %url, "rpc call");
        let response = self
            .transport
            .send(HttpRequest {
                url,
                method: "POST",
                headers,
                body,
            })
            .await?;
        debug!(
            rpc.method = method,
            status = response.status,
            body_len = response.body.len(),
            "rpc response"
        );
        trace!(
            rpc.method = method,
            body = %String::from_utf8_lossy(&response.body),
            "rpc response body"
        );

        classify_response(response, sink)
    }

    fn request_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_owned(), "application/json".to_owned());
        if let Some(value) = basic_auth_header(self.config.username(), self.config.password()) {
            headers.insert("authorization".to_owned(), value);
        }
        headers
    }

    // ==========================================================================
    // Daemon Methods
    // ==========================================================================

    pub async fn get_status(&self) -> Result<Value, CoreError> {
        self.post("getstatus", Value::Null).await
    }

    pub async fn create_wallet(&self, wallet_name: &str, password: &str) -> Result<Value, CoreError> {
        self.post("createwallet", json!([wallet_name, password])).await
    }

    pub async fn list_unspent_coins(&self) -> Result<Value, CoreError> {
        self.post("listunspentcoins", Value::Null).await
    }

    /// `kwargs` is sent as the params object; an empty map sends none.
    pub async fn get_wallet_info(&self, kwargs: Map<String, Value>) -> Result<Value, CoreError> {
        self.post("getwalletinfo", Value::Object(kwargs)).await
    }

    pub async fn get_new_address(&self, label: &str) -> Result<Value, CoreError> {
        self.post("getnewaddress", json!([label])).await
    }

    pub async fn send(&self, request: &SendRequest) -> Result<Value, CoreError> {
        self.post("send", to_params(request)?).await
    }

    pub async fn get_history(&self) -> Result<Value, CoreError> {
        self.post("gethistory", Value::Null).await
    }

    pub async fn list_keys(&self) -> Result<Value, CoreError> {
        self.post("listkeys", Value::Null).await
    }

    /// Register coins for coinjoin participation.
    pub async fn enqueue(&self, coins: &[Coin]) -> Result<Value, CoreError> {
        self.post("enqueue", coin_params(coins)?).await
    }

    /// Withdraw coins from coinjoin participation.
    pub async fn dequeue(&self, coins: &[Coin]) -> Result<Value, CoreError> {
        self.post("dequeue", coin_params(coins)?).await
    }

    /// Ask the daemon to shut down. The daemon may close the connection
    /// before replying, so failures come back as [`Settled::Interrupted`].
    pub async fn stop(&self) -> Settled {
        settle("stop", self.post("stop", Value::Null).await)
    }

    /// Switch the daemon to `name`. Never fails, like [`WalletClient::stop`].
    ///
    /// [`load_default_wallet`](WalletClient::load_default_wallet) uses
    /// [`DEFAULT_WALLET_NAME`] with an empty password.
    pub async fn load_wallet(&self, name: &str, password: &str) -> Settled {
        settle("loadwallet", self.post("loadwallet", json!([name, password])).await)
    }

    pub async fn load_default_wallet(&self) -> Settled {
        self.load_wallet(DEFAULT_WALLET_NAME, "").await
    }
}

/// Map a transport response onto the client's result contract.
///
/// Non-success statuses other than 401 are handed to `sink` verbatim before
/// the error is returned.
pub fn classify_response(response: HttpResponse, sink: &LogSink) -> Result<Value, CoreError> {
    if response.is_success() {
        return response.json().map_err(|e| {
            CoreError::InvalidResponse(format!(
                "decode response body: {e}; body={}",
                String::from_utf8_lossy(&response.body)
            ))
        });
    }

    if response.status == 401 {
        return Err(CoreError::Unauthorized);
    }

    warn!(status = response.status, status_text = %response.status_text, "wallet RPC request failed");
    sink.log(json!({
        "status": response.status,
        "statusText": response.status_text,
        "body": String::from_utf8_lossy(&response.body),
    }));
    Err(CoreError::Remote {
        status: response.status,
        message: response.status_text,
    })
}

fn to_params(value: &impl Serialize) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Encode(e.to_string()))
}

fn coin_params(coins: &[Coin]) -> Result<Value, CoreError> {
    #[derive(Serialize)]
    struct CoinParams<'a> {
        coins: &'a [Coin],
    }
    to_params(&CoinParams { coins })
}

fn settle(method: &str, result: Result<Value, CoreError>) -> Settled {
    if let Err(err) = &result {
        debug!(rpc.method = method, error = %err, "daemon did not answer; treating as settled");
    }
    Settled::from(result)
}

fn redacted_headers(headers: &BTreeMap<String, String>) -> Value {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == "authorization" {
                "Basic ***".to_owned()
            } else {
                value.clone()
            };
            (name.clone(), Value::String(shown))
        })
        .collect::<Map<String, Value>>()
        .into()
}
