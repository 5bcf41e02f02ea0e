//! Maps a method name plus positional JSON arguments onto a
//! [`WalletClient`] call, applying the same defaults as the library.

use bitcoin::Amount;
use eyre::{eyre, WrapErr};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use wasapi_core::types::{DEFAULT_WALLET_NAME, Settled};
use wasapi_core::{create_coin, create_send_payment, Coin, SendRequest, Transport, WalletClient};

pub enum Outcome {
    /// Parsed body of a daemon reply.
    Reply(Value),
    /// Value built locally by a helper; nothing was sent.
    Built(Value),
    /// Result of a call that never fails (`stop`, `loadWallet`).
    Settled(Settled),
}

#[derive(Deserialize)]
struct CoinsArg {
    coins: Vec<Coin>,
}

pub async fn dispatch<T: Transport>(
    client: &WalletClient<T>,
    method: &str,
    args: &[Value],
) -> eyre::Result<Outcome> {
    let outcome = match method.to_ascii_lowercase().as_str() {
        "getstatus" => Outcome::Reply(client.get_status().await?),
        "createwallet" => {
            let name: String = required(args, 0, "walletName")?;
            let password: String = optional(args, 1, "password")?.unwrap_or_default();
            Outcome::Reply(client.create_wallet(&name, &password).await?)
        }
        "listunspentcoins" => Outcome::Reply(client.list_unspent_coins().await?),
        "getwalletinfo" => {
            let kwargs: Map<String, Value> = optional(args, 0, "kwargs")?.unwrap_or_default();
            Outcome::Reply(client.get_wallet_info(kwargs).await?)
        }
        "getnewaddress" => {
            let label: String = required(args, 0, "label")?;
            Outcome::Reply(client.get_new_address(&label).await?)
        }
        "createsendpayment" => {
            let send_to: String = required(args, 0, "sendTo")?;
            let amount: u64 = required(args, 1, "amount")?;
            let label: String = required(args, 2, "label")?;
            let subtract_fee: bool = optional(args, 3, "subtractFee")?.unwrap_or(false);
            let payment =
                create_send_payment(send_to, Amount::from_sat(amount), label, subtract_fee);
            Outcome::Built(serde_json::to_value(payment)?)
        }
        "createcoin" => {
            let transaction_id: String = required(args, 0, "transactionId")?;
            let index: u32 = required(args, 1, "index")?;
            Outcome::Built(serde_json::to_value(create_coin(transaction_id, index))?)
        }
        "send" => {
            let request: SendRequest = required(args, 0, "{payments, coins, feeTarget, password}")?;
            Outcome::Reply(client.send(&request).await?)
        }
        "gethistory" => Outcome::Reply(client.get_history().await?),
        "listkeys" => Outcome::Reply(client.list_keys().await?),
        "enqueue" => {
            let arg: CoinsArg = required(args, 0, "{coins}")?;
            Outcome::Reply(client.enqueue(&arg.coins).await?)
        }
        "dequeue" => {
            let arg: CoinsArg = required(args, 0, "{coins}")?;
            Outcome::Reply(client.dequeue(&arg.coins).await?)
        }
        "stop" => Outcome::Settled(client.stop().await),
        "loadwallet" | "selectwallet" => {
            let name: String =
                optional(args, 0, "name")?.unwrap_or_else(|| DEFAULT_WALLET_NAME.to_owned());
            let password: String = optional(args, 1, "password")?.unwrap_or_default();
            Outcome::Settled(client.load_wallet(&name, &password).await)
        }
        _ => return Err(eyre!("unknown method `{method}`")),
    };
    Ok(outcome)
}

/// Argument `index`, or `None` when it is absent or `null`.
fn optional<T: DeserializeOwned>(args: &[Value], index: usize, name: &str) -> eyre::Result<Option<T>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .wrap_err_with(|| format!("invalid argument {index} ({name})")),
    }
}

fn required<T: DeserializeOwned>(args: &[Value], index: usize, name: &str) -> eyre::Result<T> {
    optional(args, index, name)?.ok_or_else(|| eyre!("missing argument {index} ({name})"))
}
