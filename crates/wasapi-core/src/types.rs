//! Parameter shapes shared by the wallet RPC methods.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

pub const DEFAULT_WALLET_NAME: &str = "Wallet0";
pub const DEFAULT_FEE_TARGET: u32 = 2;

// ==============================================================================
// Payments and Coins
// ==============================================================================

/// One output of a `send` call. `amount` travels as integer satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "sendto")]
    pub send_to: String,
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub amount: Amount,
    pub label: String,
    #[serde(rename = "subtractFee", default)]
    pub subtract_fee: bool,
}

/// Reference to a wallet UTXO by funding transaction and output index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(rename = "transactionid")]
    pub transaction_id: String,
    pub index: u32,
}

pub fn create_send_payment(
    send_to: impl Into<String>,
    amount: Amount,
    label: impl Into<String>,
    subtract_fee: bool,
) -> Payment {
    Payment {
        send_to: send_to.into(),
        amount,
        label: label.into(),
        subtract_fee,
    }
}

pub fn create_coin(transaction_id: impl Into<String>, index: u32) -> Coin {
    Coin {
        transaction_id: transaction_id.into(),
        index,
    }
}

// ==============================================================================
// Send
// ==============================================================================

/// Params of the `send` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub payments: Vec<Payment>,
    pub coins: Vec<Coin>,
    #[serde(default = "default_fee_target")]
    pub fee_target: u32,
    #[serde(default)]
    pub password: String,
}

fn default_fee_target() -> u32 {
    DEFAULT_FEE_TARGET
}

impl SendRequest {
    pub fn new(payments: Vec<Payment>, coins: Vec<Coin>) -> Self {
        Self {
            payments,
            coins,
            fee_target: DEFAULT_FEE_TARGET,
            password: String::new(),
        }
    }

    pub fn with_fee_target(mut self, fee_target: u32) -> Self {
        self.fee_target = fee_target;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

// ==============================================================================
// Settled
// ==============================================================================

/// Outcome of a call that must not fail because the daemon may drop the
/// connection before answering (`stop`, `load_wallet`).
#[derive(Debug)]
pub enum Settled {
    Answered(Value),
    Interrupted(CoreError),
}

impl Settled {
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }

    pub fn into_result(self) -> Result<Value, CoreError> {
        match self {
            Self::Answered(value) => Ok(value),
            Self::Interrupted(err) => Err(err),
        }
    }
}

impl From<Result<Value, CoreError>> for Settled {
    fn from(result: Result<Value, CoreError>) -> Self {
        match result {
            Ok(value) => Self::Answered(value),
            Err(err) => Self::Interrupted(err),
        }
    }
}
