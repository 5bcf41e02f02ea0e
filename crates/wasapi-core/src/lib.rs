pub mod config;
pub mod error;
pub mod logging;
pub mod rpc;
#[cfg(test)]
mod test_util;
pub mod types;

pub use config::{Config, PartialConfig};
pub use error::{CoreError, TransportError};
pub use logging::{console_sink, LogEntry, LogSink};
pub use rpc::{HttpTransport, Transport, WalletClient};
pub use types::{create_coin, create_send_payment, Coin, Payment, SendRequest, Settled};
