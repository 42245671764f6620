use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::common::{Coin, Event};

/// One transaction as returned by the indexer query layer.
///
/// Only the fields the normalizer reads are modelled; messages stay
/// `serde_json::Value` because their shape depends on the `@type`
/// discriminator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub txhash: String,
    // The indexer reports height as a string, some gateways as a number
    #[serde(default, deserialize_with = "string_or_number")]
    pub height: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tx: Tx,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tx {
    #[serde(default)]
    pub body: TxBody,
    #[serde(default, alias = "authInfo")]
    pub auth_info: AuthInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxBody {
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthInfo {
    #[serde(default)]
    pub fee: Fee,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Vec<Coin>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}
