//! Shared indexer-shaped types
//!
//! Thin serde views over the JSON the chain indexer returns. Fields default
//! when absent so a partially populated response never fails to decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    pub denom: String,
    #[serde(default)]
    pub amount: String,
}

impl Coin {
    pub fn new(denom: &str, amount: &str) -> Coin {
        Coin {
            denom: denom.to_owned(),
            amount: amount.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}
