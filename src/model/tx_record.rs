use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::model::Tx_Entry;

/// One display row: a normalized entry plus the context shared by every
/// entry of its transaction. Built per rendered transaction, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tx_Record {
    pub tx_hash: String,
    pub block: i64,
    /// Indexer-formatted timestamp, passed through as-is.
    pub timestamp: String,
    /// Present only when the raw memo is non-empty.
    pub memo: Option<String>,
    pub fee_amount: BigDecimal,
    pub fee_denom: Option<String>,
    pub entry: Tx_Entry,
}
