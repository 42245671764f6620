//! Transaction transformer
//!
//! Flattens one raw transaction into ordered display records. Messages are
//! processed in transaction order; a group proposal submission additionally
//! yields entries for the embedded sub-messages that concern the viewer,
//! emitted before the submission's own entry.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::Value;
use tracing::warn;

use crate::helpers::{find_proposal_id, str_field};
use crate::model::{MessageKind, Tx_Entry, Tx_Record};
use crate::types::TxResponse;

/// Normalizes one transaction for the given viewer.
pub fn parse_tx(tx_response: &TxResponse, viewer: &str) -> Vec<Tx_Record> {
    let memo = &tx_response.tx.body.memo;
    let memo = (!memo.is_empty()).then(|| memo.clone());

    let (fee_amount, fee_denom) =
        match tx_response.tx.auth_info.fee.amount.first() {
            Some(coin) => (
                BigDecimal::from_str(&coin.amount).unwrap_or_else(|e| {
                    warn!(
                        "Could not parse fee amount {:?}: {}",
                        coin.amount, e
                    );
                    BigDecimal::from(0)
                }),
                Some(coin.denom.clone()),
            ),
            None => (BigDecimal::from(0), None),
        };

    let block = match tx_response.height.parse::<i64>() {
        Ok(block) => block,
        Err(e) => {
            warn!(
                "Could not parse block height {:?}: {}",
                tx_response.height, e
            );
            0
        },
    };

    let mut entries: Vec<Tx_Entry> = Vec::new();
    for msg in &tx_response.tx.body.messages {
        let is_submission = proposal_submission(msg);
        let proposal_id = is_submission
            .then(|| find_proposal_id(&tx_response.events))
            .flatten();

        if is_submission {
            if let Some(Value::Array(nested)) = msg.get("messages") {
                for sub in nested {
                    if !Tx_Entry::references(sub, viewer) {
                        continue;
                    }
                    for mut entry in Tx_Entry::from_message(sub, viewer) {
                        entry.proposal_id = proposal_id.clone();
                        entries.push(entry);
                    }
                }
            }
        }

        // The top-level message is classified regardless of nesting
        for mut entry in Tx_Entry::from_message(msg, viewer) {
            entry.proposal_id = proposal_id.clone();
            entries.push(entry);
        }
    }

    entries
        .into_iter()
        .map(|entry| Tx_Record {
            tx_hash: tx_response.txhash.clone(),
            block,
            timestamp: tx_response.timestamp.clone(),
            memo: memo.clone(),
            fee_amount: fee_amount.clone(),
            fee_denom: fee_denom.clone(),
            entry,
        })
        .collect()
}

/// Normalizes a page of transactions, preserving their order.
pub fn parse_txs(txs: &[TxResponse], viewer: &str) -> Vec<Tx_Record> {
    txs.iter().flat_map(|tx| parse_tx(tx, viewer)).collect()
}

fn proposal_submission(msg: &Value) -> bool {
    str_field(msg, &["@type", "type"])
        .and_then(|url| MessageKind::from_str(url).ok())
        .is_some_and(|kind| kind == MessageKind::MsgSubmitProposal)
}
