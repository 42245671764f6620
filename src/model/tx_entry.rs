use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::helpers::{coins_field, id_field, parse_group_metadata, str_field};
use crate::model::MessageKind;
use crate::types::Coin;

/// One normalized transaction event, scoped to the viewing wallet.
///
/// Classification is total: any message, including one with a missing or
/// unregistered type discriminator, maps to at least the `Unknown`
/// placeholder. The only kind allowed to fan out (or filter down) is
/// `MsgPayout`, which emits one entry per pair relevant to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tx_Entry {
    pub kind: MessageKind,
    pub from: String,
    pub to: Option<String>,
    pub amounts: Vec<Coin>,
    pub metadata: Option<Map<String, Value>>,
    /// Set by the transformer when this entry came out of (or is) a group
    /// proposal submission.
    pub proposal_id: Option<String>,
}

impl Tx_Entry {
    /// Classifies one decoded message into display entries.
    pub fn from_message(msg: &Value, viewer: &str) -> Vec<Tx_Entry> {
        let kind = str_field(msg, &["@type", "type"])
            .and_then(|url| MessageKind::from_str(url).ok())
            .unwrap_or(MessageKind::Unknown);

        match kind {
            MessageKind::MsgSend => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["from_address", "fromAddress"])),
                to: str_field(msg, &["to_address", "toAddress"])
                    .map(str::to_owned),
                amounts: coins_field(msg, &["amount"]),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgTransfer => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                to: str_field(msg, &["receiver"]).map(str::to_owned),
                amounts: coins_field(msg, &["token"]),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgMint => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                to: str_field(msg, &["mint_to_address", "mintToAddress"])
                    .map(str::to_owned),
                amounts: coins_field(msg, &["amount"]),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgBurn => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                to: str_field(msg, &["burn_from_address", "burnFromAddress"])
                    .map(str::to_owned),
                amounts: coins_field(msg, &["amount"]),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgChangeAdmin => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                to: str_field(msg, &["new_admin", "newAdmin"])
                    .map(str::to_owned),
                metadata: metadata_str("denom", str_field(msg, &["denom"])),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgSetDenomMetadata => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                metadata: metadata_str(
                    "denom",
                    msg.get("metadata")
                        .and_then(|metadata| str_field(metadata, &["base"])),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgCreateDenom => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["sender"])),
                metadata: metadata_str(
                    "subdenom",
                    str_field(msg, &["subdenom"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgPayout => Self::payout_entries(msg, viewer),
            MessageKind::MsgBurnHeldBalance => {
                let authority = owned(str_field(msg, &["authority"]));
                vec![Tx_Entry {
                    kind,
                    to: Some(authority.clone()),
                    from: authority,
                    amounts: coins_field(msg, &["burn_coins", "burnCoins"]),
                    ..Tx_Entry::default()
                }]
            },
            MessageKind::MsgSubmitProposal => {
                // Only the policy address is visible at top level, so the
                // viewer is recorded as the initiating party
                let mut metadata = Map::new();
                if let Some(title) = str_field(msg, &["title"]) {
                    metadata
                        .insert(String::from("title"), Value::from(title));
                }
                if let Some(summary) =
                    str_field(msg, &["summary", "description"])
                {
                    metadata
                        .insert(String::from("summary"), Value::from(summary));
                }
                if let Some(proposers @ Value::Array(_)) = msg.get("proposers")
                {
                    metadata.insert(
                        String::from("proposers"),
                        proposers.clone(),
                    );
                }
                vec![Tx_Entry {
                    kind,
                    from: viewer.to_owned(),
                    metadata: (!metadata.is_empty()).then_some(metadata),
                    ..Tx_Entry::default()
                }]
            },
            MessageKind::MsgVote => {
                let mut metadata = Map::new();
                if let Some(id) =
                    id_field(msg, &["proposal_id", "proposalId"])
                {
                    metadata
                        .insert(String::from("proposal_id"), Value::from(id));
                }
                if let Some(option) = id_field(msg, &["option"]) {
                    metadata
                        .insert(String::from("option"), Value::from(option));
                }
                vec![Tx_Entry {
                    kind,
                    from: owned(str_field(msg, &["voter"])),
                    metadata: (!metadata.is_empty()).then_some(metadata),
                    ..Tx_Entry::default()
                }]
            },
            MessageKind::MsgExec => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["executor"])),
                metadata: metadata_id(
                    "proposal_id",
                    id_field(msg, &["proposal_id", "proposalId"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgWithdrawProposal => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["address"])),
                metadata: metadata_id(
                    "proposal_id",
                    id_field(msg, &["proposal_id", "proposalId"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgLeaveGroup => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["address"])),
                metadata: metadata_id(
                    "group_id",
                    id_field(msg, &["group_id", "groupId"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgCreateGroupWithPolicy => {
                let raw = str_field(msg, &["group_metadata", "groupMetadata"])
                    .unwrap_or_default();
                let metadata = match parse_group_metadata(raw) {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        warn!("Malformed group metadata: {}", e);
                        None
                    },
                };
                vec![Tx_Entry {
                    kind,
                    from: owned(str_field(msg, &["admin"])),
                    metadata,
                    ..Tx_Entry::default()
                }]
            },
            MessageKind::MsgUpdateGroupMetadata => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["admin"])),
                metadata: metadata_id(
                    "group_id",
                    id_field(msg, &["group_id", "groupId"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgUpdateGroupPolicyMetadata => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["admin"])),
                metadata: metadata_str(
                    "policy_address",
                    str_field(
                        msg,
                        &["group_policy_address", "groupPolicyAddress"],
                    ),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::MsgUpdateGroupMembers => vec![Tx_Entry {
                kind,
                from: owned(str_field(msg, &["admin"])),
                metadata: metadata_id(
                    "group_id",
                    id_field(msg, &["group_id", "groupId"]),
                ),
                ..Tx_Entry::default()
            }],
            MessageKind::Unknown => vec![Tx_Entry::default()],
        }
    }

    /// Multi-recipient disbursement. The chain-level payout may touch many
    /// wallets; only pairs involving the viewer (as authority or recipient)
    /// are emitted.
    fn payout_entries(msg: &Value, viewer: &str) -> Vec<Tx_Entry> {
        let authority = owned(str_field(msg, &["authority"]));
        let Some(Value::Array(pairs)) = msg
            .get("payout_pairs")
            .or_else(|| msg.get("payoutPairs"))
        else {
            return Vec::new();
        };

        pairs
            .iter()
            .filter_map(|pair| {
                let address = str_field(pair, &["address"])?;
                if authority != viewer && address != viewer {
                    return None;
                }
                Some(Tx_Entry {
                    kind: MessageKind::MsgPayout,
                    from: authority.clone(),
                    to: Some(address.to_owned()),
                    amounts: coins_field(pair, &["coin"]),
                    ..Tx_Entry::default()
                })
            })
            .collect()
    }

    /// Addresses a message structurally refers to, keyed off its kind.
    ///
    /// Used by the transformer to decide whether a proposal sub-message
    /// concerns the viewer. Unknown shapes return nothing and the caller
    /// falls back to a serialized-form scan.
    pub fn referenced_addresses(msg: &Value) -> Vec<String> {
        let kind = str_field(msg, &["@type", "type"])
            .and_then(|url| MessageKind::from_str(url).ok())
            .unwrap_or(MessageKind::Unknown);

        let mut addresses: Vec<Option<&str>> = Vec::new();
        match kind {
            MessageKind::MsgSend => {
                addresses.push(str_field(msg, &["from_address", "fromAddress"]));
                addresses.push(str_field(msg, &["to_address", "toAddress"]));
            },
            MessageKind::MsgTransfer => {
                addresses.push(str_field(msg, &["sender"]));
                addresses.push(str_field(msg, &["receiver"]));
            },
            MessageKind::MsgMint => {
                addresses.push(str_field(msg, &["sender"]));
                addresses
                    .push(str_field(msg, &["mint_to_address", "mintToAddress"]));
            },
            MessageKind::MsgBurn => {
                addresses.push(str_field(msg, &["sender"]));
                addresses.push(str_field(
                    msg,
                    &["burn_from_address", "burnFromAddress"],
                ));
            },
            MessageKind::MsgChangeAdmin => {
                addresses.push(str_field(msg, &["sender"]));
                addresses.push(str_field(msg, &["new_admin", "newAdmin"]));
            },
            MessageKind::MsgSetDenomMetadata
            | MessageKind::MsgCreateDenom => {
                addresses.push(str_field(msg, &["sender"]));
            },
            MessageKind::MsgPayout => {
                addresses.push(str_field(msg, &["authority"]));
                if let Some(Value::Array(pairs)) = msg
                    .get("payout_pairs")
                    .or_else(|| msg.get("payoutPairs"))
                {
                    for pair in pairs {
                        addresses.push(str_field(pair, &["address"]));
                    }
                }
            },
            MessageKind::MsgBurnHeldBalance => {
                addresses.push(str_field(msg, &["authority"]));
            },
            MessageKind::MsgSubmitProposal => {
                addresses.push(str_field(
                    msg,
                    &["group_policy_address", "groupPolicyAddress"],
                ));
                if let Some(Value::Array(proposers)) = msg.get("proposers") {
                    for proposer in proposers {
                        addresses.push(proposer.as_str());
                    }
                }
            },
            MessageKind::MsgVote => {
                addresses.push(str_field(msg, &["voter"]));
            },
            MessageKind::MsgExec => {
                addresses.push(str_field(msg, &["executor"]));
            },
            MessageKind::MsgWithdrawProposal
            | MessageKind::MsgLeaveGroup => {
                addresses.push(str_field(msg, &["address"]));
            },
            MessageKind::MsgCreateGroupWithPolicy => {
                addresses.push(str_field(msg, &["admin"]));
                if let Some(Value::Array(members)) = msg.get("members") {
                    for member in members {
                        addresses.push(str_field(member, &["address"]));
                    }
                }
            },
            MessageKind::MsgUpdateGroupMembers => {
                addresses.push(str_field(msg, &["admin"]));
                if let Some(Value::Array(updates)) = msg
                    .get("member_updates")
                    .or_else(|| msg.get("memberUpdates"))
                {
                    for update in updates {
                        addresses.push(str_field(update, &["address"]));
                    }
                }
            },
            MessageKind::MsgUpdateGroupMetadata
            | MessageKind::MsgUpdateGroupPolicyMetadata => {
                addresses.push(str_field(msg, &["admin"]));
            },
            MessageKind::Unknown => {},
        }

        addresses
            .into_iter()
            .flatten()
            .map(str::to_owned)
            .collect()
    }

    /// Whether `msg` concerns `viewer`: structural field inspection for
    /// known kinds, serialized-substring fallback for unknown ones.
    pub fn references(msg: &Value, viewer: &str) -> bool {
        let addresses = Self::referenced_addresses(msg);
        if addresses.is_empty() {
            return msg.to_string().contains(viewer);
        }
        addresses.iter().any(|address| address == viewer)
    }
}

fn owned(field: Option<&str>) -> String {
    field.unwrap_or_default().to_owned()
}

fn metadata_str(
    key: &str,
    value: Option<&str>,
) -> Option<Map<String, Value>> {
    metadata_id(key, value.map(str::to_owned))
}

fn metadata_id(
    key: &str,
    value: Option<String>,
) -> Option<Map<String, Value>> {
    let mut metadata = Map::new();
    metadata.insert(key.to_owned(), Value::from(value?));
    Some(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VIEWER: &str = "manifest1viewer";

    #[test]
    fn test_send_maps_addresses_and_amounts() {
        let msg = json!({
            "@type": "/cosmos.bank.v1beta1.MsgSend",
            "from_address": "manifest1sender",
            "to_address": "manifest1receiver",
            "amount": [{"denom": "umfx", "amount": "1000000"}],
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, MessageKind::MsgSend);
        assert_eq!(entries[0].from, "manifest1sender");
        assert_eq!(entries[0].to.as_deref(), Some("manifest1receiver"));
        assert_eq!(entries[0].amounts, vec![Coin::new("umfx", "1000000")]);
    }

    #[test]
    fn test_unregistered_type_falls_back_to_unknown() {
        let msg = json!({
            "@type": "/cosmos.staking.v1beta1.MsgDelegate",
            "delegator_address": "manifest1abc",
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 1, "fallback must still emit one entry");
        assert_eq!(entries[0].kind, MessageKind::Unknown);
        assert_eq!(entries[0].from, "");
        assert!(entries[0].amounts.is_empty());

        // Even a message with no discriminator at all is classified
        let entries = Tx_Entry::from_message(&json!({}), VIEWER);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, MessageKind::Unknown);
    }

    #[test]
    fn test_payout_filters_to_viewer_pairs() {
        let msg = json!({
            "@type": "/liftedinit.manifest.v1.MsgPayout",
            "authority": "manifest1authority",
            "payout_pairs": [
                {"address": "manifest1other", "coin": {"denom": "umfx", "amount": "5"}},
                {"address": VIEWER, "coin": {"denom": "umfx", "amount": "3"}},
            ],
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 1, "only the viewer's pair survives");
        assert_eq!(entries[0].from, "manifest1authority");
        assert_eq!(entries[0].to.as_deref(), Some(VIEWER));
        assert_eq!(entries[0].amounts, vec![Coin::new("umfx", "3")]);
    }

    #[test]
    fn test_payout_authority_viewer_sees_all_pairs() {
        let msg = json!({
            "@type": "/liftedinit.manifest.v1.MsgPayout",
            "authority": VIEWER,
            "payout_pairs": [
                {"address": "manifest1a", "coin": {"denom": "umfx", "amount": "5"}},
                {"address": "manifest1b", "coin": {"denom": "umfx", "amount": "3"}},
            ],
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].to.as_deref(), Some("manifest1a"));
        assert_eq!(entries[1].to.as_deref(), Some("manifest1b"));
    }

    #[test]
    fn test_submit_proposal_from_is_viewer() {
        let msg = json!({
            "@type": "/cosmos.group.v1.MsgSubmitProposal",
            "group_policy_address": "manifest1policy",
            "proposers": ["manifest1proposer"],
            "title": "Fund ops",
            "summary": "Q3 budget",
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].from, VIEWER);
        let metadata = entries[0].metadata.as_ref().expect("metadata");
        assert_eq!(metadata.get("title"), Some(&json!("Fund ops")));
        assert_eq!(metadata.get("summary"), Some(&json!("Q3 budget")));
        assert_eq!(
            metadata.get("proposers"),
            Some(&json!(["manifest1proposer"]))
        );
    }

    #[test]
    fn test_create_group_bad_metadata_degrades() {
        let msg = json!({
            "@type": "/cosmos.group.v1.MsgCreateGroupWithPolicy",
            "admin": "manifest1admin",
            "group_metadata": "{not valid json",
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].from, "manifest1admin");
        assert!(entries[0].metadata.is_none());
    }

    #[test]
    fn test_create_group_metadata_extracts_known_keys() {
        let msg = json!({
            "@type": "/cosmos.group.v1.MsgCreateGroupWithPolicy",
            "admin": "manifest1admin",
            "group_metadata": "{\"title\": \"Ops\", \"authors\": \"team\", \"extra\": 1}",
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        let metadata = entries[0].metadata.as_ref().expect("metadata");
        assert_eq!(metadata.get("title"), Some(&json!("Ops")));
        assert_eq!(metadata.get("authors"), Some(&json!("team")));
        assert!(!metadata.contains_key("extra"));
    }

    #[test]
    fn test_vote_carries_proposal_id_and_option() {
        let msg = json!({
            "@type": "/cosmos.group.v1.MsgVote",
            "voter": "manifest1voter",
            "proposal_id": "7",
            "option": "VOTE_OPTION_YES",
        });

        let entries = Tx_Entry::from_message(&msg, VIEWER);
        assert_eq!(entries[0].from, "manifest1voter");
        let metadata = entries[0].metadata.as_ref().expect("metadata");
        assert_eq!(metadata.get("proposal_id"), Some(&json!("7")));
        assert_eq!(metadata.get("option"), Some(&json!("VOTE_OPTION_YES")));
    }

    #[test]
    fn test_references_uses_structural_fields() {
        let msg = json!({
            "@type": "/cosmos.bank.v1beta1.MsgSend",
            "from_address": "manifest1sender",
            "to_address": VIEWER,
            // The viewer string also appears in an unrelated field; the
            // structural check must not rely on it
            "memo_like": "manifest1viewer-unrelated",
        });
        assert!(Tx_Entry::references(&msg, VIEWER));
        assert!(!Tx_Entry::references(&msg, "manifest1stranger"));

        // Unknown shape falls back to the serialized-form scan
        let msg = json!({
            "@type": "/some.custom.Msg",
            "payload": {"beneficiary": VIEWER},
        });
        assert!(Tx_Entry::references(&msg, VIEWER));
        assert!(!Tx_Entry::references(&msg, "manifest1stranger"));
    }
}
