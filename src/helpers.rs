use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::{Coin, Event};

/// Event emitted by the group module when a proposal lands on chain.
pub const SUBMIT_PROPOSAL_EVENT: &str = "cosmos.group.v1.EventSubmitProposal";

const GROUP_METADATA_KEYS: [&str; 3] = ["title", "details", "authors"];

/// Reads the first present string field out of `msg`, trying each key in
/// order. Call sites pass both snake_case and camelCase spellings since the
/// indexer emits proto JSON and older gateways emit amino JSON.
pub fn str_field<'a>(msg: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| msg.get(key)?.as_str())
}

/// Like `str_field` but also accepts a JSON number, stringified. Proposal and
/// group ids are uint64 on the wire and arrive either way.
pub fn id_field(msg: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match msg.get(*key)? {
        Value::String(s) => Some(s.to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Reads one `{denom, amount}` object.
pub fn coin_field(value: &Value) -> Option<Coin> {
    let denom = value.get("denom")?.as_str()?;
    let amount = match value.get("amount")? {
        Value::String(s) => s.to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(Coin::new(denom, &amount))
}

/// Reads a coin list field; a single coin object is accepted as a
/// one-element list. Missing or malformed coins are skipped.
pub fn coins_field(msg: &Value, keys: &[&str]) -> Vec<Coin> {
    for key in keys {
        match msg.get(*key) {
            Some(Value::Array(list)) => {
                return list.iter().filter_map(coin_field).collect();
            },
            Some(value @ Value::Object(_)) => {
                return coin_field(value).into_iter().collect();
            },
            _ => {},
        }
    }
    Vec::new()
}

/// Scans transaction events for the proposal id emitted alongside a group
/// `MsgSubmitProposal`. Raw event-log values carry surrounding quotes, which
/// are stripped here.
pub fn find_proposal_id(events: &[Event]) -> Option<String> {
    events
        .iter()
        .filter(|event| event.r#type == SUBMIT_PROPOSAL_EVENT)
        .flat_map(|event| event.attributes.iter())
        .find(|attribute| attribute.key == "proposal_id")
        .map(|attribute| attribute.value.trim_matches('"').to_owned())
}

/// Best-effort decode of the free-form group metadata blob.
///
/// On-chain group metadata is an untyped JSON string by convention; only the
/// `title`, `details` and `authors` keys are kept. A non-JSON blob is an
/// `Err` the caller downgrades to a log line, and valid JSON without any
/// known key yields `None`.
pub fn parse_group_metadata(
    raw: &str,
) -> Result<Option<Map<String, Value>>, Error> {
    let parsed: Value = serde_json::from_str(raw)?;
    let mut metadata = Map::new();

    for key in GROUP_METADATA_KEYS {
        if let Some(value) = parsed.get(key) {
            metadata.insert(key.to_owned(), value.clone());
        }
    }

    if metadata.is_empty() {
        return Ok(None);
    }
    Ok(Some(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attribute;
    use serde_json::json;

    #[test]
    fn test_str_field_tries_both_spellings() {
        let msg = json!({"from_address": "manifest1abc"});
        assert_eq!(
            str_field(&msg, &["from_address", "fromAddress"]),
            Some("manifest1abc")
        );
        let msg = json!({"fromAddress": "manifest1abc"});
        assert_eq!(
            str_field(&msg, &["from_address", "fromAddress"]),
            Some("manifest1abc")
        );
        assert_eq!(str_field(&msg, &["to_address"]), None);
    }

    #[test]
    fn test_coins_field_accepts_list_and_single() {
        let msg = json!({"amount": [{"denom": "umfx", "amount": "1000000"}]});
        assert_eq!(
            coins_field(&msg, &["amount"]),
            vec![Coin::new("umfx", "1000000")]
        );

        let msg = json!({"token": {"denom": "umfx", "amount": 5}});
        assert_eq!(
            coins_field(&msg, &["token"]),
            vec![Coin::new("umfx", "5")]
        );

        assert_eq!(coins_field(&json!({}), &["amount"]), Vec::new());
    }

    #[test]
    fn test_find_proposal_id_strips_quotes() {
        let events = vec![
            Event {
                r#type: String::from("message"),
                attributes: vec![],
            },
            Event {
                r#type: String::from(SUBMIT_PROPOSAL_EVENT),
                attributes: vec![Attribute {
                    key: String::from("proposal_id"),
                    value: String::from("\"42\""),
                }],
            },
        ];

        assert_eq!(find_proposal_id(&events), Some(String::from("42")));
        assert_eq!(find_proposal_id(&events[..1]), None);
    }

    #[test]
    fn test_parse_group_metadata() {
        let metadata = parse_group_metadata(
            r#"{"title": "Treasury", "details": "spend plan", "voteOptionContext": "x"}"#,
        )
        .unwrap()
        .expect("known keys present");

        assert_eq!(metadata.get("title"), Some(&json!("Treasury")));
        assert_eq!(metadata.get("details"), Some(&json!("spend plan")));
        // Unknown keys are not carried over
        assert!(!metadata.contains_key("voteOptionContext"));

        assert!(parse_group_metadata(r#"{"other": 1}"#).unwrap().is_none());
        assert!(parse_group_metadata("not json").is_err());
    }
}
