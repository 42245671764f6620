use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::Error;

/// Message kinds the Manifest wallet knows how to present.
///
/// `Display` renders the wire type URL; `FromStr` parses it. An unregistered
/// URL is a `FromStr` error which classification downgrades to `Unknown`, so
/// the mapping stays total without a catch-all URL here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    MsgSend,
    MsgTransfer,
    MsgMint,
    MsgBurn,
    MsgChangeAdmin,
    MsgSetDenomMetadata,
    MsgCreateDenom,
    MsgPayout,
    MsgBurnHeldBalance,
    MsgSubmitProposal,
    MsgVote,
    MsgExec,
    MsgWithdrawProposal,
    MsgLeaveGroup,
    MsgCreateGroupWithPolicy,
    MsgUpdateGroupMetadata,
    MsgUpdateGroupPolicyMetadata,
    MsgUpdateGroupMembers,
    #[default]
    Unknown,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MessageKind::MsgSend => {
                write!(f, "/cosmos.bank.v1beta1.MsgSend")
            },
            MessageKind::MsgTransfer => {
                write!(f, "/ibc.applications.transfer.v1.MsgTransfer")
            },
            MessageKind::MsgMint => {
                write!(f, "/osmosis.tokenfactory.v1beta1.MsgMint")
            },
            MessageKind::MsgBurn => {
                write!(f, "/osmosis.tokenfactory.v1beta1.MsgBurn")
            },
            MessageKind::MsgChangeAdmin => {
                write!(f, "/osmosis.tokenfactory.v1beta1.MsgChangeAdmin")
            },
            MessageKind::MsgSetDenomMetadata => {
                write!(f, "/osmosis.tokenfactory.v1beta1.MsgSetDenomMetadata")
            },
            MessageKind::MsgCreateDenom => {
                write!(f, "/osmosis.tokenfactory.v1beta1.MsgCreateDenom")
            },
            MessageKind::MsgPayout => {
                write!(f, "/liftedinit.manifest.v1.MsgPayout")
            },
            MessageKind::MsgBurnHeldBalance => {
                write!(f, "/liftedinit.manifest.v1.MsgBurnHeldBalance")
            },
            MessageKind::MsgSubmitProposal => {
                write!(f, "/cosmos.group.v1.MsgSubmitProposal")
            },
            MessageKind::MsgVote => {
                write!(f, "/cosmos.group.v1.MsgVote")
            },
            MessageKind::MsgExec => {
                write!(f, "/cosmos.group.v1.MsgExec")
            },
            MessageKind::MsgWithdrawProposal => {
                write!(f, "/cosmos.group.v1.MsgWithdrawProposal")
            },
            MessageKind::MsgLeaveGroup => {
                write!(f, "/cosmos.group.v1.MsgLeaveGroup")
            },
            MessageKind::MsgCreateGroupWithPolicy => {
                write!(f, "/cosmos.group.v1.MsgCreateGroupWithPolicy")
            },
            MessageKind::MsgUpdateGroupMetadata => {
                write!(f, "/cosmos.group.v1.MsgUpdateGroupMetadata")
            },
            MessageKind::MsgUpdateGroupPolicyMetadata => {
                write!(f, "/cosmos.group.v1.MsgUpdateGroupPolicyMetadata")
            },
            MessageKind::MsgUpdateGroupMembers => {
                write!(f, "/cosmos.group.v1.MsgUpdateGroupMembers")
            },
            MessageKind::Unknown => {
                write!(f, "unknown")
            },
        }
    }
}

impl FromStr for MessageKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<MessageKind, Self::Err> {
        match value {
            "/cosmos.bank.v1beta1.MsgSend" => Ok(MessageKind::MsgSend),
            "/ibc.applications.transfer.v1.MsgTransfer" => {
                Ok(MessageKind::MsgTransfer)
            },
            "/osmosis.tokenfactory.v1beta1.MsgMint" => {
                Ok(MessageKind::MsgMint)
            },
            "/osmosis.tokenfactory.v1beta1.MsgBurn" => {
                Ok(MessageKind::MsgBurn)
            },
            "/osmosis.tokenfactory.v1beta1.MsgChangeAdmin" => {
                Ok(MessageKind::MsgChangeAdmin)
            },
            "/osmosis.tokenfactory.v1beta1.MsgSetDenomMetadata" => {
                Ok(MessageKind::MsgSetDenomMetadata)
            },
            "/osmosis.tokenfactory.v1beta1.MsgCreateDenom" => {
                Ok(MessageKind::MsgCreateDenom)
            },
            "/liftedinit.manifest.v1.MsgPayout" => Ok(MessageKind::MsgPayout),
            "/liftedinit.manifest.v1.MsgBurnHeldBalance" => {
                Ok(MessageKind::MsgBurnHeldBalance)
            },
            "/cosmos.group.v1.MsgSubmitProposal" => {
                Ok(MessageKind::MsgSubmitProposal)
            },
            "/cosmos.group.v1.MsgVote" => Ok(MessageKind::MsgVote),
            "/cosmos.group.v1.MsgExec" => Ok(MessageKind::MsgExec),
            "/cosmos.group.v1.MsgWithdrawProposal" => {
                Ok(MessageKind::MsgWithdrawProposal)
            },
            "/cosmos.group.v1.MsgLeaveGroup" => Ok(MessageKind::MsgLeaveGroup),
            "/cosmos.group.v1.MsgCreateGroupWithPolicy" => {
                Ok(MessageKind::MsgCreateGroupWithPolicy)
            },
            "/cosmos.group.v1.MsgUpdateGroupMetadata" => {
                Ok(MessageKind::MsgUpdateGroupMetadata)
            },
            "/cosmos.group.v1.MsgUpdateGroupPolicyMetadata" => {
                Ok(MessageKind::MsgUpdateGroupPolicyMetadata)
            },
            "/cosmos.group.v1.MsgUpdateGroupMembers" => {
                Ok(MessageKind::MsgUpdateGroupMembers)
            },
            _ => Err(Error::ParseMessage(format!(
                "MessageKind not supported: {}",
                value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_urls_round_trip() {
        let kinds = [
            MessageKind::MsgSend,
            MessageKind::MsgTransfer,
            MessageKind::MsgMint,
            MessageKind::MsgBurn,
            MessageKind::MsgChangeAdmin,
            MessageKind::MsgSetDenomMetadata,
            MessageKind::MsgCreateDenom,
            MessageKind::MsgPayout,
            MessageKind::MsgBurnHeldBalance,
            MessageKind::MsgSubmitProposal,
            MessageKind::MsgVote,
            MessageKind::MsgExec,
            MessageKind::MsgWithdrawProposal,
            MessageKind::MsgLeaveGroup,
            MessageKind::MsgCreateGroupWithPolicy,
            MessageKind::MsgUpdateGroupMetadata,
            MessageKind::MsgUpdateGroupPolicyMetadata,
            MessageKind::MsgUpdateGroupMembers,
        ];

        for kind in kinds {
            let url = kind.to_string();
            assert_eq!(
                MessageKind::from_str(&url).expect("registered url"),
                kind,
                "round trip failed for {}",
                url
            );
        }
    }

    #[test]
    fn test_unregistered_url_is_err() {
        assert!(MessageKind::from_str("/cosmos.staking.v1beta1.MsgDelegate")
            .is_err());
        assert!(MessageKind::from_str("").is_err());
    }
}
