//! Normalized output model
//!
//! `Tx_Entry` is the per-message normalization result, `Tx_Record` wraps it
//! with transaction-level context for display.

mod message_kind;
mod tx_entry;
mod tx_record;

pub use message_kind::MessageKind;
pub use tx_entry::Tx_Entry;
pub use tx_record::Tx_Record;
