pub use self::{
    common::{Attribute, Coin, Event},
    tx_response::{AuthInfo, Fee, Tx, TxBody, TxResponse},
};

mod common;
mod tx_response;
