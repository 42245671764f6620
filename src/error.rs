use serde_json::Error as JSON_ERROR;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("Parse message error: {0}")]
    ParseMessage(String),
}
