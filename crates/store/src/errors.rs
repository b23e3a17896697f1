use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    #[error("parse store file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid: {0}")]
    Invalid(&'static str),
}
