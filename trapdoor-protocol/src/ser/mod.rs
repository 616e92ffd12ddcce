use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("invalid seek: {0}")]
    InvalidSeek(String),
    #[error("EOF, Tried to read {0} but No bytes left to consume")]
    EndOfBuffer(&'static str),
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("VarInt was over five bytes without termination")]
    MalformedVarInt,
    #[error("VarLong was over ten bytes without termination")]
    MalformedVarLong,
    #[error("too large: {0}")]
    TooLarge(String),
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WritingError {
    #[error("too large: {0}")]
    TooLarge(String),
    #[error("Serde failure: {0}")]
    Serde(String),
}
