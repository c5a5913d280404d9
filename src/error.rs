//! Error kinds shared by every stage of the codec.
//!
//! Each variant is recoverable. The pipeline reports them to the user and aborts the current
//! operation without writing partial output.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    /// There were no symbols to build a probability model from.
    #[error("no symbols to encode: input is empty")]
    EmptyInput,

    /// The code table has no entry for a symbol we were asked to encode.
    #[error("no huffman code for symbol {0}")]
    UnknownSymbol(String),

    /// The bit-string ended part way down the tree.
    #[error("huffman bit-string ended mid-code after {consumed} bits")]
    TruncatedStream { consumed: usize },

    /// A bit-string character was not '0'/'1', or the bit leads nowhere in the tree.
    #[error("invalid bit '{bit}' at position {position}")]
    InvalidBit { bit: char, position: usize },

    /// An LZ78 artifact fragment did not parse into index and symbol.
    #[error("malformed LZ78 token '{token}': {reason}")]
    MalformedToken { token: String, reason: &'static str },

    /// An LZ78 token referenced a dictionary index that was not yet registered.
    #[error("LZ78 token {position} references unknown dictionary index {index} (dictionary holds {known})")]
    UnknownIndex {
        position: usize,
        index: usize,
        known: usize,
    },

    /// A probability table line was not in `symbol: value` form.
    #[error("malformed probability line {line}: '{text}'")]
    MalformedProbabilityLine { line: usize, text: String },

    /// A persisted artifact needed for decoding is absent.
    #[error("artifact file {} is missing", .0.display())]
    MissingArtifact(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
