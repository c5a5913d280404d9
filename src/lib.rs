//! Two-stage lossless text encoder.
//!
//! Version 0.1.0
//!
//! A text is first passed through a whitespace transform that replaces spaces, newlines and tabs
//! with the markers `#SP#`, `#NL#` and `#TAB#`. The marked text is then encoded twice, independently:
//! - with a static Huffman code, giving a bit-string of '0'/'1' characters plus the probability
//!   table needed to rebuild the tree,
//! - with LZ78, giving a sequence of (dictionary index, next symbol) tokens.
//!
//! Decoding rebuilds the LZ78 dictionary from the tokens to recover the marked text, checks it
//! against the Huffman decode, and restores the whitespace.
//!
//! Basic usage to encode a file is as follows:
//!
//! `$> huffman-lz78 -e story`
//!
//! This reads resources/story.txt and creates resources/story-huffman.txt and
//! resources/story-lz78.txt. `huffman-lz78 -d story` reads them back and writes
//! resources/story-decoded.txt.
//!
//! The Huffman and LZ78 primitives are generic over the symbol type, so they work the same on
//! `char` text and on byte values.
//!
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod lz78;
pub mod tools;

pub use compression::compress::{encode_artifacts, encode_file};
pub use compression::decompress::{decode_artifacts, decode_file};
pub use error::{CodecError, Result};
