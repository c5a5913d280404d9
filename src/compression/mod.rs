//! The compression module manages both directions of the two-stage text codec.
//!
//! Encoding happens in the following steps:
//! - Whitespace transform: spaces, newlines and tabs become `#SP#`, `#NL#` and `#TAB#`.
//! - Huffman coding: estimate symbol probabilities, build the tree, generate codes and write the
//!   bit-string together with the probability table.
//! - LZ78 coding: run the same marked text through the dictionary coder and write the tokens.
//!
//! The two artifacts are independent encodings of the same text.
//!
//! Decoding reads both artifacts back. The LZ78 tokens are decoded to recover the marked text, the
//! Huffman tree is rebuilt from the stored probabilities and its bit-string decoded as a cross
//! check, and finally the whitespace markers are restored.
//!

pub mod artifact;
pub mod compress;
pub mod decompress;
