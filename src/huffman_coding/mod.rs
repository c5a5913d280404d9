//! The huffman module is the entropy stage of the codec: it turns a probability model into a
//! prefix-code tree, derives the code table from that tree, and encodes or decodes symbol
//! sequences as textual bit-strings ('0' and '1' characters, not packed bits).
//!
//! Tree construction is static. The whole input is counted first, then one tree is built and used
//! for the entire sequence. Ties between equal weights are broken by a fixed rule (leaves before
//! merged nodes, leaves by symbol, merged nodes by creation order), so the same model always
//! produces the same tree and codes.
//!
//! The tree is an arena of nodes addressed by index, which keeps ownership flat and lets both the
//! code generator and the decoder walk it without recursion.
//!

pub mod huffman;
pub mod huffman_code_from_tree;
