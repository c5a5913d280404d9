//! The lz78 module is the dictionary stage of the codec.
//!
//! The encoder reads symbols one at a time, extending a buffered phrase for as long as it is
//! already in the dictionary. The first symbol that makes the phrase new ends it: a token of
//! (index of the buffered phrase, new symbol) is emitted and the new phrase is registered under
//! the next index. Index 0 always stands for the empty phrase. If the input ends while a known
//! phrase is buffered, a final token with no symbol is emitted.
//!
//! The decoder never sees the encoder's dictionary. It rebuilds an identical one by registering
//! the phrase of every token it decodes, so a token can only refer to phrases created by earlier
//! tokens.
//!
//! Both sides are generic over the symbol type.
//!

#[allow(clippy::module_inception)]
pub mod lz78;
pub mod lz78_decode;
