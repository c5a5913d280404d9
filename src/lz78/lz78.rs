use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashMap;

/// One LZ78 output token: the dictionary index of a known phrase (0 is the empty phrase), and the
/// symbol that extends it. `next` is None only for the final token, when the input ran out part
/// way through a known phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<S> {
    pub index: usize,
    pub next: Option<S>,
}

impl<S> Token<S> {
    pub fn new(index: usize, next: Option<S>) -> Self {
        Token { index, next }
    }

    /// True for the end-of-stream token that carries no symbol
    pub fn is_sentinel(&self) -> bool {
        self.next.is_none()
    }
}

/// Incremental LZ78 encoder.
///
/// The dictionary is a trie: each phrase is stored as (index of the phrase minus its last symbol,
/// last symbol) -> index. Index 0 is the empty phrase and is never stored.
pub struct Lz78Encoder<S> {
    dict: FxHashMap<(usize, S), usize>,
    /// Index of the phrase buffered so far, 0 when the buffer is empty
    current: usize,
    next_index: usize,
}

impl<S: Copy + Eq + Hash> Lz78Encoder<S> {
    pub fn new() -> Self {
        Lz78Encoder {
            dict: FxHashMap::default(),
            current: 0,
            next_index: 1,
        }
    }

    /// Add a symbol to the phrase buffer. Returns a token when the buffer plus this symbol is a
    /// new phrase, which is then registered and the buffer cleared.
    pub fn push(&mut self, sym: S) -> Option<Token<S>> {
        if let Some(&idx) = self.dict.get(&(self.current, sym)) {
            // Known phrase, keep extending it
            self.current = idx;
            return None;
        }
        let token = Token::new(self.current, Some(sym));
        self.dict.insert((self.current, sym), self.next_index);
        self.next_index += 1;
        self.current = 0;
        Some(token)
    }

    /// Flush a dangling phrase. It is already in the dictionary, so nothing new is registered.
    pub fn finish(&mut self) -> Option<Token<S>> {
        if self.current == 0 {
            return None;
        }
        let token = Token::new(self.current, None);
        self.current = 0;
        Some(token)
    }

    /// Number of phrases registered so far
    pub fn dict_len(&self) -> usize {
        self.dict.len()
    }
}

impl<S: Copy + Eq + Hash> Default for Lz78Encoder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a symbol sequence into LZ78 tokens.
pub fn lz78_encode<S: Copy + Eq + Hash>(symbols: &[S]) -> Vec<Token<S>> {
    let mut encoder = Lz78Encoder::new();
    let mut tokens: Vec<Token<S>> = symbols.iter().filter_map(|&s| encoder.push(s)).collect();
    tokens.extend(encoder.finish());
    debug!(
        "LZ78 encoded {} symbols into {} tokens with {} dictionary phrases",
        symbols.len(),
        tokens.len(),
        encoder.dict_len()
    );
    tokens
}
