use log::debug;

use super::lz78::Token;
use crate::error::{CodecError, Result};

/// Incremental LZ78 decoder. Rebuilds the encoder's dictionary in lockstep with the tokens.
///
/// Entry `i` of `phrases` holds phrase `i + 1` as (index of its prefix phrase, last symbol).
/// Phrase 0 is the empty phrase and is not stored.
pub struct Lz78Decoder<S> {
    phrases: Vec<(usize, S)>,
    /// Scratch space used to expand a phrase back to front
    scratch: Vec<S>,
    /// Tokens seen so far, for error reporting
    position: usize,
}

impl<S: Copy> Lz78Decoder<S> {
    pub fn new() -> Self {
        Lz78Decoder {
            phrases: Vec::new(),
            scratch: Vec::new(),
            position: 0,
        }
    }

    /// Decode one token, appending its phrase to `out`. A token with a symbol registers its phrase
    /// under the next index, a sentinel token registers nothing.
    pub fn push(&mut self, token: &Token<S>, out: &mut Vec<S>) -> Result<()> {
        let position = self.position;
        self.position += 1;

        if token.index > self.phrases.len() {
            return Err(CodecError::UnknownIndex {
                position,
                index: token.index,
                known: self.phrases.len(),
            });
        }

        // Follow the prefix links back to the empty phrase, then copy the symbols out in order
        self.scratch.clear();
        let mut idx = token.index;
        while idx != 0 {
            let (prefix, sym) = self.phrases[idx - 1];
            self.scratch.push(sym);
            idx = prefix;
        }
        out.extend(self.scratch.iter().rev());

        if let Some(sym) = token.next {
            out.push(sym);
            self.phrases.push((token.index, sym));
        }
        Ok(())
    }

    /// Number of phrases registered so far
    pub fn dict_len(&self) -> usize {
        self.phrases.len()
    }
}

impl<S: Copy> Default for Lz78Decoder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a token sequence back into the symbol sequence it was encoded from.
pub fn lz78_decode<S: Copy>(tokens: &[Token<S>]) -> Result<Vec<S>> {
    let mut decoder = Lz78Decoder::new();
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        decoder.push(token, &mut out)?;
    }
    debug!(
        "LZ78 decoded {} tokens into {} symbols with {} dictionary phrases",
        tokens.len(),
        out.len(),
        decoder.dict_len()
    );
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lz78::lz78::{lz78_encode, Lz78Encoder};
    use crate::tools::whitespace::{mark, unmark};
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn empty_tokens_test() {
        assert!(lz78_decode::<char>(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_test() {
        let tokens = vec![
            Token::new(0, Some('a')),
            Token::new(0, Some('b')),
            Token::new(1, Some('b')),
            Token::new(3, Some('a')),
            Token::new(2, None),
        ];
        assert_eq!(lz78_decode(&tokens).unwrap(), chars("abababab"));
    }

    #[test]
    fn round_trip_test() {
        let texts = [
            "",
            "a",
            "aaaa",
            "ab#SP#ab",
            "a,b,a",
            "x|y||z,,",
            "TOBEORNOTTOBEORTOBEORNOT",
            "The#SP#quick#SP#brown#SP#fox#NL#jumps#TAB#over#SP#the#SP#lazy#SP#dog",
        ];
        for text in texts {
            let data = chars(text);
            assert_eq!(lz78_decode(&lz78_encode(&data)).unwrap(), data, "{text}");
        }
    }

    proptest! {
        #[test]
        fn round_trip_any_bytes_test(data in prop::collection::vec(any::<u8>(), 0..2000)) {
            prop_assert_eq!(lz78_decode(&lz78_encode(&data)).unwrap(), data);
        }

        // A small alphabet gives long phrases and deep prefix chains
        #[test]
        fn round_trip_small_alphabet_test(data in prop::collection::vec(0_u8..3, 0..20_000)) {
            prop_assert_eq!(lz78_decode(&lz78_encode(&data)).unwrap(), data);
        }

        #[test]
        fn marked_text_round_trip_test(text in "[^#]{0,300}") {
            let marked: Vec<char> = mark(&text).chars().collect();
            let decoded: String = lz78_decode(&lz78_encode(&marked)).unwrap().into_iter().collect();
            prop_assert_eq!(unmark(&decoded), text);
        }

        #[test]
        fn dictionaries_always_match_test(data in prop::collection::vec(0_u8..6, 0..3000)) {
            let mut encoder = Lz78Encoder::new();
            let mut tokens: Vec<Token<u8>> = data.iter().filter_map(|&s| encoder.push(s)).collect();
            tokens.extend(encoder.finish());

            let mut decoder = Lz78Decoder::new();
            let mut out = vec![];
            for token in &tokens {
                decoder.push(token, &mut out).unwrap();
            }
            prop_assert_eq!(decoder.dict_len(), encoder.dict_len());
            prop_assert_eq!(out, data);
        }
    }

    #[test]
    fn dictionaries_match_test() {
        let data = chars("abracadabra#SP#abracadabra");
        let mut encoder = Lz78Encoder::new();
        let mut tokens: Vec<Token<char>> = data.iter().filter_map(|&s| encoder.push(s)).collect();
        tokens.extend(encoder.finish());

        let mut decoder = Lz78Decoder::new();
        let mut out = vec![];
        for token in &tokens {
            decoder.push(token, &mut out).unwrap();
        }
        assert_eq!(out, data);
        assert_eq!(decoder.dict_len(), encoder.dict_len());
    }

    #[test]
    fn empty_sentinel_test() {
        // (0, sentinel) contributes the empty phrase and registers nothing
        let tokens = vec![Token::new(0, None)];
        let mut decoder = Lz78Decoder::new();
        let mut out: Vec<char> = vec![];
        decoder.push(&tokens[0], &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(decoder.dict_len(), 0);
        assert!(lz78_decode(&tokens).unwrap().is_empty());
    }

    #[test]
    fn unknown_index_test() {
        let tokens = vec![Token::new(0, Some('a')), Token::new(2, Some('b'))];
        match lz78_decode(&tokens) {
            Err(CodecError::UnknownIndex {
                position,
                index,
                known,
            }) => {
                assert_eq!(position, 1);
                assert_eq!(index, 2);
                assert_eq!(known, 1);
            }
            other => panic!("expected UnknownIndex, got {:?}", other),
        }
    }

    #[test]
    fn self_reference_test() {
        // A token may not refer to the phrase it is about to create
        let tokens = vec![Token::new(1, Some('a'))];
        assert!(matches!(
            lz78_decode(&tokens),
            Err(CodecError::UnknownIndex { index: 1, .. })
        ));
    }
}
