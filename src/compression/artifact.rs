//! Text formats of the two persisted artifacts, and where they live on disk.
//!
//! Huffman artifact:
//! ```text
//! <bit-string>
//! <symbol>: <probability>
//! <symbol>: <probability>
//! ...
//! ```
//! Symbols that would not survive a line-oriented file are escaped with the same markers the
//! whitespace transform uses (plus `#CR#` for a carriage return). Probabilities use the shortest
//! decimal that reads back as the same f64, so the decoder rebuilds the exact same tree.
//!
//! LZ78 artifact: tokens joined by `|`, each written as `<index>,<symbol>`. A comma symbol gives
//! the double comma form `<index>,,` and the final sentinel token is `<index>,` with no symbol.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CodecError, Result};
use crate::lz78::lz78::Token;
use crate::tools::freq_count::ProbabilityModel;
use crate::tools::whitespace::{NEWLINE_MARKER, SPACE_MARKER, TAB_MARKER};

/// Marker used for a carriage return in the probability table
pub const CR_MARKER: &str = "#CR#";

const TABLE_ESCAPES: [(char, &str); 4] = [
    (' ', SPACE_MARKER),
    ('\n', NEWLINE_MARKER),
    ('\t', TAB_MARKER),
    ('\r', CR_MARKER),
];

/// Separator between the symbol and the probability on a table line
const TABLE_SEPARATOR: &str = ": ";

/// Encoded bit-string plus the probability model needed to rebuild the tree
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanArtifact {
    pub bits: String,
    pub model: ProbabilityModel<char>,
}

impl HuffmanArtifact {
    /// Render the artifact: the bit-string line, then one line per symbol.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.bits.len() + self.model.len() * 24);
        out.push_str(&self.bits);
        for (sym, prob) in self.model.iter() {
            out.push('\n');
            push_table_symbol(&mut out, *sym);
            // Writing to a String cannot fail
            let _ = write!(out, "{}{}", TABLE_SEPARATOR, prob);
        }
        out
    }

    /// Parse an artifact written by `to_text`. Blank table lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let bits = lines.next().unwrap_or_default().to_string();
        if let Some((position, bit)) = bits.chars().enumerate().find(|(_, b)| *b != '0' && *b != '1')
        {
            return Err(CodecError::InvalidBit { bit, position });
        }

        let mut pairs = Vec::new();
        // The bit-string was line 1
        for (line_no, line) in lines.enumerate().map(|(i, l)| (i + 2, l)) {
            if line.trim().is_empty() {
                continue;
            }
            pairs.push(parse_table_line(line).ok_or_else(|| {
                CodecError::MalformedProbabilityLine {
                    line: line_no,
                    text: line.to_string(),
                }
            })?);
        }
        Ok(HuffmanArtifact {
            bits,
            model: ProbabilityModel::from_pairs(pairs),
        })
    }
}

fn push_table_symbol(out: &mut String, sym: char) {
    match TABLE_ESCAPES.iter().find(|(c, _)| *c == sym) {
        Some((_, marker)) => out.push_str(marker),
        None => out.push(sym),
    }
}

/// Split at the last separator, since the symbol itself may be ':' (the probability never holds one).
fn parse_table_line(line: &str) -> Option<(char, f64)> {
    let (sym_field, prob_field) = line.rsplit_once(TABLE_SEPARATOR)?;
    let sym = match TABLE_ESCAPES.iter().find(|(_, marker)| *marker == sym_field) {
        Some((c, _)) => *c,
        None => {
            let mut chars = sym_field.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return None,
            }
        }
    };
    let prob: f64 = prob_field.trim().parse().ok()?;
    if !(prob > 0.0 && prob <= 1.0) {
        return None;
    }
    Some((sym, prob))
}

/// The LZ78 token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lz78Artifact {
    pub tokens: Vec<Token<char>>,
}

impl Lz78Artifact {
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.tokens.len() * 4);
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push('|');
            }
            let _ = write!(out, "{},", token.index);
            if let Some(sym) = token.next {
                out.push(sym);
            }
        }
        out
    }

    /// Scan tokens left to right: index digits, a comma, then exactly one symbol character (any
    /// character, including ',' and '|') or the end of the text for the sentinel. Tokens are
    /// separated by a single '|'. A trailing separator is tolerated.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let (digits, after) = rest.split_at(digits_end);
            if digits.is_empty() {
                return Err(malformed(rest, "missing dictionary index"));
            }
            let index: usize = digits
                .parse()
                .map_err(|_| malformed(rest, "dictionary index out of range"))?;
            let after = after
                .strip_prefix(',')
                .ok_or_else(|| malformed(rest, "missing ',' after the index"))?;

            let mut chars = after.chars();
            let sym = match chars.next() {
                Some(sym) => sym,
                None => {
                    // Sentinel, only valid as the last token
                    tokens.push(Token::new(index, None));
                    break;
                }
            };
            tokens.push(Token::new(index, Some(sym)));

            let after_sym = chars.as_str();
            if after_sym.is_empty() {
                break;
            }
            rest = after_sym
                .strip_prefix('|')
                .ok_or_else(|| malformed(rest, "expected '|' after the symbol"))?;
        }
        Ok(Lz78Artifact { tokens })
    }
}

/// Build a MalformedToken error showing the start of the offending text
fn malformed(at: &str, reason: &'static str) -> CodecError {
    CodecError::MalformedToken {
        token: at.chars().take(24).collect(),
        reason,
    }
}

/// File names used for one named input inside the resource directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub input: PathBuf,
    pub huffman: PathBuf,
    pub lz78: PathBuf,
    pub decoded: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, name: &str) -> Self {
        ArtifactPaths {
            input: dir.join(format!("{}.txt", name)),
            huffman: dir.join(format!("{}-huffman.txt", name)),
            lz78: dir.join(format!("{}-lz78.txt", name)),
            decoded: dir.join(format!("{}-decoded.txt", name)),
        }
    }
}

/// Write text to a file, replacing anything already there. The handle is closed on return.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    let mut f_out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    f_out.write_all(text.as_bytes())?;
    f_out.flush()
}
