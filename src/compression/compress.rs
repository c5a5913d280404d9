use std::fs;

use log::{debug, info};

use super::artifact::{write_text, ArtifactPaths, HuffmanArtifact, Lz78Artifact};
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::{huf_encode, HuffmanTree};
use crate::huffman_coding::huffman_code_from_tree::{generate, max_code_len};
use crate::lz78::lz78::{lz78_encode, Token};
use crate::tools::cli::CodecOpts;
use crate::tools::freq_count::ProbabilityModel;
use crate::tools::whitespace::mark;

/*
    Both artifacts are built from the same marked text. They are two independent compressed
    versions of it, not a cascade: the Huffman stage never sees LZ78 tokens and vice versa.
*/

/// Mark whitespace, then Huffman encode and LZ78 encode the marked text.
pub fn encode_artifacts(text: &str) -> Result<(HuffmanArtifact, Lz78Artifact)> {
    let marked = mark(text);
    let symbols: Vec<char> = marked.chars().collect();
    if symbols.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    debug!(
        "Marked {} input chars into {} symbols",
        text.chars().count(),
        symbols.len()
    );

    // Huffman: model -> tree -> codes -> bit-string
    let model = ProbabilityModel::estimate(&symbols);
    let tree = HuffmanTree::build(&model)?;
    let codes = generate(&tree);
    let bits = huf_encode(&symbols, &codes)?;

    info!(
        "Huffman: {} symbols, {} distinct, longest code {} bits, {} bits total ({:.3} bits/symbol)",
        symbols.len(),
        tree.leaf_count(),
        max_code_len(&codes),
        bits.len(),
        bits.len() as f64 / symbols.len() as f64
    );

    // LZ78 works on the same marked symbols
    let tokens = lz78_encode(&symbols);
    info!(
        "LZ78: {} symbols into {} tokens ({:.3} symbols/token), {} dictionary phrases",
        symbols.len(),
        tokens.len(),
        symbols.len() as f64 / tokens.len() as f64,
        dictionary_size(&tokens)
    );

    Ok((HuffmanArtifact { bits, model }, Lz78Artifact { tokens }))
}

/// Phrases the decoder will register: one per token that carries a symbol
fn dictionary_size(tokens: &[Token<char>]) -> usize {
    tokens.iter().filter(|t| !t.is_sentinel()).count()
}

/// Encode the named input file in the resource directory defined in opts <CodecOpts>.
/// Both artifacts are fully built before either file is written.
pub fn encode_file(opts: &CodecOpts, name: &str) -> Result<ArtifactPaths> {
    let paths = ArtifactPaths::new(&opts.resource_dir, name);
    info!("Encoding {}", paths.input.display());

    let text = fs::read_to_string(&paths.input)?;
    let (huffman, lz78) = encode_artifacts(&text)?;

    write_text(&paths.huffman, &huffman.to_text())?;
    info!("Wrote {}", paths.huffman.display());
    write_text(&paths.lz78, &lz78.to_text())?;
    info!("Wrote {}", paths.lz78.display());

    Ok(paths)
}
