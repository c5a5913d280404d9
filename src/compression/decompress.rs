use std::fs;

use log::{debug, info, warn};

use super::artifact::{write_text, ArtifactPaths, HuffmanArtifact, Lz78Artifact};
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::{huf_decode, HuffmanTree};
use crate::lz78::lz78_decode::lz78_decode;
use crate::tools::cli::CodecOpts;
use crate::tools::whitespace::unmark;

/// Recover the original text from both artifacts.
///
/// The LZ78 tokens give the text that is returned. The Huffman bit-string is decoded as well and
/// checked against it: decode errors on either side abort, a mismatch is only reported.
pub fn decode_artifacts(huffman: &HuffmanArtifact, lz78: &Lz78Artifact) -> Result<String> {
    let marked: String = lz78_decode(&lz78.tokens)?.into_iter().collect();

    let tree = HuffmanTree::build(&huffman.model)?;
    let huffman_marked: String = huf_decode(&huffman.bits, &tree)?.into_iter().collect();
    if huffman_marked == marked {
        debug!("Huffman and LZ78 decodes agree ({} symbols)", marked.chars().count());
    } else {
        warn!(
            "Huffman decode ({} symbols) differs from LZ78 decode ({} symbols). Using LZ78.",
            huffman_marked.chars().count(),
            marked.chars().count()
        );
    }

    Ok(unmark(&marked))
}

/// Decode the artifacts for the named file in the resource directory defined in opts <CodecOpts>
/// and write the restored text. Nothing is written unless every step succeeds.
pub fn decode_file(opts: &CodecOpts, name: &str) -> Result<ArtifactPaths> {
    let paths = ArtifactPaths::new(&opts.resource_dir, name);

    // Look for both artifacts before reading either
    for path in [&paths.lz78, &paths.huffman] {
        if !path.is_file() {
            return Err(CodecError::MissingArtifact(path.clone()));
        }
    }

    let lz78 = Lz78Artifact::parse(&fs::read_to_string(&paths.lz78)?)?;
    info!(
        "Read {} LZ78 tokens from {}",
        lz78.tokens.len(),
        paths.lz78.display()
    );
    let huffman = HuffmanArtifact::parse(&fs::read_to_string(&paths.huffman)?)?;
    info!(
        "Read {} bits and {} probabilities from {}",
        huffman.bits.len(),
        huffman.model.len(),
        paths.huffman.display()
    );

    let text = decode_artifacts(&huffman, &lz78)?;
    write_text(&paths.decoded, &text)?;
    info!("Wrote {}", paths.decoded.display());

    Ok(paths)
}
