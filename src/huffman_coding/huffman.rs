use log::{debug, trace};

use super::huffman_code_from_tree::CodeTable;
use crate::error::{CodecError, Result};
use crate::tools::freq_count::ProbabilityModel;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::Debug;

#[derive(PartialEq, Debug, Clone)]
pub enum NodeData<S> {
    /// Arena indices of the left (0) and right (1) children
    Kids(usize, usize),
    Leaf(S),
}
#[derive(PartialEq, Debug, Clone)]
pub struct Node<S> {
    pub weight: f64,
    pub node_data: NodeData<S>,
}
impl<S> Node<S> {
    /// Create a new node
    pub fn new(weight: f64, node_data: NodeData<S>) -> Node<S> {
        Node { weight, node_data }
    }
}

/// Secondary sort key for nodes of equal weight. Leaves sort before merged nodes, leaves by
/// symbol, merged nodes by the order they were created in.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
enum TieBreak<S> {
    Leaf(S),
    Merged(usize),
}

/// A node waiting in the min-heap during tree construction
#[derive(Debug)]
struct Candidate<S> {
    weight: f64,
    tie: TieBreak<S>,
    node: usize,
}
impl<S: Ord> Ord for Candidate<S> {
    /// Sort by increasing weight, then by the tie-break key
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.tie.cmp(&other.tie))
    }
}
impl<S: Ord> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<S: Ord> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<S: Ord> Eq for Candidate<S> {}

/// Huffman tree stored as an arena. Children are referred to by index, the root is the last
/// node created.
#[derive(PartialEq, Debug, Clone)]
pub struct HuffmanTree<S> {
    nodes: Vec<Node<S>>,
    root: usize,
}

impl<S: Copy + Ord + Debug> HuffmanTree<S> {
    /// Build the tree from a probability model by repeatedly merging the two lightest nodes.
    /// The first node taken off the heap becomes the left child.
    pub fn build(model: &ProbabilityModel<S>) -> Result<Self> {
        if model.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        // A full binary tree with n leaves has 2n - 1 nodes
        let mut nodes: Vec<Node<S>> = Vec::with_capacity(model.len() * 2 - 1);
        let mut heap = BinaryHeap::with_capacity(model.len());

        // One leaf per symbol
        for (&sym, weight) in model.iter() {
            heap.push(Reverse(Candidate {
                weight,
                tie: TieBreak::Leaf(sym),
                node: nodes.len(),
            }));
            nodes.push(Node::new(weight, NodeData::Leaf(sym)));
        }

        // ...then pare it down to one single node with child nodes.
        while heap.len() > 1 {
            if let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) {
                let weight = left.weight + right.weight;
                let idx = nodes.len();
                trace!(
                    "Merging {:?} ({}) and {:?} ({}) into node {}",
                    left.tie,
                    left.weight,
                    right.tie,
                    right.weight,
                    idx
                );
                nodes.push(Node::new(weight, NodeData::Kids(left.node, right.node)));
                heap.push(Reverse(Candidate {
                    weight,
                    tie: TieBreak::Merged(idx),
                    node: idx,
                }));
            }
        }

        let root = heap
            .pop()
            .map(|Reverse(c)| c.node)
            .ok_or(CodecError::EmptyInput)?;
        debug!(
            "Built huffman tree with {} nodes from {} symbols",
            nodes.len(),
            model.len()
        );
        Ok(HuffmanTree { nodes, root })
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> usize {
        self.root
    }

    /// Get a node by its arena index
    pub fn node(&self, idx: usize) -> &Node<S> {
        &self.nodes[idx]
    }

    /// Total number of nodes, leaves and merged nodes together
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, i.e. distinct symbols
    pub fn leaf_count(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }
}

/// Encode a symbol sequence by concatenating the code of every symbol.
pub fn huf_encode<S: Ord + Debug>(symbols: &[S], codes: &CodeTable<S>) -> Result<String> {
    // Most codes are short; start with a guess of two bits per symbol
    let mut out = String::with_capacity(symbols.len() * 2);
    for sym in symbols {
        let code = codes
            .get(sym)
            .ok_or_else(|| CodecError::UnknownSymbol(format!("{:?}", sym)))?;
        out.push_str(code);
    }
    debug!("Encoded {} symbols into {} bits", symbols.len(), out.len());
    Ok(out)
}

/// Decode a bit-string by walking the tree one bit at a time, emitting a symbol at each leaf.
pub fn huf_decode<S: Copy>(bits: &str, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let root = tree.root();
    let mut out = Vec::with_capacity(bits.len() / 2);

    // A single symbol alphabet has a leaf for the root and the code "0"
    if let NodeData::Leaf(sym) = tree.node(root).node_data {
        for (position, bit) in bits.chars().enumerate() {
            if bit != '0' {
                return Err(CodecError::InvalidBit { bit, position });
            }
            out.push(sym);
        }
        return Ok(out);
    }

    // Otherwise the current node is always a merged node, we reset to the root at every leaf.
    let mut current = root;
    let mut consumed = 0;
    for (position, bit) in bits.chars().enumerate() {
        let next = match (bit, &tree.node(current).node_data) {
            ('0', NodeData::Kids(left, _)) => *left,
            ('1', NodeData::Kids(_, right)) => *right,
            _ => return Err(CodecError::InvalidBit { bit, position }),
        };
        consumed += 1;
        match tree.node(next).node_data {
            NodeData::Leaf(sym) => {
                out.push(sym);
                current = root;
            }
            NodeData::Kids(..) => current = next,
        }
    }

    if current != root {
        return Err(CodecError::TruncatedStream { consumed });
    }
    debug!("Decoded {} bits into {} symbols", consumed, out.len());
    Ok(out)
}
