//! This helper is part of the huffman encoding system.
//!
//! It walks a finished huffman tree and records, for every leaf, the path from the root: a '0' for
//! each step to a left child and a '1' for each step to a right child. Codes only ever end at
//! leaves, so no code is a prefix of another.
//!
//! The walk uses an explicit stack rather than recursion so that very lopsided trees (one leaf per
//! level) cannot exhaust the call stack.

use std::collections::BTreeMap;

use log::trace;

use super::huffman::{HuffmanTree, NodeData};

/// Code for every symbol, as a string of '0' and '1' characters
pub type CodeTable<S> = BTreeMap<S, String>;

/// Walk the tree depth first and return the code of every leaf.
pub fn generate<S: Copy + Ord>(tree: &HuffmanTree<S>) -> CodeTable<S> {
    let mut codes = BTreeMap::new();
    let mut stack = vec![(tree.root(), String::new())];

    while let Some((idx, prefix)) = stack.pop() {
        match &tree.node(idx).node_data {
            NodeData::Kids(left, right) => {
                let mut right_code = prefix.clone();
                right_code.push('1');
                let mut left_code = prefix;
                left_code.push('0');
                // Push right first so the left branch is walked first
                stack.push((*right, right_code));
                stack.push((*left, left_code));
            }
            NodeData::Leaf(sym) => {
                // A lone root leaf would get an empty code, which we could never decode
                let code = if prefix.is_empty() {
                    "0".to_string()
                } else {
                    prefix
                };
                codes.insert(*sym, code);
            }
        }
    }
    trace!("Generated {} codes", codes.len());
    codes
}

/// Length in bits of the longest code, the depth of the tree.
pub fn max_code_len<S>(codes: &CodeTable<S>) -> usize {
    codes.values().map(String::len).max().unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::ProbabilityModel;
    use proptest::prelude::*;

    fn is_prefix_free(codes: &CodeTable<char>) -> bool {
        // Compare by symbol so two equal codes also fail
        codes.iter().all(|(sym_a, a)| {
            codes
                .iter()
                .filter(|(sym_b, _)| *sym_b != sym_a)
                .all(|(_, b)| !b.starts_with(a.as_str()))
        })
    }

    #[test]
    fn generate_test() {
        let model = ProbabilityModel::from_pairs(vec![('a', 0.5), ('b', 0.25), ('c', 0.25)]);
        let codes = generate(&HuffmanTree::build(&model).unwrap());
        assert_eq!(codes.len(), 3);
        assert_eq!(codes[&'a'], "0");
        assert_eq!(codes[&'b'], "10");
        assert_eq!(codes[&'c'], "11");
        assert_eq!(max_code_len(&codes), 2);
    }

    #[test]
    fn prefix_free_test() {
        let texts = [
            "abracadabra",
            "ab#SP#ab",
            "The#SP#quick#SP#brown#SP#fox#NL#jumps#SP#over#SP#the#SP#lazy#SP#dog.",
            "aaaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbccccccddde",
        ];
        for text in texts {
            let data: Vec<char> = text.chars().collect();
            let model = ProbabilityModel::estimate(&data);
            let codes = generate(&HuffmanTree::build(&model).unwrap());
            assert_eq!(codes.len(), model.len());
            assert!(is_prefix_free(&codes), "codes for {text} are not prefix free");
        }
    }

    #[test]
    fn lopsided_tree_test() {
        // Doubling weights give one leaf per level
        let pairs: Vec<(char, f64)> = (0..40_u32)
            .map(|i| (char::from_u32('A' as u32 + i).unwrap(), 2_f64.powi(i as i32)))
            .collect();
        let codes = generate(&HuffmanTree::build(&ProbabilityModel::from_pairs(pairs)).unwrap());
        assert_eq!(codes.len(), 40);
        assert_eq!(max_code_len(&codes), 39);
        assert!(is_prefix_free(&codes));
    }

    #[test]
    fn single_leaf_test() {
        let model = ProbabilityModel::from_pairs(vec![('x', 1.0)]);
        let codes = generate(&HuffmanTree::build(&model).unwrap());
        assert_eq!(codes[&'x'], "0");
    }

    proptest! {
        #[test]
        fn prefix_free_any_model_test(
            probs in prop::collection::btree_map(any::<char>(), 1e-9_f64..1.0, 1..120)
        ) {
            let model = ProbabilityModel::from_pairs(probs);
            let codes = generate(&HuffmanTree::build(&model).unwrap());
            prop_assert_eq!(codes.len(), model.len());
            prop_assert!(codes.values().all(|code| !code.is_empty()));
            prop_assert!(is_prefix_free(&codes));
        }
    }
}
