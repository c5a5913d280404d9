use std::collections::BTreeMap;
use std::hash::Hash;

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs<S>(data: &[S]) -> FxHashMap<S, usize>
where
    S: Copy + Eq + Hash + Send + Sync,
{
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(|| FxHashMap::default(), |mut freqs, chunk| {
                chunk.iter().for_each(|&el| *freqs.entry(el).or_insert(0) += 1);
                freqs
            })
            .reduce(|| FxHashMap::default(), |mut s, f| {
                f.into_iter()
                    .for_each(|(sym, count)| *s.entry(sym).or_insert(0) += count);
                s
            })
    } else {
        let mut freqs = FxHashMap::default();
        data.iter()
            .for_each(|&el| *freqs.entry(el).or_insert(0) += 1);
        freqs
    }
}

/// Relative frequency of every distinct symbol seen in one input.
///
/// Probabilities are kept sorted by symbol so that iteration (and therefore tree building and
/// persistence) is the same on every run. The model is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel<S> {
    probs: BTreeMap<S, f64>,
}

impl<S: Copy + Ord + Hash + Send + Sync> ProbabilityModel<S> {
    /// Count each distinct symbol and divide by the input length. Empty input gives an empty model.
    pub fn estimate(symbols: &[S]) -> Self {
        let total = symbols.len() as f64;
        let probs: BTreeMap<S, f64> = freqs(symbols)
            .into_iter()
            .map(|(sym, count)| (sym, count as f64 / total))
            .collect();
        debug!(
            "Estimated {} distinct symbols over {} input symbols",
            probs.len(),
            symbols.len()
        );
        Self { probs }
    }
}

impl<S: Ord> ProbabilityModel<S> {
    /// Rebuild a model from persisted (symbol, probability) pairs. A repeated symbol keeps its last value.
    pub fn from_pairs<I: IntoIterator<Item = (S, f64)>>(pairs: I) -> Self {
        Self {
            probs: pairs.into_iter().collect(),
        }
    }

    #[cfg(test)]
    pub fn get(&self, symbol: &S) -> Option<f64> {
        self.probs.get(symbol).copied()
    }

    /// Iterate (symbol, probability) in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> + '_ {
        self.probs.iter().map(|(sym, p)| (sym, *p))
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}
