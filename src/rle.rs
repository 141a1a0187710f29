//! Run-length encoding of 1-D sequences and the longest-run search built on it.

use crate::types::Span;

/// A maximal stretch of equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<T> {
    pub length: usize,
    pub start: usize,
    pub value: T,
}

/// Run-length encoding as three parallel vectors.
///
/// `positions` is strictly increasing from 0, `lengths` sums to the length of
/// the encoded sequence, and `values[i]` is the value repeated over run `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runs<T> {
    pub lengths: Vec<usize>,
    pub positions: Vec<usize>,
    pub values: Vec<T>,
}

impl<T> Runs<T> {
    /// Number of runs.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Iterate runs in position order.
    pub fn iter(&self) -> impl Iterator<Item = Run<&T>> + '_ {
        self.lengths
            .iter()
            .zip(&self.positions)
            .zip(&self.values)
            .map(|((&length, &start), value)| Run {
                length,
                start,
                value,
            })
    }

    /// Expand back into the original sequence.
    pub fn decode(&self) -> Vec<T>
    where
        T: Clone,
    {
        let total = self.lengths.iter().sum();
        let mut out = Vec::with_capacity(total);
        for run in self.iter() {
            out.extend(std::iter::repeat(run.value.clone()).take(run.length));
        }
        out
    }
}

/// Encode `seq` into runs. Returns `None` for an empty sequence.
pub fn encode<T: PartialEq + Clone>(seq: &[T]) -> Option<Runs<T>> {
    let first = seq.first()?;

    let mut lengths = Vec::new();
    let mut positions = vec![0];
    let mut values = vec![first.clone()];

    for (i, pair) in seq.windows(2).enumerate() {
        if pair[1] != pair[0] {
            let start = i + 1;
            lengths.push(start - positions[positions.len() - 1]);
            positions.push(start);
            values.push(pair[1].clone());
        }
    }
    lengths.push(seq.len() - positions[positions.len() - 1]);

    Some(Runs {
        lengths,
        positions,
        values,
    })
}

/// Locate the longest run of 1s in a binary sequence as a half-open span.
///
/// Ties go to the earliest run. With no 1s at all (or an empty input) the
/// result is the zero-length span at position 0.
pub fn longest_run(seq: &[u8]) -> Span {
    let Some(runs) = encode(seq) else {
        return Span::default();
    };

    let mut longest = 0;
    let mut start = 0;
    for run in runs.iter().filter(|run| *run.value == 1) {
        if run.length > longest {
            longest = run.length;
            start = run.start;
        }
    }

    Span::new(start, start + longest)
}
