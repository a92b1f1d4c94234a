//! The interval transducer builder (Component D): a linear-time realization
//! of a word's free-band element, built from precomputed prefix/suffix
//! maximal content-`k` subword indices rather than the treelike builder's
//! direct recursion.

use std::collections::HashMap;

use crate::error::FreeBandError;
use crate::transducer::Transducer;
use crate::words::{self, Letter};

/// Build the interval transducer realizing the free-band element of `w`.
///
/// Each state corresponds to an **interval** `(i, j)`: a maximal content-`k`
/// subword `w[i..=j]` for some `k`. State `0` is always the sink (the
/// interval `(i, i)` collapsed to a single letter-emitting loop back to
/// itself); the initial state is the interval spanning the whole word.
/// Debug labels record each state's `(i+1, j+1)` (1-indexed, matching the
/// reference implementation's convention) except the sink, labeled `"0"`.
///
/// Returns the canonical empty-word transducer for `w = []` (see the
/// crate-level documentation of the empty word).
pub fn interval_transducer(w: &[Letter]) -> Result<Transducer, FreeBandError> {
    if w.is_empty() {
        return Ok(Transducer::empty_word());
    }

    let n = w.len();
    let size_cont = words::cont(w).len();
    let right: Vec<Vec<Option<usize>>> = (1..=size_cont).map(|k| words::compute_right(k, w)).collect();
    let left: Vec<Vec<Option<usize>>> = (1..=size_cont).map(|k| words::compute_left(k, w)).collect();

    let mut t = Transducer::empty();
    t.add_state([None, None], [None, None], true); // sink, state 0
    let mut labels = vec!["0".to_string()];

    // Maps an interval (i, j) to the id of the state realizing it.
    let mut interval_lookup: HashMap<(usize, usize), usize> = HashMap::new();

    let add_interval_state = |t: &mut Transducer,
                                   labels: &mut Vec<String>,
                                   lookup: &mut HashMap<(usize, usize), usize>,
                                   i: usize,
                                   j: usize,
                                   k: usize| {
        if lookup.contains_key(&(i, j)) {
            return;
        }
        let id = if k == 0 {
            t.add_state([Some(0), Some(0)], [Some(w[i]), Some(w[i])], false)
        } else {
            let rr = right[k - 1][i].expect("k-1 right interval must exist for a content-k pair");
            let ll = left[k - 1][j].expect("k-1 left interval must exist for a content-k pair");
            let left_child = lookup[&(i, rr)];
            let right_child = lookup[&(ll, j)];
            t.add_state(
                [Some(left_child), Some(right_child)],
                [Some(w[rr + 1]), Some(w[ll - 1])],
                false,
            )
        };
        lookup.insert((i, j), id);
        labels.push(format!("({}, {})", i + 1, j + 1));
    };

    for k in 0..size_cont {
        for (i, &maybe_j) in right[k].iter().enumerate() {
            if let Some(j) = maybe_j {
                add_interval_state(&mut t, &mut labels, &mut interval_lookup, i, j, k);
            }
        }
        for (j, &maybe_i) in left[k].iter().enumerate() {
            if let Some(i) = maybe_i {
                add_interval_state(&mut t, &mut labels, &mut interval_lookup, i, j, k);
            }
        }
    }

    let initial = interval_lookup[&(0, n - 1)];
    t.initial = Some(initial);
    t.label = Some(labels);
    t.validate()?;
    Ok(t)
}
