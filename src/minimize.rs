//! Revuz-style minimization of acyclic transducers (Component F).

use std::collections::HashMap;

use crate::digraph;
use crate::transducer::{StateId, Transducer};

/// Return the minimal transducer equivalent to `t`.
///
/// 1. Trim `t`. An empty result short-circuits to the empty transducer.
/// 2. Take a topological order of the trimmed transducer (guaranteed to
///    exist by acyclicity, I2).
/// 3. Visit states in **reverse** topological order, assigning each state a
///    representative: two states collapse to the same representative iff
///    they have the same `(rep[δ(q,0)], rep[δ(q,1)], λ(q,0), λ(q,1))`
///    signature, with children already canonicalized by the time their
///    parent is visited.
/// 4. Rewrite every transition to point at its target's representative.
/// 5. Trim again, discarding the now-unreachable duplicate states.
///
/// The signature map is a `HashMap` (expected-linear, not worst-case-linear
/// — a radix-sort variant per Revuz would be needed for the latter; see
/// `DESIGN.md`).
pub fn transducer_minimize(t: &Transducer) -> Transducer {
    let trimmed = t.trim();
    let Some(_) = trimmed.initial else {
        return Transducer::empty();
    };

    let g = trimmed.underlying_digraph();
    let topo_order =
        digraph::topological_order(&g).expect("a trim transducer's digraph is acyclic by I2");

    let n = trimmed.states.len();
    let mut representative: Vec<StateId> = (0..n).collect();
    type Signature = ([Option<StateId>; 2], [Option<usize>; 2]);
    let mut signature_to_representative: HashMap<Signature, StateId> = HashMap::new();

    for &id in topo_order.iter().rev() {
        let state = &trimmed.states[id];
        let signature: Signature = (
            [
                state.next_state[0].map(|c| representative[c]),
                state.next_state[1].map(|c| representative[c]),
            ],
            state.next_letter,
        );
        match signature_to_representative.get(&signature) {
            Some(&rep) => representative[id] = rep,
            None => {
                signature_to_representative.insert(signature, id);
            }
        }
    }

    let mut rewritten = trimmed.clone();
    for state in rewritten.states.iter_mut() {
        for a in 0..2 {
            if let Some(child) = state.next_state[a] {
                state.next_state[a] = Some(representative[child]);
            }
        }
    }

    rewritten.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval_transducer;
    use crate::isomorphism::{equivalent_transducers, transducer_isomorphism};

    #[test]
    fn test_minimize_empty() {
        assert_eq!(transducer_minimize(&Transducer::empty()), Transducer::empty());
    }

    #[test]
    fn test_minimize_empty_word() {
        let t = Transducer::empty_word();
        assert_eq!(transducer_minimize(&t), t);
    }

    #[test]
    fn test_scenario_1_size() {
        let w = [0, 1, 0, 2];
        let interval = interval_transducer(&w).unwrap();
        let minimal = transducer_minimize(&interval);
        assert_eq!(minimal.states.len(), 6);
        assert_eq!(minimal.traverse(&[0, 0, 0]), Some(vec![2, 1, 0]));
    }

    #[test]
    fn test_minimize_is_equivalence_preserving() {
        let w = [0, 1, 2, 1, 2, 2, 2, 1, 0, 1, 0, 2, 0, 1];
        let interval = interval_transducer(&w).unwrap();
        let minimal = transducer_minimize(&interval);
        assert!(equivalent_transducers(&interval, &minimal).unwrap());
        assert_eq!(minimal.connected_states().len(), minimal.states.len());
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let w = [0, 1, 0, 2];
        let interval = interval_transducer(&w).unwrap();
        let once = transducer_minimize(&interval);
        let twice = transducer_minimize(&once);
        assert!(transducer_isomorphism(&once, &twice).unwrap());
    }
}
