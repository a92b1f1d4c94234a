//! Isomorphism testing between trim transducers (Component G).

use std::collections::HashMap;

use crate::error::FreeBandError;
use crate::transducer::{StateId, Transducer};

/// Decide whether `t1` and `t2` are isomorphic as transducers: a bijection
/// between their state sets carrying `t1`'s initial state to `t2`'s, every
/// terminal flag to the same flag, and every transition to the
/// correspondingly-labeled transition.
///
/// Both inputs must be trim (I3): `t.connected_states().len() == t.states.len()`.
/// Violating this is a precondition failure, not a structural one — the
/// function raises [`FreeBandError::Precondition`] rather than returning
/// `Ok(false)`, since a non-trim input signals caller error rather than a
/// genuine non-isomorphism question.
///
/// Two empty transducers are (trivially) isomorphic. Differing state counts
/// short-circuit to `false` without running the bijection search.
pub fn transducer_isomorphism(t1: &Transducer, t2: &Transducer) -> Result<bool, FreeBandError> {
    require_trim(t1)?;
    require_trim(t2)?;

    if t1.states.is_empty() && t2.states.is_empty() {
        return Ok(true);
    }
    if t1.states.len() != t2.states.len() {
        return Ok(false);
    }
    let (Some(init1), Some(init2)) = (t1.initial, t2.initial) else {
        return Ok(false);
    };

    let mut map_1_to_2: HashMap<StateId, StateId> = HashMap::new();
    let mut map_2_to_1: HashMap<StateId, StateId> = HashMap::new();
    let mut queue = vec![(init1, init2)];
    map_1_to_2.insert(init1, init2);
    map_2_to_1.insert(init2, init1);

    let mut i = 0;
    while i < queue.len() {
        let (q1, q2) = queue[i];
        i += 1;

        if t1.terminal[q1] != t2.terminal[q2] {
            return Ok(false);
        }

        for a in 0..2 {
            let s1 = t1.states[q1].next_state[a];
            let s2 = t2.states[q2].next_state[a];
            if t1.states[q1].next_letter[a] != t2.states[q2].next_letter[a] {
                return Ok(false);
            }
            match (s1, s2) {
                (None, None) => {}
                (Some(c1), Some(c2)) => match (map_1_to_2.get(&c1), map_2_to_1.get(&c2)) {
                    (Some(&mapped2), Some(&mapped1)) => {
                        if mapped2 != c2 || mapped1 != c1 {
                            return Ok(false);
                        }
                    }
                    (None, None) => {
                        map_1_to_2.insert(c1, c2);
                        map_2_to_1.insert(c2, c1);
                        queue.push((c1, c2));
                    }
                    _ => return Ok(false),
                },
                _ => return Ok(false),
            }
        }
    }

    // Since both inputs are trim, full coverage of the BFS queue implies full
    // coverage of the state set; a shortfall here would mean the two
    // transducers disagree on reachability despite both being trim.
    Ok(map_1_to_2.len() == t1.states.len())
}

fn require_trim(t: &Transducer) -> Result<(), FreeBandError> {
    if t.connected_states().len() != t.states.len() {
        return Err(FreeBandError::precondition(
            "transducer_isomorphism requires both inputs to be trim",
        ));
    }
    Ok(())
}

/// Decide whether `t1` and `t2` are equivalent as transducers: minimize both
/// and test the results for isomorphism. Two transducers are equivalent iff
/// they realize the same free-band element, irrespective of internal
/// structure; the crate-level [`crate::equal_in_free_band`] is the
/// word-level counterpart of this function.
pub fn equivalent_transducers(t1: &Transducer, t2: &Transducer) -> Result<bool, FreeBandError> {
    let m1 = crate::minimize::transducer_minimize(t1);
    let m2 = crate::minimize::transducer_minimize(t2);
    transducer_isomorphism(&m1, &m2)
}
