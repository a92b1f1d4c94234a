//! Short-lex minimal word recovery from a minimized transducer (Component I).
//!
//! Ported from the three-case recursion of `freebandlib.minword` (Lemma 5.3
//! / the `MinWord` algorithm): rather than re-deriving the bookkeeping from
//! the prose description, the per-state cache `B` and the offset `l` are
//! transcribed directly from the reference implementation, since getting
//! the arithmetic subtly wrong is easy and the reference is exact.

use crate::error::FreeBandError;
use crate::minimize::transducer_minimize;
use crate::transducer::{transducer_cont, StateId, Transducer};
use crate::words::Word;

/// The case of Lemma 5.3 applying at a state, with its associated spine
/// length where relevant (Case II).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    /// `λ(q,0) == λ(q,1)`: both letters coincide, so one suffices.
    I,
    /// The two single-step spines out of `q` rejoin after `steps` steps.
    Ii(usize),
    /// Neither side above rejoins before one of them terminates.
    Iii,
}

/// Classify state `q`: whether its two children's outward spines (the
/// 1-spine from `δ(q,0)`, the 0-spine from `δ(q,1)`) rejoin at a common
/// state within `N = |transducer_cont(q, t)|` steps (Case II), coincide
/// immediately because `λ(q,0) == λ(q,1)` (Case I), or never rejoin before
/// one side reaches a terminal state (Case III).
///
/// Only ever called on non-terminal `q` (the caller short-circuits terminal
/// states via the `B` cache before reaching this), so `q`'s own two
/// transitions are guaranteed defined by construction of interval/minimal
/// transducers. A transition that goes missing partway along either spine is
/// treated the same as reaching a terminal state: there's nothing further to
/// rejoin on.
fn classify_case(t: &Transducer, q: StateId) -> Case {
    let n = transducer_cont(q, t).len();
    let state = &t.states[q];
    if state.next_letter[0] == state.next_letter[1] {
        return Case::I;
    }

    let mut u = state.next_state[0];
    let mut v = state.next_state[1];
    for k in 0..n {
        let (Some(uu), Some(vv)) = (u, v) else {
            return Case::Iii;
        };
        let u_state = &t.states[uu];
        let v_state = &t.states[vv];
        if u_state.next_letter[1] == state.next_letter[1]
            && v_state.next_letter[0] == state.next_letter[0]
            && u_state.next_state[1] == v_state.next_state[0]
        {
            return Case::Ii(k + 1);
        }
        u = u_state.next_state[1];
        v = v_state.next_state[0];
        let terminal_u = u.map(|s| t.terminal[s]).unwrap_or(true);
        let terminal_v = v.map(|s| t.terminal[s]).unwrap_or(true);
        if terminal_u || terminal_v {
            return Case::Iii;
        }
    }
    unreachable!("classify_case must resolve within N steps (Lemma 5.3)")
}

/// `B[q]` records the already-built span of the output word contributed by
/// `q`: `Some((0, _))` is the empty-word sentinel, `Some((i, j))` with
/// `i >= 1` means the recorded result is `w[i-1 ..= j-1]` once the caller's
/// offset `l` is folded in (see [`walk`]).
type Cache = Vec<Option<(usize, usize)>>;

/// Recompute (or replay, via `cache`) the short-lex least word contributed
/// by state `q`, appending it to `w`. `l` is how far back into `w` a cached
/// hit for `q` should be read from — it is threaded through rather than
/// derived from `w` alone because the same state can be reached from
/// multiple call sites with different amounts of already-built word behind
/// it.
fn walk(t: &Transducer, q: StateId, w: &mut Word, l: usize, cache: &mut Cache) {
    let entry_len = w.len();
    let s = entry_len as isize - l as isize + 1;

    if let Some((i, j)) = cache[q] {
        if i == 0 || j == 0 {
            return;
        }
        let slice = w[(i + l - 1)..j].to_vec();
        w.extend(slice);
        return;
    }

    let zero_child = t.states[q].next_state[0]
        .expect("non-terminal states in a minimal transducer always define both transitions");
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || walk(t, zero_child, w, l, cache));

    let next_l = match classify_case(t, q) {
        Case::I => {
            w.push(t.states[q].next_letter[0].expect("Case I requires λ(q,0) defined"));
            0
        }
        Case::Ii(steps) => {
            let mut r = zero_child;
            for _ in 0..steps {
                r = t.states[r].next_state[1]
                    .expect("Case II's 1-spine stays defined for `steps` steps by construction");
            }
            match cache[r] {
                Some((i, j)) if i != 0 && j != 0 && j >= i => j - i + 1,
                _ => 0,
            }
        }
        Case::Iii => {
            w.push(t.states[q].next_letter[0].expect("Case III requires λ(q,0) defined"));
            w.push(t.states[q].next_letter[1].expect("Case III requires λ(q,1) defined"));
            0
        }
    };

    let one_child = t.states[q].next_state[1]
        .expect("non-terminal states in a minimal transducer always define both transitions");
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
        walk(t, one_child, w, next_l, cache)
    });

    cache[q] = Some((s.max(0) as usize, w.len()));
}

/// Recover the short-lex least word equal (in the free band) to the element
/// realized by the minimized transducer `t`.
///
/// **Short-lex order**: shorter words precede longer ones; words of equal
/// length compare lexicographically on their integer letters.
///
/// `t` must already be minimized — checked by re-minimizing and comparing
/// state counts, rather than merely assumed, per this crate's precondition
/// convention (§7).
pub fn min_word(t: &Transducer) -> Result<Word, FreeBandError> {
    let Some(initial) = t.initial else {
        return Err(FreeBandError::precondition(
            "min_word requires a transducer with an initial state",
        ));
    };
    if transducer_minimize(t).states.len() != t.states.len() {
        return Err(FreeBandError::precondition(
            "min_word requires an already-minimized transducer",
        ));
    }

    let mut cache: Cache = vec![None; t.states.len()];
    for (id, &is_terminal) in t.terminal.iter().enumerate() {
        if is_terminal {
            cache[id] = Some((0, 0));
        }
    }

    let mut w = Word::new();
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
        walk(t, initial, &mut w, 0, &mut cache)
    });
    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval_transducer;
    use crate::isomorphism::equivalent_transducers;
    use crate::minimize::transducer_minimize;

    #[test]
    fn test_min_word_rejects_non_minimal() {
        let interval = interval_transducer(&[0, 1, 0, 2]).unwrap();
        let err = min_word(&interval).unwrap_err();
        assert!(matches!(err, FreeBandError::Precondition(_)));
    }

    #[test]
    fn test_min_word_rejects_empty_transducer() {
        let err = min_word(&Transducer::empty()).unwrap_err();
        assert!(matches!(err, FreeBandError::Precondition(_)));
    }

    #[test]
    fn test_min_word_empty_word() {
        let t = Transducer::empty_word();
        assert_eq!(min_word(&t).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_min_word_scenario_1() {
        let w = [0, 1, 0, 2];
        let minimal = transducer_minimize(&interval_transducer(&w).unwrap());
        assert_eq!(min_word(&minimal).unwrap(), vec![0, 1, 0, 2]);
    }

    #[test]
    fn test_min_word_single_letter() {
        let minimal = transducer_minimize(&interval_transducer(&[5]).unwrap());
        assert_eq!(min_word(&minimal).unwrap(), vec![5]);
    }

    #[test]
    fn test_min_word_idempotent_word_collapses() {
        // w ++ w is equal in the free band to w; its minimal transducer's
        // min_word must be the shorter representative.
        let w = [0, 1, 2];
        let doubled: Vec<usize> = w.iter().chain(w.iter()).copied().collect();
        let minimal = transducer_minimize(&interval_transducer(&doubled).unwrap());
        assert_eq!(min_word(&minimal).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_min_word_roundtrip() {
        let w = [0, 1, 2, 1, 2, 2, 2, 1, 0, 1, 0, 2, 0, 1];
        let minimal = transducer_minimize(&interval_transducer(&w).unwrap());
        let word = min_word(&minimal).unwrap();
        let reminimal = transducer_minimize(&interval_transducer(&word).unwrap());
        assert!(equivalent_transducers(&minimal, &reminimal).unwrap());
        let word_again = min_word(&reminimal).unwrap();
        assert_eq!(word, word_again);
    }
}
