//! The treelike transducer builder (Component E): a direct recursive
//! realization of a word's free-band element, used only as a correctness
//! oracle against the interval builder.

use crate::error::FreeBandError;
use crate::transducer::{State, Transducer};
use crate::words::{self, Letter};

/// Build the treelike transducer realizing the free-band element of `w`.
///
/// For non-empty `w`, with `(pref, ltof) = pref_ltof(w)` and
/// `(suff, ftol) = suff_ftol(w)`, the result is a new root state with
/// `δ = (root(treelike(pref)), root(treelike(suff)))`,
/// `λ = (ltof, ftol)`, concatenated with the (relocated) states of the two
/// child transducers. The empty word maps to the same canonical
/// empty-word transducer used by [`crate::interval::interval_transducer`].
///
/// Recurses on `w.len()`; guarded with explicit stack growth since `w` may
/// be long enough to overflow the default stack.
pub fn treelike_transducer(w: &[Letter]) -> Result<Transducer, FreeBandError> {
    let t = stacker::maybe_grow(32 * 1024, 1024 * 1024, || build(w));
    t.validate()?;
    Ok(t)
}

fn build(w: &[Letter]) -> Transducer {
    if w.is_empty() {
        return Transducer::empty_word();
    }

    let (pref, ltof) = words::pref_ltof(w).expect("non-empty word has a defined pref_ltof");
    let (suff, ftol) = words::suff_ftol(w).expect("non-empty word has a defined suff_ftol");

    let pref_t = stacker::maybe_grow(32 * 1024, 1024 * 1024, || build(&pref));
    let suff_t = stacker::maybe_grow(32 * 1024, 1024 * 1024, || build(&suff));

    let pref_initial = pref_t.initial.expect("treelike transducers always have an initial state");
    let suff_initial = suff_t.initial.expect("treelike transducers always have an initial state");
    let pref_len = pref_t.states.len();

    // Root is state 0; pref's states are offset by 1, suff's by 1+pref_len.
    let mut states = Vec::with_capacity(1 + pref_t.states.len() + suff_t.states.len());
    states.push(State::new(
        [Some(pref_initial + 1), Some(suff_initial + 1 + pref_len)],
        [Some(ltof), Some(ftol)],
    ));
    states.extend(pref_t.states.into_iter().map(|s| offset_state(s, 1)));
    states.extend(
        suff_t
            .states
            .into_iter()
            .map(|s| offset_state(s, 1 + pref_len)),
    );

    let mut terminal = vec![false];
    terminal.extend(pref_t.terminal);
    terminal.extend(suff_t.terminal);

    Transducer {
        initial: Some(0),
        states,
        terminal,
        label: None,
    }
}

fn offset_state(s: State, by: usize) -> State {
    State::new(
        [
            s.next_state[0].map(|x| x + by),
            s.next_state[1].map(|x| x + by),
        ],
        s.next_letter,
    )
}
