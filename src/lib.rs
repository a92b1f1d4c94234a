#![deny(warnings)]
//! Reference algorithms for the **free band** FB(A): the free algebraic
//! structure on a finite alphabet `A` in which repeated concatenation is
//! idempotent (`xx = x`). Elements of FB(A) are represented here by small
//! deterministic acyclic **synchronous 2-input transducers**, fixed to input
//! alphabet `{0, 1}` and output alphabet a finite prefix of the naturals.
//!
//! The crate is organized leaf-first, matching the dependency order of the
//! algorithms:
//!
//! - [`digraph`] — bare adjacency-list reachability/reversal/topological sort.
//! - [`words`] — content, `pref_ltof`/`suff_ftol`, the `compute_right`/
//!   `compute_left` precomputation.
//! - [`transducer`] — the data model: states, validation, traversal, trim.
//! - [`interval`] / [`treelike`] — two constructions of a word's realizing
//!   transducer (the latter a correctness oracle for the former).
//! - [`minimize`] — Revuz-style state collapse to the canonical minimal form.
//! - [`isomorphism`] — the equality test between minimized transducers.
//! - [`multiply`] — transducer product, realizing free-band concatenation.
//! - [`minword`] — recovery of the short-lex least word from a minimal
//!   transducer.
//!
//! The functions re-exported at the crate root mirror the external interface
//! of the reference specification; see `DESIGN.md` for how each module is
//! grounded against the reference implementation this crate was adapted
//! from.

pub mod digraph;
pub mod error;
pub mod interval;
pub mod isomorphism;
pub mod minimize;
pub mod minword;
pub mod multiply;
pub mod transducer;
pub mod treelike;
pub mod words;

pub use error::FreeBandError;
pub use transducer::{InputLetter, State, StateId, Transducer};
pub use words::{Letter, Word};

use std::collections::BTreeSet;

/// Build the interval transducer realizing the free-band element of `w`
/// (linear-time construction from precomputed prefix/suffix maximal
/// content-`k` subword indices). Returns the canonical empty-word transducer
/// for `w = []`.
pub fn interval_transducer(w: &[Letter]) -> Result<Transducer, FreeBandError> {
    interval::interval_transducer(w)
}

/// Build the treelike transducer realizing the free-band element of `w`: a
/// direct recursive construction used in this crate's own test suite as a
/// correctness oracle against [`interval_transducer`], not for production
/// use (it is larger and has no efficiency advantage).
pub fn treelike_transducer(w: &[Letter]) -> Result<Transducer, FreeBandError> {
    treelike::treelike_transducer(w)
}

/// Build the minimal transducer realizing the free-band element of `w`:
/// `transducer_minimize(interval_transducer(w))`.
pub fn minimal_transducer(w: &[Letter]) -> Result<Transducer, FreeBandError> {
    Ok(minimize::transducer_minimize(&interval_transducer(w)?))
}

/// Revuz-minimize `t`: collapse states with identical behavior and drop the
/// states that become unreachable as a result. Accepts any transducer,
/// trimmed or not.
pub fn transducer_minimize(t: &Transducer) -> Transducer {
    minimize::transducer_minimize(t)
}

/// Remove every state of `t` not lying on some initial-to-terminal path.
pub fn transducer_trim(t: &Transducer) -> Transducer {
    t.trim()
}

/// Decide whether trim transducers `t1` and `t2` are isomorphic: related by
/// a state bijection preserving the initial state, terminal flags,
/// transitions, and output labels. Fails with
/// [`FreeBandError::Precondition`] if either input is not trim.
pub fn transducer_isomorphism(t1: &Transducer, t2: &Transducer) -> Result<bool, FreeBandError> {
    isomorphism::transducer_isomorphism(t1, t2)
}

/// Decide whether `t1` and `t2` realize the same free-band element,
/// irrespective of internal structure: minimize both, then test the results
/// for isomorphism.
pub fn equivalent_transducers(t1: &Transducer, t2: &Transducer) -> Result<bool, FreeBandError> {
    isomorphism::equivalent_transducers(t1, t2)
}

/// Decide whether two words determine the same member of the free band:
/// build each word's minimal transducer and test those for isomorphism.
/// This is the equality test for free-band elements.
pub fn equal_in_free_band(w1: &[Letter], w2: &[Letter]) -> Result<bool, FreeBandError> {
    equivalent_transducers(&minimal_transducer(w1)?, &minimal_transducer(w2)?)
}

/// Build a transducer realizing the concatenation `xy` of the free-band
/// elements realized by `x` and `y`. Never fails; the result retains every
/// copied state and every grid-crossing state regardless of reachability —
/// callers wanting a trim result should call [`transducer_trim`] on it.
pub fn multiply(x: &Transducer, y: &Transducer) -> Transducer {
    multiply::multiply(x, y)
}

/// Recover the short-lex least word equal, in the free band, to the element
/// realized by the minimized transducer `t`.
pub fn min_word(t: &Transducer) -> Result<Word, FreeBandError> {
    minword::min_word(t)
}

/// The content of the free-band element reached by following the 0-spine
/// from state `q` of `t`: the set of output letters emitted along that
/// spine.
pub fn transducer_cont(q: StateId, t: &Transducer) -> BTreeSet<Letter> {
    transducer::transducer_cont(q, t)
}

/// Walk `input` (a sequence of `0`/`1` input letters) through `t` from its
/// initial state. Returns the emitted output word if a terminal state is
/// reached after consuming exactly `input`, `None` on a missing mid-walk
/// transition or a non-terminal end state.
pub fn traverse(t: &Transducer, input: &[InputLetter]) -> Option<Word> {
    t.traverse(input)
}
