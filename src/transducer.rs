//! The transducer data model: states, transitions, validation, traversal,
//! and the structural primitives (`underlying_digraph`, `connected_states`,
//! `induced_subtransducer`, `trim`) that the rest of the crate builds on.

use std::collections::BTreeSet;

use crate::digraph::{self, AdjacencyList};
use crate::error::FreeBandError;
use crate::words::Letter;

/// A state identifier: its position in the owning [`Transducer`]'s state
/// list (I4).
pub type StateId = usize;

/// An input letter, always `0` or `1` by construction (see [`Transducer`]
/// invariants).
pub type InputLetter = usize;

/// A single transducer state: its two (possibly undefined) transitions and
/// its two (possibly undefined) output letters, indexed by input letter
/// `0`/`1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub next_state: [Option<StateId>; 2],
    pub next_letter: [Option<Letter>; 2],
}

impl State {
    pub fn new(next_state: [Option<StateId>; 2], next_letter: [Option<Letter>; 2]) -> Self {
        Self {
            next_state,
            next_letter,
        }
    }
}

/// A deterministic, acyclic, synchronous 2-input transducer.
///
/// See the crate-level invariants (I1-I4): transitions are defined jointly
/// (`next_state[a].is_some() == next_letter[a].is_some()`), the underlying
/// digraph is acyclic, user-facing transducers are connected, and state ids
/// equal their position in `states`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transducer {
    pub initial: Option<StateId>,
    pub states: Vec<State>,
    pub terminal: Vec<bool>,
    /// Optional human-readable per-state labels, for debugging only. Never
    /// consulted by any algorithm in this crate.
    pub label: Option<Vec<String>>,
}

impl Transducer {
    /// Construct a transducer from its raw parts, validating invariants
    /// (I1), bounds on `initial`, and the matching lengths of `states`,
    /// `terminal`, and `label`.
    pub fn new(
        initial: Option<StateId>,
        states: Vec<State>,
        terminal: Vec<bool>,
        label: Option<Vec<String>>,
    ) -> Result<Self, FreeBandError> {
        let t = Self {
            initial,
            states,
            terminal,
            label,
        };
        t.validate()?;
        Ok(t)
    }

    /// The empty transducer: zero states, no initial state.
    pub fn empty() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            terminal: Vec::new(),
            label: None,
        }
    }

    /// The canonical empty-word transducer: a single terminal state with
    /// both transitions undefined. Distinct from [`Transducer::empty`]; see
    /// the crate-level documentation of the empty word.
    pub fn empty_word() -> Self {
        Self {
            initial: Some(0),
            states: vec![State::new([None, None], [None, None])],
            terminal: vec![true],
            label: None,
        }
    }

    /// Re-run invariant validation on an already-built transducer. Builders
    /// that construct a `Transducer` incrementally via [`Transducer::empty`]
    /// and [`Transducer::add_state`] call this once at the end, rather than
    /// paying for a topological sort after every single `add_state` call.
    pub fn validate(&self) -> Result<(), FreeBandError> {
        if self.states.len() != self.terminal.len() {
            return Err(FreeBandError::invariant(format!(
                "states has length {} but terminal has length {}",
                self.states.len(),
                self.terminal.len()
            )));
        }
        if let Some(label) = &self.label {
            if label.len() != self.states.len() {
                return Err(FreeBandError::invariant(format!(
                    "states has length {} but label has length {}",
                    self.states.len(),
                    label.len()
                )));
            }
        }
        if let Some(initial) = self.initial {
            if initial >= self.states.len() {
                return Err(FreeBandError::invariant(format!(
                    "initial state {initial} is out of range for {} states",
                    self.states.len()
                )));
            }
        }
        for (id, state) in self.states.iter().enumerate() {
            for a in 0..2 {
                if state.next_state[a].is_some() != state.next_letter[a].is_some() {
                    return Err(FreeBandError::invariant(format!(
                        "state {id} has next_state[{a}] and next_letter[{a}] defined independently"
                    )));
                }
                if let Some(next) = state.next_state[a] {
                    if next >= self.states.len() {
                        return Err(FreeBandError::invariant(format!(
                            "state {id} transitions on {a} to out-of-range state {next}"
                        )));
                    }
                }
            }
        }
        if digraph::topological_order(&self.underlying_digraph_unchecked()).is_none() {
            return Err(FreeBandError::invariant(
                "the underlying digraph of the transducer contains a cycle".to_string(),
            ));
        }
        Ok(())
    }

    /// Append a new state built from `next_state`/`next_letter` rows (given
    /// as raw state ids rather than `State`) and a terminal flag. Returns
    /// the id of the new state, which is `self.states.len()` before the
    /// call (I4).
    pub fn add_state(
        &mut self,
        next_state: [Option<StateId>; 2],
        next_letter: [Option<Letter>; 2],
        is_terminal: bool,
    ) -> StateId {
        let id = self.states.len();
        self.states.push(State::new(next_state, next_letter));
        self.terminal.push(is_terminal);
        id
    }

    /// Walk `input` from `self.initial`, returning the emitted output word
    /// iff a terminal state is reached after consuming exactly `input`;
    /// `None` on a missing mid-walk transition or a non-terminal end state.
    pub fn traverse(&self, input: &[InputLetter]) -> Option<Vec<Letter>> {
        let mut state = self.initial?;
        let mut result = Vec::with_capacity(input.len());
        for &a in input {
            let letter = self.states[state].next_letter[a]?;
            result.push(letter);
            state = self.states[state].next_state[a]?;
        }
        self.terminal[state].then_some(result)
    }

    fn underlying_digraph_unchecked(&self) -> AdjacencyList {
        self.states
            .iter()
            .map(|state| {
                let succs: Vec<StateId> = state.next_state.iter().filter_map(|&x| x).collect();
                digraph::dedup_preserve_order(succs)
            })
            .collect()
    }

    /// The underlying digraph: one vertex per state, an edge `(q, δ(q,a))`
    /// for each defined transition, de-duplicated per vertex.
    pub fn underlying_digraph(&self) -> AdjacencyList {
        self.underlying_digraph_unchecked()
    }

    /// The states on a path from `initial` to some terminal state.
    pub fn connected_states(&self) -> Vec<StateId> {
        let Some(initial) = self.initial else {
            return Vec::new();
        };
        let g = self.underlying_digraph();
        let accessible = digraph::is_reachable(&g, &[initial]);
        let terminals: Vec<StateId> = (0..self.states.len())
            .filter(|&id| self.terminal[id])
            .collect();
        let coaccessible = digraph::is_reachable(&digraph::reverse(&g), &terminals);
        (0..self.states.len())
            .filter(|&id| accessible[id] && coaccessible[id])
            .collect()
    }

    /// The subtransducer induced by `state_ids`: states renumbered to
    /// `0..state_ids.len()` in the given order, transitions to states
    /// outside `state_ids` severed (both δ and λ set to `None`), and
    /// `initial` remapped if it lies in `state_ids`, else `None`.
    pub fn induced_subtransducer(&self, state_ids: &[StateId]) -> Self {
        let included: BTreeSet<StateId> = state_ids.iter().copied().collect();
        let position_of: std::collections::HashMap<StateId, StateId> = state_ids
            .iter()
            .enumerate()
            .map(|(new_id, &old_id)| (old_id, new_id))
            .collect();

        let states: Vec<State> = state_ids
            .iter()
            .map(|&old_id| {
                let old = &self.states[old_id];
                let mut next_state = old.next_state;
                let mut next_letter = old.next_letter;
                for a in 0..2 {
                    match next_state[a] {
                        Some(child) if included.contains(&child) => {
                            next_state[a] = Some(position_of[&child]);
                        }
                        _ => {
                            next_state[a] = None;
                            next_letter[a] = None;
                        }
                    }
                }
                State::new(next_state, next_letter)
            })
            .collect();

        let terminal: Vec<bool> = state_ids.iter().map(|&id| self.terminal[id]).collect();
        let label = self.label.as_ref().map(|labels| {
            state_ids
                .iter()
                .map(|&id| labels[id].clone())
                .collect::<Vec<_>>()
        });

        let initial = self
            .initial
            .filter(|id| included.contains(id))
            .map(|id| position_of[&id]);

        Self {
            initial,
            states,
            terminal,
            label,
        }
    }

    /// The equivalent transducer with every disconnected state removed.
    pub fn trim(&self) -> Self {
        self.induced_subtransducer(&self.connected_states())
    }
}

/// Repeatedly transition along `letter` from `t`'s initial state, returning
/// the visited state ids `[q0, q1, ...]` (the "spine"), stopping when the
/// transition becomes undefined. Returns an empty list for the empty
/// transducer.
pub fn precompute_spine(t: &Transducer, letter: InputLetter) -> Vec<StateId> {
    let Some(initial) = t.initial else {
        return Vec::new();
    };
    let mut result = Vec::new();
    let mut state = Some(initial);
    while let Some(q) = state {
        result.push(q);
        state = t.states[q].next_state[letter];
    }
    result
}

/// The content of the free-band element reached by following the 0-spine
/// from state `q`: the set of output letters `λ(p, 0)` for `p` on that
/// spine, wherever defined.
pub fn transducer_cont(q: StateId, t: &Transducer) -> BTreeSet<Letter> {
    let mut content = BTreeSet::new();
    let mut state = Some(q);
    while let Some(p) = state {
        if let Some(letter) = t.states[p].next_letter[0] {
            content.insert(letter);
        }
        state = t.states[p].next_state[0];
    }
    content
}
