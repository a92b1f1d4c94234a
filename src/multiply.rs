//! Transducer multiplication (Component H): computing a transducer
//! realizing `xy` from transducers realizing `x` and `y`.

use std::collections::{HashMap, HashSet};

use crate::transducer::{self, StateId, Transducer};
use crate::words::Letter;

/// The partial function `K_alpha` used to locate, for each pair of spine
/// positions `(i, j)`, how far along the other transducer's spine the
/// product's transition must reach before a letter already seen on this
/// side stops being "new".
///
/// `alpha = 0` scans `transducer_y`'s 0-spine against letters accumulated
/// from `transducer_x`'s 1-spine; `alpha = 1` is the mirror image. Both
/// directions are computed by the same backward sweep, degenerate at the
/// boundary (`i == len(cont_x)` or `j == len(cont_y)`) where `K` is left
/// undefined and the caller falls back to the spine's own transition.
fn compute_k(alpha: usize, x: &Transducer, y: &Transducer) -> Vec<Vec<Option<usize>>> {
    let q_x = transducer::precompute_spine(x, 1);
    let q_y = transducer::precompute_spine(y, 0);
    let n_x = q_x.len().saturating_sub(1);
    let n_y = q_y.len().saturating_sub(1);

    let mut k = vec![vec![None; n_y + 1]; n_x + 1];
    let mut seen: HashSet<Letter> = HashSet::new();

    if alpha == 0 {
        for i in (0..=n_x).rev() {
            for j in (0..=n_y).rev() {
                let letter = y.states[q_y[j]].next_letter[0];
                if let Some(l) = letter {
                    if !seen.contains(&l) {
                        k[i][j] = Some(1);
                    } else if j + 1 <= n_y {
                        if let Some(next) = k[i][j + 1] {
                            k[i][j] = Some(1 + next);
                        }
                    }
                }
            }
            if i != 0 {
                if let Some(l) = x.states[q_x[i - 1]].next_letter[1] {
                    seen.insert(l);
                }
            }
        }
    } else {
        for j in (0..=n_y).rev() {
            for i in (0..=n_x).rev() {
                let letter = x.states[q_x[i]].next_letter[1];
                if let Some(l) = letter {
                    if !seen.contains(&l) {
                        k[i][j] = Some(1);
                    } else if i + 1 <= n_x {
                        if let Some(next) = k[i + 1][j] {
                            k[i][j] = Some(1 + next);
                        }
                    }
                }
            }
            if j != 0 {
                if let Some(l) = y.states[q_y[j - 1]].next_letter[0] {
                    seen.insert(l);
                }
            }
        }
    }
    k
}

/// Build a transducer realizing `xy`, given transducers realizing `x` and
/// `y`.
///
/// Both inputs' states are first copied, disjointly, into the product
/// transducer (`inclusion_x`/`inclusion_y` record where each original state
/// landed); a grid of new "spine-crossing" states indexed by `(i, j)` — how
/// far along each side's spine a transition has advanced — is then grafted
/// on top, with `K0`/`K1` telling each crossing state where its
/// `0`-/`1`-transition lands. A final pass redirects the crossing states'
/// boundary transitions (`j` at the end of `y`'s spine, or `i` at the end of
/// `x`'s spine) back into the copied originals, since the grid's edge states
/// otherwise dangle.
///
/// Retains every copied `X`/`Y` state and every grid-crossing state, whether
/// or not it is reachable, matching the reference construction — callers
/// that want the trim result can call [`crate::transducer::Transducer::trim`]
/// themselves. Never fails: the construction is total on any pair of valid
/// transducers, so a validation failure here would indicate a bug in this
/// function rather than a caller precondition.
pub fn multiply(x: &Transducer, y: &Transducer) -> Transducer {
    let mut product = Transducer::empty();

    let inclusion_x: Vec<StateId> = (0..x.states.len())
        .map(|old_id| product.add_state([None, None], [None, None], x.terminal[old_id]))
        .collect();
    let inclusion_y: Vec<StateId> = (0..y.states.len())
        .map(|old_id| product.add_state([None, None], [None, None], y.terminal[old_id]))
        .collect();

    for (orig, inclusion) in [(x, &inclusion_x), (y, &inclusion_y)] {
        for (old_id, state) in orig.states.iter().enumerate() {
            let new_id = inclusion[old_id];
            for a in 0..2 {
                product.states[new_id].next_letter[a] = state.next_letter[a];
                if let Some(child) = state.next_state[a] {
                    product.states[new_id].next_state[a] = Some(inclusion[child]);
                }
            }
        }
    }

    let q_x = transducer::precompute_spine(x, 1);
    let q_y = transducer::precompute_spine(y, 0);
    let n_x = q_x.len().saturating_sub(1);
    let n_y = q_y.len().saturating_sub(1);
    let k0 = compute_k(0, x, y);
    let k1 = compute_k(1, x, y);

    let mut state_lookup: Vec<Vec<Option<StateId>>> = vec![vec![None; n_y + 1]; n_x + 1];
    let mut reverse_lookup: HashMap<StateId, (usize, usize)> = HashMap::new();

    for i in (0..=n_x).rev() {
        for j in (0..=n_y).rev() {
            let mut next_state = [None; 2];
            let mut next_letter = [None; 2];

            if let Some(shift) = k0[i][j] {
                next_state[0] = state_lookup[i][j + shift];
                next_letter[0] = product.states[inclusion_y[q_y[j + shift - 1]]].next_letter[0];
            } else {
                let base = &product.states[inclusion_x[q_x[i]]];
                if let Some(target) = base.next_state[0] {
                    next_state[0] = Some(target);
                    next_letter[0] = base.next_letter[0];
                }
            }

            if let Some(shift) = k1[i][j] {
                next_state[1] = state_lookup[i + shift][j];
                next_letter[1] = product.states[inclusion_x[q_x[i + shift - 1]]].next_letter[1];
            } else {
                let base = &product.states[inclusion_y[q_y[j]]];
                if let Some(target) = base.next_state[1] {
                    next_state[1] = Some(target);
                    next_letter[1] = base.next_letter[1];
                }
            }

            let id = product.add_state(next_state, next_letter, false);
            state_lookup[i][j] = Some(id);
            reverse_lookup.insert(id, (i, j));
        }
    }

    product.initial = state_lookup[0][0];

    for state in product.states.iter_mut() {
        for a in 0..2 {
            if let Some(target) = state.next_state[a] {
                if let Some(&(i, j)) = reverse_lookup.get(&target) {
                    if j == n_y {
                        state.next_state[a] = Some(inclusion_x[q_x[i]]);
                    } else if i == n_x {
                        state.next_state[a] = Some(inclusion_y[q_y[j]]);
                    }
                }
            }
        }
    }

    product
        .validate()
        .expect("multiply's construction always produces a valid transducer");
    product
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval_transducer;
    use crate::isomorphism::equivalent_transducers;
    use crate::minimize::transducer_minimize;

    #[test]
    fn test_multiply_idempotent_element_is_fixed() {
        // x = single letter "0" is idempotent in the free band: x*x == x.
        let x = interval_transducer(&[0]).unwrap();
        let product = multiply(&x, &x);
        assert!(equivalent_transducers(&product, &x).unwrap());
    }

    #[test]
    fn test_multiply_matches_concatenated_interval_when_disjoint_content() {
        // x and y over disjoint alphabets: xy is realized directly by the
        // interval transducer of the concatenation.
        let x = interval_transducer(&[0, 1]).unwrap();
        let y = interval_transducer(&[2, 3]).unwrap();
        let product = multiply(&x, &y);
        let expected = interval_transducer(&[0, 1, 2, 3]).unwrap();
        assert!(equivalent_transducers(&product, &expected).unwrap());
    }

    #[test]
    fn test_multiply_is_associative_on_a_small_example() {
        let a = interval_transducer(&[0, 1]).unwrap();
        let b = interval_transducer(&[1, 2]).unwrap();
        let c = interval_transducer(&[0, 2]).unwrap();
        let ab_c = multiply(&multiply(&a, &b), &c);
        let a_bc = multiply(&a, &multiply(&b, &c));
        assert!(equivalent_transducers(&ab_c, &a_bc).unwrap());
    }

    #[test]
    fn test_multiply_result_is_already_minimal_after_minimize() {
        let x = interval_transducer(&[0, 1, 0, 2]).unwrap();
        let y = interval_transducer(&[1, 2]).unwrap();
        let product = transducer_minimize(&multiply(&x, &y));
        assert_eq!(product.connected_states().len(), product.states.len());
    }
}
