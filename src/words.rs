//! Word operations: content, the `pref_ltof`/`suff_ftol` pair, and the
//! `compute_right`/`compute_left` precomputation used by the interval
//! transducer builder.
//!
//! A word is an ordered sequence of output letters, represented as `&[Letter]`
//! / `Vec<Letter>` at this layer (the input alphabet {0,1} is a separate,
//! fixed concern handled by [`crate::transducer`]).

use std::collections::BTreeSet;

/// An output letter. The realized alphabet for a given word `w` is
/// `{0, ..., cont(w).len() - 1}`.
pub type Letter = usize;

/// An ordered sequence of output letters.
pub type Word = Vec<Letter>;

/// Return the content of a word: the set of distinct letters occurring in it.
pub fn cont(w: &[Letter]) -> BTreeSet<Letter> {
    w.iter().copied().collect()
}

/// Return the longest proper prefix of `w` whose content is `cont(w)` minus
/// one letter, together with that letter (the "first-to-occur-last" letter:
/// among all letters of `cont(w)`, the one whose first occurrence in `w`
/// comes latest).
///
/// Returns `None` iff `w` is empty — `pref_ltof` is undefined on the empty
/// word (the caller of this module, e.g. [`word_function`], special-cases
/// the empty word directly rather than calling through here).
pub fn pref_ltof(w: &[Letter]) -> Option<(Word, Letter)> {
    let k = cont(w).len();
    let mut seen = BTreeSet::new();
    let mut distinct_so_far = 0;
    for (i, &letter) in w.iter().enumerate() {
        if seen.insert(letter) {
            distinct_so_far += 1;
            if distinct_so_far == k {
                return Some((w[..i].to_vec(), letter));
            }
        }
    }
    None
}

/// Return a proper suffix of `w` (not of the reversal of `w`) whose content
/// is `cont(w)` minus one letter, together with that letter (the
/// "last-to-occur-first" letter: among all letters of `cont(w)`, the one
/// whose last occurrence in `w` comes earliest).
///
/// Symmetric to [`pref_ltof`] via reversal: `w` is reversed, `pref_ltof` is
/// applied, and the resulting prefix is reversed back into a suffix of `w`
/// itself.
pub fn suff_ftol(w: &[Letter]) -> Option<(Word, Letter)> {
    let reversed: Word = w.iter().rev().copied().collect();
    let (rev_suff, letter) = pref_ltof(&reversed)?;
    let suff: Word = rev_suff.into_iter().rev().collect();
    Some((suff, letter))
}

/// The word function `f_w` associated with `w` (Definition 3.1): repeatedly
/// strips a letter via `pref_ltof` (input `0`) or `suff_ftol` (input `1`),
/// returning the sequence of stripped letters. Defined only if the residual
/// word reaches exactly the empty word when the input is exhausted.
pub fn word_function(w: &[Letter], input: &[u8]) -> Option<Word> {
    let mut result = Word::with_capacity(input.len());
    let mut current: Word = w.to_vec();
    for &input_letter in input {
        if current.is_empty() {
            return None;
        }
        let (next, letter) = match input_letter {
            0 => pref_ltof(&current)?,
            1 => suff_ftol(&current)?,
            _ => return None,
        };
        current = next;
        result.push(letter);
    }
    current.is_empty().then_some(result)
}

/// Precompute the prefix-maximal content-`k` subwords of `w`.
///
/// Returns `right[i] = Some(j)` where `w[i..=j]` is the unique maximal
/// subword starting at `i` whose content has size exactly `k` (maximal in
/// the sense that `w[i..=j+1]`, if it exists, has content size `> k`), or
/// `None` if no content-`k` subword starts at `i`.
///
/// Linear-time two-pointer sweep maintaining a per-letter occurrence count
/// (`Compute_RIGHT2` of Radoszewski & Rytter, "Hash functions: ..."); `k = 0`
/// degenerates to "no such subword starts anywhere" since every non-empty
/// subword has content size >= 1.
pub fn compute_right(k: usize, w: &[Letter]) -> Vec<Option<usize>> {
    if w.is_empty() {
        return Vec::new();
    }
    let n = w.len() as isize;
    let alphabet_size = w.iter().copied().max().unwrap() + 1;
    let mut multiset = vec![0usize; alphabet_size];
    let mut curr_k = 0usize;
    let mut right = vec![None; w.len()];
    // j is the rightmost index currently included in the sliding window,
    // with j = -1 meaning the window is empty.
    let mut j: isize = -1;
    for i in 0..w.len() {
        if i > 0 {
            multiset[w[i - 1]] -= 1;
            if multiset[w[i - 1]] == 0 {
                curr_k -= 1;
            }
        }
        while j < n - 1 && (multiset[w[(j + 1) as usize]] != 0 || curr_k < k) {
            j += 1;
            let jj = j as usize;
            if multiset[w[jj]] == 0 {
                curr_k += 1;
            }
            multiset[w[jj]] += 1;
        }
        if curr_k == k {
            right[i] = Some(j as usize);
        }
    }
    right
}

/// Precompute the suffix-maximal content-`k` subwords of `w`: the symmetric
/// counterpart of [`compute_right`], obtained by reversing `w`, delegating,
/// and reflecting the resulting indices back.
pub fn compute_left(k: usize, w: &[Letter]) -> Vec<Option<usize>> {
    let reversed: Word = w.iter().rev().copied().collect();
    let n = w.len();
    let right_on_reversed = compute_right(k, &reversed);
    let mut left: Vec<Option<usize>> = right_on_reversed
        .into_iter()
        .map(|x| x.map(|v| n - 1 - v))
        .collect();
    left.reverse();
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cont() {
        assert_eq!(cont(&[0, 1, 0, 2]), BTreeSet::from([0, 1, 2]));
        assert_eq!(cont(&[]), BTreeSet::new());
    }

    #[test]
    fn test_pref_ltof_empty() {
        assert_eq!(pref_ltof(&[]), None);
    }

    #[test]
    fn test_pref_ltof_basic() {
        // content {0,1,2}; first-to-occur-last is the letter whose first
        // occurrence comes latest: 2 first occurs at index 3.
        assert_eq!(pref_ltof(&[0, 1, 0, 2]), Some((vec![0, 1, 0], 2)));
    }

    #[test]
    fn test_suff_ftol_is_proper_suffix_of_w() {
        // last-to-occur-first: among {0,1,2}, the letter whose last
        // occurrence comes earliest. In [0,1,0,2]: 0 last at 2, 1 last at 1,
        // 2 last at 3 -> letter 1, suffix is w with everything up to and
        // including that last occurrence of 1 dropped from the front: [0,2].
        let (suff, letter) = suff_ftol(&[0, 1, 0, 2]).unwrap();
        assert_eq!(letter, 1);
        assert_eq!(suff, vec![0, 2]);
        // suff must be a genuine suffix of w, not of reversed(w).
        assert!([0, 1, 0, 2].ends_with(suff.as_slice()));
    }

    #[test]
    fn test_suff_ftol_empty() {
        assert_eq!(suff_ftol(&[]), None);
    }

    #[test]
    fn test_word_function_scenario_1() {
        let w = [0, 1, 0, 2];
        assert_eq!(word_function(&w, &[0, 0, 0]), Some(vec![2, 1, 0]));
        assert_eq!(word_function(&w, &[0, 0]), None);
    }

    #[test]
    fn test_compute_right_empty() {
        assert_eq!(compute_right(1, &[]), Vec::<Option<usize>>::new());
    }

    #[test]
    fn test_compute_right_single_letter() {
        // w = [0,0,0], k=1: the whole word is one content-1 subword from any start.
        assert_eq!(compute_right(1, &[0, 0, 0]), vec![Some(2), Some(2), Some(2)]);
    }

    #[test]
    fn test_compute_right_and_left_consistency() {
        let w = [0, 1, 0, 2];
        let r1 = compute_right(1, &w);
        // starting at i=0, content-1 maximal subword is just [0] (index 0),
        // since w[1]=1 would grow content to size 2.
        assert_eq!(r1[0], Some(0));
        let l1 = compute_left(1, &w);
        // ending at j=3 (letter 2), content-1 maximal subword is just [2].
        assert_eq!(l1[3], Some(3));
    }

    #[test]
    fn test_compute_right_full_content() {
        let w = [0, 1, 0, 2];
        let k = cont(&w).len();
        let r = compute_right(k, &w);
        assert_eq!(r[0], Some(3));
    }
}
