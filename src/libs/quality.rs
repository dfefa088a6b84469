//! Agreement scores between two TAD calls.
//!
//! Both scores are plain functions of their inputs. Neither is tied to the
//! clustering output; TAD sets and boundary sets come from the caller.

use crate::libs::error::{Result, TadError};
use nalgebra::DMatrix;
use std::collections::{BTreeSet, HashSet};

/// A TAD is a list of bin indices.
pub type Tad = Vec<usize>;

/// Measure of Concordance (MoC) between two TAD sets.
///
/// ```text
/// MoC = 1 / (n1 * n2 - 1) * Σi Σj |Ai ∩ Bj|² / (|Ai| * |Bj| - 1)
/// ```
///
/// `|Ai|` counts the listed bins, the intersection counts distinct shared bins.
///
/// Errors with `DegenerateInput` when either denominator is not positive:
/// `n1 * n2 <= 1`, or a pair of TADs with `|Ai| * |Bj| <= 1` (two single-bin
/// TADs, or an empty one).
///
/// ```
/// use scanchip::libs::quality::measure_of_concordance;
/// let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
/// let moc = measure_of_concordance(&a, &a).unwrap();
/// assert!((moc - 0.75).abs() < 1e-12);
/// ```
pub fn measure_of_concordance(tads_1: &[Tad], tads_2: &[Tad]) -> Result<f64> {
    let n1 = tads_1.len();
    let n2 = tads_2.len();

    if n1 * n2 <= 1 {
        return Err(TadError::DegenerateInput(format!(
            "MoC needs n1 * n2 > 1, got {} * {}",
            n1, n2
        )));
    }

    let sets_2: Vec<HashSet<usize>> = tads_2
        .iter()
        .map(|t| t.iter().copied().collect())
        .collect();

    let mut sum_term = 0.0;
    for (i, tad_1) in tads_1.iter().enumerate() {
        let set_1: HashSet<usize> = tad_1.iter().copied().collect();

        for (j, tad_2) in tads_2.iter().enumerate() {
            let size_product = tad_1.len() * tad_2.len();
            if size_product <= 1 {
                return Err(TadError::DegenerateInput(format!(
                    "TAD {} of the first set ({} bins) and TAD {} of the second set ({} bins)",
                    i,
                    tad_1.len(),
                    j,
                    tad_2.len()
                )));
            }

            let common = set_1.intersection(&sets_2[j]).count();
            sum_term += (common * common) as f64 / (size_product - 1) as f64;
        }
    }

    Ok(sum_term / (n1 * n2 - 1) as f64)
}

/// Boundary Jaccard index that accepts a match one bin off.
///
/// Every boundary of `boundaries_1` claims the boundaries of `boundaries_2` at
/// offsets -1, 0 and +1. A boundary of `boundaries_2` is claimed at most once.
///
/// ```text
/// index = |matched| / (|B1| + |B2| - |matched|)
/// ```
///
/// An empty union scores 0.
///
/// The first argument drives the matching, so swapping the arguments can
/// change the score, and a score above 1 is possible when one boundary of the
/// first set claims two neighbors in the second.
///
/// ```
/// use scanchip::libs::quality::modified_jaccard_index;
/// use std::collections::BTreeSet;
/// let b1: BTreeSet<i64> = [10, 20, 30].into_iter().collect();
/// let b2: BTreeSet<i64> = [11, 20, 31].into_iter().collect();
/// assert_eq!(modified_jaccard_index(&b1, &b2), 1.0);
/// ```
pub fn modified_jaccard_index(boundaries_1: &BTreeSet<i64>, boundaries_2: &BTreeSet<i64>) -> f64 {
    let mut matched: HashSet<i64> = HashSet::new();

    for boundary in boundaries_1 {
        for offset in -1..=1 {
            // no neighbor past the ends of i64
            let Some(shifted) = boundary.checked_add(offset) else {
                continue;
            };
            if boundaries_2.contains(&shifted) {
                matched.insert(shifted);
            }
        }
    }

    let union_size = boundaries_1.len() + boundaries_2.len() - matched.len();
    if union_size == 0 {
        0.0
    } else {
        matched.len() as f64 / union_size as f64
    }
}

/// Turns a cluster labeling into TADs.
///
/// No implementation is provided; the rule for merging labels into contiguous
/// domains is undecided.
pub trait TadGenerator {
    fn generate(&self, labels: &[Option<usize>], min_bins: usize) -> Result<Vec<Tad>>;
}

/// Further quality scores for a TAD call.
///
/// No implementation is provided; the scores are undefined beyond their names.
pub trait TadQuality {
    /// Quality based on the lengths of the predicted TADs
    fn length_quality(&self, tads: &[Tad]) -> Result<f64>;

    /// Quality based on the number of identified TADs
    fn amount_identified_quality(&self, predicted: &[Tad], reference: &[Tad]) -> Result<f64>;

    /// Intra- and inter-TAD interaction similarity
    fn interaction_quality(&self, matrix: &DMatrix<f64>, tads: &[Tad]) -> Result<f64>;
}
