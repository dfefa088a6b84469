//! DBSCAN over the rows of a contact matrix.
//!
//! Each row is a point in `n`-dimensional space and distances are Euclidean.
//!
//! * A point's neighborhood holds every row within `eps`, the point included.
//! * A core point has at least `min_points` rows in its neighborhood.
//! * Clusters grow from core points in row order; border points join the first
//!   cluster that reaches them.
//! * Rows reached by no core point are noise.
//!
//! Given the same matrix and parameters, the labeling is always the same.

use crate::libs::error::{Result, TadError};
use nalgebra::DMatrix;

/// One label per matrix row; `None` marks noise.
pub type ClusterLabeling = Vec<Option<usize>>;

/// Label written for noise rows.
pub const NOISE: i64 = -1;

/// Number of bins in the smallest TAD.
///
/// ```
/// use scanchip::libs::dbscan::min_points;
/// assert_eq!(min_points(120_000, 40_000).unwrap(), 3);
/// assert_eq!(min_points(40_000, 40_000).unwrap(), 1);
/// assert_eq!(min_points(100_000, 40_000).unwrap(), 2);
/// ```
pub fn min_points(min_tad_size: usize, bin_size: usize) -> Result<usize> {
    if bin_size == 0 {
        return Err(TadError::InvalidParameter {
            name: "binsize",
            message: "must be greater than 0".to_string(),
        });
    }
    Ok(min_tad_size / bin_size)
}

#[derive(Debug, Clone)]
pub struct Dbscan {
    eps: f64,
    min_points: usize,
}

impl Dbscan {
    pub fn new(eps: f64, min_points: usize) -> Self {
        Self { eps, min_points }
    }

    /// Rows within `eps` of `row`, `row` itself included, in ascending order.
    pub fn region_query(&self, matrix: &DMatrix<f64>, row: usize) -> Vec<usize> {
        let point = matrix.row(row);
        (0..matrix.nrows())
            .filter(|&other| (&matrix.row(other) - &point).norm() <= self.eps)
            .collect()
    }

    pub fn fit(&self, matrix: &DMatrix<f64>) -> Result<ClusterLabeling> {
        if self.eps.is_nan() || self.eps <= 0.0 {
            return Err(TadError::InvalidParameter {
                name: "eps",
                message: format!("must be positive, got {}", self.eps),
            });
        }
        if self.min_points == 0 {
            return Err(TadError::InvalidParameter {
                name: "min_points",
                message: "must be at least 1".to_string(),
            });
        }

        let n = matrix.nrows();
        let neighborhoods: Vec<Vec<usize>> =
            (0..n).map(|row| self.region_query(matrix, row)).collect();
        let is_core: Vec<bool> = neighborhoods
            .iter()
            .map(|nb| nb.len() >= self.min_points)
            .collect();

        let mut labels: ClusterLabeling = vec![None; n];
        let mut cluster_id = 0;

        for seed in 0..n {
            if labels[seed].is_some() || !is_core[seed] {
                continue;
            }

            // Iterative expansion through core points
            labels[seed] = Some(cluster_id);
            let mut stack = vec![seed];
            while let Some(point) = stack.pop() {
                if !is_core[point] {
                    continue;
                }
                for &nb in &neighborhoods[point] {
                    if labels[nb].is_none() {
                        labels[nb] = Some(cluster_id);
                        stack.push(nb);
                    }
                }
            }

            cluster_id += 1;
        }

        Ok(labels)
    }
}

/// Groups row indices by cluster id, noise dropped.
///
/// ```
/// use scanchip::libs::dbscan::labels_to_clusters;
/// let clusters = labels_to_clusters(&[Some(1), Some(0), None, Some(1)]);
/// assert_eq!(clusters, vec![vec![1], vec![0, 3]]);
/// ```
pub fn labels_to_clusters(labels: &[Option<usize>]) -> Vec<Vec<usize>> {
    let count = labels.iter().flatten().max().map_or(0, |m| m + 1);
    let mut clusters = vec![vec![]; count];
    for (row, label) in labels.iter().enumerate() {
        if let Some(id) = label {
            clusters[*id].push(row);
        }
    }
    clusters.retain(|c| !c.is_empty());
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cluster() {
        let m = DMatrix::<f64>::identity(3, 3);
        let labels = Dbscan::new(10.0, 1).fit(&m).unwrap();
        assert_eq!(labels, vec![Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_two_blocks() {
        // rows 0-2 and rows 3-5 are far apart
        let mut m = DMatrix::<f64>::zeros(6, 6);
        for i in 0..6 {
            for j in 0..6 {
                if (i < 3) == (j < 3) {
                    m[(i, j)] = 10.0;
                }
            }
        }
        m[(1, 1)] = 11.0;

        let labels = Dbscan::new(2.0, 3).fit(&m).unwrap();
        assert_eq!(labels[0], Some(0));
        assert!(labels[0..3].iter().all(|l| *l == Some(0)));
        assert!(labels[3..6].iter().all(|l| *l == Some(1)));
    }

    #[test]
    fn test_noise() {
        let m = DMatrix::from_row_slice(
            4,
            2,
            &[
                0.0, 0.0, //
                0.5, 0.0, //
                0.0, 0.5, //
                9.0, 9.0,
            ],
        );
        let labels = Dbscan::new(1.0, 3).fit(&m).unwrap();
        assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);

        // too sparse for anything
        let labels = Dbscan::new(0.1, 2).fit(&m).unwrap();
        assert!(labels.iter().all(|l| l.is_none()));
    }

    #[test]
    fn test_border_point() {
        // 1 is the only core point; 0 and 2 hang off it, 3 is out of reach
        let m = DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 2.0, 10.0]);
        let dbscan = Dbscan::new(1.0, 3);
        assert_eq!(dbscan.region_query(&m, 1), vec![0, 1, 2]);
        let labels = dbscan.fit(&m).unwrap();
        assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
    }

    #[test]
    fn test_stable() {
        let m = DMatrix::from_fn(8, 8, |i, j| ((i * 7 + j * 3) % 5) as f64);
        let dbscan = Dbscan::new(3.0, 2);
        assert_eq!(dbscan.fit(&m).unwrap(), dbscan.fit(&m).unwrap());
    }

    #[test]
    fn test_invalid() {
        let m = DMatrix::<f64>::identity(3, 3);
        assert!(matches!(
            Dbscan::new(0.0, 1).fit(&m),
            Err(TadError::InvalidParameter { name: "eps", .. })
        ));
        assert!(Dbscan::new(-1.0, 1).fit(&m).is_err());
        assert!(Dbscan::new(f64::NAN, 1).fit(&m).is_err());
        assert!(matches!(
            Dbscan::new(1.0, 0).fit(&m),
            Err(TadError::InvalidParameter {
                name: "min_points",
                ..
            })
        ));
        assert!(min_points(120_000, 0).is_err());
    }

    #[test]
    fn test_labels_to_clusters() {
        assert!(labels_to_clusters(&[None, None]).is_empty());
        assert_eq!(
            labels_to_clusters(&[Some(0), Some(0), None, Some(1)]),
            vec![vec![0, 1], vec![3]]
        );
    }
}
