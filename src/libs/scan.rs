//! Features, elbow and clustering chained for one contact matrix.

use crate::libs::dbscan::{min_points, ClusterLabeling, Dbscan};
use crate::libs::elbow::{estimate_epsilon, Elbow, Visualizer};
use crate::libs::error::Result;
use crate::libs::feature::{extract_features, window_length};
use nalgebra::DMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanParams {
    /// `window_length = n / window_proportion`
    pub window_proportion: usize,
    /// Minimum TAD size in base pairs
    pub min_tad_size: usize,
    /// Base pairs per bin
    pub bin_size: usize,
}

#[derive(Debug, Clone)]
pub struct Scan {
    pub window_length: usize,
    pub n_features: usize,
    pub elbow: Elbow,
    pub min_points: usize,
    pub labels: ClusterLabeling,
}

pub fn scan(
    matrix: &DMatrix<f64>,
    params: &ScanParams,
    visualizer: Option<&mut dyn Visualizer>,
) -> Result<Scan> {
    let window_length = window_length(matrix.nrows(), params.window_proportion)?;

    log::info!("Create features");
    let features = extract_features(matrix, window_length)?;
    log::debug!(
        "{} features with window length {}",
        features.len(),
        window_length
    );

    let elbow = estimate_epsilon(&features, window_length, visualizer)?;
    let min_points = min_points(params.min_tad_size, params.bin_size)?;
    log::info!("eps = {}, min_points = {}", elbow.index, min_points);

    log::info!("Make clusters");
    let labels = Dbscan::new(elbow.eps(), min_points).fit(matrix)?;

    Ok(Scan {
        window_length,
        n_features: features.len(),
        elbow,
        min_points,
        labels,
    })
}
