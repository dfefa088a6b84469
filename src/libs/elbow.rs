//! Neighborhood radius from the elbow of a k-distance curve.

use crate::libs::error::{Result, TadError};
use itertools::Itertools;
use std::io::Write;

/// Elbow of the distortion curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Elbow {
    /// 1-based position of the largest distortion. Used as DBSCAN `eps`.
    pub index: usize,
    /// `distortions[k - 1] = (kd[k] - kd[k - 1])²` for `k` in `1..kd.len()`
    pub distortions: Vec<f64>,
}

impl Elbow {
    /// The elbow index read as a neighborhood radius.
    ///
    /// This is a position on the curve, not a distance between rows of the
    /// matrix. The value is passed through unchanged.
    pub fn eps(&self) -> f64 {
        self.index as f64
    }
}

/// Receives the distortion curve for display.
///
/// Failures are reported to the caller of [`estimate_epsilon`] as warnings only.
pub trait Visualizer {
    fn render(&mut self, curve: &[f64]) -> std::io::Result<()>;
}

/// Writes the curve as `k<TAB>distortion` lines, `k` starting at 1.
pub struct TsvCurve<W: Write> {
    writer: W,
}

impl<W: Write> TsvCurve<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Visualizer for TsvCurve<W> {
    fn render(&mut self, curve: &[f64]) -> std::io::Result<()> {
        for (k, distortion) in curve.iter().enumerate() {
            writeln!(self.writer, "{}\t{}", k + 1, distortion)?;
        }
        self.writer.flush()
    }
}

/// Dispersion of consecutive, non-overlapping chunks of `2 * window_length` features.
///
/// Each value is the Euclidean norm of the first difference of its chunk.
/// A trailing partial chunk is dropped.
///
/// ```
/// use scanchip::libs::elbow::k_distances;
/// let kd = k_distances(&[0.0, 3.0, 7.0, 7.0, 1.0], 1).unwrap();
/// assert_eq!(kd, vec![3.0, 0.0]);
/// ```
pub fn k_distances(features: &[f64], window_length: usize) -> Result<Vec<f64>> {
    if window_length == 0 {
        return Err(TadError::InvalidParameter {
            name: "window_length",
            message: "must be at least 1".to_string(),
        });
    }

    let chunk = 2 * window_length;
    if features.len() < chunk {
        return Err(TadError::InsufficientData {
            what: "k-distances",
            needed: chunk,
            found: features.len(),
        });
    }

    let distances = features
        .chunks_exact(chunk)
        .map(|window| {
            window
                .iter()
                .tuple_windows()
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    Ok(distances)
}

/// Position of the largest squared step between consecutive k-distances.
///
/// Ties resolve to the first position. A flat curve therefore gives index 1.
/// A NaN distortion never replaces the current best, so a NaN in the first
/// position pins the elbow at 1.
///
/// ```
/// use scanchip::libs::elbow::find_elbow;
/// let elbow = find_elbow(&[1.0, 1.5, 4.0, 4.5]).unwrap();
/// assert_eq!(elbow.index, 2);
/// assert_eq!(elbow.distortions, vec![0.25, 6.25, 0.25]);
/// ```
pub fn find_elbow(k_distances: &[f64]) -> Result<Elbow> {
    if k_distances.len() < 2 {
        return Err(TadError::InsufficientData {
            what: "elbow",
            needed: 2,
            found: k_distances.len(),
        });
    }

    let distortions: Vec<f64> = k_distances
        .iter()
        .tuple_windows()
        .map(|(prev, cur)| (cur - prev).powi(2))
        .collect();

    let mut best = 0;
    for (i, d) in distortions.iter().enumerate() {
        if *d > distortions[best] {
            best = i;
        }
    }

    Ok(Elbow {
        index: best + 1,
        distortions,
    })
}

/// k-distances followed by the elbow; the curve is handed to `visualizer` if one is given.
pub fn estimate_epsilon(
    features: &[f64],
    window_length: usize,
    visualizer: Option<&mut dyn Visualizer>,
) -> Result<Elbow> {
    let kd = k_distances(features, window_length)?;
    let elbow = find_elbow(&kd)?;

    if let Some(vis) = visualizer {
        if let Err(e) = vis.render(&elbow.distortions) {
            log::warn!("Failed to render the distortion curve: {}", e);
        }
    }

    Ok(elbow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Broken;

    impl Visualizer for Broken {
        fn render(&mut self, _curve: &[f64]) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no display"))
        }
    }

    #[test]
    fn test_k_distances_len() {
        let features: Vec<f64> = (0..23).map(|x| x as f64).collect();
        for wl in 1..=5 {
            let kd = k_distances(&features, wl).unwrap();
            assert_eq!(kd.len(), features.len() / (2 * wl));
        }
    }

    #[test]
    fn test_k_distances_norm() {
        // first difference of [1, 4, 8, 8] is [3, 4, 0]
        let kd = k_distances(&[1.0, 4.0, 8.0, 8.0, 2.0, 2.0, 2.0, 2.0], 2).unwrap();
        assert_eq!(kd.len(), 2);
        assert_relative_eq!(kd[0], 5.0);
        assert_relative_eq!(kd[1], 0.0);
    }

    #[test]
    fn test_k_distances_short() {
        assert!(matches!(
            k_distances(&[1.0, 2.0, 3.0], 2),
            Err(TadError::InsufficientData {
                needed: 4,
                found: 3,
                ..
            })
        ));
        assert!(k_distances(&[], 1).is_err());
        assert!(matches!(
            k_distances(&[1.0, 2.0], 0),
            Err(TadError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_find_elbow_range() {
        let kd = vec![0.0, 0.1, 0.3, 2.0, 2.1, 2.15, 2.2];
        let elbow = find_elbow(&kd).unwrap();
        assert_eq!(elbow.distortions.len(), kd.len() - 1);
        assert_eq!(elbow.index, 3);
        assert!(elbow.index >= 1 && elbow.index <= kd.len() - 1);

        let elbow = find_elbow(&[3.0, 1.0]).unwrap();
        assert_eq!(elbow.index, 1);
        assert_relative_eq!(elbow.distortions[0], 4.0);
    }

    #[test]
    fn test_find_elbow_flat() {
        let elbow = find_elbow(&[2.5; 6]).unwrap();
        assert_eq!(elbow.index, 1);
        assert!(elbow.distortions.iter().all(|d| *d == 0.0));
    }

    #[test]
    fn test_find_elbow_nan() {
        // NaN first: nothing compares greater, index stays at 1
        let elbow = find_elbow(&[f64::NAN, 1.0, 5.0]).unwrap();
        assert!(elbow.distortions[0].is_nan());
        assert_eq!(elbow.index, 1);

        // NaN later never wins
        let elbow = find_elbow(&[0.0, 1.0, 5.0, f64::NAN]).unwrap();
        assert_eq!(elbow.index, 2);
    }

    #[test]
    fn test_eps_is_curve_position() {
        // The elbow is a position on the distortion curve, yet DBSCAN reads it
        // as a Euclidean distance between matrix rows. The units do not match;
        // the value goes through unscaled until the intended radius is settled.
        let elbow = find_elbow(&[1.0, 1.0, 1000.0, 1000.0]).unwrap();
        assert_eq!(elbow.index, 2);
        assert_relative_eq!(elbow.eps(), 2.0);

        let elbow = find_elbow(&[2.5; 6]).unwrap();
        assert_relative_eq!(elbow.eps(), 1.0);
    }

    #[test]
    fn test_find_elbow_short() {
        assert!(matches!(
            find_elbow(&[1.0]),
            Err(TadError::InsufficientData { needed: 2, found: 1, .. })
        ));
        assert!(find_elbow(&[]).is_err());
    }

    #[test]
    fn test_estimate_with_visualizer() {
        let features = vec![0.0, 1.0, 1.0, 1.0, 0.0, 5.0, 1.0, 1.0];
        let mut curve = TsvCurve::new(Vec::new());
        let elbow = estimate_epsilon(&features, 1, Some(&mut curve)).unwrap();

        // kd = [1, 0, 5, 0], distortions = [1, 25, 25]
        assert_eq!(elbow.index, 2);
        let out = String::from_utf8(curve.into_inner()).unwrap();
        assert_eq!(out, "1\t1\n2\t25\n3\t25\n");
    }

    #[test]
    fn test_estimate_ignores_broken_visualizer() {
        let features = vec![0.0, 1.0, 1.0, 1.0, 0.0, 5.0, 1.0, 1.0];
        let plain = estimate_epsilon(&features, 1, None).unwrap();
        let mut broken = Broken;
        let shown = estimate_epsilon(&features, 1, Some(&mut broken)).unwrap();
        assert_eq!(plain, shown);
    }
}
