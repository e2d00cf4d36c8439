use ndarray::Array3;
use serde::{Deserialize, Serialize};

use super::Grid;

/// Desired state profile `y_d(x1, x2, x3)` over the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetProfile {
    /// `2.8 + 40·x1(x1−1)·x2(x2−1)·x3(x3−1)`
    Cubic,
    /// `3 + 5·x1(x1−1)·x2(x2−1)`, constant along x3.
    Planar,
}

impl TargetProfile {
    /// Evaluates the profile at a physical coordinate.
    #[must_use]
    pub fn value(self, x1: f64, x2: f64, x3: f64) -> f64 {
        match self {
            TargetProfile::Cubic => 2.8 + 40.0 * (x1 * (x1 - 1.0) * x2 * (x2 - 1.0) * x3 * (x3 - 1.0)),
            TargetProfile::Planar => 3.0 + 5.0 * (x1 * (x1 - 1.0) * x2 * (x2 - 1.0)),
        }
    }

    /// Samples the profile at every grid point.
    ///
    /// The array is indexed `[[i, j, k]]` and its row-major layout matches
    /// [`Grid::y_index`].
    #[must_use]
    pub fn sample(self, grid: &Grid) -> Array3<f64> {
        let s = grid.side();
        Array3::from_shape_fn((s, s, s), |(i, j, k)| {
            self.value(grid.x1_grid(i), grid.x2_grid(j), grid.x3_grid(k))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn profiles_at_centre_and_boundary() {
        assert_relative_eq!(TargetProfile::Cubic.value(0.5, 0.5, 0.5), 2.8 - 40.0 / 64.0);
        assert_relative_eq!(TargetProfile::Cubic.value(0.0, 0.3, 0.7), 2.8);
        assert_relative_eq!(TargetProfile::Planar.value(0.5, 0.5, 0.9), 3.0 + 5.0 / 16.0);
        assert_relative_eq!(TargetProfile::Planar.value(1.0, 0.5, 0.2), 3.0);
    }

    #[test]
    fn sampled_layout_matches_variable_order() {
        let grid = Grid::new(2).expect("valid grid");
        let field = TargetProfile::Cubic.sample(&grid);
        let flat = field.as_slice().expect("standard layout");

        assert_eq!(flat.len(), grid.num_points());
        for p in grid.points() {
            let expected = TargetProfile::Cubic.value(
                grid.x1_grid(p.i),
                grid.x2_grid(p.j),
                grid.x3_grid(p.k),
            );
            assert_relative_eq!(flat[grid.y_index(p.i, p.j, p.k)], expected);
            assert_relative_eq!(field[[p.i, p.j, p.k]], expected);
        }
    }
}
