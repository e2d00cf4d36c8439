use bcontrol_core::SparsityPattern;

use super::Grid;

/// Coefficients of the 7-point stencil in [`Grid::stencil`] order.
pub const STENCIL: [f64; 7] = [6.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0];

/// Discretized elliptic equation `−Δy = −d` on the interior points.
///
/// Each interior point contributes one equality constraint
///
/// ```text
/// g_c(y) = 6·y_c − Σ_neighbours y_nb + h²·d = 0
/// ```
///
/// which is the 7-point Laplacian multiplied through by `h²`. The residual is
/// linear in the state, so Jacobian values are constant and the constraint
/// Hessians vanish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pde {
    grid: Grid,
    source: f64,
}

impl Pde {
    pub(super) fn new(grid: Grid, d_const: f64) -> Self {
        Self {
            grid,
            source: grid.hh() * d_const,
        }
    }

    /// Number of constraints, one per interior point.
    #[must_use]
    pub fn num_constraints(&self) -> usize {
        self.grid.num_interior()
    }

    /// Number of structural Jacobian entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        STENCIL.len() * self.num_constraints()
    }

    /// Scaled source term `h²·d` added to every residual.
    #[must_use]
    pub fn source(&self) -> f64 {
        self.source
    }

    /// Writes one residual per interior point, ordered by `pde_index`.
    pub fn residuals(&self, x: &[f64], g: &mut [f64]) {
        for p in self.grid.interior() {
            let laplacian: f64 = self
                .grid
                .stencil(p)
                .iter()
                .zip(STENCIL)
                .map(|(&col, coeff)| coeff * x[col])
                .sum();
            g[self.grid.pde_index(p.i, p.j, p.k)] = laplacian + self.source;
        }
    }

    /// Returns the Jacobian structure: for each row in `pde_index` order,
    /// the seven stencil columns in [`Grid::stencil`] order.
    #[must_use]
    pub fn describe_structure(&self) -> SparsityPattern {
        let mut pattern =
            SparsityPattern::with_capacity(self.num_constraints(), self.grid.num_points(), self.nnz());
        for p in self.grid.interior() {
            let row = self.grid.pde_index(p.i, p.j, p.k);
            for col in self.grid.stencil(p) {
                pattern.push(row, col);
            }
        }
        pattern
    }

    /// Writes the Jacobian values matching [`Pde::describe_structure`].
    ///
    /// The equation is linear, so the values do not depend on the state `x`.
    pub fn evaluate_values(&self, _x: &[f64], values: &mut [f64]) {
        for row in values.chunks_exact_mut(STENCIL.len()) {
            row.copy_from_slice(&STENCIL);
        }
    }
}
