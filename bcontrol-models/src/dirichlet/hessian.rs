use bcontrol_core::SparsityPattern;

use super::{Grid, Objective, Pde};

/// Hessian of the Lagrangian `obj_factor·∇²f + Σ λ_c·∇²g_c`.
///
/// The PDE residuals are linear in the state and contribute nothing, and
/// every objective term depends on a single variable, so the Hessian is
/// diagonal: one entry per interior point, followed by one entry per face
/// point when the control term is active.
#[derive(Debug, Clone, Copy)]
pub struct LagrangianHessian<'a> {
    grid: Grid,
    objective: &'a Objective,
    pde: &'a Pde,
}

impl<'a> LagrangianHessian<'a> {
    pub(super) fn new(grid: Grid, objective: &'a Objective, pde: &'a Pde) -> Self {
        Self {
            grid,
            objective,
            pde,
        }
    }

    /// Number of structural entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        let faces = if self.objective.has_control_term() {
            self.grid.num_faces()
        } else {
            0
        };
        self.grid.num_interior() + faces
    }

    /// Returns the diagonal structure: interior points in `pde_index` order,
    /// then face points in [`Grid::faces`] order.
    #[must_use]
    pub fn describe_structure(&self) -> SparsityPattern {
        let n = self.grid.num_points();
        let mut pattern = SparsityPattern::with_capacity(n, n, self.nnz());
        for p in self.grid.interior() {
            let idx = self.grid.y_index(p.i, p.j, p.k);
            pattern.push(idx, idx);
        }
        if self.objective.has_control_term() {
            for p in self.grid.faces() {
                let idx = self.grid.y_index(p.i, p.j, p.k);
                pattern.push(idx, idx);
            }
        }
        pattern
    }

    /// Writes the values matching [`LagrangianHessian::describe_structure`].
    ///
    /// `lambda` does not enter because the constraint Hessians vanish.
    pub fn evaluate_values(&self, x: &[f64], obj_factor: f64, lambda: &[f64], values: &mut [f64]) {
        debug_assert_eq!(self.pde.num_constraints(), lambda.len());

        let interior = self.grid.num_interior();
        let (tracking, control) = values.split_at_mut(interior);

        tracking.fill(obj_factor * self.objective.tracking_curvature());

        for (value, p) in control.iter_mut().zip(self.grid.faces()) {
            *value = obj_factor * self.objective.control_curvature(x, p);
        }
    }
}
