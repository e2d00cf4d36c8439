use bcontrol_core::Scaling;

use super::Grid;

/// Objective scale `1/h³`, which brings the `h³`-weighted tracking sum back
/// to order one. Variables and constraints are left unscaled.
pub(super) fn user_scaling(grid: &Grid) -> Scaling {
    Scaling::objective_only(1.0 / grid.hhh())
}
