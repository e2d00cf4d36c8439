/// Lower and upper bounds on variables and constraints.
///
/// Equality constraints are expressed with equal lower and upper bounds.
/// Magnitudes of `1e19` or more are treated as infinite by interior-point
/// solvers, so an unbounded side is written as e.g. `-1e20`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub x_l: Vec<f64>,
    pub x_u: Vec<f64>,
    pub g_l: Vec<f64>,
    pub g_u: Vec<f64>,
}

impl Bounds {
    /// Creates bounds for `n` variables and `m` constraints.
    ///
    /// Variables start out bounded by `[lower, upper]` and constraints are
    /// equalities with right-hand side zero.
    #[must_use]
    pub fn uniform(n: usize, m: usize, lower: f64, upper: f64) -> Self {
        Self {
            x_l: vec![lower; n],
            x_u: vec![upper; n],
            g_l: vec![0.0; m],
            g_u: vec![0.0; m],
        }
    }

    /// Sets the bounds of variable `index`.
    pub fn set_variable(&mut self, index: usize, lower: f64, upper: f64) {
        self.x_l[index] = lower;
        self.x_u[index] = upper;
    }

    /// Returns true if every constraint is an equality.
    #[must_use]
    pub fn all_equalities(&self) -> bool {
        #[allow(clippy::float_cmp)]
        let equal = self.g_l.iter().zip(&self.g_u).all(|(l, u)| l == u);
        equal
    }
}
