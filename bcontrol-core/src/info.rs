/// Zero-based (C style) or one-based (Fortran style) index convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexStyle {
    /// Indices start at 0.
    #[default]
    C,
    /// Indices start at 1.
    Fortran,
}

impl IndexStyle {
    /// Returns the value of the first index under this convention.
    #[must_use]
    pub fn base(self) -> usize {
        match self {
            IndexStyle::C => 0,
            IndexStyle::Fortran => 1,
        }
    }
}

/// Problem dimensions reported to the solver before any evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NlpInfo {
    /// Number of variables.
    pub n: usize,
    /// Number of constraints.
    pub m: usize,
    /// Number of structural nonzeros in the constraint Jacobian.
    pub nnz_jac_g: usize,
    /// Number of structural nonzeros in the lower triangle of the Lagrangian Hessian.
    pub nnz_h_lag: usize,
    /// Index convention of the sparsity patterns.
    pub index_style: IndexStyle,
}
