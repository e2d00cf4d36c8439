use bcontrol_core::{
    Bounds, EvalError, NlpInfo, NlpProblem, SparsityPattern, StartingPoint, check_len,
};

/// Rosenbrock objective with the single constraint `x0² + x1 = 0`.
///
/// The flags corrupt one part of the reported structure or derivatives so
/// that validation and checking can be exercised on known defects.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rosenbrock {
    pub declared_nnz_h: usize,
    pub upper_hessian: bool,
    pub gradient_error: f64,
    pub jacobian_error: f64,
    pub hessian_error: f64,
    pub drop_hessian_offdiagonal: bool,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self {
            declared_nnz_h: 3,
            upper_hessian: false,
            gradient_error: 0.0,
            jacobian_error: 0.0,
            hessian_error: 0.0,
            drop_hessian_offdiagonal: false,
        }
    }
}

impl NlpProblem for Rosenbrock {
    type Error = EvalError;

    fn info(&self) -> NlpInfo {
        NlpInfo {
            n: 2,
            m: 1,
            nnz_jac_g: 2,
            nnz_h_lag: self.declared_nnz_h,
            index_style: bcontrol_core::IndexStyle::C,
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::uniform(2, 1, -1e20, 1e20)
    }

    fn starting_point(&self) -> StartingPoint {
        StartingPoint::primal(vec![-1.2, 1.0])
    }

    fn objective(&self, x: &[f64]) -> Result<f64, EvalError> {
        check_len("x", 2, x.len())?;
        Ok((1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2))
    }

    fn gradient(&self, x: &[f64], grad_f: &mut [f64]) -> Result<(), EvalError> {
        check_len("x", 2, x.len())?;
        let r = x[1] - x[0] * x[0];
        grad_f[0] = -2.0 * (1.0 - x[0]) - 400.0 * x[0] * r + self.gradient_error;
        grad_f[1] = 200.0 * r;
        Ok(())
    }

    fn constraints(&self, x: &[f64], g: &mut [f64]) -> Result<(), EvalError> {
        check_len("x", 2, x.len())?;
        g[0] = x[0] * x[0] + x[1];
        Ok(())
    }

    fn jacobian_structure(&self) -> SparsityPattern {
        let mut pattern = SparsityPattern::with_capacity(1, 2, 2);
        pattern.push(0, 0);
        pattern.push(0, 1);
        pattern
    }

    fn jacobian_values(
        &self,
        x: &[f64],
        _pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), EvalError> {
        values[0] = 2.0 * x[0];
        values[1] = 1.0 + self.jacobian_error;
        Ok(())
    }

    fn hessian_structure(&self) -> SparsityPattern {
        let mut pattern = SparsityPattern::with_capacity(2, 2, 3);
        pattern.push(0, 0);
        if self.upper_hessian {
            pattern.push(0, 1);
        } else if !self.drop_hessian_offdiagonal {
            pattern.push(1, 0);
        }
        pattern.push(1, 1);
        pattern
    }

    fn hessian_values(
        &self,
        x: &[f64],
        obj_factor: f64,
        lambda: &[f64],
        pattern: &SparsityPattern,
        values: &mut [f64],
    ) -> Result<(), EvalError> {
        let h00 = obj_factor * (2.0 - 400.0 * x[1] + 1200.0 * x[0] * x[0])
            + 2.0 * lambda[0]
            + self.hessian_error;
        let h10 = obj_factor * (-400.0 * x[0]);
        let h11 = obj_factor * 200.0;

        for (value, e) in values.iter_mut().zip(pattern.iter()) {
            *value = match (e.row, e.col) {
                (0, 0) => h00,
                (1, 1) => h11,
                _ => h10,
            };
        }
        Ok(())
    }
}
