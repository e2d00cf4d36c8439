/// Configuration for the finite-difference derivative checks.
///
/// Each variable is perturbed by `perturbation · max(1, |x_j|)` in both
/// directions. An analytic value `a` and its estimate `e` disagree when
/// `|a − e| > abs_tol + rel_tol · max(|a|, |e|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub perturbation: f64,
    pub rel_tol: f64,
    pub abs_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            perturbation: 1e-6,
            rel_tol: 1e-4,
            abs_tol: 1e-8,
        }
    }
}

impl Config {
    /// Validates that the perturbation is positive and the tolerances are
    /// non-negative, all finite.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.perturbation.is_finite() || self.perturbation <= 0.0 {
            return Err("perturbation must be finite and positive");
        }
        if !self.rel_tol.is_finite() || self.rel_tol < 0.0 {
            return Err("rel_tol must be finite and non-negative");
        }
        if !self.abs_tol.is_finite() || self.abs_tol < 0.0 {
            return Err("abs_tol must be finite and non-negative");
        }
        Ok(())
    }

    pub(super) fn step(&self, x: f64) -> f64 {
        self.perturbation * x.abs().max(1.0)
    }

    pub(super) fn agrees(&self, analytic: f64, estimate: f64) -> bool {
        let scale = analytic.abs().max(estimate.abs());
        (analytic - estimate).abs() <= self.abs_tol + self.rel_tol * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_perturbation() {
        let config = Config {
            perturbation: 0.0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err("perturbation must be finite and positive")
        );
    }

    #[test]
    fn agreement_mixes_absolute_and_relative_tolerance() {
        let config = Config::default();
        assert!(config.agrees(0.0, 5e-9));
        assert!(!config.agrees(0.0, 5e-8));
        assert!(config.agrees(100.0, 100.005));
        assert!(!config.agrees(100.0, 100.02));
    }
}
