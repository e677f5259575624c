use crate::math::RealNumber;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Solver tunables, immutable for the duration of a solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings<T: RealNumber> {
    /// Penalty parameter, must be positive.
    pub rho: T,
    /// Over-relaxation parameter, must lie in the open interval (0, 2).
    pub alpha: T,
    pub eps_abs: T,
    pub eps_rel: T,
    pub max_iterations: usize,
    pub max_time: Option<Duration>,
}

impl<T> Settings<T>
where
    T: RealNumber,
{
    pub fn with_tolerances(eps_abs: T, eps_rel: T) -> Self {
        Self {
            eps_abs,
            eps_rel,
            ..Self::default()
        }
    }

    /// The iteration kernel assumes well-formed settings; callers run this
    /// before the first iteration.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rho <= T::zero() {
            return Err(SettingsError::Invalid("rho must be positive".into()));
        }
        if self.alpha <= T::zero() || self.alpha >= T::from_f64(2.0).unwrap() {
            return Err(SettingsError::Invalid(
                "alpha must lie strictly between 0 and 2".into(),
            ));
        }
        if self.eps_abs < T::zero() || self.eps_rel < T::zero() {
            return Err(SettingsError::Invalid(
                "tolerances must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

impl<T> Default for Settings<T>
where
    T: RealNumber,
{
    fn default() -> Self {
        Self {
            rho: T::from_f64(1.0).unwrap(),
            alpha: T::from_f64(1.6).unwrap(),
            eps_abs: T::from_f64(1e-6).unwrap(),
            eps_rel: T::from_f64(1e-6).unwrap(),
            max_iterations: 10_000,
            max_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::math::Scalar;

    #[test]
    fn default_settings_validate() {
        assert!(Settings::<Scalar>::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut settings = Settings::<Scalar>::default();
        settings.rho = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::<Scalar>::default();
        settings.alpha = 2.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::<Scalar>::default();
        settings.eps_rel = -1e-9;
        assert!(settings.validate().is_err());
    }
}
