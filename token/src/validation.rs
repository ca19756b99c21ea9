//! Verification options.

use chrono::Duration;

use jw3t_keyring::Algorithm;

/// Options controlling token verification.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Leeway applied to time-based claims.
    pub leeway: Duration,
    /// Whether to validate the expiration claim.
    pub validate_exp: bool,
    /// Algorithms the verifier will accept.
    pub allowed_algorithms: Vec<Algorithm>,
    /// Audience the payload must carry, when set.
    pub expected_audience: Option<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            leeway: Duration::seconds(60),
            validate_exp: true,
            allowed_algorithms: vec![Algorithm::Sr25519, Algorithm::Ed25519],
            expected_audience: None,
        }
    }
}

impl ValidationOptions {
    /// Strict options: no leeway.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
            ..Self::default()
        }
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set the accepted algorithms.
    #[must_use]
    pub fn allow_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.allowed_algorithms = algorithms;
        self
    }

    /// Require the payload to carry this audience.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }
}
