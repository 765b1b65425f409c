//! Backend and seed configuration.
//!
//! [`NumprimConfig`] is plain data with a [`Default`]; [`from_env`]
//! fills it from `NUMPRIM_BACKEND` and `NUMPRIM_SEED`, and
//! [`validate`](NumprimConfig::validate) checks it against the running
//! CPU. Hosts that embed the library without environment variables build
//! the struct directly.
//!
//! The two variables are parsed independently
//! ([`BackendPreference::from_lookup`], [`seed_from_lookup`]), so a
//! malformed seed never changes the backend and vice versa.
//!
//! [`from_env`]: NumprimConfig::from_env

use std::env;
use std::sync::OnceLock;

use crate::batch::{Backend, BatchKernels};
use crate::error::ConfigError;
use crate::random::Generator;

/// Environment variable selecting the batch backend.
pub const BACKEND_ENV: &str = "NUMPRIM_BACKEND";
/// Environment variable holding a decimal `u64` seed.
pub const SEED_ENV: &str = "NUMPRIM_SEED";

/// Which batch backend to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendPreference {
    /// Best available backend (default).
    #[default]
    Auto,
    /// Always the portable scalar loop.
    Scalar,
    /// A vector backend; fails validation if the CPU has none.
    Simd,
}

impl BackendPreference {
    /// Parse `auto`, `scalar` or `simd`, ignoring case and surrounding space.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "scalar" => Ok(Self::Scalar),
            "simd" => Ok(Self::Simd),
            _ => Err(ConfigError::UnknownBackend {
                value: value.to_string(),
            }),
        }
    }

    /// Read [`BACKEND_ENV`] through `lookup`. Unset means [`Auto`](Self::Auto).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BACKEND_ENV) {
            Some(value) => Self::parse(&value),
            None => Ok(Self::Auto),
        }
    }

    /// Lower-case name, matching the accepted spelling in [`parse`](Self::parse).
    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Scalar => "scalar",
            Self::Simd => "simd",
        }
    }
}

/// Read [`SEED_ENV`] through `lookup`. Unset means `None`.
pub fn seed_from_lookup<F>(lookup: F) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(SEED_ENV) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(seed) => Ok(Some(seed)),
        Err(_) => Err(ConfigError::InvalidSeed { value }),
    }
}

static PROCESS_SEED: OnceLock<Option<u64>> = OnceLock::new();

/// `NUMPRIM_SEED`, read once per process.
///
/// A malformed value is logged and treated as unset, so generators fall
/// back to entropy.
pub fn process_seed() -> Option<u64> {
    *PROCESS_SEED.get_or_init(|| match seed_from_lookup(|key| env::var(key).ok()) {
        Ok(seed) => {
            if let Some(seed) = seed {
                log::debug!("numprim: generators seeded from {SEED_ENV}={seed}");
            }
            seed
        }
        Err(e) => {
            log::warn!("numprim: {e}; seeding generators from entropy");
            None
        }
    })
}

/// Library configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumprimConfig {
    /// Batch backend preference. Default: [`BackendPreference::Auto`].
    pub backend: BackendPreference,
    /// Seed for generators built by [`generator`](Self::generator).
    /// `None` seeds from entropy. Default: `None`.
    pub seed: Option<u64>,
}

impl NumprimConfig {
    /// Read `NUMPRIM_BACKEND` and `NUMPRIM_SEED`. Unset variables keep
    /// their defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            backend: BackendPreference::from_lookup(&lookup)?,
            seed: seed_from_lookup(&lookup)?,
        })
    }

    /// Check the configuration against the running CPU.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendPreference::Simd && Backend::detect() == Backend::Scalar {
            return Err(ConfigError::BackendUnavailable {
                requested: self.backend.name(),
            });
        }
        Ok(())
    }

    /// Resolve the backend preference into kernels.
    pub fn kernels(&self) -> Result<BatchKernels, ConfigError> {
        self.validate()?;
        let kernels = match self.backend {
            BackendPreference::Scalar => BatchKernels::scalar(),
            BackendPreference::Auto | BackendPreference::Simd => BatchKernels::detect(),
        };
        log::debug!(
            "numprim: backend preference '{}' resolved to {}",
            self.backend.name(),
            kernels.backend()
        );
        Ok(kernels)
    }

    /// A generator seeded from [`seed`](Self::seed), or from entropy.
    pub fn generator(&self) -> Generator {
        match self.seed {
            Some(seed) => Generator::from_seed(seed),
            None => Generator::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = NumprimConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, NumprimConfig::default());
        assert_eq!(config.backend, BackendPreference::Auto);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn parses_backend_case_insensitively() {
        let config = NumprimConfig::from_lookup(lookup(&[(BACKEND_ENV, " Scalar ")])).unwrap();
        assert_eq!(config.backend, BackendPreference::Scalar);
        assert_eq!(config.kernels().unwrap().backend(), Backend::Scalar);
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = NumprimConfig::from_lookup(lookup(&[(BACKEND_ENV, "sse9")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownBackend {
                value: "sse9".into()
            }
        );
    }

    #[test]
    fn parses_seed() {
        let config = NumprimConfig::from_lookup(lookup(&[(SEED_ENV, "1234")])).unwrap();
        assert_eq!(config.seed, Some(1234));
        let mut a = config.generator();
        let mut b = Generator::from_seed(1234);
        assert_eq!(a.next_i64(), b.next_i64());
    }

    #[test]
    fn rejects_negative_seed() {
        let err = NumprimConfig::from_lookup(lookup(&[(SEED_ENV, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed { .. }));
    }

    #[test]
    fn backend_and_seed_parse_independently() {
        let vars = lookup(&[(BACKEND_ENV, "scalar"), (SEED_ENV, "abc")]);
        assert_eq!(BackendPreference::from_lookup(&vars), Ok(BackendPreference::Scalar));
        assert!(matches!(seed_from_lookup(&vars), Err(ConfigError::InvalidSeed { .. })));

        let vars = lookup(&[(BACKEND_ENV, "sse9"), (SEED_ENV, " 42 ")]);
        assert_eq!(seed_from_lookup(&vars), Ok(Some(42)));
        assert!(BackendPreference::from_lookup(&vars).is_err());
    }

    #[test]
    fn unset_variables_mean_defaults() {
        let vars = lookup(&[]);
        assert_eq!(BackendPreference::from_lookup(&vars), Ok(BackendPreference::Auto));
        assert_eq!(seed_from_lookup(&vars), Ok(None));
    }

    #[test]
    fn simd_preference_matches_cpu() {
        let config = NumprimConfig {
            backend: BackendPreference::Simd,
            seed: None,
        };
        if Backend::detect() == Backend::Scalar {
            assert_eq!(
                config.validate(),
                Err(ConfigError::BackendUnavailable { requested: "simd" })
            );
        } else {
            assert_ne!(config.kernels().unwrap().backend(), Backend::Scalar);
        }
    }
}
