//! Top-level calculation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use quantcalc_core::implied::ImpliedSolver;
use quantcalc_curves::Bootstrapper;
use quantcalc_math::integration::IntegrationConfig;
use quantcalc_math::solvers::{SolverConfig, SolverMethod};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::sections::{BootstrapSection, ImpliedSection, IntegrationSection, SolverSection};

/// On-disk representation of a [`CalcConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Every tunable the library exposes. Missing sections and fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Root-finder settings.
    #[serde(default)]
    pub solver: SolverSection,

    /// Implied-parameter starting points.
    #[serde(default)]
    pub implied: ImpliedSection,

    /// Numerical integration settings.
    #[serde(default)]
    pub integration: IntegrationSection,

    /// Zero-curve bootstrap settings.
    #[serde(default)]
    pub bootstrap: BootstrapSection,
}

impl CalcConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses `s` in the given format.
    pub fn parse(s: &str, format: ConfigFormat) -> ConfigResult<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(s),
            ConfigFormat::Json => Self::from_json_str(s),
        }
    }

    /// Reads a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, format)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Configured root-finding method.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Solver`] wrapping `UnsupportedMethod` for an
    /// unrecognised name.
    pub fn solver_method(&self) -> ConfigResult<SolverMethod> {
        Ok(self.solver.method.parse()?)
    }

    /// Tolerances and iteration cap.
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.solver_config()
    }

    /// Adaptive integration settings.
    pub fn integration_config(&self) -> IntegrationConfig {
        IntegrationConfig::new(
            self.integration.tolerance,
            self.integration.max_refinements,
        )
    }

    /// Solver for implied yields.
    pub fn yield_solver(&self) -> ConfigResult<ImpliedSolver> {
        self.implied_solver(self.implied.yield_guess, self.implied.yield_bracket)
    }

    /// Solver for implied volatilities.
    pub fn volatility_solver(&self) -> ConfigResult<ImpliedSolver> {
        self.implied_solver(
            self.implied.volatility_guess,
            self.implied.volatility_bracket,
        )
    }

    fn implied_solver(&self, guess: f64, bracket: Option<(f64, f64)>) -> ConfigResult<ImpliedSolver> {
        let solver = ImpliedSolver::new()
            .with_config(self.solver_config())
            .with_method(self.solver_method()?)
            .with_initial_guess(guess);

        Ok(match bracket {
            Some((lo, hi)) => solver.with_bracket(lo, hi),
            None => solver,
        })
    }

    /// Zero-curve bootstrapper. Always Newton-Raphson; only the tolerances
    /// and iteration cap come from `[solver]`.
    pub fn bootstrapper(&self) -> Bootstrapper {
        Bootstrapper::new()
            .with_config(self.solver_config())
            .with_initial_guess(self.bootstrap.initial_guess)
    }
}

impl Validate for CalcConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.solver.validate();
        errors.extend(self.implied.validate());
        errors.extend(self.integration.validate());
        errors.extend(self.bootstrap.validate());

        // Bisection cannot start without a bracket.
        if self.solver_method().ok() == Some(SolverMethod::Bisection) {
            for (field, bracket) in [
                ("implied.yield_bracket", self.implied.yield_bracket),
                ("implied.volatility_bracket", self.implied.volatility_bracket),
            ] {
                if bracket.is_none() {
                    errors.push(ValidationError::with_rule(
                        field,
                        "Bisection requires a bracket",
                        "bracket_required",
                    ));
                }
            }
        }

        errors
    }
}
