//! Configuration settings for the BIP solver.

use crate::error::{BipError, BipResult};
use crate::model::DEFAULT_INT_TOL;

/// Branch-and-bound solver settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BipSettings {
    // === Numerics ===
    /// Integer feasibility tolerance.
    /// A relaxation value is integral if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Termination criteria ===
    /// Maximum number of nodes to explore (None = unlimited).
    pub max_nodes: Option<u64>,

    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    // === Output ===
    /// Log new incumbents and periodic progress at info level.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for BipSettings {
    fn default() -> Self {
        Self {
            int_feas_tol: DEFAULT_INT_TOL,
            max_nodes: None,
            time_limit_ms: None,
            verbose: false,
            log_freq: 100,
        }
    }
}

impl BipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Set integer feasibility tolerance.
    pub fn with_int_feas_tol(mut self, tol: f64) -> Self {
        self.int_feas_tol = tol;
        self
    }

    /// Check that the settings describe a usable search.
    pub fn validate(&self) -> BipResult<()> {
        if !self.int_feas_tol.is_finite() || self.int_feas_tol < 0.0 || self.int_feas_tol >= 0.5 {
            return Err(BipError::InvalidSettings(format!(
                "int_feas_tol must lie in [0, 0.5), got {}",
                self.int_feas_tol
            )));
        }
        if self.log_freq == 0 {
            return Err(BipError::InvalidSettings(
                "log_freq must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
