use std::env;

use crate::domain::variant::{MAX_X01_TARGET, MIN_X01_TARGET};
use crate::error::AppError;

pub const DEFAULT_X01_TARGET: u16 = 501;

/// Engine defaults applied to newly created games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub x01_target: u16,
    /// Frozen into each X01 game when it is created.
    pub double_out: bool,
    /// Seed for Round-the-World shuffles; `None` draws from the OS.
    pub rtw_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            x01_target: DEFAULT_X01_TARGET,
            double_out: true,
            rtw_seed: None,
        }
    }
}

impl EngineConfig {
    /// Read `SCORER_X01_TARGET`, `SCORER_DOUBLE_OUT` and `SCORER_RTW_SEED`.
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            x01_target: x01_target()?,
            double_out: double_out()?,
            rtw_seed: rtw_seed()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_X01_TARGET..=MAX_X01_TARGET).contains(&self.x01_target) {
            return Err(AppError::config(format!(
                "X01 target must be within {MIN_X01_TARGET}..={MAX_X01_TARGET}, got {}",
                self.x01_target
            )));
        }
        Ok(())
    }
}

/// Get the default X01 target (defaults to 501)
fn x01_target() -> Result<u16, AppError> {
    match opt_var("SCORER_X01_TARGET") {
        None => Ok(DEFAULT_X01_TARGET),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::config(format!("SCORER_X01_TARGET is not a number: '{raw}'"))
        }),
    }
}

/// Get the double-out default (defaults to true)
fn double_out() -> Result<bool, AppError> {
    match opt_var("SCORER_DOUBLE_OUT") {
        None => Ok(true),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::config(format!(
                "SCORER_DOUBLE_OUT must be a boolean, got '{raw}'"
            ))),
        },
    }
}

fn rtw_seed() -> Result<Option<u64>, AppError> {
    opt_var("SCORER_RTW_SEED")
        .map(|raw| {
            raw.parse().map_err(|_| {
                AppError::config(format!("SCORER_RTW_SEED is not a u64: '{raw}'"))
            })
        })
        .transpose()
}

/// Unset and blank are treated alike.
fn opt_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
