// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! Boundary validation
//!
//! The calculator accepts any number and lets negative quantities flow
//! through the arithmetic. Callers that collect raw user input validate
//! here first: negative and non-finite quantities are rejected, never
//! clamped, and so are quantities whose annual emissions would leave the
//! range of an integer result.

use crate::factors::EmissionFactorTable;
use crate::input::CalculationInput;
use carbonprint_metrics::{CarbonResult, Category, KgCo2e};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} emissions exceed 1e15 kg CO2e (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Largest accepted annual total or category, in kg CO2e
pub const MAX_ANNUAL_KG: f64 = 1.0e15;

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Negative { field, .. }
            | InputError::NonFinite { field, .. }
            | InputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Check every quantity of `input`, reporting the first offending field
/// in schema order.
pub fn validate(input: &CalculationInput) -> Result<(), InputError> {
    for (field, value) in input.quantities() {
        if !value.is_finite() {
            warn!(field, value, "Rejected non-finite quantity");
            return Err(InputError::NonFinite { field, value });
        }
        if value < 0.0 {
            warn!(field, value, "Rejected negative quantity");
            return Err(InputError::Negative { field, value });
        }
    }
    Ok(())
}

impl EmissionFactorTable {
    /// Validate `input`, then calculate.
    ///
    /// Fails when a category or the total would exceed [`MAX_ANNUAL_KG`].
    pub fn calculate_checked(&self, input: &CalculationInput) -> Result<CarbonResult, InputError> {
        validate(input)?;

        let totals = self.category_totals(input);
        let checked = Category::ALL
            .iter()
            .map(|c| (c.as_str(), totals.get(*c)))
            .chain(std::iter::once(("total", totals.sum())));
        for (field, KgCo2e(value)) in checked {
            if !value.is_finite() || value > MAX_ANNUAL_KG {
                warn!(field, value, "Rejected out-of-range emissions");
                return Err(InputError::OutOfRange { field, value });
            }
        }

        Ok(self.calculate(input))
    }
}
