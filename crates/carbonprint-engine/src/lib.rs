// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! # carbonprint Engine
//!
//! Deterministic household carbon footprint calculator. Maps a week's
//! travel, a month's energy use and a diet choice to an annual estimate
//! in kg CO2e, split into transport, energy and consumption.
//!
//! The calculation is a pure function of the input and an immutable
//! [`EmissionFactorTable`]; it performs no I/O and is safe to call from
//! any number of threads.

pub mod calculator;
pub mod error;
pub mod factors;
pub mod input;
pub mod keys;
pub mod validation;

pub use carbonprint_metrics::{Breakdown, CarbonResult, Category, FootprintRating, KgCo2e};
pub use error::{EngineError, Result};
pub use factors::{EmissionFactorTable, DEFAULT_FACTORS};
pub use input::{
    CalculationInput, ConsumptionInput, Electricity, EnergyInput, Flights, GasUsage, PrivateCar,
    PublicTransport, TransportInput,
};
pub use keys::{BodyType, BusType, CarSize, CarType, DietType, FlightBand, FlightClass, FuelType, Region};
pub use validation::{validate, InputError, MAX_ANNUAL_KG};

/// Annual footprint of `input` using the built-in factor table
pub fn calculate(input: &CalculationInput) -> CarbonResult {
    DEFAULT_FACTORS.calculate(input)
}

/// Validate `input`, then calculate with the built-in factor table
pub fn calculate_checked(input: &CalculationInput) -> std::result::Result<CarbonResult, InputError> {
    DEFAULT_FACTORS.calculate_checked(input)
}
