// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! Annual footprint calculation
//!
//! Three independent accumulators (transport, energy, consumption) are
//! built from annualized contributions, then rounded by
//! [`CategoryTotals::finalize`]. Absent sections contribute nothing, and a
//! gasoline or diesel car without an engine size contributes zero.
//! Quantities are not range-checked here; see [`crate::validation`].

use crate::factors::EmissionFactorTable;
use crate::input::{CalculationInput, ConsumptionInput, EnergyInput, TransportInput};
use crate::keys::{BodyType, BusType, CarType, FlightBand};
use carbonprint_metrics::{CarbonResult, CategoryTotals, KgCo2e};
use tracing::debug;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Electric cars are always priced with this body type.
pub const ELECTRIC_CAR_BODY: BodyType = BodyType::Sedan;

/// Buses are always priced with this drivetrain.
pub const BUS_TYPE: BusType = BusType::Diesel;

impl EmissionFactorTable {
    /// Annual footprint of `input` priced with this table
    pub fn calculate(&self, input: &CalculationInput) -> CarbonResult {
        let totals = self.category_totals(input);
        let result = totals.finalize();

        debug!(
            total = result.total,
            transport = result.breakdown.transport,
            energy = result.breakdown.energy,
            consumption = result.breakdown.consumption,
            "Calculated footprint"
        );
        result
    }

    /// Unrounded annual emissions per category
    pub fn category_totals(&self, input: &CalculationInput) -> CategoryTotals {
        CategoryTotals {
            transport: self.transport_emissions(&input.transport),
            energy: self.energy_emissions(&input.energy),
            consumption: self.consumption_emissions(&input.consumption),
        }
    }

    pub fn transport_emissions(&self, transport: &TransportInput) -> KgCo2e {
        let mut total = 0.0;

        if let Some(car) = &transport.private_car {
            let factor = match (car.car_type, car.size) {
                (CarType::Electric, _) => self.electric_car(ELECTRIC_CAR_BODY),
                (fuel_car, Some(size)) => fuel_car
                    .fuel()
                    .map(|fuel| self.fuel_car(fuel, size))
                    .unwrap_or(0.0),
                (_, None) => 0.0,
            };
            total += car.distance * factor * WEEKS_PER_YEAR;
        }

        if let Some(public) = &transport.public_transport {
            total += (public.subway * self.transport.public.subway
                + public.bus * self.bus(BUS_TYPE)
                + public.taxi * self.transport.public.taxi)
                * WEEKS_PER_YEAR;
        }

        if let Some(flight) = &transport.flight {
            total += FlightBand::ALL
                .iter()
                .map(|band| {
                    flight.trips(*band)
                        * band.representative_distance_km()
                        * self.flight(*band, flight.class)
                })
                .fold(0.0, |acc, kg| acc + kg);
        }

        KgCo2e::kilograms(total)
    }

    pub fn energy_emissions(&self, energy: &EnergyInput) -> KgCo2e {
        let electricity = &energy.electricity;
        let mut total =
            electricity.amount * self.electricity(electricity.region) * MONTHS_PER_YEAR;

        if let Some(gas) = &energy.gas {
            total += gas.natural_gas * self.energy.gas.natural_gas * MONTHS_PER_YEAR;
        }

        KgCo2e::kilograms(total)
    }

    pub fn consumption_emissions(&self, consumption: &ConsumptionInput) -> KgCo2e {
        KgCo2e::kilograms(self.diet(consumption.diet) * DAYS_PER_YEAR)
    }
}
