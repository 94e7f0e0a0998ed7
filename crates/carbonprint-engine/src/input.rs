// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! Calculation input schema
//!
//! Units are the ones a household reports naturally: km per week for
//! ground transport, trips per year for flights, kWh and m3 per month for
//! energy. The calculator annualizes them.

use crate::error::{EngineError, Result};
use crate::keys::{CarSize, CarType, DietType, FlightBand, FlightClass, Region};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::debug;

/// One household's activity data for a footprint estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    #[serde(default)]
    pub transport: TransportInput,
    pub energy: EnergyInput,
    pub consumption: ConsumptionInput,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransportInput {
    #[serde(rename = "privateCar", default, skip_serializing_if = "Option::is_none")]
    pub private_car: Option<PrivateCar>,

    #[serde(rename = "public", default, skip_serializing_if = "Option::is_none")]
    pub public_transport: Option<PublicTransport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<Flights>,
}

/// Private car use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateCar {
    #[serde(rename = "type")]
    pub car_type: CarType,

    /// Required to price gasoline and diesel cars, ignored for electric ones.
    /// Unrecognized sizes read as absent.
    #[serde(
        default,
        deserialize_with = "lenient_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<CarSize>,

    /// km per week
    pub distance: f64,
}

/// Public transport use, km per week per mode
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicTransport {
    pub subway: f64,
    pub bus: f64,
    pub taxi: f64,
}

/// Flights per year in each range band, all in one cabin class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flights {
    #[serde(default)]
    pub short: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub long: f64,
    pub class: FlightClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyInput {
    pub electricity: Electricity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<GasUsage>,
}

/// Household electricity, kWh per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Electricity {
    pub amount: f64,
    pub region: Region,
}

/// Piped gas, m3 per month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasUsage {
    pub natural_gas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionInput {
    pub diet: DietType,
}

fn lenient_size<'de, D>(deserializer: D) -> std::result::Result<Option<CarSize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(|s| s.parse().ok()))
}

impl PrivateCar {
    /// A gasoline or diesel car of the given engine size
    pub fn fuel(car_type: CarType, size: CarSize, distance: f64) -> Self {
        Self {
            car_type,
            size: Some(size),
            distance,
        }
    }

    pub fn electric(distance: f64) -> Self {
        Self {
            car_type: CarType::Electric,
            size: None,
            distance,
        }
    }
}

impl PublicTransport {
    pub fn new(subway: f64, bus: f64, taxi: f64) -> Self {
        Self { subway, bus, taxi }
    }
}

impl Flights {
    pub fn new(short: f64, medium: f64, long: f64, class: FlightClass) -> Self {
        Self {
            short,
            medium,
            long,
            class,
        }
    }

    pub fn trips(&self, band: FlightBand) -> f64 {
        match band {
            FlightBand::Short => self.short,
            FlightBand::Medium => self.medium,
            FlightBand::Long => self.long,
        }
    }
}

impl Electricity {
    pub fn new(amount: f64, region: Region) -> Self {
        Self { amount, region }
    }
}

impl CalculationInput {
    /// Input with only the mandatory sections: electricity and diet.
    pub fn new(electricity: Electricity, diet: DietType) -> Self {
        Self {
            transport: TransportInput::default(),
            energy: EnergyInput {
                electricity,
                gas: None,
            },
            consumption: ConsumptionInput { diet },
        }
    }

    pub fn with_private_car(mut self, car: PrivateCar) -> Self {
        self.transport.private_car = Some(car);
        self
    }

    pub fn with_public_transport(mut self, public: PublicTransport) -> Self {
        self.transport.public_transport = Some(public);
        self
    }

    pub fn with_flights(mut self, flights: Flights) -> Self {
        self.transport.flight = Some(flights);
        self
    }

    pub fn with_natural_gas(mut self, m3_per_month: f64) -> Self {
        self.energy.gas = Some(GasUsage {
            natural_gas: m3_per_month,
        });
        self
    }

    /// Every numeric field present in this input, with its dotted path
    pub fn quantities(&self) -> Vec<(&'static str, f64)> {
        let mut fields = Vec::new();

        if let Some(car) = &self.transport.private_car {
            fields.push(("transport.privateCar.distance", car.distance));
        }
        if let Some(public) = &self.transport.public_transport {
            fields.push(("transport.public.subway", public.subway));
            fields.push(("transport.public.bus", public.bus));
            fields.push(("transport.public.taxi", public.taxi));
        }
        if let Some(flight) = &self.transport.flight {
            fields.push(("transport.flight.short", flight.short));
            fields.push(("transport.flight.medium", flight.medium));
            fields.push(("transport.flight.long", flight.long));
        }
        fields.push(("energy.electricity.amount", self.energy.electricity.amount));
        if let Some(gas) = &self.energy.gas {
            fields.push(("energy.gas.naturalGas", gas.natural_gas));
        }

        fields
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load an input document, choosing the format by extension
    /// (`json`, `toml`, `yaml`/`yml`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let input = match ext {
            "json" => Self::from_json_str(&content)?,
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            other => return Err(EngineError::UnsupportedFormat(other.to_string())),
        };

        debug!(path = %path.display(), "Loaded calculation input");
        Ok(input)
    }
}

/// The calculator form's initial state: every section present with zero
/// usage, a medium gasoline car, economy flights, the national grid and a
/// balanced diet.
impl Default for CalculationInput {
    fn default() -> Self {
        CalculationInput::new(Electricity::new(0.0, Region::NationalAvg), DietType::Balanced)
            .with_private_car(PrivateCar::fuel(CarType::Gasoline, CarSize::Medium, 0.0))
            .with_public_transport(PublicTransport::default())
            .with_flights(Flights::new(0.0, 0.0, 0.0, FlightClass::Economy))
            .with_natural_gas(0.0)
    }
}
