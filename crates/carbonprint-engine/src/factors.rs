// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! Emission factor table
//!
//! A record-of-records with one field per enumerated key, so every table
//! is total over the input domain. Units:
//!
//! | Entry                         | Unit                      |
//! |-------------------------------|---------------------------|
//! | `transport.fuelCar`           | kg CO2e / km              |
//! | `transport.electricCar`       | kg CO2e / km              |
//! | `transport.public`            | kg CO2e / passenger-km    |
//! | `transport.flight`            | kg CO2e / passenger-km    |
//! | `energy.electricity`          | kg CO2e / kWh             |
//! | `energy.gas.naturalGas`       | kg CO2e / m3              |
//! | `energy.gas.lpg`              | kg CO2e / kg              |
//! | `consumption.diet`            | kg CO2e / day             |

use crate::error::{EngineError, Result};
use crate::keys::{BodyType, BusType, CarSize, DietType, FlightBand, FlightClass, FuelType, Region};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Built-in factors (regional grid averages and IPCC-derived defaults)
pub static DEFAULT_FACTORS: EmissionFactorTable = EmissionFactorTable {
    transport: TransportFactors {
        fuel_car: FuelCarFactors {
            gasoline: SizeFactors {
                small: 0.15,
                medium: 0.20,
                large: 0.28,
            },
            diesel: SizeFactors {
                small: 0.14,
                medium: 0.18,
                large: 0.25,
            },
        },
        electric_car: ElectricCarFactors {
            sedan: 0.08,
            suv: 0.10,
        },
        public: PublicTransportFactors {
            subway: 0.04,
            bus: BusFactors {
                diesel: 0.08,
                electric: 0.03,
            },
            // includes empty cruising
            taxi: 0.25,
        },
        flight: FlightFactors {
            short: CabinFactors {
                economy: 0.25,
                business: 0.38,
                first: 0.50,
            },
            medium: CabinFactors {
                economy: 0.18,
                business: 0.27,
                first: 0.36,
            },
            long: CabinFactors {
                economy: 0.15,
                business: 0.23,
                first: 0.30,
            },
        },
    },
    energy: EnergyFactors {
        electricity: ElectricityFactors {
            north_china: 0.88,
            east_china: 0.70,
            south_china: 0.65,
            national_avg: 0.58,
        },
        gas: GasFactors {
            natural_gas: 2.16,
            lpg: 3.00,
        },
    },
    consumption: ConsumptionFactors {
        diet: DietFactors {
            meat_heavy: 7.2,
            balanced: 4.5,
            vegetarian: 2.8,
        },
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactorTable {
    pub transport: TransportFactors,
    pub energy: EnergyFactors,
    pub consumption: ConsumptionFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportFactors {
    pub fuel_car: FuelCarFactors,
    pub electric_car: ElectricCarFactors,
    pub public: PublicTransportFactors,
    pub flight: FlightFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCarFactors {
    pub gasoline: SizeFactors,
    pub diesel: SizeFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeFactors {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricCarFactors {
    pub sedan: f64,
    pub suv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTransportFactors {
    pub subway: f64,
    pub bus: BusFactors,
    pub taxi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusFactors {
    pub diesel: f64,
    /// Not selectable by the input schema; buses are priced as diesel.
    pub electric: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightFactors {
    pub short: CabinFactors,
    pub medium: CabinFactors,
    pub long: CabinFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinFactors {
    pub economy: f64,
    pub business: f64,
    pub first: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyFactors {
    pub electricity: ElectricityFactors,
    pub gas: GasFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityFactors {
    pub north_china: f64,
    pub east_china: f64,
    pub south_china: f64,
    pub national_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFactors {
    pub natural_gas: f64,
    /// Not selectable by the input schema.
    pub lpg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionFactors {
    pub diet: DietFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietFactors {
    pub meat_heavy: f64,
    pub balanced: f64,
    pub vegetarian: f64,
}

impl SizeFactors {
    pub fn get(&self, size: CarSize) -> f64 {
        match size {
            CarSize::Small => self.small,
            CarSize::Medium => self.medium,
            CarSize::Large => self.large,
        }
    }
}

impl CabinFactors {
    pub fn get(&self, class: FlightClass) -> f64 {
        match class {
            FlightClass::Economy => self.economy,
            FlightClass::Business => self.business,
            FlightClass::First => self.first,
        }
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        DEFAULT_FACTORS.clone()
    }
}

impl EmissionFactorTable {
    pub fn fuel_car(&self, fuel: FuelType, size: CarSize) -> f64 {
        let sizes = match fuel {
            FuelType::Gasoline => &self.transport.fuel_car.gasoline,
            FuelType::Diesel => &self.transport.fuel_car.diesel,
        };
        sizes.get(size)
    }

    pub fn electric_car(&self, body: BodyType) -> f64 {
        match body {
            BodyType::Sedan => self.transport.electric_car.sedan,
            BodyType::Suv => self.transport.electric_car.suv,
        }
    }

    pub fn bus(&self, bus: BusType) -> f64 {
        match bus {
            BusType::Diesel => self.transport.public.bus.diesel,
            BusType::Electric => self.transport.public.bus.electric,
        }
    }

    pub fn flight(&self, band: FlightBand, class: FlightClass) -> f64 {
        let cabins = match band {
            FlightBand::Short => &self.transport.flight.short,
            FlightBand::Medium => &self.transport.flight.medium,
            FlightBand::Long => &self.transport.flight.long,
        };
        cabins.get(class)
    }

    pub fn electricity(&self, region: Region) -> f64 {
        let grid = &self.energy.electricity;
        match region {
            Region::NorthChina => grid.north_china,
            Region::EastChina => grid.east_china,
            Region::SouthChina => grid.south_china,
            Region::NationalAvg => grid.national_avg,
        }
    }

    pub fn diet(&self, diet: DietType) -> f64 {
        let diets = &self.consumption.diet;
        match diet {
            DietType::MeatHeavy => diets.meat_heavy,
            DietType::Balanced => diets.balanced,
            DietType::Vegetarian => diets.vegetarian,
        }
    }

    /// Every factor with its dotted path, e.g. `transport.flight.short.first`
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries = Vec::new();

        for fuel in FuelType::ALL {
            for size in CarSize::ALL {
                entries.push((
                    format!("transport.fuelCar.{fuel}.{size}"),
                    self.fuel_car(*fuel, *size),
                ));
            }
        }
        for body in BodyType::ALL {
            entries.push((
                format!("transport.electricCar.{body}"),
                self.electric_car(*body),
            ));
        }
        entries.push((
            "transport.public.subway".to_string(),
            self.transport.public.subway,
        ));
        for bus in BusType::ALL {
            entries.push((format!("transport.public.bus.{bus}"), self.bus(*bus)));
        }
        entries.push(("transport.public.taxi".to_string(), self.transport.public.taxi));
        for band in FlightBand::ALL {
            for class in FlightClass::ALL {
                entries.push((
                    format!("transport.flight.{band}.{class}"),
                    self.flight(*band, *class),
                ));
            }
        }
        for region in Region::ALL {
            entries.push((
                format!("energy.electricity.{region}"),
                self.electricity(*region),
            ));
        }
        entries.push((
            "energy.gas.naturalGas".to_string(),
            self.energy.gas.natural_gas,
        ));
        entries.push(("energy.gas.lpg".to_string(), self.energy.gas.lpg));
        for diet in DietType::ALL {
            entries.push((format!("consumption.diet.{diet}"), self.diet(*diet)));
        }

        entries
    }

    /// Reject tables holding a negative or non-finite factor.
    pub fn validate(&self) -> Result<()> {
        match self
            .entries()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((path, value)) => Err(EngineError::InvalidFactor { path, value }),
            None => Ok(()),
        }
    }

    /// Parse a complete table from TOML. Missing entries fail to parse.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: EmissionFactorTable = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a table from a TOML or JSON file, by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let table = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => {
                let table: EmissionFactorTable = serde_json::from_str(&content)?;
                table.validate()?;
                table
            }
            _ => Self::from_toml_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded emission factor table");
        Ok(table)
    }
}
