// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! Enumerated keys shared by the factor table and the input schema.
//!
//! Serialized names are camelCase (`nationalAvg`, `meatHeavy`) so records
//! captured by the web form deserialize unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that names none of an enumeration's keys
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! keyed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $key => Ok($name::$variant), )+
                    other => Err(UnknownKey {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

keyed_enum! {
    /// Private car drivetrain
    CarType, "car type" {
        Gasoline => "gasoline",
        Diesel => "diesel",
        Electric => "electric",
    }
}

keyed_enum! {
    /// Combustion fuel for cars priced by engine size
    FuelType, "fuel type" {
        Gasoline => "gasoline",
        Diesel => "diesel",
    }
}

keyed_enum! {
    /// Engine displacement class of a combustion car
    CarSize, "car size" {
        /// Below 1.6 L
        Small => "small",
        /// 1.6 L to 2.0 L
        Medium => "medium",
        /// Above 2.0 L
        Large => "large",
    }
}

keyed_enum! {
    /// Electric car body type
    BodyType, "body type" {
        Sedan => "sedan",
        Suv => "suv",
    }
}

keyed_enum! {
    /// City bus drivetrain
    BusType, "bus type" {
        Diesel => "diesel",
        Electric => "electric",
    }
}

keyed_enum! {
    /// Flight range band
    FlightBand, "flight band" {
        /// Under 500 km
        Short => "short",
        /// 500 km to 1500 km
        Medium => "medium",
        /// Over 1500 km
        Long => "long",
    }
}

keyed_enum! {
    /// Cabin class shared by all flights of an input
    FlightClass, "flight class" {
        Economy => "economy",
        Business => "business",
        First => "first",
    }
}

keyed_enum! {
    /// Regional electricity grid
    Region, "region" {
        NorthChina => "northChina",
        EastChina => "eastChina",
        SouthChina => "southChina",
        NationalAvg => "nationalAvg",
    }
}

keyed_enum! {
    /// Habitual diet
    DietType, "diet" {
        MeatHeavy => "meatHeavy",
        Balanced => "balanced",
        Vegetarian => "vegetarian",
    }
}

impl CarType {
    /// Fuel used to look up a size-dependent factor; `None` for electric cars.
    pub fn fuel(&self) -> Option<FuelType> {
        match self {
            CarType::Gasoline => Some(FuelType::Gasoline),
            CarType::Diesel => Some(FuelType::Diesel),
            CarType::Electric => None,
        }
    }
}

impl FlightBand {
    /// Assumed length of one trip in this band, in km
    pub fn representative_distance_km(&self) -> f64 {
        match self {
            FlightBand::Short => 300.0,
            FlightBand::Medium => 1000.0,
            FlightBand::Long => 5000.0,
        }
    }
}
