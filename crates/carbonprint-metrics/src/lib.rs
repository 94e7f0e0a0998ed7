// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! # carbonprint Metrics
//!
//! Core value types for household carbon footprint estimates: emission
//! quantities, the three footprint categories, and the integer result
//! handed to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// Emissions in kilograms of CO2 equivalent
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct KgCo2e(pub f64);

impl KgCo2e {
    pub const ZERO: Self = KgCo2e(0.0);

    pub fn kilograms(kg: f64) -> Self {
        KgCo2e(kg)
    }

    /// Round half away from zero to whole kilograms.
    pub fn rounded(self) -> i64 {
        self.0.round() as i64
    }
}

impl Add for KgCo2e {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        KgCo2e(self.0 + rhs.0)
    }
}

impl AddAssign for KgCo2e {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for KgCo2e {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        KgCo2e(self.0 * rhs)
    }
}

impl fmt::Display for KgCo2e {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} kg CO2e", self.0)
    }
}

/// Top-level partition of a footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Private car, public transport and flights
    Transport,
    /// Household electricity and gas
    Energy,
    /// Diet
    Consumption,
}

impl Category {
    /// All categories in reporting order
    pub const ALL: [Category; 3] = [Category::Transport, Category::Energy, Category::Consumption];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Energy => "energy",
            Category::Consumption => "consumption",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrounded annual emissions per category.
///
/// Accumulators fill this in; [`CategoryTotals::finalize`] applies the
/// rounding rules that produce a [`CarbonResult`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub transport: KgCo2e,
    pub energy: KgCo2e,
    pub consumption: KgCo2e,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> KgCo2e {
        match category {
            Category::Transport => self.transport,
            Category::Energy => self.energy,
            Category::Consumption => self.consumption,
        }
    }

    /// Unrounded sum of all three categories
    pub fn sum(&self) -> KgCo2e {
        self.transport + self.energy + self.consumption
    }

    /// Round each category on its own, and the total from the unrounded sum.
    ///
    /// The total is never derived from the rounded breakdown, so it may
    /// differ from the breakdown sum by one kilogram.
    pub fn finalize(&self) -> CarbonResult {
        CarbonResult {
            total: self.sum().rounded(),
            breakdown: Breakdown {
                transport: self.transport.rounded(),
                energy: self.energy.rounded(),
                consumption: self.consumption.rounded(),
            },
        }
    }
}

/// Rounded annual emissions per category, in kg CO2e
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub transport: i64,
    pub energy: i64,
    pub consumption: i64,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Transport => self.transport,
            Category::Energy => self.energy,
            Category::Consumption => self.consumption,
        }
    }

    /// Categories with their values, in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Saturates at the `i64` bounds
    pub fn sum(&self) -> i64 {
        self.transport
            .saturating_add(self.energy)
            .saturating_add(self.consumption)
    }

    /// Percentage of the breakdown sum held by each category.
    ///
    /// All shares are zero when the breakdown sums to zero.
    pub fn shares(&self) -> CategoryShares {
        let sum = self.transport as f64 + self.energy as f64 + self.consumption as f64;
        let pct = |value: i64| {
            if sum == 0.0 {
                0.0
            } else {
                value as f64 * 100.0 / sum
            }
        };

        CategoryShares {
            transport: pct(self.transport),
            energy: pct(self.energy),
            consumption: pct(self.consumption),
        }
    }
}

/// Per-category percentages of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShares {
    pub transport: f64,
    pub energy: f64,
    pub consumption: f64,
}

impl CategoryShares {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Energy => self.energy,
            Category::Consumption => self.consumption,
        }
    }
}

/// Annual footprint estimate returned by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CarbonResult {
    /// Rounded from the unrounded category sum
    pub total: i64,
    pub breakdown: Breakdown,
}

impl CarbonResult {
    /// Difference between `total` and the sum of the rounded breakdown.
    ///
    /// Always within `-1..=1`.
    pub fn rounding_slack(&self) -> i64 {
        self.total.saturating_sub(self.breakdown.sum())
    }

    pub fn rating(&self) -> FootprintRating {
        FootprintRating::from_total(self.total)
    }
}

/// Coarse assessment of an annual total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FootprintRating {
    /// Below 3000 kg CO2e per year
    Excellent,
    /// Below 6000 kg CO2e per year
    Moderate,
    /// 6000 kg CO2e per year or more
    High,
}

impl FootprintRating {
    pub const EXCELLENT_BELOW: i64 = 3000;
    pub const MODERATE_BELOW: i64 = 6000;

    pub fn from_total(total: i64) -> Self {
        if total < Self::EXCELLENT_BELOW {
            FootprintRating::Excellent
        } else if total < Self::MODERATE_BELOW {
            FootprintRating::Moderate
        } else {
            FootprintRating::High
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FootprintRating::Excellent => "Excellent, you are an eco pioneer!",
            FootprintRating::Moderate => "Not bad, there is still room to improve.",
            FootprintRating::High => "Your footprint is high; see the reduction advice.",
        }
    }
}

impl fmt::Display for FootprintRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FootprintRating::Excellent => "excellent",
            FootprintRating::Moderate => "moderate",
            FootprintRating::High => "high",
        };
        f.write_str(label)
    }
}
