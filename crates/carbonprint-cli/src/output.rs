// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell
//! Rendering of results and history

use crate::config::OutputFormat;
use anyhow::Result;
use carbonprint_metrics::{CarbonResult, CategoryShares, FootprintRating};
use carbonprint_records::{AdvisoryContext, CarbonRecord};
use serde::Serialize;

/// A result with its derived chart data and rating
#[derive(Debug, Clone, Serialize)]
pub struct FootprintReport {
    #[serde(flatten)]
    pub result: CarbonResult,
    pub shares: CategoryShares,
    pub rating: FootprintRating,
}

impl FootprintReport {
    pub fn new(result: CarbonResult) -> Self {
        Self {
            result,
            shares: result.breakdown.shares(),
            rating: result.rating(),
        }
    }
}

pub fn render_report(report: &FootprintReport, format: OutputFormat, show_rating: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(format_report_text(report, show_rating)),
    }
}

fn format_report_text(report: &FootprintReport, show_rating: bool) -> String {
    let mut out = String::new();

    out.push_str("Annual carbon footprint\n");
    out.push_str("=======================\n\n");
    out.push_str(&format!("Total:        {} kg CO2e\n\n", report.result.total));

    for (category, value) in report.result.breakdown.iter() {
        out.push_str(&format!(
            "  {:<12} {:>8} kg  ({:.1}%)\n",
            category.as_str(),
            value,
            report.shares.get(category)
        ));
    }

    if show_rating {
        out.push_str(&format!(
            "\nRating: {} - {}\n",
            report.rating,
            report.rating.message()
        ));
    }

    out
}

pub fn render_history(
    user_id: &str,
    history: &[CarbonRecord],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let context = AdvisoryContext::from_history(history);
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "user_id": user_id,
                "records": history,
                "advisory_context": context,
            }))?)
        }
        OutputFormat::Text => Ok(format_history_text(user_id, history)),
    }
}

fn format_history_text(user_id: &str, history: &[CarbonRecord]) -> String {
    if history.is_empty() {
        return format!("No records for {}\n", user_id);
    }

    let mut out = format!("History for {} ({} records)\n\n", user_id, history.len());
    for record in history {
        out.push_str(&format!(
            "  {}  {:>8} kg  (transport {}, energy {}, consumption {})\n",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.total_emission,
            record.breakdown.transport,
            record.breakdown.energy,
            record.breakdown.consumption
        ));
    }

    if let [.., previous, latest] = history {
        let change = latest.total_emission - previous.total_emission;
        out.push_str(&format!("\nChange since previous: {:+} kg\n", change));
    }

    out
}
