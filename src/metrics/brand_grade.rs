// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics grouped by fuel brand and grade.

use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::entry::FuelEntryWithMetrics;
use super::rolling::mean_of_defined;
use super::units::round_to;

/// Summary of all fill-ups sharing one (brand, grade) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BrandGradeStats {
    pub brand: String,
    pub grade: String,
    /// `None` when the group's summed volume is not positive
    pub avg_cost_per_liter: Option<f64>,
    pub avg_consumption: f64,
    pub fillup_count: u32,
}

/// Group entries by (brand, grade) and summarize each group.
///
/// Rows come back in key order; callers rank them as needed. A group whose
/// volumes do not sum to a positive amount keeps its row without a price.
pub fn calculate_brand_grade_stats(entries: &[FuelEntryWithMetrics]) -> Vec<BrandGradeStats> {
    let mut groups: BTreeMap<(&str, &str), Vec<&FuelEntryWithMetrics>> = BTreeMap::new();
    for e in entries {
        groups
            .entry((e.entry.brand.as_str(), e.entry.grade.as_str()))
            .or_default()
            .push(e);
    }

    groups
        .into_iter()
        .map(|((brand, grade), group)| {
            let total_liters: f64 = group.iter().map(|e| e.entry.liters).sum();
            let total_cost: f64 = group.iter().map(|e| e.entry.total).sum();

            let avg_cost_per_liter = Some(round_to(total_cost / total_liters, 2))
                .filter(|price| total_liters > 0.0 && price.is_finite());
            if avg_cost_per_liter.is_none() {
                tracing::warn!(
                    brand,
                    grade,
                    liters = total_liters,
                    "Cost per liter unavailable for brand/grade"
                );
            }

            BrandGradeStats {
                brand: brand.to_string(),
                grade: grade.to_string(),
                avg_cost_per_liter,
                avg_consumption: mean_of_defined(
                    group.iter().map(|e| e.consumption_l_per_100km),
                    1,
                ),
                fillup_count: group.len() as u32,
            }
        })
        .collect()
}

/// Order rows by fill-up count, most used first.
pub fn rank_by_fillups(stats: &mut [BrandGradeStats]) {
    stats.sort_by(|a, b| {
        b.fillup_count
            .cmp(&a.fillup_count)
            .then_with(|| a.brand.cmp(&b.brand))
            .then_with(|| a.grade.cmp(&b.grade))
    });
}

/// Headline rows for the statistics page summary cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BrandGradeHighlights {
    pub most_used: Option<BrandGradeStats>,
    /// Lowest positive average consumption
    pub best_consumption: Option<BrandGradeStats>,
    pub lowest_cost_per_liter: Option<BrandGradeStats>,
}

impl BrandGradeHighlights {
    pub fn from_stats(stats: &[BrandGradeStats]) -> Self {
        let mut ranked = stats.to_vec();
        rank_by_fillups(&mut ranked);

        let best_consumption = stats
            .iter()
            .filter(|s| s.avg_consumption > 0.0)
            .min_by(|a, b| a.avg_consumption.total_cmp(&b.avg_consumption))
            .cloned();

        let lowest_cost_per_liter = stats
            .iter()
            .filter_map(|s| s.avg_cost_per_liter.map(|price| (price, s)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, s)| s.clone());

        Self {
            most_used: ranked.into_iter().next(),
            best_consumption,
            lowest_cost_per_liter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::entry::calculate_all_metrics;
    use crate::metrics::test_support::{branded, entry};

    fn history() -> Vec<FuelEntryWithMetrics> {
        calculate_all_metrics(&[
            branded(entry("a", "v", "2024-01-01", 1000, 40.0, 60.0), "Shell", "95"),
            branded(entry("b", "v", "2024-01-10", 1400, 35.0, 52.5), "Shell", "95"),
            branded(entry("c", "v", "2024-01-20", 1900, 40.0, 56.0), "BP", "Diesel"),
        ])
    }

    #[test]
    fn test_groups_by_brand_and_grade() {
        let mut stats = calculate_brand_grade_stats(&history());
        rank_by_fillups(&mut stats);

        assert_eq!(stats.len(), 2);

        let shell = &stats[0];
        assert_eq!((shell.brand.as_str(), shell.grade.as_str()), ("Shell", "95"));
        assert_eq!(shell.fillup_count, 2);
        // 112.5 / 75
        assert_eq!(shell.avg_cost_per_liter, Some(1.5));
        assert_eq!(shell.avg_consumption, 8.8);

        let bp = &stats[1];
        assert_eq!(bp.fillup_count, 1);
        assert_eq!(bp.avg_cost_per_liter, Some(1.4));
        assert_eq!(bp.avg_consumption, 8.0);
    }

    #[test]
    fn test_single_pair_yields_one_row() {
        let entries = history()
            .into_iter()
            .filter(|e| e.entry.brand == "Shell")
            .collect::<Vec<_>>();

        let stats = calculate_brand_grade_stats(&entries);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].fillup_count as usize, entries.len());
    }

    #[test]
    fn test_same_brand_different_grade_are_separate() {
        let entries = calculate_all_metrics(&[
            branded(entry("a", "v", "2024-01-01", 1000, 40.0, 60.0), "Shell", "95"),
            branded(entry("b", "v", "2024-01-10", 1400, 35.0, 60.0), "Shell", "98"),
        ]);

        let stats = calculate_brand_grade_stats(&entries);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(calculate_brand_grade_stats(&[]).is_empty());
        assert_eq!(
            BrandGradeHighlights::from_stats(&[]),
            BrandGradeHighlights::default()
        );
    }

    #[test]
    fn test_zero_volume_group_keeps_other_rows() {
        let entries = calculate_all_metrics(&[
            branded(entry("a", "v", "2024-01-01", 1000, 40.0, 60.0), "Shell", "95"),
            branded(entry("b", "v", "2024-01-10", 1400, 35.0, 52.5), "Shell", "95"),
            branded(entry("c", "v", "2024-01-20", 1900, 0.0, 10.0), "BP", "Diesel"),
        ]);

        let mut stats = calculate_brand_grade_stats(&entries);
        rank_by_fillups(&mut stats);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].brand, "Shell");
        assert_eq!(stats[0].avg_cost_per_liter, Some(1.5));
        assert_eq!(stats[1].brand, "BP");
        assert_eq!(stats[1].fillup_count, 1);
        assert_eq!(stats[1].avg_cost_per_liter, None);

        let highlights = BrandGradeHighlights::from_stats(&stats);
        assert_eq!(highlights.lowest_cost_per_liter.unwrap().brand, "Shell");
    }

    #[test]
    fn test_highlights() {
        let stats = calculate_brand_grade_stats(&history());
        let highlights = BrandGradeHighlights::from_stats(&stats);

        assert_eq!(highlights.most_used.unwrap().brand, "Shell");
        assert_eq!(highlights.best_consumption.unwrap().brand, "BP");
        assert_eq!(highlights.lowest_cost_per_liter.unwrap().brand, "BP");
    }
}
