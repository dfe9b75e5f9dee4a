//! Property tests for the benefit calculation rules.

use benefit_calculator::calculation::{
    calculate_benefit_factor, compute_benefit, select_top_earnings, sort_by_period,
};
use benefit_calculator::config::BenefitConfig;
use benefit_calculator::error::EngineError;
use benefit_calculator::models::Dataset;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn dataset_from(entries: &[(u16, u32)]) -> Dataset {
    Dataset::from_pairs(
        entries
            .iter()
            .map(|(year, cents)| (i32::from(*year), Decimal::new(i64::from(*cents), 2))),
    )
}

proptest! {
    #[test]
    fn prop_top_subset_is_floor_of_eighty_percent(
        entries in proptest::collection::vec((1990u16..2030, 0u32..10_000_000), 2..200)
    ) {
        let dataset = dataset_from(&entries);
        let report = compute_benefit(&dataset, &BenefitConfig::default()).unwrap();

        prop_assert_eq!(report.top_earnings.len(), entries.len() * 8 / 10);
        prop_assert_eq!(report.labels.len(), entries.len());
    }

    #[test]
    fn prop_fewer_than_two_records_is_empty_dataset(
        entries in proptest::collection::vec((1990u16..2030, 0u32..10_000_000), 0..2)
    ) {
        let dataset = dataset_from(&entries);
        let result = compute_benefit(&dataset, &BenefitConfig::default());

        let is_empty_dataset = matches!(result, Err(EngineError::EmptyDataset { .. }));
        prop_assert!(is_empty_dataset);
    }

    #[test]
    fn prop_period_sort_is_stable(
        entries in proptest::collection::vec((2015u16..2020, 0u32..1000), 0..100)
    ) {
        let dataset = dataset_from(&entries);
        let sorted = sort_by_period(dataset.records(), 1).sorted;

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (year_a, year_b) = (a.period.as_integer(), b.period.as_integer());
            prop_assert!(year_a <= year_b);
            if year_a == year_b {
                prop_assert!(a.row < b.row);
            }
        }
    }

    #[test]
    fn prop_selected_records_are_never_smaller_than_dropped_ones(
        entries in proptest::collection::vec((1990u16..2030, 0u32..1000), 2..100)
    ) {
        let dataset = dataset_from(&entries);
        let config = BenefitConfig::default();
        let result = select_top_earnings(dataset.records(), config.selection(), 1).unwrap();

        let kept: Vec<usize> = result.subset.iter().map(|r| r.row).collect();
        let smallest_kept = result.subset.iter().map(|r| r.remuneration).min().unwrap();
        for record in dataset.records().iter().filter(|r| !kept.contains(&r.row)) {
            prop_assert!(record.remuneration <= smallest_kept);
        }
    }

    #[test]
    fn prop_benefit_factor_does_not_depend_on_data(
        first in proptest::collection::vec((1990u16..2030, 0u32..10_000_000), 2..50),
        second in proptest::collection::vec((1990u16..2030, 0u32..10_000_000), 2..50)
    ) {
        let config = BenefitConfig::default();
        let a = compute_benefit(&dataset_from(&first), &config).unwrap();
        let b = compute_benefit(&dataset_from(&second), &config).unwrap();
        let standalone = calculate_benefit_factor(config.factor(), 1).unwrap().factor;

        prop_assert_eq!(a.calculation.benefit_factor, b.calculation.benefit_factor);
        prop_assert_eq!(a.calculation.benefit_factor, standalone);
    }
}
