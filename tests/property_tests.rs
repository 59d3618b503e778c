//! Property-based tests for the table, history and engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use cubetally::core::{record, undo, Color, FrequencyTable, HistoryLog, Observation, Position};
use cubetally::engine::{next_bet, top_colors, Assignment, BetStaircase};
use cubetally::store;
use proptest::prelude::*;

const CUBES: [&str; 4] = ["WB", "YR", "GP", "WP"];

prop_compose! {
    fn arbitrary_color()(variant in 0..6usize) -> Color {
        Color::ALL[variant]
    }
}

prop_compose! {
    fn arbitrary_cube()(variant in 0..CUBES.len()) -> &'static str {
        CUBES[variant]
    }
}

prop_compose! {
    fn arbitrary_observation()(
        cubes in [arbitrary_cube(), arbitrary_cube(), arbitrary_cube()],
        colors in [arbitrary_color(), arbitrary_color(), arbitrary_color()],
    ) -> Observation {
        Observation::new(cubes, colors)
    }
}

prop_compose! {
    fn arbitrary_table()(counts in prop::collection::vec(0..50u64, CUBES.len() * 18)) -> FrequencyTable {
        let mut table = FrequencyTable::with_cubes(CUBES);
        let mut counts = counts.into_iter();
        for cube in CUBES {
            for position in Position::ALL {
                for color in Color::ALL {
                    let slot = table.cube_mut(cube).unwrap().at_mut(position).get_mut(color);
                    *slot = counts.next().unwrap_or(0);
                }
            }
        }
        table
    }
}

prop_compose! {
    fn arbitrary_assignment()(
        slots in prop::collection::vec((0..3usize, arbitrary_cube()), 1..4)
    ) -> Assignment {
        slots.into_iter().map(|(p, cube)| (Position::ALL[p], cube)).collect()
    }
}

proptest! {
    #[test]
    fn table_roundtrip_serialization(table in arbitrary_table()) {
        let json = serde_json::to_string_pretty(&table).unwrap();
        let deserialized: FrequencyTable = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(table, deserialized);
    }

    #[test]
    fn record_then_undo_restores_table(
        table in arbitrary_table(),
        observation in arbitrary_observation(),
    ) {
        let mut working = table.clone();
        let mut history = HistoryLog::new();

        record(&mut working, &mut history, observation).unwrap();
        prop_assert_eq!(working.total(), table.total() + 3);

        let reverted = undo(&mut working, &mut history).unwrap();
        prop_assert!(reverted.is_clean());
        prop_assert_eq!(working, table);
        prop_assert!(history.is_empty());
    }

    #[test]
    fn undo_is_lifo(
        table in arbitrary_table(),
        observations in prop::collection::vec(arbitrary_observation(), 1..8),
    ) {
        let mut working = table.clone();
        let mut history = HistoryLog::new();
        let mut snapshots = Vec::new();

        for observation in &observations {
            snapshots.push(working.clone());
            record(&mut working, &mut history, observation.clone()).unwrap();
        }

        for (observation, snapshot) in observations.iter().zip(snapshots).rev() {
            let reverted = undo(&mut working, &mut history).unwrap();
            prop_assert_eq!(&reverted.entry.observation(), observation);
            prop_assert_eq!(&working, &snapshot);
        }
        prop_assert!(undo(&mut working, &mut history).is_none());
        prop_assert_eq!(working, table);
    }

    #[test]
    fn probabilities_are_normalized(
        table in arbitrary_table(),
        assignment in arbitrary_assignment(),
        k in 0..8usize,
    ) {
        let top = top_colors(&table, &assignment, k);
        let all = top_colors(&table, &assignment, Color::ALL.len());

        if all.is_empty() {
            prop_assert!(top.is_empty());
        } else {
            prop_assert_eq!(top.len(), k.min(Color::ALL.len()));
            let sum: f64 = all.iter().map(|(_, p)| p).sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        let sum: f64 = top.iter().map(|(_, p)| p).sum();
        prop_assert!(sum <= 1.0 + 1e-9);
        for window in top.windows(2) {
            prop_assert!(window[0].1 >= window[1].1);
        }
        for (_, p) in &top {
            prop_assert!((0.0..=1.0).contains(p));
        }
    }

    #[test]
    fn bet_is_monotone(a in 0..1000u64, b in 0..1000u64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(next_bet(low) <= next_bet(high));
    }

    #[test]
    fn bet_is_baseline_or_paired_amount(loss in 0..u64::MAX) {
        let bet = BetStaircase::default().next_bet(loss);
        prop_assert!([10, 20, 40, 80].contains(&bet));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn save_then_load_returns_same_table(table in arbitrary_table()) {
        let dir = std::env::temp_dir().join(format!("cubetally-prop-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.json");

        store::save(&path, &table).unwrap();
        let loaded: FrequencyTable = store::load(&path).unwrap();
        prop_assert_eq!(loaded, table);

        std::fs::remove_dir_all(&dir).ok();
    }
}
