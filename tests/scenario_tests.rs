//! End-to-end scenarios for the column engine
//!
//! These tests drive columns and fields through whole drop lifetimes and
//! compare the rendered colors frame by frame.

use std::sync::Arc;

use matrix_rain::rain::{Alphabet, Column, Config, Field, ScriptedSource, Snapshot};
use matrix_rain::Error;

/// Binary alphabet, default 38-entry ramp, no background noise
fn scenario_config(width: usize, length: usize) -> Arc<Config> {
    Arc::new(
        Config::builder(width, length)
            .alphabet(Alphabet::new("01").unwrap())
            .char_change_probability(0.0)
            .new_drop_probability(0.5)
            .build()
            .unwrap(),
    )
}

fn colors<R>(column: &Column<R>) -> Vec<usize> {
    column.render().iter().map(|g| g.color).collect()
}

// ============================================================================
// Single drop lifetime
// ============================================================================

#[test]
fn test_single_drop_lifetime() {
    let config = scenario_config(10, 5);
    let dim = config.ramp().last_index();
    let max_age = config.max_drop_age();
    assert_eq!(dim, 37);
    assert_eq!(max_age, 48);

    // One spawn on the first frame, none afterwards
    let mut column = Column::new(5, Arc::clone(&config), ScriptedSource::coins([true])).unwrap();
    assert_eq!(colors(&column), vec![dim; 5]);

    column.update();
    assert_eq!(colors(&column), vec![0, dim, dim, dim, dim]);

    column.update();
    assert_eq!(colors(&column), vec![1, 0, dim, dim, dim]);

    column.update();
    assert_eq!(colors(&column), vec![2, 1, 0, dim, dim]);

    column.update();
    column.update();
    assert_eq!(colors(&column), vec![4, 3, 2, 1, 0]);

    // Head below the bottom: the whole column is trail
    column.update();
    assert_eq!(colors(&column), vec![5, 4, 3, 2, 1]);

    let mut frames = 6;
    while column.is_active() {
        column.update();
        frames += 1;
        let drops: Vec<usize> = column.drops().collect();
        assert!(drops.iter().all(|&age| age < max_age));
    }
    // Spawned on frame 1, ages 0..max_age-1, gone on the next frame
    assert_eq!(frames, max_age + 1);
    assert_eq!(colors(&column), vec![dim; 5]);
}

#[test]
fn test_trail_fades_to_background() {
    let config = scenario_config(10, 5);
    let dim = config.ramp().last_index();
    let mut column = Column::new(5, config, ScriptedSource::coins([true])).unwrap();
    // Age 40: every row is at least 36 rows above the head
    for _ in 0..41 {
        column.update();
    }
    assert_eq!(column.drops().collect::<Vec<_>>(), vec![40]);
    assert_eq!(colors(&column), vec![dim, dim, dim, dim, 36]);
}

#[test]
fn test_single_row_column_lifetime() {
    let config = scenario_config(10, 1);
    let mut column = Column::new(1, Arc::clone(&config), ScriptedSource::coins([true])).unwrap();
    column.update();
    assert_eq!(colors(&column), vec![0]);
    column.update();
    assert_eq!(colors(&column), vec![1]);
    for _ in 0..config.max_drop_age() {
        column.update();
    }
    assert!(!column.is_active());
    assert_eq!(colors(&column), vec![config.ramp().last_index()]);
}

#[test]
fn test_zero_length_column_rejected() {
    let config = scenario_config(10, 5);
    assert!(matches!(
        Column::new(0, config, ScriptedSource::default()),
        Err(Error::InvalidLength)
    ));
}

// ============================================================================
// Several drops
// ============================================================================

#[test]
fn test_adjacent_drops() {
    let config = scenario_config(10, 6);
    let dim = config.ramp().last_index();
    // Spawns on frames 1 and 2
    let mut column = Column::new(6, config, ScriptedSource::coins([true, true])).unwrap();
    column.update();
    column.update();
    assert_eq!(column.drops().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(colors(&column), vec![0, 0, dim, dim, dim, dim]);
    column.update();
    assert_eq!(colors(&column), vec![1, 0, 0, dim, dim, dim]);
}

#[test]
fn test_drops_age_out_independently() {
    let config = Arc::new(
        Config::builder(10, 4)
            .alphabet(Alphabet::new("01").unwrap())
            .ramp(matrix_rain::rain::ColorRamp::parse(&["white", "color(46)", "black"]).unwrap())
            .char_change_probability(0.0)
            .new_drop_probability(0.5)
            .max_drop_age(4)
            .build()
            .unwrap(),
    );
    let coins = [true, false, true];
    let mut column = Column::new(4, config, ScriptedSource::coins(coins)).unwrap();
    let mut history = Vec::new();
    for _ in 0..7 {
        column.update();
        history.push(column.drops().collect::<Vec<_>>());
    }
    assert_eq!(
        history,
        vec![
            vec![0],
            vec![1],
            vec![0, 2],
            vec![1, 3],
            vec![2],
            vec![3],
            vec![],
        ]
    );
}

// ============================================================================
// Fields and snapshots
// ============================================================================

#[test]
fn test_field_snapshot_is_reproducible() {
    let config = Arc::new(Config::for_terminal(40, 12).unwrap());
    let run = |seed| {
        let mut field = Field::new(Arc::clone(&config), seed).unwrap();
        for _ in 0..200 {
            field.step();
        }
        Snapshot::from_field(&field)
    };
    assert_eq!(run(8), run(8));
    assert_ne!(run(8), run(9));
}

#[test]
fn test_snapshot_json_round_trip() {
    let config = Arc::new(Config::for_terminal(12, 6).unwrap());
    let mut field = Field::new(config, 4).unwrap();
    for _ in 0..30 {
        field.step();
    }
    let snapshot = Snapshot::from_field(&field);
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn test_spawn_rate_matches_width() {
    // One drop per frame across the screen on average
    let config = Arc::new(Config::for_terminal(100, 2).unwrap());
    let mut field = Field::new(config, 12345).unwrap();
    let mut spawns = 0usize;
    for _ in 0..2000 {
        field.step();
        spawns += field
            .columns()
            .iter()
            .filter(|c| c.drops().next() == Some(0))
            .count();
    }
    // 50 columns x p = 1/100 -> 0.5 per frame
    assert!((800..1200).contains(&spawns), "spawns = {}", spawns);
}
