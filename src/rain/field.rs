//! The whole screen of rain
//!
//! A field holds `column_count` columns of `column_length` rows. Every
//! column gets its own generator, seeded from one master seed, so columns
//! never share mutable state and a field is reproducible from its seed.

use std::sync::Arc;

use super::column::Column;
use super::config::Config;
use super::random::SeededSource;
use crate::error::Result;

/// All columns of the animation
#[derive(Debug, Clone)]
pub struct Field {
    config: Arc<Config>,
    columns: Vec<Column>,
    frame: u64,
}

impl Field {
    /// Build a field, seeding each column from `seed`
    pub fn new(config: Arc<Config>, seed: u64) -> Result<Self> {
        Self::with_source(config, SeededSource::from_seed(seed))
    }

    /// Build a field seeded from the operating system
    pub fn from_entropy(config: Arc<Config>) -> Result<Self> {
        Self::with_source(config, SeededSource::from_entropy())
    }

    fn with_source(config: Arc<Config>, mut master: SeededSource) -> Result<Self> {
        let columns = (0..config.column_count())
            .map(|_| {
                let rng = SeededSource::from_seed(master.next_seed());
                Column::new(config.column_length(), Arc::clone(&config), rng)
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            "Field created: {} columns x {} rows",
            columns.len(),
            config.column_length()
        );
        Ok(Self {
            config,
            columns,
            frame: 0,
        })
    }

    /// Advance every column by one frame
    pub fn step(&mut self) {
        for column in &mut self.columns {
            column.update();
        }
        self.frame += 1;
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of columns currently showing at least one drop
    pub fn active_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_geometry() {
        let config = Arc::new(Config::for_terminal(20, 6).unwrap());
        let field = Field::new(config, 0).unwrap();
        assert_eq!(field.columns().len(), 10);
        assert!(field.columns().iter().all(|c| c.length() == 6));
        assert_eq!(field.frame(), 0);
        assert_eq!(field.active_columns(), 0);
    }

    #[test]
    fn test_same_seed_same_rain() {
        let config = Arc::new(Config::for_terminal(30, 10).unwrap());
        let mut a = Field::new(Arc::clone(&config), 99).unwrap();
        let mut b = Field::new(config, 99).unwrap();
        for _ in 0..50 {
            a.step();
            b.step();
        }
        for (x, y) in a.columns().iter().zip(b.columns()) {
            assert_eq!(x.chars(), y.chars());
            assert_eq!(x.drops().collect::<Vec<_>>(), y.drops().collect::<Vec<_>>());
        }
        assert_eq!(a.frame(), 50);
    }

    #[test]
    fn test_columns_are_independent() {
        let config = Arc::new(Config::for_terminal(40, 12).unwrap());
        let field = Field::new(config, 5).unwrap();
        let first = field.columns()[0].chars();
        assert!(field.columns()[1..].iter().any(|c| c.chars() != first));
    }

    #[test]
    fn test_certain_spawn_activates_every_column() {
        let config = Arc::new(
            Config::builder(8, 4)
                .new_drop_probability(1.0)
                .build()
                .unwrap(),
        );
        let mut field = Field::new(config, 1).unwrap();
        field.step();
        assert_eq!(field.active_columns(), 4);
    }
}
