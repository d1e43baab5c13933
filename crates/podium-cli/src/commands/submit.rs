use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use podium_core::{
    standard_schema, HigherIsBetter, LowerIsBetter, RankingPolicy, Score, ScoreKind, ScoreTable,
    ANONYMOUS, DATE_FIELD, NAME_FIELD, SCORE_FIELD,
};
use tracing::info;

pub fn run(table_path: &Path, value: u32, name: Option<&str>, lowest_first: bool) -> Result<()> {
    let store = super::load_store(table_path)?;
    let schema = standard_schema()?;
    let policy: Box<dyn RankingPolicy + Send + Sync> = if lowest_first {
        Box::new(LowerIsBetter)
    } else {
        Box::new(HigherIsBetter)
    };
    let mut table = ScoreTable::new(store, Arc::clone(&schema), policy);

    let mut score = Score::new(ScoreKind::Last, schema);
    score.set(NAME_FIELD, name.unwrap_or(ANONYMOUS))?;
    score.set(SCORE_FIELD, value)?;
    score.set(DATE_FIELD, Utc::now())?;

    match table.submit(&score)? {
        Some(rank) => info!("Entered the table at rank {}", rank + 1),
        None => info!("Score {} did not make the table", value),
    }

    super::save_store(table_path, &table.into_store())
}
