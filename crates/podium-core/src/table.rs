use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::schema::Schema;
use crate::score::{RankingPolicy, Score, ScoreKind};
use crate::store::RankedStore;

/// Default number of entries a highscore table keeps.
pub const DEFAULT_CAPACITY: u32 = 10;

/// A capacity-bounded ranked table: a store, the schema its rows follow
/// and the policy that orders them. Rank 0 is the best entry.
pub struct ScoreTable<S: RankedStore> {
    store: S,
    schema: Arc<Schema>,
    policy: Box<dyn RankingPolicy + Send + Sync>,
}

impl<S: RankedStore> ScoreTable<S> {
    pub fn new(store: S, schema: Arc<Schema>, policy: Box<dyn RankingPolicy + Send + Sync>) -> Self {
        Self {
            store,
            schema,
            policy,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.store.capacity()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the backing store back, e.g. to snapshot it after submissions.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Entry at `rank`. A slot that was never written materializes as an
    /// all-default entry.
    pub fn score_at(&self, rank: u32) -> Score {
        let mut score = Score::new(ScoreKind::Best, Arc::clone(&self.schema));
        score.load_from_rank(&self.store, rank);
        score
    }

    /// Every entry, best first.
    pub fn scores(&self) -> Vec<Score> {
        (0..self.capacity()).map(|rank| self.score_at(rank)).collect()
    }

    /// The rank the candidate would take, or `None` when it beats no
    /// current entry.
    pub fn rank_for(&self, candidate: &Score) -> Option<u32> {
        (0..self.capacity())
            .find(|&rank| self.score_at(rank).is_worse_than(candidate, self.policy.as_ref()))
    }

    /// Submit a finished game's score. When it qualifies it is written at
    /// its rank, lower entries shift down and the last one is dropped.
    /// Returns the achieved rank.
    pub fn submit(&mut self, score: &Score) -> Result<Option<u32>> {
        let Some(rank) = self.rank_for(score) else {
            debug!("score did not qualify for the table");
            return Ok(None);
        };
        score.store_at_rank(&mut self.store, rank)?;
        debug!("score entered the table at rank {}", rank);
        Ok(Some(rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{standard_schema, HigherIsBetter, LowerIsBetter, SCORE_FIELD};
    use crate::store::MemoryStore;
    use crate::value::Value;

    fn empty_table(capacity: u32) -> ScoreTable<MemoryStore> {
        ScoreTable::new(
            MemoryStore::new(capacity),
            standard_schema().unwrap(),
            Box::new(HigherIsBetter),
        )
    }

    fn candidate(table: &ScoreTable<MemoryStore>, value: u32) -> Score {
        let mut score = Score::new(ScoreKind::Last, Arc::clone(table.schema()));
        score.set(SCORE_FIELD, value).unwrap();
        score
    }

    #[test]
    fn test_first_submission_takes_rank_zero() {
        let mut table = empty_table(3);
        let score = candidate(&table, 500);
        assert_eq!(table.submit(&score).unwrap(), Some(0));
        assert_eq!(table.score_at(0).get(SCORE_FIELD).unwrap(), &Value::UInt(500));
    }

    #[test]
    fn test_zero_score_does_not_qualify() {
        let mut table = empty_table(3);
        let score = candidate(&table, 0);
        assert_eq!(table.submit(&score).unwrap(), None);
    }

    #[test]
    fn test_submissions_keep_table_ordered() {
        let mut table = empty_table(3);
        for value in [300, 500, 400] {
            table.submit(&candidate(&table, value)).unwrap();
        }
        let scores: Vec<u32> = table
            .scores()
            .iter()
            .map(|s| s.get(SCORE_FIELD).unwrap().as_u32().unwrap())
            .collect();
        assert_eq!(scores, vec![500, 400, 300]);
    }

    #[test]
    fn test_full_table_drops_worst_entry() {
        let mut table = empty_table(3);
        for value in [300, 200, 100] {
            table.submit(&candidate(&table, value)).unwrap();
        }
        assert_eq!(table.submit(&candidate(&table, 250)).unwrap(), Some(1));

        let scores: Vec<u32> = table
            .scores()
            .iter()
            .map(|s| s.get(SCORE_FIELD).unwrap().as_u32().unwrap())
            .collect();
        assert_eq!(scores, vec![300, 250, 200]);
    }

    #[test]
    fn test_worse_than_whole_full_table_is_rejected() {
        let mut table = empty_table(3);
        for value in [300, 200, 100] {
            table.submit(&candidate(&table, value)).unwrap();
        }
        assert_eq!(table.submit(&candidate(&table, 50)).unwrap(), None);
    }

    #[test]
    fn test_rank_field_reflects_position() {
        let mut table = empty_table(3);
        table.submit(&candidate(&table, 700)).unwrap();
        assert_eq!(table.score_at(0).get("rank").unwrap(), &Value::UInt(1));
        assert_eq!(table.score_at(2).get("rank").unwrap(), &Value::UInt(3));
    }

    #[test]
    fn test_lower_is_better_table() {
        let mut table = ScoreTable::new(
            MemoryStore::new(3),
            standard_schema().unwrap(),
            Box::new(LowerIsBetter),
        );
        let mut fast = Score::new(ScoreKind::Last, Arc::clone(table.schema()));
        fast.set(SCORE_FIELD, 95u32).unwrap();
        let mut slow = Score::new(ScoreKind::Last, Arc::clone(table.schema()));
        slow.set(SCORE_FIELD, 240u32).unwrap();

        assert_eq!(table.submit(&slow).unwrap(), Some(0));
        assert_eq!(table.submit(&fast).unwrap(), Some(0));
        assert_eq!(
            table.score_at(0).get(SCORE_FIELD).unwrap(),
            &Value::UInt(95)
        );
        assert_eq!(
            table.score_at(1).get(SCORE_FIELD).unwrap(),
            &Value::UInt(240)
        );
    }
}
