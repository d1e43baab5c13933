use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};

use crate::error::Result;
use crate::item::{Align, Format, Item, Special, ANONYMOUS};
use crate::record::Record;
use crate::schema::Schema;
use crate::store::RankedStore;
use crate::value::Value;

/// Field names of the stock score layout.
pub const RANK_FIELD: &str = "rank";
pub const NAME_FIELD: &str = "name";
pub const SCORE_FIELD: &str = "score";
pub const DATE_FIELD: &str = "date";

/// Semantic role of a score record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ScoreKind {
    /// A personal-best entry as it sits in the ranked table.
    #[default]
    #[strum(serialize = "best")]
    Best = 0,
    /// The most recently finished game, not necessarily ranked.
    #[strum(serialize = "last")]
    Last = 1,
}

impl ScoreKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A record tagged with its semantic role.
///
/// Carries no comparison rule of its own; ordering is delegated entirely
/// to the [`RankingPolicy`] the surrounding game injects.
#[derive(Debug, Clone)]
pub struct Score {
    kind: ScoreKind,
    record: Record,
}

impl Score {
    pub fn new(kind: ScoreKind, schema: Arc<Schema>) -> Self {
        Self {
            kind,
            record: Record::new(schema),
        }
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.record.set(name, value)
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.record.get(name)
    }

    pub fn load_from_rank(&mut self, store: &dyn RankedStore, rank: u32) {
        self.record.load_from_rank(store, rank);
    }

    pub fn store_at_rank(&self, store: &mut dyn RankedStore, rank: u32) -> Result<()> {
        self.record.store_at_rank(store, rank)
    }

    /// Strict "worse than" under the injected policy.
    ///
    /// Both scores must be built against the same schema; that is assumed,
    /// never checked.
    pub fn is_worse_than(&self, other: &Score, policy: &dyn RankingPolicy) -> bool {
        policy.is_strictly_worse(self, other)
    }
}

/// Ranking rule owned by the surrounding game and passed to comparison
/// sites. Implementations must form a strict total preorder (irreflexive,
/// transitive) over scores sharing a schema.
pub trait RankingPolicy {
    /// True iff `a` is strictly worse than `b`.
    fn is_strictly_worse(&self, a: &Score, b: &Score) -> bool;
}

fn score_of(score: &Score) -> f64 {
    score
        .get(SCORE_FIELD)
        .ok()
        .and_then(Value::as_f64)
        .unwrap_or_default()
}

/// Default rule: a higher "score" field wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HigherIsBetter;

impl RankingPolicy for HigherIsBetter {
    fn is_strictly_worse(&self, a: &Score, b: &Score) -> bool {
        score_of(a) < score_of(b)
    }
}

/// Rule for elapsed-time games: a lower non-zero "score" wins, and a zero
/// score (an empty slot) loses to any real result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerIsBetter;

impl RankingPolicy for LowerIsBetter {
    fn is_strictly_worse(&self, a: &Score, b: &Score) -> bool {
        let (a, b) = (score_of(a), score_of(b));
        if b == 0.0 {
            return false;
        }
        if a == 0.0 {
            return true;
        }
        a > b
    }
}

/// The stock score layout: a memory-only 1-based position, the player
/// name, the score itself and the date it was achieved.
pub fn standard_schema() -> Result<Arc<Schema>> {
    let mut schema = Schema::new();
    schema.push_with_transform(
        RANK_FIELD,
        Item::new(0u32, "Rank", Align::Right),
        false,
        |rank, _| Value::UInt(rank + 1),
    )?;
    schema.push(
        NAME_FIELD,
        Item::new(ANONYMOUS, "Name", Align::Left).with_special(Special::Anonymous)?,
        true,
    )?;
    schema.push(SCORE_FIELD, Item::score(), true)?;
    schema.push(
        DATE_FIELD,
        Item::new(Value::DateTime(None), "Date", Align::Right).with_format(Format::DateTime)?,
        true,
    )?;
    Ok(Arc::new(schema))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with(value: u32) -> Score {
        let mut score = Score::new(ScoreKind::Last, standard_schema().unwrap());
        score.set(SCORE_FIELD, value).unwrap();
        score
    }

    #[test]
    fn test_kind_round_trips_through_repr() {
        assert_eq!(ScoreKind::from_u8(0), Some(ScoreKind::Best));
        assert_eq!(ScoreKind::from_u8(1), Some(ScoreKind::Last));
        assert_eq!(ScoreKind::from_u8(2), None);
    }

    #[test]
    fn test_higher_is_better_orders_by_score() {
        let policy = HigherIsBetter;
        let low = score_with(100);
        let high = score_with(900);
        assert!(low.is_worse_than(&high, &policy));
        assert!(!high.is_worse_than(&low, &policy));
    }

    #[test]
    fn test_policy_is_irreflexive() {
        let score = score_with(500);
        assert!(!score.is_worse_than(&score, &HigherIsBetter));
        assert!(!score.is_worse_than(&score, &LowerIsBetter));
    }

    #[test]
    fn test_policy_is_transitive() {
        let policy = HigherIsBetter;
        let a = score_with(100);
        let b = score_with(200);
        let c = score_with(300);
        assert!(a.is_worse_than(&b, &policy));
        assert!(b.is_worse_than(&c, &policy));
        assert!(a.is_worse_than(&c, &policy));
    }

    #[test]
    fn test_lower_is_better_treats_zero_as_unset() {
        let policy = LowerIsBetter;
        let unset = score_with(0);
        let fast = score_with(95);
        let slow = score_with(240);
        assert!(slow.is_worse_than(&fast, &policy));
        assert!(!fast.is_worse_than(&slow, &policy));
        assert!(unset.is_worse_than(&slow, &policy));
        assert!(!slow.is_worse_than(&unset, &policy));
    }

    #[test]
    fn test_standard_schema_layout() {
        let schema = standard_schema().unwrap();
        assert_eq!(schema.len(), 4);
        assert!(!schema.get(RANK_FIELD).unwrap().is_stored());
        assert!(schema.get(NAME_FIELD).unwrap().is_stored());
        assert!(schema.get(SCORE_FIELD).unwrap().is_stored());
        assert!(schema.get(DATE_FIELD).unwrap().is_stored());
    }
}
