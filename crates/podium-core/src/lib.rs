pub mod error;
pub mod export;
pub mod item;
pub mod locale;
pub mod record;
pub mod schema;
pub mod score;
pub mod store;
pub mod table;
pub mod value;
pub mod wire;

pub use error::{Error, Result};
pub use export::{export_json, export_tsv, format_table_console};
pub use item::{time_format, Align, Format, Item, Special, ANONYMOUS, UNDEFINED};
pub use locale::{EnglishLocale, Localize};
pub use record::Record;
pub use schema::{ItemSlot, ReadTransform, Schema};
pub use score::{
    standard_schema, HigherIsBetter, LowerIsBetter, RankingPolicy, Score, ScoreKind, DATE_FIELD,
    NAME_FIELD, RANK_FIELD, SCORE_FIELD,
};
pub use store::{MemoryStore, RankedStore};
pub use table::{ScoreTable, DEFAULT_CAPACITY};
pub use value::{Value, ValueKind};
pub use wire::{decode_record, decode_score, encode_record, encode_score, WireReader, WireWriter};
