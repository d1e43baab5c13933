//! Table rendering for files and the console.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::item::Align;
use crate::locale::Localize;
use crate::schema::Schema;
use crate::score::Score;
use crate::store::RankedStore;
use crate::table::ScoreTable;
use crate::value::Value;

/// Tab-separated header line built from the schema labels.
pub fn format_tsv_header(schema: &Schema) -> String {
    schema
        .slots()
        .iter()
        .map(|slot| slot.item().label())
        .collect::<Vec<_>>()
        .join("\t")
}

/// One entry as a tab-separated line of pretty-printed cells.
pub fn format_tsv_row(score: &Score, rank: u32, locale: &dyn Localize) -> Result<String> {
    let mut cells = Vec::new();
    for slot in score.record().schema().slots() {
        let value = score.get(slot.name())?;
        cells.push(slot.item().pretty(rank, value, locale)?);
    }
    Ok(cells.join("\t"))
}

/// The whole table as TSV, header first, best entry first.
pub fn export_tsv<S: RankedStore>(
    table: &ScoreTable<S>,
    locale: &dyn Localize,
) -> Result<String> {
    let mut lines = vec![format_tsv_header(table.schema())];
    for (rank, score) in table.scores().iter().enumerate() {
        lines.push(format_tsv_row(score, rank as u32, locale)?);
    }
    Ok(lines.join("\n"))
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::UInt(v) => JsonValue::from(*v),
        Value::Int(v) => JsonValue::from(*v),
        Value::Double(v) => JsonValue::from(*v),
        Value::Text(s) => JsonValue::from(s.clone()),
        Value::DateTime(Some(dt)) => JsonValue::from(dt.to_rfc3339()),
        Value::DateTime(None) => JsonValue::Null,
    }
}

/// One entry as a JSON object of raw values keyed by field name.
pub fn format_json_entry(score: &Score) -> Result<JsonValue> {
    let mut entry = serde_json::Map::new();
    for slot in score.record().schema().slots() {
        entry.insert(slot.name().to_string(), value_to_json(score.get(slot.name())?));
    }
    Ok(JsonValue::Object(entry))
}

/// The whole table as a JSON array, best entry first.
pub fn export_json<S: RankedStore>(table: &ScoreTable<S>) -> Result<JsonValue> {
    let mut entries = Vec::new();
    for score in table.scores() {
        entries.push(format_json_entry(&score)?);
    }
    Ok(JsonValue::Array(entries))
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Center => format!("{text:^width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

fn medal(rank: usize, text: &str) -> String {
    match rank {
        0 => text.truecolor(255, 200, 0).bold().to_string(),
        1 => text.truecolor(192, 192, 192).to_string(),
        2 => text.truecolor(205, 127, 50).to_string(),
        _ => text.to_string(),
    }
}

/// Render the table with aligned columns and a highlighted podium.
pub fn format_table_console<S: RankedStore>(
    table: &ScoreTable<S>,
    locale: &dyn Localize,
) -> Result<String> {
    let schema = table.schema();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (rank, score) in table.scores().iter().enumerate() {
        let mut cells = Vec::new();
        for slot in schema.slots() {
            let value = score.get(slot.name())?;
            cells.push(slot.item().pretty(rank as u32, value, locale)?);
        }
        rows.push(cells);
    }

    let mut widths: Vec<usize> = schema
        .slots()
        .iter()
        .map(|slot| slot.item().label().len())
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header = schema
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| pad(slot.item().label(), widths[i], slot.item().align()))
        .collect::<Vec<_>>()
        .join("  ");
    let border: String = "━".repeat(header.len());

    let mut output = String::new();
    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(output, "{}", header.bold());
    let _ = writeln!(output, "{}", border.dimmed());
    for (rank, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i], schema.slots()[i].item().align()))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(output, "{}", medal(rank, &line));
    }
    let _ = write!(output, "{}", border.dimmed());

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::EnglishLocale;
    use crate::score::{standard_schema, HigherIsBetter, ScoreKind, NAME_FIELD, SCORE_FIELD};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn sample_table() -> ScoreTable<MemoryStore> {
        let mut table = ScoreTable::new(
            MemoryStore::new(3),
            standard_schema().unwrap(),
            Box::new(HigherIsBetter),
        );
        let mut score = Score::new(ScoreKind::Last, Arc::clone(table.schema()));
        score.set(NAME_FIELD, "DJ").unwrap();
        score.set(SCORE_FIELD, 840u32).unwrap();
        table.submit(&score).unwrap();
        table
    }

    #[test]
    fn test_tsv_header_uses_labels() {
        let table = sample_table();
        assert_eq!(format_tsv_header(table.schema()), "Rank\tName\tScore\tDate");
    }

    #[test]
    fn test_tsv_export_shape() {
        let table = sample_table();
        let tsv = export_tsv(&table, &EnglishLocale).unwrap();
        let lines: Vec<&str> = tsv.lines().collect();
        // header plus one line per rank
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1\tDJ\t840\t--");
        // empty slots render as anonymous defaults
        assert!(lines[2].contains("anonymous"));
    }

    #[test]
    fn test_json_entry_raw_values() {
        let table = sample_table();
        let entry = format_json_entry(&table.score_at(0)).unwrap();
        assert_eq!(entry["name"], "DJ");
        assert_eq!(entry["score"], 840);
        assert_eq!(entry["rank"], 1);
        assert!(entry["date"].is_null());
    }

    #[test]
    fn test_json_export_is_array_of_capacity() {
        let table = sample_table();
        let json = export_json(&table).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_console_render_contains_all_rows() {
        let table = sample_table();
        let rendered = format_table_console(&table, &EnglishLocale).unwrap();
        assert!(rendered.contains("DJ"));
        assert!(rendered.contains("840"));
        assert!(rendered.contains("Score"));
    }
}
