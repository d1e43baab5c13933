use std::fs;
use std::path::Path;

use anyhow::Result;
use podium_core::{
    export::{export_json, export_tsv},
    standard_schema, EnglishLocale, HigherIsBetter, ScoreTable,
};

use crate::cli::ExportFormat;

pub fn run(table_path: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let store = super::load_store(table_path)?;
    let table = ScoreTable::new(store, standard_schema()?, Box::new(HigherIsBetter));

    let content = match format {
        ExportFormat::Tsv => export_tsv(&table, &EnglishLocale)?,
        ExportFormat::Json => serde_json::to_string_pretty(&export_json(&table)?)?,
    };

    match output {
        Some(path) => fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}
