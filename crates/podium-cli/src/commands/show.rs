use std::path::Path;

use anyhow::Result;
use podium_core::{
    export::format_table_console, standard_schema, EnglishLocale, HigherIsBetter, ScoreTable,
};

pub fn run(table_path: &Path) -> Result<()> {
    let store = super::load_store(table_path)?;
    let table = ScoreTable::new(store, standard_schema()?, Box::new(HigherIsBetter));
    println!("{}", format_table_console(&table, &EnglishLocale)?);
    Ok(())
}
