//! Stats command CLI handler.

use crate::stats;
use std::path::PathBuf;

pub fn run(file: PathBuf, drop: Vec<String>, json: bool) -> anyhow::Result<()> {
    let summary = stats::describe_path(&file, &drop)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render_table());
        eprintln!();
        eprintln!("{} rows in {}", summary.rows, file.display());
    }

    Ok(())
}
