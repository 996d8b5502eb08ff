use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use twitter_data_gen::{Renderer, TableData};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;

/// Name of the file holding every statement
pub const COMBINED_FILE_NAME: &str = "ALL_DATA.txt";

/// Result of writing one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    Written { path: PathBuf, bytes: usize },
    /// Table had no rows, so no statement and no file. A file left by an
    /// earlier run is removed.
    Skipped,
}

#[derive(Debug, Default)]
pub struct WriteStats {
    pub files_written: usize,
    pub tables_skipped: usize,
    pub bytes_written: usize,
}

/// Writes one file per table plus the combined file into a directory
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }

    pub fn write_table(
        &self,
        renderer: &Renderer,
        table: &TableData,
    ) -> std::io::Result<TableOutcome> {
        let path = self.output_dir.join(table.kind.file_name());
        let Some(contents) = renderer.render_file(table) else {
            tracing::warn!(kind = %table.kind, "no rows generated, skipping file");
            remove_stale(&path)?;
            return Ok(TableOutcome::Skipped);
        };
        write_buffered(&path, contents.as_bytes())?;
        Ok(TableOutcome::Written {
            path,
            bytes: contents.len(),
        })
    }

    pub fn write_combined(&self, renderer: &Renderer, tables: &[TableData]) -> std::io::Result<usize> {
        let contents = renderer.render_to_string(tables);
        write_buffered(&self.output_dir.join(COMBINED_FILE_NAME), contents.as_bytes())?;
        Ok(contents.len())
    }

    /// Write every table file, then the combined file.
    pub fn write_all(&self, renderer: &Renderer, tables: &[TableData]) -> std::io::Result<WriteStats> {
        self.ensure_output_dir()?;

        let mut stats = WriteStats::default();
        for table in tables {
            match self.write_table(renderer, table)? {
                TableOutcome::Written { bytes, .. } => {
                    stats.files_written += 1;
                    stats.bytes_written += bytes;
                }
                TableOutcome::Skipped => stats.tables_skipped += 1,
            }
        }

        stats.bytes_written += self.write_combined(renderer, tables)?;
        stats.files_written += 1;
        Ok(stats)
    }
}

fn write_buffered(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(WRITER_BUFFER_SIZE, file);
    writer.write_all(contents)?;
    writer.flush()
}

fn remove_stale(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale table file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
