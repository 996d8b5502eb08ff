//! Descriptive statistics over a CSV file.
//!
//! Numeric columns get count, mean, std, min, quartiles and max. When a file
//! has no numeric column at all, text columns are summarized instead with
//! count, unique, top and freq. Empty cells are treated as missing.

use ahash::AHashMap;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined for fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub q50: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub name: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Text(TextSummary),
}

/// Summary for a whole file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Summarize the CSV at `path`, ignoring the columns named in `drop`
pub fn describe_path(path: &Path, drop: &[String]) -> anyhow::Result<Summary> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", path.display(), e))?;
    describe_reader(file, drop)
}

pub fn describe_reader<R: Read>(reader: R, drop: &[String]) -> anyhow::Result<Summary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    for name in drop {
        if !headers.contains(name) {
            tracing::warn!(column = %name, "column to drop not found in CSV header");
        }
    }
    let kept: Vec<usize> = (0..headers.len())
        .filter(|&i| !drop.contains(&headers[i]))
        .collect();

    let mut values: Vec<Vec<String>> = vec![Vec::new(); kept.len()];
    let mut rows = 0;
    for record in csv_reader.records() {
        let record = record?;
        rows += 1;
        for (slot, &idx) in kept.iter().enumerate() {
            let cell = record.get(idx).unwrap_or("").trim();
            if !cell.is_empty() {
                values[slot].push(cell.to_string());
            }
        }
    }

    let numeric: Vec<ColumnSummary> = kept
        .iter()
        .zip(&values)
        .filter_map(|(&idx, cells)| {
            parse_numeric(cells).map(|nums| ColumnSummary::Numeric(numeric_summary(&headers[idx], nums)))
        })
        .collect();

    let columns = if numeric.is_empty() {
        kept.iter()
            .zip(&values)
            .map(|(&idx, cells)| ColumnSummary::Text(text_summary(&headers[idx], cells)))
            .collect()
    } else {
        numeric
    };

    Ok(Summary { rows, columns })
}

/// All non-missing cells as numbers, or `None` if any cell is not numeric
/// or the column is entirely missing.
fn parse_numeric(cells: &[String]) -> Option<Vec<f64>> {
    if cells.is_empty() {
        return None;
    }
    cells.iter().map(|c| c.parse::<f64>().ok()).collect()
}

fn numeric_summary(name: &str, mut nums: Vec<f64>) -> NumericSummary {
    nums.sort_by(|a, b| a.total_cmp(b));
    let count = nums.len();
    let mean = nums.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let var = nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    });

    NumericSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min: nums[0],
        q25: quantile(&nums, 0.25),
        q50: quantile(&nums, 0.50),
        q75: quantile(&nums, 0.75),
        max: nums[count - 1],
    }
}

/// Linear interpolation between closest ranks over sorted, non-empty input
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn text_summary(name: &str, cells: &[String]) -> TextSummary {
    let mut counter = ValueCounts::default();
    for cell in cells {
        counter.add(cell);
    }
    let (top, freq) = counter.most_common();
    TextSummary {
        name: name.to_string(),
        count: cells.len(),
        unique: counter.len(),
        top,
        freq,
    }
}

/// Occurrence counts that remember first-seen order for tie breaks
#[derive(Default)]
struct ValueCounts<'a> {
    counts: AHashMap<&'a str, (usize, usize)>,
}

impl<'a> ValueCounts<'a> {
    fn add(&mut self, value: &'a str) {
        let next = self.counts.len();
        self.counts.entry(value).or_insert((0, next)).0 += 1;
    }

    fn len(&self) -> usize {
        self.counts.len()
    }

    fn most_common(&self) -> (Option<String>, usize) {
        self.counts
            .iter()
            .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
            .map(|(k, (n, _))| (Some(k.to_string()), *n))
            .unwrap_or((None, 0))
    }
}

impl Summary {
    /// Aligned table with one column per summarized CSV column
    pub fn render_table(&self) -> String {
        if self.columns.is_empty() {
            return format!("{} rows, no columns to describe\n", self.rows);
        }

        let labels: &[&str] = match self.columns[0] {
            ColumnSummary::Numeric(_) => &["count", "mean", "std", "min", "25%", "50%", "75%", "max"],
            ColumnSummary::Text(_) => &["count", "unique", "top", "freq"],
        };

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(labels.len() + 1);
        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|c| c.name().to_string()));
        grid.push(header);
        for (row, label) in labels.iter().enumerate() {
            let mut line = vec![label.to_string()];
            line.extend(self.columns.iter().map(|c| c.cell(row)));
            grid.push(line);
        }

        let widths: Vec<usize> = (0..grid[0].len())
            .map(|col| grid.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for line in &grid {
            let cells: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == 0 {
                        format!("{:<width$}", cell, width = widths[i])
                    } else {
                        format!("{:>width$}", cell, width = widths[i])
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

impl ColumnSummary {
    pub fn name(&self) -> &str {
        match self {
            ColumnSummary::Numeric(n) => &n.name,
            ColumnSummary::Text(t) => &t.name,
        }
    }

    fn cell(&self, row: usize) -> String {
        match self {
            ColumnSummary::Numeric(n) => match row {
                0 => format!("{:.6}", n.count as f64),
                1 => format!("{:.6}", n.mean),
                2 => n.std.map_or_else(|| "NaN".to_string(), |s| format!("{:.6}", s)),
                3 => format!("{:.6}", n.min),
                4 => format!("{:.6}", n.q25),
                5 => format!("{:.6}", n.q50),
                6 => format!("{:.6}", n.q75),
                _ => format!("{:.6}", n.max),
            },
            ColumnSummary::Text(t) => match row {
                0 => t.count.to_string(),
                1 => t.unique.to_string(),
                2 => t.top.clone().unwrap_or_else(|| "NaN".to_string()),
                _ => t.freq.to_string(),
            },
        }
    }
}
