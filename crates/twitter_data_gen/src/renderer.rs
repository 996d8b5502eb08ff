//! Bulk INSERT rendering.
//!
//! Each table becomes exactly one statement:
//!
//! ```text
//! INSERT INTO <table> (<c1>, <c2>) VALUES (<v1>, <v2>), (<v1>, <v2>);
//! ```
//!
//! Empty tables produce no statement at all, never a bare `VALUES ;`.

use crate::entity::EntityKind;
use serde::{Deserialize, Serialize};

/// SQL dialect, which only affects how text literals are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    Postgres,
    Sqlite,
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(format!(
                "Unknown dialect: {}. Use mysql, postgres, or sqlite",
                s
            )),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// SQL value representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i64),
    String(String),
}

impl SqlValue {
    /// Literal text for the given dialect
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            SqlValue::Int(n) => n.to_string(),
            SqlValue::String(s) => match dialect {
                Dialect::MySql => format!("'{}'", escape_mysql_string(s)),
                Dialect::Postgres | Dialect::Sqlite => format!("'{}'", escape_standard_string(s)),
            },
        }
    }
}

fn escape_mysql_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn escape_standard_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// A row of generated data
pub type Row = Vec<SqlValue>;

/// Rows of one entity kind, ready to render
#[derive(Debug, Clone)]
pub struct TableData {
    pub kind: EntityKind,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn table_name(&self) -> &'static str {
        self.kind.table()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.kind.columns()
    }
}

/// Rendering options
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub dialect: Dialect,
    /// Emit `USE <db>;` ahead of each file's statement (MySQL only)
    pub use_database: Option<String>,
}

impl RenderConfig {
    pub fn mysql() -> Self {
        Self {
            dialect: Dialect::MySql,
            use_database: None,
        }
    }

    pub fn postgres() -> Self {
        Self {
            dialect: Dialect::Postgres,
            use_database: None,
        }
    }

    pub fn sqlite() -> Self {
        Self {
            dialect: Dialect::Sqlite,
            use_database: None,
        }
    }

    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.use_database = Some(name.into());
        self
    }
}

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// One bulk INSERT for the whole table, or `None` when it has no rows.
    pub fn render_statement(&self, table: &TableData) -> Option<String> {
        if table.rows.is_empty() {
            return None;
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ",
            table.table_name(),
            table.columns().join(", ")
        );
        for (i, row) in table.rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            self.push_row(&mut sql, row);
        }
        sql.push(';');
        Some(sql)
    }

    /// Parenthesize explicitly so single-column rows come out as `('x')`.
    fn push_row(&self, sql: &mut String, row: &[SqlValue]) {
        sql.push('(');
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&value.to_sql(self.config.dialect));
        }
        sql.push(')');
    }

    /// Contents of a per-table file: optional `USE` line, then the statement.
    pub fn render_file(&self, table: &TableData) -> Option<String> {
        let statement = self.render_statement(table)?;
        let mut out = self.preamble();
        out.push_str(&statement);
        out.push('\n');
        Some(out)
    }

    /// All non-empty tables, in the order given, as one combined script.
    pub fn render_to_string(&self, tables: &[TableData]) -> String {
        let mut out = self.preamble();
        let statements: Vec<String> = tables
            .iter()
            .filter_map(|t| self.render_statement(t))
            .collect();
        out.push_str(&statements.join("\n\n"));
        if !statements.is_empty() {
            out.push('\n');
        }
        out
    }

    fn preamble(&self) -> String {
        match (&self.config.use_database, self.config.dialect) {
            (Some(db), Dialect::MySql) => format!("USE {};\n\n", db),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashtags(names: &[&str]) -> TableData {
        TableData {
            kind: EntityKind::HashtagList,
            rows: names
                .iter()
                .map(|n| vec![SqlValue::String(n.to_string())])
                .collect(),
        }
    }

    #[test]
    fn test_single_column_single_row() {
        let renderer = Renderer::new(RenderConfig::mysql());
        assert_eq!(
            renderer.render_statement(&hashtags(&["word"])).unwrap(),
            "INSERT INTO hashtag_list (hashtag_name) VALUES ('word');"
        );
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let renderer = Renderer::new(RenderConfig::mysql());
        assert!(renderer.render_statement(&hashtags(&[])).is_none());
        assert!(renderer.render_file(&hashtags(&[])).is_none());
        assert_eq!(renderer.render_to_string(&[hashtags(&[])]), "");
    }

    #[test]
    fn test_multi_column_rows() {
        let table = TableData {
            kind: EntityKind::Tweets,
            rows: vec![
                vec![SqlValue::Int(3), SqlValue::String("hello".into())],
                vec![SqlValue::Int(7), SqlValue::String("world".into())],
            ],
        };
        let renderer = Renderer::new(RenderConfig::mysql());
        assert_eq!(
            renderer.render_statement(&table).unwrap(),
            "INSERT INTO tweets (user_id, tweet_text) VALUES (3, 'hello'), (7, 'world');"
        );
    }

    #[test]
    fn test_quote_escaping_per_dialect() {
        let value = SqlValue::String("O'Kon\\x".to_string());
        assert_eq!(value.to_sql(Dialect::MySql), "'O\\'Kon\\\\x'");
        assert_eq!(value.to_sql(Dialect::Postgres), "'O''Kon\\x'");
        assert_eq!(value.to_sql(Dialect::Sqlite), "'O''Kon\\x'");
        assert_eq!(SqlValue::Int(-4).to_sql(Dialect::Postgres), "-4");
    }

    #[test]
    fn test_use_database_preamble() {
        let renderer = Renderer::new(RenderConfig::mysql().with_database("mock_twitter_db"));
        let file = renderer.render_file(&hashtags(&["a", "b"])).unwrap();
        assert_eq!(
            file,
            "USE mock_twitter_db;\n\nINSERT INTO hashtag_list (hashtag_name) VALUES ('a'), ('b');\n"
        );

        // Not meaningful outside MySQL
        let renderer = Renderer::new(RenderConfig::sqlite().with_database("ignored"));
        assert!(!renderer.render_file(&hashtags(&["a"])).unwrap().contains("USE"));
    }

    #[test]
    fn test_combined_script_skips_empty_tables() {
        let renderer = Renderer::new(RenderConfig::mysql());
        let sql = renderer.render_to_string(&[hashtags(&["a"]), hashtags(&[]), hashtags(&["b"])]);
        assert_eq!(
            sql,
            "INSERT INTO hashtag_list (hashtag_name) VALUES ('a');\n\n\
             INSERT INTO hashtag_list (hashtag_name) VALUES ('b');\n"
        );
    }

    #[test]
    fn test_dialect_parse() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::Sqlite.to_string(), "sqlite");
        assert!("oracle".parse::<Dialect>().is_err());
    }
}
