//! Unit tests for the output writer

use mock_twitter_data::writer::{OutputWriter, TableOutcome, COMBINED_FILE_NAME};
use tempfile::TempDir;
use twitter_data_gen::{EntityKind, RenderConfig, Renderer, SqlValue, TableData};

fn hashtag_table(names: &[&str]) -> TableData {
    TableData {
        kind: EntityKind::HashtagList,
        rows: names
            .iter()
            .map(|n| vec![SqlValue::String(n.to_string())])
            .collect(),
    }
}

fn follower_table(pairs: &[(i64, i64)]) -> TableData {
    TableData {
        kind: EntityKind::Followers,
        rows: pairs
            .iter()
            .map(|&(a, b)| vec![SqlValue::Int(a), SqlValue::Int(b)])
            .collect(),
    }
}

#[test]
fn test_write_table() {
    let temp_dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(temp_dir.path().to_path_buf());
    let renderer = Renderer::new(RenderConfig::mysql());

    let outcome = writer
        .write_table(&renderer, &hashtag_table(&["rust", "sql"]))
        .unwrap();

    let path = temp_dir.path().join("hashtag_list.txt");
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "INSERT INTO hashtag_list (hashtag_name) VALUES ('rust'), ('sql');\n"
    );
    assert_eq!(
        outcome,
        TableOutcome::Written {
            path,
            bytes: content.len()
        }
    );
}

#[test]
fn test_empty_table_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(temp_dir.path().to_path_buf());
    let renderer = Renderer::new(RenderConfig::mysql());

    let outcome = writer.write_table(&renderer, &hashtag_table(&[])).unwrap();
    assert_eq!(outcome, TableOutcome::Skipped);
    assert!(!temp_dir.path().join("hashtag_list.txt").exists());
}

#[test]
fn test_write_all_creates_dir_and_combined_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("nested").join("out");
    let writer = OutputWriter::new(out_dir.clone());
    let renderer = Renderer::new(RenderConfig::mysql().with_database("mock_twitter_db"));

    let tables = vec![
        follower_table(&[(1, 2), (2, 1)]),
        hashtag_table(&[]),
        hashtag_table(&["word"]),
    ];
    let stats = writer.write_all(&renderer, &tables).unwrap();

    assert_eq!(stats.files_written, 3);
    assert_eq!(stats.tables_skipped, 1);

    let followers = std::fs::read_to_string(out_dir.join("followers.txt")).unwrap();
    assert!(followers.starts_with("USE mock_twitter_db;\n\n"));
    assert!(followers.contains("VALUES (1, 2), (2, 1);"));

    let combined = std::fs::read_to_string(out_dir.join(COMBINED_FILE_NAME)).unwrap();
    assert_eq!(combined.matches("USE mock_twitter_db;").count(), 1);
    let followers_at = combined.find("INSERT INTO followers").unwrap();
    let hashtags_at = combined.find("INSERT INTO hashtag_list").unwrap();
    assert!(followers_at < hashtags_at);
    assert!(!combined.contains("VALUES ;"));
}

#[test]
fn test_empty_table_removes_file_from_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let writer = OutputWriter::new(temp_dir.path().to_path_buf());
    let renderer = Renderer::new(RenderConfig::mysql());
    let path = temp_dir.path().join("hashtag_list.txt");

    writer
        .write_table(&renderer, &hashtag_table(&["old"]))
        .unwrap();
    assert!(path.exists());

    let stats = writer
        .write_all(&renderer, &[follower_table(&[(1, 2)]), hashtag_table(&[])])
        .unwrap();
    assert_eq!(stats.tables_skipped, 1);
    assert!(!path.exists());

    let combined = std::fs::read_to_string(temp_dir.path().join(COMBINED_FILE_NAME)).unwrap();
    assert!(!combined.contains("hashtag_list"));
}
