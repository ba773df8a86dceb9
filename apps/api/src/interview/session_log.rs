use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::interview::anxiety::AnxietySummary;

pub const LOG_FILE_NAME: &str = "interview_log.txt";

const RULE: &str = "------------------------------------------------------------------";

pub fn format_entry(timestamp: &str, transcript: &str, anxiety: &AnxietySummary) -> String {
    format!(
        "\n{RULE}\nTimestamp: {timestamp}\nTranscript: \"{transcript}\"\n\
         Average Anxiety: {:.1}%\n\
         Anxiety Range: {:.1}% - {:.1}%\n\
         Data Points: {} samples\n{RULE}\n",
        anxiety.average * 100.0,
        anxiety.min * 100.0,
        anxiety.max * 100.0,
        anxiety.count
    )
}

/// Appends one entry to `<dir>/interview_log.txt`, creating the directory
/// if needed. Returns the log file path.
pub async fn append_entry(dir: &Path, entry: &str) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(LOG_FILE_NAME);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await?;

    info!("Appended interview log entry to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnxietySummary {
        AnxietySummary {
            average: 0.4234,
            min: 0.1,
            max: 0.75,
            count: 12,
        }
    }

    #[test]
    fn test_format_entry() {
        let entry = format_entry("2025-01-01T00:00:00Z", "I used a hash map", &summary());
        let expected = format!(
            "\n{RULE}\nTimestamp: 2025-01-01T00:00:00Z\nTranscript: \"I used a hash map\"\n\
             Average Anxiety: 42.3%\nAnxiety Range: 10.0% - 75.0%\nData Points: 12 samples\n{RULE}\n"
        );
        assert_eq!(entry, expected);
    }

    #[tokio::test]
    async fn test_append_creates_directory_and_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        append_entry(&dir, "first\n").await.unwrap();
        let path = append_entry(&dir, "second\n").await.unwrap();

        assert_eq!(path, dir.join(LOG_FILE_NAME));
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
