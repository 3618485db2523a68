use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::importer::{parse_free_text, parse_statement_bytes};
use crate::models::{FileProgress, ProgressStatus, Transaction};

/// A statement the user handed us: display name plus where to read it.
#[derive(Debug, Clone)]
pub struct StatementFile {
    pub name: String,
    pub path: PathBuf,
}

impl StatementFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Read one file and extract its transactions. The read is the only
/// suspension point; decoding and classification run inline.
pub async fn parse_statement_file(file: &StatementFile) -> Result<Vec<Transaction>> {
    let bytes = tokio::fs::read(&file.path).await?;
    parse_statement_bytes(&file.name, bytes)
}

/// Extract every file in order, one at a time. A file that fails to read or
/// decode is reported through `on_progress` and the log, then skipped.
pub async fn aggregate<F>(files: &[StatementFile], mut on_progress: F) -> Vec<Transaction>
where
    F: FnMut(&FileProgress),
{
    let total_files = files.len();
    let mut all = Vec::new();

    for (i, file) in files.iter().enumerate() {
        let progress = |status| FileProgress {
            current_file: i + 1,
            total_files,
            file_name: file.name.clone(),
            status,
        };

        on_progress(&progress(ProgressStatus::Processing));
        match parse_statement_file(file).await {
            Ok(transactions) => {
                debug!(file = %file.name, count = transactions.len(), "statement parsed");
                all.extend(transactions);
                on_progress(&progress(ProgressStatus::Complete));
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "could not process statement, skipping");
                on_progress(&progress(ProgressStatus::Error));
            }
        }
    }

    all
}

/// Pasted text first, then files in the order given.
pub async fn gather<F>(text: Option<&str>, files: &[StatementFile], on_progress: F) -> Vec<Transaction>
where
    F: FnMut(&FileProgress),
{
    let mut all = match text {
        Some(t) if !t.trim().is_empty() => parse_free_text(t),
        _ => Vec::new(),
    };
    let from_text = all.len();
    all.extend(aggregate(files, on_progress).await);
    info!(
        from_text,
        from_files = all.len() - from_text,
        files = files.len(),
        "collected transactions"
    );
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &[u8]) -> StatementFile {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        StatementFile::from_path(path)
    }

    fn statement(rows: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut content = String::from("Date,Description,Amount\n");
        for (date, desc, amt) in rows {
            content.push_str(&format!("{date},{desc},{amt}\n"));
        }
        content.into_bytes()
    }

    #[tokio::test]
    async fn test_bad_file_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "jan.csv", &statement(&[("01/05/2024", "DUNKIN #11", "6.50")])),
            write(dir.path(), "feb.xlsx", b"definitely not a workbook"),
            write(dir.path(), "mar.csv", &statement(&[("03/05/2024", "UBER TRIP", "21.40")])),
        ];

        let mut events = Vec::new();
        let txns = aggregate(&files, |p| events.push(p.clone())).await;

        let merchants: Vec<_> = txns.iter().map(|t| t.merchant.as_str()).collect();
        assert_eq!(merchants, ["DUNKIN #11", "UBER TRIP"]);

        let errors: Vec<_> = events
            .iter()
            .filter(|e| e.status == ProgressStatus::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].current_file, 2);
        assert_eq!(errors[0].file_name, "feb.xlsx");
    }

    #[tokio::test]
    async fn test_progress_is_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.csv", &statement(&[("01/05/2024", "SPOTIFY", "11.99")])),
            write(dir.path(), "b.csv", &statement(&[])),
        ];

        let mut events = Vec::new();
        aggregate(&files, |p| events.push((p.current_file, p.total_files, p.status))).await;

        assert_eq!(
            events,
            [
                (1, 2, ProgressStatus::Processing),
                (1, 2, ProgressStatus::Complete),
                (2, 2, ProgressStatus::Processing),
                (2, 2, ProgressStatus::Complete),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file_reports_error() {
        let files = vec![StatementFile::from_path("/nonexistent/perks/statement.csv")];
        let mut statuses = Vec::new();
        let txns = aggregate(&files, |p| statuses.push(p.status)).await;
        assert!(txns.is_empty());
        assert_eq!(statuses, [ProgressStatus::Processing, ProgressStatus::Error]);
    }

    #[tokio::test]
    async fn test_text_is_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write(
            dir.path(),
            "a.csv",
            &statement(&[("01/05/2024", "GRUBHUB ORDER", "30.00")]),
        )];
        let txns = gather(Some("RESY BOOKING $75"), &files, |_| {}).await;
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].merchant, "RESY BOOKING");
        assert_eq!(txns[1].merchant, "GRUBHUB ORDER");
    }

    #[tokio::test]
    async fn test_blank_text_and_no_files() {
        let mut calls = 0;
        let txns = gather(Some("  \n "), &[], |_| calls += 1).await;
        assert!(txns.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_statement_file_name() {
        let f = StatementFile::from_path("/tmp/statements/march.csv");
        assert_eq!(f.name, "march.csv");
    }
}
