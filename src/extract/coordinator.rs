//! Parallel extraction of stored documents into corpus records
//!
//! The listing is split into static slices and each slice is handled by a
//! blocking worker. Workers share nothing; each sends one
//! [`WorkerReport`] back over a channel when its slice is done, and the
//! coordinator folds the reports into an [`ExtractOutcome`].

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use super::text::SummaryLimits;
use crate::article::corpus_filename;
use crate::corpus::{write_record, CorpusFormat};
use crate::crawler::partition;
use crate::storage::Repository;
use crate::CorpusError;

/// Totals of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// Documents attempted, failures included
    pub processed: usize,

    /// Stored documents that could not be parsed
    pub parse_failures: Vec<String>,

    /// Documents whose corpus record could not be written
    pub write_failures: Vec<String>,
}

impl ExtractOutcome {
    /// Documents that produced a corpus record
    pub fn succeeded(&self) -> usize {
        self.processed - self.parse_failures.len() - self.write_failures.len()
    }
}

/// Result of one worker's slice
#[derive(Debug, Clone, Default)]
pub struct WorkerReport {
    pub worker: usize,
    pub processed: usize,
    pub parse_failures: Vec<String>,
    pub write_failures: Vec<String>,
}

enum FileStatus {
    Written,
    ParseFailed,
    WriteFailed,
}

/// Everything a worker needs to turn stored documents into records
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    repository: Repository,
    corpus_dir: PathBuf,
    format: CorpusFormat,
    limits: SummaryLimits,
}

impl ExtractionJob {
    pub fn new(
        repository: Repository,
        corpus_dir: impl Into<PathBuf>,
        format: CorpusFormat,
        limits: SummaryLimits,
    ) -> Self {
        Self {
            repository,
            corpus_dir: corpus_dir.into(),
            format,
            limits,
        }
    }

    pub fn corpus_dir(&self) -> &Path {
        &self.corpus_dir
    }

    /// Extracts every stored document in `filenames` using `workers` workers
    ///
    /// Per-document failures are recorded in the outcome; only a worker
    /// that panics makes the whole run fail.
    pub async fn run(&self, filenames: &[String], workers: usize) -> Result<ExtractOutcome, CorpusError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handles = Vec::new();

        for (worker, slice) in partition(filenames, workers).into_iter().enumerate() {
            if slice.is_empty() {
                continue;
            }

            let job = self.clone();
            let slice = slice.to_vec();
            let tx = tx.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                let report = job.extract_slice(worker, &slice);
                // The receiver only goes away if the coordinator itself failed
                let _ = tx.send(report);
            }));
        }
        drop(tx);

        let mut outcome = ExtractOutcome::default();
        while let Some(report) = rx.recv().await {
            tracing::debug!(
                "Worker {} finished {} documents",
                report.worker,
                report.processed
            );
            outcome.processed += report.processed;
            outcome.parse_failures.extend(report.parse_failures);
            outcome.write_failures.extend(report.write_failures);
        }

        for handle in handles {
            handle.await?;
        }

        Ok(outcome)
    }

    /// Processes one slice sequentially
    pub fn extract_slice(&self, worker: usize, filenames: &[String]) -> WorkerReport {
        let mut report = WorkerReport {
            worker,
            ..WorkerReport::default()
        };

        for filename in filenames {
            report.processed += 1;
            match self.extract_file(filename) {
                FileStatus::Written => {}
                FileStatus::ParseFailed => report.parse_failures.push(filename.clone()),
                FileStatus::WriteFailed => report.write_failures.push(filename.clone()),
            }
        }

        report
    }

    fn extract_file(&self, filename: &str) -> FileStatus {
        let source = self.repository.document_path(filename);
        let document = match super::extract_document(&source, &self.limits) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Cannot parse {}: {}", filename, e);
                return FileStatus::ParseFailed;
            }
        };

        let target = self.corpus_dir.join(corpus_filename(filename, self.format));
        match write_record(&document, &target, self.format) {
            Ok(()) => {
                tracing::debug!("Wrote {}", target.display());
                FileStatus::Written
            }
            Err(e) => {
                tracing::warn!("Cannot write {}: {}", target.display(), e);
                FileStatus::WriteFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn article(title: &str) -> String {
        format!(
            r#"<html><head><link rel="canonical" href="https://en.wikipedia.org/wiki/{title}"></head>
            <body><h1 id="firstHeading">{title}</h1>
            <div id="mw-content-text"><div class="mw-parser-output">
            <p>{title} is an article.</p>
            <h2>Details</h2><p>More about {title}.</p>
            </div></div></body></html>"#
        )
    }

    fn setup(documents: &[(&str, String)]) -> (TempDir, ExtractionJob) {
        let dir = TempDir::new().unwrap();
        let repository = Repository::new(dir.path().join("repository"));
        let corpus = dir.path().join("corpus");
        fs::create_dir_all(repository.root()).unwrap();
        fs::create_dir_all(&corpus).unwrap();

        for (filename, body) in documents {
            fs::write(repository.document_path(filename), body).unwrap();
        }

        let job = ExtractionJob::new(repository, corpus, CorpusFormat::Tagged, SummaryLimits::default());
        (dir, job)
    }

    #[tokio::test]
    async fn test_extracts_every_document() {
        let names = ["A", "B", "C", "D", "E"];
        let documents: Vec<(&str, String)> = vec![
            ("A.html", article("A")),
            ("B.html", article("B")),
            ("C.html", article("C")),
            ("D.html", article("D")),
            ("E.html", article("E")),
        ];
        let (_dir, job) = setup(&documents);
        let filenames: Vec<String> = documents.iter().map(|(f, _)| f.to_string()).collect();

        let outcome = job.run(&filenames, 3).await.unwrap();

        assert_eq!(outcome.processed, 5);
        assert!(outcome.parse_failures.is_empty());
        assert!(outcome.write_failures.is_empty());
        assert_eq!(outcome.succeeded(), 5);

        for name in names {
            let record = fs::read_to_string(job.corpus_dir().join(format!("{}.xml", name))).unwrap();
            assert!(record.contains(&format!("<heading>\n{}\n</heading>", name)));
            assert!(record.contains(&format!("<content>\n{} is an article.\n</content>", name)));
        }
    }

    #[tokio::test]
    async fn test_parse_failures_are_recorded() {
        let documents = vec![
            ("Good.html", article("Good")),
            ("Bad.html", "<html><body><p>no structure</p></body></html>".to_string()),
        ];
        let (_dir, job) = setup(&documents);
        let filenames: Vec<String> = documents.iter().map(|(f, _)| f.to_string()).collect();

        let outcome = job.run(&filenames, 4).await.unwrap();

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.parse_failures, vec!["Bad.html".to_string()]);
        assert!(job.corpus_dir().join("Good.xml").exists());
        assert!(!job.corpus_dir().join("Bad.xml").exists());
    }

    #[tokio::test]
    async fn test_write_failures_are_recorded() {
        let documents = vec![("A.html", article("A"))];
        let (_dir, job) = setup(&documents);
        // A directory where the record should go makes the write fail
        fs::create_dir_all(job.corpus_dir().join("A.xml")).unwrap();

        let outcome = job.run(&["A.html".to_string()], 1).await.unwrap();

        assert_eq!(outcome.write_failures, vec!["A.html".to_string()]);
        assert_eq!(outcome.succeeded(), 0);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let (_dir, job) = setup(&[]);
        let outcome = job.run(&[], 4).await.unwrap();
        assert_eq!(outcome, ExtractOutcome::default());
    }
}
