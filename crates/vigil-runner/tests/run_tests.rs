//! Integration tests for vigil-runner
//!
//! These tests drive whole runs with a fake clock, so pacing and retry
//! delays cost nothing.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use vigil_classifier::{Classifier, ClassifierConfig};
use vigil_domain::traits::{BatchClassifier, ResultSink};
use vigil_domain::{Comment, ManualClock, OffenseType, ResultRecord, Verdict};
use vigil_llm::MockProvider;
use vigil_prefilter::ProfanityFilter;
use vigil_runner::{cap_to_ceiling, RunConfig, RunCoordinator};
use vigil_store::{load_comments, load_records, CsvCheckpoint, MemorySink, StoreError};

/// What the fake classifier does with one batch
enum Step {
    Ok,
    Fail,
    Short,
}

/// Answers batches from a script, defaulting to clean verdicts
#[derive(Default)]
struct FakeClassifier {
    script: VecDeque<Step>,
    batch_sizes: Vec<usize>,
}

impl FakeClassifier {
    fn scripted(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            batch_sizes: Vec::new(),
        }
    }
}

impl BatchClassifier for FakeClassifier {
    type Error = String;

    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<Verdict>, Self::Error> {
        self.batch_sizes.push(texts.len());
        match self.script.pop_front().unwrap_or(Step::Ok) {
            Step::Ok => Ok(texts
                .iter()
                .map(|t| Verdict::new(true, OffenseType::Toxicity, t.clone(), 0.5))
                .collect()),
            Step::Fail => Err("service unavailable".to_string()),
            Step::Short => Ok(vec![Verdict::prefilter_clean()]),
        }
    }
}

/// Writes through to a CSV checkpoint and records the file's row count
/// right after each write
struct ObservedCheckpoint {
    inner: CsvCheckpoint,
    rows_on_disk: Vec<usize>,
}

impl ResultSink for ObservedCheckpoint {
    type Error = StoreError;

    fn save(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        self.inner.save(records)?;
        self.rows_on_disk.push(load_records(self.inner.path())?.len());
        Ok(())
    }
}

fn comments(n: usize) -> Vec<Comment> {
    Comment::from_texts((0..n).map(|i| format!("comment {}", i)))
}

fn verdicts_json(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|_| {
            r#"{"is_offensive": true, "offense_type": "profanity", "explanation": "swearing", "severity": 0.3}"#
                .to_string()
        })
        .collect();
    format!("[{}]", items.join(","))
}

#[test]
fn test_slicing_respects_max_batches() {
    let config = RunConfig {
        batch_size: 20,
        max_batches: 3,
        ..RunConfig::default()
    };
    let all = cap_to_ceiling(comments(105), &config);
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        config,
    )
    .unwrap();

    let report = coordinator.run(&all);

    assert_eq!(report.table.len(), 60);
    assert_eq!(coordinator.classifier().batch_sizes, vec![20, 20, 20]);
    assert_eq!(report.metrics.batches_planned, 3);
    assert_eq!(report.metrics.batches_completed, 3);
    assert_eq!(report.metrics.comments_classified, 60);
}

#[test]
fn test_uncapped_input_still_limited_to_planned_batches() {
    let config = RunConfig {
        batch_size: 20,
        max_batches: 3,
        ..RunConfig::default()
    };
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        config,
    )
    .unwrap();

    let report = coordinator.run(&comments(105));
    assert_eq!(report.table.len(), 60);
}

#[test]
fn test_records_carry_position_and_username() {
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        RunConfig::default(),
    )
    .unwrap();

    let report = coordinator.run(&comments(3));
    let record = &report.table.records()[2];

    assert_eq!(record.comment_id, 2);
    assert_eq!(record.username, "user_2");
    assert_eq!(record.original_comment, "comment 2");
    assert_eq!(record.offense_type, OffenseType::Toxicity);
}

#[test]
fn test_checkpoint_after_every_batch() {
    let config = RunConfig {
        batch_size: 10,
        ..RunConfig::default()
    };
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        config,
    )
    .unwrap();

    let report = coordinator.run(&comments(25));

    let sizes: Vec<usize> = coordinator.sink().snapshots().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![10, 20, 25]);
    assert_eq!(report.metrics.checkpoint_writes, 3);
}

#[test]
fn test_failed_batch_is_skipped_and_run_continues() {
    let config = RunConfig {
        batch_size: 10,
        ..RunConfig::default()
    };
    let classifier = FakeClassifier::scripted([Step::Ok, Step::Fail, Step::Short, Step::Ok]);
    let mut coordinator =
        RunCoordinator::new(classifier, ManualClock::default(), MemorySink::new(), config).unwrap();

    let report = coordinator.run(&comments(40));

    assert_eq!(report.metrics.batches_planned, 4);
    assert_eq!(report.metrics.batches_completed, 2);
    assert_eq!(report.metrics.batches_failed, 2);
    assert_eq!(report.table.len(), 20);

    let ids: Vec<usize> = report.table.iter().map(|r| r.comment_id).collect();
    let expected: Vec<usize> = (0..10).chain(30..40).collect();
    assert_eq!(ids, expected);

    // Failed batches still checkpoint what was accumulated
    let sizes: Vec<usize> = coordinator.sink().snapshots().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![10, 10, 10, 20]);
}

#[test]
fn test_checkpoint_failure_does_not_abort() {
    let config = RunConfig {
        batch_size: 10,
        ..RunConfig::default()
    };
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::failing(),
        config,
    )
    .unwrap();

    let report = coordinator.run(&comments(20));

    // Verdicts are kept in memory even though the sink rejects them
    assert_eq!(report.table.len(), 20);
    assert_eq!(report.metrics.batches_failed, 2);
    assert_eq!(report.metrics.checkpoint_writes, 0);
}

#[test]
fn test_pacing_between_batches_only() {
    let clock = ManualClock::default();
    let config = RunConfig {
        batch_size: 10,
        ..RunConfig::default()
    };
    let mut coordinator =
        RunCoordinator::new(FakeClassifier::default(), clock.clone(), MemorySink::new(), config)
            .unwrap();

    let report = coordinator.run(&comments(30));

    assert_eq!(clock.sleeps(), vec![Duration::from_secs(5); 2]);
    assert_eq!(report.metrics.elapsed, Duration::from_secs(10));
}

#[test]
fn test_single_batch_has_no_pacing() {
    let clock = ManualClock::default();
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        clock.clone(),
        MemorySink::new(),
        RunConfig::default(),
    )
    .unwrap();

    coordinator.run(&comments(5));
    assert!(clock.sleeps().is_empty());
}

#[test]
fn test_empty_input() {
    let mut coordinator = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        RunConfig::default(),
    )
    .unwrap();

    let report = coordinator.run(&[]);
    assert!(report.table.is_empty());
    assert_eq!(report.metrics.batches_planned, 0);
    assert!(coordinator.sink().snapshots().is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let config = RunConfig {
        batch_size: 0,
        ..RunConfig::default()
    };
    let result = RunCoordinator::new(
        FakeClassifier::default(),
        ManualClock::default(),
        MemorySink::new(),
        config,
    );
    assert!(result.is_err());
}

#[test]
fn test_end_to_end_with_csv_checkpoint() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("comments.csv");

    // Every third comment contains profanity
    let mut csv = String::from("id,tweet\n");
    for i in 0..25 {
        let text = if i % 3 == 0 {
            format!("damn thing number {}", i)
        } else {
            format!("pleasant note number {}", i)
        };
        csv.push_str(&format!("{},{}\n", i + 100, text));
    }
    fs::write(&input, csv).unwrap();

    let config = RunConfig {
        max_batches: 2,
        checkpoint_path: dir.path().join("partial_results.csv"),
        ..RunConfig::default()
    };
    let comments = cap_to_ceiling(load_comments(&input, "tweet").unwrap(), &config);
    assert_eq!(comments.len(), 25);

    // Batch 1 (ids 0..20) has 7 flagged comments, batch 2 (ids 20..25) has 2
    let llm = MockProvider::default();
    llm.push_response(verdicts_json(7));
    llm.push_response(verdicts_json(2));

    let clock = ManualClock::default();
    let classifier = Classifier::new(
        llm.clone(),
        ProfanityFilter::default(),
        ClassifierConfig::default(),
        clock.clone(),
    )
    .unwrap();
    let sink = ObservedCheckpoint {
        inner: CsvCheckpoint::new(PathBuf::from(&config.checkpoint_path)),
        rows_on_disk: Vec::new(),
    };
    let mut coordinator = RunCoordinator::new(classifier, clock.clone(), sink, config).unwrap();

    let report = coordinator.run(&comments);

    assert_eq!(report.metrics.batches_planned, 2);
    assert_eq!(llm.call_count(), 2);
    assert_eq!(coordinator.sink().rows_on_disk, vec![20, 25]);

    let ids: Vec<usize> = report.table.iter().map(|r| r.comment_id).collect();
    assert_eq!(ids, (0..25).collect::<Vec<_>>());

    for record in &report.table {
        if record.comment_id % 3 == 0 {
            assert!(record.is_offensive);
            assert_eq!(record.offense_type, OffenseType::Profanity);
        } else {
            assert!(!record.is_offensive);
            assert_eq!(record.offense_type, OffenseType::None);
            assert_eq!(record.severity, 0.0);
        }
    }

    let on_disk = load_records(coordinator.sink().inner.path()).unwrap();
    assert_eq!(on_disk, report.table.records());
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(5)]);
}
