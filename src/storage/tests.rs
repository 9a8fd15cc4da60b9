use super::{RecordStorage, Storage};
use crate::models::TransactionRecord;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::thread;

fn create_records(prefix: &str, count: usize) -> Vec<TransactionRecord> {
    (0..count)
        .map(|index| TransactionRecord::new(format!("{prefix}{index}")))
        .collect()
}

#[test]
fn test_storage_basic_load_and_save_operations() -> Result<()> {
    let storage = RecordStorage::new();

    assert!(storage.load("missing.csv").is_none());
    assert!(storage.latest().is_none());

    storage.save("january.csv", create_records("JAN", 3));

    let snapshot = storage.load("january.csv").ok_or_else(|| anyhow!("Snapshot not found in storage"))?;

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].transaction_id, "JAN0");

    Ok(())
}

#[test]
fn test_storage_iterator_collects_all_sources() {
    let storage = RecordStorage::new();
    storage.save("a.csv", create_records("A", 1));
    storage.save("b.csv", create_records("B", 2));
    storage.save("c.csv", create_records("C", 3));

    assert_eq!(storage.iter().count(), 3);
}

#[test]
fn test_storage_replaces_snapshots_by_reference() -> Result<()> {
    let storage = RecordStorage::new();
    storage.save("export.csv", create_records("OLD", 2));

    let previous = storage.load("export.csv").ok_or_else(|| anyhow!("Snapshot v1 missing"))?;

    storage.save("export.csv", create_records("NEW", 5));

    let current = storage.load("export.csv").ok_or_else(|| anyhow!("Snapshot v2 missing"))?;

    assert_eq!(previous.len(), 2);
    assert_eq!(previous[0].transaction_id, "OLD0");
    assert_eq!(current.len(), 5);
    assert_eq!(current[0].transaction_id, "NEW0");
    assert_eq!(storage.iter().count(), 1);

    Ok(())
}

#[test]
fn test_storage_latest_tracks_the_most_recent_save() -> Result<()> {
    let storage = RecordStorage::new();
    storage.save("first.csv", create_records("F", 1));
    storage.save("second.csv", create_records("S", 2));

    let (source, latest) = storage.latest().ok_or_else(|| anyhow!("Latest snapshot missing"))?;

    assert_eq!(source, "second.csv");
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].transaction_id, "S0");

    storage.save("first.csv", create_records("R", 4));

    let (source, latest) = storage.latest().ok_or_else(|| anyhow!("Latest snapshot missing"))?;

    assert_eq!(source, "first.csv");
    assert_eq!(latest[0].transaction_id, "R0");

    Ok(())
}

#[test]
fn test_concurrent_saves_keep_latest_paired_with_its_snapshot() -> Result<()> {
    let storage = Arc::new(RecordStorage::new());
    let sources = ["a.csv", "b.csv", "c.csv", "d.csv"];

    let writers: Vec<_> = sources.iter().copied()
        .map(|source| {
            let storage = storage.clone();
            thread::spawn(move || {
                for round in 0..100 {
                    storage.save(source, create_records(source, round + 1));
                }
            })
        })
        .collect();

    let reader = {
        let storage = storage.clone();
        thread::spawn(move || {
            for _ in 0..400 {
                let Some((source, snapshot)) = storage.latest() else {
                    continue;
                };

                assert!(snapshot.iter().all(|record| record.transaction_id.starts_with(source.as_str())));
            }
        })
    };

    for writer in writers {
        writer.join().expect("writer thread panicked");
    }

    reader.join().expect("reader thread panicked");

    let (source, snapshot) = storage.latest().ok_or_else(|| anyhow!("Latest snapshot missing"))?;
    let stored = storage.load(&source).ok_or_else(|| anyhow!("Latest source not stored"))?;

    assert!(sources.contains(&source.as_str()));
    assert!(Arc::ptr_eq(&snapshot, &stored));
    assert_eq!(snapshot.len(), 100);

    Ok(())
}

#[test]
fn test_concurrent_readers_only_observe_complete_snapshots() {
    let storage = Arc::new(RecordStorage::new());
    storage.save("export.csv", create_records("A", 10));

    let writer = {
        let storage = storage.clone();
        thread::spawn(move || {
            for round in 0..200 {
                let prefix = if round % 2 == 0 { "B" } else { "A" };
                let count = if round % 2 == 0 { 20 } else { 10 };
                storage.save("export.csv", create_records(prefix, count));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let storage = storage.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let Some(snapshot) = storage.load("export.csv") else {
                        continue;
                    };
                    let prefix = &snapshot[0].transaction_id[..1];
                    let expected = if prefix == "A" { 10 } else { 20 };

                    assert_eq!(snapshot.len(), expected);
                    assert!(snapshot.iter().all(|record| record.transaction_id.starts_with(prefix)));
                }
            })
        })
        .collect();

    writer.join().expect("writer thread panicked");

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
}
