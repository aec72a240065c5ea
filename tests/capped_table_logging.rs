// Log levels emitted by a table that sits at its bucket ceiling.
//
// Lives in its own test binary because it installs a process-wide logger.
use chain_hashtable::HashTable;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct Recorder {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Recorder {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder {
    records: Mutex::new(Vec::new()),
};

/// Invariant: reaching a deliberate ceiling is routine and never logged as a
/// warning, however many inserts run into it.
#[test]
fn bucket_ceiling_is_not_a_warning() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut t = HashTable::builder()
        .name("capped")
        .size(2)
        .max_buckets(2)
        .build()
        .unwrap();
    for i in 0..100 {
        t.insert(&format!("k{i}"), i);
    }
    assert_eq!(t.size(), 2);
    assert_eq!(t.len(), 100);

    let records = RECORDER.records.lock().unwrap();
    let skipped: Vec<_> = records
        .iter()
        .filter(|(_, msg)| msg.contains("capped") && msg.contains("resize skipped"))
        .collect();
    assert_eq!(skipped.len(), 100 - 4, "one skip per insert past 2 * size");
    assert!(skipped.iter().all(|(level, _)| *level == Level::Debug));
    assert!(!records.iter().any(|(level, _)| *level <= Level::Warn));
}
