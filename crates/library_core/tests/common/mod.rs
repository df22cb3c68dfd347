#![allow(dead_code)]

use library_core::db::{DataAccess, DbError, DbResult, Row, Value};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// One statement seen by [`RecordingAccess::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<Value>,
}

/// In-memory `DataAccess` that records writes and serves canned rows.
pub struct RecordingAccess {
    executed: Mutex<Vec<Executed>>,
    rows: Mutex<HashMap<String, Vec<Row>>>,
    failing_tables: Mutex<HashSet<String>>,
    fail_writes: AtomicBool,
    rows_changed: AtomicUsize,
}

impl Default for RecordingAccess {
    fn default() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            rows: Mutex::new(HashMap::new()),
            failing_tables: Mutex::new(HashSet::new()),
            fail_writes: AtomicBool::new(false),
            rows_changed: AtomicUsize::new(1),
        }
    }
}

impl RecordingAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&self, table: &str, rows: Vec<Row>) {
        self.rows.lock().unwrap().insert(table.to_string(), rows);
    }

    pub fn fail_reads_of(&self, table: &str) {
        self.failing_tables.lock().unwrap().insert(table.to_string());
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_rows_changed(&self, count: usize) {
        self.rows_changed.store(count, Ordering::SeqCst);
    }

    pub fn executed(&self) -> Vec<Executed> {
        self.executed.lock().unwrap().clone()
    }

    pub fn last_executed(&self) -> Executed {
        self.executed().last().cloned().expect("no statement executed")
    }
}

impl DataAccess for RecordingAccess {
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        self.executed.lock().unwrap().push(Executed {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Execute(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
                Some("forced write failure".to_string()),
            )));
        }
        Ok(self.rows_changed.load(Ordering::SeqCst))
    }

    fn fetch_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        let table = table_of(sql);
        if self.failing_tables.lock().unwrap().contains(&table) {
            return Err(DbError::Connect(rusqlite::Error::InvalidPath(PathBuf::from(
                "unreachable-host",
            ))));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default())
    }
}

fn table_of(sql: &str) -> String {
    let start = sql.find("FROM \"").expect("select without FROM") + "FROM \"".len();
    let end = sql[start..].find('"').expect("unterminated table name") + start;
    sql[start..end].to_string()
}

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn int(value: i64) -> Value {
    Value::Integer(value)
}
