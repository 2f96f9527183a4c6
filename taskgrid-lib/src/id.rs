//! Identifier generation for locally created columns and rows

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::Utc;

use crate::model::ColumnId;
use crate::model::RowId;

/// Time-based id generator.
///
/// Ids are `<prefix>_<unix millis>`. The generator never hands out the same
/// millisecond twice: a request arriving in an already-used millisecond gets
/// the next unused one, so ids stay unique even in tight loops.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh column id (`col_<millis>`).
    pub fn column_id(&self) -> ColumnId {
        ColumnId::new(format!("col_{}", self.next_stamp()))
    }

    /// Returns a fresh row id (`row_<millis>`).
    pub fn row_id(&self) -> RowId {
        RowId::new(format!("row_{}", self.next_stamp()))
    }

    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique_within_a_millisecond() {
        let ids = IdGenerator::new();
        let generated: HashSet<_> = (0..1000).map(|_| ids.row_id()).collect();
        assert_eq!(generated.len(), 1000);
    }

    #[test]
    fn test_prefixes() {
        let ids = IdGenerator::new();
        assert!(ids.column_id().as_str().starts_with("col_"));
        assert!(ids.row_id().as_str().starts_with("row_"));
    }
}
