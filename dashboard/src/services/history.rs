//! # History Stack
//!
//! In-memory stand-in for browser history: `push` records an entry and drops
//! any forward entries, `back`/`forward` move the cursor and return the entry
//! to replay through [`SessionController::on_navigate`](crate::session::SessionController::on_navigate).
//! [`Dashboard::navigate_back`](crate::Dashboard::navigate_back) and
//! [`Dashboard::navigate_forward`](crate::Dashboard::navigate_forward) do both.

use parking_lot::Mutex;

use crate::core::service::History;
use crate::session::NavigationEntry;

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub entry: NavigationEntry,
    pub url: String,
}

#[derive(Default)]
struct Stack {
    records: Vec<HistoryRecord>,
    /// Index of the current record; `None` before the first push
    cursor: Option<usize>,
}

#[derive(Default)]
pub struct HistoryStack {
    stack: Mutex<Stack>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step back. `Some(None)` means the initial page, which has no record.
    pub fn back(&self) -> Option<Option<NavigationEntry>> {
        let mut stack = self.stack.lock();
        match stack.cursor {
            Some(0) => {
                stack.cursor = None;
                Some(None)
            }
            Some(index) => {
                stack.cursor = Some(index - 1);
                Some(Some(stack.records[index - 1].entry.clone()))
            }
            None => None,
        }
    }

    /// Step forward, if a forward record exists.
    pub fn forward(&self) -> Option<NavigationEntry> {
        let mut stack = self.stack.lock();
        let next = stack.cursor.map_or(0, |index| index + 1);
        let entry = stack.records.get(next)?.entry.clone();
        stack.cursor = Some(next);
        Some(entry)
    }

    pub fn current_url(&self) -> Option<String> {
        let stack = self.stack.lock();
        stack.cursor.map(|index| stack.records[index].url.clone())
    }

    pub fn len(&self) -> usize {
        self.stack.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl History for HistoryStack {
    fn push(&self, entry: NavigationEntry, url: &str) {
        let mut stack = self.stack.lock();
        let keep = stack.cursor.map_or(0, |index| index + 1);
        stack.records.truncate(keep);
        stack.records.push(HistoryRecord {
            entry,
            url: url.to_string(),
        });
        stack.cursor = Some(stack.records.len() - 1);
        tracing::debug!(url, depth = stack.records.len(), "History entry pushed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Address;

    fn entry(raw: &str) -> NavigationEntry {
        NavigationEntry::for_address(Address::parse(raw).unwrap())
    }

    #[test]
    fn test_back_and_forward() {
        let history = HistoryStack::new();
        assert_eq!(history.back(), None);

        history.push(entry("0x1"), "?address=0x1");
        history.push(entry("0x2"), "?address=0x2");
        assert_eq!(history.current_url().as_deref(), Some("?address=0x2"));

        assert_eq!(history.back(), Some(Some(entry("0x1"))));
        assert_eq!(history.back(), Some(None));
        assert_eq!(history.back(), None);

        assert_eq!(history.forward(), Some(entry("0x1")));
        assert_eq!(history.forward(), Some(entry("0x2")));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_push_discards_forward_records() {
        let history = HistoryStack::new();
        history.push(entry("0x1"), "?address=0x1");
        history.push(entry("0x2"), "?address=0x2");
        history.back();

        history.push(NavigationEntry::root(), "./");
        assert_eq!(history.len(), 2);
        assert_eq!(history.forward(), None);
        assert_eq!(history.current_url().as_deref(), Some("./"));
    }
}
