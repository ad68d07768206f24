use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ChartError, ChartResult};

use super::KeyValueStorage;

#[derive(Debug, Default)]
struct MemorySlots {
    values: HashMap<String, String>,
    fail_writes: bool,
    write_count: usize,
}

/// In-process key-value storage.
///
/// Clones share the same slots, so a host (or a test) can keep a handle and
/// inspect what the engine persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<MemorySlots>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots
            .borrow_mut()
            .values
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.slots.borrow().values.get(key).cloned()
    }

    /// Makes every subsequent `set` fail, simulating a full or revoked store.
    pub fn set_failing_writes(&self, fail: bool) {
        self.slots.borrow_mut().fail_writes = fail;
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.slots.borrow().write_count
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> ChartResult<()> {
        let mut slots = self.slots.borrow_mut();
        if slots.fail_writes {
            return Err(ChartError::Storage(format!(
                "write to `{key}` rejected by memory storage"
            )));
        }
        slots.values.insert(key.to_owned(), value.to_owned());
        slots.write_count += 1;
        Ok(())
    }
}
