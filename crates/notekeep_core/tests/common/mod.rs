#![allow(dead_code)]

use notekeep_core::{
    Clock, FallbackIdSource, IdGenerator, IdSource, IdSourceError, KeyValueStore, MemoryStore,
    NoteRepository, StoreError, StoreResult,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Strong source replaying a fixed script; errors once exhausted.
pub struct ScriptedIds {
    ids: VecDeque<String>,
}

impl ScriptedIds {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl IdSource for ScriptedIds {
    fn next_id(&mut self) -> Result<String, IdSourceError> {
        self.ids
            .pop_front()
            .ok_or_else(|| IdSourceError("script exhausted".to_string()))
    }
}

/// Store whose reads and/or writes always fail.
#[derive(Default)]
pub struct BrokenStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}

/// Handle to one store shared by several repositories.
#[derive(Clone, Default)]
pub struct SharedStore(Rc<RefCell<MemoryStore>>);

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.0.borrow_mut().set(key, value)
    }
}

pub fn scripted_generator(ids: &[&str]) -> IdGenerator {
    IdGenerator::with_sources(Box::new(ScriptedIds::new(ids)), FallbackIdSource::with_seed(1))
}

/// Repository over an in-memory store with a manual clock.
pub fn memory_repo(clock: &ManualClock) -> NoteRepository<MemoryStore, &ManualClock> {
    NoteRepository::with_parts(MemoryStore::new(), clock, IdGenerator::new())
}
