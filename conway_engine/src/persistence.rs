// persistence.rs - Best-effort save/restore of session state

use crate::codec::{SessionSnapshot, SessionState, decode_state, encode_state};
use crate::config::EngineConfig;
use crate::error::PersistenceError;
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Where a session keeps its state between runs.
///
/// Saving and loading never fail from the caller's point of view: a save
/// that cannot be written is dropped, a load that cannot be read is `None`.
pub trait SessionPersistence {
    fn save(&mut self, snapshot: &SessionSnapshot<'_>);
    fn load(&mut self) -> Option<SessionState>;
}

/// Keeps nothing.
#[derive(Debug, Default)]
pub struct NullPersistence;

impl SessionPersistence for NullPersistence {
    fn save(&mut self, _snapshot: &SessionSnapshot<'_>) {}

    fn load(&mut self) -> Option<SessionState> {
        None
    }
}

/// Sparse JSON state under one base key, split into chunk keys when it grows
/// past `chunk_size` bytes.
#[derive(Debug)]
pub struct StorePersistence<S> {
    store         : S,
    key           : String,
    chunk_size    : usize,
    history_limit : usize,
}

impl<S: KeyValueStore> StorePersistence<S> {
    pub fn new(store: S, config: &EngineConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            chunk_size: config.chunk_size.max(1),
            history_limit: config.history_limit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn chunk_key(&self, index: usize) -> String {
        format!("{}_chunk_{}", self.key, index)
    }

    fn count_key(&self) -> String {
        format!("{}_chunks", self.key)
    }

    pub fn try_save(&mut self, snapshot: &SessionSnapshot<'_>) -> Result<(), PersistenceError> {
        let serialized = encode_state(snapshot, self.history_limit)?;
        let previous_chunks = self.stored_chunk_count().unwrap_or(0);

        if serialized.len() > self.chunk_size {
            let chunks = split_chunks(&serialized, self.chunk_size);
            for (index, chunk) in chunks.iter().enumerate() {
                self.store.set(&self.chunk_key(index), chunk)?;
            }
            self.store.set(&self.count_key(), &chunks.len().to_string())?;
            self.store.remove(&self.key)?;
            for stale in chunks.len()..previous_chunks {
                self.store.remove(&self.chunk_key(stale))?;
            }
            debug!(bytes = serialized.len(), chunks = chunks.len(), "saved chunked session state");
        } else {
            self.store.set(&self.key, &serialized)?;
            self.store.remove(&self.count_key())?;
            for stale in 0..previous_chunks {
                self.store.remove(&self.chunk_key(stale))?;
            }
            debug!(bytes = serialized.len(), "saved session state");
        }
        Ok(())
    }

    pub fn try_load(&self) -> Result<Option<SessionState>, PersistenceError> {
        let text = match self.store.get(&self.count_key())? {
            Some(count) => {
                let count: usize = count
                    .trim()
                    .parse()
                    .map_err(|_| PersistenceError::InvalidChunkCount(count.clone()))?;
                let mut text = String::new();
                for index in 0..count {
                    let chunk = self
                        .store
                        .get(&self.chunk_key(index))?
                        .ok_or(PersistenceError::MissingChunk(index))?;
                    text.push_str(&chunk);
                }
                Some(text)
            }
            None => self.store.get(&self.key)?,
        };

        text.map(|text| decode_state(&text)).transpose()
    }

    fn stored_chunk_count(&self) -> Option<usize> {
        self.store.get(&self.count_key()).ok().flatten()?.trim().parse().ok()
    }
}

impl<S: KeyValueStore> SessionPersistence for StorePersistence<S> {
    fn save(&mut self, snapshot: &SessionSnapshot<'_>) {
        if let Err(err) = self.try_save(snapshot) {
            warn!(error = %err, key = %self.key, "dropping session save");
        }
    }

    fn load(&mut self) -> Option<SessionState> {
        match self.try_load() {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, key = %self.key, "ignoring unreadable session state");
                None
            }
        }
    }
}

/// Splits `text` into pieces of at most `max` bytes without cutting a character.
pub fn split_chunks(text: &str, max: usize) -> Vec<&str> {
    let max = max.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = max.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // a single character wider than `max` still has to go somewhere
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
