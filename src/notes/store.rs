//! In-memory note store
//!
//! Holds every note in insertion order behind a single lock. Notes live only
//! as long as the process; nothing is written to disk.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::error::{Result, ValidationError};
use crate::notes::types::{Note, NoteId};

/// Shared registry of notes
///
/// All state, including the random source, sits behind one mutex so every
/// operation is atomic with respect to every other.
pub struct NoteStore {
    inner: Mutex<StoreState>,
    max_note_length: usize,
}

struct StoreState {
    /// Notes in insertion order
    notes: Vec<Note>,

    /// Position of each note in `notes`
    positions: HashMap<NoteId, usize>,

    next_id: u64,

    rng: StdRng,
}

impl NoteStore {
    /// Create an empty store
    pub fn new(max_note_length: usize) -> Self {
        Self::with_rng(max_note_length, StdRng::from_entropy())
    }

    /// Create an empty store with a reproducible random source
    pub fn with_seed(max_note_length: usize, seed: u64) -> Self {
        Self::with_rng(max_note_length, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_note_length: usize, rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(StoreState {
                notes: Vec::new(),
                positions: HashMap::new(),
                next_id: 1,
                rng,
            }),
            max_note_length,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // State is never left half-updated; a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Maximum note length in characters
    pub fn max_note_length(&self) -> usize {
        self.max_note_length
    }

    /// Add a note and return it
    pub fn add(&self, text: impl Into<String>) -> Result<Note> {
        let text = text.into();

        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let length = text.chars().count();
        if length > self.max_note_length {
            return Err(ValidationError::TextTooLong {
                length,
                max: self.max_note_length,
            }
            .into());
        }

        let mut state = self.lock();

        let id = NoteId(state.next_id);
        state.next_id += 1;

        let note = Note {
            id,
            text,
            created_at: Utc::now(),
        };

        let position = state.notes.len();
        let previous = state.positions.insert(id, position);
        assert!(previous.is_none(), "note id {} assigned twice", id);
        state.notes.push(note.clone());

        Ok(note)
    }

    /// Snapshot of all notes in insertion order
    pub fn list(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Look up a note by ID
    pub fn get(&self, id: NoteId) -> Option<Note> {
        let state = self.lock();
        state.positions.get(&id).map(|&pos| state.notes[pos].clone())
    }

    /// Remove a note by ID
    pub fn remove(&self, id: NoteId) -> Option<Note> {
        let mut state = self.lock();
        let position = state.positions.remove(&id)?;
        let note = state.notes.remove(position);
        state.reindex_from(position);
        Some(note)
    }

    /// Remove up to `count` notes chosen uniformly at random
    ///
    /// Asking for more notes than exist removes all of them. The removed
    /// notes are returned in their original insertion order.
    pub fn delete_random(&self, count: i64) -> Result<Vec<Note>> {
        if count < 0 {
            return Err(ValidationError::NegativeCount { count }.into());
        }

        let mut state = self.lock();
        let len = state.notes.len();
        let amount = usize::try_from(count).map_or(len, |c| c.min(len));

        if amount == 0 {
            return Ok(Vec::new());
        }

        if amount == len {
            state.positions.clear();
            return Ok(std::mem::take(&mut state.notes));
        }

        let mut selected = vec![false; len];
        for position in index::sample(&mut state.rng, len, amount) {
            selected[position] = true;
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.notes)
            .into_iter()
            .enumerate()
            .partition(|(position, _)| selected[*position]);

        state.notes = kept.into_iter().map(|(_, note)| note).collect();
        state.reindex_from(0);

        Ok(removed.into_iter().map(|(_, note)| note).collect())
    }

    /// Number of notes currently stored
    pub fn len(&self) -> usize {
        self.lock().notes.len()
    }

    /// Whether the store holds no notes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StoreState {
    fn reindex_from(&mut self, start: usize) {
        if start == 0 {
            self.positions.clear();
        }
        for (position, note) in self.notes.iter().enumerate().skip(start) {
            self.positions.insert(note.id, position);
        }
    }
}
