// ============================================================
// Layer 3 — Candidate Memory
// ============================================================
// While training task t, the driver scores examples (e.g. by
// model probability) and keeps a mapping score → example.
// After the task ends every stored example is appended to the
// replay memory (see data::memory::save_memory).
//
// Scores are f64, which is neither Eq nor Hash, so the mapping
// is a small insertion-ordered list. Iteration order is always
// insertion order; re-inserting an existing score replaces the
// payload in place.

/// Insertion-ordered mapping from a selection score to a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMemory<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for CandidateMemory<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> CandidateMemory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `payload` under `score`. Returns the previous
    /// payload when the score was already present.
    pub fn insert(&mut self, score: f64, payload: T) -> Option<T> {
        match self.entries.iter_mut().find(|(s, _)| *s == score) {
            Some((_, slot)) => Some(std::mem::replace(slot, payload)),
            None => {
                self.entries.push((score, payload));
                None
            }
        }
    }

    pub fn get(&self, score: f64) -> Option<&T> {
        self.entries.iter().find(|(s, _)| *s == score).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Payloads in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.entries.iter().map(|(s, p)| (*s, p))
    }
}

impl<T> FromIterator<(f64, T)> for CandidateMemory<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut memory = Self::new();
        for (score, payload) in iter {
            memory.insert(score, payload);
        }
        memory
    }
}
