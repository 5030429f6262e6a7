use std::collections::HashSet;

use crate::gesture::StrokeMode;
use crate::model::{FragmentKey, TextFragment};

/// Fragments the user has painted, in the order they were added
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    fragments: Vec<TextFragment>,
    keys: HashSet<FragmentKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn contains(&self, fragment: &TextFragment) -> bool {
        self.keys.contains(&fragment.key())
    }

    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }

    /// Apply one stroke batch; returns whether the selection changed
    pub fn apply<'a>(
        &mut self,
        mode: StrokeMode,
        batch: impl IntoIterator<Item = &'a TextFragment>,
    ) -> bool {
        let mut changed = false;
        for fragment in batch {
            let key = fragment.key();
            match mode {
                StrokeMode::Add => {
                    if self.keys.insert(key) {
                        self.fragments.push(fragment.clone());
                        changed = true;
                    }
                }
                StrokeMode::Remove => {
                    if self.keys.remove(&key) {
                        if let Some(pos) = self.fragments.iter().position(|f| f.key() == key) {
                            self.fragments.remove(pos);
                        }
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
        self.keys.clear();
    }
}
