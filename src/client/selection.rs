use std::collections::BTreeSet;

use crate::model::FileRecord;

/// Ids marked for bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Empty ↔ everything in `files`. Anything in between becomes everything.
    pub fn toggle_all(&mut self, files: &[FileRecord]) {
        if self.ids.len() == files.len() {
            self.ids.clear();
        } else {
            self.ids = files.iter().map(|f| f.id.clone()).collect();
        }
    }

    /// Drops ids that are no longer in the listing.
    pub fn retain_listed(&mut self, files: &[FileRecord]) {
        self.ids.retain(|id| files.iter().any(|f| &f.id == id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn all_selected(&self, files: &[FileRecord]) -> bool {
        !files.is_empty() && self.ids.len() == files.len()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}
