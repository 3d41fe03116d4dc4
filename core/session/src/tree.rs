//! In-memory view over a session's entries: parent/child links, branch
//! walks, leaf tracking.

use std::collections::HashMap;

use cocode_protocol::SessionEntry;
use uuid::Uuid;

use crate::error::SessionError;
use crate::error::session_error::EntryNotFoundSnafu;

/// All entries ever appended to a session file, indexed for O(1) parent
/// lookups and child enumeration. Does not itself track "the" current
/// leaf — callers (e.g. [`crate::SessionStore`]) own that.
#[derive(Debug, Default)]
pub struct SessionTree {
    entries: Vec<SessionEntry>,
    index: HashMap<Uuid, usize>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl SessionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: SessionEntry) {
        if let Some(parent_id) = entry.parent_id {
            self.children.entry(parent_id).or_default().push(entry.id);
        }
        self.index.insert(entry.id, self.entries.len());
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&SessionEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map_or(&[], |v| v.as_slice())
    }

    /// Ids with no recorded children: the tips of every branch.
    pub fn leaves(&self) -> Vec<Uuid> {
        self.entries
            .iter()
            .map(|e| e.id)
            .filter(|id| self.children_of(*id).is_empty())
            .collect()
    }

    /// Walk from `leaf_id` back to the root, returned in chronological
    /// (root-first) order — the sequence of entries "on" that branch.
    pub fn branch(&self, leaf_id: Uuid) -> Result<Vec<SessionEntry>, SessionError> {
        let mut out = Vec::new();
        let mut cursor = Some(leaf_id);
        while let Some(id) = cursor {
            let entry = self.get(id).ok_or_else(|| EntryNotFoundSnafu { id }.build())?;
            cursor = entry.parent_id;
            out.push(entry.clone());
        }
        out.reverse();
        Ok(out)
    }

    pub fn replace(&mut self, id: Uuid, entry: SessionEntry) -> Result<(), SessionError> {
        let idx = *self.index.get(&id).ok_or_else(|| EntryNotFoundSnafu { id }.build())?;
        self.entries[idx] = entry;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "tree.test.rs"]
mod tests;
