//! The append-only, fsync-per-write session log.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use cocode_protocol::AssistantMessage;
use cocode_protocol::BranchSummaryEntry;
use cocode_protocol::ContentBlock;
use cocode_protocol::EntryPayload;
use cocode_protocol::SessionEntry;
use cocode_protocol::SessionHeader;
use snafu::ResultExt;
use uuid::Uuid;

use crate::error::SessionError;
use crate::error::session_error::AppendSnafu;
use crate::error::session_error::EntryNotFoundSnafu;
use crate::error::session_error::MalformedEntrySnafu;
use crate::error::session_error::MissingHeaderSnafu;
use crate::error::session_error::OpenSnafu;
use crate::error::session_error::StateSnafu;
use crate::reader;
use crate::tree::SessionTree;

/// Owns the on-disk JSONL file and the in-memory [`SessionTree`] built from
/// it. Single writer per session.
pub struct SessionStore {
    path: PathBuf,
    file: File,
    tree: SessionTree,
    leaf: Uuid,
    shutdown: bool,
}

impl SessionStore {
    /// Open an existing session file, tolerantly replaying every entry, or
    /// create a new one seeded with `header`.
    pub fn open_or_create(path: PathBuf, header: SessionHeader) -> Result<Self, SessionError> {
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path, header)
        }
    }

    fn create(path: PathBuf, header: SessionHeader) -> Result<Self, SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context(OpenSnafu { path: path.clone() })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context(OpenSnafu { path: path.clone() })?;
        let mut store = Self {
            path,
            file,
            tree: SessionTree::new(),
            leaf: Uuid::nil(),
            shutdown: false,
        };
        let header_id = store.append_raw(SessionEntry::new(EntryPayload::Header(header)))?;
        store.leaf = header_id;
        Ok(store)
    }

    fn open(path: PathBuf) -> Result<Self, SessionError> {
        let mut raw = String::new();
        File::open(&path)
            .context(OpenSnafu { path: path.clone() })?
            .read_to_string(&mut raw)
            .context(OpenSnafu { path: path.clone() })?;
        let entries = reader::parse_tolerant(&raw);

        let mut tree = SessionTree::new();
        let mut leaf = None;
        for entry in entries {
            leaf = Some(entry.id);
            tree.insert(entry);
        }
        let leaf = leaf.ok_or_else(|| MissingHeaderSnafu {}.build())?;

        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .context(OpenSnafu { path: path.clone() })?;

        Ok(Self { path, file, tree, leaf, shutdown: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_leaf(&self) -> Uuid {
        self.leaf
    }

    pub fn tree(&self) -> &SessionTree {
        &self.tree
    }

    /// The current branch, root-first, including the header.
    pub fn branch(&self) -> Vec<SessionEntry> {
        self.tree.branch(self.leaf).unwrap_or_default()
    }

    /// Append `payload` as a child of the current leaf, fsync, advance the
    /// leaf pointer. Raises a `StateError` if called after [`Self::shutdown`].
    pub fn append(&mut self, payload: EntryPayload) -> Result<SessionEntry, SessionError> {
        if self.shutdown {
            return StateSnafu { message: "append after shutdown" }.fail();
        }
        let mut entry = SessionEntry::new(payload);
        entry.parent_id = Some(self.leaf);
        let id = self.append_raw(entry.clone())?;
        self.leaf = id;
        Ok(entry)
    }

    fn append_raw(&mut self, entry: SessionEntry) -> Result<Uuid, SessionError> {
        let mut line = serde_json::to_vec(&entry)
            .context(MalformedEntrySnafu { line: self.tree.len() + 1 })?;
        line.push(b'\n');
        self.file.write_all(&line).context(AppendSnafu { path: self.path.clone() })?;
        self.file.sync_data().context(AppendSnafu { path: self.path.clone() })?;
        let id = entry.id;
        self.tree.insert(entry);
        Ok(id)
    }

    /// Move the current leaf to `target` without appending anything — used
    /// by branch-switch / checkout control-plane commands.
    pub fn set_leaf(&mut self, target: Uuid) -> Result<(), SessionError> {
        if !self.tree.contains(target) {
            return Err(EntryNotFoundSnafu { id: target }.build());
        }
        self.leaf = target;
        Ok(())
    }

    /// Forks a brand-new session file at `from_leaf`: every entry on this
    /// branch up to and including `from_leaf` is replayed into the new
    /// file under `new_header` (the header entry itself is replaced with
    /// `new_header`, keeping its original id so the replayed chain's
    /// parent links stay intact), and a `BranchSummaryEntry` is appended
    /// to this store marking where the fork happened.
    pub fn fork(&mut self, from_leaf: Uuid, new_path: PathBuf, new_header: SessionHeader) -> Result<SessionStore, SessionError> {
        let mut branch_entries = self.tree.branch(from_leaf)?;
        let header_entry = branch_entries.first_mut().ok_or_else(|| MissingHeaderSnafu {}.build())?;
        if !matches!(header_entry.payload, EntryPayload::Header(_)) {
            return MissingHeaderSnafu {}.fail();
        }
        header_entry.payload = EntryPayload::Header(new_header);

        if let Some(parent) = new_path.parent() {
            std::fs::create_dir_all(parent).context(OpenSnafu { path: new_path.clone() })?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&new_path).context(OpenSnafu { path: new_path.clone() })?;
        let mut forked = SessionStore { path: new_path, file, tree: SessionTree::new(), leaf: Uuid::nil(), shutdown: false };
        for entry in branch_entries {
            forked.leaf = forked.append_raw(entry)?;
        }

        self.append(EntryPayload::BranchSummary(BranchSummaryEntry {
            summary: "branched into a new session".to_string(),
            from_id: from_leaf,
        }))?;

        Ok(forked)
    }

    /// The one permitted rewrite operation: patch the arguments
    /// of a tool call already recorded in an `AssistantMessage`, then
    /// rewrite the whole file from the in-memory tree and fsync. Every
    /// other mutation is append-only.
    pub fn rewrite_assistant_tool_call_args(
        &mut self,
        entry_id: Uuid,
        call_id: &str,
        new_args: serde_json::Value,
    ) -> Result<(), SessionError> {
        let mut entry = self
            .tree
            .get(entry_id)
            .ok_or_else(|| EntryNotFoundSnafu { id: entry_id }.build())?
            .clone();
        let EntryPayload::Assistant(AssistantMessage { content, .. }) = &mut entry.payload else {
            return StateSnafu { message: "rewrite target is not an assistant message" }.fail();
        };
        let mut found = false;
        for block in content.iter_mut() {
            if let ContentBlock::ToolCall(tool_call) = block
                && tool_call.id == call_id
            {
                tool_call.arguments = new_args.clone();
                found = true;
            }
        }
        if !found {
            return StateSnafu { message: format!("no tool call {call_id} on entry {entry_id}") }.fail();
        }
        self.tree.replace(entry_id, entry)?;
        self.rewrite_file()
    }

    fn rewrite_file(&mut self) -> Result<(), SessionError> {
        let mut buf = Vec::new();
        for entry in self.tree.iter() {
            serde_json::to_writer(&mut buf, entry).context(MalformedEntrySnafu { line: 0usize })?;
            buf.push(b'\n');
        }
        self.file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .context(OpenSnafu { path: self.path.clone() })?;
        self.file.write_all(&buf).context(AppendSnafu { path: self.path.clone() })?;
        self.file.sync_all().context(AppendSnafu { path: self.path.clone() })?;
        self.file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .context(OpenSnafu { path: self.path.clone() })?;
        Ok(())
    }

    /// Mark the store closed: further [`Self::append`] calls raise a
    /// `StateError` instead of writing.
    pub fn shutdown(&mut self) {
        self.shutdown = true;
    }
}

#[cfg(test)]
#[path = "store.test.rs"]
mod tests;
