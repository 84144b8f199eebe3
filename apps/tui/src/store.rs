//! Synchronous facade over the async storage layer.
//!
//! The event loop is synchronous and run-to-completion per render; libSQL is
//! async. This wrapper owns a small tokio runtime and blocks on each call at
//! the edge, so screens stay plain synchronous code.

use std::path::Path;

use color_eyre::eyre::Result as EyreResult;
use tokio::runtime::Runtime;

use daybrief_shared::{ActionId, ActionItem, Result};
use daybrief_storage::Storage;

pub(crate) struct SyncStore {
    rt: Runtime,
    storage: Storage,
}

impl SyncStore {
    /// Open the database and apply migrations.
    pub(crate) fn open(path: &Path) -> EyreResult<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let storage = rt.block_on(Storage::open(path))?;
        Ok(Self { rt, storage })
    }

    pub(crate) fn list_actions(&self) -> Result<Vec<ActionItem>> {
        self.rt.block_on(self.storage.list_actions())
    }

    pub(crate) fn insert_action(&self, text: &str) -> Result<ActionItem> {
        self.rt.block_on(self.storage.insert_action(text))
    }

    pub(crate) fn set_action_completed(&self, id: &ActionId, completed: bool) -> Result<()> {
        self.rt
            .block_on(self.storage.set_action_completed(id, completed))
    }

    pub(crate) fn delete_action(&self, id: &ActionId) -> Result<()> {
        self.rt.block_on(self.storage.delete_action(id))
    }

    pub(crate) fn clear_completed(&self) -> Result<u64> {
        self.rt.block_on(self.storage.clear_completed())
    }

    pub(crate) fn get_notes(&self) -> Result<Option<String>> {
        self.rt.block_on(self.storage.get_notes())
    }

    pub(crate) fn set_notes(&self, content: &str) -> Result<()> {
        self.rt.block_on(self.storage.set_notes(content))
    }
}
