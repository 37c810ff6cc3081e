//! Authoritative in-memory history and the highlights modal state.
//!
//! [`HistoryStore`] is an explicit context object: the application builds one at
//! startup, hydrates it with [`HistoryStore::load`], and hands it to whoever needs
//! to read or change the history. Every mutation is written through
//! [`HistoryStorage`] first and only applied in memory once the write succeeded.
//! The list written is always the one held in memory, so memory and storage
//! agree on content and order after each completed call.

use tracing::debug;

use crate::error::StorageError;
use crate::models::{Highlights, HistoryItem, ModalState, NewHistoryItem, SelectionState};
use crate::storage::{HistoryStorage, KeyValueStore};

pub struct HistoryStore<S> {
    storage: HistoryStorage<S>,
    history: Vec<HistoryItem>,
    selection: SelectionState,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a store with an empty in-memory history
    pub fn new(storage: HistoryStorage<S>) -> Self {
        Self { storage, history: Vec::new(), selection: SelectionState::default() }
    }

    /// Create a store and hydrate it from storage
    pub fn load(storage: HistoryStorage<S>) -> Self {
        let mut store = Self::new(storage);
        store.update_history_from_storage();
        store
    }

    /// History items, newest first
    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn storage(&self) -> &HistoryStorage<S> {
        &self.storage
    }

    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.history.iter().find(|item| item.id == id)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_item(&self) -> Option<&HistoryItem> {
        self.selection.selected_item.as_ref()
    }

    pub fn modal_state(&self) -> ModalState {
        self.selection.modal_state()
    }

    /// True only while a selected item with highlights is shown
    pub fn is_open_modal(&self) -> bool {
        self.modal_state() == ModalState::OpenWithSelection
    }

    /// Change the selection without touching modal visibility
    pub fn set_selected_item(&mut self, item: HistoryItem) {
        self.selection.selected_item = Some(item);
    }

    /// Open the modal if the selection has highlights; otherwise the request is ignored
    pub fn show_modal(&mut self) {
        if self.selection.selected_item.as_ref().is_some_and(HistoryItem::has_highlights) {
            self.selection.is_open_modal = true;
        } else {
            debug!("Ignoring modal request without highlighted selection");
        }
    }

    pub fn hide_modal(&mut self) {
        self.selection.is_open_modal = false;
    }

    /// Clear the selection and close the modal
    pub fn reset_selected_item(&mut self) {
        self.selection = SelectionState::default();
    }

    /// Record a completed analysis and return the created item
    pub fn add_to_history(
        &mut self,
        file_name: impl Into<String>,
        highlights: Option<Highlights>,
    ) -> Result<HistoryItem, StorageError> {
        let item = HistoryItem::create(NewHistoryItem { file_name: file_name.into(), highlights });

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.push(item.clone());
        history.extend(self.history.iter().cloned());
        self.storage.save_history(&history)?;

        self.history = history;
        Ok(item)
    }

    /// Remove an item by id; unknown ids are a no-op
    pub fn remove_from_history(&mut self, id: &str) -> Result<(), StorageError> {
        let history: Vec<HistoryItem> =
            self.history.iter().filter(|item| item.id != id).cloned().collect();
        self.storage.save_history(&history)?;

        self.history = history;
        if self.selected_item().is_some_and(|item| item.id == id) {
            self.reset_selected_item();
        }
        Ok(())
    }

    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.storage.clear_history()?;

        self.history.clear();
        self.reset_selected_item();
        Ok(())
    }

    /// Replace the in-memory list with whatever storage currently holds
    pub fn update_history_from_storage(&mut self) {
        self.history = self.storage.get_history();
        debug!("Loaded {} history items from storage", self.history.len());
    }
}
