use super::history::HistoryItem;

/// Visibility of the highlights modal as derived from [`SelectionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    OpenWithSelection,
}

/// Which history item is selected and whether its modal was requested.
///
/// The modal only counts as open while the selected item carries highlights,
/// whatever the value of `is_open_modal`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_item: Option<HistoryItem>,
    pub is_open_modal: bool,
}

impl SelectionState {
    pub fn modal_state(&self) -> ModalState {
        let has_highlights = self.selected_item.as_ref().is_some_and(HistoryItem::has_highlights);
        if self.is_open_modal && has_highlights {
            ModalState::OpenWithSelection
        } else {
            ModalState::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Highlights;

    fn item(highlights: Option<Highlights>) -> HistoryItem {
        HistoryItem {
            id: "id-1".to_string(),
            file_name: "data.csv".to_string(),
            timestamp: Utc::now(),
            highlights,
        }
    }

    #[test]
    fn test_modal_closed_by_default() {
        assert_eq!(SelectionState::default().modal_state(), ModalState::Closed);
    }

    #[test]
    fn test_flag_without_selection_stays_closed() {
        let state = SelectionState { selected_item: None, is_open_modal: true };
        assert_eq!(state.modal_state(), ModalState::Closed);
    }

    #[test]
    fn test_flag_with_item_lacking_highlights_stays_closed() {
        let state = SelectionState { selected_item: Some(item(None)), is_open_modal: true };
        assert_eq!(state.modal_state(), ModalState::Closed);
    }

    #[test]
    fn test_flag_with_highlights_opens() {
        let state =
            SelectionState { selected_item: Some(item(Some(Highlights::default()))), is_open_modal: true };
        assert_eq!(state.modal_state(), ModalState::OpenWithSelection);
    }
}
