//! Edit / delete confirmation dialogs for a single row.
//!
//! Opening a dialog only records what is being asked. The UI renders it as
//! a window and, once the user answers, hands the [`DialogOutcome`] to
//! [`RowDialog::resolve`], which turns it into the [`TableAction`] to reduce.

use std::any::Any;

use roster_states::State;
use ustr::Ustr;

use crate::{Member, TableAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDialog {
    /// Replace the name of `id`. `draft` is the text box content.
    EditName {
        id: Ustr,
        draft: String,
    },
    ConfirmDelete {
        id: Ustr,
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirm,
    Cancel,
}

impl RowDialog {
    /// Edit dialog pre-filled with the current name.
    pub fn edit(member: &Member) -> Self {
        Self::EditName {
            id: member.id,
            draft: member.name.clone(),
        }
    }

    pub fn delete(member: &Member) -> Self {
        Self::ConfirmDelete {
            id: member.id,
            name: member.name.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::EditName { .. } => "Edit member",
            Self::ConfirmDelete { .. } => "Delete member",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::EditName { .. } => "Enter new name:".to_owned(),
            Self::ConfirmDelete { name, .. } => {
                format!("Are you sure you want to delete {name}?")
            }
        }
    }

    /// Text box content, only for the edit dialog.
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::EditName { draft, .. } => Some(draft),
            Self::ConfirmDelete { .. } => None,
        }
    }

    /// The action a confirmed dialog asks for; cancelling asks for nothing.
    ///
    /// The draft name is taken verbatim, empty included.
    pub fn resolve(self, outcome: DialogOutcome) -> Option<TableAction> {
        if outcome == DialogOutcome::Cancel {
            return None;
        }
        Some(match self {
            Self::EditName { id, draft } => TableAction::Rename { id, name: draft },
            Self::ConfirmDelete { id, .. } => TableAction::Delete { id },
        })
    }
}

/// The dialog currently on screen, if any. At most one is open at a time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowDialogState {
    current: Option<RowDialog>,
}

impl State for RowDialogState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RowDialogState {
    /// Replaces whatever dialog was open.
    pub fn open(&mut self, dialog: RowDialog) {
        self.current = Some(dialog);
    }

    pub fn current(&self) -> Option<&RowDialog> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Closes the dialog and resolves it.
    pub fn close(&mut self, outcome: DialogOutcome) -> Option<TableAction> {
        self.current.take()?.resolve(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> Member {
        Member::new("2", "Bob", "bob@example.com", "member")
    }

    #[test]
    fn edit_is_prefilled_and_renames_on_confirm() {
        let mut dialog = RowDialog::edit(&bob());
        assert_eq!(dialog.prompt(), "Enter new name:");

        if let Some(draft) = dialog.draft_mut() {
            *draft = "Robert".to_owned();
        }

        assert_eq!(
            dialog.resolve(DialogOutcome::Confirm),
            Some(TableAction::Rename {
                id: Ustr::from("2"),
                name: "Robert".to_owned(),
            })
        );
    }

    #[test]
    fn delete_prompt_names_the_member() {
        let dialog = RowDialog::delete(&bob());

        assert_eq!(dialog.prompt(), "Are you sure you want to delete Bob?");
        assert!(dialog.clone().draft_mut().is_none());
        assert_eq!(
            dialog.resolve(DialogOutcome::Confirm),
            Some(TableAction::Delete {
                id: Ustr::from("2")
            })
        );
    }

    #[test]
    fn cancel_resolves_to_nothing() {
        assert_eq!(RowDialog::edit(&bob()).resolve(DialogOutcome::Cancel), None);
        assert_eq!(
            RowDialog::delete(&bob()).resolve(DialogOutcome::Cancel),
            None
        );
    }

    #[test]
    fn state_holds_one_dialog_and_clears_on_close() {
        let mut state = RowDialogState::default();
        assert_eq!(state.close(DialogOutcome::Confirm), None);

        state.open(RowDialog::edit(&bob()));
        state.open(RowDialog::delete(&bob()));
        assert_eq!(state.current().map(RowDialog::title), Some("Delete member"));

        let action = state.close(DialogOutcome::Confirm);
        assert!(matches!(action, Some(TableAction::Delete { .. })));
        assert!(!state.is_open());
    }
}
