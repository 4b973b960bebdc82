//! Window for the open [`RowDialog`], if any.

use egui::{Align2, Color32, Id, Key, Ui, Window};
use roster_business::{DialogOutcome, RowDialog, RowDialogState};
use roster_states::StateCtx;

use super::apply_action;

pub fn row_dialog(ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(mut dialog) = ctx.state::<RowDialogState>().current().cloned() else {
        return;
    };

    let mut open = true;
    let mut outcome = None;
    let confirm_label = match &dialog {
        RowDialog::EditName { .. } => "Save",
        RowDialog::ConfirmDelete { .. } => "Delete",
    };

    Window::new(dialog.title())
        .id(Id::new("member_row_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label(dialog.prompt());
            ui.add_space(8.0);

            if let Some(draft) = dialog.draft_mut() {
                let edit = ui.text_edit_singleline(draft);
                if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    outcome = Some(DialogOutcome::Confirm);
                }
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                let confirm = if matches!(dialog, RowDialog::ConfirmDelete { .. }) {
                    egui::Button::new(egui::RichText::new(confirm_label).color(Color32::WHITE))
                        .fill(Color32::from_rgb(200, 60, 60))
                } else {
                    egui::Button::new(confirm_label)
                };
                if ui.add(confirm).clicked() {
                    outcome = Some(DialogOutcome::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    outcome = Some(DialogOutcome::Cancel);
                }
            });
        });

    if !open {
        outcome = Some(DialogOutcome::Cancel);
    }

    let state = ctx.state_mut::<RowDialogState>();
    state.open(dialog);
    let action = outcome.and_then(|outcome| state.close(outcome));
    if let Some(action) = action {
        apply_action(ctx, action);
    }
}
