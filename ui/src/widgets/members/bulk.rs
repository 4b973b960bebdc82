use egui::{Button, Color32, RichText, Ui};
use roster_business::{MemberTableView, TableAction};

/// Select All, Deselect All, Delete Selected and the selection count.
pub fn bulk_actions(view: &MemberTableView, ui: &mut Ui) -> Option<TableAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.button("Select All").clicked() {
            action = Some(TableAction::SelectAll);
        }
        if ui.button("Deselect All").clicked() {
            action = Some(TableAction::DeselectAll);
        }

        let delete = Button::new(RichText::new("Delete Selected").color(Color32::WHITE))
            .fill(Color32::from_rgb(200, 60, 60));
        if ui.add_enabled(view.has_selection(), delete).clicked() {
            action = Some(TableAction::DeleteSelected);
        }

        ui.label(format!("{} selected", view.selected_count));
    });

    action
}
