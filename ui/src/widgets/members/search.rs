use egui::{TextEdit, Ui};
use roster_business::TableAction;

/// Search box filtering as you type, with Search and clear buttons.
pub fn search_bar(term: &str, ui: &mut Ui) -> Option<TableAction> {
    let mut draft = term.to_owned();
    let mut action = None;

    ui.horizontal(|ui| {
        let edit = ui.add(
            TextEdit::singleline(&mut draft)
                .id_salt("member_search")
                .hint_text("Search...")
                .desired_width(280.0),
        );
        if edit.changed() {
            action = Some(TableAction::Search(draft.clone()));
        }

        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || submitted {
            action = Some(TableAction::Search(draft.clone()));
        }

        if !term.is_empty() && ui.button("✖").on_hover_text("Clear search").clicked() {
            action = Some(TableAction::Search(String::new()));
        }
    });

    action
}
