use egui::Ui;
use egui_extras::TableRow;

const HEADERS: [&str; 5] = ["ID", "Name", "Email", "Role", "Actions"];

/// Renders the select-all checkbox and the column labels.
///
/// Returns true when the checkbox was clicked.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>, all_selected: bool) -> bool {
    let mut clicked = false;
    header.col(|ui| {
        let mut checked = all_selected;
        clicked = ui
            .checkbox(&mut checked, "")
            .on_hover_text("Select all")
            .changed();
    });
    for label in HEADERS {
        header.col(|ui| {
            render_header_cell(ui, label);
        });
    }
    clicked
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    ui.strong(label);
}
