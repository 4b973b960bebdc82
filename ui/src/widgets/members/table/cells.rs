//! Cell contents of the member table.

use egui::{Color32, RichText, Ui};
use ustr::Ustr;

use super::RowIntent;

/// Returns true when the checkbox was clicked.
#[inline]
pub fn render_checkbox_cell(ui: &mut Ui, checked: bool) -> bool {
    let mut checked = checked;
    ui.checkbox(&mut checked, "").changed()
}

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str, monospace: bool) {
    if monospace {
        ui.label(RichText::new(text).monospace());
    } else {
        ui.label(text);
    }
}

#[inline]
pub fn render_role_cell(ui: &mut Ui, role: &str) {
    let color = if role.eq_ignore_ascii_case("admin") {
        Color32::from_rgb(180, 100, 20)
    } else {
        ui.visuals().text_color()
    };
    ui.label(RichText::new(role).color(color));
}

/// Edit and delete icon buttons.
#[inline]
pub fn render_action_buttons(ui: &mut Ui, id: Ustr) -> Option<RowIntent> {
    let mut intent = None;
    if ui.button("✏").on_hover_text("Edit name").clicked() {
        intent = Some(RowIntent::Edit(id));
    }
    if ui
        .button(RichText::new("🗑").color(Color32::from_rgb(200, 60, 60)))
        .on_hover_text("Delete")
        .clicked()
    {
        intent = Some(RowIntent::Delete(id));
    }
    intent
}
