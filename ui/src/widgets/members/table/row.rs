use egui::Stroke;
use egui_extras::TableRow;
use roster_business::Member;

use super::RowIntent;
use super::cells::{render_action_buttons, render_checkbox_cell, render_role_cell, render_text_cell};

/// Renders one member; selected members are highlighted.
#[inline]
pub fn render_member_row(row: &mut TableRow<'_, '_>, member: &Member) -> Option<RowIntent> {
    let mut intent = None;
    row.set_selected(member.selected);

    row.col(|ui| {
        if render_checkbox_cell(ui, member.selected) {
            intent = Some(RowIntent::Toggle(member.id));
        }
        draw_cell_bottom_border(ui);
    });
    row.col(|ui| {
        render_text_cell(ui, member.id.as_str(), true);
        draw_cell_bottom_border(ui);
    });
    row.col(|ui| {
        render_text_cell(ui, &member.name, false);
        draw_cell_bottom_border(ui);
    });
    row.col(|ui| {
        render_text_cell(ui, &member.email, false);
        draw_cell_bottom_border(ui);
    });
    row.col(|ui| {
        render_role_cell(ui, &member.role);
        draw_cell_bottom_border(ui);
    });
    row.col(|ui| {
        if let Some(clicked) = render_action_buttons(ui, member.id) {
            intent = Some(clicked);
        }
        draw_cell_bottom_border(ui);
    });

    intent
}

#[inline]
fn draw_cell_bottom_border(ui: &mut egui::Ui) {
    let rect = ui.max_rect();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
