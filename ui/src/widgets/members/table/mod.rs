//! Paged member table built on `egui_extras::TableBuilder`.

mod cells;
mod columns;
mod header;
mod row;

use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;
use roster_business::{LoadStatus, MemberTableView};
use ustr::Ustr;

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::render_member_row;

/// What a click inside the table asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIntent {
    /// Header checkbox, "select all" semantics.
    ToggleAll,
    Toggle(Ustr),
    Edit(Ustr),
    Delete(Ustr),
}

pub fn members_table(view: &MemberTableView, ui: &mut Ui) -> Option<RowIntent> {
    let mut intent = None;

    let mut builder = TableBuilder::new(ui)
        .id_salt("members_table")
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns() {
        builder = builder.column(column);
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            if render_table_header(&mut header, view.all_on_page_selected) {
                intent = Some(RowIntent::ToggleAll);
            }
        })
        .body(|mut body| {
            for member in &view.rows {
                body.row(ROW_HEIGHT, |mut row| {
                    if let Some(clicked) = render_member_row(&mut row, member) {
                        intent = Some(clicked);
                    }
                });
            }
        });

    if view.rows.is_empty() && view.status == LoadStatus::Loaded {
        ui.add_space(8.0);
        ui.weak(if view.filtered_count == 0 {
            "No members match the search"
        } else {
            "Nothing on this page"
        });
    }

    intent
}
