use egui::{Response, Ui};
use log::debug;
use roster_business::{MemberTableView, RowDialog, RowDialogState, TableAction, TableState};
use roster_states::StateCtx;
use ustr::Ustr;

use super::table::{RowIntent, members_table};
use super::{apply_action, bulk, dialogs, pagination, search, status};

/// Status line, search, table, pagination and bulk actions, top to bottom.
pub fn members_panel(ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let view = ctx.cached::<MemberTableView>().cloned().unwrap_or_default();

    let response = ui.vertical(|ui| {
        status::status_line(ctx, &view, ui);
        ui.add_space(4.0);

        let term = ctx.state::<TableState>().search_term().to_owned();
        if let Some(action) = search::search_bar(&term, ui) {
            apply_action(ctx, action);
        }
        ui.add_space(8.0);

        let intent = members_table(&view, ui);
        handle_row_intent(ctx, &view, intent);
        ui.add_space(8.0);

        if let Some(action) = pagination::pagination_bar(&view, ui) {
            apply_action(ctx, action);
        }
        ui.add_space(4.0);

        if let Some(action) = bulk::bulk_actions(&view, ui) {
            apply_action(ctx, action);
        }
    });

    dialogs::row_dialog(ctx, ui);

    response.response
}

fn handle_row_intent(ctx: &mut StateCtx, view: &MemberTableView, intent: Option<RowIntent>) {
    let Some(intent) = intent else {
        return;
    };
    debug!("Row intent {intent:?}");

    let member = |id: Ustr| view.rows.iter().find(|member| member.id == id);
    match intent {
        RowIntent::ToggleAll => apply_action(ctx, TableAction::SelectAll),
        RowIntent::Toggle(id) => apply_action(ctx, TableAction::ToggleSelect(id)),
        RowIntent::Edit(id) => {
            if let Some(member) = member(id) {
                ctx.state_mut::<RowDialogState>().open(RowDialog::edit(member));
            }
        }
        RowIntent::Delete(id) => {
            if let Some(member) = member(id) {
                ctx.state_mut::<RowDialogState>().open(RowDialog::delete(member));
            }
        }
    }
}
