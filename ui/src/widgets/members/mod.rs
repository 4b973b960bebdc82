//! The member admin table and everything around it.

mod bulk;
mod dialogs;
mod pagination;
mod panel;
mod search;
mod status;
mod table;

pub use panel::members_panel;
pub use table::RowIntent;

use roster_business::{TableAction, TableState};
use roster_states::StateCtx;

/// Reduces `action` into the table; the view is derived again on the next
/// `run_computed`.
pub(crate) fn apply_action(ctx: &mut StateCtx, action: TableAction) {
    ctx.update::<TableState>(|table| table.apply(action));
}
