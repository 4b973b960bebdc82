//! Member table domain: records, search, pagination, selection, row dialogs
//! and the fetch that fills it all. Rendering lives in `roster-ui`.

mod config;
mod dialog;
mod fetch;
mod filter;
mod member;
mod pagination;
mod table;

pub mod http;

pub use config::{DEFAULT_MEMBERS_URL, MembersConfig, RawConfig};
pub use dialog::{DialogOutcome, RowDialog, RowDialogState};
pub use fetch::{
    FetchError, FetchMembersCommand, FetchResult, MembersFetchCompute, fetch_members,
    poll_fetch_result,
};
pub use filter::{filter_members, normalize_term};
pub use member::{Member, PAGE_SIZE};
pub use pagination::{PageControls, PageNav, page_range, total_pages};
pub use table::{
    LoadStatus, MemberTableView, TableAction, TableState, delete, delete_selected, deselect_all,
    navigate, reduce, rename, select_all, toggle_select,
};

use roster_states::{StateCtx, Time};

/// A context with every state, compute and command of the member table
/// registered. Nothing is fetched until `FetchMembersCommand` is dispatched.
pub fn build_state_ctx(config: MembersConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(config);
    ctx.add_state(Time::default());
    ctx.add_state(TableState::new());
    ctx.add_state(RowDialogState::default());

    ctx.record_compute(MembersFetchCompute::default());
    ctx.record_compute(MemberTableView::default());

    ctx.record_command(FetchMembersCommand);

    ctx
}
