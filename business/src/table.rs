//! Member table state and the reducers that drive it.
//!
//! [`TableState`] is never mutated field by field: every user interaction or
//! fetch outcome becomes a [`TableAction`], and [`reduce`] produces the next
//! state from the previous one. The UI applies that through
//! `ctx.update::<TableState>(|t| t.apply(action))`, which in turn marks
//! [`MemberTableView`] dirty so the visible page is derived again.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{debug, info};
use roster_states::{Compute, ComputeDeps, Dep, State, Updater, assign_impl};
use ustr::Ustr;

use crate::{Member, PAGE_SIZE, PageControls, PageNav, filter_members, page_range, total_pages};

/// Where the initial (or latest) fetch stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Fetch `revision` started.
    Loading { revision: u64 },
    /// Fetch `revision` finished; replaces every member and goes back to page 1.
    Loaded {
        members: Vec<Member>,
        at: DateTime<Utc>,
        revision: u64,
    },
    LoadFailed {
        message: String,
        revision: u64,
    },
    /// New search box value. The current page is kept as is.
    Search(String),
    Navigate(PageNav),
    ToggleSelect(Ustr),
    /// Header checkbox / "Select All" button.
    SelectAll,
    DeselectAll,
    DeleteSelected,
    Rename { id: Ustr, name: String },
    Delete { id: Ustr },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    members: Vec<Member>,
    search_term: String,
    current_page: usize,
    status: LoadStatus,
    loaded_at: Option<DateTime<Utc>>,
    /// Last fetch revision folded in, see `crate::poll_fetch_result`.
    fetch_revision: u64,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            status: LoadStatus::Idle,
            loaded_at: None,
            fetch_revision: 0,
        }
    }
}

impl State for TableState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that already holds `members`, as if a fetch had succeeded.
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members,
            status: LoadStatus::Loaded,
            ..Self::default()
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: Ustr) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn fetch_revision(&self) -> u64 {
        self.fetch_revision
    }

    pub fn filtered(&self) -> Vec<&Member> {
        filter_members(&self.members, &self.search_term)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), PAGE_SIZE)
    }

    /// Rows of the current page. Empty when the page is past the end, which
    /// happens after a search or delete shrinks the list.
    pub fn page_slice(&self) -> Vec<&Member> {
        page_of(&self.members, &self.search_term, self.current_page)
    }

    pub fn selected_count(&self) -> usize {
        self.members.iter().filter(|member| member.selected).count()
    }

    /// Header checkbox state. Vacuously true on an empty page.
    pub fn page_all_selected(&self) -> bool {
        self.page_slice().iter().all(|member| member.selected)
    }

    pub fn apply(&mut self, action: TableAction) {
        *self = reduce(self, action);
    }
}

fn page_of<'a>(members: &'a [Member], term: &str, page: usize) -> Vec<&'a Member> {
    let filtered = filter_members(members, term);
    let range = page_range(page, PAGE_SIZE, filtered.len());
    filtered[range].to_vec()
}

pub fn reduce(state: &TableState, action: TableAction) -> TableState {
    match action {
        TableAction::Loading { revision } => TableState {
            status: LoadStatus::Loading,
            fetch_revision: revision,
            ..state.clone()
        },
        TableAction::Loaded {
            members,
            at,
            revision,
        } => {
            info!("Loaded {} members (revision {revision})", members.len());
            TableState {
                members,
                current_page: 1,
                status: LoadStatus::Loaded,
                loaded_at: Some(at),
                fetch_revision: revision,
                ..state.clone()
            }
        }
        TableAction::LoadFailed { message, revision } => TableState {
            status: LoadStatus::Error(message),
            fetch_revision: revision,
            ..state.clone()
        },
        TableAction::Search(term) => TableState {
            search_term: term,
            ..state.clone()
        },
        TableAction::Navigate(nav) => TableState {
            current_page: navigate(state, nav),
            ..state.clone()
        },
        TableAction::ToggleSelect(id) => TableState {
            members: toggle_select(&state.members, id),
            ..state.clone()
        },
        TableAction::SelectAll => TableState {
            members: select_all(&state.members, &state.search_term, state.current_page),
            ..state.clone()
        },
        TableAction::DeselectAll => TableState {
            members: deselect_all(&state.members),
            ..state.clone()
        },
        TableAction::DeleteSelected => {
            let members = delete_selected(&state.members);
            debug!(
                "Deleted {} selected members",
                state.members.len() - members.len()
            );
            TableState {
                members,
                ..state.clone()
            }
        }
        TableAction::Rename { id, name } => TableState {
            members: rename(&state.members, id, name),
            ..state.clone()
        },
        TableAction::Delete { id } => {
            debug!("Deleting member {id}");
            TableState {
                members: delete(&state.members, id),
                ..state.clone()
            }
        }
    }
}

/// Page reached by `nav`, bounded by the pages of the filtered list.
pub fn navigate(state: &TableState, nav: PageNav) -> usize {
    nav.apply(state.current_page, state.total_pages())
}

/// Flips the checkbox of the member with `id`. Unknown ids change nothing.
pub fn toggle_select(members: &[Member], id: Ustr) -> Vec<Member> {
    let mut next = members.to_vec();
    if let Some(member) = next.iter_mut().find(|member| member.id == id) {
        member.selected = !member.selected;
    }
    next
}

/// Selects every member, or deselects every member when the visible page
/// is already fully selected.
///
/// Only the page decides; the change always covers the whole list, filtered
/// out members included.
pub fn select_all(members: &[Member], term: &str, page: usize) -> Vec<Member> {
    let page_selected = page_of(members, term, page)
        .iter()
        .all(|member| member.selected);
    set_selected(members, !page_selected)
}

pub fn deselect_all(members: &[Member]) -> Vec<Member> {
    set_selected(members, false)
}

fn set_selected(members: &[Member], selected: bool) -> Vec<Member> {
    members
        .iter()
        .map(|member| Member {
            selected,
            ..member.clone()
        })
        .collect()
}

pub fn delete_selected(members: &[Member]) -> Vec<Member> {
    members
        .iter()
        .filter(|member| !member.selected)
        .cloned()
        .collect()
}

/// Replaces the name of the member with `id`. Any string is accepted.
pub fn rename(members: &[Member], id: Ustr, name: String) -> Vec<Member> {
    let mut next = members.to_vec();
    if let Some(member) = next.iter_mut().find(|member| member.id == id) {
        member.name = name;
    }
    next
}

/// Removes the member with `id`, wherever it currently sits on screen.
pub fn delete(members: &[Member], id: Ustr) -> Vec<Member> {
    let mut next = members.to_vec();
    if let Some(index) = next.iter().position(|member| member.id == id) {
        next.remove(index);
    }
    next
}

/// What the table widget renders: the current page plus counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberTableView {
    pub rows: Vec<Member>,
    pub filtered_count: usize,
    pub total_members: usize,
    pub selected_count: usize,
    pub all_on_page_selected: bool,
    pub controls: PageControls,
    pub status: LoadStatus,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl MemberTableView {
    pub fn derive(table: &TableState) -> Self {
        let filtered = table.filtered();
        let range = page_range(table.current_page, PAGE_SIZE, filtered.len());
        let rows: Vec<Member> = filtered[range].iter().map(|&m| m.clone()).collect();
        Self {
            all_on_page_selected: rows.iter().all(|member| member.selected),
            rows,
            filtered_count: filtered.len(),
            total_members: table.members.len(),
            selected_count: table.selected_count(),
            controls: PageControls::new(
                table.current_page,
                total_pages(filtered.len(), PAGE_SIZE),
            ),
            status: table.status.clone(),
            loaded_at: table.loaded_at,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected_count > 0
    }
}

impl Compute for MemberTableView {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none().state::<TableState>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        if let Some(table) = deps.state::<TableState>() {
            updater.set(Self::derive(table));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
