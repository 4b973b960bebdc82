//! Loading the member list.
//!
//! - [`FetchMembersCommand`] performs the GET and publishes every step into
//!   [`MembersFetchCompute`] via its updater.
//! - [`poll_fetch_result`] runs once per frame on the UI thread and folds a
//!   new result into `TableState`.
//!
//! Dispatching the command again (reload) cancels the request in flight;
//! whatever the older task still publishes is dropped by `StateCtx`.

use std::any::Any;

use chrono::Utc;
use log::{debug, info, warn};
use roster_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep,
    LatestOnlyUpdater, StateCtx, Time, Updater, assign_impl,
};
use thiserror::Error;

use crate::http::{Client, HttpError};
use crate::{Member, MembersConfig, TableAction, TableState};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach the members endpoint: {0}")]
    Transport(#[from] HttpError),
    #[error("Members endpoint returned status {0}")]
    Status(u16),
    #[error("Failed to parse members: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One GET to `url`, expecting a JSON array of members.
pub async fn fetch_members(url: &str) -> Result<Vec<Member>, FetchError> {
    let response = Client::get(url)
        .header("accept", "application/json")
        .send()
        .await?;

    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }

    Ok(response.json()?)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchResult {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Member>),
    Error(String),
}

/// Compute-shaped cache written only by [`FetchMembersCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembersFetchCompute {
    pub result: FetchResult,
    /// Generation of the task that produced `result`; grows with every dispatch.
    pub revision: u64,
}

impl MembersFetchCompute {
    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            FetchResult::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl Compute for MembersFetchCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Network IO lives in FetchMembersCommand.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Fetches the member list from `MembersConfig::members_url`.
///
/// Dispatch via `ctx.dispatch::<FetchMembersCommand>()`.
#[derive(Debug, Default)]
pub struct FetchMembersCommand;

impl Command for FetchMembersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<MembersConfig>().cloned();

        Box::pin(async move {
            let revision = updater.task_id().generation();
            let publish = |result| updater.set(MembersFetchCompute { result, revision });

            let config = match config {
                Ok(config) => config,
                Err(err) => {
                    warn!("Cannot fetch members: {err}");
                    publish(FetchResult::Error(err.to_string()));
                    return;
                }
            };

            publish(FetchResult::Loading);
            info!("Fetching members from {}", config.members_url());

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    debug!("Members fetch {revision} cancelled");
                    return;
                }
                result = fetch_members(config.members_url()) => result,
            };

            match result {
                Ok(members) => {
                    info!("Fetched {} members", members.len());
                    publish(FetchResult::Loaded(members));
                }
                Err(err) => {
                    warn!("Members fetch failed: {err}");
                    publish(FetchResult::Error(err.to_string()));
                }
            }
        })
    }
}

/// Folds the latest fetch result into `TableState`, once per revision.
///
/// Returns whether the table changed.
pub fn poll_fetch_result(ctx: &mut StateCtx) -> bool {
    let Some(fetch) = ctx.cached::<MembersFetchCompute>() else {
        return false;
    };
    let Ok(table) = ctx.try_state::<TableState>() else {
        return false;
    };

    let revision = fetch.revision;
    let applied = table.fetch_revision();
    let fresh = revision > applied || (revision == applied && table.status().is_loading());

    let action = match &fetch.result {
        FetchResult::Loading if revision > applied => Some(TableAction::Loading { revision }),
        FetchResult::Loaded(members) if fresh => Some(TableAction::Loaded {
            members: members.clone(),
            at: ctx
                .try_state::<Time>()
                .map_or_else(|_| Utc::now(), |time| *time.as_ref()),
            revision,
        }),
        FetchResult::Error(message) if fresh => Some(TableAction::LoadFailed {
            message: message.clone(),
            revision,
        }),
        FetchResult::Idle
        | FetchResult::Loading
        | FetchResult::Loaded(_)
        | FetchResult::Error(_) => None,
    };

    match action {
        Some(action) => {
            ctx.update::<TableState>(|table| table.apply(action));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::LoadStatus;

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(TableState::new());
        let noon = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single();
        ctx.add_state(Time::fixed(noon.unwrap_or_default()));
        ctx.record_compute(MembersFetchCompute::default());
        ctx
    }

    fn publish(ctx: &mut StateCtx, result: FetchResult, revision: u64) {
        ctx.updater().set(MembersFetchCompute { result, revision });
        ctx.sync_computes();
    }

    #[test]
    fn idle_result_changes_nothing() {
        let mut ctx = ctx();
        assert!(!poll_fetch_result(&mut ctx));
        assert_eq!(ctx.state::<TableState>().status(), &LoadStatus::Idle);
    }

    #[test]
    fn loading_then_loaded_is_applied_once() {
        let mut ctx = ctx();

        publish(&mut ctx, FetchResult::Loading, 1);
        assert!(poll_fetch_result(&mut ctx));
        assert!(ctx.state::<TableState>().status().is_loading());
        assert!(!poll_fetch_result(&mut ctx));

        let members = vec![Member::new("1", "Alice", "alice@example.com", "admin")];
        publish(&mut ctx, FetchResult::Loaded(members), 1);
        assert!(poll_fetch_result(&mut ctx));

        let table = ctx.state::<TableState>();
        assert_eq!(table.status(), &LoadStatus::Loaded);
        assert_eq!(table.members().len(), 1);
        assert_eq!(
            table.loaded_at(),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single()
        );

        // local edits survive later polls
        ctx.update::<TableState>(|t| t.apply(TableAction::DeleteSelected));
        ctx.update::<TableState>(|t| {
            t.apply(TableAction::Delete {
                id: ustr::Ustr::from("1"),
            });
        });
        assert!(!poll_fetch_result(&mut ctx));
        assert!(ctx.state::<TableState>().members().is_empty());
    }

    #[test]
    fn error_is_surfaced_and_reload_recovers() {
        let mut ctx = ctx();

        publish(&mut ctx, FetchResult::Error("status 500".to_owned()), 1);
        assert!(poll_fetch_result(&mut ctx));
        assert_eq!(
            ctx.state::<TableState>().status().error_message(),
            Some("status 500")
        );
        assert!(!poll_fetch_result(&mut ctx));

        publish(&mut ctx, FetchResult::Loading, 2);
        assert!(poll_fetch_result(&mut ctx));
        publish(&mut ctx, FetchResult::Loaded(Vec::new()), 2);
        assert!(poll_fetch_result(&mut ctx));
        assert_eq!(ctx.state::<TableState>().status(), &LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn missing_config_becomes_an_error() {
        let mut ctx = ctx();
        ctx.record_command(FetchMembersCommand);

        ctx.dispatch::<FetchMembersCommand>();
        ctx.settle().await;

        let message = ctx
            .cached::<MembersFetchCompute>()
            .and_then(MembersFetchCompute::error_message);
        assert!(message.is_some_and(|m| m.contains("MembersConfig")));
    }
}
