use log::warn;
use roster_business::{FetchMembersCommand, MembersConfig, build_state_ctx};
use roster_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        let config = MembersConfig::init().unwrap_or_else(|err| {
            warn!("Ignoring invalid configuration: {err:#}");
            MembersConfig::default()
        });
        Self::with_config(config)
    }
}

impl State {
    /// State fetching members from `members_url` instead of the configured one.
    pub fn test(members_url: String) -> Self {
        Self::with_config(MembersConfig::new(members_url))
    }

    /// Registers everything and queues the initial fetch; it is spawned on
    /// the first frame.
    pub fn with_config(config: MembersConfig) -> Self {
        let mut ctx = build_state_ctx(config);
        ctx.dispatch::<FetchMembersCommand>();
        Self { ctx }
    }
}
