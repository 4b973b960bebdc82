use std::any::Any;
use std::env::vars;

use anyhow::bail;
use log::info;
use serde::Deserialize;
use ustr::Ustr;

use roster_states::State;

pub const DEFAULT_MEMBERS_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// Environment overrides, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `ROSTER_MEMBERS_URL`
    roster_members_url: Option<String>,
}

/// Where the member list is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersConfig {
    members_url: Ustr,
}

impl Default for MembersConfig {
    fn default() -> Self {
        Self {
            members_url: Ustr::from(DEFAULT_MEMBERS_URL),
        }
    }
}

impl MembersConfig {
    pub fn new(members_url: impl AsRef<str>) -> Self {
        Self {
            members_url: Ustr::from(members_url.as_ref()),
        }
    }

    /// Reads `ROSTER_MEMBERS_URL` from the process environment.
    pub fn init() -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let Some(url) = raw.roster_members_url else {
            return Ok(Self::default());
        };

        let url = url.trim();
        if url.is_empty() {
            bail!("ROSTER_MEMBERS_URL is set but empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("ROSTER_MEMBERS_URL must be an http(s) URL, got {url:?}");
        }

        info!("Members URL overridden to {url}");
        Ok(Self::new(url))
    }

    pub fn members_url(&self) -> &str {
        self.members_url.as_str()
    }
}

impl State for MembersConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
