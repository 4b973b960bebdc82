use std::any::Any;

use chrono::{DateTime, Utc};

use crate::State;

/// Wall clock as seen by the app.
///
/// The UI ticks it once per frame; tests pin it to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Default for Time {
    fn default() -> Self {
        Self { virt: Utc::now() }
    }
}

impl Time {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self { virt: at }
    }

    pub fn tick(&mut self) {
        self.virt = Utc::now();
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
