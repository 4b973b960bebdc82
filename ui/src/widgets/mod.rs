mod members;

pub use members::{RowIntent, members_panel};
