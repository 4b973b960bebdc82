//! Column definitions for the member table.

use egui_extras::Column;

pub const CHECKBOX_WIDTH: f32 = 32.0;
pub const ID_WIDTH: f32 = 60.0;
pub const ROLE_WIDTH: f32 = 90.0;
pub const ACTIONS_WIDTH: f32 = 90.0;
pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Checkbox, ID, Name, Email, Role, Actions.
#[inline]
pub fn table_columns() -> Vec<Column> {
    vec![
        Column::exact(CHECKBOX_WIDTH),
        Column::exact(ID_WIDTH),
        Column::initial(180.0).at_least(120.0).clip(true),
        Column::remainder().at_least(180.0).clip(true),
        Column::exact(ROLE_WIDTH),
        Column::exact(ACTIONS_WIDTH),
    ]
}
