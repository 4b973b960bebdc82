use egui::{Color32, Ui};
use roster_business::{FetchMembersCommand, LoadStatus, MemberTableView};
use roster_states::StateCtx;

/// Load state, member count and the Reload button.
pub fn status_line(ctx: &mut StateCtx, view: &MemberTableView, ui: &mut Ui) {
    ui.horizontal(|ui| {
        match &view.status {
            LoadStatus::Idle => {
                ui.label("Members not loaded yet");
            }
            LoadStatus::Loading => {
                ui.spinner();
                ui.label("Loading members...");
            }
            LoadStatus::Loaded => {
                let at = view
                    .loaded_at
                    .map(|at| at.format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                ui.label(format!(
                    "{} members, {} matching (loaded {at} UTC)",
                    view.total_members, view.filtered_count
                ));
            }
            LoadStatus::Error(message) => {
                ui.colored_label(Color32::RED, format!("Error: {message}"));
            }
        }

        if ui.button("🔄 Reload").clicked() {
            ctx.dispatch::<FetchMembersCommand>();
        }
    });
}
