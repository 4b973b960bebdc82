use std::time::Duration;

use roster_business::{LoadStatus, TableState, poll_fetch_result};
use roster_states::Time;

use crate::{state::State, widgets};

/// How often to repaint while a fetch is in flight.
const LOADING_REPAINT: Duration = Duration::from_millis(100);

pub struct RosterApp {
    state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state_ctx = &mut self.state.ctx;

        state_ctx.update::<Time>(Time::tick);
        state_ctx.sync_computes();
        poll_fetch_result(state_ctx);
        state_ctx.run_computed();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Members");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::members_panel(state_ctx, ui);
        });

        let spawned = state_ctx.flush_commands();
        state_ctx.run_computed();

        // results arrive off-frame; keep polling until they are folded in
        let waiting = matches!(
            state_ctx.state::<TableState>().status(),
            LoadStatus::Idle | LoadStatus::Loading
        );
        if spawned > 0 || waiting {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
    }
}
