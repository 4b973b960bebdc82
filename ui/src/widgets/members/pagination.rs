use egui::{Button, Ui};
use roster_business::{MemberTableView, PageNav, TableAction};

/// First / previous / numbered / next / last, then "Page X of Y".
pub fn pagination_bar(view: &MemberTableView, ui: &mut Ui) -> Option<TableAction> {
    let controls = view.controls;
    let mut nav = None;

    ui.horizontal(|ui| {
        let back = controls.can_go_back();
        let forward = controls.can_go_forward();

        if ui
            .add_enabled(back, Button::new("⏮"))
            .on_hover_text("First page")
            .clicked()
        {
            nav = Some(PageNav::First);
        }
        if ui
            .add_enabled(back, Button::new("◀"))
            .on_hover_text("Previous page")
            .clicked()
        {
            nav = Some(PageNav::Previous);
        }

        for page in controls.pages() {
            let button = Button::new(page.to_string()).selected(controls.is_current(page));
            if ui.add(button).clicked() {
                nav = Some(PageNav::Jump(page));
            }
        }

        if ui
            .add_enabled(forward, Button::new("▶"))
            .on_hover_text("Next page")
            .clicked()
        {
            nav = Some(PageNav::Next);
        }
        if ui
            .add_enabled(forward, Button::new("⏭"))
            .on_hover_text("Last page")
            .clicked()
        {
            nav = Some(PageNav::Last);
        }

        ui.separator();
        ui.label(controls.indicator());
    });

    nav.map(TableAction::Navigate)
}
