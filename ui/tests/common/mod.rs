use std::time::Duration;

use egui_kittest::Harness;
use roster_business::{LoadStatus, TableAction, TableState};
use roster_ui::RosterApp;
use roster_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    /// Keeps the mocked endpoint alive for the whole test.
    _mock_server: MockServer,
    harness: Harness<'a, RosterApp>,
}

impl<'a> TestCtx<'a> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, RosterApp> {
        &mut self.harness
    }

    /// App whose members endpoint answers with `count` generated members.
    pub async fn with_members(count: usize) -> Self {
        let template = ResponseTemplate::new(200).set_body_json(members_json(count));
        Self::with_response(template).await
    }

    pub async fn with_response(template: ResponseTemplate) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/members.json"))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        let state = State::test(format!("{}/members.json", mock_server.uri()));
        let app = RosterApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            _mock_server: mock_server,
            harness,
        }
    }

    pub fn table(&self) -> &TableState {
        self.harness.state().state().ctx.state::<TableState>()
    }

    /// Steps frames until the fetch has settled (loaded or failed).
    pub async fn wait_for_load(&mut self) {
        self.wait_until(|table| {
            matches!(table.status(), LoadStatus::Loaded | LoadStatus::Error(_))
        })
        .await;
    }

    /// Steps frames, giving command tasks time to run, until `done` holds.
    pub async fn wait_until(&mut self, done: impl Fn(&TableState) -> bool) {
        for _ in 0..50 {
            self.harness.step();
            if done(self.table()) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        // let the derived view catch up
        self.harness.step();
        self.harness.step();
    }

    /// Applies `action` directly, for interactions kittest cannot click
    /// (buttons inside `TableBuilder` rows), then renders a frame.
    pub fn apply(&mut self, action: TableAction) {
        self.harness
            .state_mut()
            .state_mut()
            .ctx
            .update::<TableState>(|table| table.apply(action));
        self.harness.step();
        self.harness.step();
    }
}

pub fn members_json(count: usize) -> serde_json::Value {
    let members: Vec<_> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": i.to_string(),
                "name": format!("Member {i:02}"),
                "email": format!("member{i:02}@mailinator.com"),
                "role": if i == 1 { "admin" } else { "member" },
            })
        })
        .collect();
    serde_json::Value::Array(members)
}
