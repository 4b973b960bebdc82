//! Initial fetch and the load status line.

use std::time::Duration;

use kittest::Queryable;
use roster_business::{LoadStatus, PageNav, TableAction};
use ustr::Ustr;
use wiremock::ResponseTemplate;

mod common;

use common::TestCtx;

#[tokio::test]
async fn first_page_is_shown_after_load() {
    let mut ctx = TestCtx::with_members(12).await;
    ctx.wait_for_load().await;

    assert_eq!(ctx.table().status(), &LoadStatus::Loaded);
    assert_eq!(ctx.table().members().len(), 12);

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Member 01").is_some());
    assert!(harness.query_by_label_contains("Member 10").is_some());
    assert!(
        harness.query_by_label_contains("Member 11").is_none(),
        "second page should not be rendered"
    );
    assert!(harness.query_by_label("Page 1 of 2").is_some());
    assert!(harness.query_by_label_contains("12 members").is_some());
}

#[tokio::test]
async fn spinner_text_while_loading() {
    let mut ctx = TestCtx::with_response(
        ResponseTemplate::new(200)
            .set_body_json(common::members_json(3))
            .set_delay(Duration::from_secs(1)),
    )
    .await;

    let harness = ctx.harness_mut();
    harness.step();
    tokio::time::sleep(Duration::from_millis(100)).await;
    harness.step();
    harness.step();

    assert!(ctx.table().status().is_loading());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Loading members")
            .is_some()
    );
}

#[tokio::test]
async fn server_error_is_shown() {
    let mut ctx = TestCtx::with_response(ResponseTemplate::new(500)).await;
    ctx.wait_for_load().await;

    let message = ctx.table().status().error_message().map(str::to_owned);
    assert!(message.is_some_and(|m| m.contains("500")));
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Error:")
            .is_some()
    );
}

#[tokio::test]
async fn malformed_payload_is_shown_as_error() {
    let template = ResponseTemplate::new(200).set_body_string("[{\"id\": 1");
    let mut ctx = TestCtx::with_response(template).await;
    ctx.wait_for_load().await;

    assert!(ctx.table().status().error_message().is_some());
    assert!(ctx.table().members().is_empty());
}

#[tokio::test]
async fn reload_fetches_again() {
    let mut ctx = TestCtx::with_members(3).await;
    ctx.wait_for_load().await;
    let first_revision = ctx.table().fetch_revision();

    ctx.harness_mut().get_by_label_contains("Reload").click();
    ctx.wait_until(|table| {
        table.fetch_revision() > first_revision && table.status() == &LoadStatus::Loaded
    })
    .await;

    assert_eq!(ctx.table().status(), &LoadStatus::Loaded);
    assert!(ctx.table().fetch_revision() > first_revision);
    assert_eq!(ctx.table().members().len(), 3);
}

#[tokio::test]
async fn reload_replaces_local_edits() {
    let mut ctx = TestCtx::with_members(12).await;
    ctx.wait_for_load().await;
    let first_revision = ctx.table().fetch_revision();

    ctx.apply(TableAction::Delete {
        id: Ustr::from("1"),
    });
    ctx.apply(TableAction::Navigate(PageNav::Last));
    assert_eq!(ctx.table().members().len(), 11);
    assert_eq!(ctx.table().current_page(), 2);

    ctx.harness_mut().get_by_label_contains("Reload").click();
    ctx.wait_until(|table| {
        table.fetch_revision() > first_revision && table.status() == &LoadStatus::Loaded
    })
    .await;

    assert_eq!(ctx.table().members().len(), 12);
    assert_eq!(ctx.table().current_page(), 1);
    assert!(ctx.harness_mut().query_by_label("Member 01").is_some());
}
