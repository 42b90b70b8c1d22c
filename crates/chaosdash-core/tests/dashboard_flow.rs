//! Integration tests for the dashboard's tables, forms and row actions.

mod common;

use chaosdash_core::actions::{self, Detail, EXPERIMENT_LOADERS, TARGET_LOADERS};
use chaosdash_core::forms::{ExperimentForm, Modal, TargetForm, REQUIRED_FIELDS};
use chaosdash_core::render::{
    render_experiments, render_targets, target_options, ExperimentTable, RowAction, Summary,
    TableBody, LOADING, NO_EXPERIMENTS, NO_TARGETS,
};
use chaosdash_core::{DashError, Loader, Method, Notice, Panel, Tone};
use common::{client, experiment, experiments, target, targets, FakeTransport, BASE};
use serde_json::json;

#[test]
fn test_recent_table_is_newest_five() {
    for n in 0..9usize {
        let list = experiments(
            (0..n)
                .map(|i| experiment(&i.to_string(), "pending", &format!("2024-01-{:02}", i + 1)))
                .collect(),
        );
        let body = render_experiments(&list, ExperimentTable::Recent);
        if n == 0 {
            assert_eq!(body.row_count(), 1);
            continue;
        }
        let ids: Vec<_> = body.rows().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<_> = (0..n).rev().take(5).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected, "n = {}", n);
    }
}

#[test]
fn test_sort_is_stable_for_equal_timestamps() {
    let list = experiments(vec![
        experiment("a", "pending", "2024-01-01T00:00:00Z"),
        experiment("b", "pending", "2024-01-02T00:00:00Z"),
        experiment("c", "pending", "2024-01-01T00:00:00Z"),
    ]);
    let ids: Vec<_> = render_experiments(&list, ExperimentTable::Full)
        .rows()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn test_actions_follow_status() {
    for status in ["pending", "running", "completed", "failed", "cancelled"] {
        let list = experiments(vec![experiment("x", status, "2024-01-01")]);
        let full = render_experiments(&list, ExperimentTable::Full);
        let recent = render_experiments(&list, ExperimentTable::Recent);
        let full_actions = &full.rows()[0].actions;
        let recent_actions = &recent.rows()[0].actions;

        assert_eq!(full_actions.contains(&RowAction::Execute), status == "pending");
        assert_eq!(full_actions.contains(&RowAction::Stop), status == "running");
        assert!(full_actions.contains(&RowAction::Delete));
        assert!(full_actions.contains(&RowAction::View));

        assert_eq!(recent_actions.contains(&RowAction::Execute), status == "pending");
        assert_eq!(recent_actions.contains(&RowAction::Stop), status == "running");
        assert!(!recent_actions.contains(&RowAction::Delete));
    }
}

#[test]
fn test_empty_lists_render_one_placeholder_row() {
    let recent = render_experiments(&[], ExperimentTable::Recent);
    let full = render_experiments(&[], ExperimentTable::Full);
    let targets = render_targets(&[]);

    assert_eq!(
        recent,
        TableBody::Empty {
            message: NO_EXPERIMENTS,
            colspan: 6
        }
    );
    assert_eq!(
        full,
        TableBody::Empty {
            message: NO_EXPERIMENTS,
            colspan: 7
        }
    );
    assert_eq!(
        targets,
        TableBody::Empty {
            message: NO_TARGETS,
            colspan: 6
        }
    );
    for body_rows in [recent.row_count(), full.row_count(), targets.row_count()] {
        assert_eq!(body_rows, 1);
    }
}

#[test]
fn test_summary_counts_partition_total() {
    let statuses = [
        "pending", "running", "running", "completed", "failed", "cancelled", "completed",
    ];
    let list = experiments(
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| experiment(&i.to_string(), s, "2024-01-01"))
            .collect(),
    );
    let summary = Summary::from_experiments(&list);
    assert_eq!(summary.total, 7);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.running, 2);
    assert_eq!(summary.other(), 2);
    assert_eq!(
        summary.total,
        summary.completed + summary.failed + summary.running + summary.other()
    );
}

#[test]
fn test_two_experiment_example() {
    let list = experiments(vec![
        experiment("1", "pending", "2024-01-01"),
        experiment("2", "running", "2024-01-02"),
    ]);
    let summary = Summary::from_experiments(&list);
    assert_eq!((summary.total, summary.running, summary.completed, summary.failed), (2, 1, 0, 0));

    let rows = render_experiments(&list, ExperimentTable::Recent);
    let ids: Vec<_> = rows.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(rows.rows()[0].badge.name(), "primary");
    assert_eq!(rows.rows()[0].duration, "60s");
}

#[test]
fn test_target_rows_and_dropdown() {
    let list = targets(vec![
        target("t1", "app=web", "2024-01-01T00:00:00Z"),
        target("t2", "app=db", "2024-02-01T00:00:00Z"),
        target("t3", "app=web", "2024-03-01T00:00:00Z"),
    ]);
    let rows = render_targets(&list);
    let ids: Vec<_> = rows.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["t3", "t2", "t1"]);
    assert_eq!(rows.rows()[0].actions, vec![RowAction::View, RowAction::Delete]);

    let options = target_options(&list);
    let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["app=web", "app=db"]);
    assert_eq!(options[0].label, "target t3 (deployment)");
}

#[tokio::test]
async fn test_create_without_name_never_hits_network() {
    let client = client(FakeTransport::new());
    let mut modal = Modal {
        open: true,
        form: ExperimentForm {
            name: String::new(),
            kind: "external-target".into(),
            target: "app=web".into(),
            ..Default::default()
        },
    };
    let before = modal.clone();

    let outcome = actions::create_experiment(&client, modal.form.to_request()).await;
    modal.settle(outcome.succeeded);

    assert!(client.transport().calls().is_empty());
    assert!(!outcome.succeeded);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.tone, Tone::Warning);
    assert_eq!(notice.message, REQUIRED_FIELDS);
    assert_eq!(modal, before);
}

#[tokio::test]
async fn test_failed_create_keeps_modal_and_form() {
    let client = client(FakeTransport::new().route(
        Method::Post,
        "/experiments",
        500,
        json!({"error": "db down"}),
    ));
    let mut modal = Modal {
        open: true,
        form: ExperimentForm {
            name: "latency".into(),
            kind: "network-delay".into(),
            target: "app=web".into(),
            duration: "30".into(),
            ..Default::default()
        },
    };
    let before = modal.clone();

    let outcome = actions::create_experiment(&client, modal.form.to_request()).await;
    modal.settle(outcome.succeeded);

    assert!(!outcome.succeeded);
    assert!(outcome.reload.is_empty());
    assert_eq!(modal, before);
    assert!(modal.open);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.tone, Tone::Error);
    assert_eq!(
        notice.message,
        "Error creating experiment: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_successful_create_resets_and_reloads() {
    let client = client(FakeTransport::new().route(
        Method::Post,
        "/experiments",
        201,
        experiment("new", "pending", "2024-05-01T00:00:00Z"),
    ));
    let mut modal = Modal {
        open: true,
        form: ExperimentForm {
            name: "kill half".into(),
            kind: "pod-failure".into(),
            target: "app=web".into(),
            duration: "45".into(),
            ..Default::default()
        },
    };
    modal.form.workload.percentage = 40;

    let outcome = actions::create_experiment(&client, modal.form.to_request()).await;
    modal.settle(outcome.succeeded);

    assert!(outcome.succeeded);
    assert_eq!(outcome.reload, EXPERIMENT_LOADERS);
    assert!(!modal.open);
    assert_eq!(modal.form, ExperimentForm::default());

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, format!("{}/experiments", BASE));
    assert_eq!(
        calls[0].body,
        Some(json!({
            "name": "kill half",
            "description": "",
            "type": "pod-failure",
            "target": "app=web",
            "parameters": {"namespace": "default", "percentage": "40"},
            "duration": 45
        }))
    );
}

#[tokio::test]
async fn test_target_create_reloads_targets_only() {
    let client = client(FakeTransport::new().route(Method::Post, "/targets", 201, json!(null)));
    let mut modal = Modal {
        open: true,
        form: TargetForm {
            name: "web".into(),
            selector: "app=web".into(),
            ..Default::default()
        },
    };
    let outcome = actions::create_target(&client, modal.form.to_request()).await;
    modal.settle(outcome.succeeded);
    assert!(outcome.succeeded);
    assert_eq!(outcome.reload, TARGET_LOADERS);
    assert!(!modal.open);
}

#[tokio::test]
async fn test_delete_target_requires_confirmation() {
    let client = client(FakeTransport::new().route(Method::Delete, "/targets/t1", 200, json!({})));

    let declined = actions::delete_target(&client, &|_: &str| false, "t1").await;
    assert_eq!(declined, actions::Outcome::cancelled());
    assert!(client.transport().calls().is_empty());

    let asked = std::cell::Cell::new(false);
    let accept = |msg: &str| {
        asked.set(true);
        msg.contains("delete this target")
    };
    let outcome = actions::delete_target(&client, &accept, "t1").await;
    assert!(asked.get());
    assert!(outcome.succeeded);
    assert_eq!(outcome.reload, vec![Loader::Targets]);
    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Delete);
    assert_eq!(calls[0].url, format!("{}/targets/t1", BASE));
}

#[tokio::test]
async fn test_delete_experiment_failure_is_reported() {
    let client = client(FakeTransport::new());
    let outcome = actions::delete_experiment(&client, &|_: &str| true, "missing").await;
    assert!(!outcome.succeeded);
    assert_eq!(
        outcome.notice.unwrap().message,
        "Error deleting experiment: 404 Not Found"
    );
}

#[tokio::test]
async fn test_execute_reloads_dashboard_and_list() {
    let client = client(FakeTransport::new().route(
        Method::Post,
        "/experiments/e1/execute",
        200,
        json!({"id": "e1", "status": "running"}),
    ));
    let outcome = actions::execute_experiment(&client, "e1").await;
    assert!(outcome.succeeded);
    assert_eq!(outcome.reload, vec![Loader::Dashboard, Loader::Experiments]);
    assert_eq!(
        outcome.notice.unwrap().message,
        "Experiment e1 started successfully"
    );
}

#[tokio::test]
async fn test_execute_network_failure() {
    let client = client(FakeTransport::new().reject(
        Method::Post,
        "/experiments/e1/execute",
        "connection refused",
    ));
    let outcome = actions::execute_experiment(&client, "e1").await;
    assert!(!outcome.succeeded);
    assert!(outcome.reload.is_empty());
    assert_eq!(
        outcome.notice.unwrap().message,
        "Error executing experiment: network error: connection refused"
    );
}

#[tokio::test]
async fn test_stop_is_unsupported_and_offline() {
    let client = client(FakeTransport::new());
    let outcome = actions::stop_experiment(&client, "e1").await;
    assert!(!outcome.succeeded);
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.tone, Tone::Warning);
    assert!(notice.message.contains("not supported"));
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn test_view_experiment_fetches_by_id() {
    let client = client(FakeTransport::new().route(
        Method::Get,
        "/experiments/e9",
        200,
        experiment("e9", "completed", "2024-01-01T00:00:00Z"),
    ));
    let outcome = actions::view_experiment(&client, "e9").await;
    match outcome.detail {
        Some(Detail::Experiment(e)) => {
            assert_eq!(e.id, "e9");
            assert_eq!(e.parameters["namespace"], "default");
        }
        other => panic!("unexpected detail: {:?}", other),
    }
}

#[tokio::test]
async fn test_view_target_missing() {
    let client = client(FakeTransport::new().route(
        Method::Get,
        "/targets",
        200,
        json!([target("t1", "app=web", "2024-01-01")]),
    ));
    let outcome = actions::view_target(&client, "t2").await;
    assert!(outcome.detail.is_none());
    assert_eq!(
        outcome.notice.unwrap().message,
        "Error loading target: target t2 not found"
    );
}

#[tokio::test]
async fn test_panel_clears_spinner_on_failure() {
    let client = client(FakeTransport::new().route(Method::Get, "/experiments", 500, json!(null)));
    let mut panel = Panel::default();
    panel.items = experiments(vec![experiment("old", "pending", "2024-01-01")]);
    panel.begin();
    assert!(panel.loading);

    let result = client.list_experiments().await;
    let notice = panel.settle(result, true, "Error loading experiments");

    assert!(!panel.loading);
    assert_eq!(panel.items.len(), 1, "previous rows stay on failure");
    assert_eq!(
        notice.unwrap().message,
        "Error loading experiments: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_panel_drops_stale_result() {
    let client = client(FakeTransport::new().route(
        Method::Get,
        "/targets",
        200,
        json!([target("t1", "app=web", "2024-01-01")]),
    ));
    let mut panel = Panel::default();
    panel.begin();
    let notice = panel.settle(client.list_targets().await, false, "Error loading targets");
    assert!(notice.is_none());
    assert!(!panel.loading);
    assert!(panel.items.is_empty());
    assert!(!panel.loaded);
}

#[tokio::test]
async fn test_list_decode_error() {
    let client = client(FakeTransport::new().route(
        Method::Get,
        "/experiments",
        200,
        json!({"not": "a list"}),
    ));
    assert!(matches!(
        client.list_experiments().await,
        Err(DashError::Decode(_))
    ));
}

#[tokio::test]
async fn test_null_lists_render_empty_state() {
    let client = client(
        FakeTransport::new()
            .route_raw(Method::Get, "/experiments", 200, "null")
            .route_raw(Method::Get, "/targets", 200, "null"),
    );

    let list = client.list_experiments().await.unwrap();
    assert!(list.is_empty());
    assert_eq!(
        render_experiments(&list, ExperimentTable::Recent),
        TableBody::Empty {
            message: NO_EXPERIMENTS,
            colspan: 6
        }
    );

    let list = client.list_targets().await.unwrap();
    assert_eq!(
        render_targets(&list),
        TableBody::Empty {
            message: NO_TARGETS,
            colspan: 6
        }
    );
}

#[tokio::test]
async fn test_ids_are_percent_encoded_in_paths() {
    let client = client(
        FakeTransport::new()
            .route(Method::Post, "/experiments/x%2Fy%20z/execute", 200, json!({}))
            .route(Method::Delete, "/targets/x%2Fy%20z", 200, json!({})),
    );

    client.execute_experiment("x/y z").await.unwrap();
    client.delete_target("x/y z").await.unwrap();

    let urls: Vec<_> = client.transport().calls().into_iter().map(|c| c.url).collect();
    assert_eq!(
        urls,
        [
            format!("{}/experiments/x%2Fy%20z/execute", BASE),
            format!("{}/targets/x%2Fy%20z", BASE),
        ]
    );
}

#[tokio::test]
async fn test_first_load_shows_loading_row() {
    let client = client(
        FakeTransport::new().route(Method::Get, "/experiments", 200, json!([])),
    );
    let mut panel: Panel<chaosdash_core::Experiment> = Panel::default();
    panel.begin();
    assert!(panel.awaiting_first_load());
    let body = render_experiments(&panel.items, ExperimentTable::Full)
        .or_loading(panel.awaiting_first_load());
    assert_eq!(body, TableBody::Empty { message: LOADING, colspan: 7 });

    panel.settle(client.list_experiments().await, true, "Error loading experiments");
    assert!(panel.loaded);

    // A reload of a known-empty list keeps the empty-state row.
    panel.begin();
    assert!(!panel.awaiting_first_load());
    let body = render_experiments(&panel.items, ExperimentTable::Full)
        .or_loading(panel.awaiting_first_load());
    assert_eq!(body, TableBody::Empty { message: NO_EXPERIMENTS, colspan: 7 });
}

#[tokio::test]
async fn test_failed_first_load_falls_back_to_empty_row() {
    let client = client(FakeTransport::new());
    let mut panel = Panel::default();
    panel.begin();
    let notice = panel.settle(client.list_targets().await, true, "Error loading targets");
    assert!(notice.is_some());
    assert!(!panel.awaiting_first_load());
    assert_eq!(
        render_targets(&panel.items).or_loading(panel.awaiting_first_load()),
        TableBody::Empty {
            message: NO_TARGETS,
            colspan: 6
        }
    );
}

#[tokio::test]
async fn test_error_notices_stay_until_closed() {
    let client = client(FakeTransport::new().reject(
        Method::Delete,
        "/experiments/e1",
        "connection refused",
    ));
    let failed = actions::delete_experiment(&client, &|_: &str| true, "e1").await;
    let notice = failed.notice.unwrap();
    assert_eq!(notice.tone, Tone::Error);
    assert!(!notice.dismisses_itself());

    let stop = actions::stop_experiment(&client, "e1").await.notice.unwrap();
    assert!(stop.dismisses_itself());
    assert!(Notice::success("Experiment created successfully").dismisses_itself());
}
