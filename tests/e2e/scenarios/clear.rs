use crate::harness::{Reply, Scenario};
use hit_core::{clear, expect, get, post, send, steps, ErrorKind, Step};

/// Expectations a suite shares across its tests.
fn defaults() -> Vec<Step> {
    steps![
        expect().status().equal(200),
        expect().header("Content-Type").contains("json"),
        expect().body().json().equal("Name", "Joe"),
        expect().body().json().equal("Id", 10),
    ]
}

fn alice() -> Reply {
    Reply::status(200).json(serde_json::json!({"Name": "Alice", "Id": 10}))
}

#[test]
fn test_clear_send_body_replaces_body() {
    Scenario::new("clear_send_body_replaces_body")
        .step(post("/messages"))
        .step(send().body_value("old"))
        .step(clear().send().body())
        .step(send().body_value("X"))
        .assert_passes()
        .assert_received_body("X")
        .run()
        .unwrap();
}

#[test]
fn test_defaults_fail_without_clear() {
    Scenario::new("defaults_fail_without_clear")
        .replying(alice())
        .step(get("/users/10"))
        .steps(defaults())
        .assert_fails(
            ErrorKind::Assertion,
            r#"expect().body().json().equal("Name", "Joe")"#,
        )
        .run()
        .unwrap();
}

#[test]
fn test_clear_with_arguments_removes_only_the_match() {
    Scenario::new("clear_with_arguments")
        .replying(alice())
        .step(get("/users/10"))
        .steps(defaults())
        .step(clear().expect().body().json().equal("Name"))
        .step(expect().body().json().equal("Name", "Alice"))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_clear_without_arguments_removes_every_variant() {
    Scenario::new("clear_without_arguments")
        .replying(alice())
        .step(get("/users/10"))
        .steps(defaults())
        .step(clear().expect().body().json().equal(()))
        .step(expect().body().json().equal("Id", 10))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_clear_status_for_error_responses() {
    Scenario::new("clear_status_for_error_responses")
        .replying(Reply::status(404).json(serde_json::json!({"Name": "Joe", "Id": 10})))
        .step(get("/users/10"))
        .steps(defaults())
        .step(clear().expect().status())
        .step(expect().status().equal(404))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_clear_does_not_affect_later_steps() {
    Scenario::new("clear_does_not_affect_later_steps")
        .replying(alice())
        .step(get("/users/10"))
        .step(clear().expect())
        .steps(defaults())
        .assert_fails(
            ErrorKind::Assertion,
            r#"expect().body().json().equal("Name", "Joe")"#,
        )
        .run()
        .unwrap();
}

#[test]
fn test_terminal_clear_fails_before_the_request() {
    Scenario::new("terminal_clear_fails_before_the_request")
        .step(post("/messages"))
        .steps(defaults())
        .step(clear().expect().body().json_value("Name"))
        .assert_fails(
            ErrorKind::Usage,
            r#"clear().expect().body().json("Name")"#,
        )
        .assert_failure_contains("only usable with clear().expect().body().json()")
        .assert_request_count(0)
        .run()
        .unwrap();
}
