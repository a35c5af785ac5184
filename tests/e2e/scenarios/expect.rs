use crate::harness::{Reply, Scenario};
use hit_core::{expect, expect_value, get, head, options, post, send, ErrorKind};
use serde_json::json;

fn users() -> Reply {
    Reply::status(200).json(json!({
        "Users": [
            {"Name": "Joe", "Id": 1},
            {"Name": "Alice", "Id": 2},
        ],
        "Total": 2,
    }))
}

#[test]
fn test_status_assertions() {
    Scenario::new("status_assertions")
        .replying(Reply::status(201))
        .step(post("/users"))
        .step(expect().status().equal(201))
        .step(expect().status_value(201))
        .step(expect().status().one_of([200, 201]))
        .step(expect().status().not_one_of([400, 500]))
        .step(expect().status().not_equal(200))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_status_mismatch_names_the_failing_call() {
    Scenario::new("status_mismatch_names_the_failing_call")
        .replying(Reply::status(404))
        .step(get("/users/404"))
        .step(expect().status().equal(200))
        .assert_fails(ErrorKind::Assertion, "expect().status().equal(200)")
        .assert_failure_contains("status_mismatch_names_the_failing_call")
        .assert_failure_contains("Not equal")
        .run()
        .unwrap();
}

#[test]
fn test_json_body_lookups() {
    Scenario::new("json_body_lookups")
        .replying(users())
        .step(get("/users"))
        .step(expect().body().json().equal("Total", 2))
        .step(expect().body().json().equal("Users.0.Name", "Joe"))
        .step(expect().body().json().contains("Users.1", "Name"))
        .step(expect().body().json().not_equal("Users.1.Id", 1))
        .step(expect().body().json().equal("Missing", hit_core::Value::Null))
        .step(expect().body().contains("Alice"))
        .step(expect().body().not_contains("Bob"))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_whole_json_body() {
    Scenario::new("whole_json_body")
        .replying(Reply::status(200).json(json!(["A", "B"])))
        .step(get("/letters"))
        .step(expect().body().json_value(json!(["A", "B"])))
        .step(expect().body().equal(json!(["A", "B"])))
        .step(expect_value(json!(["A", "B"])))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_json_mismatch_shows_diff() {
    Scenario::new("json_mismatch_shows_diff")
        .replying(users())
        .step(get("/users"))
        .step(expect().body().json().equal("Users.0", json!({"Name": "Bob", "Id": 1})))
        .assert_fails(
            ErrorKind::Assertion,
            r#"expect().body().json().equal("Users.0", {"Id": 1, "Name": "Bob"})"#,
        )
        .assert_failure_contains("Bob")
        .run()
        .unwrap();
}

#[test]
fn test_invalid_json_is_a_conversion_failure() {
    Scenario::new("invalid_json_is_a_conversion_failure")
        .replying(Reply::status(200).body("not json"))
        .step(get("/"))
        .step(expect().body().json().equal("Name", "Joe"))
        .assert_fails(
            ErrorKind::Conversion,
            r#"expect().body().json().equal("Name", "Joe")"#,
        )
        .run()
        .unwrap();
}

#[test]
fn test_head_and_options_requests() {
    Scenario::new("head_request")
        .step(head("/"))
        .step(expect().status().equal(200))
        .assert_passes()
        .assert_received_method("HEAD")
        .run()
        .unwrap();

    Scenario::new("options_request")
        .step(options("/"))
        .step(expect().header("X-Echo-Method").equal("OPTIONS"))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_custom_expectation_reads_response() {
    Scenario::new("custom_expectation_reads_response")
        .replying(Reply::status(200).body("42"))
        .step(get("/answer"))
        .step(expect().custom(|hit| {
            let body = hit.response()?.body_string();
            if body == "42" {
                Ok(())
            } else {
                Err(hit_core::HitError::custom(format!("unexpected answer {body}")))
            }
        }))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_transport_failure() {
    Scenario::new("transport_failure")
        .step(hit_core::base_url(""))
        .step(get("not a url"))
        .step(send().header("X-Ignored", "1"))
        .assert_fails(ErrorKind::Transport, "exchange()")
        .assert_failure_contains("not a url")
        .assert_request_count(0)
        .run()
        .unwrap();
}
