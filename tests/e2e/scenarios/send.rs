use crate::harness::Scenario;
use hit_core::{delete, expect, method, post, put, send, send_value, Method};
use serde_json::json;

#[test]
fn test_send_raw_body() {
    Scenario::new("send_raw_body")
        .step(post("/messages"))
        .step(send_value("Hello World"))
        .assert_passes()
        .assert_request_count(1)
        .assert_received_method("POST")
        .assert_received_path("/messages")
        .assert_received_body("Hello World")
        .run()
        .unwrap();
}

#[test]
fn test_send_json_sets_content_type() {
    Scenario::new("send_json_sets_content_type")
        .step(put("/users/10"))
        .step(send().json(json!({"Name": "Joe", "Id": 10})))
        .step(expect().body().json().equal("Name", "Joe"))
        .step(expect().body().json().equal("Id", 10))
        .assert_passes()
        .assert_received_method("PUT")
        .assert_received_header("Content-Type", "application/json")
        .assert_received_body(r#"{"Id":10,"Name":"Joe"}"#)
        .run()
        .unwrap();
}

#[test]
fn test_send_header_replaces_earlier_value() {
    Scenario::new("send_header_replaces_earlier_value")
        .step(delete("/items/1"))
        .step(send().header("X-Request-Id", "1"))
        .step(send().header("X-Request-Id", "2"))
        .assert_passes()
        .assert_received_header("X-Request-Id", "2")
        .run()
        .unwrap();
}

#[test]
fn test_default_headers_from_config() {
    Scenario::new("default_headers_from_config")
        .with_default_header("Authorization", "Bearer token")
        .step(method(Method::Patch, "/items/1"))
        .assert_passes()
        .assert_received_method("PATCH")
        .assert_received_header("Authorization", "Bearer token")
        .run()
        .unwrap();
}

#[test]
fn test_custom_send_runs_nested_steps() {
    Scenario::new("custom_send_runs_nested_steps")
        .step(post("/nested"))
        .step(send().custom(|hit| {
            hit.do_steps(vec![send_value("from a nested run").into()])?;
            Ok(())
        }))
        .assert_passes()
        .assert_received_body("from a nested run")
        .run()
        .unwrap();
}

#[test]
fn test_send_steps_run_before_the_exchange() {
    // Declared after the expectation, still sent.
    Scenario::new("send_steps_run_before_the_exchange")
        .step(expect().body().equal("late"))
        .step(post("/late"))
        .step(send_value("late"))
        .assert_passes()
        .assert_received_body("late")
        .run()
        .unwrap();
}
