use crate::harness::{Reply, Scenario};
use hit_core::{expect, get, ErrorKind};

fn greeting() -> Reply {
    Reply::status(200)
        .header("X-Header", "Hello")
        .header("x-lower", "quiet")
        .header("Set-Cookie", "a=1")
        .header("Set-Cookie", "b=2")
}

#[test]
fn test_conflicting_header_expectations_fail_on_mismatch() {
    Scenario::new("conflicting_header_expectations")
        .replying(greeting())
        .step(get("/"))
        .step(expect().header("X-Header").equal("Hello"))
        .step(expect().header("X-Header").equal("World"))
        .assert_fails(ErrorKind::Assertion, r#"expect().header("X-Header").equal("World")"#)
        .assert_failure_contains(r#"expected: "World""#)
        .run()
        .unwrap();
}

#[test]
fn test_header_length() {
    Scenario::new("header_length")
        .replying(greeting())
        .step(get("/"))
        .step(expect().header("X-Header").len(5))
        .assert_passes()
        .run()
        .unwrap();

    Scenario::new("header_length_mismatch")
        .replying(greeting())
        .step(get("/"))
        .step(expect().header("X-Header").len(0))
        .assert_fails(ErrorKind::Assertion, r#"expect().header("X-Header").len(0)"#)
        .assert_failure_contains("has 5 item(s)")
        .run()
        .unwrap();
}

#[test]
fn test_header_lookups_ignore_case() {
    Scenario::new("header_lookups_ignore_case")
        .replying(greeting())
        .step(get("/"))
        .step(expect().header("x-header").equal("Hello"))
        .step(expect().header("X-Lower").contains("qui"))
        .step(expect().header("X-Missing").empty())
        .step(expect().header("X-Header").one_of(["Hello", "Hi"]))
        .step(expect().header("X-Header").not_one_of(["Bye"]))
        .step(expect().header("X-Header").not_empty())
        .step(expect().header("X-Header").not_equal("World"))
        .step(expect().header("X-Header").not_contains("World"))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_repeated_headers_are_joined() {
    Scenario::new("repeated_headers_are_joined")
        .replying(greeting())
        .step(get("/"))
        .step(expect().header("Set-Cookie").equal("a=1, b=2"))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_headers_map() {
    Scenario::new("headers_map")
        .replying(greeting())
        .step(get("/"))
        .step(expect().headers().contains("x-header"))
        .step(expect().headers().contains("X-Lower"))
        .step(expect().headers().not_contains("X-Missing"))
        .step(expect().headers().not_empty())
        .step(expect().headers().get("X-Header").equal("Hello"))
        .step(expect().headers().get("X-Header").one_of(["Hello", "Hi"]))
        .assert_passes()
        .run()
        .unwrap();
}

#[test]
fn test_get_after_get_is_a_usage_error() {
    Scenario::new("get_after_get")
        .replying(greeting())
        .step(get("/"))
        .step(expect().headers().get("X").get("Y").one_of(["A", "B"]))
        .assert_fails(
            ErrorKind::Usage,
            r#"expect().headers().get("X").get("Y").one_of("A", "B")"#,
        )
        .assert_failure_contains("get() can only be used if no header was already specified")
        .assert_request_count(0)
        .run()
        .unwrap();
}

#[test]
fn test_one_of_needs_a_bound_header() {
    Scenario::new("one_of_needs_a_bound_header")
        .replying(greeting())
        .step(get("/"))
        .step(expect().headers().one_of(["A"]))
        .assert_fails(ErrorKind::Usage, r#"expect().headers().one_of("A")"#)
        .assert_request_count(0)
        .run()
        .unwrap();
}
