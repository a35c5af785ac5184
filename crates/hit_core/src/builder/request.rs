//! Setup and cleanup steps.

use super::Stage;
use crate::error::HitError;
use crate::exchange::Method;
use crate::hit::Hit;
use crate::step::{Phase, Step};
use crate::transport::Transport;
use crate::value::Value;
use std::rc::Rc;

fn request(method: Method, name: &str, url: String) -> Step {
    Stage::root(name, vec![Value::from(url.as_str())]).step(Phase::Setup, move |hit| {
        let request = hit.request_mut();
        request.set_method(method);
        request.set_url(url.clone());
        Ok(())
    })
}

/// Sets the method to GET and the request url.
pub fn get(url: impl Into<String>) -> Step {
    request(Method::Get, "get", url.into())
}

pub fn post(url: impl Into<String>) -> Step {
    request(Method::Post, "post", url.into())
}

pub fn put(url: impl Into<String>) -> Step {
    request(Method::Put, "put", url.into())
}

pub fn patch(url: impl Into<String>) -> Step {
    request(Method::Patch, "patch", url.into())
}

pub fn delete(url: impl Into<String>) -> Step {
    request(Method::Delete, "delete", url.into())
}

pub fn head(url: impl Into<String>) -> Step {
    request(Method::Head, "head", url.into())
}

pub fn options(url: impl Into<String>) -> Step {
    request(Method::Options, "options", url.into())
}

/// Sets an arbitrary method and the request url.
pub fn method(method: Method, url: impl Into<String>) -> Step {
    let url = url.into();
    Stage::root("method", vec![Value::from(method.to_string()), Value::from(url.as_str())])
        .step(Phase::Setup, move |hit| {
            let request = hit.request_mut();
            request.set_method(method);
            request.set_url(url.clone());
            Ok(())
        })
}

/// Prefixes the request url, e.g. `base_url("http://localhost:8080")`
/// followed by `get("/users")`.
pub fn base_url(url: impl Into<String>) -> Step {
    let url = url.into();
    Stage::root("base_url", vec![Value::from(url.as_str())]).step(Phase::Setup, move |hit| {
        hit.set_base_url(url.clone());
        Ok(())
    })
}

/// Replaces the transport used for the exchange.
///
/// # Examples
///
/// ```
/// use hit_core::{do_steps, expect, post, transport, Request, Response, TransportError};
///
/// let result = do_steps(vec![
///     post("http://service.test/echo"),
///     transport(|request: &Request| -> Result<Response, TransportError> {
///         Ok(Response::new(204, vec![], request.body().to_vec()))
///     }),
///     expect().status().equal(204),
/// ]);
/// assert!(result.is_ok());
/// ```
pub fn transport(transport: impl Transport + 'static) -> Step {
    let transport: Rc<dyn Transport> = Rc::new(transport);
    Stage::root("transport", vec![]).step(Phase::Setup, move |hit| {
        hit.set_transport(transport.clone());
        Ok(())
    })
}

/// Sets the description reported with every failure of the run.
pub fn description(text: impl Into<String>) -> Step {
    let text = text.into();
    Stage::root("description", vec![Value::from(text.as_str())]).step(Phase::Setup, move |hit| {
        hit.set_description(text.clone());
        Ok(())
    })
}

/// Runs `f` after every expectation passed.
pub fn cleanup<F>(f: F) -> Step
where
    F: Fn(&mut Hit) -> Result<(), HitError> + 'static,
{
    Stage::root("cleanup", vec![]).step(Phase::Cleanup, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_paths() {
        assert_eq!(post("http://x").call(), r#"post("http://x")"#);
        assert_eq!(method(Method::Patch, "/a").call(), r#"method("PATCH", "/a")"#);
        assert_eq!(base_url("http://x").phase(), Phase::Setup);
        assert_eq!(cleanup(|_| Ok(())).phase(), Phase::Cleanup);
    }

    #[test]
    fn test_request_step_sets_method_and_url() {
        let mut hit = Hit::default();
        hit.do_steps(vec![put("/items/1")]).unwrap();
        assert_eq!(hit.request().method(), Some(Method::Put));
        assert_eq!(hit.request().url(), "/items/1");
    }

    #[test]
    fn test_description_step() {
        let mut hit = Hit::default();
        hit.do_steps(vec![description("creates a user")]).unwrap();
        assert_eq!(hit.description(), Some("creates a user"));
    }
}
