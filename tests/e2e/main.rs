//! End-to-end scenarios: real requests against an in-process HTTP server.

mod harness;
mod scenarios;
