//! # Dispatcher Module
//!
//! Invokes the handler of a matched route with a freshly built
//! [`ParamSet`](crate::params::ParamSet) and the raw request body, and
//! normalizes every failure mode into
//! [`DispatchError`](crate::error::DispatchError).
//!
//! The dispatch path performs no internal concurrency: one request is
//! handled start to finish by the worker coroutine that accepted it, no
//! background work is spawned, and nothing request-scoped outlives the
//! request. Handler panics are caught here and reported as faults so a
//! misbehaving handler cannot take the worker down.

mod core;

pub use core::{dispatch, HandlerResult, RedirectTarget, StructuredBody};
