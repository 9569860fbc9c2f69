//! # Router Module
//!
//! Regex-based path matching and route resolution.
//!
//! Routes are registered through [`RouterBuilder`] in an explicit order and
//! compiled once into an immutable [`Router`]; nothing is added or removed
//! after startup, so concurrent requests traverse the table without
//! synchronization. Matching is anchored (`^pattern$`) and first-match:
//! the first registered route whose method matches exactly and whose
//! pattern matches the *entire* path wins. That total order is part of the
//! contract — register a literal `/items/special` before a broader
//! `/items/([a-z]+)` when both should coexist.
//!
//! A route registered for a different method is a non-match even when its
//! pattern fits the path, so REST-style method overloading on one path
//! works by registering one route per method.

mod core;
#[cfg(test)]
mod tests;

pub use core::{BodyKind, CaptureVec, Route, RouteHandler, RouteMatch, Router, RouterBuilder};
