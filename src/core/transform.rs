//! Transform and validator functions attached to transitions.
//!
//! Both are pure: a [`Transform`] rewrites instance data when a transition
//! fires, a [`Validator`] decides whether a transition may fire at all.
//! Neither is stored bare; the definition keeps an explicit optional slot,
//! and an absent slot means identity (transforms) or "always allowed"
//! (validators).

use crate::core::Data;
use std::fmt;
use std::sync::Arc;

/// Pure rewrite applied to instance data when a transition fires.
///
/// Transforms receive the data produced by the previous pipeline stage and
/// return the next data value; they never see or change the state itself.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use volition::{Data, Transform};
///
/// let stamp = Transform::new(|mut data: Data| {
///     data.insert("stamped".to_string(), json!(true));
///     data
/// });
///
/// let out = stamp.apply(Data::new());
/// assert_eq!(out.get("stamped"), Some(&json!(true)));
/// ```
#[derive(Clone)]
pub struct Transform {
    rewrite: Arc<dyn Fn(Data) -> Data + Send + Sync>,
}

impl Transform {
    /// Wrap a pure rewrite function.
    ///
    /// The function must be deterministic, side-effect free, and
    /// thread-safe (`Send + Sync`).
    pub fn new<F>(rewrite: F) -> Self
    where
        F: Fn(Data) -> Data + Send + Sync + 'static,
    {
        Transform {
            rewrite: Arc::new(rewrite),
        }
    }

    /// Apply the rewrite to a data value.
    pub fn apply(&self, data: Data) -> Data {
        (self.rewrite)(data)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform")
    }
}

/// Pure predicate over instance data gating whether a transition may fire.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use volition::{Data, Validator};
///
/// let ready = Validator::new(|data: &Data| {
///     data.get("ready").and_then(|v| v.as_bool()).unwrap_or(false)
/// });
///
/// let mut data = Data::new();
/// assert!(!ready.check(&data));
///
/// data.insert("ready".to_string(), json!(true));
/// assert!(ready.check(&data));
/// ```
#[derive(Clone)]
pub struct Validator {
    predicate: Arc<dyn Fn(&Data) -> bool + Send + Sync>,
}

impl Validator {
    /// Wrap a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Data) -> bool + Send + Sync + 'static,
    {
        Validator {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against a data value.
    pub fn check(&self, data: &Data) -> bool {
        (self.predicate)(data)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator")
    }
}
