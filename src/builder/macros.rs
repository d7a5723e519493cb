//! Macros for ergonomic definition construction.

/// Build a transition triple list from `[from, to]` or
/// `[from, to, rewrite]` entries.
///
/// # Example
///
/// ```
/// use volition::{transitions, Data, Definition};
///
/// let definition = Definition::build(
///     transitions![
///         ["idle", "running"],
///         ["running", "done", |mut data: Data| {
///             data.insert("finished".to_string(), serde_json::json!(true));
///             data
///         }],
///     ],
///     volition::validators![],
/// )?;
/// # Ok::<(), volition::BuildError>(())
/// ```
#[macro_export]
macro_rules! transitions {
    (@transform) => {
        ::std::option::Option::<$crate::Transform>::None
    };
    (@transform $transform:expr) => {
        ::std::option::Option::Some($crate::Transform::new($transform))
    };
    () => {
        ::std::vec::Vec::<$crate::TransitionTriple>::new()
    };
    ( $( [ $from:expr, $to:expr $(, $transform:expr )? ] ),+ $(,)? ) => {
        ::std::vec![ $(
            (
                $crate::State::from($from),
                $crate::State::from($to),
                $crate::transitions!(@transform $( $transform )?),
            )
        ),+ ]
    };
}

/// Build a validator triple list from `[from, to, predicate]` entries.
///
/// # Example
///
/// ```
/// use volition::{validators, Data};
///
/// let gates = validators![
///     ["running", "done", |data: &Data| data.contains_key("ready")],
/// ];
/// assert_eq!(gates.len(), 1);
/// ```
#[macro_export]
macro_rules! validators {
    () => {
        ::std::vec::Vec::<$crate::ValidatorTriple>::new()
    };
    ( $( [ $from:expr, $to:expr, $validator:expr ] ),+ $(,)? ) => {
        ::std::vec![ $(
            (
                $crate::State::from($from),
                $crate::State::from($to),
                $crate::Validator::new($validator),
            )
        ),+ ]
    };
}
