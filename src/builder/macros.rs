//! Macros for ergonomic state tree declarations.

/// Build a [`StatesSpec`](crate::builder::StatesSpec) from a nested,
/// declaration-ordered tree.
///
/// Each entry is `name => target` where target is one of:
/// - `nil` for a terminal leaf,
/// - a single state name,
/// - `[a, b, ...]` for several targets,
/// - `{ ... }` for a group, declared recursively.
///
/// # Example
///
/// ```
/// use statetree::states;
///
/// let spec = states! {
///     draft => beta,
///     published => {
///         beta => {
///             needs_feedback => [draft, needs_approval],
///             needs_approval => [draft, approved],
///         },
///         approved => retired,
///     },
///     retired => nil,
/// };
///
/// assert_eq!(spec.len(), 3);
/// ```
#[macro_export]
macro_rules! states {
    ($($name:ident => $target:tt),* $(,)?) => {{
        let spec = $crate::builder::StatesSpec::new();
        $(
            let spec = spec.state(stringify!($name), $crate::__state_target!($target));
        )*
        spec
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_target {
    (nil) => {
        $crate::builder::TargetSpec::Terminal
    };
    ([$($target:ident),* $(,)?]) => {
        $crate::builder::TargetSpec::Many(::std::vec![
            $($crate::core::StateName::from(stringify!($target))),*
        ])
    };
    ({ $($inner:tt)* }) => {
        $crate::builder::TargetSpec::Group($crate::states!($($inner)*))
    };
    ($target:ident) => {
        $crate::builder::TargetSpec::One($crate::core::StateName::from(stringify!($target)))
    };
}
