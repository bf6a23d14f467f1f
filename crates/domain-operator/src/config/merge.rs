use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use domain_operator_derive::Merge;

/// A type that can be merged with a less specific instance of itself
///
/// This is implemented for pod configuration that is declared at several scopes (server,
/// cluster, domain), where the tighter scope takes precedence. `self` is the accumulator that
/// already holds the more specific values, `defaults` is never modified.
///
/// Most users will want to implement this for custom types using [the associated derive macro](`derive@Merge`).
///
/// # Example
///
/// ```
/// # use domain_operator::config::merge::Merge;
///
/// #[derive(Merge, Debug, PartialEq, Eq)]
/// struct Tuning {
///     timeout_seconds: Option<i32>,
///     period_seconds: Option<i32>,
/// }
///
/// let mut tuning = Tuning {
///     timeout_seconds: Some(5),
///     period_seconds: None,
/// };
/// tuning.merge(&Tuning {
///     timeout_seconds: Some(1),
///     period_seconds: Some(10),
/// });
/// assert_eq!(tuning, Tuning {
///     timeout_seconds: Some(5), // Already set by the more specific scope
///     period_seconds: Some(10), // Fallback is used
/// });
/// ```
///
/// # Options
///
/// A field should be [`Option`]al if it is [`Atomic`] (for example: [`i32`]) so that "not
/// configured" can never collide with a legitimate zero value. Composite objects that are always
/// present (such as probe tunings) should generally *not* be optional.
pub trait Merge {
    /// Merge with `defaults`, preferring values from `self` if they are set there
    fn merge(&mut self, defaults: &Self);
}

/// Moving version of [`Merge::merge`], to produce slightly nicer test output
pub fn merge<T: Merge>(mut overrides: T, defaults: &T) -> T {
    overrides.merge(defaults);
    overrides
}

/// A marker trait for types that are merged atomically (as one single value) rather than
/// trying to merge each field individually
pub trait Atomic: Clone {}
impl Atomic for i32 {}
impl Atomic for i64 {}
impl Atomic for bool {}
impl Atomic for String {}
impl Atomic for Quantity {}

impl<T: Atomic> Merge for Option<T> {
    fn merge(&mut self, defaults: &Self) {
        if self.is_none() {
            self.clone_from(defaults);
        }
    }
}
