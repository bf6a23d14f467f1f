use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod merge;

/// Derives [`Merge`](trait.Merge.html) by merging every field of a struct with its counterpart
/// from `defaults`.
///
/// Each field is merged through its own `Merge` implementation, unless it is annotated with
/// `#[merge(with = "path::to::combinator")]`. The combinator is then called as
/// `combinator(&mut self.field, &defaults.field)`, which is how a field opts into a merge
/// policy that differs from the one its type would normally use (for example keyed-list
/// union instead of replacing the whole list).
///
/// Container attributes:
///
/// - `#[merge(path_overrides(merge = "crate::config::merge"))]` changes where the `Merge`
///   trait is looked up, which is required when deriving inside `domain-operator` itself.
/// - `#[merge(bound = "T: Merge")]` adds where-clause predicates to the generated impl.
#[proc_macro_derive(Merge, attributes(merge))]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    merge::derive(&parse_macro_input!(input as DeriveInput)).into()
}
