use darling::{
    FromDeriveInput, FromField, FromMeta,
    ast::{Data, Fields},
    util::Ignored,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DeriveInput, Generics, Index, Member, Path, WherePredicate, parse_quote};

#[derive(FromMeta)]
struct PathOverrides {
    #[darling(default = "PathOverrides::default_merge")]
    merge: Path,
}

impl Default for PathOverrides {
    fn default() -> Self {
        Self {
            merge: Self::default_merge(),
        }
    }
}

impl PathOverrides {
    fn default_merge() -> Path {
        parse_quote!(::domain_operator::config::merge)
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(merge), supports(struct_named, struct_tuple))]
struct MergeInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, MergeField>,
    #[darling(default)]
    path_overrides: PathOverrides,
    #[darling(default)]
    bound: Option<Vec<WherePredicate>>,
}

#[derive(FromField)]
#[darling(attributes(merge))]
struct MergeField {
    ident: Option<Ident>,
    /// Combinator used instead of the field type's own `Merge` impl
    #[darling(default)]
    with: Option<Path>,
}

pub fn derive(input: &DeriveInput) -> TokenStream {
    let MergeInput {
        ident,
        mut generics,
        data,
        path_overrides: PathOverrides { merge: merge_mod },
        bound,
    } = match MergeInput::from_derive_input(input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    // Enums are already rejected by `supports`
    let Some(fields) = data.take_struct() else {
        return syn::Error::new_spanned(&input.ident, "Merge can only be derived for structs")
            .to_compile_error();
    };
    let body = merge_fields(fields, &merge_mod);

    if let Some(bound) = bound {
        generics.make_where_clause().predicates.extend(bound);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #merge_mod::Merge for #ident #ty_generics #where_clause {
            fn merge(&mut self, defaults: &Self) {
                #body
            }
        }
    }
}

fn merge_fields(fields: Fields<MergeField>, merge_mod: &Path) -> TokenStream {
    fields
        .into_iter()
        .enumerate()
        .map(|(index, MergeField { ident, with })| {
            let member = match ident {
                Some(ident) => Member::Named(ident),
                None => Member::Unnamed(Index::from(index)),
            };
            if let Some(combinator) = with {
                quote! {
                    #combinator(&mut self.#member, &defaults.#member);
                }
            } else {
                quote! {
                    #merge_mod::Merge::merge(&mut self.#member, &defaults.#member);
                }
            }
        })
        .collect()
}
