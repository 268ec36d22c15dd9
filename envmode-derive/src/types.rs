//! Helpers for reading field types.
//!
//! Which coercion a field uses is decided by trait dispatch on the concrete
//! type in the generated code. The derive only needs to spot `Option<T>` for
//! custom deserializers and to render type names for error messages.

use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Spacing `quote` inserts that does not appear in written Rust types.
const SPACING: &[(&str, &str)] = &[
    (" :: ", "::"),
    (":: ", "::"),
    (" ::", "::"),
    (" < ", "<"),
    (" <", "<"),
    ("< ", "<"),
    (" >", ">"),
    (" ,", ","),
    (" ;", ";"),
    ("& ", "&"),
    ("( ", "("),
    (" )", ")"),
    ("[ ", "["),
    (" ]", "]"),
    ("fn (", "fn("),
];

/// Inner type of `Option<T>`, if `ty` is written as an option.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { qself: None, path }) = peel(ty) else {
        return None;
    };
    let segment = path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(bracketed) = &segment.arguments else {
        return None;
    };
    let mut types = bracketed.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(inner), None) => Some(inner),
        _ => None,
    }
}

/// Render a type the way it is usually written, e.g. `HashMap<String, u8>`.
pub fn display_type(ty: &Type) -> String {
    let mut rendered = quote::quote!(#ty).to_string();
    for (from, to) in SPACING {
        while rendered.contains(from) {
            rendered = rendered.replace(from, to);
        }
    }
    rendered
}

fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => peel(&group.elem),
        Type::Paren(paren) => peel(&paren.elem),
        other => other,
    }
}
