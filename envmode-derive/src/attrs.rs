//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from struct fields
//! during macro expansion.

use syn::{Expr, ExprLit, ExprPath, ExprUnary, Field, Lit, LitStr, UnOp};

const DEFAULT_LITERAL: &str = "default must be a string, integer, float or boolean literal";

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Lookup key override.
    ///
    /// `None` and `Some("")` both mean the field name upper-cased.
    pub name: Option<String>,

    /// Literal default, coerced like an environment value.
    pub default: Option<String>,

    /// Leave the field untouched.
    pub skip: bool,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    ///
    /// When specified, bypasses the built-in coercions and uses this function instead.
    pub deserializer: Option<ExprPath>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    attrs.name = Some(string_literal(meta.value()?.parse()?)?);
                    return Ok(());
                }

                // default = "literal"
                if meta.path.is_ident("default") {
                    if !meta.input.peek(syn::Token![=]) {
                        return Err(meta.error("expected `default = \"value\"`"));
                    }
                    attrs.default = Some(literal_text(&meta.value()?.parse()?)?);
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let path = lit.parse::<ExprPath>().map_err(|_| {
                        syn::Error::new_spanned(&lit, "deserializer must be a function path")
                    })?;
                    attrs.deserializer = Some(path);
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

fn string_literal(lit: Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(other, "expected string literal")),
    }
}

/// Text of a default literal as it would appear in the environment.
///
/// Accepts string, integer, float and boolean literals, and negated numbers.
fn literal_text(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            other => Err(syn::Error::new_spanned(other, DEFAULT_LITERAL)),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(_) | Lit::Float(_),
                ..
            }) => Ok(format!("-{}", literal_text(inner)?)),
            other => Err(syn::Error::new_spanned(other, DEFAULT_LITERAL)),
        },
        other => Err(syn::Error::new_spanned(other, DEFAULT_LITERAL)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_name_attribute() {
        let field: Field = parse_quote! {
            #[env(name = "CUSTOM_NAME")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, Some("CUSTOM_NAME".to_string()));
    }

    #[test]
    fn test_parse_empty_name_is_kept() {
        let field: Field = parse_quote! {
            #[env(name = "")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, Some(String::new()));
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[env(default = "default_value")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("default_value".to_string()));
    }

    #[test]
    fn test_parse_default_number() {
        let field: Field = parse_quote! {
            #[env(default = 42)]
            pub field_name: i32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("42".to_string()));
    }

    #[test]
    fn test_parse_default_bool_and_float() {
        let field: Field = parse_quote! {
            #[env(default = false)]
            pub flag: bool
        };
        assert_eq!(
            FieldAttrs::from_field(&field).unwrap().default,
            Some("false".to_string())
        );

        let field: Field = parse_quote! {
            #[env(default = 0.5)]
            pub ratio: f64
        };
        assert_eq!(
            FieldAttrs::from_field(&field).unwrap().default,
            Some("0.5".to_string())
        );
    }

    #[test]
    fn test_parse_default_negative_number() {
        let field: Field = parse_quote! {
            #[env(default = -5)]
            pub offset: i32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.default, Some("-5".to_string()));
    }

    #[test]
    fn test_parse_default_expression_is_rejected() {
        let field: Field = parse_quote! {
            #[env(default = Duration::from_secs(60))]
            pub timeout: Duration
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_bare_default_is_rejected() {
        let field: Field = parse_quote! {
            #[env(default)]
            pub field_name: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_parse_skip() {
        let field: Field = parse_quote! {
            #[env(skip)]
            pub cache: Vec<u8>
        };

        assert!(FieldAttrs::from_field(&field).unwrap().skip);
    }

    #[test]
    fn test_parse_multiple_attributes() {
        let field: Field = parse_quote! {
            #[env(name = "DB_URL", default = "postgres://localhost/db")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.name, Some("DB_URL".to_string()));
        assert_eq!(attrs.default, Some("postgres://localhost/db".to_string()));
    }

    #[test]
    fn test_parse_deserializer() {
        let field: Field = parse_quote! {
            #[env(deserializer = "serde_json::from_str")]
            pub field_name: Vec<u32>
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        let expected: ExprPath = parse_quote!(serde_json::from_str);
        assert_eq!(attrs.deserializer, Some(expected));
    }

    #[test]
    fn test_parse_deserializer_must_be_a_path() {
        let field: Field = parse_quote! {
            #[env(deserializer = "|s| s.len()")]
            pub field_name: usize
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert_eq!(err.to_string(), "deserializer must be a function path");
    }

    #[test]
    fn test_parse_unknown_attribute() {
        let field: Field = parse_quote! {
            #[env(from_file)]
            pub field_name: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.name.is_none());
        assert!(attrs.default.is_none());
    }
}
