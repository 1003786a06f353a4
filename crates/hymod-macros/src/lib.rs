use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta};

/// Derive macro generating a companion `*Timeseries` struct for a flux
/// struct whose fields are all `f64`.
///
/// The timeseries struct mirrors every field as a `Vec<f64>` and provides
/// `with_capacity`, `push`, `len`, and `is_empty`. The source struct gains
/// a `field_names()` associated function. The generated struct's name
/// defaults to `{StructName}Timeseries` and can be overridden with
/// `#[fluxes(timeseries_name = "CustomName")]`.
#[proc_macro_derive(Fluxes, attributes(fluxes))]
pub fn derive_fluxes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let ts_name =
        timeseries_name(input)?.unwrap_or_else(|| format_ident!("{}Timeseries", name));
    let fields = flux_fields(input)?;

    let field_names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    let first_field = &fields[0];

    let ts_fields = fields.iter().map(|f| quote! { pub #f: Vec<f64> });
    let with_cap = fields.iter().map(|f| quote! { #f: Vec::with_capacity(n) });
    let pushes = fields.iter().map(|f| quote! { self.#f.push(f.#f); });

    Ok(quote! {
        /// Auto-generated timeseries struct collecting per-timestep fluxes.
        #[derive(Debug)]
        pub struct #ts_name {
            #(#ts_fields,)*
        }

        impl #ts_name {
            /// Pre-allocate all vectors for `n` timesteps.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap,)*
                }
            }

            /// Push a single timestep's fluxes.
            pub fn push(&mut self, f: &#name) {
                #(#pushes)*
            }

            /// Number of timesteps stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no timesteps have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }
        }

        impl #name {
            /// Field names of this flux struct, in declaration order.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }
        }
    })
}

/// Collect the named f64 fields, rejecting anything else.
fn flux_fields(input: &DeriveInput) -> syn::Result<Vec<&Ident>> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Fluxes can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Fluxes can only be derived for structs",
            ))
        }
    };

    if named.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Fluxes struct must have at least one field",
        ));
    }

    named
        .iter()
        .map(|field| {
            if !is_f64(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "Fluxes derive: all fields must be f64",
                ));
            }
            Ok(field.ident.as_ref().expect("named field has ident"))
        })
        .collect()
}

/// Read `#[fluxes(timeseries_name = "...")]` if present.
fn timeseries_name(input: &DeriveInput) -> syn::Result<Option<Ident>> {
    for attr in &input.attrs {
        if !attr.path().is_ident("fluxes") {
            continue;
        }
        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;
        for meta in nested {
            if let Meta::NameValue(nv) = meta {
                if nv.path.is_ident("timeseries_name") {
                    if let Expr::Lit(expr_lit) = &nv.value {
                        if let Lit::Str(lit_str) = &expr_lit.lit {
                            return Ok(Some(format_ident!("{}", lit_str.value())));
                        }
                    }
                    return Err(syn::Error::new_spanned(
                        &nv.value,
                        "timeseries_name must be a string literal",
                    ));
                }
            }
        }
    }
    Ok(None)
}

fn is_f64(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(path) if path.path.is_ident("f64"))
}
