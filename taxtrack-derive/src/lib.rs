use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, LitStr, Meta};

/// Derive macro that turns a struct into a spreadsheet row.
///
/// For each field, extracts:
/// - Column name (respects #[serde(rename = "...")])
/// - Description (from doc comments)
///
/// Generates `sheet_columns() -> &'static [SheetColumn]`, `sheet_header()` and
/// `sheet_cells(&self)`. Every field must implement `ToString`, and `SheetColumn`
/// must be in scope where the derive is used.
#[proc_macro_derive(SheetRow, attributes(serde))]
pub fn derive_sheet_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "SheetRow only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "SheetRow only supports structs")),
    };

    let mut columns = Vec::new();
    let mut idents = Vec::new();
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let column = serde_rename(&field.attrs)?.unwrap_or_else(|| ident.to_string());
        let doc = doc_comment(&field.attrs);
        columns.push(quote! {
            SheetColumn {
                name: #column,
                description: #doc,
            }
        });
        idents.push(ident);
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn sheet_columns() -> &'static [SheetColumn] {
                static COLUMNS: &[SheetColumn] = &[
                    #(#columns),*
                ];
                COLUMNS
            }

            pub fn sheet_header() -> ::std::vec::Vec<::std::string::String> {
                Self::sheet_columns()
                    .iter()
                    .map(|column| ::std::string::ToString::to_string(column.name))
                    .collect()
            }

            pub fn sheet_cells(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![
                    #(::std::string::ToString::to_string(&self.#idents)),*
                ]
            }
        }
    })
}

fn serde_rename(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
            } else if let Ok(value) = meta.value() {
                // skip the value of any other `key = value` serde option
                let _: syn::Expr = value.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(rename)
}

fn doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}
