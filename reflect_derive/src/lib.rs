// reflect_derive/src/lib.rs
extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute,
    Data,
    DataEnum,
    DeriveInput,
    Fields,
    Generics,
    Ident,
    Visibility,
    parse_macro_input,
    parse_quote,
};

/// `#[derive(Reflect)]` – generates an impl of the `Reflect` trait.
///
/// Structs become composites whose members are listed in declaration order.
/// Enums made only of unit variants become leaves rendered as the variant name.
///
/// Attributes:
/// - `#[reflect(hidden)]` on a field keeps it out of every report.
/// - `#[reflect(sealed)]` on a struct makes introspection fail with `AccessDenied`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    // Parse the input token stream into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let generics = add_reflect_bounds(input.generics);

    let sealed = match has_flag(&input.attrs, "sealed") {
        Ok(flag) => flag,
        Err(e) => return e.to_compile_error().into(),
    };

    let body = match input.data {
        Data::Struct(s) => struct_body(&s.fields, sealed),
        Data::Enum(e) => {
            if sealed {
                return syn::Error::new_spanned(
                    name,
                    "#[reflect(sealed)] is only supported on structs",
                )
                .to_compile_error()
                .into();
            }
            enum_body(&name, &e)
        }
        Data::Union(u) => {
            return syn::Error::new_spanned(
                u.union_token,
                "Reflect cannot be derived for unions",
            )
            .to_compile_error()
            .into();
        }
    };

    let body = match body {
        Ok(body) => body,
        Err(e) => return e.to_compile_error().into(),
    };

    // Build the final impl block
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::lister_core::ecs::reflect::Reflect for #name #ty_generics #where_clause {
            #body
        }
    };

    // Hand the generated code back to the compiler
    TokenStream::from(expanded)
}

/// Every type parameter must itself be reflectable for its fields to be.
fn add_reflect_bounds(mut generics: Generics) -> Generics {
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::lister_core::ecs::reflect::Reflect));
    }
    generics
}

fn struct_body(fields: &Fields, sealed: bool) -> syn::Result<TokenStream2> {
    if sealed {
        return Ok(quote! {
            fn reflect_ref(&self) -> ::lister_core::ecs::reflect::ReflectRef<'_> {
                ::lister_core::ecs::reflect::ReflectRef::Composite(self)
            }

            fn fields(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<::lister_core::ecs::reflect::FieldInfo<'_>>,
                ::lister_core::ecs::reflect::ReflectError,
            > {
                ::std::result::Result::Err(
                    ::lister_core::ecs::reflect::ReflectError::AccessDenied {
                        type_name: ::std::any::type_name::<Self>(),
                    },
                )
            }
        });
    }

    let mut field_infos = Vec::new();
    for (index, f) in fields.iter().enumerate() {
        // Named fields keep their identifier, tuple fields use their position
        let (access, field_str) = match &f.ident {
            Some(ident) => (quote! { #ident }, ident.to_string()),
            None => {
                let idx = syn::Index::from(index);
                (quote! { #idx }, index.to_string())
            }
        };
        let ty = &f.ty;

        let visibility = match f.vis {
            Visibility::Public(_) => quote! { ::lister_core::ecs::reflect::Visibility::Public },
            _ => quote! { ::lister_core::ecs::reflect::Visibility::NonPublic },
        };
        let hidden = has_flag(&f.attrs, "hidden")?;

        field_infos.push(quote! {
            <#ty as ::lister_core::ecs::reflect::ReflectField>::field_info(
                &self.#access,
                #field_str,
                #visibility,
            )
            .with_hidden(#hidden)
        });
    }

    Ok(quote! {
        fn reflect_ref(&self) -> ::lister_core::ecs::reflect::ReflectRef<'_> {
            ::lister_core::ecs::reflect::ReflectRef::Composite(self)
        }

        fn fields(
            &self,
        ) -> ::std::result::Result<
            ::std::vec::Vec<::lister_core::ecs::reflect::FieldInfo<'_>>,
            ::lister_core::ecs::reflect::ReflectError,
        > {
            ::std::result::Result::Ok(vec![
                #(#field_infos),*
            ])
        }
    })
}

fn enum_body(name: &Ident, data: &DataEnum) -> syn::Result<TokenStream2> {
    let mut arms = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Reflect can only be derived for enums with unit variants",
            ));
        }
        let ident = &variant.ident;
        let label = ident.to_string();
        arms.push(quote! {
            #name::#ident => ::lister_core::ecs::reflect::ReflectRef::Primitive(&#label)
        });
    }

    // An empty enum has no values to render
    let matched = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#arms),* } }
    };

    Ok(quote! {
        fn reflect_ref(&self) -> ::lister_core::ecs::reflect::ReflectRef<'_> {
            #matched
        }
    })
}

/// Returns `true` if `#[reflect(flag)]` appears in `attrs`.
/// Unknown keys inside `#[reflect(...)]` are reported as errors.
fn has_flag(attrs: &[Attribute], flag: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("hidden") || meta.path.is_ident("sealed") {
                if meta.path.is_ident(flag) {
                    found = true;
                }
                Ok(())
            } else {
                Err(meta.error("expected `hidden` or `sealed`"))
            }
        })?;
    }
    Ok(found)
}
