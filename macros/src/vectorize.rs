use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{
    parse2, parse_macro_input, spanned::Spanned, Attribute, Data, DeriveInput, Error, Fields, Lit,
    Meta, Path, Result, Token,
};

const KINDS: [&str; 9] = [
    "Scalar",
    "Point",
    "Size",
    "Rect",
    "Color",
    "Vector3",
    "Rotation",
    "Transform",
    "Custom",
];

pub fn vectorize_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_vectorize(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_vectorize(input: DeriveInput) -> Result<TokenStream2> {
    let DeriveInput {
        ident: name,
        data,
        generics,
        attrs,
        vis: _vis,
    } = input;
    if !generics.params.is_empty() {
        return Err(Error::new(
            generics.span(),
            "derive(Vectorize) does not support generic types.",
        ));
    }
    let Data::Struct(struct_data) = data else {
        return Err(Error::new(
            Span::call_site(),
            "derive(Vectorize) requires a struct type.",
        ));
    };
    let Fields::Named(fields) = struct_data.fields else {
        return Err(Error::new(
            struct_data.fields.span(),
            "derive(Vectorize) requires a struct with named fields.",
        ));
    };
    let kind = parse_kind(&attrs)?;

    let field_names = fields
        .named
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .collect::<Vec<_>>();
    let field_types = fields.named.iter().map(|f| &f.ty).collect::<Vec<_>>();

    let reads = field_names.iter().zip(&field_types).map(|(field_name, ty)| {
        quote! {
            let #field_name = {
                let count = <#ty as ::kinetic::Vectorize>::COMPONENTS;
                let value = <#ty as ::kinetic::Vectorize>::read_components(
                    &__components[__offset..__offset + count]
                );
                __offset += count;
                value
            };
        }
    });
    let assert_message = format!(
        "derive(Vectorize): the fields of {name} do not add up to the component count of {kind}"
    );

    Ok(quote! {
        impl ::kinetic::Vectorize for #name {
            const KIND: ::kinetic::ValueKind = ::kinetic::ValueKind::#kind;
            const COMPONENTS: usize = 0 #(+ <#field_types as ::kinetic::Vectorize>::COMPONENTS)*;

            fn write_components(&self, out: &mut ::kinetic::Components) {
                #(::kinetic::Vectorize::write_components(&self.#field_names, out);)*
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn read_components(__components: &[f32]) -> Self {
                let mut __offset = 0usize;
                #(#reads)*
                Self { #(#field_names),* }
            }
        }

        const _: () = {
            let expected = ::kinetic::ValueKind::#kind.fixed_components();
            let actual = <#name as ::kinetic::Vectorize>::COMPONENTS;
            assert!(
                match expected {
                    ::std::option::Option::Some(expected) => expected == actual,
                    ::std::option::Option::None => true,
                },
                #assert_message
            );
        };
    })
}

fn parse_kind(attrs: &[Attribute]) -> Result<Ident> {
    let mut kind = format_ident!("Custom");
    for attr in attrs {
        let Meta::List(ref list) = attr.meta else {
            continue;
        };
        if !is_simple_path(&list.path, "vectorize") {
            continue;
        }
        let parsed_attr = parse2::<VectorizeAttributeInput>(list.tokens.clone())?;
        let attr_name = parsed_attr.name.to_string();
        match attr_name.as_str() {
            "kind" => {
                let Lit::Str(value) = parsed_attr.value else {
                    return Err(Error::new(
                        parsed_attr.span,
                        "Expected value of 'kind' attribute to be a string.",
                    ));
                };
                let kind_name = value.value();
                if !KINDS.contains(&kind_name.as_str()) {
                    return Err(Error::new(
                        value.span(),
                        format!(
                            "Unknown value kind: {kind_name}. Expected one of: {}",
                            KINDS.join(", ")
                        ),
                    ));
                }
                kind = Ident::new(&kind_name, value.span());
            }
            _ => {
                return Err(Error::new(
                    list.span(),
                    format!("Unrecognized vectorize attribute: {attr_name}"),
                ))
            }
        }
    }
    Ok(kind)
}

fn is_simple_path<'a>(path: &Path, name: impl Into<&'a str>) -> bool {
    path.segments.len() == 1
        && path.segments[0].arguments.is_none()
        && path.segments[0].ident == name.into()
}

#[cfg_attr(feature = "parse-debug", derive(Debug))]
struct VectorizeAttributeInput {
    span: Span,
    name: Ident,
    _separator: Token![=],
    value: Lit,
}

impl Parse for VectorizeAttributeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            span: input.span(),
            name: input.parse()?,
            _separator: input.parse()?,
            value: input.parse()?,
        })
    }
}
