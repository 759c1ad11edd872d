extern crate proc_macro;

use proc_macro::TokenStream;

mod vectorize;

/// Implements `Vectorize` for a struct with named fields by concatenating the components of each
/// field in declaration order.
///
/// Every field type must itself implement `Vectorize`. The value kind defaults to `Custom` and can
/// be chosen with `#[vectorize(kind = "Point")]`; a fixed-size kind must match the total number of
/// components, which is checked at compile time.
#[proc_macro_derive(Vectorize, attributes(vectorize))]
pub fn derive_vectorize(input: TokenStream) -> TokenStream {
    vectorize::vectorize_impl(input)
}
