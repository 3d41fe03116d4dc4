//! `#[stack_trace_debug]`: replaces the derived `Debug` impl on a
//! `snafu`-derived error enum with one that prints the `Display` message
//! followed by the full `source()` chain, one frame per line.
//!
//! `snafu`'s default `Debug` is the autogenerated struct-dump, which is
//! unreadable once an error enum grows `#[snafu(implicit)] location:
//! Location` fields on every variant. Error values in this workspace are
//! almost always logged via `{:?}` (`tracing::error!(?err, ...)`), so the
//! `Debug` impl is the one that matters for operators.

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn stack_trace_debug(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::std::fmt::Debug for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{self}")?;
                let mut source = ::std::error::Error::source(self);
                let mut index = 0usize;
                while let Some(err) = source {
                    if index == 0 {
                        write!(f, "\n\nCaused by:")?;
                    }
                    write!(f, "\n  {index}: {err}")?;
                    source = err.source();
                    index += 1;
                }
                Ok(())
            }
        }
    };
    expanded.into()
}
