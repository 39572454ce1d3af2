use proc_macro2::TokenStream;
use quote::quote;

/// Expands a formatting expression into a call to `write!()` if applicable,
/// otherwise returns the tokens making up the expression.
pub fn expand_fmt_shorthand(expr: &syn::Expr) -> TokenStream {
    match expr {
        syn::Expr::Lit(l) if matches!(l.lit, syn::Lit::Str(_)) => {
            quote! { std::write!(f, #l) }
        }
        syn::Expr::Tuple(syn::ExprTuple { elems, .. })
            if matches!(
                elems.first(),
                Some(syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(_),
                    ..
                }))
            ) =>
        {
            let elems = elems.iter();

            quote! { std::write!(f, #( #elems, )* ) }
        }
        x => quote! { #x },
    }
}
