use ident_case::RenameRule;
use proc_macro2::{Ident, TokenStream};
use proc_macro_error::abort;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_quote,
    spanned::Spanned,
};

/// Arguments given to the [`crate::predicate`] attribute.
pub struct PredicateArgs {
    expected: syn::Expr,
    name: Option<Ident>,
}

impl Parse for PredicateArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut expected = None;
        let mut name = None;

        loop {
            let key: Ident = input.parse()?;
            let key_str = key.to_string();

            input.parse::<syn::Token![=]>()?;

            match key_str.as_str() {
                "expected" => expected = Some(input.parse()?),
                "name" => name = Some(input.parse()?),
                k => abort!(key, "unknown key `{}`", k),
            }

            if input.is_empty() {
                break;
            }

            input.parse::<syn::Token![,]>()?;
        }

        let expected = match expected {
            Some(expected) => expected,
            None => return Err(input.error("`expected` must be specified")),
        };

        Ok(Self { expected, name })
    }
}

/// Expands the body of the [`crate::predicate`] attribute.
pub fn expand(
    PredicateArgs { expected, name }: PredicateArgs,
    mut fn_item: syn::ItemFn,
) -> TokenStream {
    // Validate function.
    let syn::ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = &mut fn_item;

    if sig.abi.is_some() {
        abort!(sig.abi, "predicate function cannot have an abi specifier");
    }

    if sig.asyncness.is_some() {
        abort!(sig.asyncness, "predicate function cannot be async");
    }

    if sig.unsafety.is_some() {
        abort!(sig.unsafety, "predicate function cannot be unsafe");
    }

    // Compute identifiers.
    let base_name = match name {
        Some(name) => name,
        None => Ident::new(
            &RenameRule::PascalCase.apply_to_field(sig.ident.to_string()),
            sig.ident.span(),
        ),
    };

    let struct_ident = format_ident!("{}Predicate", base_name);
    let struct_doc = syn::LitStr::new(
        &format!(
            "[`Predicate`](emptiness::Predicate) returned by [`{}`].",
            sig.ident
        ),
        sig.span(),
    );

    // Extract and validate value type.
    let value_input = match sig.inputs.pop() {
        Some(last_input) => match last_input.into_value() {
            syn::FnArg::Typed(typed) => typed,
            syn::FnArg::Receiver(r) => {
                abort!(r, "predicate function must take at least one argument")
            }
        },
        None => abort!(
            sig.ident,
            "predicate function must take at least one argument"
        ),
    };
    let value_pat = &*value_input.pat;
    let value_ty = match value_input.ty.as_ref() {
        syn::Type::Reference(syn::TypeReference {
            lifetime: None,
            mutability: None,
            elem,
            ..
        }) => elem.as_ref().clone(),
        t => abort!(
            t,
            "predicate function must take an immutable reference as last parameter"
        ),
    };

    // Validate input types.
    let mut dummy_field_names = Vec::with_capacity(sig.inputs.len());
    let mut predicate_field_tys = Vec::with_capacity(sig.inputs.len());
    let mut pattern_fields = Vec::with_capacity(sig.inputs.len());

    for (i, input) in sig.inputs.iter_mut().enumerate() {
        let typed = match input {
            syn::FnArg::Typed(typed) => typed,
            syn::FnArg::Receiver(r) => abort!(r, "predicate function cannot take a receiver"),
        };
        let dummy_name = format_ident!("v{}", i);
        let dummy_name_pat_ident = syn::PatIdent {
            ident: dummy_name.clone(),
            attrs: Vec::new(),
            by_ref: None,
            mutability: None,
            subpat: None,
        };
        let pat = std::mem::replace(typed.pat.as_mut(), syn::Pat::Ident(dummy_name_pat_ident));

        dummy_field_names.push(dummy_name);
        predicate_field_tys.push((*typed.ty).clone());
        pattern_fields.push(pat);
    }

    let (impl_generics, ty_generics, where_clause) = sig.generics.split_for_impl();

    // Validate and replace return type. The body may answer with a plain
    // `bool` or a full `Satisfiability`.
    let body_ty = match &mut sig.output {
        syn::ReturnType::Type(_, rt) => match rt.as_ref() {
            syn::Type::Path(syn::TypePath { path, .. })
                if path
                    .segments
                    .last()
                    .map(|s| s.ident == "bool" || s.ident == "Satisfiability")
                    .unwrap_or(false) =>
            {
                let body_ty = (**rt).clone();

                *rt.as_mut() = parse_quote! { #struct_ident #ty_generics };

                body_ty
            }
            r => abort!(
                r,
                "predicate function must return a `bool` or `Satisfiability`"
            ),
        },
        syn::ReturnType::Default => abort!(sig.ident, "predicate function must return a value"),
    };

    let describe_expr = crate::helpers::expand_fmt_shorthand(&expected);

    // Build output. Predicates hold no value of the subject type, so the
    // marker is a function pointer to keep them `Send + Sync`.
    let marker_ty = sig.generics.lt_token.is_some().then(|| {
        let params = sig.generics.type_params().map(|x| &x.ident);
        let lts = sig.generics.lifetimes().map(|x| &x.lifetime);

        quote! {
            std::marker::PhantomData<fn() -> (*const #value_ty, #(*const #params,)* #(&#lts (),)*)>,
        }
    });
    let marker_expr = marker_ty
        .is_some()
        .then(|| quote! { std::marker::PhantomData, });

    quote! {
        #[doc = #struct_doc]
        #vis struct #struct_ident #impl_generics(
            #marker_ty
            #( #predicate_field_tys, )*
        ) #where_clause;

        impl #impl_generics emptiness::Predicate<#value_ty> for #struct_ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn satisfies(
                &self,
                __actual_expression: &emptiness::Expression<'_, #value_ty>,
                __failure: &mut emptiness::FailureMessage,
            ) -> emptiness::Satisfiability {
                let Self( #marker_expr #( #pattern_fields, )* ) = self;
                let #value_pat: &#value_ty = match __actual_expression.evaluate() {
                    std::result::Result::Ok(std::option::Option::Some(value)) => value,
                    std::result::Result::Ok(std::option::Option::None) => {
                        return emptiness::Satisfiability::Matches;
                    }
                    std::result::Result::Err(error) => {
                        __failure.record_error(error);

                        return emptiness::Satisfiability::Fail;
                    }
                };

                emptiness::Satisfiability::from((|| -> #body_ty #block)())
            }

            #[allow(unused_variables)]
            fn describe<'d>(&'d self, options: &'d emptiness::DescribeOptions) -> emptiness::Description<'d, Self> {
                emptiness::Description::new(
                    self,
                    options,
                    |Self( #marker_expr #( #pattern_fields, )* ), options, f| {
                        let switch = |if_positive: &'static str, if_negative: &'static str| {
                            if !options.is_negated {
                                if_positive
                            } else {
                                if_negative
                            }
                        };

                        #describe_expr
                    },
                )
            }
        }

        #( #attrs )*
        #vis #sig {
            #struct_ident( #marker_expr #( #dummy_field_names, )* )
        }
    }
}
