//! Expansion of the tree macros into factory calls

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Expr, ExprLit, Lit};

use crate::parsing::TreeInput;

#[derive(Debug, Clone, Copy)]
pub enum TreeKind {
    Field,
    Query,
    Mutation,
}

pub fn expand_tree(kind: TreeKind, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as TreeInput);
    TokenStream::from(generate_tree(kind, &input))
}

fn generate_tree(kind: TreeKind, input: &TreeInput) -> TokenStream2 {
    // An empty literal name can be rejected before the program runs.
    if let Expr::Lit(ExprLit { lit: Lit::Str(name), .. }) = &input.name {
        if name.value().is_empty() {
            return syn::Error::new(name.span(), "field name must not be empty").to_compile_error();
        }
    }

    let factory = match kind {
        TreeKind::Field => quote! { make_field },
        TreeKind::Query => quote! { make_query },
        TreeKind::Mutation => quote! { make_mutation },
    };

    let name = &input.name;
    let specs = &input.specs;
    let keys: Vec<String> = input.arguments.iter().map(|arg| arg.key_string()).collect();
    let values: Vec<&Expr> = input.arguments.iter().map(|arg| &arg.value).collect();

    quote! {
        {
            let __catena_name = #name;
            let __catena_specs: ::std::vec::Vec<::catena_gql::FieldSpec> =
                ::std::vec![#(::catena_gql::FieldSpec::from(#specs)),*];
            let __catena_arguments: ::std::vec::Vec<(&'static str, ::catena_gql::Literal)> =
                ::std::vec![#((#keys, ::catena_gql::Literal::from(#values))),*];
            ::catena_gql::#factory(__catena_name, __catena_specs, __catena_arguments)
        }
    }
}
