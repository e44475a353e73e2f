//! Parsing for the tree macros

use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr, Ident, Result, Token,
};

/// `name, spec, spec, ...; key = value, ...`
#[derive(Debug)]
pub struct TreeInput {
    pub name: Expr,
    pub specs: Vec<Expr>,
    pub arguments: Vec<ArgumentInput>,
}

impl Parse for TreeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Expr = input.parse()?;

        let mut specs = Vec::new();
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() || input.peek(Token![;]) {
                break;
            }
            specs.push(input.parse()?);
        }

        let mut arguments = Vec::new();
        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
            let parsed = Punctuated::<ArgumentInput, Token![,]>::parse_terminated(input)?;
            arguments.extend(parsed);
        }

        if !input.is_empty() {
            return Err(input.error("expected `,` before a child spec or `;` before arguments"));
        }

        Ok(TreeInput { name, specs, arguments })
    }
}

/// `key = value`; keywords are accepted as keys (`type = ...`)
#[derive(Debug)]
pub struct ArgumentInput {
    pub key: Ident,
    pub value: Expr,
}

impl ArgumentInput {
    pub fn key_string(&self) -> String {
        self.key.unraw().to_string()
    }
}

impl Parse for ArgumentInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = input.call(Ident::parse_any)?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(ArgumentInput { key, value })
    }
}
