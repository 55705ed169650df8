use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, Token, Type, parenthesized};

/// A declared constructor.
///
/// Format: `fn_name(param: Type [= default], ...)`
pub(crate) struct ConstructorDef {
    pub name: Ident,
    pub params: Vec<ParamDef>,
}

/// Format: `name: Type [= default]`
pub(crate) struct ParamDef {
    pub name: Ident,
    pub ty: Type,
    pub default: Option<Expr>,
}

impl Parse for ConstructorDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        let content;
        parenthesized!(content in input);
        let params = Punctuated::<ParamDef, Token![,]>::parse_terminated(&content)?;

        let params: Vec<ParamDef> = params.into_iter().collect();
        // Parameters bind to members by name ignoring case.
        let names: Vec<String> = params
            .iter()
            .map(|param| param.name.unraw().to_string().to_lowercase())
            .collect();
        for (index, param) in params.iter().enumerate() {
            if names[..index].contains(&names[index]) {
                return Err(syn::Error::new(
                    param.name.span(),
                    "duplicate parameter, names are compared ignoring case",
                ));
            }
        }
        Ok(Self { name, params })
    }
}

impl Parse for ParamDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;
        let default = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(Self { name, ty, default })
    }
}

#[cfg(test)]
mod tests {
    use super::ConstructorDef;

    #[test]
    fn parses_parameters_and_defaults() {
        let ctor: ConstructorDef =
            syn::parse_str(r#"new(code: String, weight: u32 = 10, note: Option<String>)"#).unwrap();
        assert_eq!(ctor.name, "new");
        let names: Vec<String> = ctor.params.iter().map(|p| p.name.to_string()).collect();
        assert_eq!(names, ["code", "weight", "note"]);
        assert!(ctor.params[1].default.is_some());
        assert!(ctor.params[2].default.is_none());
    }

    #[test]
    fn duplicate_names_differ_only_in_case() {
        assert!(syn::parse_str::<ConstructorDef>("new(a: i32, b: i32)").is_ok());
        assert!(syn::parse_str::<ConstructorDef>("new(a: i32, A: u8)").is_err());
        assert!(syn::parse_str::<ConstructorDef>("new(r#type: i32, TYPE: u8)").is_err());
    }
}
