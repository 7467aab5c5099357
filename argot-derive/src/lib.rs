mod choices;
mod decode;

use proc_macro::TokenStream;

/**
Derive `argot::value::Decode` for a fieldless enum. Each variant is accepted
under its kebab-case name (`DryRun` is `dry-run`); anything else is a choice
error listing the accepted names.

- `#[argot(rename = "...")]` on a variant changes the name it's accepted
  under.
- `#[argot(name = "...")]` on the enum changes the type name shown in errors
  and usage messages, which is otherwise the kebab-case enum name.
*/
#[proc_macro_derive(Decode, attributes(argot))]
pub fn derive_decode(item: TokenStream) -> TokenStream {
    match decode::derive_decode_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
