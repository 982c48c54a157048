use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Expr, ItemFn};

/// Runs an async test against a fresh `crate::helpers::TestApp` bound as `app`,
/// then awaits `app.clean_up()`.
///
/// `#[with_test_app]` uses the default save mode. `#[with_test_app(SaveMode::KeyedByMovie)]`
/// hands the expression to `TestApp::with_save_mode`.
#[proc_macro_attribute]
pub fn with_test_app(attr: TokenStream, item: TokenStream) -> TokenStream {
    let save_mode = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as Expr))
    };
    let func = parse_macro_input!(item as ItemFn);
    if func.sig.asyncness.is_none() {
        return syn::Error::new_spanned(func.sig.fn_token, "#[with_test_app] needs an async fn")
            .to_compile_error()
            .into();
    }

    let name = &func.sig.ident;
    let body = &func.block;
    let attrs = &func.attrs;
    let setup = match save_mode {
        Some(save_mode) => quote! { crate::helpers::TestApp::with_save_mode(#save_mode).await },
        None => quote! { crate::helpers::TestApp::new().await },
    };

    quote! {
        #(#attrs)*
        #[tokio::test]
        async fn #name() {
            let app = #setup;
            #body
            app.clean_up().await;
        }
    }
    .into()
}
