//! Code generation for `#[derive(Endpoint)]`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{DeriveInput, Ident, parse2};

use crate::attrs::{EndpointOptions, parse_endpoint_options, split_path_template};

/// Expand the `#[derive(Endpoint)]` macro.
pub fn expand_endpoint_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let options = parse_endpoint_options(&input)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let response = options
        .response
        .as_ref()
        .map_or_else(|| quote! { ::courier::Raw }, |ty| quote! { #ty });
    let method = Ident::new(options.method.as_str(), Span::call_site());

    let items = [
        base_url_fn(&options),
        path_fn(&options)?,
        url_fn(&options),
        timeout_fn(&options),
        format_fn(&options),
        date_fns(&options),
        capability_fns(&options),
    ];

    Ok(quote! {
        impl #impl_generics ::courier::Endpoint for #name #ty_generics #where_clause {
            type Response = #response;

            const METHOD: ::courier::Method = ::courier::Method::#method;

            #(#items)*
        }
    })
}

fn base_url_fn(options: &EndpointOptions) -> TokenStream {
    let Some(base_url) = &options.base_url else {
        return TokenStream::new();
    };
    quote! {
        fn base_url(&self) -> ::std::borrow::Cow<'_, str> {
            ::std::borrow::Cow::Borrowed(#base_url)
        }
    }
}

fn path_fn(options: &EndpointOptions) -> syn::Result<TokenStream> {
    let Some(path) = &options.path else {
        return Ok(TokenStream::new());
    };

    let (format, placeholders) = split_path_template(&path.value());
    if placeholders.is_empty() {
        return Ok(quote! {
            fn path(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(#path)
            }
        });
    }

    let fields = placeholders
        .iter()
        .map(|placeholder| {
            syn::parse_str::<Ident>(placeholder).map_err(|_| {
                syn::Error::new_spanned(
                    path,
                    format!("path placeholder `{{{placeholder}}}` is not a field name"),
                )
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(quote! {
        fn path(&self) -> ::std::borrow::Cow<'_, str> {
            ::std::borrow::Cow::Owned(::std::format!(#format, #(self.#fields),*))
        }
    })
}

fn url_fn(options: &EndpointOptions) -> TokenStream {
    let Some(url) = &options.url else {
        return TokenStream::new();
    };
    // Already validated at expansion time.
    quote! {
        fn url(&self) -> ::std::option::Option<::courier::Url> {
            ::courier::Url::parse(#url).ok()
        }
    }
}

fn timeout_fn(options: &EndpointOptions) -> TokenStream {
    let Some(timeout) = options.timeout else {
        return TokenStream::new();
    };
    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    quote! {
        fn timeout(&self) -> ::std::time::Duration {
            ::std::time::Duration::from_millis(#millis)
        }
    }
}

fn format_fn(options: &EndpointOptions) -> TokenStream {
    let Some(format) = options.format else {
        return TokenStream::new();
    };
    let variant = Ident::new(format.as_str(), Span::call_site());
    quote! {
        fn result_format(&self) -> ::courier::ResultFormat {
            ::courier::ResultFormat::#variant
        }
    }
}

fn date_fns(options: &EndpointOptions) -> TokenStream {
    let Some(strategy) = options.date_strategy else {
        return TokenStream::new();
    };
    let variant = Ident::new(strategy.as_str(), Span::call_site());
    quote! {
        fn date_encoding_strategy(&self) -> ::courier::DateStrategy {
            ::courier::DateStrategy::#variant
        }

        fn date_decoding_strategy(&self) -> ::courier::DateStrategy {
            ::courier::DateStrategy::#variant
        }
    }
}

fn capability_fns(options: &EndpointOptions) -> TokenStream {
    let mut tokens = TokenStream::new();

    if let Some(field) = &options.pre_encoded {
        tokens.extend(quote! {
            fn pre_encoded(&self) -> ::std::option::Option<::courier::Bytes> {
                ::std::option::Option::Some(::std::convert::Into::into(
                    ::std::clone::Clone::clone(&self.#field),
                ))
            }
        });
    }
    if options.encodable {
        tokens.extend(quote! {
            fn encodable(&self) -> ::std::option::Option<&dyn ::courier::EncodeBody> {
                ::std::option::Option::Some(self)
            }
        });
    }
    if options.sign {
        tokens.extend(quote! {
            fn signer(&self) -> ::std::option::Option<&dyn ::courier::Authenticating> {
                ::std::option::Option::Some(self)
            }
        });
    }
    if options.intercept {
        tokens.extend(quote! {
            fn interceptor(&self) -> ::std::option::Option<&dyn ::courier::Interceptable> {
                ::std::option::Option::Some(self)
            }
        });
    }
    if options.publish {
        tokens.extend(quote! {
            fn publisher(&self) -> ::std::option::Option<&dyn ::courier::NotificationPublishable> {
                ::std::option::Option::Some(self)
            }
        });
    }

    tokens
}
