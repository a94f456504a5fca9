//! Attribute parsing for `#[endpoint(...)]`.

use std::time::Duration;

use syn::{Ident, LitStr, Type};

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Variant name of `courier::Method` for code generation.
    #[must_use]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
        }
    }

    /// Parse an HTTP method from a string (case-insensitive).
    #[must_use]
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Result format named by `format = "..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Raw,
}

impl Format {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "Json",
            Self::Raw => "Raw",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(Self::Json),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Date strategy named by `date_strategy = "..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateStrategy {
    Deferred,
    SecondsSince1970,
    MillisecondsSince1970,
    Iso8601,
}

impl DateStrategy {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Deferred => "Deferred",
            Self::SecondsSince1970 => "SecondsSince1970",
            Self::MillisecondsSince1970 => "MillisecondsSince1970",
            Self::Iso8601 => "Iso8601",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "deferred" => Some(Self::Deferred),
            "seconds" => Some(Self::SecondsSince1970),
            "milliseconds" => Some(Self::MillisecondsSince1970),
            "iso8601" => Some(Self::Iso8601),
            _ => None,
        }
    }
}

/// Everything declared in the `#[endpoint(...)]` attributes of a type.
#[derive(Debug, Clone)]
pub(crate) struct EndpointOptions {
    pub(crate) method: HttpMethod,
    pub(crate) base_url: Option<LitStr>,
    pub(crate) path: Option<LitStr>,
    pub(crate) url: Option<LitStr>,
    pub(crate) response: Option<Type>,
    pub(crate) format: Option<Format>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) date_strategy: Option<DateStrategy>,
    pub(crate) pre_encoded: Option<Ident>,
    pub(crate) encodable: bool,
    pub(crate) intercept: bool,
    pub(crate) sign: bool,
    pub(crate) publish: bool,
}

#[derive(Default)]
struct PartialOptions {
    method: Option<HttpMethod>,
    base_url: Option<LitStr>,
    path: Option<LitStr>,
    url: Option<LitStr>,
    response: Option<Type>,
    format: Option<Format>,
    timeout: Option<Duration>,
    date_strategy: Option<DateStrategy>,
    pre_encoded: Option<Ident>,
    encodable: bool,
    intercept: bool,
    sign: bool,
    publish: bool,
}

/// Parse every `#[endpoint(...)]` attribute of the derive input.
pub(crate) fn parse_endpoint_options(
    input: &syn::DeriveInput,
) -> syn::Result<EndpointOptions> {
    let mut options = PartialOptions::default();
    let mut seen = false;

    for attr in &input.attrs {
        if !attr.path().is_ident("endpoint") {
            continue;
        }
        seen = true;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("method") {
                let value: LitStr = meta.value()?.parse()?;
                let method = HttpMethod::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        "unsupported method. Expected one of: GET, POST, PUT, PATCH, DELETE",
                    )
                })?;
                options.method = Some(method);
            } else if meta.path.is_ident("base_url") {
                options.base_url = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("path") {
                options.path = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("url") {
                let value: LitStr = meta.value()?.parse()?;
                if let Err(e) = url::Url::parse(&value.value()) {
                    return Err(syn::Error::new_spanned(&value, format!("invalid URL: {e}")));
                }
                options.url = Some(value);
            } else if meta.path.is_ident("response") {
                options.response = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("format") {
                let value: LitStr = meta.value()?.parse()?;
                let format = Format::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(&value, "unknown format. Expected \"json\" or \"raw\"")
                })?;
                options.format = Some(format);
            } else if meta.path.is_ident("timeout") {
                options.timeout = Some(parse_timeout(&meta.value()?.parse()?)?);
            } else if meta.path.is_ident("date_strategy") {
                let value: LitStr = meta.value()?.parse()?;
                let strategy = DateStrategy::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        "unknown date strategy. Expected one of: deferred, seconds, milliseconds, iso8601",
                    )
                })?;
                options.date_strategy = Some(strategy);
            } else if meta.path.is_ident("pre_encoded") {
                let value: LitStr = meta.value()?.parse()?;
                options.pre_encoded = Some(value.parse()?);
            } else if meta.path.is_ident("encodable") {
                options.encodable = true;
            } else if meta.path.is_ident("intercept") {
                options.intercept = true;
            } else if meta.path.is_ident("sign") {
                options.sign = true;
            } else if meta.path.is_ident("publish") {
                options.publish = true;
            } else {
                return Err(meta.error("unknown endpoint attribute"));
            }
            Ok(())
        })?;
    }

    if !seen {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "missing #[endpoint(method = \"...\")] attribute",
        ));
    }

    let method = options.method.ok_or_else(|| {
        syn::Error::new_spanned(&input.ident, "missing `method` in #[endpoint(...)]")
    })?;

    Ok(EndpointOptions {
        method,
        base_url: options.base_url,
        path: options.path,
        url: options.url,
        response: options.response,
        format: options.format,
        timeout: options.timeout,
        date_strategy: options.date_strategy,
        pre_encoded: options.pre_encoded,
        encodable: options.encodable,
        intercept: options.intercept,
        sign: options.sign,
        publish: options.publish,
    })
}

/// Parse `timeout = 30` (seconds) or `timeout = "500ms"`.
fn parse_timeout(lit: &syn::Lit) -> syn::Result<Duration> {
    match lit {
        syn::Lit::Int(lit_int) => Ok(Duration::from_secs(lit_int.base10_parse()?)),
        syn::Lit::Str(lit_str) => parse_duration_string(&lit_str.value()).ok_or_else(|| {
            syn::Error::new_spanned(
                lit_str,
                "invalid duration format. Expected: \"30s\", \"1m\", \"500ms\"",
            )
        }),
        other => Err(syn::Error::new_spanned(
            other,
            "expected duration string like \"30s\" or a number of seconds",
        )),
    }
}

/// Parse a duration string like "30s", "1m", "500ms".
fn parse_duration_string(s: &str) -> Option<Duration> {
    let s = s.trim();

    if let Some(secs) = s.strip_suffix('s') {
        if let Some(millis) = secs.strip_suffix('m') {
            let ms: u64 = millis.parse().ok()?;
            return Some(Duration::from_millis(ms));
        }
        let secs: u64 = secs.parse().ok()?;
        return Some(Duration::from_secs(secs));
    }

    if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().ok()?;
        return Some(Duration::from_secs(mins * 60));
    }

    None
}

/// Split a path template into a format string and its placeholder names.
///
/// `/users/{id}/posts/{post_id}` gives `("/users/{}/posts/{}", ["id", "post_id"])`.
#[must_use]
pub(crate) fn split_path_template(path: &str) -> (String, Vec<String>) {
    let mut format = String::with_capacity(path.len());
    let mut placeholders = Vec::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut name = String::new();
                for next in chars.by_ref() {
                    if next == '}' {
                        break;
                    }
                    name.push(next);
                }
                if name.is_empty() {
                    format.push_str("{{}}");
                } else {
                    format.push_str("{}");
                    placeholders.push(name);
                }
            }
            '}' => format.push_str("}}"),
            c => format.push(c),
        }
    }
    (format, placeholders)
}
