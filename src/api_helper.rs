//! URL assembly helpers shared by the controllers and the auth manager.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Position, Url};

use crate::error::{Error, Result};

/// Characters left untouched when a value is substituted into a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Append query parameters in the given order, form-encoding keys and values.
///
/// Parameters whose value is `None` are skipped.
pub fn append_url_with_query_parameters<'a, I>(url: &mut String, parameters: I)
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    for (key, value) in parameters {
        let Some(value) = value else {
            continue;
        };

        url.push(if url.contains('?') { '&' } else { '?' });
        url.extend(form_urlencoded::byte_serialize(key.as_bytes()));
        url.push('=');
        url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
    }
}

/// Replace `{name}` placeholders with percent-encoded values.
pub fn append_url_with_template_parameters(url: &mut String, parameters: &[(&str, &str)]) {
    for (name, value) in parameters {
        let placeholder = format!("{{{name}}}");
        let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
        *url = url.replace(&placeholder, &encoded);
    }
}

/// Validate that the URL is an absolute http(s) URL with a host, collapse
/// repeated slashes in the path and drop a dangling `?`.
pub fn clean_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::Configuration(format!("Invalid URL format: {url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!("Invalid URL format: {url}")));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(Error::Configuration(format!("URL has no host: {url}")));
    }

    let mut cleaned = parsed[..Position::BeforePath].to_string();
    let mut previous_slash = false;
    for c in parsed.path().chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        cleaned.push(c);
    }
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        cleaned.push('?');
        cleaned.push_str(query);
    }

    Ok(cleaned)
}
