/// Escape arbitrary text for use in LaTeX running text.
///
/// Works in a single pass over the input, so the braces inserted for
/// `\textbackslash{}` and friends are never escaped a second time.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '$' => out.push_str("\\$"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}

/// Guard escaped text placed right after `\\`, `\item` or an environment
/// opening, where a leading `[` or `*` would be read as an optional argument or
/// star form. TeX skips spaces before looking for either, so they are ignored.
pub fn protect_line_start(escaped: String) -> String {
    if escaped.trim_start().starts_with(['[', '*']) {
        format!("{{}}{escaped}")
    } else {
        escaped
    }
}

/// Harden a user supplied URL for the target argument of `\href`.
///
/// Returns `None` when nothing usable is left after trimming. Scheme-less
/// input gets `https://`. Characters that could close the argument or start a
/// control sequence are percent-encoded, and `%`/`#` are backslash-escaped the
/// way hyperref expects inside `\href`. A query-string `&` stays raw, which
/// hyperref accepts as long as the link is not inside an alignment.
pub fn sanitize_url(input: &str) -> Option<String> {
    let cleaned: String = input.trim().chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() {
        return None;
    }

    let with_scheme = if has_scheme(&cleaned) {
        cleaned
    } else {
        format!("https://{cleaned}")
    };

    Some(encode_href_target(&with_scheme))
}

/// Build a hardened `mailto:` target, or `None` for a blank address.
pub fn sanitize_mailto(address: &str) -> Option<String> {
    let cleaned: String = address
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .collect();
    let cleaned = strip_prefix_ignore_case(&cleaned, "mailto:").unwrap_or(&cleaned);
    if cleaned.trim().is_empty() {
        return None;
    }
    Some(format!("mailto:{}", encode_href_target(cleaned.trim())))
}

fn has_scheme(url: &str) -> bool {
    if url.contains("://") {
        return true;
    }
    ["mailto:", "tel:"]
        .iter()
        .any(|prefix| strip_prefix_ignore_case(url, prefix).is_some())
}

fn encode_href_target(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '%' => out.push_str("\\%"),
            '#' => out.push_str("\\#"),
            '\\' | '{' | '}' | '^' | '<' | '>' | '"' | '`' => {
                push_percent_encoded(&mut out, ch);
            }
            c if c.is_whitespace() => push_percent_encoded(&mut out, c),
            other => out.push(other),
        }
    }
    out
}

// Percent-encoded bytes carry a literal `%`, which needs the hyperref escape too.
fn push_percent_encoded(out: &mut String, ch: char) {
    let mut buf = [0_u8; 4];
    for byte in ch.encode_utf8(&mut buf).bytes() {
        out.push_str(&format!("\\%{byte:02X}"));
    }
}

pub(crate) fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        value.get(prefix.len()..)
    } else {
        None
    }
}
