//! Character encoding detection and transcoding.
//!
//! Career pages arrive as raw bytes from the fetch layer. Many older Korean
//! sites are still served as EUC-KR (often without declaring it), so bytes are
//! decoded before parsing: byte-order mark first, then a `<meta>` charset
//! declaration, then UTF-8 if the bytes are valid UTF-8, else EUC-KR.

use std::sync::LazyLock;

use dom_query::Document;
use encoding_rs::{Encoding, EUC_KR, UTF_8};
use regex::Regex;

use crate::dom;

/// How many leading bytes are searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` and the `http-equiv` content-type form.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// Extract the declared charset label from the start of a document.
fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Detect character encoding from HTML bytes.
///
/// Order: byte-order mark, `<meta>` declaration in the first 1024 bytes,
/// valid UTF-8, and finally EUC-KR.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    if let Some(encoding) = declared_charset(&head).and_then(|c| Encoding::for_label(c.as_bytes())) {
        return encoding;
    }

    if std::str::from_utf8(html).is_ok() {
        UTF_8
    } else {
        EUC_KR
    }
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Undecodable sequences become U+FFFD; this never fails.
///
/// # Examples
///
/// ```
/// use job_selector::encoding::transcode_to_utf8;
///
/// let html = b"<html><body><a href=\"/1\">\xb0\xb3\xb9\xdf\xc0\xda</a></body></html>";
/// assert!(transcode_to_utf8(html).contains("개발자"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced undecodable bytes");
    }
    decoded.into_owned()
}

/// Decode and parse raw HTML bytes.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Document {
    dom::parse(&transcode_to_utf8(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    // "개발자 채용" in EUC-KR
    const EUC_KR_TITLE: &[u8] = b"\xb0\xb3\xb9\xdf\xc0\xda \xc3\xa4\xbf\xeb";

    fn page(head: &[u8], body: &[u8]) -> Vec<u8> {
        let mut html = b"<html><head>".to_vec();
        html.extend_from_slice(head);
        html.extend_from_slice(b"</head><body>");
        html.extend_from_slice(body);
        html.extend_from_slice(b"</body></html>");
        html
    }

    #[test]
    fn declared_euc_kr_is_decoded() {
        let html = page(br#"<meta charset="euc-kr">"#, EUC_KR_TITLE);
        assert_eq!(detect_encoding(&html), EUC_KR);
        assert!(transcode_to_utf8(&html).contains("개발자 채용"));
    }

    #[test]
    fn content_type_declaration_is_honoured() {
        let html = page(
            br#"<meta http-equiv="Content-Type" content="text/html; charset=ks_c_5601-1987">"#,
            EUC_KR_TITLE,
        );
        assert_eq!(detect_encoding(&html), EUC_KR);
    }

    #[test]
    fn undeclared_invalid_utf8_falls_back_to_euc_kr() {
        let html = page(b"", EUC_KR_TITLE);
        assert_eq!(detect_encoding(&html), EUC_KR);
    }

    #[test]
    fn undeclared_utf8_stays_utf8() {
        let html = page(b"", "백엔드 개발자".as_bytes());
        assert_eq!(detect_encoding(&html), UTF_8);
        assert!(transcode_to_utf8(&html).contains("백엔드 개발자"));
    }

    #[test]
    fn bom_wins_over_declaration() {
        let mut html = b"\xEF\xBB\xBF".to_vec();
        html.extend(page(br#"<meta charset="euc-kr">"#, "채용".as_bytes()));
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn parse_bytes_yields_decoded_text() {
        let html = page(br#"<meta charset="euc-kr">"#, EUC_KR_TITLE);
        let doc = parse_bytes(&html);
        assert_eq!(dom::stripped_text(&doc.select("body")), "개발자 채용");
    }

    #[test]
    fn declared_charset_is_case_insensitive() {
        assert_eq!(declared_charset(r#"<META CHARSET="UTF-8">"#), Some("UTF-8"));
        assert_eq!(declared_charset("<meta charset=euc-kr>"), Some("euc-kr"));
        assert_eq!(declared_charset("<meta name=x>"), None);
    }
}
