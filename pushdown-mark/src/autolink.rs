// Copyright 2015 Google Inc. All rights reserved.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Recognition of bare URLs, email addresses and `www.` domains embedded in
//! prose, including the boundary trimming that decides where a link really
//! ends.

use crate::scanners::is_space;

/// Whether a candidate destination is safe to turn into a link: it must
/// carry one of the allowed scheme prefixes, immediately followed by an
/// alphanumeric character.
pub(crate) fn is_safe(link: &str) -> bool {
    const VALID_URIS: [&str; 5] = ["/", "http://", "https://", "ftp://", "mailto:"];

    let bytes = link.as_bytes();
    VALID_URIS.iter().any(|scheme| {
        link.len() > scheme.len()
            && link[..scheme.len()].eq_ignore_ascii_case(scheme)
            && bytes[scheme.len()].is_ascii_alphanumeric()
    })
}

/// Computes the true end of a bare link: trailing `?!.,` are prose
/// punctuation, a trailing `;` may close an entity reference, and a final
/// unbalanced closing bracket belongs to the surrounding text.
/// Already-trimmed candidates come back unchanged.
pub(crate) fn autolink_delim(data: &[u8], mut link_end: usize) -> usize {
    for (i, &b) in data.iter().take(link_end).enumerate() {
        if b == b'<' {
            link_end = i;
            break;
        }
    }

    while link_end > 0 {
        let c = data[link_end - 1];
        if matches!(c, b'?' | b'!' | b'.' | b',') {
            link_end -= 1;
        } else if c == b';' && link_end >= 2 {
            // a trailing entity reference is dropped whole, a lone
            // semicolon is ordinary punctuation
            let mut new_end = link_end - 2;
            while new_end > 0 && data[new_end].is_ascii_alphabetic() {
                new_end -= 1;
            }
            if new_end < link_end - 2 && data[new_end] == b'&' {
                link_end = new_end;
            } else {
                link_end -= 1;
            }
        } else if c == b';' {
            link_end -= 1;
        } else {
            break;
        }
    }

    if link_end == 0 {
        return 0;
    }

    let cclose = data[link_end - 1];
    let copen = match cclose {
        b'"' => b'"',
        b'\'' => b'\'',
        b')' => b'(',
        b']' => b'[',
        b'}' => b'{',
        _ => 0,
    };

    if copen != 0 {
        // if the final punctuation closes outside the URL it is not part
        // of the URL; if it closes inside, it is
        let mut opening = 0;
        let mut closing = 0;
        for &b in data.iter().take(link_end) {
            if b == copen {
                opening += 1;
            } else if b == cclose {
                closing += 1;
            }
        }
        if closing != opening {
            link_end -= 1;
        }
    }

    link_end
}

// valid hostname characters, requiring at least one dot
fn check_domain(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || !bytes[0].is_ascii_alphanumeric() {
        return None;
    }
    let mut np = 0;
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'.' {
            np += 1;
        } else if !bytes[i].is_ascii_alphanumeric() && bytes[i] != b'-' {
            break;
        }
        i += 1;
    }
    if np > 0 {
        Some(i)
    } else {
        None
    }
}

/// Called on a `:`. Rewinds over the scheme already scanned as literal
/// text, validates it, and finds the link's end. Returns the rewind length
/// and the length of the link from the trigger position.
pub(crate) fn url(data: &str, pos: usize) -> Option<(usize, usize)> {
    let bytes = data.as_bytes();
    if bytes.len() - pos < 4 || bytes[pos + 1] != b'/' || bytes[pos + 2] != b'/' {
        return None;
    }

    let mut rewind = 0;
    while rewind < pos && bytes[pos - rewind - 1].is_ascii_alphabetic() {
        rewind += 1;
    }
    if !is_safe(&data[pos - rewind..]) {
        return None;
    }

    let mut link_end = 3; // "://"
    link_end += check_domain(&bytes[pos + link_end..])?;
    while pos + link_end < bytes.len() && !is_space(bytes[pos + link_end]) {
        link_end += 1;
    }

    let link_end = autolink_delim(&bytes[pos..], link_end);
    if link_end == 0 {
        return None;
    }
    Some((rewind, link_end))
}

/// Called on a `@`. Rewinds over the local part, scans the domain, and
/// trims the boundary. Returns the rewind length and the length of the
/// link from the trigger position.
pub(crate) fn email(data: &str, pos: usize) -> Option<(usize, usize)> {
    let bytes = data.as_bytes();

    let mut rewind = 0;
    while rewind < pos {
        let c = bytes[pos - rewind - 1];
        if c.is_ascii_alphanumeric() || matches!(c, b'.' | b'+' | b'-' | b'_') {
            rewind += 1;
        } else {
            break;
        }
    }
    if rewind == 0 {
        return None;
    }

    let size = bytes.len() - pos;
    let mut link_end = 0;
    let mut nb = 0;
    let mut np = 0;
    while link_end < size {
        let c = bytes[pos + link_end];
        if c.is_ascii_alphanumeric() {
            // part of the domain
        } else if c == b'@' {
            nb += 1;
        } else if c == b'.' && link_end < size - 1 {
            np += 1;
        } else if c != b'-' && c != b'_' {
            break;
        }
        link_end += 1;
    }
    if link_end < 2 || nb != 1 || np == 0 {
        return None;
    }

    let link_end = autolink_delim(&bytes[pos..], link_end);
    if link_end == 0 {
        return None;
    }
    Some((rewind, link_end))
}

/// Called on a `w`. Requires a `www.`-prefixed domain sitting on a word
/// boundary. Returns the length of the link from the trigger position.
pub(crate) fn www(data: &str, pos: usize) -> Option<usize> {
    let bytes = data.as_bytes();
    if pos > 0 {
        let prev = bytes[pos - 1];
        if !prev.is_ascii_punctuation() && !is_space(prev) {
            return None;
        }
    }
    let rem = &bytes[pos..];
    if !rem.starts_with(b"www.") {
        return None;
    }
    let mut link_end = check_domain(rem)?;
    while link_end < rem.len() && !is_space(rem[link_end]) {
        link_end += 1;
    }
    let link_end = autolink_delim(rem, link_end);
    if link_end == 0 {
        return None;
    }
    Some(link_end)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn safe_schemes() {
        assert!(is_safe("http://example.com"));
        assert!(is_safe("HTTPS://example.com"));
        assert!(is_safe("ftp://host"));
        assert!(is_safe("mailto:someone"));
        assert!(is_safe("/relative"));
        assert!(!is_safe("javascript:alert(1)"));
        assert!(!is_safe("http://"));
        assert!(!is_safe("http:///path"));
    }

    fn delim(s: &str) -> &str {
        let end = autolink_delim(s.as_bytes(), s.len());
        &s[..end]
    }

    #[test]
    fn trailing_punctuation_is_stripped() {
        assert_eq!(delim("http://x.com."), "http://x.com");
        assert_eq!(delim("http://x.com?!"), "http://x.com");
        assert_eq!(delim("http://x.com,"), "http://x.com");
    }

    #[test]
    fn trimming_is_idempotent() {
        let once = delim("http://x.com)...");
        assert_eq!(once, delim(once));
        let clean = delim("http://x.com/path");
        assert_eq!(clean, "http://x.com/path");
    }

    #[test]
    fn balanced_parens_are_kept() {
        assert_eq!(delim("http://x.com/(a))"), "http://x.com/(a)");
        assert_eq!(delim("http://x.com)."), "http://x.com");
    }

    #[test]
    fn entity_tails_are_dropped_whole() {
        assert_eq!(delim("http://x.com&amp;"), "http://x.com");
        assert_eq!(delim("http://x.com;"), "http://x.com");
    }

    #[test]
    fn url_rewinds_over_scheme() {
        let text = "see http://x.com/ now";
        let pos = 8; // the ':'
        assert_eq!(text.as_bytes()[pos], b':');
        let (rewind, end) = url(text, pos).expect("autolink");
        assert_eq!(&text[pos - rewind..pos + end], "http://x.com/");
    }

    #[test]
    fn url_requires_host() {
        let text = "oops http:// nothing";
        let pos = 9;
        assert_eq!(text.as_bytes()[pos], b':');
        assert!(url(text, pos).is_none());
    }

    #[test]
    fn email_bounds() {
        let text = "ask a.friend@example.com.";
        let pos = 12; // the '@'
        assert_eq!(text.as_bytes()[pos], b'@');
        let (rewind, end) = email(text, pos).expect("email autolink");
        assert_eq!(&text[pos - rewind..pos + end], "a.friend@example.com");
    }

    #[test]
    fn www_needs_boundary() {
        let text = "go www.example.com now";
        let end = www(text, 3).expect("www autolink");
        assert_eq!(&text[3..3 + end], "www.example.com");
        // inside a word it stays literal
        assert!(www("awww.example.com", 1).is_none());
    }
}
