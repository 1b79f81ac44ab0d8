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

//! Scanners for fragments of the dialect's syntax

use crate::{AutolinkKind, HeadingLevel};

use memchr::memchr;

// sorted for binary search
static HTML_BLOCK_TAGS: [&str; 22] = [
    "blockquote",
    "del",
    "div",
    "dl",
    "fieldset",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "iframe",
    "ins",
    "math",
    "noscript",
    "ol",
    "p",
    "pre",
    "script",
    "table",
    "ul",
];

/// ASCII whitespace, the structural kind the grammar cares about.
#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// A word boundary for emphasis and quote pairing purposes: whitespace or
/// punctuation. String start/end is handled by callers passing `None`.
#[inline]
pub(crate) fn is_boundary(c: Option<u8>) -> bool {
    match c {
        None => true,
        Some(c) => is_space(c) || c.is_ascii_punctuation(),
    }
}

/// Returns the index just past the end of the line starting at `beg`,
/// including its terminating newline when present.
#[inline]
pub(crate) fn scan_line(data: &str, beg: usize) -> usize {
    match memchr(b'\n', &data.as_bytes()[beg..]) {
        Some(pos) => beg + pos + 1,
        None => data.len(),
    }
}

/// If the text starts with a blank line, returns its length including the
/// newline.
pub(crate) fn scan_empty_line(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i] != b'\n' {
        if bytes[i] != b' ' {
            return None;
        }
        i += 1;
    }
    Some(i + 1)
}

/// Horizontal rule: three or more of the same marker among `*`, `-`, `_`,
/// with nothing but spaces on the line.
pub(crate) fn scan_hrule(data: &str) -> bool {
    let bytes = data.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i + 2 >= bytes.len() || !matches!(bytes[i], b'*' | b'-' | b'_') {
        return false;
    }
    let c = bytes[i];
    let mut n = 0;
    while i < bytes.len() && bytes[i] != b'\n' {
        if bytes[i] == c {
            n += 1;
        } else if bytes[i] != b' ' {
            return false;
        }
        i += 1;
    }
    n >= 3
}

/// Code fence opening or closing line: up to three spaces of indentation,
/// then three or more backticks or tildes. Returns the number of bytes
/// consumed (through the newline) and the info string, which is empty on a
/// closing fence. A fence line carrying anything else than one info token
/// is not a fence.
pub(crate) fn scan_codefence(data: &str) -> Option<(usize, &str)> {
    let bytes = data.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i + 2 >= bytes.len() || !matches!(bytes[i], b'`' | b'~') {
        return None;
    }
    let c = bytes[i];
    let mut n = 0;
    while i < bytes.len() && bytes[i] == c {
        n += 1;
        i += 1;
    }
    if n < 3 {
        return None;
    }
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    let info_start = i;
    while i < bytes.len() && !is_space(bytes[i]) {
        i += 1;
    }
    let info = &data[info_start..i];
    while i < bytes.len() && bytes[i] != b'\n' {
        if bytes[i] != b' ' {
            return None;
        }
        i += 1;
    }
    Some(((i + 1).min(data.len()), info))
}

/// ATX header start. With `space_headers`, the marker run must be followed
/// by a space for the line to count as a header.
pub(crate) fn scan_atx_start(data: &str, space_headers: bool) -> bool {
    let bytes = data.as_bytes();
    if bytes.first() != Some(&b'#') {
        return false;
    }
    if space_headers {
        let mut level = 0;
        while level < bytes.len() && level < 6 && bytes[level] == b'#' {
            level += 1;
        }
        if level < bytes.len() && bytes[level] != b' ' {
            return false;
        }
    }
    true
}

/// Setext underline: a line of `=` (level one) or `-` (level two), followed
/// only by spaces.
pub(crate) fn scan_setext_underline(data: &str) -> Option<HeadingLevel> {
    let bytes = data.as_bytes();
    let c = *bytes.first()?;
    let level = match c {
        b'=' => HeadingLevel::H1,
        b'-' => HeadingLevel::H2,
        _ => return None,
    };
    let mut i = 1;
    while i < bytes.len() && bytes[i] == c {
        i += 1;
    }
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] == b'\n' {
        Some(level)
    } else {
        None
    }
}

/// Block quote marker: up to three spaces, `>`, one optional space.
/// Returns the prefix length.
pub(crate) fn scan_blockquote_prefix(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'>' {
        if i + 1 < bytes.len() && bytes[i + 1] == b' ' {
            Some(i + 2)
        } else {
            Some(i + 1)
        }
    } else {
        None
    }
}

/// Indented code prefix: four spaces before a non-blank line.
pub(crate) fn scan_code_prefix(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    if bytes.len() > 3 && bytes[0] == b' ' && bytes[1] == b' ' && bytes[2] == b' ' && bytes[3] == b' '
    {
        Some(4)
    } else {
        None
    }
}

/// Unordered list item marker: up to three spaces, `*`/`+`/`-`, a space.
/// Returns the prefix length.
pub(crate) fn scan_unordered_prefix(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i + 1 >= bytes.len() || !matches!(bytes[i], b'*' | b'+' | b'-') || bytes[i + 1] != b' ' {
        return None;
    }
    Some(i + 2)
}

/// Ordered list item marker: up to three spaces, digits, `.`, a space.
/// Returns the prefix length.
pub(crate) fn scan_ordered_prefix(data: &str) -> Option<usize> {
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < 3 && i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i >= bytes.len() || !bytes[i].is_ascii_digit() {
        return None;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 >= bytes.len() || bytes[i] != b'.' || bytes[i + 1] != b' ' {
        return None;
    }
    Some(i + 2)
}

/// Looks up the tag word starting at `data` (positioned just after a `<`)
/// in the table of known block-level tag names, case-insensitively.
pub(crate) fn scan_block_tag(data: &str) -> Option<&'static str> {
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    let name = data[..i].to_ascii_lowercase();
    HTML_BLOCK_TAGS
        .binary_search(&name.as_str())
        .ok()
        .map(|ix| HTML_BLOCK_TAGS[ix])
}

/// Scans an angle-bracketed construct at the start of `data`: an HTML tag,
/// an HTML comment, or an autolink (`<http://…>`, `<user@host>`). Returns
/// the total length and the autolink kind when one was recognized.
pub(crate) fn scan_tag(data: &str) -> Option<(usize, Option<AutolinkKind>)> {
    let bytes = data.as_bytes();
    let size = bytes.len();
    // a valid tag can't be shorter than 3 chars
    if size < 3 || bytes[0] != b'<' {
        return None;
    }
    if data.starts_with("<!--") {
        let close = data.find("-->")?;
        return Some((close + 3, None));
    }
    let mut i = if bytes[1] == b'/' { 2 } else { 1 };
    if !bytes[i].is_ascii_alphanumeric() {
        return None;
    }
    // try to find the beginning of an URI
    while i < size
        && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'.' | b'+' | b'-'))
    {
        i += 1;
    }
    if i > 1 && i < size && bytes[i] == b'@' {
        if let Some(j) = scan_mail_end(&bytes[i..]) {
            return Some((i + j, Some(AutolinkKind::Email)));
        }
    }
    if i > 2 && i < size && bytes[i] == b':' {
        i += 1;
        let uri_start = i;
        while i < size {
            match bytes[i] {
                b'\\' => i += 2,
                b'>' | b'\'' | b'"' | b' ' | b'\n' => break,
                _ => i += 1,
            }
        }
        if i >= size {
            return None;
        }
        if i > uri_start && bytes[i] == b'>' {
            return Some((i + 1, Some(AutolinkKind::Url)));
        }
        // a forbidden character interrupted the autolink; fall back to
        // looking for a plain tag end
    }
    while i < size && bytes[i] != b'>' {
        i += 1;
    }
    if i >= size {
        return None;
    }
    Some((i + 1, None))
}

// address is assumed to be: [-@._a-zA-Z0-9]+ with exactly one '@'
fn scan_mail_end(bytes: &[u8]) -> Option<usize> {
    let mut nb = 0;
    for (i, &c) in bytes.iter().enumerate() {
        if c.is_ascii_alphanumeric() {
            continue;
        }
        match c {
            b'@' => nb += 1,
            b'-' | b'.' | b'_' => {}
            b'>' => return if nb == 1 { Some(i + 1) } else { None },
            _ => return None,
        }
    }
    None
}

/// Copies `src` into `ob` dropping the backslash of every escape sequence.
pub(crate) fn unescape_into(ob: &mut String, src: &str) {
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let org = i;
        while i < bytes.len() && bytes[i] != b'\\' {
            i += 1;
        }
        if i > org {
            ob.push_str(&src[org..i]);
        }
        if i + 1 >= bytes.len() {
            if i < bytes.len() {
                ob.push('\\');
            }
            break;
        }
        // the escaped character may be multi-byte
        let rest = &src[i + 1..];
        if let Some(c) = rest.chars().next() {
            ob.push(c);
            i += 1 + c.len_utf8();
        } else {
            break;
        }
    }
}

/// Copies one line into `ob`, expanding tabs to four-column tab stops.
pub(crate) fn expand_tabs(ob: &mut String, line: &str) {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut tab = 0;
    while i < bytes.len() {
        let org = i;
        while i < bytes.len() && bytes[i] != b'\t' {
            i += 1;
            tab += 1;
        }
        if i > org {
            ob.push_str(&line[org..i]);
        }
        if i >= bytes.len() {
            break;
        }
        loop {
            ob.push(' ');
            tab += 1;
            if tab % 4 == 0 {
                break;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hrule_markers() {
        assert!(scan_hrule("***\n"));
        assert!(scan_hrule("  - - -\n"));
        assert!(scan_hrule("___\n"));
        assert!(!scan_hrule("**\n"));
        assert!(!scan_hrule("--a-\n"));
    }

    #[test]
    fn codefence_info() {
        assert_eq!(scan_codefence("```rust\nx"), Some((8, "rust")));
        assert_eq!(scan_codefence("~~~\n"), Some((4, "")));
        assert_eq!(scan_codefence("``` rust extra\n"), None);
        assert_eq!(scan_codefence("``\n"), None);
    }

    #[test]
    fn setext_underlines() {
        assert_eq!(scan_setext_underline("===\n"), Some(HeadingLevel::H1));
        assert_eq!(scan_setext_underline("---  \n"), Some(HeadingLevel::H2));
        assert_eq!(scan_setext_underline("--- x\n"), None);
    }

    #[test]
    fn list_prefixes() {
        assert_eq!(scan_unordered_prefix("- item\n"), Some(2));
        assert_eq!(scan_unordered_prefix("   * item\n"), Some(5));
        assert_eq!(scan_unordered_prefix("-item\n"), None);
        assert_eq!(scan_ordered_prefix("12. item\n"), Some(4));
        assert_eq!(scan_ordered_prefix("12.item\n"), None);
    }

    #[test]
    fn block_tags() {
        assert_eq!(scan_block_tag("div class=\"x\">"), Some("div"));
        assert_eq!(scan_block_tag("DIV>"), Some("div"));
        assert_eq!(scan_block_tag("h3>"), Some("h3"));
        assert_eq!(scan_block_tag("span>"), None);
    }

    #[test]
    fn tags_and_autolinks() {
        assert_eq!(scan_tag("<em>x"), Some((4, None)));
        assert_eq!(scan_tag("</em>"), Some((5, None)));
        assert_eq!(
            scan_tag("<http://a.com>"),
            Some((14, Some(AutolinkKind::Url)))
        );
        assert_eq!(scan_tag("<a@b.c>"), Some((7, Some(AutolinkKind::Email))));
        assert_eq!(scan_tag("<!-- c -->x"), Some((10, None)));
        assert_eq!(scan_tag("< em>"), None);
        assert_eq!(scan_tag("<no end"), None);
    }

    #[test]
    fn unescape() {
        let mut out = String::new();
        unescape_into(&mut out, r"a\*b\\c\");
        assert_eq!(out, r"a*b\c\");
    }

    #[test]
    fn tab_expansion() {
        let mut out = String::new();
        expand_tabs(&mut out, "a\tb");
        assert_eq!(out, "a   b");
        out.clear();
        expand_tabs(&mut out, "\t.");
        assert_eq!(out, "    .");
    }
}
