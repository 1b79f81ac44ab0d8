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

//! Utility functions for HTML escaping. Only useful when building your own
//! HTML renderer.

#![forbid(unsafe_code)]

use std::fmt::{self, Arguments};
use std::io::{self, Write};

/// Writer adaptor for a `std::fmt::Write` sink.
#[derive(Debug)]
pub struct FmtWriter<W>(pub W);

/// Writer adaptor for a `std::io::Write` sink.
#[derive(Debug)]
pub struct IoWriter<W>(pub W);

/// Trait for types that can receive escaped output.
///
/// This is implemented directly for `String`, where writes cannot fail, and
/// through [`FmtWriter`] and [`IoWriter`] for the standard writer traits.
pub trait StrWrite {
    type Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error>;

    fn write_fmt(&mut self, args: Arguments) -> Result<(), Self::Error>;
}

impl StrWrite for String {
    type Error = std::convert::Infallible;

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.push_str(s);
        Ok(())
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments) -> Result<(), Self::Error> {
        // writing to a String never fails
        let _ = fmt::Write::write_fmt(self, args);
        Ok(())
    }
}

impl<W> StrWrite for FmtWriter<W>
where
    W: fmt::Write,
{
    type Error = fmt::Error;

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.write_str(s)
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments) -> Result<(), Self::Error> {
        self.0.write_fmt(args)
    }
}

impl<W> StrWrite for IoWriter<W>
where
    W: Write,
{
    type Error = io::Error;

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.write_all(s.as_bytes())
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments) -> Result<(), Self::Error> {
        self.0.write_fmt(args)
    }
}

impl<W> StrWrite for &'_ mut W
where
    W: StrWrite,
{
    type Error = W::Error;

    #[inline]
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        (**self).write_str(s)
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments) -> Result<(), Self::Error> {
        (**self).write_fmt(args)
    }
}

static HREF_SAFE: [u8; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 1, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, //
    0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, //
];

static HEX_CHARS: &[u8] = b"0123456789ABCDEF";

/// Writes an URL to the output, percent-encoding any byte that is not safe
/// inside an href attribute. `&` and `'` are written as entities so the
/// result can be embedded in HTML directly.
pub fn escape_href<W>(mut w: W, s: &str) -> Result<(), W::Error>
where
    W: StrWrite,
{
    let bytes = s.as_bytes();
    let mut mark = 0;
    for i in 0..bytes.len() {
        let c = bytes[i];
        if c >= 0x80 || HREF_SAFE[c as usize] == 0 {
            // character needing escape

            // write partial substring up to mark
            if mark < i {
                w.write_str(&s[mark..i])?;
            }
            match c {
                b'&' => w.write_str("&amp;")?,
                b'\'' => w.write_str("&#x27;")?,
                _ => {
                    let buf = [
                        b'%',
                        HEX_CHARS[(c as usize) >> 4],
                        HEX_CHARS[(c as usize) & 0xF],
                    ];
                    let encoded = std::str::from_utf8(&buf).unwrap_or("");
                    w.write_str(encoded)?;
                }
            }
            mark = i + 1; // all escaped characters are ASCII
        }
    }
    w.write_str(&s[mark..])
}

// The OWASP escape set: & < > " ' /
static HTML_ESCAPE_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'"' as usize] = 1;
    table[b'&' as usize] = 2;
    table[b'\'' as usize] = 3;
    table[b'/' as usize] = 4;
    table[b'<' as usize] = 5;
    table[b'>' as usize] = 6;
    table
};

static HTML_ESCAPES: [&str; 7] = ["", "&quot;", "&amp;", "&#x27;", "&#x2F;", "&lt;", "&gt;"];

/// Writes the given string to the output, replacing `&`, `<`, `>`, `"`, `'`
/// and `/` with their entity forms. Suitable for attribute values and any
/// other context where the full OWASP set is wanted.
pub fn escape_html<W: StrWrite>(w: W, s: &str) -> Result<(), W::Error> {
    escape_html_scan(w, s, |entity| entity != 0)
}

/// Writes the given string to the output, replacing only `&`, `<` and `>`.
///
/// Quotes and slashes are harmless in HTML body text, and escaping them
/// everywhere bloats the output.
pub fn escape_html_body_text<W: StrWrite>(w: W, s: &str) -> Result<(), W::Error> {
    escape_html_scan(w, s, |entity| matches!(entity, 2 | 5 | 6))
}

fn escape_html_scan<W, F>(mut w: W, s: &str, escaped: F) -> Result<(), W::Error>
where
    W: StrWrite,
    F: Fn(u8) -> bool,
{
    let bytes = s.as_bytes();
    let mut mark = 0;
    for i in 0..bytes.len() {
        let entity = HTML_ESCAPE_TABLE[bytes[i] as usize];
        if escaped(entity) {
            if mark < i {
                w.write_str(&s[mark..i])?;
            }
            w.write_str(HTML_ESCAPES[entity as usize])?;
            mark = i + 1; // all escaped characters are ASCII
        }
    }
    w.write_str(&s[mark..])
}

#[cfg(test)]
mod test {
    use super::*;

    fn html(s: &str) -> String {
        let mut out = String::new();
        let _ = escape_html(&mut out, s);
        out
    }

    fn body(s: &str) -> String {
        let mut out = String::new();
        let _ = escape_html_body_text(&mut out, s);
        out
    }

    fn href(s: &str) -> String {
        let mut out = String::new();
        let _ = escape_href(&mut out, s);
        out
    }

    #[test]
    fn owasp_set() {
        assert_eq!(
            html(r#"<a href="x" onclick='y'>&/</a>"#),
            "&lt;a href=&quot;x&quot; onclick=&#x27;y&#x27;&gt;&amp;&#x2F;&lt;&#x2F;a&gt;"
        );
    }

    #[test]
    fn body_text_leaves_quotes() {
        assert_eq!(body(r#"a < b & "c" / 'd'"#), "a &lt; b &amp; \"c\" / 'd'");
    }

    #[test]
    fn no_escapes_is_passthrough() {
        assert_eq!(html("plain text"), "plain text");
        assert_eq!(href("http://example.com/a-b_c"), "http://example.com/a-b_c");
    }

    #[test]
    fn href_percent_encoding() {
        assert_eq!(href("http://a/b c"), "http://a/b%20c");
        assert_eq!(href("http://a/`x`"), "http://a/%60x%60");
        assert_eq!(href("q&a'"), "q&amp;a&#x27;");
    }

    #[test]
    fn href_unicode() {
        assert_eq!(href("héllo"), "h%C3%A9llo");
    }

    #[test]
    fn fmt_writer_propagates() {
        let mut out = String::new();
        escape_html(FmtWriter(&mut out), "<x>").unwrap();
        assert_eq!(out, "&lt;x&gt;");
    }
}
