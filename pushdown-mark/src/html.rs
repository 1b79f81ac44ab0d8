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

//! HTML renderer for the parser's output interface.

use std::convert::Infallible;

use pushdown_mark_escape::{escape_href, escape_html, escape_html_body_text, StrWrite};

use crate::{Alignment, AutolinkKind, HeadingLevel, ListFlags, Options, Parser, Render};

/// Renders a document to HTML and pushes the result onto `s`.
///
/// # Examples
///
/// ```
/// use pushdown_mark::{html, Options};
///
/// let markdown_str = r#"
/// hello
/// =====
///
/// * alpha
/// * beta
/// "#;
///
/// let mut html_buf = String::new();
/// html::push_html(&mut html_buf, markdown_str, Options::empty());
///
/// assert_eq!(html_buf, r#"<h1>hello</h1>
/// <ul>
/// <li>alpha</li>
/// <li>beta</li>
/// </ul>
/// "#);
/// ```
pub fn push_html(s: &mut String, input: &str, options: Options) {
    let mut renderer = HtmlRenderer::new();
    let parser = Parser::new_ext(&mut renderer, options);
    match parser.render(input) {
        Ok(out) => s.push_str(&out),
        Err(never) => match never {},
    }
}

/// A [`Render`] implementation emitting HTML. Writing to the in-memory
/// output buffer cannot fail, so its error type is [`Infallible`].
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer
    }
}

impl Render for HtmlRenderer {
    type Error = Infallible;

    fn paragraph(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<p>");
        ob.push_str(content);
        ob.push_str("</p>\n");
        Ok(())
    }

    fn header(
        &mut self,
        ob: &mut String,
        content: &str,
        level: HeadingLevel,
    ) -> Result<(), Self::Error> {
        write!(ob, "<{}>", level)?;
        ob.push_str(content);
        write!(ob, "</{}>\n", level)
    }

    fn block_quote(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<blockquote>\n");
        ob.push_str(content);
        ob.push_str("</blockquote>\n");
        Ok(())
    }

    fn block_code(
        &mut self,
        ob: &mut String,
        text: &str,
        info: Option<&str>,
    ) -> Result<(), Self::Error> {
        match info {
            Some(lang) => {
                ob.push_str("<pre><code class=\"language-");
                escape_html(&mut *ob, lang)?;
                ob.push_str("\">");
            }
            None => ob.push_str("<pre><code>"),
        }
        escape_html_body_text(&mut *ob, text)?;
        ob.push_str("</code></pre>\n");
        Ok(())
    }

    fn block_html(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    fn hrule(&mut self, ob: &mut String) -> Result<(), Self::Error> {
        ob.push_str("<hr />\n");
        Ok(())
    }

    fn list(&mut self, ob: &mut String, content: &str, flags: ListFlags) -> Result<(), Self::Error> {
        let tag = if flags.contains(ListFlags::ORDERED) {
            ("<ol>\n", "</ol>\n")
        } else {
            ("<ul>\n", "</ul>\n")
        };
        ob.push_str(tag.0);
        ob.push_str(content);
        ob.push_str(tag.1);
        Ok(())
    }

    fn list_item(
        &mut self,
        ob: &mut String,
        content: &str,
        _flags: ListFlags,
    ) -> Result<(), Self::Error> {
        ob.push_str("<li>");
        ob.push_str(content.trim_end_matches('\n'));
        ob.push_str("</li>\n");
        Ok(())
    }

    fn table(&mut self, ob: &mut String, header: &str, body: &str) -> Result<(), Self::Error> {
        ob.push_str("<table><thead>\n");
        ob.push_str(header);
        ob.push_str("</thead><tbody>\n");
        ob.push_str(body);
        ob.push_str("</tbody></table>\n");
        Ok(())
    }

    fn table_row(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<tr>\n");
        ob.push_str(content);
        ob.push_str("</tr>\n");
        Ok(())
    }

    fn table_cell(
        &mut self,
        ob: &mut String,
        content: &str,
        align: Alignment,
        header: bool,
    ) -> Result<(), Self::Error> {
        let tag = if header { "th" } else { "td" };
        match align {
            Alignment::None => write!(ob, "<{}>", tag)?,
            Alignment::Left => write!(ob, "<{} align=\"left\">", tag)?,
            Alignment::Center => write!(ob, "<{} align=\"center\">", tag)?,
            Alignment::Right => write!(ob, "<{} align=\"right\">", tag)?,
        }
        ob.push_str(content);
        write!(ob, "</{}>\n", tag)
    }

    fn emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<em>");
        ob.push_str(content);
        ob.push_str("</em>");
        Ok(())
    }

    fn double_emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<strong>");
        ob.push_str(content);
        ob.push_str("</strong>");
        Ok(())
    }

    fn strikethrough(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<del>");
        ob.push_str(content);
        ob.push_str("</del>");
        Ok(())
    }

    fn superscript(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str("<sup>");
        ob.push_str(content);
        ob.push_str("</sup>");
        Ok(())
    }

    fn codespan(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str("<code>");
        escape_html_body_text(&mut *ob, text)?;
        ob.push_str("</code>");
        Ok(())
    }

    fn line_break(&mut self, ob: &mut String) -> Result<(), Self::Error> {
        ob.push_str("<br />\n");
        Ok(())
    }

    fn link(
        &mut self,
        ob: &mut String,
        content: &str,
        dest: &str,
        title: Option<&str>,
    ) -> Result<(), Self::Error> {
        ob.push_str("<a href=\"");
        escape_href(&mut *ob, dest)?;
        if let Some(title) = title {
            ob.push_str("\" title=\"");
            escape_html(&mut *ob, title)?;
        }
        ob.push_str("\">");
        ob.push_str(content);
        ob.push_str("</a>");
        Ok(())
    }

    fn image(
        &mut self,
        ob: &mut String,
        dest: &str,
        title: Option<&str>,
        alt: &str,
    ) -> Result<(), Self::Error> {
        ob.push_str("<img src=\"");
        escape_href(&mut *ob, dest)?;
        ob.push_str("\" alt=\"");
        escape_html(&mut *ob, alt)?;
        if let Some(title) = title {
            ob.push_str("\" title=\"");
            escape_html(&mut *ob, title)?;
        }
        ob.push_str("\" />");
        Ok(())
    }

    fn autolink(
        &mut self,
        ob: &mut String,
        link: &str,
        kind: AutolinkKind,
    ) -> Result<(), Self::Error> {
        ob.push_str("<a href=\"");
        if kind == AutolinkKind::Email {
            ob.push_str("mailto:");
        }
        escape_href(&mut *ob, link)?;
        ob.push_str("\">");
        escape_html_body_text(&mut *ob, link)?;
        ob.push_str("</a>");
        Ok(())
    }

    fn raw_html(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    fn entity(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    fn normal_text(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        escape_html_body_text(&mut *ob, text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn html(input: &str) -> String {
        let mut s = String::new();
        push_html(&mut s, input, Options::empty());
        s
    }

    fn html_ext(input: &str, options: Options) -> String {
        let mut s = String::new();
        push_html(&mut s, input, options);
        s
    }

    #[test]
    fn paragraphs() {
        assert_eq!(html("hello\n\nworld\n"), "<p>hello</p>\n<p>world</p>\n");
    }

    #[test]
    fn body_text_is_escaped() {
        assert_eq!(html("1 < 2 & 3\n"), "<p>1 &lt; 2 &amp; 3</p>\n");
    }

    #[test]
    fn emphasis_and_strong() {
        assert_eq!(
            html("*em* and **strong**\n"),
            "<p><em>em</em> and <strong>strong</strong></p>\n"
        );
    }

    #[test]
    fn atx_and_setext_headers() {
        assert_eq!(html("## two\n"), "<h2>two</h2>\n");
        assert_eq!(html("one\n===\n"), "<h1>one</h1>\n");
    }

    #[test]
    fn lists() {
        assert_eq!(
            html("- a\n- b\n"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
        );
        assert_eq!(
            html("1. a\n2. b\n"),
            "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn loose_list_items_wrap_paragraphs() {
        assert_eq!(
            html("- a\n\n- b\n"),
            "<ul>\n<li><p>a</p></li>\n<li><p>b</p></li>\n</ul>\n"
        );
    }

    #[test]
    fn indented_code() {
        assert_eq!(
            html("    let x = 1;\n"),
            "<pre><code>let x = 1;\n</code></pre>\n"
        );
    }

    #[test]
    fn fenced_code_with_info() {
        assert_eq!(
            html_ext("```rust\nfn f() {}\n```\n", Options::ENABLE_FENCED_CODE),
            "<pre><code class=\"language-rust\">fn f() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn block_quotes() {
        assert_eq!(
            html("> quoted\n"),
            "<blockquote>\n<p>quoted</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn inline_links_and_images() {
        assert_eq!(
            html("[text](/url \"title\")\n"),
            "<p><a href=\"/url\" title=\"title\">text</a></p>\n"
        );
        assert_eq!(
            html("![alt](/img.png)\n"),
            "<p><img src=\"/img.png\" alt=\"alt\" /></p>\n"
        );
    }

    #[test]
    fn angle_autolinks() {
        assert_eq!(
            html("<http://x.com>\n"),
            "<p><a href=\"http://x.com\">http://x.com</a></p>\n"
        );
        assert_eq!(
            html("<user@example.com>\n"),
            "<p><a href=\"mailto:user@example.com\">user@example.com</a></p>\n"
        );
    }

    #[test]
    fn bare_autolinks() {
        assert_eq!(
            html_ext("go to http://x.com/ now\n", Options::ENABLE_AUTOLINK),
            "<p>go to <a href=\"http://x.com/\">http://x.com/</a> now</p>\n"
        );
    }

    #[test]
    fn strikethrough_needs_flag() {
        assert_eq!(
            html_ext("~~gone~~\n", Options::ENABLE_STRIKETHROUGH),
            "<p><del>gone</del></p>\n"
        );
        assert_eq!(html("~~kept~~\n"), "<p>~~kept~~</p>\n");
    }

    #[test]
    fn superscript() {
        assert_eq!(
            html_ext("2^10\n", Options::ENABLE_SUPERSCRIPT),
            "<p>2<sup>10</sup></p>\n"
        );
        assert_eq!(
            html_ext("x^(a b)\n", Options::ENABLE_SUPERSCRIPT),
            "<p>x<sup>a b</sup></p>\n"
        );
    }

    #[test]
    fn tables() {
        let input = "| a | b |\n|---|:--:|\n| 1 | 2 |\n";
        assert_eq!(
            html_ext(input, Options::ENABLE_TABLES),
            "<table><thead>\n<tr>\n<th>a</th>\n<th align=\"center\">b</th>\n</tr>\n\
             </thead><tbody>\n<tr>\n<td>1</td>\n<td align=\"center\">2</td>\n</tr>\n\
             </tbody></table>\n"
        );
    }

    #[test]
    fn hard_breaks() {
        assert_eq!(html("one  \ntwo\n"), "<p>one<br />\ntwo</p>\n");
    }

    #[test]
    fn code_spans() {
        assert_eq!(html("`x < y`\n"), "<p><code>x &lt; y</code></p>\n");
    }

    #[test]
    fn horizontal_rules() {
        assert_eq!(html("para\n\n* * *\n"), "<p>para</p>\n<hr />\n");
    }

    #[test]
    fn raw_inline_html_passes_through() {
        assert_eq!(html("a <em>b</em>\n"), "<p>a <em>b</em></p>\n");
    }

    #[test]
    fn entities_pass_through() {
        assert_eq!(html("a &amp; b\n"), "<p>a &amp; b</p>\n");
        assert_eq!(html("a & b\n"), "<p>a &amp; b</p>\n");
    }
}
