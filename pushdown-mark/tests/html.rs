// Tests for end-to-end HTML rendering.
#![cfg(feature = "html")]

use pushdown_mark::{html, Options};

fn render(input: &str, options: Options) -> String {
    let mut s = String::new();
    html::push_html(&mut s, input, options);
    s
}

#[test]
fn html_block_with_closing_tag() {
    let original = "Little header\n\n<div>\ncontent\n</div>\n\nafter\n";
    let expected = "<p>Little header</p>\n<div>\ncontent\n</div>\n\n<p>after</p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn unterminated_html_block_degrades_to_paragraph() {
    let original = "<div>\nno close\n";
    let expected = "<p><div>\nno close</p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn html_comment_block() {
    let original = "<!-- a comment -->\n\ntext\n";
    let expected = "<!-- a comment -->\n<p>text</p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn reference_link_with_title_on_next_line() {
    let original = "[site]: <http://example.com/>\n    'An example'\n\nsee [site]\n";
    let expected =
        "<p>see <a href=\"http://example.com/\" title=\"An example\">site</a></p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn unresolved_reference_is_literal() {
    let original = "see [nowhere]\n";
    let expected = "<p>see [nowhere]</p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn nested_list() {
    let original = "- a\n    - b\n- c\n";
    let expected = "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul></li>\n<li>c</li>\n</ul>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn ordered_list() {
    let original = "1. first\n2. second\n";
    let expected = "<ol>\n<li>first</li>\n<li>second</li>\n</ol>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn setext_header_after_paragraph() {
    let original = "para\nHeader\n======\n";
    let expected = "<p>para</p>\n<h1>Header</h1>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn space_headers_flag() {
    assert_eq!(render("#tag\n", Options::empty()), "<h1>tag</h1>\n");
    assert_eq!(
        render("#tag\n", Options::ENABLE_SPACE_HEADERS),
        "<p>#tag</p>\n"
    );
    assert_eq!(
        render("# spaced\n", Options::ENABLE_SPACE_HEADERS),
        "<h1>spaced</h1>\n"
    );
}

#[test]
fn lax_spacing_lets_headers_interrupt() {
    assert_eq!(
        render("text\n# header\n", Options::empty()),
        "<p>text\n# header</p>\n"
    );
    assert_eq!(
        render("text\n# header\n", Options::ENABLE_LAX_SPACING),
        "<p>text</p>\n<h1>header</h1>\n"
    );
}

#[test]
fn quote_with_two_paragraphs() {
    let original = "> a\n>\n> b\n";
    let expected = "<blockquote>\n<p>a</p>\n<p>b</p>\n</blockquote>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn escapes_suppress_markup() {
    assert_eq!(
        render("\\*not em\\*\n", Options::empty()),
        "<p>*not em*</p>\n"
    );
}

#[test]
fn autolink_excludes_entity_tail() {
    let original = "see http://x.com&amp; now\n";
    let expected =
        "<p>see <a href=\"http://x.com\">http://x.com</a>&amp; now</p>\n";
    assert_eq!(render(original, Options::ENABLE_AUTOLINK), expected);
}

#[test]
fn table_body_stops_without_separator() {
    let original = "a|b\n---|---\n1|2\n3\n";
    let expected = "<table><thead>\n<tr>\n<th>a</th>\n<th>b</th>\n</tr>\n</thead><tbody>\n\
                    <tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody></table>\n<p>3</p>\n";
    assert_eq!(render(original, Options::ENABLE_TABLES), expected);
}

#[test]
fn bom_and_crlf_are_normalized() {
    let original = "\u{feff}a\r\nb\r\n";
    let expected = "<p>a\nb</p>\n";
    assert_eq!(render(original, Options::empty()), expected);
}

#[test]
fn deep_nesting_stays_literal_beyond_the_guard() {
    let mut original = "> ".repeat(64);
    original.push_str("deep\n");
    let out = render(&original, Options::empty());
    // sixteen levels render as quotes, the rest is literal text
    assert_eq!(out.matches("<blockquote>").count(), 16);
    assert!(out.contains("&gt; "));
}

#[test]
fn fenced_code_ignores_markup() {
    let original = "```\n*not em*\n> not quote\n```\n";
    let expected = "<pre><code>*not em*\n&gt; not quote\n</code></pre>\n";
    assert_eq!(render(original, Options::ENABLE_FENCED_CODE), expected);
}

#[test]
fn fence_inside_list_item_hides_markers() {
    let original = "- a\n```\n- not item\n```\n";
    let out = render(original, Options::ENABLE_FENCED_CODE);
    assert_eq!(out.matches("<li>").count(), 1);
}
