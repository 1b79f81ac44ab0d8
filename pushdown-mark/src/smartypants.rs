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

//! Typographic post-processing of already-rendered output: straight quotes
//! become curly, dash and dot runs become their typographic entities.
//! Tags are copied untouched, and the contents of code-like elements are
//! skipped entirely.

use crate::scanners::is_space;

// content of these tags is copied verbatim
static SKIP_TAGS: [&str; 8] = [
    "pre", "code", "var", "samp", "kbd", "math", "script", "style",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SmartyTrigger {
    Dash,
    Parens,
    Squote,
    Dquote,
    Amp,
    Period,
    Number,
    LTag,
    Backtick,
    Escape,
}

fn trigger_for(c: u8) -> Option<SmartyTrigger> {
    match c {
        b'-' => Some(SmartyTrigger::Dash),
        b'(' => Some(SmartyTrigger::Parens),
        b'\'' => Some(SmartyTrigger::Squote),
        b'"' => Some(SmartyTrigger::Dquote),
        b'&' => Some(SmartyTrigger::Amp),
        b'.' => Some(SmartyTrigger::Period),
        b'1' | b'3' => Some(SmartyTrigger::Number),
        b'<' => Some(SmartyTrigger::LTag),
        b'`' => Some(SmartyTrigger::Backtick),
        b'\\' => Some(SmartyTrigger::Escape),
        _ => None,
    }
}

#[derive(Default)]
struct State {
    in_squote: bool,
    in_dquote: bool,
}

fn word_boundary(c: u8) -> bool {
    c == 0 || is_space(c) || c.is_ascii_punctuation()
}

/// Rewrites straight quotes, dashes, ellipses and the `(c)`/`(r)`/`(tm)`
/// marks of `text` into their typographic entities, appending to `ob`.
/// The input is expected to be rendered markup; tags pass through and the
/// contents of `pre`, `code` and friends are left alone.
pub fn smartypants(ob: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut state = State::default();
    let mut i = 0;
    while i < text.len() {
        let org = i;
        let mut action = None;
        while i < text.len() {
            if let Some(a) = trigger_for(bytes[i]) {
                action = Some(a);
                break;
            }
            i += 1;
        }
        if i > org {
            ob.push_str(&text[org..i]);
        }
        let Some(action) = action else {
            break;
        };
        let prev = if i > 0 { bytes[i - 1] } else { 0 };
        let rest = &text[i..];
        let consumed = match action {
            SmartyTrigger::Dash => cb_dash(ob, rest),
            SmartyTrigger::Parens => cb_parens(ob, rest),
            SmartyTrigger::Squote => cb_squote(ob, &mut state, prev, rest),
            SmartyTrigger::Dquote => cb_dquote(ob, &mut state, prev, rest),
            SmartyTrigger::Amp => cb_amp(ob, &mut state, prev, rest),
            SmartyTrigger::Period => cb_period(ob, rest),
            SmartyTrigger::Number => cb_number(ob, prev, rest),
            SmartyTrigger::LTag => cb_ltag(ob, rest),
            SmartyTrigger::Backtick => cb_backtick(ob, rest),
            SmartyTrigger::Escape => cb_escape(ob, rest),
        };
        i += consumed + 1;
    }
}

fn quotes(ob: &mut String, previous: u8, next: u8, quote: char, is_open: &mut bool) -> bool {
    if *is_open && !word_boundary(next) {
        return false;
    }
    if !*is_open && !word_boundary(previous) {
        return false;
    }
    ob.push('&');
    ob.push(if *is_open { 'r' } else { 'l' });
    ob.push(quote);
    ob.push_str("quo;");
    *is_open = !*is_open;
    true
}

fn cb_dash(ob: &mut String, text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() >= 3 && bytes[1] == b'-' && bytes[2] == b'-' {
        ob.push_str("&mdash;");
        return 2;
    }
    if bytes.len() >= 2 && bytes[1] == b'-' {
        ob.push_str("&ndash;");
        return 1;
    }
    ob.push('-');
    0
}

fn cb_parens(ob: &mut String, text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() >= 3 {
        let t1 = bytes[1].to_ascii_lowercase();
        let t2 = bytes[2].to_ascii_lowercase();
        if t1 == b'c' && t2 == b')' {
            ob.push_str("&copy;");
            return 2;
        }
        if t1 == b'r' && t2 == b')' {
            ob.push_str("&reg;");
            return 2;
        }
        if bytes.len() >= 4 && t1 == b't' && t2 == b'm' && bytes[3] == b')' {
            ob.push_str("&trade;");
            return 3;
        }
    }
    ob.push('(');
    0
}

fn cb_squote(ob: &mut String, state: &mut State, prev: u8, text: &str) -> usize {
    let bytes = text.as_bytes();
    let size = bytes.len();
    if size >= 2 {
        let t1 = bytes[1].to_ascii_lowercase();
        if t1 == b'\'' {
            let next = if size >= 3 { bytes[2] } else { 0 };
            if quotes(ob, prev, next, 'd', &mut state.in_dquote) {
                return 1;
            }
        }
        // contractions: 's 't 'm 'd 're 'll 've
        if matches!(t1, b's' | b't' | b'm' | b'd') && (size == 2 || word_boundary(bytes[2])) {
            ob.push_str("&rsquo;");
            return 0;
        }
        if size >= 3 {
            let t2 = bytes[2].to_ascii_lowercase();
            if ((t1 == b'r' && t2 == b'e')
                || (t1 == b'l' && t2 == b'l')
                || (t1 == b'v' && t2 == b'e'))
                && (size == 3 || word_boundary(bytes[3]))
            {
                ob.push_str("&rsquo;");
                return 0;
            }
        }
    }
    let next = if size >= 2 { bytes[1] } else { 0 };
    if quotes(ob, prev, next, 's', &mut state.in_squote) {
        return 0;
    }
    ob.push('\'');
    0
}

fn cb_dquote(ob: &mut String, state: &mut State, prev: u8, text: &str) -> usize {
    let bytes = text.as_bytes();
    let next = if bytes.len() >= 2 { bytes[1] } else { 0 };
    if !quotes(ob, prev, next, 'd', &mut state.in_dquote) {
        ob.push('"');
    }
    0
}

fn cb_amp(ob: &mut String, state: &mut State, prev: u8, text: &str) -> usize {
    if text.starts_with("&quot;") {
        let next = *text.as_bytes().get(6).unwrap_or(&0);
        if quotes(ob, prev, next, 'd', &mut state.in_dquote) {
            return 5;
        }
    }
    ob.push('&');
    0
}

fn cb_period(ob: &mut String, text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() >= 3 && bytes[1] == b'.' && bytes[2] == b'.' {
        ob.push_str("&hellip;");
        return 2;
    }
    if bytes.len() >= 5
        && bytes[1] == b' '
        && bytes[2] == b'.'
        && bytes[3] == b' '
        && bytes[4] == b'.'
    {
        ob.push_str("&hellip;");
        return 4;
    }
    ob.push('.');
    0
}

fn cb_number(ob: &mut String, prev: u8, text: &str) -> usize {
    let bytes = text.as_bytes();
    if word_boundary(prev) && bytes.len() >= 3 && bytes[1] == b'/' {
        let after = |ix: usize| bytes.len() == ix || word_boundary(bytes[ix]);
        if bytes[0] == b'1' && bytes[2] == b'2' && after(3) {
            ob.push_str("&frac12;");
            return 2;
        }
        if bytes[0] == b'1' && bytes[2] == b'4' {
            let ordinal = bytes.len() >= 5
                && bytes[3].eq_ignore_ascii_case(&b't')
                && bytes[4].eq_ignore_ascii_case(&b'h');
            if after(3) || ordinal {
                ob.push_str("&frac14;");
                return 2;
            }
        }
        if bytes[0] == b'3' && bytes[2] == b'4' {
            let ordinal = bytes.len() >= 6
                && bytes[3].eq_ignore_ascii_case(&b't')
                && bytes[4].eq_ignore_ascii_case(&b'h')
                && bytes[5].eq_ignore_ascii_case(&b's');
            if after(3) || ordinal {
                ob.push_str("&frac34;");
                return 2;
            }
        }
    }
    ob.push(bytes[0] as char);
    0
}

fn cb_ltag(ob: &mut String, text: &str) -> usize {
    let bytes = text.as_bytes();
    let size = text.len();
    let mut i = 0;
    while i < size && bytes[i] != b'>' {
        i += 1;
    }
    if let Some(tag) = SKIP_TAGS.iter().find(|tag| is_open_tag(text, tag)) {
        // copy verbatim through the matching closing tag
        let closing = format!("</{}", tag);
        let lower = text.to_ascii_lowercase();
        match lower[i..].find(&closing) {
            Some(pos) => {
                i += pos;
                while i < size && bytes[i] != b'>' {
                    i += 1;
                }
            }
            None => i = size,
        }
    }
    let end = (i + 1).min(size);
    ob.push_str(&text[..end]);
    end - 1
}

fn is_open_tag(text: &str, tag: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < tag.len() + 2 || bytes[0] != b'<' {
        return false;
    }
    if !bytes[1..1 + tag.len()].eq_ignore_ascii_case(tag.as_bytes()) {
        return false;
    }
    matches!(bytes[1 + tag.len()], b'>' | b' ' | b'\t' | b'\n')
}

fn cb_backtick(ob: &mut String, text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b'`' {
        ob.push_str("&ldquo;");
        return 1;
    }
    ob.push('`');
    0
}

fn cb_escape(ob: &mut String, text: &str) -> usize {
    match text[1..].chars().next() {
        Some(c) => {
            ob.push('\\');
            ob.push(c);
            c.len_utf8()
        }
        None => {
            ob.push('\\');
            0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn smarty(text: &str) -> String {
        let mut out = String::new();
        smartypants(&mut out, text);
        out
    }

    #[test]
    fn double_quotes_pair_up() {
        assert_eq!(
            smarty("<p>\"Hello\" she said</p>"),
            "<p>&ldquo;Hello&rdquo; she said</p>"
        );
    }

    #[test]
    fn single_quotes_and_contractions() {
        assert_eq!(smarty("it's fine"), "it&rsquo;s fine");
        assert_eq!(smarty("they'll come"), "they&rsquo;ll come");
        assert_eq!(smarty("'word'"), "&lsquo;word&rsquo;");
    }

    #[test]
    fn dashes_and_ellipses() {
        assert_eq!(smarty("a -- b"), "a &ndash; b");
        assert_eq!(smarty("a --- b"), "a &mdash; b");
        assert_eq!(smarty("wait..."), "wait&hellip;");
    }

    #[test]
    fn symbol_parens() {
        assert_eq!(smarty("(c) (r) (tm)"), "&copy; &reg; &trade;");
        assert_eq!(smarty("(x)"), "(x)");
    }

    #[test]
    fn fractions() {
        assert_eq!(smarty("1/2 cup"), "&frac12; cup");
        assert_eq!(smarty("3/4ths"), "&frac34;ths");
        assert_eq!(smarty("11/22"), "11/22");
    }

    #[test]
    fn escaped_quotes_survive() {
        assert_eq!(smarty(r#"\"x\""#), r#"\"x\""#);
    }

    #[test]
    fn rendered_quote_entities_pair_up() {
        assert_eq!(
            smarty("&quot;word&quot; rest"),
            "&ldquo;word&rdquo; rest"
        );
    }

    #[test]
    fn tags_are_untouched() {
        assert_eq!(
            smarty("<a href=\"x\">\"q\"</a>"),
            "<a href=\"x\">&ldquo;q&rdquo;</a>"
        );
    }

    #[test]
    fn code_contents_are_skipped() {
        assert_eq!(
            smarty("<code>\"raw\" -- text</code> -- out"),
            "<code>\"raw\" -- text</code> &ndash; out"
        );
    }
}
