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

//! Span-level parsing: a single forward scan over inline text that copies
//! literal runs and dispatches to a trigger for every active byte.

use crate::autolink;
use crate::parse::Parser;
use crate::scanners::{is_boundary, is_space, scan_tag, unescape_into};
use crate::{AutolinkKind, Options, Render};

const MAX_ENTITY: usize = 32;

/// The closed set of inline triggers. The active-character table maps every
/// byte value to one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum SpanTrigger {
    #[default]
    Inactive,
    Emphasis,
    CodeSpan,
    LineBreak,
    Link,
    RawTag,
    Escape,
    Entity,
    AutolinkUrl,
    AutolinkEmail,
    AutolinkWww,
    Superscript,
}

impl SpanTrigger {
    /// Derives the active-character table from the extension flags.
    pub(crate) fn table(options: Options) -> [SpanTrigger; 256] {
        let mut table = [SpanTrigger::Inactive; 256];
        table[b'*' as usize] = SpanTrigger::Emphasis;
        table[b'_' as usize] = SpanTrigger::Emphasis;
        table[b'`' as usize] = SpanTrigger::CodeSpan;
        table[b'\n' as usize] = SpanTrigger::LineBreak;
        table[b'[' as usize] = SpanTrigger::Link;
        table[b'<' as usize] = SpanTrigger::RawTag;
        table[b'\\' as usize] = SpanTrigger::Escape;
        table[b'&' as usize] = SpanTrigger::Entity;
        if options.contains(Options::ENABLE_STRIKETHROUGH) {
            table[b'~' as usize] = SpanTrigger::Emphasis;
        }
        if options.contains(Options::ENABLE_AUTOLINK) {
            table[b':' as usize] = SpanTrigger::AutolinkUrl;
            table[b'@' as usize] = SpanTrigger::AutolinkEmail;
            table[b'w' as usize] = SpanTrigger::AutolinkWww;
        }
        if options.contains(Options::ENABLE_SUPERSCRIPT) {
            table[b'^' as usize] = SpanTrigger::Superscript;
        }
        table
    }
}

impl<'r, R: Render> Parser<'r, R> {
    /// Scans `data` left to right, collecting literal text and dispatching
    /// active bytes to their triggers.
    ///
    /// A trigger either consumes its construct (flushing the pending
    /// literal run, emitting the construct, and returning how many bytes it
    /// ate beyond the trigger byte itself) or declines, in which case the
    /// byte stays part of the surrounding literal run and scanning resumes
    /// right after it. Triggers never re-scan consumed text, so earlier
    /// active characters always take precedence.
    pub(crate) fn parse_inline(&mut self, ob: &mut String, data: &str) -> Result<(), R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut i = 0;
        let mut mark = 0;
        while i < size {
            while i < size && self.active[bytes[i] as usize] == SpanTrigger::Inactive {
                i += 1;
            }
            if i >= size {
                break;
            }
            let pending = &data[mark..i];
            let outcome = match self.active[bytes[i] as usize] {
                SpanTrigger::Inactive => None,
                SpanTrigger::Emphasis => self.char_emphasis(ob, data, i, pending)?,
                SpanTrigger::CodeSpan => self.char_codespan(ob, data, i, pending)?,
                SpanTrigger::LineBreak => self.char_linebreak(ob, data, i, pending)?,
                SpanTrigger::Link => self.char_link(ob, data, i, pending)?,
                SpanTrigger::RawTag => self.char_langle_tag(ob, data, i, pending)?,
                SpanTrigger::Escape => self.char_escape(ob, data, i, pending)?,
                SpanTrigger::Entity => self.char_entity(ob, data, i, pending)?,
                SpanTrigger::AutolinkUrl => self.char_autolink_url(ob, data, i, pending)?,
                SpanTrigger::AutolinkEmail => self.char_autolink_email(ob, data, i, pending)?,
                SpanTrigger::AutolinkWww => self.char_autolink_www(ob, data, i, pending)?,
                SpanTrigger::Superscript => self.char_superscript(ob, data, i, pending)?,
            };
            match outcome {
                Some(extra) => {
                    i += 1 + extra;
                    mark = i;
                }
                // no action from the trigger: the byte is literal
                None => i += 1,
            }
        }
        if mark < size {
            self.renderer.normal_text(ob, &data[mark..])?;
        }
        Ok(())
    }

    fn flush(&mut self, ob: &mut String, pending: &str) -> Result<(), R::Error> {
        if pending.is_empty() {
            Ok(())
        } else {
            self.renderer.normal_text(ob, pending)
        }
    }

    /// `\X` emits X without interpretation. A trailing backslash is literal.
    fn char_escape(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        match data[pos + 1..].chars().next() {
            Some(c) => {
                self.flush(ob, pending)?;
                let len = c.len_utf8();
                self.renderer.normal_text(ob, &data[pos + 1..pos + 1 + len])?;
                Ok(Some(len))
            }
            None => Ok(None),
        }
    }

    /// A valid-looking character reference passes through as an entity;
    /// anything else leaves the `&` literal.
    fn char_entity(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut end = pos + 1;
        if end < size && bytes[end] == b'#' {
            end += 1;
        }
        let content = end;
        while end < size && end - pos < MAX_ENTITY && bytes[end].is_ascii_alphanumeric() {
            end += 1;
        }
        if end > content && end < size && bytes[end] == b';' {
            end += 1;
            self.flush(ob, pending)?;
            self.renderer.entity(ob, &data[pos..end])?;
            Ok(Some(end - pos - 1))
        } else {
            Ok(None)
        }
    }

    /// Two or more trailing spaces make a hard break; otherwise the newline
    /// stays in the literal text as a soft break.
    fn char_linebreak(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        if pos < 2 || bytes[pos - 1] != b' ' || bytes[pos - 2] != b' ' {
            return Ok(None);
        }
        // the extra spaces at the end of the line are dropped
        self.flush(ob, pending.trim_end_matches(' '))?;
        self.renderer.line_break(ob)?;
        Ok(Some(0))
    }

    /// A backtick run opens a code span closed by the next run of the same
    /// length; the interior is verbatim, trimmed of surrounding spaces.
    fn char_codespan(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut nb = 0;
        while pos + nb < size && bytes[pos + nb] == b'`' {
            nb += 1;
        }
        // finding the next delimiter
        let mut end = pos + nb;
        let mut run = 0;
        while end < size && run < nb {
            if bytes[end] == b'`' {
                run += 1;
            } else {
                run = 0;
            }
            end += 1;
        }
        if run < nb {
            return Ok(None);
        }
        // trimming outside whitespace
        let mut f_begin = pos + nb;
        let mut f_end = end - nb;
        while f_begin < f_end && bytes[f_begin] == b' ' {
            f_begin += 1;
        }
        while f_end > f_begin && bytes[f_end - 1] == b' ' {
            f_end -= 1;
        }
        self.flush(ob, pending)?;
        self.renderer.codespan(ob, &data[f_begin..f_end])?;
        Ok(Some(end - pos - 1))
    }

    /// An angle-bracketed autolink or a piece of raw inline HTML; anything
    /// else leaves the `<` literal.
    fn char_langle_tag(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let rem = &data[pos..];
        match scan_tag(rem) {
            Some((end, kind)) if end > 2 => {
                self.flush(ob, pending)?;
                match kind {
                    Some(kind) => {
                        let mut link = self.span_bufs.checkout();
                        unescape_into(&mut link, &rem[1..end - 1]);
                        self.renderer.autolink(ob, &link, kind)?;
                        self.span_bufs.release(link);
                    }
                    None => self.renderer.raw_html(ob, &rem[..end])?,
                }
                Ok(Some(end - 1))
            }
            _ => Ok(None),
        }
    }

    fn char_autolink_url(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let Some((rewind, end)) = autolink::url(data, pos) else {
            return Ok(None);
        };
        // the scheme must still be part of the pending literal run
        if rewind > pending.len() {
            return Ok(None);
        }
        self.flush(ob, &pending[..pending.len() - rewind])?;
        self.renderer
            .autolink(ob, &data[pos - rewind..pos + end], AutolinkKind::Url)?;
        Ok(Some(end - 1))
    }

    fn char_autolink_email(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let Some((rewind, end)) = autolink::email(data, pos) else {
            return Ok(None);
        };
        if rewind > pending.len() {
            return Ok(None);
        }
        self.flush(ob, &pending[..pending.len() - rewind])?;
        self.renderer
            .autolink(ob, &data[pos - rewind..pos + end], AutolinkKind::Email)?;
        Ok(Some(end - 1))
    }

    fn char_autolink_www(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let Some(end) = autolink::www(data, pos) else {
            return Ok(None);
        };
        self.flush(ob, pending)?;
        self.renderer
            .autolink(ob, &data[pos..pos + end], AutolinkKind::Url)?;
        Ok(Some(end - 1))
    }

    /// `^word` or `^(several words)`.
    fn char_superscript(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let rem = &data[pos..];
        let rb = rem.as_bytes();
        let size = rem.len();
        if size < 2 {
            return Ok(None);
        }
        let (sup_start, sup_end) = if rb[1] == b'(' {
            let mut i = 2;
            while i < size && rb[i] != b')' && rb[i] != b'\n' {
                i += 1;
            }
            if i == size {
                return Ok(None);
            }
            (2, i)
        } else {
            let mut i = 1;
            while i < size && !is_space(rb[i]) {
                i += 1;
            }
            (1, i)
        };
        if sup_end == sup_start {
            // an empty ^() still consumes itself
            if sup_start == 2 {
                self.flush(ob, pending)?;
                return Ok(Some(2));
            }
            return Ok(None);
        }
        if self.nesting_exceeded() {
            return Ok(None);
        }
        self.flush(ob, pending)?;
        self.nesting += 1;
        let mut work = self.span_bufs.checkout();
        let res = self.parse_inline(&mut work, &rem[sup_start..sup_end]);
        self.nesting -= 1;
        res?;
        self.renderer.superscript(ob, &work)?;
        self.span_bufs.release(work);
        let total = if sup_start == 2 { sup_end + 1 } else { sup_end };
        Ok(Some(total - 1))
    }

    /// Emphasis dispatch: single or double runs of the marker character,
    /// with word-boundary rules on both sides.
    fn char_emphasis(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let c = bytes[pos];
        let rem = &data[pos..];
        let rb = rem.as_bytes();
        let size = rem.len();

        // intraword underscores stay literal
        if self.options.contains(Options::ENABLE_NO_INTRA_EMPHASIS)
            && c == b'_'
            && !is_boundary(data[..pos].as_bytes().last().copied())
        {
            return Ok(None);
        }

        if size > 2 && rb[1] != c {
            // whitespace cannot follow an opening emphasis;
            // strikethrough only takes two characters, '~~'
            if c == b'~' || is_space(rb[1]) {
                return Ok(None);
            }
            return self.parse_emph1(ob, &rem[1..], pending, c);
        }

        if size > 3 && rb[1] == c && rb[2] != c {
            if is_space(rb[2]) {
                return Ok(None);
            }
            return Ok(self.parse_emph2(ob, &rem[2..], pending, c)?.map(|n| n + 1));
        }

        Ok(None)
    }

    /// Scans for a single-character closer, renders the interior, and emits
    /// emphasis. `data` starts right after the opening marker.
    fn parse_emph1(
        &mut self,
        ob: &mut String,
        data: &str,
        pending: &str,
        c: u8,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut i = 0;
        while i < size {
            let len = match find_emph_char(&data[i..], c) {
                Some(len) => len,
                None => return Ok(None),
            };
            i += len;
            if i >= size {
                return Ok(None);
            }
            // part of a longer marker run
            if i + 1 < size && bytes[i + 1] == c {
                i += 1;
                continue;
            }
            if bytes[i] == c && !is_space(bytes[i - 1]) {
                if self.options.contains(Options::ENABLE_NO_INTRA_EMPHASIS) && c == b'_' {
                    // closing underscore must sit on a word boundary
                    if !is_boundary(bytes.get(i + 1).copied()) {
                        continue;
                    }
                }
                if self.nesting_exceeded() {
                    return Ok(None);
                }
                self.flush(ob, pending)?;
                self.nesting += 1;
                let mut work = self.span_bufs.checkout();
                let res = self.parse_inline(&mut work, &data[..i]);
                self.nesting -= 1;
                res?;
                self.renderer.emphasis(ob, &work)?;
                self.span_bufs.release(work);
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }

    /// Like [`parse_emph1`](Parser::parse_emph1) for double-character runs:
    /// strong emphasis, or strikethrough for `~~`.
    fn parse_emph2(
        &mut self,
        ob: &mut String,
        data: &str,
        pending: &str,
        c: u8,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut i = 0;
        while i < size {
            let len = match find_emph_char(&data[i..], c) {
                Some(len) => len,
                None => return Ok(None),
            };
            i += len;
            if i + 1 < size && bytes[i] == c && bytes[i + 1] == c && !is_space(bytes[i - 1]) {
                if self.nesting_exceeded() {
                    return Ok(None);
                }
                self.flush(ob, pending)?;
                self.nesting += 1;
                let mut work = self.span_bufs.checkout();
                let res = self.parse_inline(&mut work, &data[..i]);
                self.nesting -= 1;
                res?;
                if c == b'~' {
                    self.renderer.strikethrough(ob, &work)?;
                } else {
                    self.renderer.double_emphasis(ob, &work)?;
                }
                self.span_bufs.release(work);
                return Ok(Some(i + 2));
            }
            i += 1;
        }
        Ok(None)
    }

    /// `[text](dest "title")`, `[text][label]`, `[label]` and the image
    /// forms. An unresolved reference leaves the bracket text literal.
    fn char_link(
        &mut self,
        ob: &mut String,
        data: &str,
        pos: usize,
        pending: &str,
    ) -> Result<Option<usize>, R::Error> {
        // an image needs its bang in the literal text just before us; an
        // escaped bang stays an ordinary link prefix
        let is_img = pos > 0 && data.as_bytes()[pos - 1] == b'!' && pending.ends_with('!');
        // links do not nest inside the body of another link
        if !is_img && self.in_link {
            return Ok(None);
        }
        let rem = &data[pos..];
        let rb = rem.as_bytes();
        let size = rem.len();

        // looking for the matching closing bracket
        let mut level = 1;
        let mut i = 1;
        let mut text_has_nl = false;
        while i < size {
            if rb[i] == b'\n' {
                text_has_nl = true;
            } else if rb[i - 1] == b'\\' {
                // escaped bracket
            } else if rb[i] == b'[' {
                level += 1;
            } else if rb[i] == b']' {
                level -= 1;
                if level <= 0 {
                    break;
                }
            }
            i += 1;
        }
        if i >= size {
            return Ok(None);
        }
        let txt_e = i;
        i += 1;
        while i < size && is_space(rb[i]) {
            i += 1;
        }

        let mut dest = String::new();
        let mut title = None;

        if i < size && rb[i] == b'(' {
            // inline style link
            i += 1;
            while i < size && is_space(rb[i]) {
                i += 1;
            }
            let mut link_b = i;
            // looking for the link end: ' " )
            while i < size {
                match rb[i] {
                    b'\\' => i += 2,
                    b')' => break,
                    b'\'' | b'"' if is_space(rb[i - 1]) => break,
                    _ => i += 1,
                }
            }
            if i >= size {
                return Ok(None);
            }
            let mut link_e = i;
            let mut title_b = 0;
            let mut title_e = 0;
            if rb[i] == b'\'' || rb[i] == b'"' {
                // looking for the title end
                let qtype = rb[i];
                let mut in_title = true;
                i += 1;
                title_b = i;
                while i < size {
                    match rb[i] {
                        b'\\' => i += 2,
                        q if q == qtype => {
                            in_title = false;
                            i += 1;
                        }
                        b')' if !in_title => break,
                        _ => i += 1,
                    }
                }
                if i >= size {
                    return Ok(None);
                }
                // skipping whitespace and checking the closing quote
                title_e = i - 1;
                while title_e > title_b && is_space(rb[title_e]) {
                    title_e -= 1;
                }
                if rb[title_e] != b'\'' && rb[title_e] != b'"' {
                    title_b = 0;
                    title_e = 0;
                    link_e = i;
                }
            }
            while link_e > link_b && is_space(rb[link_e - 1]) {
                link_e -= 1;
            }
            // remove optional angle brackets around the link
            if link_b < link_e && rb[link_b] == b'<' {
                link_b += 1;
            }
            if link_e > link_b && rb[link_e - 1] == b'>' {
                link_e -= 1;
            }
            if link_e > link_b {
                unescape_into(&mut dest, &rem[link_b..link_e]);
            }
            if title_e > title_b {
                let mut unescaped = String::new();
                unescape_into(&mut unescaped, &rem[title_b..title_e]);
                title = Some(unescaped);
            }
            i += 1;
        } else if i < size && rb[i] == b'[' {
            // reference style link
            i += 1;
            let link_b = i;
            while i < size && rb[i] != b']' {
                i += 1;
            }
            if i >= size {
                return Ok(None);
            }
            let link_e = i;
            let label_owned;
            let label: &str = if link_b == link_e {
                // collapsed reference: the bracket text is the label
                if text_has_nl {
                    label_owned = rem[1..txt_e].replace('\n', " ");
                    &label_owned
                } else {
                    &rem[1..txt_e]
                }
            } else {
                &rem[link_b..link_e]
            };
            match self.refdefs.resolve(label) {
                Some(def) => {
                    dest.push_str(&def.dest);
                    title = def.title.clone();
                }
                None => return Ok(None),
            }
            i += 1;
        } else {
            // shortcut reference style link
            let label_owned;
            let label: &str = if text_has_nl {
                label_owned = rem[1..txt_e].replace('\n', " ");
                &label_owned
            } else {
                &rem[1..txt_e]
            };
            match self.refdefs.resolve(label) {
                Some(def) => {
                    dest.push_str(&def.dest);
                    title = def.title.clone();
                }
                None => return Ok(None),
            }
            // rewinding the whitespace
            i = txt_e + 1;
        }

        // the construct is valid from here on
        if is_img {
            self.flush(ob, &pending[..pending.len() - 1])?;
        } else {
            self.flush(ob, pending)?;
        }

        // building the link content
        let mut content = self.span_bufs.checkout();
        if txt_e > 1 {
            if is_img || self.nesting_exceeded() {
                // image alt text is kept as plain text
                content.push_str(&rem[1..txt_e]);
            } else {
                self.in_link = true;
                self.nesting += 1;
                let res = self.parse_inline(&mut content, &rem[1..txt_e]);
                self.nesting -= 1;
                self.in_link = false;
                res?;
            }
        }

        if is_img {
            self.renderer.image(ob, &dest, title.as_deref(), &content)?;
        } else {
            self.renderer.link(ob, &content, &dest, title.as_deref())?;
        }
        self.span_bufs.release(content);
        Ok(Some(i - 1))
    }
}

/// Looks for the next potential closing marker, skipping over code spans
/// and bracketed spans so their interiors cannot close an emphasis.
fn find_emph_char(data: &str, c: u8) -> Option<usize> {
    let bytes = data.as_bytes();
    let size = data.len();
    let mut i = 1;
    while i < size {
        while i < size && bytes[i] != c && bytes[i] != b'`' && bytes[i] != b'[' {
            i += 1;
        }
        if i == size {
            return None;
        }
        // not counting escaped chars
        if bytes[i - 1] == b'\\' {
            i += 1;
            continue;
        }
        if bytes[i] == c {
            return Some(i);
        }
        if bytes[i] == b'`' {
            // skip the whole code span
            let mut span_nb = 0;
            let mut fallback = 0;
            while i < size && bytes[i] == b'`' {
                i += 1;
                span_nb += 1;
            }
            if i >= size {
                return None;
            }
            let mut bt = 0;
            while i < size && bt < span_nb {
                if fallback == 0 && bytes[i] == c {
                    fallback = i;
                }
                if bytes[i] == b'`' {
                    bt += 1;
                } else {
                    bt = 0;
                }
                i += 1;
            }
            if bt < span_nb {
                // unterminated code span; fall back to a marker inside it
                return if fallback > 0 { Some(fallback) } else { None };
            }
        } else {
            // skip the whole bracketed span, with optional (…) or […] tail
            let mut fallback = 0;
            i += 1;
            while i < size && bytes[i] != b']' {
                if fallback == 0 && bytes[i] == c {
                    fallback = i;
                }
                i += 1;
            }
            i += 1;
            while i < size && (bytes[i] == b' ' || bytes[i] == b'\n') {
                i += 1;
            }
            if i >= size {
                return if fallback > 0 { Some(fallback) } else { None };
            }
            let cc = match bytes[i] {
                b'[' => b']',
                b'(' => b')',
                _ => {
                    if fallback > 0 {
                        return Some(fallback);
                    }
                    continue;
                }
            };
            i += 1;
            while i < size && bytes[i] != cc {
                if fallback == 0 && bytes[i] == c {
                    fallback = i;
                }
                i += 1;
            }
            if i >= size {
                return if fallback > 0 { Some(fallback) } else { None };
            }
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn emph_char_skips_code_spans() {
        assert_eq!(find_emph_char("a `*` b*", b'*'), Some(7));
        assert_eq!(find_emph_char("a*b", b'*'), Some(1));
        assert_eq!(find_emph_char(r"a\*b*", b'*'), Some(4));
        assert_eq!(find_emph_char("ab", b'*'), None);
    }

    #[test]
    fn emph_char_skips_links() {
        assert_eq!(find_emph_char("a [x*y](z) b*", b'*'), Some(12));
    }

    #[test]
    fn table_follows_options() {
        let table = SpanTrigger::table(Options::empty());
        assert_eq!(table[b'*' as usize], SpanTrigger::Emphasis);
        assert_eq!(table[b'~' as usize], SpanTrigger::Inactive);
        assert_eq!(table[b'w' as usize], SpanTrigger::Inactive);

        let table = SpanTrigger::table(Options::all());
        assert_eq!(table[b'~' as usize], SpanTrigger::Emphasis);
        assert_eq!(table[b'w' as usize], SpanTrigger::AutolinkWww);
        assert_eq!(table[b'^' as usize], SpanTrigger::Superscript);
    }
}
