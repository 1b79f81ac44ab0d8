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

//! The parser context and the two-pass render driver.

use std::collections::HashMap;
use std::fmt;

use unicase::UniCase;

use crate::inline::SpanTrigger;
use crate::scanners::{expand_tabs, unescape_into};
use crate::{Options, Render, DEFAULT_MAX_NESTING};

/// A resolved reference definition.
pub(crate) struct LinkDef {
    pub dest: String,
    pub title: Option<String>,
}

/// The reference table, keyed by case-insensitive label.
#[derive(Default)]
pub(crate) struct RefDefs(HashMap<UniCase<String>, LinkDef>);

impl RefDefs {
    /// Records a definition unless the label is already defined; the first
    /// definition in document order wins.
    pub(crate) fn define(&mut self, label: &str, def: LinkDef) {
        self.0.entry(UniCase::new(label.to_owned())).or_insert(def);
    }

    pub(crate) fn resolve(&self, label: &str) -> Option<&LinkDef> {
        self.0.get(&UniCase::new(label.to_owned()))
    }
}

/// A LIFO pool of scratch buffers for one usage class. A checked-out buffer
/// arrives empty; returning it keeps its allocation for the next checkout.
#[derive(Default)]
pub(crate) struct BufferPool {
    free: Vec<String>,
}

impl BufferPool {
    pub(crate) fn checkout(&mut self) -> String {
        let mut buf = self.free.pop().unwrap_or_default();
        buf.clear();
        buf
    }

    pub(crate) fn release(&mut self, buf: String) {
        self.free.push(buf);
    }
}

/// A one-shot Markdown render. Construct it around a [`Render`]
/// implementation, then call [`render`](Parser::render) with the document.
///
/// A parser carries per-document state (the reference table, scratch
/// buffers, the recursion counter), so it is consumed by `render`; build a
/// fresh one for every document. Concurrent renders need independent
/// parsers.
pub struct Parser<'r, R: Render> {
    pub(crate) renderer: &'r mut R,
    pub(crate) options: Options,
    pub(crate) max_nesting: usize,
    pub(crate) active: [SpanTrigger; 256],
    pub(crate) refdefs: RefDefs,
    pub(crate) block_bufs: BufferPool,
    pub(crate) span_bufs: BufferPool,
    pub(crate) nesting: usize,
    pub(crate) in_link: bool,
}

impl<'r, R: Render> fmt::Debug for Parser<'r, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("max_nesting", &self.max_nesting)
            .finish_non_exhaustive()
    }
}

impl<'r, R: Render> Parser<'r, R> {
    /// Creates a parser with no extensions enabled.
    pub fn new(renderer: &'r mut R) -> Self {
        Self::new_ext(renderer, Options::empty())
    }

    /// Creates a parser with the given extension flags.
    pub fn new_ext(renderer: &'r mut R, options: Options) -> Self {
        Parser {
            renderer,
            options,
            max_nesting: DEFAULT_MAX_NESTING,
            active: SpanTrigger::table(options),
            refdefs: RefDefs::default(),
            block_bufs: BufferPool::default(),
            span_bufs: BufferPool::default(),
            nesting: 0,
            in_link: false,
        }
    }

    /// Overrides the maximum container nesting depth. Constructs nested
    /// deeper than this render as literal text instead of recursing.
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Renders `input` and returns the output buffer. An error from any
    /// renderer callback aborts the render and is returned unchanged; on
    /// that path the output must be considered incomplete and is dropped.
    pub fn render(mut self, input: &str) -> Result<String, R::Error> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let bytes = input.as_bytes();

        // first pass: collect reference definitions, copy everything else
        // with line endings normalized and tabs expanded
        let mut text = String::with_capacity(input.len());
        let mut beg = 0;
        while beg < input.len() {
            if let Some(end) = self.scan_refdef(input, beg) {
                beg = end;
            } else {
                let mut end = beg;
                while end < input.len() && bytes[end] != b'\n' && bytes[end] != b'\r' {
                    end += 1;
                }
                if end > beg {
                    expand_tabs(&mut text, &input[beg..end]);
                }
                while end < input.len() && (bytes[end] == b'\n' || bytes[end] == b'\r') {
                    // add one \n per line ending, folding \r\n
                    if bytes[end] == b'\n' || (end + 1 < input.len() && bytes[end + 1] != b'\n') {
                        text.push('\n');
                    }
                    end += 1;
                }
                beg = end;
            }
        }

        // second pass: actual rendering
        let mut ob = String::with_capacity(text.len() + text.len() / 2);
        self.renderer.doc_header(&mut ob)?;
        if !text.is_empty() {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            self.parse_block(&mut ob, &text)?;
        }
        self.renderer.doc_footer(&mut ob)?;
        Ok(ob)
    }

    /// True once the configured nesting limit is reached; callers downgrade
    /// their construct to literal text instead of recursing.
    pub(crate) fn nesting_exceeded(&self) -> bool {
        self.nesting >= self.max_nesting
    }

    /// Tries to match a reference definition line
    /// (`[label]: destination "title"`, title optionally on its own line)
    /// starting at `beg`. On a match the definition is recorded and the
    /// index of its final line ending is returned, so the caller skips the
    /// whole definition.
    fn scan_refdef(&mut self, data: &str, beg: usize) -> Option<usize> {
        let bytes = data.as_bytes();
        let end = data.len();
        if beg + 3 >= end {
            return None;
        }

        // up to 3 optional leading spaces
        let mut i = 0;
        while i < 3 && bytes[beg + i] == b' ' {
            i += 1;
        }
        if bytes[beg + i] == b' ' {
            return None;
        }
        i += beg;

        // label part: anything but a newline between brackets
        if bytes[i] != b'[' {
            return None;
        }
        i += 1;
        let id_offset = i;
        while i < end && bytes[i] != b'\n' && bytes[i] != b'\r' && bytes[i] != b']' {
            i += 1;
        }
        if i >= end || bytes[i] != b']' {
            return None;
        }
        let id_end = i;

        // spacer: colon, spaces, at most one newline, spaces
        i += 1;
        if i >= end || bytes[i] != b':' {
            return None;
        }
        i += 1;
        while i < end && bytes[i] == b' ' {
            i += 1;
        }
        if i < end && (bytes[i] == b'\n' || bytes[i] == b'\r') {
            i += 1;
            if i < end && bytes[i] == b'\n' && bytes[i - 1] == b'\r' {
                i += 1;
            }
        }
        while i < end && bytes[i] == b' ' {
            i += 1;
        }
        if i >= end {
            return None;
        }

        // destination: whitespace-free sequence, optionally angle-bracketed
        if bytes[i] == b'<' {
            i += 1;
        }
        let link_offset = i;
        while i < end && bytes[i] != b' ' && bytes[i] != b'\n' && bytes[i] != b'\r' {
            i += 1;
        }
        let link_end = if bytes[i - 1] == b'>' { i - 1 } else { i };

        // only a title or the line ending may follow the destination
        while i < end && bytes[i] == b' ' {
            i += 1;
        }
        if i < end
            && bytes[i] != b'\n'
            && bytes[i] != b'\r'
            && bytes[i] != b'\''
            && bytes[i] != b'"'
            && bytes[i] != b'('
        {
            return None;
        }

        let mut line_end = None;
        if i >= end || bytes[i] == b'\r' || bytes[i] == b'\n' {
            line_end = Some(i.min(end));
        }
        if i + 1 < end && bytes[i] == b'\n' && bytes[i + 1] == b'\r' {
            line_end = Some(i + 1);
        }
        if let Some(le) = line_end {
            i = le + 1;
            while i < end && bytes[i] == b' ' {
                i += 1;
            }
        }

        // optional title: a quoted or parenthesized sequence alone on its line
        let mut title_offset = 0;
        let mut title_end = 0;
        if i + 1 < end && (bytes[i] == b'\'' || bytes[i] == b'"' || bytes[i] == b'(') {
            i += 1;
            title_offset = i;
            while i < end && bytes[i] != b'\n' && bytes[i] != b'\r' {
                i += 1;
            }
            let full_end = if i + 1 < end && bytes[i] == b'\n' && bytes[i + 1] == b'\r' {
                i + 1
            } else {
                i
            };
            // step back over trailing spaces to the closing delimiter
            i -= 1;
            while i > title_offset && bytes[i] == b' ' {
                i -= 1;
            }
            if i > title_offset && matches!(bytes[i], b'\'' | b'"' | b')') {
                line_end = Some(full_end);
                title_end = i;
            }
        }

        let line_end = line_end?;
        if link_end == link_offset {
            return None;
        }

        let mut dest = String::new();
        unescape_into(&mut dest, &data[link_offset..link_end]);
        let title = if title_end > title_offset {
            let mut title = String::new();
            unescape_into(&mut title, &data[title_offset..title_end]);
            Some(title)
        } else {
            None
        };
        self.refdefs.define(&data[id_offset..id_end], LinkDef { dest, title });
        Some(line_end)
    }
}
