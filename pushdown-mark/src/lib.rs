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

//! Push parser for a Markdown dialect. This crate provides a [`Parser`] which
//! walks a document and delivers every recognized construct to an
//! implementation of the [`Render`] trait. The bundled [HTML module](html)
//! implements that trait for HTML output.
//!
//! By default only the core dialect is enabled. Extensions like tables,
//! fenced code blocks or autolinks are enabled by setting the corresponding
//! flags in the [`Options`] struct.
//!
//! # Example
//! ```rust
//! use pushdown_mark::{Options, Parser};
//!
//! let markdown_input = "Hello world, this is a ~~complicated~~ *very simple* example.";
//!
//! // Strikethrough is an extension and must be enabled explicitly.
//! let mut options = Options::empty();
//! options.insert(Options::ENABLE_STRIKETHROUGH);
//!
//! # #[cfg(feature = "html")] {
//! let mut renderer = pushdown_mark::html::HtmlRenderer::new();
//! let parser = Parser::new_ext(&mut renderer, options);
//! let html_output = parser.render(markdown_input).unwrap();
//!
//! let expected_html =
//!     "<p>Hello world, this is a <del>complicated</del> <em>very simple</em> example.</p>\n";
//! assert_eq!(expected_html, &html_output);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "html")]
pub mod smartypants;

mod autolink;
mod block;
mod inline;
mod parse;
mod scanners;

use std::fmt::Display;

pub use crate::parse::Parser;

/// Default maximum depth of nested containers before the nesting guard
/// downgrades a construct to literal text.
pub const DEFAULT_MAX_NESTING: usize = 16;

bitflags::bitflags! {
    /// Option struct containing flags for enabling extra features that are
    /// not part of the core dialect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Options: u32 {
        /// Suppress emphasis for `_` runs inside words, so identifiers like
        /// `snake_case_example` render verbatim.
        const ENABLE_NO_INTRA_EMPHASIS = 1 << 1;
        /// Tables with a header row and a `:`/`-` alignment row.
        const ENABLE_TABLES = 1 << 2;
        /// Code blocks fenced by ``` or ~~~ with an optional info string.
        const ENABLE_FENCED_CODE = 1 << 3;
        /// Recognition of bare URLs, email addresses and `www.` domains in
        /// running text.
        const ENABLE_AUTOLINK = 1 << 4;
        /// `~~strike~~`
        const ENABLE_STRIKETHROUGH = 1 << 5;
        /// Require a space between the `#` marker and an ATX header title,
        /// so `#hashtag` is not a header.
        const ENABLE_SPACE_HEADERS = 1 << 6;
        /// `^superscript` and `^(grouped superscript)`
        const ENABLE_SUPERSCRIPT = 1 << 7;
        /// Let block constructs interrupt a paragraph without a preceding
        /// blank line.
        const ENABLE_LAX_SPACING = 1 << 8;
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum HeadingLevel {
    H1 = 1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::H1 => write!(f, "h1"),
            Self::H2 => write!(f, "h2"),
            Self::H3 => write!(f, "h3"),
            Self::H4 => write!(f, "h4"),
            Self::H5 => write!(f, "h5"),
            Self::H6 => write!(f, "h6"),
        }
    }
}

/// Returned when trying to convert a `usize` into a `HeadingLevel` but it
/// fails because the usize isn't a valid heading level.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct InvalidHeadingLevel(usize);

impl TryFrom<usize> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            _ => Err(InvalidHeadingLevel(value)),
        }
    }
}

/// Table column text alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// Default text alignment.
    None,
    Left,
    Center,
    Right,
}

bitflags::bitflags! {
    /// Flags describing a list or a list item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ListFlags: u32 {
        /// The list is ordered (`1.` markers rather than `-`/`*`/`+`).
        const ORDERED = 1 << 0;
        /// The item contains block-level content: blank lines separated it
        /// from its siblings, so the list is loose.
        const BLOCK = 1 << 1;
    }
}

/// Kind of a recognized autolink.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutolinkKind {
    /// A normal URL, with an explicit scheme or a `www.` prefix.
    Url,
    /// An email address; renderers usually prepend `mailto:`.
    Email,
}

/// The output interface. One method per block construct and one per inline
/// construct; the parser calls these in document order while it walks the
/// input.
///
/// Block content arrives fully rendered: by the time [`paragraph`] is called,
/// `content` already contains whatever the inline callbacks produced for the
/// paragraph's text. The renderer's job is to wrap it. Every method has a
/// default implementation that emits its content unwrapped, so a renderer
/// only needs to override the constructs it styles.
///
/// Any method may fail; an `Err` aborts the render immediately and the
/// caller must not assume the output is complete.
///
/// [`paragraph`]: Render::paragraph
pub trait Render {
    type Error;

    /// Called once before the first block of the document.
    fn doc_header(&mut self, _ob: &mut String) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after the last block of the document.
    fn doc_footer(&mut self, _ob: &mut String) -> Result<(), Self::Error> {
        Ok(())
    }

    fn paragraph(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn header(
        &mut self,
        ob: &mut String,
        content: &str,
        _level: HeadingLevel,
    ) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn block_quote(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    /// A fenced or indented code block. `info` carries the fence info string
    /// when one was given.
    fn block_code(
        &mut self,
        ob: &mut String,
        text: &str,
        _info: Option<&str>,
    ) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    fn block_html(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    fn hrule(&mut self, _ob: &mut String) -> Result<(), Self::Error> {
        Ok(())
    }

    fn list(&mut self, ob: &mut String, content: &str, _flags: ListFlags) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn list_item(
        &mut self,
        ob: &mut String,
        content: &str,
        _flags: ListFlags,
    ) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    /// A table; `header` and `body` contain the rendered header row and the
    /// rendered body rows.
    fn table(&mut self, ob: &mut String, header: &str, body: &str) -> Result<(), Self::Error> {
        ob.push_str(header);
        ob.push_str(body);
        Ok(())
    }

    fn table_row(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn table_cell(
        &mut self,
        ob: &mut String,
        content: &str,
        _align: Alignment,
        _header: bool,
    ) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn double_emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn strikethrough(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn superscript(&mut self, ob: &mut String, content: &str) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn codespan(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    /// A hard line break: the source line ended with two or more spaces.
    /// Soft line breaks are not reported; their newline stays in the text
    /// passed to [`normal_text`](Render::normal_text).
    fn line_break(&mut self, ob: &mut String) -> Result<(), Self::Error> {
        ob.push('\n');
        Ok(())
    }

    /// An inline or reference link. `content` is the rendered link text.
    fn link(
        &mut self,
        ob: &mut String,
        content: &str,
        _dest: &str,
        _title: Option<&str>,
    ) -> Result<(), Self::Error> {
        ob.push_str(content);
        Ok(())
    }

    fn image(
        &mut self,
        ob: &mut String,
        _dest: &str,
        _title: Option<&str>,
        alt: &str,
    ) -> Result<(), Self::Error> {
        ob.push_str(alt);
        Ok(())
    }

    fn autolink(
        &mut self,
        ob: &mut String,
        link: &str,
        _kind: AutolinkKind,
    ) -> Result<(), Self::Error> {
        ob.push_str(link);
        Ok(())
    }

    /// A span of raw inline HTML, tag or comment, passed through verbatim.
    fn raw_html(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    /// A syntactically valid character reference, including the `&` and `;`.
    fn entity(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }

    /// Literal text between special constructs. This is where an HTML
    /// renderer applies body-text escaping.
    fn normal_text(&mut self, ob: &mut String, text: &str) -> Result<(), Self::Error> {
        ob.push_str(text);
        Ok(())
    }
}
