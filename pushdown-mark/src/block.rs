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

//! Block-level parsing: recursive-descent segmentation of the document into
//! block constructs, each handing its inline text to the span parser.

use crate::parse::Parser;
use crate::scanners::{
    is_space, scan_atx_start, scan_block_tag, scan_blockquote_prefix, scan_code_prefix,
    scan_codefence, scan_empty_line, scan_hrule, scan_line, scan_ordered_prefix,
    scan_setext_underline, scan_unordered_prefix,
};
use crate::{Alignment, HeadingLevel, ListFlags, Options, Render};

impl<'r, R: Render> Parser<'r, R> {
    /// Recognizes the block construct starting at the current offset, in
    /// priority order, and consumes it. A construct that only partially
    /// matches degrades to a lower-priority one, with the paragraph as the
    /// catch-all.
    pub(crate) fn parse_block(&mut self, ob: &mut String, data: &str) -> Result<(), R::Error> {
        let mut beg = 0;
        while beg < data.len() {
            let txt = &data[beg..];
            if self.options.contains(Options::ENABLE_FENCED_CODE) {
                if let Some(n) = self.parse_fencedcode(ob, txt)? {
                    beg += n;
                    continue;
                }
            }
            if scan_atx_start(txt, self.options.contains(Options::ENABLE_SPACE_HEADERS)) {
                beg += self.parse_atxheader(ob, txt)?;
                continue;
            }
            if let Some(n) = scan_empty_line(txt) {
                beg += n;
                continue;
            }
            if scan_hrule(txt) {
                self.renderer.hrule(ob)?;
                beg = scan_line(data, beg);
                continue;
            }
            if scan_blockquote_prefix(txt).is_some() {
                beg += self.parse_blockquote(ob, txt)?;
                continue;
            }
            if scan_code_prefix(txt).is_some() {
                beg += self.parse_blockcode(ob, txt)?;
                continue;
            }
            if scan_unordered_prefix(txt).is_some() {
                beg += self.parse_list(ob, txt, ListFlags::empty())?;
                continue;
            }
            if scan_ordered_prefix(txt).is_some() {
                beg += self.parse_list(ob, txt, ListFlags::ORDERED)?;
                continue;
            }
            if self.options.contains(Options::ENABLE_TABLES) {
                if let Some(n) = self.parse_table(ob, txt)? {
                    beg += n;
                    continue;
                }
            }
            if txt.starts_with('<') {
                if let Some(n) = self.parse_htmlblock(ob, txt, true)? {
                    beg += n;
                    continue;
                }
            }
            beg += self.parse_paragraph(ob, txt)?;
        }
        Ok(())
    }

    /// `# title`, up to six markers, optional closing marker run.
    fn parse_atxheader(&mut self, ob: &mut String, data: &str) -> Result<usize, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut level = 0;
        while level < size && level < 6 && bytes[level] == b'#' {
            level += 1;
        }
        let mut i = level;
        while i < size && bytes[i] == b' ' {
            i += 1;
        }
        let mut end = i;
        while end < size && bytes[end] != b'\n' {
            end += 1;
        }
        let skip = end;
        while end > 0 && bytes[end - 1] == b'#' {
            end -= 1;
        }
        while end > 0 && bytes[end - 1] == b' ' {
            end -= 1;
        }
        if end > i {
            let level = HeadingLevel::try_from(level).unwrap_or(HeadingLevel::H6);
            let mut work = self.span_bufs.checkout();
            self.parse_inline(&mut work, &data[i..end])?;
            self.renderer.header(ob, &work, level)?;
            self.span_bufs.release(work);
        }
        Ok(skip)
    }

    /// Gathers paragraph lines up to a blank line or an interrupting
    /// construct. A setext underline turns the preceding line into a
    /// header instead.
    fn parse_paragraph(&mut self, ob: &mut String, data: &str) -> Result<usize, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let lax = self.options.contains(Options::ENABLE_LAX_SPACING);
        let space_headers = self.options.contains(Options::ENABLE_SPACE_HEADERS);

        let mut i = 0;
        let mut end = 0;
        let mut level = None;
        while i < size {
            end = scan_line(data, i);
            if scan_empty_line(&data[i..]).is_some() {
                break;
            }
            if let Some(l) = scan_setext_underline(&data[i..]) {
                if i > 0 {
                    level = Some(l);
                    break;
                }
            }
            if lax && !bytes[i].is_ascii_alphanumeric() {
                if scan_atx_start(&data[i..], space_headers) || scan_hrule(&data[i..]) {
                    end = i;
                    break;
                }
                if bytes[i] == b'<' && self.parse_htmlblock(ob, &data[i..], false)?.is_some() {
                    end = i;
                    break;
                }
            }
            i = end;
        }

        let mut work_size = i;
        while work_size > 0 && bytes[work_size - 1] == b'\n' {
            work_size -= 1;
        }

        match level {
            None => {
                let mut tmp = self.block_bufs.checkout();
                self.parse_inline(&mut tmp, &data[..work_size])?;
                self.renderer.paragraph(ob, &tmp)?;
                self.block_bufs.release(tmp);
            }
            Some(level) => {
                // the last gathered line is the header; anything before it
                // is emitted as its own paragraph
                let mut hdr_begin = 0;
                let hdr_end = work_size;
                if work_size > 0 {
                    let mut ws = work_size - 1;
                    while ws > 0 && bytes[ws] != b'\n' {
                        ws -= 1;
                    }
                    if bytes[ws] == b'\n' {
                        let header_line = ws + 1;
                        while ws > 0 && bytes[ws - 1] == b'\n' {
                            ws -= 1;
                        }
                        if ws > 0 {
                            let mut tmp = self.block_bufs.checkout();
                            self.parse_inline(&mut tmp, &data[..ws])?;
                            self.renderer.paragraph(ob, &tmp)?;
                            self.block_bufs.release(tmp);
                            hdr_begin = header_line;
                        }
                    }
                }
                let mut work = self.span_bufs.checkout();
                self.parse_inline(&mut work, &data[hdr_begin..hdr_end])?;
                self.renderer.header(ob, &work, level)?;
                self.span_bufs.release(work);
            }
        }
        Ok(end)
    }

    /// Strips quote markers line by line, then recurses into the interior.
    /// At the nesting limit the whole quote stays literal, markers and all.
    fn parse_blockquote(&mut self, ob: &mut String, data: &str) -> Result<usize, R::Error> {
        let size = data.len();
        let mut work = self.block_bufs.checkout();
        let mut beg = 0;
        let mut end = 0;
        while beg < size {
            end = scan_line(data, beg);
            if let Some(pre) = scan_blockquote_prefix(&data[beg..end]) {
                beg += pre;
            } else if scan_empty_line(&data[beg..end]).is_some()
                && (end >= size
                    || (scan_blockquote_prefix(&data[end..]).is_none()
                        && scan_empty_line(&data[end..]).is_none()))
            {
                // empty line followed by a non-quote line ends the quote
                break;
            }
            if beg < end {
                work.push_str(&data[beg..end]);
            }
            beg = end;
        }

        if self.nesting_exceeded() {
            self.renderer.normal_text(ob, &data[..end])?;
            self.block_bufs.release(work);
            return Ok(end);
        }
        self.nesting += 1;
        let mut out = self.block_bufs.checkout();
        let res = self.parse_block(&mut out, &work);
        self.nesting -= 1;
        res?;
        self.renderer.block_quote(ob, &out)?;
        self.block_bufs.release(out);
        self.block_bufs.release(work);
        Ok(end)
    }

    /// Four-space indented code; blank lines join, anything else ends it.
    fn parse_blockcode(&mut self, ob: &mut String, data: &str) -> Result<usize, R::Error> {
        let size = data.len();
        let mut work = self.block_bufs.checkout();
        let mut beg = 0;
        while beg < size {
            let end = scan_line(data, beg);
            if scan_code_prefix(&data[beg..end]).is_some() {
                beg += 4;
            } else if scan_empty_line(&data[beg..end]).is_none() {
                // non-empty non-prefixed line: block end
                break;
            }
            if beg < end {
                if scan_empty_line(&data[beg..end]).is_some() {
                    work.push('\n');
                } else {
                    work.push_str(&data[beg..end]);
                }
            }
            beg = end;
        }
        while work.ends_with('\n') {
            work.truncate(work.len() - 1);
        }
        work.push('\n');
        self.renderer.block_code(ob, &work, None)?;
        self.block_bufs.release(work);
        Ok(beg)
    }

    /// A ```-fenced block. The opening line decides; without a closing
    /// fence the block runs to the end of the input.
    fn parse_fencedcode(&mut self, ob: &mut String, data: &str) -> Result<Option<usize>, R::Error> {
        let size = data.len();
        let Some((mut beg, info)) = scan_codefence(data) else {
            return Ok(None);
        };
        let mut work = self.block_bufs.checkout();
        while beg < size {
            if let Some((fence_end, trail)) = scan_codefence(&data[beg..]) {
                if trail.is_empty() {
                    beg += fence_end;
                    break;
                }
            }
            let end = scan_line(data, beg);
            if beg < end {
                if scan_empty_line(&data[beg..end]).is_some() {
                    work.push('\n');
                } else {
                    work.push_str(&data[beg..end]);
                }
            }
            beg = end;
        }
        if !work.is_empty() && !work.ends_with('\n') {
            work.push('\n');
        }
        let info = if info.is_empty() { None } else { Some(info) };
        self.renderer.block_code(ob, &work, info)?;
        self.block_bufs.release(work);
        Ok(Some(beg))
    }

    /// Header row, alignment row, then body rows while they keep a cell
    /// separator.
    fn parse_table(&mut self, ob: &mut String, data: &str) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut header_work = self.span_bufs.checkout();
        let Some((mut i, aligns)) = self.parse_table_header(&mut header_work, data)? else {
            self.span_bufs.release(header_work);
            return Ok(None);
        };
        let mut body_work = self.block_bufs.checkout();
        while i < size {
            let row_start = i;
            let mut pipes = 0;
            while i < size && bytes[i] != b'\n' {
                if bytes[i] == b'|' {
                    pipes += 1;
                }
                i += 1;
            }
            if pipes == 0 || i == size {
                i = row_start;
                break;
            }
            self.parse_table_row(&mut body_work, &data[row_start..i], &aligns, false)?;
            i += 1;
        }
        self.renderer.table(ob, &header_work, &body_work)?;
        self.span_bufs.release(header_work);
        self.block_bufs.release(body_work);
        Ok(Some(i))
    }

    /// Validates the header and alignment rows; on success renders the
    /// header row into `ob` and returns the consumed length and per-column
    /// alignments.
    fn parse_table_header(
        &mut self,
        ob: &mut String,
        data: &str,
    ) -> Result<Option<(usize, Vec<Alignment>)>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut i = 0;
        let mut pipes: i32 = 0;
        while i < size && bytes[i] != b'\n' {
            if bytes[i] == b'|' {
                pipes += 1;
            }
            i += 1;
        }
        if i == size || pipes == 0 {
            return Ok(None);
        }
        let mut header_end = i;
        while header_end > 0 && is_space(bytes[header_end - 1]) {
            header_end -= 1;
        }
        // leading and trailing pipes are decoration, not separators
        if bytes[0] == b'|' {
            pipes -= 1;
        }
        if header_end > 0 && bytes[header_end - 1] == b'|' {
            pipes -= 1;
        }
        if pipes < 0 {
            return Ok(None);
        }
        let columns = pipes as usize + 1;
        let mut aligns = vec![Alignment::None; columns];

        // parse the alignment underline
        i += 1;
        if i < size && bytes[i] == b'|' {
            i += 1;
        }
        let mut under_end = i;
        while under_end < size && bytes[under_end] != b'\n' {
            under_end += 1;
        }
        let mut col = 0;
        while col < columns && i < under_end {
            let mut dashes = 0;
            let mut left = false;
            let mut right = false;
            while i < under_end && bytes[i] == b' ' {
                i += 1;
            }
            if i < under_end && bytes[i] == b':' {
                i += 1;
                left = true;
                dashes += 1;
            }
            while i < under_end && bytes[i] == b'-' {
                i += 1;
                dashes += 1;
            }
            if i < under_end && bytes[i] == b':' {
                i += 1;
                right = true;
                dashes += 1;
            }
            while i < under_end && bytes[i] == b' ' {
                i += 1;
            }
            if i < under_end && bytes[i] != b'|' {
                break;
            }
            if dashes < 3 {
                break;
            }
            aligns[col] = match (left, right) {
                (true, true) => Alignment::Center,
                (true, false) => Alignment::Left,
                (false, true) => Alignment::Right,
                (false, false) => Alignment::None,
            };
            i += 1;
            col += 1;
        }
        if col < columns {
            return Ok(None);
        }
        self.parse_table_row(ob, &data[..header_end], &aligns, true)?;
        Ok(Some(((under_end + 1).min(size), aligns)))
    }

    fn parse_table_row(
        &mut self,
        ob: &mut String,
        data: &str,
        aligns: &[Alignment],
        header: bool,
    ) -> Result<(), R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        let mut row_work = self.span_bufs.checkout();
        let mut i = 0;
        if i < size && bytes[i] == b'|' {
            i += 1;
        }
        let mut col = 0;
        while col < aligns.len() && i < size {
            while i < size && is_space(bytes[i]) {
                i += 1;
            }
            let cell_start = i;
            while i < size && bytes[i] != b'|' {
                i += 1;
            }
            let mut cell_end = i;
            while cell_end > cell_start && is_space(bytes[cell_end - 1]) {
                cell_end -= 1;
            }
            let mut cell_work = self.span_bufs.checkout();
            self.parse_inline(&mut cell_work, &data[cell_start..cell_end])?;
            self.renderer
                .table_cell(&mut row_work, &cell_work, aligns[col], header)?;
            self.span_bufs.release(cell_work);
            i += 1;
            col += 1;
        }
        while col < aligns.len() {
            self.renderer.table_cell(&mut row_work, "", aligns[col], header)?;
            col += 1;
        }
        self.renderer.table_row(ob, &row_work)?;
        self.span_bufs.release(row_work);
        Ok(())
    }

    /// A block of raw HTML: a known block-level tag with a matching closing
    /// tag on a line of its own, or the laxist comment and `<hr>` forms.
    /// `do_render` false only probes, for paragraph interruption.
    fn parse_htmlblock(
        &mut self,
        ob: &mut String,
        data: &str,
        do_render: bool,
    ) -> Result<Option<usize>, R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();
        if size < 2 || bytes[0] != b'<' {
            return Ok(None);
        }
        let Some(curtag) = scan_block_tag(&data[1..]) else {
            // HTML comment, laxist form
            if size > 5 && bytes[1] == b'!' && bytes[2] == b'-' && bytes[3] == b'-' {
                let mut i = 5;
                while i < size && !(bytes[i - 2] == b'-' && bytes[i - 1] == b'-' && bytes[i] == b'>')
                {
                    i += 1;
                }
                i += 1;
                if i < size {
                    if let Some(j) = scan_empty_line(&data[i..]) {
                        let end = (i + j).min(size);
                        if do_render {
                            self.renderer.block_html(ob, &data[..end])?;
                        }
                        return Ok(Some(end));
                    }
                }
            }
            // HR, the only self-closing block tag considered
            if size > 4 && matches!(bytes[1], b'h' | b'H') && matches!(bytes[2], b'r' | b'R') {
                let mut i = 3;
                while i < size && bytes[i] != b'>' {
                    i += 1;
                }
                if i + 1 < size {
                    i += 1;
                    if let Some(j) = scan_empty_line(&data[i..]) {
                        let end = (i + j).min(size);
                        if do_render {
                            self.renderer.block_html(ob, &data[..end])?;
                        }
                        return Ok(Some(end));
                    }
                }
            }
            return Ok(None);
        };

        // looking for a matching closing tag followed by a blank line
        let tag_size = curtag.len();
        let mut i = 1;
        let mut found = None;
        while i < size {
            i += 1;
            while i < size && !(bytes[i - 1] == b'<' && bytes[i] == b'/') {
                i += 1;
            }
            if i + 2 + tag_size >= size {
                break;
            }
            if let Some(end) = htmlblock_end(curtag, &data[i - 1..]) {
                found = Some((i - 1 + end).min(size));
                break;
            }
        }
        let Some(end) = found else {
            return Ok(None);
        };
        if do_render {
            self.renderer.block_html(ob, &data[..end])?;
        }
        Ok(Some(end))
    }

    /// Consumes consecutive items of one list kind, then wraps them.
    fn parse_list(
        &mut self,
        ob: &mut String,
        data: &str,
        mut flags: ListFlags,
    ) -> Result<usize, R::Error> {
        let mut work = self.block_bufs.checkout();
        let mut i = 0;
        while i < data.len() {
            let (j, end_of_list) = self.parse_listitem(&mut work, &data[i..], &mut flags)?;
            i += j;
            if j == 0 || end_of_list {
                break;
            }
        }
        self.renderer.list(ob, &work, flags)?;
        self.block_bufs.release(work);
        Ok(i)
    }

    /// Consumes one list item with its continuation lines and sublists.
    /// Blank lines inside mark the item (and the rest of the list) as
    /// loose, switching its content from inline to block parsing.
    fn parse_listitem(
        &mut self,
        ob: &mut String,
        data: &str,
        flags: &mut ListFlags,
    ) -> Result<(usize, bool), R::Error> {
        let bytes = data.as_bytes();
        let size = data.len();

        // keeping track of the first indentation prefix
        let mut orgpre = 0;
        while orgpre < 3 && orgpre < size && bytes[orgpre] == b' ' {
            orgpre += 1;
        }
        let beg = match scan_unordered_prefix(data).or_else(|| scan_ordered_prefix(data)) {
            Some(beg) => beg,
            None => return Ok((0, false)),
        };
        let mut end = scan_line(data, beg);

        let mut work = self.span_bufs.checkout();
        work.push_str(&data[beg..end]);
        let mut beg = end;

        let mut in_empty = false;
        let mut has_inside_empty = false;
        let mut in_fence = false;
        let mut sublist = 0;
        let mut end_of_list = false;

        while beg < size {
            end = scan_line(data, beg);

            if scan_empty_line(&data[beg..end]).is_some() {
                in_empty = true;
                beg = end;
                continue;
            }

            let mut pre = 0;
            while pre < 4 && beg + pre < end && bytes[beg + pre] == b' ' {
                pre += 1;
            }
            let line = &data[beg + pre..end];

            if self.options.contains(Options::ENABLE_FENCED_CODE) && scan_codefence(line).is_some()
            {
                in_fence = !in_fence;
            }

            // only look for new list items outside fenced code
            let (next_uli, next_oli) = if in_fence {
                (None, None)
            } else {
                (scan_unordered_prefix(line), scan_ordered_prefix(line))
            };

            // a marker of the other kind after a blank line starts a new list
            if in_empty
                && ((flags.contains(ListFlags::ORDERED) && next_uli.is_some())
                    || (!flags.contains(ListFlags::ORDERED) && next_oli.is_some()))
            {
                end_of_list = true;
                break;
            }

            let is_item = (next_uli.is_some() && !scan_hrule(line)) || next_oli.is_some();
            if is_item {
                if in_empty {
                    has_inside_empty = true;
                }
                if pre == orgpre {
                    // same indentation: the next sibling item starts here
                    break;
                }
                if sublist == 0 {
                    sublist = work.len();
                }
            } else if in_empty && pre < 4 {
                // only indented content joins after an empty line
                end_of_list = true;
                break;
            } else if in_empty {
                work.push('\n');
                has_inside_empty = true;
            }
            in_empty = false;

            work.push_str(&data[beg + pre..end]);
            beg = end;
        }

        if has_inside_empty {
            *flags |= ListFlags::BLOCK;
        }

        if self.nesting_exceeded() {
            self.renderer.normal_text(ob, &data[..beg])?;
            self.span_bufs.release(work);
            return Ok((beg, end_of_list));
        }

        let mut inter = self.span_bufs.checkout();
        self.nesting += 1;
        let res = (|| -> Result<(), R::Error> {
            if flags.contains(ListFlags::BLOCK) {
                if sublist > 0 && sublist < work.len() {
                    self.parse_block(&mut inter, &work[..sublist])?;
                    self.parse_block(&mut inter, &work[sublist..])?;
                } else {
                    self.parse_block(&mut inter, &work)?;
                }
            } else if sublist > 0 && sublist < work.len() {
                self.parse_inline(&mut inter, &work[..sublist])?;
                self.parse_block(&mut inter, &work[sublist..])?;
            } else {
                self.parse_inline(&mut inter, &work)?;
            }
            Ok(())
        })();
        self.nesting -= 1;
        res?;

        self.renderer.list_item(ob, &inter, *flags)?;
        self.span_bufs.release(inter);
        self.span_bufs.release(work);
        Ok((beg, end_of_list))
    }
}

fn htmlblock_end(tag: &str, data: &str) -> Option<usize> {
    // data starts at the "</"
    let bytes = data.as_bytes();
    let tag_len = tag.len();
    if data.len() < tag_len + 3 {
        return None;
    }
    if !bytes[2..2 + tag_len].eq_ignore_ascii_case(tag.as_bytes()) {
        return None;
    }
    if bytes[2 + tag_len] != b'>' {
        return None;
    }
    // the closing tag must sit alone on its line, an extra blank line is
    // consumed with the block
    let mut i = tag_len + 3;
    let w = scan_empty_line(&data[i..])?;
    i += w;
    if i < data.len() {
        if let Some(w) = scan_empty_line(&data[i..]) {
            i += w;
        }
    }
    Some(i.min(data.len()))
}
