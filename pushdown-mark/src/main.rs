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

//! Command line tool to exercise pushdown-mark.

#![forbid(unsafe_code)]

use pushdown_mark::{html, smartypants, Options, Parser};

use std::env;
use std::fs::File;
use std::io::{self, Read};

fn brief(program: &str) -> String {
    format!(
        "Usage: {} [options] [FILE]\n\n{}",
        program, "Reads markdown from file or standard input and emits HTML.",
    )
}

pub fn main() -> std::io::Result<()> {
    let args: Vec<_> = env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optflag("h", "help", "this help message");
    opts.optflag("T", "enable-tables", "enable tables");
    opts.optflag("F", "enable-fenced-code", "enable fenced code blocks");
    opts.optflag("A", "enable-autolink", "enable bare URL and email autolinks");
    opts.optflag("S", "enable-strikethrough", "enable strikethrough");
    opts.optflag("P", "enable-superscript", "enable superscript");
    opts.optflag(
        "",
        "enable-space-headers",
        "require a space after ATX header markers",
    );
    opts.optflag(
        "",
        "enable-lax-spacing",
        "let blocks interrupt paragraphs without a blank line",
    );
    opts.optflag(
        "",
        "enable-no-intra-emphasis",
        "suppress emphasis inside words",
    );
    opts.optflag("", "smarty", "run the SmartyPants pass over the output");
    opts.optopt("", "max-nesting", "maximum container nesting depth", "DEPTH");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("{}\n{}", err, opts.usage(&brief(&args[0])));
            std::process::exit(1);
        }
    };
    if matches.opt_present("help") {
        println!("{}", opts.usage(&brief(&args[0])));
        return Ok(());
    }

    let mut options = Options::empty();
    if matches.opt_present("enable-tables") {
        options.insert(Options::ENABLE_TABLES);
    }
    if matches.opt_present("enable-fenced-code") {
        options.insert(Options::ENABLE_FENCED_CODE);
    }
    if matches.opt_present("enable-autolink") {
        options.insert(Options::ENABLE_AUTOLINK);
    }
    if matches.opt_present("enable-strikethrough") {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if matches.opt_present("enable-superscript") {
        options.insert(Options::ENABLE_SUPERSCRIPT);
    }
    if matches.opt_present("enable-space-headers") {
        options.insert(Options::ENABLE_SPACE_HEADERS);
    }
    if matches.opt_present("enable-lax-spacing") {
        options.insert(Options::ENABLE_LAX_SPACING);
    }
    if matches.opt_present("enable-no-intra-emphasis") {
        options.insert(Options::ENABLE_NO_INTRA_EMPHASIS);
    }

    let mut input = String::new();
    match matches.free.first() {
        Some(filename) => {
            File::open(filename)?.read_to_string(&mut input)?;
        }
        None => {
            io::stdin().read_to_string(&mut input)?;
        }
    }

    let mut renderer = html::HtmlRenderer::new();
    let mut parser = Parser::new_ext(&mut renderer, options);
    if let Some(depth) = matches.opt_str("max-nesting").and_then(|s| s.parse().ok()) {
        parser = parser.with_max_nesting(depth);
    }
    let output = match parser.render(&input) {
        Ok(output) => output,
        Err(never) => match never {},
    };

    if matches.opt_present("smarty") {
        let mut smartened = String::with_capacity(output.len());
        smartypants::smartypants(&mut smartened, &output);
        print!("{}", smartened);
    } else {
        print!("{}", output);
    }
    Ok(())
}
