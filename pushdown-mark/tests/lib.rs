use std::convert::Infallible;

use pushdown_mark::{
    Alignment, AutolinkKind, HeadingLevel, ListFlags, Options, Parser, Render,
};

/// Records every callback in document order while still flattening content
/// into the output buffers, so enclosing constructs see their children's
/// text.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Recorder {
    fn run(input: &str, options: Options, max_nesting: Option<usize>) -> Vec<String> {
        let mut recorder = Recorder::default();
        let mut parser = Parser::new_ext(&mut recorder, options);
        if let Some(depth) = max_nesting {
            parser = parser.with_max_nesting(depth);
        }
        parser.render(input).unwrap();
        recorder.events
    }
}

impl Render for Recorder {
    type Error = Infallible;

    fn paragraph(&mut self, ob: &mut String, content: &str) -> Result<(), Infallible> {
        self.events.push(format!("paragraph({content})"));
        ob.push_str(content);
        Ok(())
    }

    fn header(
        &mut self,
        ob: &mut String,
        content: &str,
        level: HeadingLevel,
    ) -> Result<(), Infallible> {
        self.events.push(format!("header({level}, {content})"));
        ob.push_str(content);
        Ok(())
    }

    fn block_quote(&mut self, ob: &mut String, content: &str) -> Result<(), Infallible> {
        self.events.push(format!("blockquote({content})"));
        ob.push_str(content);
        Ok(())
    }

    fn block_code(
        &mut self,
        ob: &mut String,
        text: &str,
        info: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events.push(format!("blockcode({text}, {info:?})"));
        ob.push_str(text);
        Ok(())
    }

    fn hrule(&mut self, _ob: &mut String) -> Result<(), Infallible> {
        self.events.push("hrule".to_string());
        Ok(())
    }

    fn list(&mut self, ob: &mut String, content: &str, flags: ListFlags) -> Result<(), Infallible> {
        self.events
            .push(format!("list(ordered={})", flags.contains(ListFlags::ORDERED)));
        ob.push_str(content);
        Ok(())
    }

    fn list_item(
        &mut self,
        ob: &mut String,
        content: &str,
        flags: ListFlags,
    ) -> Result<(), Infallible> {
        self.events.push(format!(
            "listitem({content}, loose={})",
            flags.contains(ListFlags::BLOCK)
        ));
        ob.push_str(content);
        Ok(())
    }

    fn table_cell(
        &mut self,
        ob: &mut String,
        content: &str,
        align: Alignment,
        header: bool,
    ) -> Result<(), Infallible> {
        self.events
            .push(format!("cell({content}, {align:?}, header={header})"));
        ob.push_str(content);
        Ok(())
    }

    fn emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Infallible> {
        self.events.push(format!("emphasis({content})"));
        ob.push_str(content);
        Ok(())
    }

    fn double_emphasis(&mut self, ob: &mut String, content: &str) -> Result<(), Infallible> {
        self.events.push(format!("strong({content})"));
        ob.push_str(content);
        Ok(())
    }

    fn strikethrough(&mut self, ob: &mut String, content: &str) -> Result<(), Infallible> {
        self.events.push(format!("strikethrough({content})"));
        ob.push_str(content);
        Ok(())
    }

    fn codespan(&mut self, ob: &mut String, text: &str) -> Result<(), Infallible> {
        self.events.push(format!("codespan({text})"));
        ob.push_str(text);
        Ok(())
    }

    fn line_break(&mut self, ob: &mut String) -> Result<(), Infallible> {
        self.events.push("linebreak".to_string());
        ob.push('\n');
        Ok(())
    }

    fn link(
        &mut self,
        ob: &mut String,
        content: &str,
        dest: &str,
        title: Option<&str>,
    ) -> Result<(), Infallible> {
        self.events.push(format!("link({content}, {dest}, {title:?})"));
        ob.push_str(content);
        Ok(())
    }

    fn autolink(
        &mut self,
        ob: &mut String,
        link: &str,
        kind: AutolinkKind,
    ) -> Result<(), Infallible> {
        self.events.push(format!("autolink({link}, {kind:?})"));
        ob.push_str(link);
        Ok(())
    }

    fn normal_text(&mut self, ob: &mut String, text: &str) -> Result<(), Infallible> {
        self.events.push(format!("text({text})"));
        ob.push_str(text);
        Ok(())
    }
}

#[test]
fn emphasis_event_sequence() {
    let events = Recorder::run("Hello *world*!", Options::empty(), None);
    assert_eq!(
        events,
        vec![
            "text(Hello )",
            "text(world)",
            "emphasis(world)",
            "text(!)",
            "paragraph(Hello world!)",
        ]
    );
}

#[test]
fn reference_definition_is_removed_and_resolves() {
    let events = Recorder::run("[foo]: /bar \"baz\"\n\n[foo]", Options::empty(), None);
    assert_eq!(
        events,
        vec![
            "text(foo)",
            "link(foo, /bar, Some(\"baz\"))",
            "paragraph(foo)",
        ]
    );
}

#[test]
fn code_span_contents_are_verbatim() {
    let events = Recorder::run("` code `", Options::empty(), None);
    assert_eq!(events, vec!["codespan(code)", "paragraph(code)"]);

    let events = Recorder::run("`` `tick` ``", Options::empty(), None);
    assert_eq!(events, vec!["codespan(`tick`)", "paragraph(`tick`)"]);
}

#[test]
fn unclosed_code_span_is_literal() {
    let events = Recorder::run("a `b", Options::empty(), None);
    assert_eq!(events, vec!["text(a `b)", "paragraph(a `b)"]);
}

#[test]
fn nesting_guard_downgrades_inner_quote() {
    let events = Recorder::run("> > nested\n", Options::empty(), Some(1));
    assert_eq!(
        events,
        vec!["text(> nested\n)", "blockquote(> nested\n)"]
    );
}

#[test]
fn tiny_nesting_limit_terminates_on_deep_input() {
    let input = "> ".repeat(300) + "bottom\n";
    let events = Recorder::run(&input, Options::empty(), Some(2));
    // the two permitted levels parse, the rest stays literal
    let quotes = events.iter().filter(|e| e.starts_with("blockquote")).count();
    assert_eq!(quotes, 2);
    assert!(events
        .iter()
        .any(|e| e.starts_with("text(") && e.contains("> ")));
}

#[test]
fn intraword_underscores_stay_literal() {
    let events = Recorder::run(
        "snake_case_word",
        Options::ENABLE_NO_INTRA_EMPHASIS,
        None,
    );
    assert_eq!(
        events,
        vec!["text(snake_case_word)", "paragraph(snake_case_word)"]
    );
}

#[test]
fn underscore_emphasis_without_the_flag() {
    let events = Recorder::run("a _b_ c", Options::empty(), None);
    assert_eq!(
        events,
        vec![
            "text(a )",
            "text(b)",
            "emphasis(b)",
            "text( c)",
            "paragraph(a b c)",
        ]
    );
}

#[test]
fn first_reference_definition_wins() {
    let doc = "[foo]: /first\n[FOO]: /second\n\n[Foo]";
    let events = Recorder::run(doc, Options::empty(), None);
    assert!(events.contains(&"link(Foo, /first, None)".to_string()));
    assert!(!events.iter().any(|e| e.contains("/second")));
}

#[test]
fn unresolved_reference_stays_literal() {
    let events = Recorder::run("[nope] text", Options::empty(), None);
    assert_eq!(events, vec!["text([nope] text)", "paragraph([nope] text)"]);
}

#[test]
fn links_do_not_nest_inside_links() {
    let doc = "[a]: /a\n[b]: /b\n\n[x [a] y][b]";
    let events = Recorder::run(doc, Options::empty(), None);
    assert!(events.contains(&"link(x [a] y, /b, None)".to_string()));
    assert!(!events.iter().any(|e| e.contains("link(a,")));
}

#[test]
fn images_may_nest_inside_links() {
    let events = Recorder::run("[![alt](/img)](/dest)", Options::empty(), None);
    assert!(events.contains(&"link(alt, /dest, None)".to_string()));
}

#[test]
fn balanced_parens_stay_in_the_autolink() {
    let events = Recorder::run(
        "(see http://x.com/(a))",
        Options::ENABLE_AUTOLINK,
        None,
    );
    assert!(events.contains(&"autolink(http://x.com/(a), Url)".to_string()));
    assert!(events.contains(&"text())".to_string()));
}

#[test]
fn unbalanced_close_is_prose_punctuation() {
    let events = Recorder::run("http://x.com).", Options::ENABLE_AUTOLINK, None);
    assert!(events.contains(&"autolink(http://x.com, Url)".to_string()));
    assert!(events.contains(&"text().)".to_string()));
}

#[test]
fn www_and_email_autolinks() {
    let events = Recorder::run(
        "visit www.example.com or mail me@example.com today",
        Options::ENABLE_AUTOLINK,
        None,
    );
    assert!(events.contains(&"autolink(www.example.com, Url)".to_string()));
    assert!(events.contains(&"autolink(me@example.com, Email)".to_string()));
}

#[test]
fn hard_break_trims_trailing_spaces() {
    let events = Recorder::run("one  \ntwo", Options::empty(), None);
    assert_eq!(
        events,
        vec![
            "text(one)",
            "linebreak",
            "text(two)",
            "paragraph(one\ntwo)",
        ]
    );
}

#[test]
fn loose_and_tight_list_items() {
    let events = Recorder::run("- a\n- b\n", Options::empty(), None);
    assert!(events.contains(&"listitem(a\n, loose=false)".to_string()));

    let events = Recorder::run("- a\n\n- b\n", Options::empty(), None);
    assert!(events.contains(&"listitem(a, loose=true)".to_string()));
}

#[test]
fn table_cells_carry_alignment() {
    let events = Recorder::run(
        "| a | b |\n|:---|---:|\n| 1 | 2 |\n",
        Options::ENABLE_TABLES,
        None,
    );
    assert!(events.contains(&"cell(a, Left, header=true)".to_string()));
    assert!(events.contains(&"cell(b, Right, header=true)".to_string()));
    assert!(events.contains(&"cell(1, Left, header=false)".to_string()));
    assert!(events.contains(&"cell(2, Right, header=false)".to_string()));
}

#[test]
fn renderer_failure_aborts_the_render() {
    struct Failing;

    impl Render for Failing {
        type Error = &'static str;

        fn emphasis(&mut self, _ob: &mut String, _content: &str) -> Result<(), Self::Error> {
            Err("no emphasis today")
        }
    }

    let mut failing = Failing;
    let parser = Parser::new(&mut failing);
    assert_eq!(parser.render("some *emphasis*"), Err("no emphasis today"));
}
