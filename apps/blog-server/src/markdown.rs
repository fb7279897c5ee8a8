//! Markdown rendering for post bodies.

use pulldown_cmark::{CowStr, Event, Options, Parser, TagEnd, html};

/// Words kept in listing excerpts and feed descriptions.
pub const EXCERPT_WORDS: usize = 30;

const ELLIPSIS: &str = " …";

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Render markdown to HTML.
pub fn render(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options()));
    out
}

/// Render markdown to HTML keeping only the first `limit` words of text.
///
/// When text is cut, `" …"` follows the last kept word and every element
/// still open at that point is closed, so the result is always well-formed.
pub fn truncate_words_html(markdown: &str, limit: usize) -> String {
    let mut truncator = Truncator {
        limit,
        words: 0,
        events: Vec::new(),
        open: Vec::new(),
        last_word: None,
    };

    for event in Parser::new_ext(markdown, options()) {
        let cut = match event {
            Event::Start(tag) => {
                truncator.open.push(tag.to_end());
                truncator.events.push(Event::Start(tag));
                false
            }
            Event::End(end) => {
                truncator.open.pop();
                truncator.events.push(Event::End(end));
                false
            }
            Event::Text(text) => truncator.push_words(text, Event::Text),
            Event::Code(code) => truncator.push_words(code, Event::Code),
            other => {
                truncator.events.push(other);
                false
            }
        };
        if cut {
            break;
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, truncator.events.into_iter());
    out
}

struct Truncator<'a> {
    limit: usize,
    words: usize,
    events: Vec<Event<'a>>,
    open: Vec<TagEnd>,
    /// Event count and open elements right after the word that hit the limit.
    last_word: Option<(usize, Vec<TagEnd>)>,
}

impl<'a> Truncator<'a> {
    /// Push a run of words; returns `true` once the text has been cut.
    fn push_words(&mut self, text: CowStr<'a>, wrap: fn(CowStr<'a>) -> Event<'a>) -> bool {
        let count = text.split_whitespace().count();
        if self.words + count <= self.limit || count == 0 {
            self.words += count;
            self.events.push(wrap(text));
            if count > 0 && self.words == self.limit {
                self.last_word = Some((self.events.len(), self.open.clone()));
            }
            return false;
        }

        if let Some((len, open)) = self.last_word.take() {
            // The limit fell on the end of an earlier run: drop what came after it.
            self.events.truncate(len);
            self.open = open;
            if let Some(last) = self.events.pop() {
                self.events.push(match last {
                    Event::Text(t) => Event::Text(with_ellipsis(&t)),
                    Event::Code(c) => Event::Code(with_ellipsis(&c)),
                    other => other,
                });
            }
        } else {
            let mut kept = String::new();
            if text.starts_with(char::is_whitespace) && self.words > 0 {
                kept.push(' ');
            }
            kept.push_str(
                &text
                    .split_whitespace()
                    .take(self.limit - self.words)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            self.events.push(wrap(with_ellipsis(&kept)));
        }

        self.events.extend(self.open.drain(..).rev().map(Event::End));
        true
    }
}

fn with_ellipsis(text: &str) -> CowStr<'static> {
    format!("{}{ELLIPSIS}", text.trim_end()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        assert_eq!(render("Hello *world*"), "<p>Hello <em>world</em></p>\n");
    }

    #[test]
    fn test_short_text_is_not_truncated() {
        let html = truncate_words_html("Just a few words", 30);
        assert_eq!(html, "<p>Just a few words</p>\n");
    }

    #[test]
    fn test_truncation_closes_open_tags() {
        let html = truncate_words_html("one **two three four** five", 2);
        assert_eq!(html, "<p>one <strong>two …</strong></p>\n");
    }

    #[test]
    fn test_truncation_stops_at_limit_across_blocks() {
        let md = "alpha beta\n\ngamma delta epsilon";
        let html = truncate_words_html(md, 3);
        assert_eq!(html, "<p>alpha beta</p>\n<p>gamma …</p>\n");
    }

    #[test]
    fn test_inline_code_words_count_toward_limit() {
        let html = truncate_words_html("a `b c d` e f", 2);
        assert_eq!(html, "<p>a <code>b …</code></p>\n");
    }

    #[test]
    fn test_limit_at_block_end_keeps_ellipsis_in_block() {
        let html = truncate_words_html("alpha beta\n\ngamma", 2);
        assert_eq!(html, "<p>alpha beta …</p>\n");
    }

    #[test]
    fn test_exact_word_count_is_not_truncated() {
        let html = truncate_words_html("alpha beta", 2);
        assert_eq!(html, "<p>alpha beta</p>\n");
    }
}
