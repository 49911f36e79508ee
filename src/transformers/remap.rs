/*! Kana range-verb disambiguation.

In the text column a range is `〜` and an address separator is `−`;
the kana column writes both as `-`. Expansion needs them distinct, so
this stage walks text and reading in lockstep through the first
parenthesised group and rewrites the reading's `-` to the `~`
sentinel wherever the text says range. Runs of characters between
anchors are copied as they are.
!*/
use super::expand::{RUBY_RULE, TEXT_RULE};
use crate::entry::{Entry, Name};

pub fn range_verb(mut entry: Entry) -> Entry {
    remap(&mut entry.town);
    entry
}

fn remap(name: &mut Name) {
    let mut text = Scanner::new(&name.text);
    let mut ruby = Scanner::new(&name.ruby);

    // Nothing to disambiguate without a group on both sides.
    if text.advance(&[TEXT_RULE.token_begin]).is_none() {
        return;
    }
    text.bump();
    if ruby.advance(&[RUBY_RULE.token_begin]).is_none() {
        return;
    }
    ruby.bump();

    loop {
        match text.advance(&[TEXT_RULE.range, TEXT_RULE.addr_sep, TEXT_RULE.token_end]) {
            None => break,
            Some(c) if c == TEXT_RULE.range => {
                text.bump();
                if ruby.advance(&[RUBY_RULE.range]).is_some() {
                    ruby.replace(RUBY_RULE.to);
                }
            }
            Some(c) if c == TEXT_RULE.addr_sep => {
                text.bump();
                if ruby.advance(&[RUBY_RULE.addr_sep]).is_some() {
                    ruby.bump();
                }
            }
            Some(_) => {
                text.bump();
                if ruby.advance(&[RUBY_RULE.token_end]).is_some() {
                    ruby.bump();
                }
                break;
            }
        }
    }

    name.text = text.finish();
    name.ruby = ruby.finish();
}

/// Cursor over a string that copies what it passes into a rewrite
/// buffer.
struct Scanner {
    out: String,
    rest: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(s: &str) -> Scanner {
        Scanner {
            out: String::with_capacity(s.len()),
            rest: s.chars().collect(),
            pos: 0,
        }
    }

    /// Copies characters up to the next anchor. The anchor itself is
    /// left unconsumed and returned; [None] when the input ran out.
    fn advance(&mut self, anchors: &[char]) -> Option<char> {
        while self.pos < self.rest.len() {
            let c = self.rest[self.pos];
            if anchors.contains(&c) {
                return Some(c);
            }
            self.out.push(c);
            self.pos += 1;
        }
        None
    }

    /// Copies the current character as it is.
    fn bump(&mut self) {
        if let Some(&c) = self.rest.get(self.pos) {
            self.out.push(c);
            self.pos += 1;
        }
    }

    /// Consumes the current character, writing `c` in its place.
    fn replace(&mut self, c: char) {
        if self.pos < self.rest.len() {
            self.out.push(c);
            self.pos += 1;
        }
    }

    /// Copies whatever remains and yields the rewritten string.
    fn finish(mut self) -> String {
        while self.pos < self.rest.len() {
            self.out.push(self.rest[self.pos]);
            self.pos += 1;
        }
        self.out
    }
}
