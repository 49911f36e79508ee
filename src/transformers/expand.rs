/*! Parenthesised list and range expansion.

A balanced town such as `南三十条西(9〜11丁目)` stands for several
towns at once. Expansion evaluates the first parenthesised group,
splits it on the list delimiter, enumerates numeric ranges, and glues
the surrounding text back around every token. Text and reading use
different verb characters, so each side carries its own [Rule].

Verb binding, strongest first: range, then address separator, then
list delimiter.
!*/
use itertools::{EitherOrBoth, Itertools};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use super::RawEntry;
use crate::entry::{Entry, Name};
use crate::error::Error;

lazy_static! {
    /// Verbs of the ideographic text column.
    pub(crate) static ref TEXT_RULE: Rule = Rule::new('、', '〜', '−', '〜');
    /// Verbs of the kana column. The range verb is the `~` sentinel
    /// that the remap stage wrote over the ambiguous `-`.
    pub(crate) static ref RUBY_RULE: Rule = Rule::new('､', '-', '-', '~');
}

/// The verb set for one side of a town name, with the two range
/// shapes precompiled.
pub(crate) struct Rule {
    pub(crate) token_begin: char,
    pub(crate) token_end: char,
    delim: char,
    pub(crate) range: char,
    pub(crate) addr_sep: char,
    pub(crate) to: char,
    outer: Regex,
    inner: Regex,
}

/// Marker for a paren structure the flat grammar cannot express.
pub(crate) struct Unbalanced;

impl Rule {
    fn new(delim: char, range: char, addr_sep: char, to: char) -> Rule {
        let to_pat = regex::escape(&to.to_string());
        let sep_pat = regex::escape(&addr_sep.to_string());
        Rule {
            token_begin: '(',
            token_end: ')',
            delim,
            range,
            addr_sep,
            to,
            // "9〜11丁目", with an optional address tail: "20〜21−4番地".
            outer: Regex::new(&format!(r"(\d+){}(\d+)(?:{}(\d+))?", to_pat, sep_pat)).unwrap(),
            // "20−4〜5番地": the range sits under the address separator.
            inner: Regex::new(&format!(r"\d+{}(\d+){}(\d+)", sep_pat, to_pat)).unwrap(),
        }
    }

    /// Expands the first parenthesised group of `s`:
    ///
    /// - `"あああ(ほげ、ふが)"` => `["あああほげ", "あああふが"]`
    /// - `"(1〜3、5丁目)"` => `["1丁目", "2丁目", "3丁目", "5丁目"]`
    ///
    /// Without a group the input comes back as the only variant. The
    /// grammar is flat: a nested `(` or a stray `)` is [Unbalanced].
    pub(crate) fn eval(&self, s: &str) -> Result<Vec<String>, Unbalanced> {
        let open = match s.find(|c: char| c == self.token_begin || c == self.token_end) {
            None => return Ok(vec![s.to_string()]),
            Some(i) if s[i..].starts_with(self.token_end) => return Err(Unbalanced),
            Some(i) => i,
        };
        let body = &s[open + self.token_begin.len_utf8()..];
        let mut close = None;
        for (j, c) in body.char_indices() {
            if c == self.token_begin {
                return Err(Unbalanced);
            }
            if c == self.token_end {
                close = Some(j);
                break;
            }
        }
        let close = close.ok_or(Unbalanced)?;
        let prefix = &s[..open];
        let suffix = &body[close + self.token_end.len_utf8()..];
        Ok(self
            .tokens(&body[..close])
            .into_iter()
            .map(|token| {
                // "その他" is a catch-all, not a name.
                let token = if token == "その他" || token == "ｿﾉﾀ" {
                    String::new()
                } else {
                    token
                };
                format!("{}{}{}", prefix, token, suffix)
            })
            .collect())
    }

    fn tokens(&self, expr: &str) -> Vec<String> {
        self.split(expr)
            .iter()
            .flat_map(|piece| self.expand(piece))
            .collect()
    }

    /// Splits `expr` on the list delimiter. Consecutive number-bearing
    /// pieces form a group sharing the non-digit prefix of the first
    /// piece and the digit/verb tail of the last:
    ///
    /// - `"あ、い、う"` => `["あ", "い", "う"]`
    /// - `"1、2、3丁目"` => `["1丁目", "2丁目", "3丁目"]`
    /// - `"18−4、20−4〜5番地"` => `["18−4番地", "20−4〜5番地"]`
    fn split(&self, expr: &str) -> Vec<String> {
        if expr.is_empty() {
            return Vec::new();
        }
        let mut pieces: Vec<&str> = expr.split(self.delim).collect();
        if pieces.last().map_or(false, |p| p.is_empty()) {
            pieces.pop();
        }

        let mut fields = Vec::new();
        let mut i = 0;
        while i < pieces.len() {
            if !extensible(pieces[i]) {
                fields.push(pieces[i].to_string());
                i += 1;
                continue;
            }
            let start = i;
            while i < pieces.len() && extensible(pieces[i]) {
                i += 1;
            }
            let mut group: Vec<String> = pieces[start..i].iter().map(|p| p.to_string()).collect();
            let after = if i < pieces.len() {
                let p = pieces[i];
                i += 1;
                Some(p)
            } else {
                None
            };

            let prefix: String = group[0].chars().take_while(|c| !c.is_ascii_digit()).collect();
            let head = group[0][prefix.len()..].to_string();
            group[0] = head;

            let last = group.len() - 1;
            let kept: usize = group[last]
                .chars()
                .take_while(|&c| c.is_ascii_digit() || c == self.to || c == self.addr_sep)
                .map(|c| c.len_utf8())
                .sum();
            let suffix = group[last][kept..].to_string();
            group[last].truncate(kept);

            for core in &group {
                fields.push(format!("{}{}{}", prefix, core, suffix));
            }
            if let Some(p) = after {
                if !p.is_empty() {
                    fields.push(p.to_string());
                }
            }
        }
        fields
    }

    /// Enumerates a numeric range:
    ///
    /// - `"20〜21−4番地"` => `["20−4番地", "21−4番地"]`
    /// - `"20−4〜5番地"` => `["20−4番地", "20−5番地"]`
    ///
    /// A token without a range passes through unchanged.
    fn expand(&self, token: &str) -> Vec<String> {
        let caps = self
            .outer
            .captures(token)
            .or_else(|| self.inner.captures(token));
        let (first, last) = match caps.as_ref().map(|c| (c.get(1), c.get(2))) {
            Some((Some(a), Some(b))) => (a, b),
            _ => return vec![token.to_string()],
        };
        let (begin, end) = match (first.as_str().parse::<u64>(), last.as_str().parse::<u64>()) {
            (Ok(b), Ok(e)) => (b, e),
            _ => {
                warn!("range bounds in {:?} do not fit, leaving as is", token);
                return vec![token.to_string()];
            }
        };
        let prefix = &token[..first.start()];
        let suffix = &token[last.end()..];
        (begin..=end)
            .map(|n| format!("{}{}{}", prefix, n, suffix))
            .collect()
    }
}

fn extensible(piece: &str) -> bool {
    piece.chars().any(|c| c.is_ascii_digit())
}

/// The expansion stage itself: one entry in, one entry out per town
/// variant, in variant order.
pub fn town(raw: RawEntry) -> Result<Vec<RawEntry>, Error> {
    let RawEntry { row, entry } = raw;
    let texts = TEXT_RULE
        .eval(&entry.town.text)
        .map_err(|_| Error::UnbalancedParens { row })?;
    let rubies = RUBY_RULE
        .eval(&entry.town.ruby)
        .map_err(|_| Error::UnbalancedParens { row })?;

    // The text column spells the whole list out while the reading
    // column often keeps a single reading for all of it.
    let rubies = if texts.len() > 1 && rubies.len() == 1 {
        vec![rubies[0].clone(); texts.len()]
    } else {
        rubies
    };
    if texts.len() != rubies.len() {
        warn!(
            "row {}: {} town variants with {} readings, pairing what lines up",
            row,
            texts.len(),
            rubies.len()
        );
    }
    Ok(texts
        .into_iter()
        .zip_longest(rubies)
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(text, ruby) => Some(Name { text, ruby }),
            EitherOrBoth::Left(text) => Some(Name {
                text,
                ruby: String::new(),
            }),
            EitherOrBoth::Right(_) => None,
        })
        .map(|town| RawEntry {
            row,
            entry: Entry {
                town,
                ..entry.clone()
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_text(s: &str) -> Vec<String> {
        TEXT_RULE.eval(s).unwrap_or_else(|_| panic!("balanced input"))
    }

    #[test]
    fn test_eval_without_group() {
        assert_eq!(eval_text("西新宿"), vec!["西新宿"]);
        assert_eq!(eval_text(""), vec![""]);
    }

    #[test]
    fn test_eval_list() {
        assert_eq!(
            eval_text("奥瀬(青撫、小畳石、十和田)"),
            vec!["奥瀬青撫", "奥瀬小畳石", "奥瀬十和田"]
        );
    }

    #[test]
    fn test_eval_range() {
        assert_eq!(
            eval_text("南三十条西(9〜11丁目)"),
            vec!["南三十条西9丁目", "南三十条西10丁目", "南三十条西11丁目"]
        );
    }

    #[test]
    fn test_eval_list_of_ranges() {
        assert_eq!(
            eval_text("(1〜3、5丁目)"),
            vec!["1丁目", "2丁目", "3丁目", "5丁目"]
        );
    }

    #[test]
    fn test_eval_catch_all() {
        assert_eq!(eval_text("奥瀬(その他)"), vec!["奥瀬"]);
        assert_eq!(RUBY_RULE.eval("ｵｸｾ(ｿﾉﾀ)").ok().unwrap(), vec!["ｵｸｾ"]);
    }

    #[test]
    fn test_eval_unbalanced() {
        assert!(TEXT_RULE.eval("奥瀬)青撫(").is_err());
        assert!(TEXT_RULE.eval("奥瀬((青撫))").is_err());
        assert!(TEXT_RULE.eval("奥瀬(青撫").is_err());
    }

    #[test]
    fn test_split_groups_numbered_pieces() {
        assert_eq!(
            TEXT_RULE.split("18−4、20−4〜5番地"),
            vec!["18−4番地", "20−4〜5番地"]
        );
    }

    #[test]
    fn test_split_plain_pieces_stay_verbatim() {
        assert_eq!(TEXT_RULE.split("あ、い、う"), vec!["あ", "い", "う"]);
    }

    #[test]
    fn test_split_group_then_plain_piece() {
        assert_eq!(
            TEXT_RULE.split("1、2丁目、その他"),
            vec!["1丁目", "2丁目", "その他"]
        );
    }

    #[test]
    fn test_expand_outer_range_with_tail() {
        assert_eq!(
            TEXT_RULE.expand("20〜21−4番地"),
            vec!["20−4番地", "21−4番地"]
        );
    }

    #[test]
    fn test_expand_inner_range() {
        // The ruby side after remapping: `~` ranges, `-` separates.
        assert_eq!(
            RUBY_RULE.expand("20-4~5ﾊﾞﾝﾁ"),
            vec!["20-4ﾊﾞﾝﾁ", "20-5ﾊﾞﾝﾁ"]
        );
    }

    #[test]
    fn test_expand_passthrough() {
        assert_eq!(TEXT_RULE.expand("青撫"), vec!["青撫"]);
        assert_eq!(TEXT_RULE.expand("18−4番地"), vec!["18−4番地"]);
    }

    #[test]
    fn test_town_broadcasts_single_ruby() {
        let raw = RawEntry {
            row: 1,
            entry: Entry {
                town: Name::new("笹屋町(麩屋町通竹屋町下る、麩屋町通夷川上る)", "ｻｻﾔﾁｮｳ"),
                ..Entry::default()
            },
        };
        let out = town(raw).ok().unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].entry.town, Name::new("笹屋町麩屋町通竹屋町下る", "ｻｻﾔﾁｮｳ"));
        assert_eq!(out[1].entry.town, Name::new("笹屋町麩屋町通夷川上る", "ｻｻﾔﾁｮｳ"));
    }

    #[test]
    fn test_town_unbalanced_names_row() {
        let raw = RawEntry {
            row: 42,
            entry: Entry {
                town: Name::new("奥瀬((青撫))", "ｵｸｾ((ｱｵﾌﾞﾅ))"),
                ..Entry::default()
            },
        };
        match town(raw) {
            Err(Error::UnbalancedParens { row }) => assert_eq!(row, 42),
            other => panic!("expected UnbalancedParens, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_town_pairs_shorter_ruby_list() {
        let raw = RawEntry {
            row: 1,
            entry: Entry {
                town: Name::new("奥瀬(青撫、小畳石、十和田)", "ｵｸｾ(ｱｵﾌﾞﾅ､ｺﾀﾀﾐｲｼ)"),
                ..Entry::default()
            },
        };
        let out = town(raw).ok().unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[2].entry.town, Name::new("奥瀬十和田", ""));
    }
}
