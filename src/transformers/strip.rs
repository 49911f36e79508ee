/*! Parenthetical noise removal.

Two fixed phrases qualify a town without naming anything that can be
expanded; they are dropped before the parens are counted.
!*/
use crate::entry::Entry;

const BUILDING_TEXT: &str = "（次のビルを除く）";
const BUILDING_RUBY: &str = "(ﾂｷﾞﾉﾋﾞﾙｦﾉｿﾞｸ)";

/// Drops a trailing "（次のビルを除く）".
pub fn building_exclusion(mut entry: Entry) -> Entry {
    if let Some(text) = entry.town.text.strip_suffix(BUILDING_TEXT) {
        entry.town.text = text.to_string();
        if let Some(ruby) = entry.town.ruby.strip_suffix(BUILDING_RUBY) {
            entry.town.ruby = ruby.to_string();
        }
    }
    entry
}

const HIGH_RISE_TEXT: &str = "（高層棟）";
const HIGH_RISE_RUBY: &str = "(ｺｳｿｳﾄｳ)";

/// Drops every occurrence of "（高層棟）".
pub fn high_rise(mut entry: Entry) -> Entry {
    entry.town.text = entry.town.text.replace(HIGH_RISE_TEXT, "");
    entry.town.ruby = entry.town.ruby.replace(HIGH_RISE_RUBY, "");
    entry
}
