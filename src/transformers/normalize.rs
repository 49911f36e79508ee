/*! Character-level normalization of the town text.

KEN_ALL writes parens and digits in the town column full-width. The
pipeline counts and scans ASCII, so they are folded here, one code
point to one code point. The reading column is half-width already and
is left untouched.
!*/
use crate::entry::Entry;

pub fn town(mut entry: Entry) -> Entry {
    entry.town.text = entry.town.text.chars().map(fold).collect();
    entry
}

fn fold(c: char) -> char {
    match c {
        '（' => '(',
        '）' => ')',
        '０'..='９' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}
