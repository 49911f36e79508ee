/*! Continuation detection.

A town whose parens do not balance continues on the next physical
row. Normalization has already folded the parens to ASCII.
!*/
use crate::entry::Entry;

/// True when the town is complete on its own.
pub fn balanced(entry: &Entry) -> bool {
    let open = entry.town.text.matches('(').count();
    let close = entry.town.text.matches(')').count();
    open == close
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Name;

    fn town(text: &str) -> Entry {
        Entry {
            town: Name::new(text, ""),
            ..Entry::default()
        }
    }

    #[test]
    fn test_balanced() {
        assert!(balanced(&town("西新宿")));
        assert!(balanced(&town("奥瀬(青撫、休屋)")));
        assert!(!balanced(&town("奥瀬(青撫、")));
        assert!(!balanced(&town("休屋)")));
    }
}
