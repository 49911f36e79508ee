/*! Annotation extraction.

Some KEN_ALL "towns" are commentary, not place names. These handlers
move the commentary into [Entry::notice] and leave the town empty (or
trimmed down to the real name it wraps). All three are total.
!*/
use crate::entry::{Entry, Name};

const UNLISTED: &str = "以下に掲載がない場合";

/// "以下に掲載がない場合" stands for every address the table does not
/// list under this code. It is a remark, not a town.
pub fn unlisted(mut entry: Entry) -> Entry {
    if entry.town.text == UNLISTED {
        entry.notice = std::mem::take(&mut entry.town.text);
        entry.town.clear();
    }
    entry
}

const BANCHI_TEXT: &str = "の次に番地がくる場合";
const BANCHI_RUBY: &str = "ﾉﾂｷﾞﾆﾊﾞﾝﾁｶﾞｸﾙﾊﾞｱｲ";

/// "<名前>の次に番地がくる場合" goes to the notice whole. The leading
/// name is kept as the town, except when the region already ends with
/// it; then it adds nothing and the town is cleared.
pub fn banchi_follows(mut entry: Entry) -> Entry {
    let text = match entry.town.text.strip_suffix(BANCHI_TEXT) {
        Some(t) => t.to_string(),
        None => return entry,
    };
    let ruby = match entry.town.ruby.strip_suffix(BANCHI_RUBY) {
        Some(r) => r.to_string(),
        None => entry.town.ruby.clone(),
    };
    entry.notice = std::mem::take(&mut entry.town.text);
    if entry.region.text.ends_with(&text) {
        entry.town.clear();
    } else {
        entry.town = Name { text, ruby };
    }
    entry
}

const WHOLE_AREA: &str = "一円";

/// "<名前>一円" covers the whole of the named area and goes to the
/// notice. A town that is exactly "一円" is a real town (in
/// 犬上郡多賀町) and is left alone.
pub fn whole_area(mut entry: Entry) -> Entry {
    if entry.town.text.ends_with(WHOLE_AREA) && entry.town.text != WHOLE_AREA {
        entry.notice = std::mem::take(&mut entry.town.text);
        entry.town.clear();
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(region: (&str, &str), town: (&str, &str)) -> Entry {
        Entry {
            region: Name::new(region.0, region.1),
            town: Name::new(town.0, town.1),
            ..Entry::default()
        }
    }

    #[test]
    fn test_unlisted() {
        let e = unlisted(entry(
            ("札幌市中央区", "ｻｯﾎﾟﾛｼﾁｭｳｵｳｸ"),
            ("以下に掲載がない場合", "ｲｶﾆｹｲｻｲｶﾞﾅｲﾊﾞｱｲ"),
        ));
        assert!(e.town.is_empty());
        assert_eq!(e.notice, "以下に掲載がない場合");
    }

    #[test]
    fn test_unlisted_leaves_towns_alone() {
        let e = unlisted(entry(("新宿区", "ｼﾝｼﾞｭｸｸ"), ("西新宿", "ﾆｼｼﾝｼﾞｭｸ")));
        assert_eq!(e.town, Name::new("西新宿", "ﾆｼｼﾝｼﾞｭｸ"));
        assert_eq!(e.notice, "");
    }

    #[test]
    fn test_banchi_follows_redundant_prefix() {
        // 八幡浜市 is already the region; the prefix adds nothing.
        let e = banchi_follows(entry(
            ("八幡浜市", "ﾔﾜﾀﾊﾏｼ"),
            ("八幡浜市の次に番地がくる場合", "ﾔﾜﾀﾊﾏｼﾉﾂｷﾞﾆﾊﾞﾝﾁｶﾞｸﾙﾊﾞｱｲ"),
        ));
        assert!(e.town.is_empty());
        assert_eq!(e.notice, "八幡浜市の次に番地がくる場合");
    }

    #[test]
    fn test_banchi_follows_kept_prefix() {
        // 大島町 is not a suffix of 西海市 and stays as the town.
        let e = banchi_follows(entry(
            ("西海市", "ｻｲｶｲｼ"),
            ("大島町の次に番地がくる場合", "ｵｵｼﾏﾁｮｳﾉﾂｷﾞﾆﾊﾞﾝﾁｶﾞｸﾙﾊﾞｱｲ"),
        ));
        assert_eq!(e.town, Name::new("大島町", "ｵｵｼﾏﾁｮｳ"));
        assert_eq!(e.notice, "大島町の次に番地がくる場合");
    }

    #[test]
    fn test_whole_area_suffix() {
        let e = whole_area(entry(("利島村", "ﾄｼﾏﾑﾗ"), ("利島村一円", "ﾄｼﾏﾑﾗｲﾁｴﾝ")));
        assert!(e.town.is_empty());
        assert_eq!(e.notice, "利島村一円");
    }

    #[test]
    fn test_whole_area_exact_town() {
        let e = whole_area(entry(("犬上郡多賀町", "ｲﾇｶﾐｸﾞﾝﾀｶﾞﾁｮｳ"), ("一円", "ｲﾁｴﾝ")));
        assert_eq!(e.town, Name::new("一円", "ｲﾁｴﾝ"));
        assert_eq!(e.notice, "");
    }
}
