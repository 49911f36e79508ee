/*! Postal code entries.

One [Entry] per town, with both the ideographic rendering and the
half-width katakana reading ([Name]). Field layout follows the
KEN_ALL column order; [Entry::notice] is the exception, it is
synthesized during normalization and has no source column.
!*/
use serde::Serialize;

/// A name and its half-width katakana reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Name {
    pub text: String,
    pub ruby: String,
}

impl Name {
    pub fn new(text: &str, ruby: &str) -> Name {
        Name {
            text: text.to_string(),
            ruby: ruby.to_string(),
        }
    }

    /// Appends `other` after `self`. When both readings are the same
    /// string the reading is kept once: continuation rows repeat the
    /// reading of the row they continue, and joining must not double
    /// it.
    pub fn combine(&self, other: &Name) -> Name {
        let ruby = if self.ruby == other.ruby {
            self.ruby.clone()
        } else {
            format!("{}{}", self.ruby, other.ruby)
        };
        Name {
            text: format!("{}{}", self.text, other.text),
            ruby,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.ruby.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.ruby.clear();
    }
}

/// Update marker column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    NotModified,
    Modified,
    Obsoleted,
}

impl Default for Status {
    fn default() -> Status {
        Status::NotModified
    }
}

impl Status {
    pub(crate) fn parse(s: &str) -> Option<Status> {
        match s {
            "0" => Some(Status::NotModified),
            "1" => Some(Status::Modified),
            "2" => Some(Status::Obsoleted),
            _ => None,
        }
    }
}

/// Update reason column, 0 through 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reason(u8);

impl Reason {
    pub(crate) fn parse(s: &str) -> Option<Reason> {
        match s.parse::<u8>() {
            Ok(n) if n <= 6 => Some(Reason(n)),
            _ => None,
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Reason 6 flags a deleted entry. The entry itself is still
    /// well-formed and is delivered normally.
    pub fn is_deletion(&self) -> bool {
        self.0 == 6
    }
}

/// One address record of the postal code table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Local government code, five characters.
    pub code: String,

    /// Legacy five-character postal code. May contain padding spaces.
    pub old_zip: String,

    /// Seven-digit postal code.
    pub zip: String,

    /// Prefecture.
    pub pref: Name,

    /// City, ward, district.
    pub region: Name,

    /// Town. Empty when the record carries only an annotation.
    pub town: Name,

    /// The town holds more than one postal code.
    pub is_partial_town: bool,

    /// Banchi are numbered per koaza.
    pub is_large_town: bool,

    /// The town has chome subdivisions.
    pub is_blocked_scheme: bool,

    /// The postal code covers more than one town.
    pub is_overlapped_zip: bool,

    pub status: Status,

    pub reason: Reason,

    /// Annotation extracted from the town column. Not a KEN_ALL
    /// column.
    pub notice: String,
}
