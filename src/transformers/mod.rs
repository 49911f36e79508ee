/*! Town-column transformers.

The town column is rewritten by a fixed sequence of stages, each one a
stream transformer over `Result`-typed entries. Stages come in three
shapes and nothing else:

- a [Stage::Handler] rewrites entries one for one and cannot fail,
- a [Stage::Collector] joins physical rows until a run is complete,
- a [Stage::Expander] replicates one entry into many, or fails.

[stages] returns the standard pipeline in stage order; composition is
a fold over [Stage::run]. Every stage preserves input order and fuses
after the first error it yields.
!*/

use std::collections::VecDeque;

use crate::entry::Entry;
use crate::error::Error;

mod annotate;
mod expand;
mod join;
mod normalize;
mod remap;
mod strip;

pub use annotate::{banchi_follows, unlisted, whole_area};
pub use expand::town as expand_town;
pub use join::balanced;
pub use normalize::town as normalize_town;
pub use remap::range_verb;
pub use strip::{building_exclusion, high_rise};

/// An entry plus the 1-based line number of its first physical row.
/// The row number travels with the entry so late stages can name the
/// offending row in errors; the sink drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub row: u64,
    pub entry: Entry,
}

/// Stage-to-stage stream.
pub type RawStream = Box<dyn Iterator<Item = Result<RawEntry, Error>>>;

/// One pipeline stage.
pub enum Stage {
    /// Rewrites entries one for one. Total.
    Handler(fn(Entry) -> Entry),
    /// Holds back entries while the predicate is false, combining
    /// their towns into the run's first entry.
    Collector(fn(&Entry) -> bool),
    /// Replicates an entry into any number of entries.
    Expander(fn(RawEntry) -> Result<Vec<RawEntry>, Error>),
}

impl Stage {
    /// Wires this stage onto `input` and returns its output stream.
    pub fn run(self, input: RawStream) -> RawStream {
        match self {
            Stage::Handler(f) => Box::new(input.map(move |item| {
                item.map(|mut raw| {
                    raw.entry = f(raw.entry);
                    raw
                })
            })),
            Stage::Collector(complete) => Box::new(Collect {
                input,
                complete,
                fused: false,
            }),
            Stage::Expander(f) => Box::new(Explode {
                input,
                f,
                pending: VecDeque::new(),
                fused: false,
            }),
        }
    }
}

/// The standard town pipeline, in order. Annotation extraction, noise
/// stripping and normalization come first so that continuation
/// detection can count ASCII parens; the range-verb remap must see
/// joined (balanced) towns and must run before expansion.
pub fn stages() -> Vec<Stage> {
    vec![
        Stage::Handler(annotate::unlisted),
        Stage::Handler(annotate::banchi_follows),
        Stage::Handler(annotate::whole_area),
        Stage::Handler(strip::building_exclusion),
        Stage::Handler(strip::high_rise),
        Stage::Handler(normalize::town),
        Stage::Collector(join::balanced),
        Stage::Handler(remap::range_verb),
        Stage::Expander(expand::town),
    ]
}

/// Joins continuation runs. The only stage with cross-entry state: it
/// may hold one partial entry across its input boundary.
struct Collect {
    input: RawStream,
    complete: fn(&Entry) -> bool,
    fused: bool,
}

impl Iterator for Collect {
    type Item = Result<RawEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let mut head = match self.input.next()? {
            Ok(raw) => raw,
            Err(e) => {
                self.fused = true;
                return Some(Err(e));
            }
        };
        while !(self.complete)(&head.entry) {
            match self.input.next() {
                Some(Ok(tail)) => {
                    // Only the town is joined; every other field, the
                    // row number included, stays that of the head row.
                    head.entry.town = head.entry.town.combine(&tail.entry.town);
                }
                Some(Err(e)) => {
                    self.fused = true;
                    return Some(Err(e));
                }
                None => {
                    self.fused = true;
                    return Some(Err(Error::IncompleteEntry));
                }
            }
        }
        Some(Ok(head))
    }
}

/// Replays the expansion of one entry before pulling the next, so the
/// variants of an input stay contiguous and ordered.
struct Explode {
    input: RawStream,
    f: fn(RawEntry) -> Result<Vec<RawEntry>, Error>,
    pending: VecDeque<RawEntry>,
    fused: bool,
}

impl Iterator for Explode {
    type Item = Result<RawEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return Some(Ok(raw));
            }
            match self.input.next() {
                None => return None,
                Some(Err(e)) => {
                    self.fused = true;
                    return Some(Err(e));
                }
                Some(Ok(raw)) => match (self.f)(raw) {
                    Ok(items) => self.pending.extend(items),
                    Err(e) => {
                        self.fused = true;
                        return Some(Err(e));
                    }
                },
            }
        }
    }
}
