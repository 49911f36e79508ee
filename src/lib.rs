/*! Normalization pipeline for the Japan Post KEN_ALL postal code table.

KEN_ALL pairs each seven-digit postal code with an address, but keeps
the town column in a human-oriented shorthand: one logical record may
span several physical rows, hold a parenthesised list of towns, or
hold numeric ranges that stand for many towns at once. This crate
parses the raw CSV and emits one normalized entry per real town.

See [parser::Parser] for the entry point.
!*/

pub mod entry;
pub mod error;
pub mod parser;
pub mod sources;
pub mod transformers;
