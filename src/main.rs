use std::io;
use std::process;

use log::error;
use structopt::StructOpt;

use kenall::entry::Entry;
use kenall::parser::{Entries, Parser};

mod cli;
use cli::{Format, ZipFmt};

fn main() {
    env_logger::init();
    let opt = ZipFmt::from_args();

    let entries = match &opt.file {
        Some(path) => match Parser::parse_path(path) {
            Ok(entries) => entries,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => Parser::parse(io::stdin()),
    };

    if let Some(e) = emit(entries, opt.format) {
        error!("{}", e);
        process::exit(1);
    }
}

/// Prints every entry; gives back the error that cut the stream
/// short, if any.
fn emit(mut entries: Entries, format: Format) -> Option<kenall::error::Error> {
    while let Some(entry) = entries.next() {
        match format {
            Format::Plain => print_plain(&entry),
            Format::Json => {
                let line = serde_json::to_string(&entry).expect("entries serialize to JSON");
                println!("{}", line);
            }
        }
    }
    entries.into_error()
}

fn print_plain(e: &Entry) {
    println!(
        "{} {}{}{} {}{}{}",
        e.zip, e.pref.text, e.region.text, e.town.text, e.pref.ruby, e.region.ruby, e.town.ruby
    );
}
