//! Arguments of the `zipfmt` binary: an optional KEN_ALL.CSV path
//! (standard input otherwise) and the output format.
use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "zipfmt", about = "KEN_ALL town normalizer and exploder.")]
pub struct ZipFmt {
    #[structopt(
        parse(from_os_str),
        help = "decoded KEN_ALL.CSV; reads standard input when absent"
    )]
    pub file: Option<PathBuf>,

    #[structopt(
        long = "format",
        default_value = "plain",
        help = "output format (plain or json)"
    )]
    pub format: Format,
}

#[derive(Debug, Clone, Copy)]
pub enum Format {
    Plain,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Format, String> {
        match s {
            "plain" => Ok(Format::Plain),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format {:?}", other)),
        }
    }
}
