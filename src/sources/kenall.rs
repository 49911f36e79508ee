/*! KEN_ALL.CSV record source.

Decodes the 15-column rows of the (already Unicode-decoded) table
into [RawEntry] values. Column tokenization is left to the `csv`
crate; this module owns the schema: the column count, the 0/1 flags
and the two small enumerated columns. A row that breaks the schema
fails the stream with [Error::BadRecord] naming the physical line.
!*/
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::entry::{Entry, Name, Reason, Status};
use crate::error::Error;
use crate::transformers::RawEntry;

pub struct KenAll<T: Read> {
    records: StringRecordsIntoIter<T>,
    fused: bool,
}

impl KenAll<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<KenAll<BufReader<File>>, Error> {
        let file = File::open(path)?;
        Ok(KenAll::new(BufReader::new(file)))
    }
}

impl<T: Read> KenAll<T> {
    pub fn new(reader: T) -> KenAll<T> {
        // Row length is validated here, not by the csv crate, so a
        // short row is reported against its own line number.
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        KenAll {
            records,
            fused: false,
        }
    }
}

impl<T: Read> Iterator for KenAll<T> {
    type Item = Result<RawEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let result = match self.records.next()? {
            Ok(record) => decode(&record),
            Err(e) => Err(e.into()),
        };
        if result.is_err() {
            self.fused = true;
        }
        Some(result)
    }
}

fn decode(record: &StringRecord) -> Result<RawEntry, Error> {
    let row = record.position().map_or(0, |p| p.line());
    if record.len() != 15 {
        return Err(Error::BadRecord {
            row,
            cause: format!("expected 15 columns, got {}", record.len()),
        });
    }
    let flag = |index: usize| match &record[index] {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(Error::BadRecord {
            row,
            cause: format!("column {}: {:?} is not a 0/1 flag", index, other),
        }),
    };
    let status = Status::parse(&record[13]).ok_or_else(|| Error::BadRecord {
        row,
        cause: format!("column 13: {:?} is not a status", &record[13]),
    })?;
    let reason = Reason::parse(&record[14]).ok_or_else(|| Error::BadRecord {
        row,
        cause: format!("column 14: {:?} is not an update reason", &record[14]),
    })?;
    Ok(RawEntry {
        row,
        entry: Entry {
            code: record[0].to_string(),
            old_zip: record[1].to_string(),
            zip: record[2].to_string(),
            pref: Name::new(&record[6], &record[3]),
            region: Name::new(&record[7], &record[4]),
            town: Name::new(&record[8], &record[5]),
            is_partial_town: flag(9)?,
            is_large_town: flag(10)?,
            is_blocked_scheme: flag(11)?,
            is_overlapped_zip: flag(12)?,
            status,
            reason,
            notice: String::new(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ROW: &str = r#"01101,"064  ","0640930","ﾎｯｶｲﾄﾞｳ","ｻｯﾎﾟﾛｼﾁｭｳｵｳｸ","ﾐﾅﾐ30ｼﾞｮｳﾆｼ(9-11ﾁｮｳﾒ)","北海道","札幌市中央区","南三十条西（９〜１１丁目）",0,0,1,0,0,0"#;

    fn source(input: &str) -> KenAll<Cursor<Vec<u8>>> {
        KenAll::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_decode_row() {
        let mut src = source(ROW);
        let raw = src.next().expect("one record").expect("valid record");
        assert_eq!(raw.row, 1);
        assert_eq!(raw.entry.code, "01101");
        assert_eq!(raw.entry.old_zip, "064  ");
        assert_eq!(raw.entry.zip, "0640930");
        assert_eq!(raw.entry.pref, Name::new("北海道", "ﾎｯｶｲﾄﾞｳ"));
        assert_eq!(raw.entry.region, Name::new("札幌市中央区", "ｻｯﾎﾟﾛｼﾁｭｳｵｳｸ"));
        assert_eq!(
            raw.entry.town,
            Name::new("南三十条西（９〜１１丁目）", "ﾐﾅﾐ30ｼﾞｮｳﾆｼ(9-11ﾁｮｳﾒ)")
        );
        assert!(!raw.entry.is_partial_town);
        assert!(raw.entry.is_blocked_scheme);
        assert_eq!(raw.entry.status, Status::NotModified);
        assert!(!raw.entry.reason.is_deletion());
        assert!(src.next().is_none());
    }

    #[test]
    fn test_row_numbers_count_lines() {
        let input = format!("{}\n{}", ROW, ROW);
        let rows: Vec<u64> = source(&input).map(|r| r.expect("valid record").row).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_short_row() {
        let mut src = source("01101,\"064  \",\"0640930\"");
        match src.next() {
            Some(Err(Error::BadRecord { row, cause })) => {
                assert_eq!(row, 1);
                assert!(cause.contains("15 columns"));
            }
            other => panic!("expected BadRecord, got {:?}", other.is_some()),
        }
        assert!(src.next().is_none());
    }

    #[test]
    fn test_bad_flag() {
        let bad = ROW.replacen(",0,0,1,", ",2,0,1,", 1);
        match source(&bad).next() {
            Some(Err(Error::BadRecord { row: 1, .. })) => {}
            other => panic!("expected BadRecord, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_bad_reason() {
        let bad = format!("{}7", &ROW[..ROW.len() - 1]);
        match source(&bad).next() {
            Some(Err(Error::BadRecord { row: 1, cause })) => {
                assert!(cause.contains("column 14"));
            }
            other => panic!("expected BadRecord, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn test_source_fuses_after_error() {
        let input = format!("bad,row\n{}", ROW);
        let mut src = source(&input);
        assert!(matches!(src.next(), Some(Err(_))));
        assert!(src.next().is_none());
    }
}
