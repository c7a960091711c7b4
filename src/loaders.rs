use crate::error::Error;
use crate::model::Student;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

const DELIMITER: u8 = b';';

/// Read students from a semicolon separated file whose first line is a header.
///
/// The first line is always discarded, even when blank. Blank lines after it
/// are skipped. A record may carry one extra empty field, which is what a
/// trailing separator produces.
pub fn load_students(path: &Path) -> Result<Vec<Student>, Error> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    read_students(file).map_err(|e| match e {
        Error::Csv { source, .. } => Error::Csv {
            path: path.to_owned(),
            source,
        },
        Error::Io { source, .. } => Error::Io {
            path: path.to_owned(),
            source,
        },
        other => other,
    })
}

pub fn read_students<R: Read>(reader: R) -> Result<Vec<Student>, Error> {
    let mut reader = BufReader::new(reader);
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .map_err(|source| Error::Io {
            path: Default::default(),
            source,
        })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut students = Vec::new();
    for record in reader.records() {
        let record = record.map_err(record_error)?;
        // Positions start after the discarded header.
        let line = record.position().map_or(0, |p| p.line() + 1);
        let student = parse_record(&record).map_err(|e| e.at_line(line))?;
        trace!(line, student = %student, "student read");
        students.push(student);
    }
    debug!(count = students.len(), "students read");
    Ok(students)
}

fn record_error(source: csv::Error) -> Error {
    if let csv::ErrorKind::Utf8 { pos, .. } = source.kind() {
        return Error::Encoding {
            line: pos.as_ref().map_or(0, |p| p.line() + 1),
        };
    }
    Error::Csv {
        path: Default::default(),
        source,
    }
}

fn parse_record(record: &StringRecord) -> Result<Student, Error> {
    let fields = match record.len() {
        4 => record,
        5 if record[4].is_empty() => record,
        found => return Err(Error::FieldCount { line: 0, found }),
    };
    Student::parse(&fields[0], &fields[1], &fields[2], &fields[3])
}

/// Write students to `path`, truncating it. No header is written and every
/// line ends with a separator.
///
/// Scores use the shortest form that reads back to the same value, so a
/// whole score is written without a fractional part (`90`, not `90.0`).
pub fn save_students(path: &Path, students: &[Student]) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    write_students(file, students).map_err(|e| match e {
        Error::Csv { source, .. } => Error::Csv {
            path: path.to_owned(),
            source,
        },
        Error::Io { source, .. } => Error::Io {
            path: path.to_owned(),
            source,
        },
        other => other,
    })
}

pub fn write_students<W: Write>(writer: W, students: &[Student]) -> Result<(), Error> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for student in students {
        let score = student.score().to_string();
        writer
            .write_record([
                student.id(),
                student.first_name(),
                student.last_name(),
                score.as_str(),
                "",
            ])
            .map_err(|source| Error::Csv {
                path: Default::default(),
                source,
            })?;
    }
    writer.flush().map_err(|source| Error::Io {
        path: Default::default(),
        source,
    })?;
    debug!(count = students.len(), "students written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<Vec<Student>, Error> {
        read_students(content.as_bytes())
    }

    fn write(students: &[Student]) -> String {
        let mut out = Vec::new();
        write_students(&mut out, students).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_read() {
        let students = read("id;first;last;score\n1;Ada;Lovelace;88.5\n2;Alan;Turing;90\n").unwrap();
        assert_eq!(
            students,
            vec![
                Student::new("1", "Ada", "Lovelace", 88.5),
                Student::new("2", "Alan", "Turing", 90.0),
            ]
        );
    }

    #[test]
    fn test_header_is_not_validated() {
        let students = read("whatever\n1;A;B;10\n").unwrap();
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_header_only() {
        assert!(read("id;first;last;score\n").unwrap().is_empty());
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_and_trailing_separator() {
        let students = read("header\n1;A;B;10;\n\n2;C;D;20\r\n\n").unwrap();
        assert_eq!(
            students,
            vec![Student::new("1", "A", "B", 10.0), Student::new("2", "C", "D", 20.0)]
        );
    }

    #[test]
    fn test_wrong_field_count() {
        match read("header\n1;A;B;10\n2;C;20\n") {
            Err(Error::FieldCount { line, found }) => {
                assert_eq!(line, 3);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            read("header\n1;A;B;10;x\n"),
            Err(Error::FieldCount { line: 2, found: 5 })
        ));
    }

    #[test]
    fn test_invalid_score() {
        match read("header\n1;A;B;10\n2;C;D;lots\n") {
            Err(Error::Parse { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_quotes_are_literal() {
        let students = read("header\n\"1\";A;B;10\n").unwrap();
        assert_eq!(students[0].id(), "\"1\"");
    }

    #[test]
    fn test_write() {
        assert_eq!(write(&[Student::new("1", "A", "B", 88.5)]), "1;A;B;88.5;\n");
        assert_eq!(
            write(&[Student::new("1", "A", "B", 88.5), Student::new("2", "C", "D", 90.0)]),
            "1;A;B;88.5;\n2;C;D;90;\n"
        );
        assert_eq!(write(&[]), "");
    }

    #[test]
    fn test_written_output_reads_back_with_header() {
        let students = vec![
            Student::new("1", "Ada", "Lovelace", 88.5),
            Student::new("2", "Alan", "Turing", 71.25),
        ];
        let content = format!("header\n{}", write(&students));
        assert_eq!(read(&content).unwrap(), students);
    }

    #[test]
    fn test_blank_header_is_discarded() {
        assert_eq!(
            read("\n1;A;B;10\n2;C;D;20\n").unwrap(),
            vec![Student::new("1", "A", "B", 10.0), Student::new("2", "C", "D", 20.0)]
        );
        assert_eq!(
            read("\n\n1;A;B;10\n").unwrap(),
            vec![Student::new("1", "A", "B", 10.0)]
        );
        assert_eq!(
            read("\r\n1;A;B;10\r\n").unwrap(),
            vec![Student::new("1", "A", "B", 10.0)]
        );
    }

    #[test]
    fn test_whitespace_header_is_discarded() {
        assert_eq!(
            read("   \t\n1;A;B;10\n").unwrap(),
            vec![Student::new("1", "A", "B", 10.0)]
        );
    }

    #[test]
    fn test_data_line_numbers_after_blank_header() {
        assert!(matches!(
            read("\n1;A;B;10\n2;C;D;x\n"),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_a_data_error() {
        let content = b"header\n1;A;B;10\n2;\xff;D;20\n";
        match read_students(&content[..]) {
            Err(e @ Error::Encoding { .. }) => assert!(e.is_data_error()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_header_may_be_invalid_utf8() {
        let content = b"\xff\xfe\n1;A;B;10\n";
        assert_eq!(read_students(&content[..]).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        match load_students(&path) {
            Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let students = vec![Student::new("7", "Grace", "Hopper", 99.0)];
        save_students(&path, &students).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7;Grace;Hopper;99;\n");
        // The first line is taken as a header.
        assert!(load_students(&path).unwrap().is_empty());
    }
}
