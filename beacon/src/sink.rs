//! Append-only output of produced randomness.

use crate::{chain::Randomness, Error};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// Encoding of each output record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `<round> <randomness_hex>`
    #[default]
    Text,

    /// `{"round":<round>,"randomness_hex":"<randomness_hex>"}`
    Json,
}

#[derive(Serialize)]
struct Record<'a> {
    round: u64,
    randomness_hex: &'a str,
}

/// Writes one record per round to a file (and optionally stdout).
pub struct Sink {
    file: File,
    format: Format,
    echo: Option<Box<dyn Write>>,
}

impl Sink {
    /// Opens (or creates) `path` for appending. Records are echoed to stdout.
    pub fn open(path: &Path, format: Format) -> Result<Self, Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            format,
            echo: Some(Box::new(io::stdout())),
        })
    }

    /// Enables or disables echoing records to stdout.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = match echo {
            true => Some(Box::new(io::stdout())),
            false => None,
        };
        self
    }

    /// Appends the randomness of `round`.
    pub fn record(&mut self, round: u64, randomness: &Randomness) -> Result<(), Error> {
        let line = Self::encode(self.format, round, randomness)?;
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        if let Some(echo) = &mut self.echo {
            writeln!(echo, "{line}")?;
            echo.flush()?;
        }
        Ok(())
    }

    fn encode(format: Format, round: u64, randomness: &Randomness) -> Result<String, Error> {
        let randomness_hex = randomness.hex();
        match format {
            Format::Text => Ok(format!("{round} {randomness_hex}")),
            Format::Json => Ok(serde_json::to_string(&Record {
                round,
                randomness_hex: &randomness_hex,
            })?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_cryptography::sha512;
    use std::{fs, path::PathBuf};

    fn path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "beacon-sink-{}-{}.txt",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_text() {
        let path = path("text");
        let mut sink = Sink::open(&path, Format::Text).unwrap().with_echo(false);
        let first = Randomness::from(sha512::hash(b"first"));
        let second = Randomness::from(sha512::hash(b"second"));
        sink.record(1, &first).unwrap();
        sink.record(2, &second).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("1 {first}\n2 {second}\n"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json() {
        let path = path("json");
        let mut sink = Sink::open(&path, Format::Json).unwrap().with_echo(false);
        let randomness = Randomness::from(sha512::hash(b"round"));
        sink.record(7, &randomness).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
        assert_eq!(value["round"], 7);
        assert_eq!(value["randomness_hex"], randomness.hex());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_appends_to_existing() {
        let path = path("append");
        fs::write(&path, "previous\n").unwrap();
        let mut sink = Sink::open(&path, Format::Text).unwrap().with_echo(false);
        let randomness = Randomness::from(sha512::hash(b"round"));
        sink.record(1, &randomness).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("previous\n1 {randomness}\n"));
        fs::remove_file(&path).unwrap();
    }

    /// A writer whose reader has gone away.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_closed_echo() {
        let path = path("closed-echo");
        let mut sink = Sink {
            echo: Some(Box::new(Closed)),
            ..Sink::open(&path, Format::Text).unwrap()
        };
        let randomness = Randomness::from(sha512::hash(b"round"));
        assert!(matches!(
            sink.record(1, &randomness),
            Err(Error::Sink(err)) if err.kind() == io::ErrorKind::BrokenPipe
        ));

        // The file record is written before echoing
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("1 {randomness}\n"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_full_device() {
        let mut sink = Sink::open(Path::new("/dev/full"), Format::Text)
            .unwrap()
            .with_echo(false);
        let randomness = Randomness::from(sha512::hash(b"round"));
        assert!(matches!(sink.record(1, &randomness), Err(Error::Sink(_))));
    }

    #[test]
    fn test_unwritable_path() {
        let path = std::env::temp_dir()
            .join(format!("beacon-sink-missing-{}", std::process::id()))
            .join("result.txt");
        assert!(matches!(
            Sink::open(&path, Format::Text),
            Err(Error::Sink(_))
        ));
    }
}
