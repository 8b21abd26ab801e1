//! Character sources feeding the lexer
//!
//! The lexer pulls exactly one character per consumption step through
//! [`CharSource::next_char`]; `None` marks end of input.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-name extensions accepted by [`SourceFile::open`].
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["java", "mjava"];

/// Something that yields one character at a time.
pub trait CharSource {
    /// Next character, or `None` once the input is exhausted.
    fn next_char(&mut self) -> Option<char>;
}

/// In-memory source over a string slice.
pub struct StrSource<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }
}

/// Errors raised before any character is read.
#[derive(Debug)]
pub enum SourceError {
    NoExtension(PathBuf),
    BadExtension(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NoExtension(path) => {
                write!(f, "Filename has no extension: {}", path.display())
            }
            SourceError::BadExtension(path) => write!(
                f,
                "Bad filename: {} (expected .{})",
                path.display(),
                ACCEPTED_EXTENSIONS.join(" or .")
            ),
            SourceError::Io { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Checks the path's final extension against [`ACCEPTED_EXTENSIONS`].
pub fn check_extension(path: &Path) -> Result<(), SourceError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| SourceError::NoExtension(path.to_path_buf()))?;

    if ACCEPTED_EXTENSIONS.contains(&ext) {
        Ok(())
    } else {
        Err(SourceError::BadExtension(path.to_path_buf()))
    }
}

/// A source file loaded from disk.
pub struct SourceFile {
    path: PathBuf,
    chars: Vec<char>,
    position: usize,
}

impl SourceFile {
    /// Validates the extension, then reads the whole file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        check_extension(path)?;

        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            chars: text.chars().collect(),
            position: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CharSource for SourceFile {
    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_ends_with_none() {
        let mut source = StrSource::new("ab");
        assert_eq!(source.next_char(), Some('a'));
        assert_eq!(source.next_char(), Some('b'));
        assert_eq!(source.next_char(), None);
        assert_eq!(source.next_char(), None);
    }

    #[test]
    fn test_extension_check() {
        assert!(check_extension(Path::new("Test.java")).is_ok());
        assert!(check_extension(Path::new("dir/Test.mjava")).is_ok());
        assert!(check_extension(Path::new("a.b.java")).is_ok());
        assert!(matches!(
            check_extension(Path::new("Test.c")),
            Err(SourceError::BadExtension(_))
        ));
        assert!(matches!(
            check_extension(Path::new("Makefile")),
            Err(SourceError::NoExtension(_))
        ));
    }

    #[test]
    fn test_open_rejects_before_reading() {
        // The file does not exist; the extension check must fail first.
        let err = SourceFile::open("no/such/file.txt").err();
        assert!(matches!(err, Some(SourceError::BadExtension(_))));
    }

    #[test]
    fn test_open_reads_file() {
        let path = std::env::temp_dir().join("minijava_front_source_test.java");
        fs::write(&path, "class A {}").unwrap();

        let mut file = SourceFile::open(&path).unwrap();
        let text: String = std::iter::from_fn(|| file.next_char()).collect();
        assert_eq!(text, "class A {}");

        let _ = fs::remove_file(&path);
    }
}
