use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::Result;

/// Supplies the text to be coded.
pub trait TextSource {
    fn fetch(&self) -> Result<String>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

pub struct FileSource(pub PathBuf);

impl TextSource for FileSource {
    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.0)?)
    }

    fn describe(&self) -> String {
        self.0.display().to_string()
    }
}

pub struct StdinSource;

impl TextSource for StdinSource {
    fn fetch(&self) -> Result<String> {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text)?;
        Ok(text)
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}

pub struct InlineSource(pub String);

impl TextSource for InlineSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}

/// `-` selects stdin, anything else is a file path.
pub fn from_arg(arg: &str) -> Box<dyn TextSource> {
    if arg == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource(PathBuf::from(arg)))
    }
}
