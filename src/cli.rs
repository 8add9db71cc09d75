use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Parser};

use crate::tar::{Mode, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "runtar")]
#[command(version)]
#[command(about = "A Rust tar lister/extractor with HTTP URL support", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "extract"])))]
#[command(after_help = "Examples:\n  \
  runtar -t -f data.tar               list all files in data.tar\n  \
  runtar -x -v -f data.tar a.txt      extract a.txt, printing its name\n  \
  cat data.tar | runtar -t -f -       list an archive read from stdin\n  \
  runtar -x -O -f https://example.com/archive.tar README   print a remote file")]
pub struct Cli {
    /// Tar archive path, `-` for stdin, or HTTP URL
    #[arg(short = 'f', value_name = "ARCHIVE")]
    pub file: String,

    /// List the archive contents
    #[arg(short = 't')]
    pub list: bool,

    /// Extract files from the archive
    #[arg(short = 'x')]
    pub extract: bool,

    /// Verbosely list files processed
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Extract files into DIR
    #[arg(short = 'C', value_name = "DIR", default_value = ".")]
    pub directory: String,

    /// Extract files to standard output
    #[arg(short = 'O', conflicts_with = "list")]
    pub to_stdout: bool,

    /// Entries to list or extract (default: all)
    #[arg(value_name = "FILES", value_parser = NonEmptyStringValueParser::new())]
    pub files: Vec<String>,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    pub fn is_stdin(&self) -> bool {
        self.file == "-"
    }

    pub fn mode(&self) -> Mode {
        if self.extract { Mode::Extract } else { Mode::List }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            mode: self.mode(),
            verbose: self.verbose,
            requested: self.files.clone(),
        }
    }
}
