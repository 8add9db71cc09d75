use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

/// Source of one writable output per extracted entry.
///
/// The scanner creates a sink once an entry is selected, streams the payload
/// into it and hands it back through [`finish`](SinkProvider::finish) before
/// reading the next header. On any error the sink is dropped instead.
#[async_trait]
pub trait SinkProvider: Send {
    type Sink: AsyncWrite + Unpin + Send;

    /// Create the output for the entry called `name`.
    async fn create(&mut self, name: &str) -> io::Result<Self::Sink>;

    /// Close the output of a fully transferred entry.
    async fn finish(&mut self, _name: &str, mut sink: Self::Sink) -> io::Result<()> {
        sink.shutdown().await
    }
}

/// Extracts entries as files below a directory
pub struct DirectoryExtractor {
    root: PathBuf,
}

impl DirectoryExtractor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SinkProvider for DirectoryExtractor {
    type Sink = File;

    /// Existing files are truncated. Missing parent directories are not
    /// created, since directory entries are not supported. Names that would
    /// resolve outside the root are rejected.
    async fn create(&mut self, name: &str) -> io::Result<File> {
        File::create(self.root.join(contained_path(name)?)).await
    }

    async fn finish(&mut self, _name: &str, mut sink: File) -> io::Result<()> {
        sink.flush().await?;
        sink.sync_all().await
    }
}

/// Validate an entry name as a path relative to the extraction root.
fn contained_path(name: &str) -> io::Result<&Path> {
    let path = Path::new(name);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) | Component::ParentDir => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("refusing to extract outside the target directory: {}", name),
                ));
            }
        }
    }
    Ok(path)
}

/// Extracts entries to standard output, one after another
#[derive(Default)]
pub struct StdoutExtractor;

#[async_trait]
impl SinkProvider for StdoutExtractor {
    type Sink = Stdout;

    async fn create(&mut self, _name: &str) -> io::Result<Stdout> {
        Ok(tokio::io::stdout())
    }

    async fn finish(&mut self, _name: &str, mut sink: Stdout) -> io::Result<()> {
        sink.flush().await
    }
}

/// Collects extracted entries in memory, in extraction order
#[derive(Debug, Default)]
pub struct MemoryExtractor {
    pub entries: Vec<(String, Vec<u8>)>,
}

impl MemoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the first extracted entry called `name`
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }
}

#[async_trait]
impl SinkProvider for MemoryExtractor {
    type Sink = Vec<u8>;

    async fn create(&mut self, _name: &str) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }

    async fn finish(&mut self, name: &str, sink: Vec<u8>) -> io::Result<()> {
        self.entries.push((name.to_string(), sink));
        Ok(())
    }
}
