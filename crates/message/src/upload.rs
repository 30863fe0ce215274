//! Uploaded-file descriptors and the byte-stream-provider boundary.
//!
//! Uploads arrive as a tree: leaves describe individual files, groups model
//! bracketed field names (`attachments[cover]`, `attachments[scan]`).
//! Descriptors never touch the filesystem themselves; turning a descriptor
//! into a readable [`Body`] goes through a [`StreamProvider`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::body::Body;
use crate::error::MessageError;

/// Descriptor of one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    path: PathBuf,
    client_filename: String,
    client_media_type: String,
    size: u64,
}

impl UploadedFile {
    pub fn new(
        path: impl Into<PathBuf>,
        client_filename: impl Into<String>,
        client_media_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            client_filename: client_filename.into(),
            client_media_type: client_media_type.into(),
            size,
        }
    }

    /// Location the transport stored the file at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn client_filename(&self) -> &str {
        &self.client_filename
    }

    pub fn client_media_type(&self) -> &str {
        &self.client_media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Opens the file's content as a body stream through `provider`.
    pub fn stream(&self, provider: &dyn StreamProvider) -> Result<Body, MessageError> {
        provider.open(&self.path).map_err(MessageError::io)
    }
}

/// A node in the upload tree: a file leaf or a named group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNode {
    File(UploadedFile),
    Group(BTreeMap<String, UploadNode>),
}

impl UploadNode {
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            UploadNode::File(file) => Some(file),
            UploadNode::Group(_) => None,
        }
    }
}

/// The uploaded-files tree of a server request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFiles {
    nodes: BTreeMap<String, UploadNode>,
}

impl UploadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, node: UploadNode) {
        self.nodes.insert(name.into(), node);
    }

    pub fn get(&self, name: &str) -> Option<&UploadNode> {
        self.nodes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UploadNode)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Boundary collaborator turning a filesystem path into a body stream.
pub trait StreamProvider {
    fn open(&self, path: &Path) -> io::Result<Body>;
}

/// [`StreamProvider`] reading from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStreamProvider;

impl StreamProvider for FsStreamProvider {
    fn open(&self, path: &Path) -> io::Result<Body> {
        fs::read(path).map(Body::from)
    }
}
