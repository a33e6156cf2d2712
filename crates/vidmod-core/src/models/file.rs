use bytes::Bytes;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Media type used when the extension tells us nothing.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Where the bytes of a file live until they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Memory(Bytes),
    /// Read from disk when the request is built.
    Disk(PathBuf),
}

/// A file the user picked, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub content: FileContent,
}

impl FileCandidate {
    pub fn in_memory(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            media_type: media_type.into(),
            content: FileContent::Memory(data),
        }
    }

    /// Describe a file on disk. Only metadata is read; the media type is
    /// guessed from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video")
            .to_string();

        Ok(Self {
            media_type: guess_media_type(&name).to_string(),
            name,
            size: metadata.len(),
            content: FileContent::Disk(path.to_path_buf()),
        })
    }
}

/// Guess a MIME type from a file name's extension.
pub fn guess_media_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        "mpeg" | "mpg" => "video/mpeg",
        "3gp" => "video/3gpp",
        "ogv" => "video/ogg",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        // Common non-video files, so rejections name something sensible
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => UNKNOWN_MEDIA_TYPE,
    }
}

/// A file that passed validation. Only `FileValidator` creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    name: String,
    size: u64,
    media_type: String,
    #[serde(skip)]
    content: FileContent,
}

impl SelectedFile {
    pub(crate) fn from_candidate(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            size: candidate.size,
            media_type: candidate.media_type,
            content: candidate.content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &FileContent {
        &self.content
    }
}
