// src/fs/detection.rs
//! File type detection: magic numbers first, extension as fallback.

use std::{fmt, io, path::Path};

use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Image,
    Video,
    Document,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Audio => "Audio",
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Binary => "Binary",
        };
        f.write_str(s)
    }
}

/// Detected MIME type and its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

impl FileType {
    pub fn is_audio(&self) -> bool {
        self.category == FileCategory::Audio
    }
}

/// Detect the type of the file at `path`. Fails only when it can't be read.
pub fn detect_file_type(path: &Path) -> io::Result<FileType> {
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Image => FileCategory::Image,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Doc | MatcherType::Text => FileCategory::Document,
            _ => FileCategory::Binary,
        };
        return Ok(FileType {
            mime: kind.mime_type().to_string(),
            category,
        });
    }

    let mime = MimeGuess::from_path(path).first_or_octet_stream();
    let category = match mime.type_().as_str() {
        "audio" => FileCategory::Audio,
        "image" => FileCategory::Image,
        "video" => FileCategory::Video,
        "text" => FileCategory::Document,
        _ if mime.essence_str() == "application/octet-stream" => FileCategory::Binary,
        _ => FileCategory::Document,
    };

    Ok(FileType {
        mime: mime.essence_str().to_string(),
        category,
    })
}
