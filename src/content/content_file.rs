use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// `.mdx` marks a post that may carry embedded component tags; both
/// variants go through the same pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Markdown,
    Mdx,
}

impl ContentFormat {
    pub fn from_path(path: &Path) -> Option<ContentFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") => Some(ContentFormat::Markdown),
            Some("mdx") => Some(ContentFormat::Mdx),
            _ => None,
        }
    }
}

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<ContentFile> {
        let format = match ContentFormat::from_path(&file_path) {
            None => {
                return Err(io::Error::new(
                    ErrorKind::Unsupported,
                    format!("Not a content file: {}", file_path.display()),
                ))
            }
            Some(format) => format,
        };

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            slug,
            file_path,
            format,
            raw_content,
        })
    }
}
