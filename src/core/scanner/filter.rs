//! Extension filter selecting the files eligible for perceptual hashing.

use std::collections::HashSet;
use std::path::Path;

/// Extensions decoded for similarity analysis
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Decides whether a path names a recognized image
pub struct ImageFilter {
    extensions: HashSet<String>,
}

impl ImageFilter {
    /// Create a filter with the default image set
    pub fn new() -> Self {
        Self {
            extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Override the accepted extensions (compared case-insensitively)
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Check whether the file's extension is in the image set
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Keep only the image paths, preserving order
    pub fn select<'a>(&self, paths: &'a [std::path::PathBuf]) -> Vec<&'a Path> {
        paths
            .iter()
            .map(|p| p.as_path())
            .filter(|p| self.is_image(p))
            .collect()
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
