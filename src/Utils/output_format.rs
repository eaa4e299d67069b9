//! Picks the rendering backend from the extension of the output file.
use crate::error::DemoError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// png, bmp, jpg
    Bitmap,
    Svg,
    /// animated gif
    Gif,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, DemoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| DemoError::UnsupportedFormat(path.display().to_string()))?;
        match ext.as_str() {
            "png" | "bmp" | "jpg" | "jpeg" => Ok(OutputFormat::Bitmap),
            "svg" => Ok(OutputFormat::Svg),
            "gif" => Ok(OutputFormat::Gif),
            other => Err(DemoError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Formats usable for a single still picture.
    pub fn still_image(path: &Path) -> Result<Self, DemoError> {
        match Self::from_path(path)? {
            OutputFormat::Gif => Err(DemoError::UnsupportedFormat(
                "gif (use png or svg for still pictures)".to_string(),
            )),
            format => Ok(format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/plot.PNG")).unwrap(),
            OutputFormat::Bitmap
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("plot.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("movie.gif")).unwrap(),
            OutputFormat::Gif
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("plot.pdf")),
            Err(DemoError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
        assert!(OutputFormat::from_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn test_still_image_rejects_gif() {
        assert!(OutputFormat::still_image(Path::new("a.gif")).is_err());
        assert!(OutputFormat::still_image(Path::new("a.jpg")).is_ok());
    }
}
