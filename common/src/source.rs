use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Where a piece of shader source text comes from: a literal embedded in
/// the binary, or a file read once at startup.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    Inline(&'static str),
    Path(PathBuf),
}

impl SourceSpec {
    /// The inline fallback unless a path override was given.
    pub fn from_override(inline: &'static str, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => SourceSpec::Path(path),
            None => SourceSpec::Inline(inline),
        }
    }

    pub fn load(&self) -> Result<Cow<'static, str>, SourceError> {
        match self {
            SourceSpec::Inline(text) => Ok(Cow::Borrowed(text)),
            SourceSpec::Path(path) => {
                let text = fs::read_to_string(path).map_err(|source| SourceError::Input {
                    path: path.clone(),
                    source,
                })?;

                Ok(Cow::Owned(text))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read shader source {path:?}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_source_is_borrowed() {
        let spec = SourceSpec::Inline("#version 330 core\n");

        let text = spec.load().unwrap();

        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text.as_ref(), "#version 330 core\n");
    }

    #[test]
    fn file_source_is_read() {
        let path = std::env::temp_dir().join(format!("glsketch-source-{}.glsl", std::process::id()));
        fs::write(&path, "void main() {}\n").unwrap();

        let spec = SourceSpec::Path(path.clone());
        let text = spec.load().unwrap();

        assert_eq!(text.as_ref(), "void main() {}\n");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = PathBuf::from("does/not/exist.glsl");

        let err = SourceSpec::Path(path).load().unwrap_err();

        assert!(err.to_string().contains("does/not/exist.glsl"));
    }

    #[test]
    fn override_path_wins_over_inline() {
        let spec = SourceSpec::from_override("inline", Some(PathBuf::from("a.glsl")));
        assert!(matches!(spec, SourceSpec::Path(_)));

        let spec = SourceSpec::from_override("inline", None);
        assert!(matches!(spec, SourceSpec::Inline("inline")));
    }
}
