use anyhow::{anyhow, Result, Context};
use std::fs;
use std::path::{Component, Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a whole file into memory
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file, creating the parent directory first
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    // @generates: Local path for a downloaded artifact
    // @params: output_dir, file_name (last URL segment), or the
    //          `{language}_output.{extension}` fallback when the URL has none
    // @returns: A path directly inside output_dir; errors when no safe name exists
    pub fn artifact_output_path<P: AsRef<Path>>(
        output_dir: P,
        file_name: Option<&str>,
        language: &str,
        extension: &str,
    ) -> Result<PathBuf> {
        let file_name = match file_name.and_then(Self::single_component) {
            Some(name) => name,
            None => {
                let code: String = language
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                    .collect();
                if code.is_empty() {
                    return Err(anyhow!("No usable file name for {} artifact of language {:?}", extension, language));
                }
                format!("{}_output.{}", code, extension)
            }
        };

        Ok(output_dir.as_ref().join(file_name))
    }

    // Accepts a bare file name only: no separators, no `.` or `..`
    fn single_component(name: &str) -> Option<String> {
        let mut components = Path::new(name.trim()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => Some(part.to_string_lossy().to_string()),
            _ => None,
        }
    }
}
