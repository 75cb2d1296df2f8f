use std::fs;
use std::path::Path;

use log::warn;

// Reads a text resource. Any failure yields empty content, which callers treat as fatal.
pub fn load_text<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("could not read {:?}: {}", path, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "kernel text").unwrap();
        assert_eq!(load_text(file.path()), "kernel text");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_text(dir.path().join("missing.json")), "");
    }
}
