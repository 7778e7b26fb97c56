use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes through a sibling `.tmp` file so a crash never leaves a half-written store.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text.as_bytes())?;
    replace_file(&tmp_path, path)
}

fn replace_file(tmp_path: &Path, final_path: &Path) -> io::Result<()> {
    match fs::remove_file(final_path) {
        Ok(_) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => {
            let _ = fs::remove_file(tmp_path);
            return Err(error);
        }
    }

    if let Err(error) = fs::rename(tmp_path, final_path) {
        let _ = fs::remove_file(tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("local_store.json");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_existing_file_and_leaves_no_temp_behind() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("store.json");

        write_text_atomic(&path, "first").expect("first write");
        write_text_atomic(&path, "second").expect("second write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "second");
        assert!(!temp_path_for(&path).exists());
    }
}
