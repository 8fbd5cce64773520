use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::solution::Mesh;

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("icosa-output-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn off_file_matches_display() {
        let mesh = Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(0.6, 0.0, 0.8),
                Point3::new(0.0, 0.6, 0.8),
            ],
            faces: vec![[0, 1, 2]],
        };
        let path = scratch_dir("off").join("tri.off");
        write_off(&path, &mesh).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, mesh.to_string());
        assert!(text.starts_with("OFF\n3 1 0\n"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let mesh = Mesh {
            vertices: vec![],
            faces: vec![],
        };
        let path = scratch_dir("missing").join("no/such/dir/x.off");
        assert!(write_off(&path, &mesh).is_err());
    }

    #[test]
    fn json_is_written() {
        let path = scratch_dir("json").join("summary.json");
        write_json(&path, &vec![1, 2, 3]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let value: Vec<u32> = serde_json::from_str(&text).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }
}

/// Writes a mesh as an OFF file.
pub fn write_off(path: &Path, mesh: &Mesh) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{}", mesh)?;
    writer.flush()?;
    Ok(())
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Creates the output directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}
