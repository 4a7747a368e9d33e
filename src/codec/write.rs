use csv::{Terminator, WriterBuilder};
use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use crate::error::Result;
use crate::table::Table;

/// Write `table` to `path`, replacing any existing file.
///
/// The data goes to `.<name>.tmp` next to the target first and is renamed
/// over it once fully flushed, so a failed write never leaves a half-written
/// file behind. A table with no columns is written as an empty file.
///
/// Symlinks are followed, so the file they point at is the one replaced, and
/// an existing file keeps its permissions.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let target = resolve_target(path)?;
    let tmp_path = tmp_path_for(&target)?;

    let written = write_records(&tmp_path, table, delimiter)
        .and_then(|()| keep_permissions(&target, &tmp_path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, &target).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io::Error::new(
            e.kind(),
            format!("renaming {:?} -> {:?}: {}", tmp_path, target, e),
        )
    })?;
    Ok(())
}

fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e.into()),
    }
}

fn keep_permissions(target: &Path, tmp_path: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(meta) => Ok(fs::set_permissions(tmp_path, meta.permissions())?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn write_records(tmp_path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let file = File::create(tmp_path)
        .map_err(|e| io::Error::new(e.kind(), format!("creating {:?}: {}", tmp_path, e)))?;
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    if table.width() > 0 {
        wtr.write_record(table.header())?;
        for row in table.raw_rows() {
            wtr.write_record(row)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} does not name a file", path),
        )
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}
