use std::{fs, path::Path};

/// Writes an empty unit file at `rel` under `root`.
pub fn touch_unit(root: &Path, rel: &str) {
    write_file(root, rel, "");
}

/// Writes a SQL unit with the given up and down sections.
pub fn write_sql_unit(root: &Path, rel: &str, up: &str, down: &str) {
    write_file(
        root,
        rel,
        &format!("-- +migrate Up\n{}\n\n-- +migrate Down\n{}\n", up, down),
    );
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
