use std::path::Path;

use clap::crate_version;

pub fn execute() {
    println!("{}", version_line(std::env::args().next().as_deref()));
}

/// `<binary> version <crate version>`
pub fn version_line(argv0: Option<&str>) -> String {
    let name = argv0
        .and_then(|a| Path::new(a).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("ormless");
    format!("{} version {}", name, crate_version!())
}
