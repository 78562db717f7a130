//! Test support for archive patch tests.
//!
//! Builds small JAR fixtures in a temporary directory and reads their
//! manifests back.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{Read, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Location of the manifest inside every fixture JAR.
pub const MANIFEST: &str = "META-INF/MANIFEST.MF";

/// A temporary directory holding fixture archives and a scratch area.
pub struct JarFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl JarFixture {
    /// Create an empty fixture directory with a `scratch` subdirectory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_owned()).expect("UTF-8 temp path");
        std::fs::create_dir_all(root.join("scratch")).expect("create scratch");
        Self { _dir: dir, root }
    }

    /// The scratch directory handed to the patcher.
    pub fn scratch(&self) -> Utf8PathBuf {
        self.root.join("scratch")
    }

    /// Write a JAR named `name` whose manifest holds `lines`, one per line,
    /// plus a class file entry.
    pub fn jar_with_manifest(&self, name: &str, lines: &[&str]) -> Utf8PathBuf {
        let manifest: String = lines.iter().map(|line| format!("{line}\n")).collect();
        self.jar(
            name,
            &[
                (MANIFEST, manifest.as_bytes()),
                ("scala/Predef.class", b"\xca\xfe\xba\xbe\x00\x00\x00\x34"),
            ],
        )
    }

    /// Write a JAR named `name` with the given entries, in order.
    pub fn jar(&self, name: &str, entries: &[(&str, &[u8])]) -> Utf8PathBuf {
        let path = self.root.join(name);
        let file = File::create(&path).expect("create jar");
        let mut writer = ZipWriter::new(file);
        for (entry, contents) in entries {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(contents).expect("write entry");
        }
        writer.finish().expect("finish jar");
        path
    }
}

/// Read one entry of `jar` as text.
pub fn read_entry_text(jar: &Utf8Path, entry: &str) -> String {
    let mut zip = ZipArchive::new(File::open(jar).expect("open jar")).expect("read jar");
    let mut file = zip.by_name(entry).expect("entry present");
    let mut text = String::new();
    file.read_to_string(&mut text).expect("UTF-8 entry");
    text
}

/// Read the manifest of `jar` as lines.
pub fn manifest_lines(jar: &Utf8Path) -> Vec<String> {
    read_entry_text(jar, MANIFEST)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Names of all entries in `jar`, in central directory order.
pub fn entry_names(jar: &Utf8Path) -> Vec<String> {
    let zip = ZipArchive::new(File::open(jar).expect("open jar")).expect("read jar");
    zip.file_names().map(str::to_owned).collect()
}
