//! Test support for runner integration tests.
//!
//! A [`Project`] is a temporary directory holding fixture JARs and a
//! `scala-suffix.toml` that lists them.

use camino::{Utf8Path, Utf8PathBuf};
use scala_suffix_cli::cli::Cli;
use scala_suffix_cli::patch_flow::execute;
use scala_suffix_cli::pipeline::ZipManifestPatcher;
use std::fs::File;
use std::io::{Read, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Location of the manifest inside every fixture JAR.
pub const MANIFEST: &str = "META-INF/MANIFEST.MF";

/// A temporary project directory.
pub struct Project {
    _dir: TempDir,
    root: Utf8PathBuf,
    libraries: Vec<String>,
    dependencies: Vec<String>,
}

impl Project {
    /// Create an empty project with a `lib` directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_owned()).expect("UTF-8 temp path");
        std::fs::create_dir_all(root.join("lib")).expect("create lib dir");
        Self {
            _dir: dir,
            root,
            libraries: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Path of the archive for `artifact_id`, whether or not it exists.
    pub fn jar_path(&self, artifact_id: &str) -> Utf8PathBuf {
        self.root.join("lib").join(format!("{artifact_id}.jar"))
    }

    /// List `identifier` under `libraries`.
    pub fn add_library(&mut self, identifier: &str) {
        self.libraries.push(identifier.to_owned());
    }

    /// Declare a dependency whose `file` is `lib/<artifact>.jar`.
    pub fn add_dependency(&mut self, group_id: &str, artifact_id: &str) {
        self.dependencies.push(format!(
            "[[dependencies]]\ngroup_id = \"{group_id}\"\nartifact_id = \"{artifact_id}\"\nfile = \"lib/{artifact_id}.jar\"\n"
        ));
    }

    /// Write the JAR for `artifact_id` with a manifest holding `lines`.
    pub fn write_jar(&self, artifact_id: &str, lines: &[&str]) -> Utf8PathBuf {
        let manifest: String = lines.iter().map(|line| format!("{line}\n")).collect();
        let path = self.jar_path(artifact_id);
        let mut writer = ZipWriter::new(File::create(&path).expect("create jar"));
        for (entry, contents) in [
            (MANIFEST, manifest.as_bytes()),
            ("lib/Library.class", b"\xca\xfe\xba\xbe".as_slice()),
        ] {
            writer
                .start_file(entry, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(contents).expect("write entry");
        }
        writer.finish().expect("finish jar");
        path
    }

    /// Write `scala-suffix.toml` from the libraries and dependencies added
    /// so far.
    pub fn write_config(&self) {
        let libraries: Vec<String> = self
            .libraries
            .iter()
            .map(|library| format!("\"{library}\""))
            .collect();
        let mut text = format!("libraries = [{}]\n\n", libraries.join(", "));
        for dependency in &self.dependencies {
            text.push_str(dependency);
            text.push('\n');
        }
        std::fs::write(self.root.join("scala-suffix.toml"), text).expect("write config");
    }

    /// Run the real patcher against this project and return its stdout.
    pub fn run(&self, cli: &Cli) -> String {
        let mut out = Vec::new();
        execute(cli, &self.root, &ZipManifestPatcher::default(), &mut out).expect("run completes");
        String::from_utf8(out).expect("UTF-8 output")
    }
}

/// Read the manifest of `jar` as text.
pub fn manifest_text(jar: &Utf8Path) -> String {
    let mut zip = ZipArchive::new(File::open(jar).expect("open jar")).expect("read jar");
    let mut file = zip.by_name(MANIFEST).expect("manifest present");
    let mut text = String::new();
    file.read_to_string(&mut text).expect("UTF-8 manifest");
    text
}
