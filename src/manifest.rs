//! Line-oriented view of a JAR manifest.
//!
//! Only what the patcher needs is modelled here: the ordered lines of the
//! entry, the terminator they used, and the presence check for an
//! `Automatic-Module-Name` declaration. Sections and continuation lines
//! are not modelled. Lines are kept as raw bytes, so manifests carrying
//! Latin-1 or other non-UTF-8 values pass through unchanged.

use crate::library_name::LibraryName;

/// The manifest key declaring an automatic module name.
pub const AUTOMATIC_MODULE_NAME: &str = "Automatic-Module-Name";

/// Location of the manifest inside every JAR.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Line terminator used when a manifest is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Returns the terminator characters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Returns the terminator as bytes.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    fn detect(bytes: &[u8]) -> Self {
        if bytes.windows(2).any(|pair| pair == b"\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

/// The ordered lines of a manifest entry.
///
/// # Examples
///
/// ```
/// use scala_suffix::library_name::LibraryName;
/// use scala_suffix::manifest::ManifestLines;
///
/// let manifest = ManifestLines::parse(b"Manifest-Version: 1.0\n\nCreated-By: 1.8\n");
/// assert!(!manifest.declares_module_name());
///
/// let name = LibraryName::try_from("scala-library_2.13").unwrap();
/// let patched = manifest.with_module_name(&name);
/// assert_eq!(
///     patched.render(),
///     b"Manifest-Version: 1.0\nCreated-By: 1.8\nAutomatic-Module-Name: scala-library_2.13\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestLines {
    lines: Vec<Vec<u8>>,
    line_ending: LineEnding,
}

impl ManifestLines {
    /// Split manifest bytes into lines, remembering the terminator in use.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line. A final terminator does
    /// not start an extra empty line.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            lines: split_lines(bytes),
            line_ending: LineEnding::detect(bytes),
        }
    }

    /// Build a manifest from explicit lines using `\n` terminators.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            line_ending: LineEnding::Lf,
        }
    }

    /// The lines in their original order, without terminators.
    #[must_use]
    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// The terminator written after every line by [`Self::render`].
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Returns `true` when any line mentions the module-name key.
    ///
    /// The check is an ASCII case-insensitive substring match anywhere in
    /// the line, not a key-prefix match, and it does not count occurrences.
    #[must_use]
    pub fn declares_module_name(&self) -> bool {
        let key = AUTOMATIC_MODULE_NAME.as_bytes();
        self.lines.iter().any(|line| {
            line.windows(key.len())
                .any(|window| window.eq_ignore_ascii_case(key))
        })
    }

    /// Trimmed copies of every non-blank line, in order.
    ///
    /// Trimming removes every byte up to and including the space character
    /// from both ends, control bytes included.
    #[must_use]
    pub fn normalised_lines(&self) -> Vec<Vec<u8>> {
        self.lines
            .iter()
            .map(|line| trim_line(line))
            .filter(|line| !line.is_empty())
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Returns the normalised manifest with one declaration appended.
    #[must_use]
    pub fn with_module_name(&self, library: &LibraryName) -> Self {
        let mut lines = self.normalised_lines();
        lines.push(declaration_line(library).into_bytes());
        Self {
            lines,
            line_ending: self.line_ending,
        }
    }

    /// Render the lines back to bytes, terminating every line.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let ending = self.line_ending.as_bytes();
        self.lines.iter().fold(Vec::new(), |mut out, line| {
            out.extend_from_slice(line);
            out.extend_from_slice(ending);
            out
        })
    }
}

/// Format the declaration line for `library`.
#[must_use]
pub fn declaration_line(library: &LibraryName) -> String {
    format!("{AUTOMATIC_MODULE_NAME}: {library}")
}

fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let end = rest
            .iter()
            .position(|byte| matches!(byte, b'\n' | b'\r'))
            .unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        lines.push(line.to_vec());
        rest = match tail {
            [b'\r', b'\n', after @ ..] | [_, after @ ..] => after,
            [] => tail,
        };
    }
    lines
}

fn trim_line(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|byte| *byte > b' ')
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|byte| *byte > b' ')
        .map_or(start, |last| last + 1);
    line.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name(value: &str) -> LibraryName {
        LibraryName::try_from(value).expect("valid library name")
    }

    fn text(lines: &[Vec<u8>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    #[rstest]
    #[case::canonical("Automatic-Module-Name: foo")]
    #[case::lower_case("automatic-module-name: foo")]
    #[case::upper_case("AUTOMATIC-MODULE-NAME: foo")]
    #[case::indented("   Automatic-Module-Name: foo")]
    #[case::inside_another_value("X-Note: set Automatic-Module-Name later")]
    fn detects_existing_declarations(#[case] line: &str) {
        let manifest = ManifestLines::from_lines(["Manifest-Version: 1.0", line]);
        assert!(manifest.declares_module_name(), "expected match for {line:?}");
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::plain(&["Manifest-Version: 1.0", "Created-By: 1.8"])]
    #[case::partial_key(&["Automatic-Module: foo"])]
    fn ignores_manifests_without_declarations(#[case] lines: &[&str]) {
        let manifest = ManifestLines::from_lines(lines.iter().copied());
        assert!(!manifest.declares_module_name());
    }

    #[test]
    fn normalisation_trims_and_drops_blank_lines() {
        let manifest = ManifestLines::parse(b"  Manifest-Version: 1.0  \n\n \t \nCreated-By: 1.8\n");
        assert_eq!(
            text(&manifest.normalised_lines()),
            vec!["Manifest-Version: 1.0", "Created-By: 1.8"]
        );
    }

    #[test]
    fn appends_exactly_one_declaration_after_existing_lines() {
        let manifest = ManifestLines::from_lines(["Manifest-Version: 1.0", "  ", "Created-By: 1.8"]);
        let patched = manifest.with_module_name(&name("scala-library_2.13"));
        assert_eq!(
            text(patched.lines()),
            vec![
                "Manifest-Version: 1.0",
                "Created-By: 1.8",
                "Automatic-Module-Name: scala-library_2.13",
            ]
        );
    }

    #[test]
    fn declaration_on_empty_manifest_is_the_only_line() {
        let patched = ManifestLines::parse(b"").with_module_name(&name("cats-core"));
        assert_eq!(text(patched.lines()), vec!["Automatic-Module-Name: cats-core"]);
        assert_eq!(patched.render(), b"Automatic-Module-Name: cats-core\n");
    }

    #[rstest]
    #[case::lf(b"Manifest-Version: 1.0\nCreated-By: 1.8\n", LineEnding::Lf)]
    #[case::crlf(b"Manifest-Version: 1.0\r\nCreated-By: 1.8\r\n", LineEnding::CrLf)]
    fn render_keeps_the_original_terminator(#[case] bytes: &[u8], #[case] ending: LineEnding) {
        let manifest = ManifestLines::parse(bytes);
        assert_eq!(manifest.line_ending(), ending);
        assert_eq!(
            text(manifest.lines()),
            vec!["Manifest-Version: 1.0", "Created-By: 1.8"]
        );
        assert_eq!(manifest.render(), bytes);
    }

    #[rstest]
    #[case::lone_cr(b"Manifest-Version: 1.0\rCreated-By: 1.8\r")]
    #[case::mixed(b"Manifest-Version: 1.0\r\nCreated-By: 1.8\n")]
    #[case::no_final_terminator(b"Manifest-Version: 1.0\rCreated-By: 1.8")]
    fn every_terminator_ends_a_line(#[case] bytes: &[u8]) {
        let manifest = ManifestLines::parse(bytes);
        assert_eq!(
            text(manifest.lines()),
            vec!["Manifest-Version: 1.0", "Created-By: 1.8"]
        );
    }

    #[test]
    fn non_utf8_values_are_kept_byte_for_byte() {
        let manifest = ManifestLines::parse(b"Manifest-Version: 1.0\nImplementation-Vendor: Soci\xe9t\xe9\n");
        assert!(!manifest.declares_module_name());

        let patched = manifest.with_module_name(&name("vendor-lib"));

        assert_eq!(
            patched.render(),
            b"Manifest-Version: 1.0\nImplementation-Vendor: Soci\xe9t\xe9\nAutomatic-Module-Name: vendor-lib\n"
        );
    }

    #[test]
    fn control_bytes_count_as_blank() {
        let manifest = ManifestLines::parse(b"\x0bManifest-Version: 1.0\x0c\n\x00\n");
        assert_eq!(text(&manifest.normalised_lines()), vec!["Manifest-Version: 1.0"]);
    }
}
