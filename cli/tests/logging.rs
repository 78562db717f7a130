//! Log levels of per-archive outcomes.
//!
//! `logtest` installs a process-wide logger, so this file holds a single
//! test.

mod support;

use log::Level;
use logtest::Logger;
use scala_suffix_cli::cli::Cli;
use support::{Project, manifest_text};

#[test]
fn outcomes_are_logged_at_their_levels() {
    let mut logger = Logger::start();

    let mut project = Project::new();
    project.add_dependency("com.acme", "plain");
    project.write_jar("plain", &["Manifest-Version: 1.0"]);
    project.add_dependency("com.acme", "named");
    project.write_jar("named", &["Automatic-Module-Name: com.acme.named"]);
    project.add_dependency("com.acme", "gone");
    for library in ["plain", "named", "gone", "com.acme:unknown"] {
        project.add_library(library);
    }
    project.write_config();

    let summary = project.run(&Cli::default());
    assert_eq!(summary, "Patched 1, unchanged 1, failed 1\n");
    assert!(manifest_text(&project.jar_path("plain")).contains("Automatic-Module-Name: plain"));

    let mut records = Vec::new();
    while let Some(record) = logger.pop() {
        records.push((record.level(), record.args().to_string()));
    }
    let logged = |level: Level, needle: &str| {
        records
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    };

    assert!(
        logged(Level::Info, "added Automatic-Module-Name: plain"),
        "missing info record in {records:?}"
    );
    assert!(
        logged(Level::Debug, "named.jar already declares"),
        "missing debug record in {records:?}"
    );
    let missing_jar = project.jar_path("gone");
    assert!(
        logged(Level::Error, &format!("failed to patch {missing_jar}")),
        "missing error record in {records:?}"
    );
    assert!(
        logged(Level::Debug, "no dependency matches library \"com.acme:unknown\""),
        "missing skip record in {records:?}"
    );
}
