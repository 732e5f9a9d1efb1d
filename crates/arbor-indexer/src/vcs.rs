//! Best-effort version-control metadata lookup

use std::path::Path;
use std::process::Command;

/// Current git HEAD revision of the project, if the root is inside a
/// repository and git is available.
pub fn head_revision(root: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!revision.is_empty()).then_some(revision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_repo_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(head_revision(dir.path()), None);
    }
}
