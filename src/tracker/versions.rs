//! Fix version selection
//!
//! Default fix versions are derived from the branches a PR was merged into,
//! matched against the project's unreleased mainline versions.

use crate::error::{Error, Result};
use crate::platform::RELEASE_BRANCH_PREFIX;
use crate::types::ProjectVersion;
use semver::Version;

/// Branch names that track the next feature release
const MAINLINE_BRANCHES: [&str; 2] = ["master", "main"];

fn parse_mainline(name: &str) -> Option<Version> {
    Version::parse(name)
        .ok()
        .filter(|v| v.pre.is_empty() && v.build.is_empty())
}

/// Unreleased mainline versions, newest first
pub fn unreleased_mainline(versions: &[ProjectVersion]) -> Vec<&ProjectVersion> {
    let mut unreleased: Vec<(Version, &ProjectVersion)> = versions
        .iter()
        .filter(|v| !v.released)
        .filter_map(|v| parse_mainline(&v.name).map(|parsed| (parsed, v)))
        .collect();
    unreleased.sort_by(|(a, _), (b, _)| b.cmp(a));
    unreleased.into_iter().map(|(_, v)| v).collect()
}

/// Pick the fix version for a merge into `branch`
///
/// `versions` must be sorted newest-first. Mainline branches get the newest
/// version; `branch-X` gets the oldest version whose name starts with `X`.
pub fn fix_version_from_branch<'a>(
    branch: &str,
    versions: &[&'a ProjectVersion],
) -> Option<&'a ProjectVersion> {
    if MAINLINE_BRANCHES.contains(&branch) {
        return versions.first().copied();
    }

    let prefix = branch.strip_prefix(RELEASE_BRANCH_PREFIX).unwrap_or(branch);
    versions
        .iter()
        .rev()
        .find(|v| v.name.starts_with(prefix))
        .copied()
}

/// Default fix version names for a PR merged into `merge_branches`
///
/// When both `X.Y.0` and `X.(Y-1).0` would be proposed, a release branch has
/// been forked but not yet released, so only the older one is kept.
pub fn default_fix_versions(merge_branches: &[String], versions: &[ProjectVersion]) -> Vec<String> {
    let candidates = unreleased_mainline(versions);

    let mut defaults: Vec<String> = Vec::new();
    for branch in merge_branches {
        match fix_version_from_branch(branch, &candidates) {
            Some(version) if !defaults.contains(&version.name) => {
                defaults.push(version.name.clone());
            }
            Some(_) => {}
            None => tracing::warn!(branch = %branch, "no unreleased version matches branch"),
        }
    }

    let proposed = defaults.clone();
    for name in &proposed {
        let Some(version) = parse_mainline(name) else {
            continue;
        };
        if version.patch != 0 || version.minor == 0 {
            continue;
        }
        let previous = format!("{}.{}.0", version.major, version.minor - 1);
        if defaults.contains(&previous) {
            defaults.retain(|v| v != name);
        }
    }

    defaults
}

/// Split operator input like `"0.11.0, JS-0.4.0"` into version names
pub fn parse_fix_versions(input: &str) -> Vec<String> {
    input
        .replace(' ', "")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Resolve version names against every project version, released or not
pub fn lookup_versions(names: &[String], versions: &[ProjectVersion]) -> Result<Vec<ProjectVersion>> {
    names
        .iter()
        .map(|name| {
            versions
                .iter()
                .find(|v| &v.name == name)
                .cloned()
                .ok_or_else(|| Error::UnknownFixVersion(name.clone()))
        })
        .collect()
}
