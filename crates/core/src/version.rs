//! Snapshot version compatibility.
//!
//! A snapshot is compatible with the running code when the `major.minor` of
//! its version tag matches. Patch releases never change the snapshot shape.

/// Parse the `major.minor` pair of a version string such as `"1.4.2"`.
///
/// Pre-release and build suffixes on the patch component are ignored.
pub fn major_minor(version: &str) -> Option<(u64, u64)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// Whether a snapshot tagged `candidate` may be loaded by code at `running`.
pub fn is_compatible(candidate: &str, running: &str) -> bool {
    match (major_minor(candidate), major_minor(running)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
