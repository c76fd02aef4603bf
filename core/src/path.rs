//! Path normalization for the VFS.
//!
//! Every path-taking store operation funnels through [`normalize`] so that
//! `cd`, `ls`, and friends agree on what a user-supplied path means.

/// Resolve `raw` against `current_dir` into an absolute normalized path.
///
/// Relative paths are joined onto `current_dir`; `.` and empty segments are
/// discarded; `..` pops the previous segment and silently clamps at root,
/// so `normalize("../..", "/a")` is `"/"` rather than an error. Returns
/// `"/"` when no segments remain. Pure function of its two inputs.
#[must_use]
pub fn normalize(raw: &str, current_dir: &str) -> String {
    let combined = if raw.starts_with('/') {
        raw.to_string()
    } else if current_dir == "/" {
        format!("/{raw}")
    } else {
        format!("{current_dir}/{raw}")
    };

    let mut parts: Vec<&str> = Vec::new();
    for part in combined.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Parent of an absolute normalized path; `"/"` for top-level entries.
#[must_use]
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}
