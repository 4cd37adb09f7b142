//! Per-line depth and name extraction.

/// Middle branch glyph.
pub const MIDDLE_BRANCH: char = '├';
/// Last branch glyph.
pub const LAST_BRANCH: char = '└';
/// Horizontal fill glyph.
pub const HORIZONTAL: char = '─';

/// How a line was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Regular entry introduced by a branch glyph.
    Branch,
    /// Bare `.` or `./` root marker; emits no node.
    RootMarker,
    /// No branch glyph; placed at the top level.
    Unbranched,
    /// The `N directories, M files` report that `tree` prints last.
    Summary,
}

/// A non-blank line reduced to its nesting depth and display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedLine<'a> {
    /// Nesting depth, 0 for top-level entries.
    pub depth: usize,
    /// Name with tree-drawing decoration stripped.
    pub name: &'a str,
    /// How the line was recognized.
    pub kind: LineKind,
}

/// Decode one line of a tree listing.
///
/// Returns `None` for blank lines. The depth is the length of everything
/// before the rightmost branch glyph, with `│` counted as a blank column,
/// divided by `indent_width`.
pub fn decode_line(line: &str, indent_width: usize) -> Option<DecodedLine<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some(idx) = line.rfind([MIDDLE_BRANCH, LAST_BRANCH]) else {
        let kind = if trimmed == "." || trimmed == "./" {
            LineKind::RootMarker
        } else if is_tree_summary(trimmed) {
            LineKind::Summary
        } else {
            LineKind::Unbranched
        };
        return Some(DecodedLine {
            depth: 0,
            name: trimmed,
            kind,
        });
    };

    // Every char in the prefix is one column, `│` included.
    let columns = line[..idx].chars().count();
    let depth = columns / indent_width.max(1);

    let name = strip_branch(&line[idx..]);

    Some(DecodedLine {
        depth,
        name,
        kind: LineKind::Branch,
    })
}

/// Strip the branch glyph, the horizontal fill after it and surrounding
/// whitespace.
fn strip_branch(rest: &str) -> &str {
    rest.trim_start_matches([MIDDLE_BRANCH, LAST_BRANCH])
        .trim_start_matches(HORIZONTAL)
        .trim()
}

/// Match `tree`'s closing report: `1 directory`, `3 directories, 1 file`.
fn is_tree_summary(line: &str) -> bool {
    let mut parts = line.split(", ");
    let dirs_ok = parts
        .next()
        .is_some_and(|part| counts(part, &["directory", "directories"]));
    let files_ok = match parts.next() {
        Some(part) => counts(part, &["file", "files"]),
        None => true,
    };
    dirs_ok && files_ok && parts.next().is_none()
}

fn counts(part: &str, nouns: &[&str]) -> bool {
    part.split_once(' ').is_some_and(|(number, noun)| {
        !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) && nouns.contains(&noun)
    })
}
