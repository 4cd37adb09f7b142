//! Tree-text parser.

use std::time::Instant;

use compact_str::CompactString;

use tunetree_core::{
    ExtensionTier, MusicNode, MusicTree, ParseConfig, ParseWarning, TreeStats,
    recognized_extension,
};

use crate::line::{DecodedLine, LineKind, decode_line};

/// Converts an indented tree listing into a rooted node hierarchy.
///
/// Parsing never fails. Lines it cannot make sense of are placed at the top
/// level or skipped, and reported as [`ParseWarning`]s.
#[derive(Debug, Clone, Default)]
pub struct TreeTextParser {
    config: ParseConfig,
}

/// A decoded line together with its lookahead flag.
struct Entry<'a> {
    line: DecodedLine<'a>,
    has_children: bool,
}

/// An open folder on the assembly stack.
struct Open {
    node: MusicNode,
    /// Listing depth of the folder; `None` for the synthetic root.
    depth: Option<usize>,
}

impl TreeTextParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Get the parser configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse `text` and return the synthetic root.
    pub fn parse(&self, text: &str) -> MusicNode {
        self.assemble(text).0
    }

    /// Parse `text` into a tree with statistics and warnings.
    pub fn parse_tree(&self, text: &str) -> MusicTree {
        let start = Instant::now();
        let (root, stats, warnings) = self.assemble(text);
        let elapsed = start.elapsed();

        tracing::info!(
            files = stats.total_files,
            folders = stats.total_folders,
            audio = stats.audio_files,
            warnings = warnings.len(),
            "Parsed collection in {:.2}ms",
            elapsed.as_secs_f64() * 1000.0
        );

        MusicTree::new(root, stats, elapsed, warnings)
    }

    fn assemble(&self, text: &str) -> (MusicNode, TreeStats, Vec<ParseWarning>) {
        let mut warnings = Vec::new();
        let entries = self.decode(text, &mut warnings);
        tracing::debug!("Decoded {} lines", entries.len());

        let mut stats = TreeStats::new();
        let mut stack = vec![Open {
            node: MusicNode::root(self.config.root_label.as_str()),
            depth: None,
        }];

        for entry in entries {
            if entry.line.kind == LineKind::RootMarker {
                continue;
            }
            let depth = entry.line.depth;

            // Close every open folder at the same depth or deeper.
            while stack
                .last()
                .is_some_and(|open| open.depth.is_some_and(|d| d >= depth))
            {
                close_top(&mut stack);
            }

            // Nesting below the root, which may be shallower than `depth`
            // when the listing skips levels.
            let tree_depth = (stack.len() - 1) as u32;
            let Some(parent) = stack.last() else {
                break;
            };
            let name = entry.line.name;
            let path = parent.node.child_path(name);

            match classify(name, entry.has_children) {
                Some((ext, tier)) => {
                    stats.record_file(tier == ExtensionTier::Audio, tree_depth);
                    let file = MusicNode::new_file(name, Some(CompactString::from(ext)), path);
                    if let Some(parent) = stack.last_mut() {
                        parent.node.push_child(file);
                    }
                }
                None => {
                    stats.record_folder(tree_depth);
                    stack.push(Open {
                        node: MusicNode::new_folder(name, path),
                        depth: Some(depth),
                    });
                }
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        let root = stack
            .pop()
            .map(|open| open.node)
            .unwrap_or_else(|| MusicNode::root(self.config.root_label.as_str()));

        (root, stats, warnings)
    }

    /// Decode every non-blank line and compute the lookahead flag.
    fn decode<'a>(&self, text: &'a str, warnings: &mut Vec<ParseWarning>) -> Vec<Entry<'a>> {
        let mut decoded: Vec<DecodedLine<'a>> = Vec::new();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (idx, raw) in text.split('\n').enumerate() {
            let line_no = idx + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let Some(line) = decode_line(raw, self.config.indent_width) else {
                continue;
            };

            match line.kind {
                LineKind::Branch if line.name.is_empty() => {
                    tracing::debug!(line = line_no, "Skipping branch with no name");
                    warnings.push(ParseWarning::empty_name(line_no));
                    continue;
                }
                LineKind::Unbranched => {
                    tracing::debug!(line = line_no, name = line.name, "Line has no branch glyph");
                    warnings.push(ParseWarning::no_branch_glyph(line_no, line.name));
                }
                LineKind::Summary => {
                    tracing::debug!(line = line_no, name = line.name, "Line looks like a tree summary");
                    warnings.push(ParseWarning::summary_line(line_no, line.name));
                    if self.config.skip_summary {
                        continue;
                    }
                }
                _ => {}
            }

            decoded.push(line);
        }

        let next_depths: Vec<Option<usize>> = decoded
            .iter()
            .skip(1)
            .map(|line| Some(line.depth))
            .chain(std::iter::once(None))
            .collect();

        decoded
            .into_iter()
            .zip(next_depths)
            .map(|(line, next)| Entry {
                line,
                has_children: next.is_some_and(|d| d > line.depth),
            })
            .collect()
    }
}

/// Classify an entry: `Some` with its extension for files, `None` for folders.
///
/// Anything flagged as having children is a folder. Otherwise only a
/// recognized extension makes a file; an unrecognized suffix stays a folder.
fn classify(name: &str, has_children: bool) -> Option<(String, ExtensionTier)> {
    if has_children {
        return None;
    }
    recognized_extension(name)
}

/// Pop the innermost open folder and attach it to its parent.
fn close_top(stack: &mut Vec<Open>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(open) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.node.push_child(open.node);
        }
    }
}

/// Parse `text` with the default configuration.
pub fn parse(text: &str) -> MusicNode {
    TreeTextParser::new().parse(text)
}
