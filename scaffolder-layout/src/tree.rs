use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::anychar,
    combinator::{peek, recognize},
    error::VerboseError,
    multi::many_till,
    sequence::terminated,
    IResult,
};

use crate::LayoutEntry;

type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// Box-drawing glyphs that may appear in the indentation of a diagram
const BOX_CHARS: &str = "│├└─";

/// A line of a tree diagram, before nesting is resolved into paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem<'t> {
    /// Indentation level, half the number of columns before the connector
    pub depth: usize,
    /// The entry's own name, without any trailing `/`
    pub name: &'t str,
    /// Whether the line ended in `/`
    pub is_directory: bool,
}

/// Parses a tree diagram into layout entries
///
/// This never fails. When no line yields an entry (for instance, only a root label was given),
/// every non-empty line is taken as a top level entry instead.
pub fn parse_tree(text: &str) -> Vec<LayoutEntry> {
    let items = parse_tree_items(text);
    if items.is_empty() {
        tracing::debug!("No tree entries found, treating each line as a top level entry");
        return collapse(&flat_items(text));
    }
    collapse(&items)
}

/// Parses each line of a tree diagram, skipping blank lines and a leading root label
pub fn parse_tree_items(text: &str) -> Vec<TreeItem<'_>> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();
    let skip = match lines.first() {
        Some(first) if first.trim().ends_with('/') => 1,
        _ => 0,
    };
    lines[skip..].iter().copied().filter_map(parse_line).collect()
}

fn flat_items(text: &str) -> Vec<TreeItem<'_>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (name, is_directory) = split_directory(line);
            TreeItem {
                depth: 0,
                name,
                is_directory,
            }
        })
        .filter(|item| !item.name.is_empty())
        .collect()
}

/// Resolves depths into full relative paths using a stack of ancestor directory names
pub fn collapse(items: &[TreeItem]) -> Vec<LayoutEntry> {
    let mut stack: Vec<&str> = Vec::new();
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        stack.truncate(item.depth);
        if item.is_directory {
            if stack.len() == item.depth || stack.is_empty() {
                stack.push(item.name);
            } else if let Some(top) = stack.last_mut() {
                // Deeper than its parent implies; take the place of the last directory
                *top = item.name;
            }
            entries.push(LayoutEntry::directory(stack.join("/")));
        } else {
            let mut path = stack.join("/");
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(item.name);
            entries.push(LayoutEntry::file(path, None));
        }
    }
    entries
}

fn parse_line(line: &str) -> Option<TreeItem<'_>> {
    let (prefix, name) = match branch(line) {
        Ok((name, prefix)) => (prefix, name),
        Err(_) => {
            // No connector, so indentation is the leading whitespace and glyphs alone
            let (_, prefix) = indentation(line).ok()?;
            let (name, _) = clutter(line).ok()?;
            (prefix, name)
        }
    };
    let (name, is_directory) = split_directory(name.trim());
    if name.is_empty() {
        return None;
    }
    Some(TreeItem {
        depth: prefix.chars().count() / 2,
        name,
        is_directory,
    })
}

fn split_directory(name: &str) -> (&str, bool) {
    match name.strip_suffix('/') {
        Some(name) => (name.trim_end_matches('/'), true),
        None => (name, false),
    }
}

/// The branch marker: two glyphs followed by a space
fn connector(s: &str) -> Res<&str, &str> {
    alt((tag("├─ "), tag("└─ ")))(s)
}

/// Everything up to and including the first connector, returning the text before it
fn branch(s: &str) -> Res<&str, &str> {
    terminated(recognize(many_till(anychar, peek(connector))), connector)(s)
}

fn indentation(s: &str) -> Res<&str, &str> {
    take_while(|c: char| c.is_whitespace() || BOX_CHARS.contains(c))(s)
}

/// Leading whitespace, glyphs and list dashes
fn clutter(s: &str) -> Res<&str, &str> {
    take_while(|c: char| c.is_whitespace() || c == '-' || BOX_CHARS.contains(c))(s)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn item(depth: usize, name: &str, is_directory: bool) -> TreeItem<'_> {
        TreeItem {
            depth,
            name,
            is_directory,
        }
    }

    #[test]
    fn connector_depths() {
        let items = parse_tree_items(indoc! {"
            app/
            ├─ README.md
            └─ src/
              ├─ main.py
              └─ lib/
                └─ util.py
        "});
        assert_eq!(
            items,
            vec![
                item(0, "README.md", false),
                item(0, "src", true),
                item(1, "main.py", false),
                item(1, "lib", true),
                item(2, "util.py", false),
            ]
        );
    }

    #[test]
    fn vertical_glyphs_count_as_indentation() {
        let items = parse_tree_items(indoc! {"
            root/
            ├─ a/
            │ ├─ b.txt
            │ └─ c/
            │   └─ d.txt
            └─ e.txt
        "});
        assert_eq!(
            items,
            vec![
                item(0, "a", true),
                item(1, "b.txt", false),
                item(1, "c", true),
                item(2, "d.txt", false),
                item(0, "e.txt", false),
            ]
        );
    }

    #[test]
    fn indentation_without_connectors() {
        let items = parse_tree_items(indoc! {"
            project/
            docs/
              index.md
            - notes.txt
        "});
        assert_eq!(
            items,
            vec![
                item(0, "docs", true),
                item(1, "index.md", false),
                item(0, "notes.txt", false),
            ]
        );
    }

    #[test]
    fn three_column_prefix_halves_down() {
        let items = parse_tree_items("app/\n└─ src/\n   └─ main.py");
        assert_eq!(items, vec![item(0, "src", true), item(1, "main.py", false)]);
    }

    #[test]
    fn bare_continuation_lines_ignored() {
        let items = parse_tree_items("app/\n├─ a/\n│\n└─ b");
        assert_eq!(items, vec![item(0, "a", true), item(0, "b", false)]);
    }

    #[test]
    fn collapse_nesting() {
        let entries = collapse(&[
            item(0, "src", true),
            item(1, "main.rs", false),
            item(1, "bin", true),
            item(2, "tool.rs", false),
            item(0, "Cargo.toml", false),
        ]);
        assert_eq!(
            entries,
            vec![
                LayoutEntry::directory("src"),
                LayoutEntry::file("src/main.rs", None),
                LayoutEntry::directory("src/bin"),
                LayoutEntry::file("src/bin/tool.rs", None),
                LayoutEntry::file("Cargo.toml", None),
            ]
        );
    }

    #[test]
    fn collapse_depth_jump_replaces_top() {
        let entries = collapse(&[
            item(0, "a", true),
            item(2, "b", true),
            item(3, "c.txt", false),
        ]);
        assert_eq!(
            entries,
            vec![
                LayoutEntry::directory("a"),
                LayoutEntry::directory("b"),
                LayoutEntry::file("b/c.txt", None),
            ]
        );
    }

    #[test]
    fn collapse_orphan_directory_at_depth() {
        let entries = collapse(&[item(1, "deep", true), item(2, "file", false)]);
        assert_eq!(
            entries,
            vec![
                LayoutEntry::directory("deep"),
                LayoutEntry::file("deep/file", None),
            ]
        );
    }

    #[test]
    fn root_label_only_falls_back_to_lines() {
        assert_eq!(parse_tree("my-app/"), vec![LayoutEntry::directory("my-app")]);
    }

    #[test]
    fn empty_text() {
        assert!(parse_tree("").is_empty());
        assert!(parse_tree("\n  \n").is_empty());
    }
}
