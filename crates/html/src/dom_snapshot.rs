use crate::Node;
use std::fmt;

/// Deterministic DOM serialization for tests.
/// Not a public stable format; intended for internal test comparisons.
///
/// Rules:
/// - One line per node, two spaces of indent per depth.
/// - Attribute order is significant and rendered as written.
/// - Inline style is rendered after attributes when non-empty.
/// - Whitespace-only text nodes are skipped.
/// - IDs are rendered only when `include_ids` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSnapshotOptions {
    pub include_ids: bool,
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let id = if options.include_ids {
        format!(" #{}", node.id().0)
    } else {
        String::new()
    };
    match node {
        Node::Document { doctype, .. } => match doctype {
            Some(dt) => out.push(format!("{indent}#document{id} <!DOCTYPE {dt}>")),
            None => out.push(format!("{indent}#document{id}")),
        },
        Node::Element {
            name,
            attributes,
            style,
            ..
        } => {
            let mut line = format!("{indent}<{name}");
            for (k, v) in attributes {
                match v {
                    Some(v) => line.push_str(&format!(r#" {k}="{v}""#)),
                    None => line.push_str(&format!(" {k}")),
                }
            }
            if !style.is_empty() {
                let decls = style
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                line.push_str(&format!(" [style: {decls}]"));
            }
            line.push('>');
            line.push_str(&id);
            out.push(line);
        }
        Node::Text { text, .. } => {
            if text.trim().is_empty() {
                return;
            }
            out.push(format!("{indent}\"{}\"{id}", text.escape_debug()));
        }
        Node::Comment { text, .. } => out.push(format!("{indent}<!-- {text} -->{id}")),
    }
    for child in node.children() {
        walk_snapshot(child, options, depth + 1, out);
    }
}

/// Panic with both renderings when the snapshot of `actual` differs from `expected`.
pub fn assert_snapshot(actual: &Node, expected: &str) {
    let snapshot = DomSnapshot::new(actual, DomSnapshotOptions::default()).render();
    let expected = expected
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>();
    let min_indent = expected
        .iter()
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let expected = expected
        .iter()
        .map(|l| &l[min_indent..])
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        snapshot == expected,
        "DOM snapshot mismatch\nexpected:\n{expected}\nactual:\n{snapshot}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::build::{doc, elem, text};

    #[test]
    fn renders_attributes_in_order() {
        let root = doc(vec![elem(
            "div",
            &[("class", "a"), ("id", "x")],
            vec![text("  "), text("hello")],
        )]);
        assert_snapshot(
            &root,
            r#"
            #document
              <div class="a" id="x">
                "hello"
            "#,
        );
    }

    #[test]
    fn ids_are_opt_in() {
        let root = doc(vec![]);
        let snap = DomSnapshot::new(&root, DomSnapshotOptions { include_ids: true });
        assert_eq!(snap.as_lines(), &["#document #0".to_string()]);
    }
}
