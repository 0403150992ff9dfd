use crate::Node;

/// Append `class` to a whitespace separated class list.
/// Returns `None` when the class is already present (or empty).
pub fn add_class_token(list: &str, class: &str) -> Option<String> {
    let class = class.trim();
    if class.is_empty() || list.split_whitespace().any(|c| c == class) {
        return None;
    }
    let mut out = list.split_whitespace().collect::<Vec<_>>().join(" ");
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(class);
    Some(out)
}

/// Drop every occurrence of `class` from a class list.
/// Returns `None` when nothing was removed.
pub fn remove_class_token(list: &str, class: &str) -> Option<String> {
    if !list.split_whitespace().any(|c| c == class) {
        return None;
    }
    Some(
        list.split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub fn first_styles(style: &[(String, String)]) -> String {
    style
        .iter()
        .take(3)
        .map(|(k, v)| format!(r#"{k}: {v};"#))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                if let Some(dt) = doctype {
                    out.push(format!("{indent}<!DOCTYPE {dt}>"));
                } else {
                    out.push(format!("{indent}#document"));
                }
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Element {
                name,
                children,
                style,
                ..
            } => {
                let id = node.attr("id").unwrap_or("");
                let class = node.attr("class").unwrap_or("");
                let styl = first_styles(style);
                let mut line = format!("{indent}<{name}");
                if !id.is_empty() {
                    line.push_str(&format!(r#" id="{id}""#));
                }
                if !class.is_empty() {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                line.push('>');
                if !styl.is_empty() {
                    line.push_str(&format!("  /* {styl} */"));
                }
                out.push(line);
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Text { text, .. } => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = match t.char_indices().nth(40) {
                        Some((cut, _)) => format!("{}…", &t[..cut]),
                        None => t,
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            Node::Comment { text, .. } => {
                let t = text.replace('\n', " ");
                let show = match t.char_indices().nth(40) {
                    Some((cut, _)) => format!("{}…", &t[..cut]),
                    None => t,
                };
                out.push(format!("{indent}<!-- {show} -->"));
            }
        }
    }
    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
