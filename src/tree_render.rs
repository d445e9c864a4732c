//! ASCII tree rendering for project trees.

use crate::models::MbirdNode;

const STALE: char = '○';
const FRESH: char = '●';

fn stale_symbol(node: &MbirdNode) -> char {
    if node.is_stale() {
        STALE
    } else {
        FRESH
    }
}

/// Render a project tree as ASCII art with freshness symbols.
///
/// Example output:
/// ```text
/// ○ root
/// ├── ● intro
/// └── ○ chapters
///     ├── ○ one
///     └── ● two
/// ```
pub fn render_tree(root: &MbirdNode) -> String {
    let mut output = String::new();
    render_node(&mut output, root, "", true, true);
    output
}

fn render_node(output: &mut String, node: &MbirdNode, prefix: &str, is_last: bool, is_root: bool) {
    if !is_root {
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
    }
    output.push(stale_symbol(node));
    output.push(' ');
    output.push_str(node.id());
    output.push('\n');

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let child_is_last = i == children.len() - 1;
        render_node(output, child, &child_prefix, child_is_last, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, is_stale: bool, children: Vec<MbirdNode>) -> MbirdNode {
        MbirdNode::with_children(id, children).unwrap().stale(is_stale)
    }

    #[test]
    fn test_single_root() {
        let output = render_tree(&MbirdNode::new("root"));
        assert_eq!(output, "○ root\n");
    }

    #[test]
    fn test_with_children() {
        let tree = node(
            "root",
            true,
            vec![node("intro", false, vec![]), node("outro", true, vec![])],
        );
        assert_eq!(render_tree(&tree), "○ root\n├── ● intro\n└── ○ outro\n");
    }

    #[test]
    fn test_nested_children() {
        let tree = node(
            "root",
            false,
            vec![
                node("intro", false, vec![]),
                node(
                    "chapters",
                    true,
                    vec![node("one", true, vec![]), node("two", false, vec![])],
                ),
                node("outro", true, vec![]),
            ],
        );
        let expected = "● root\n├── ● intro\n├── ○ chapters\n│   ├── ○ one\n│   └── ● two\n└── ○ outro\n";
        assert_eq!(render_tree(&tree), expected);
    }
}
