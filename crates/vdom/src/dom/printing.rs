use core::fmt;

use super::{Dom, DomNode, NodeKind, Pairs};
use indextree::NodeId;

use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn sorted(pairs: &Pairs) -> Vec<(&str, &str)> {
    let mut out: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    out.sort_by(|left, right| left.0.cmp(right.0));
    out
}

fn pairs_to_json(pairs: &Pairs) -> Value {
    let mut obj = Map::new();
    for (key, value) in sorted(pairs) {
        obj.insert(key.to_owned(), Value::String(value.to_owned()));
    }
    Value::Object(obj)
}

fn style_declarations(styles: &Pairs) -> String {
    sorted(styles)
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn escape(text: &str, quote: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn node_to_json(dom: &Dom, id: NodeId) -> Value {
    let Some(DomNode {
        kind,
        attrs,
        styles,
    }) = dom.node(id)
    else {
        return Value::Null;
    };
    let children: Vec<Value> = dom
        .children(id)
        .into_iter()
        .map(|child| node_to_json(dom, child))
        .collect();
    match kind {
        NodeKind::Document => json!({ "type": "document", "children": children }),
        NodeKind::Element { tag } => json!({
            "type": "element",
            "tag": tag,
            "attrs": pairs_to_json(attrs),
            "style": pairs_to_json(styles),
            "children": children
        }),
        NodeKind::Text { text } => json!({ "type": "text", "text": text }),
    }
}

fn write_html(dom: &Dom, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(DomNode {
        kind,
        attrs,
        styles,
    }) = dom.node(id)
    else {
        return Ok(());
    };
    match kind {
        NodeKind::Document => write_children_html(dom, id, f),
        NodeKind::Element { tag } => {
            write!(f, "<{tag}")?;
            for (key, value) in sorted(attrs) {
                write!(f, " {key}=\"{}\"", escape(value, true))?;
            }
            if !styles.is_empty() {
                write!(f, " style=\"{}\"", escape(&style_declarations(styles), true))?;
            }
            f.write_str(">")?;
            write_children_html(dom, id, f)?;
            write!(f, "</{tag}>")
        }
        NodeKind::Text { text } => f.write_str(&escape(text, false)),
    }
}

fn write_children_html(dom: &Dom, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for child in dom.children(id) {
        write_html(dom, child, f)?;
    }
    Ok(())
}

/// HTML view of one subtree, or of its children only.
struct Html<'dom> {
    dom: &'dom Dom,
    id: NodeId,
    children_only: bool,
}

impl fmt::Display for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children_only {
            write_children_html(self.dom, self.id, f)
        } else {
            write_html(self.dom, self.id, f)
        }
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            Ok(())
        }

        fn fmt_node(dom: &Dom, id: NodeId, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            let Some(DomNode {
                kind,
                attrs,
                styles,
            }) = dom.node(id)
            else {
                return Ok(());
            };
            write_indent(f, depth)?;
            match kind {
                NodeKind::Document => writeln!(f, "#document")?,
                NodeKind::Element { tag } => {
                    write!(f, "<{tag}")?;
                    for (key, value) in sorted(attrs) {
                        write!(f, " {key}=\"{}\"", value.escape_debug())?;
                    }
                    if !styles.is_empty() {
                        write!(f, " style=\"{}\"", style_declarations(styles).escape_debug())?;
                    }
                    writeln!(f, "> {id:?}")?;
                }
                NodeKind::Text { text } => writeln!(f, "\"{}\" {id:?}", text.escape_debug())?,
            }
            for child in dom.children(id) {
                fmt_node(dom, child, f, depth + 1)?;
            }
            Ok(())
        }

        writeln!(f, "DOM")?;
        fmt_node(self, self.root, f, 0)
    }
}

impl Dom {
    /// Build a deterministic JSON representation of the subtree at `id`.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "style": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self, id: NodeId) -> Value {
        node_to_json(self, id)
    }

    /// Pretty JSON string of the whole document for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        format!("{:#}", self.to_json_value(self.root))
    }

    /// HTML serialization of `id` itself, attributes sorted and styles folded
    /// into a `style` attribute.
    pub fn outer_html(&self, id: NodeId) -> String {
        Html {
            dom: self,
            id,
            children_only: false,
        }
        .to_string()
    }

    /// HTML serialization of the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        Html {
            dom: self,
            id,
            children_only: true,
        }
        .to_string()
    }
}
