//! Fixed error-tree-to-text rendering for the throwing operations (§4.6.1,
//! C8). Not pluggable: there is exactly one renderer, used only here.

use contour_core::diagnostic::ParseError;
use contour_core::value::Key;

/// Renders every leaf diagnostic in `errors` as one `path: message` line,
/// joined with newlines.
#[must_use]
pub fn render(errors: &[ParseError]) -> String {
    let mut lines = Vec::new();
    for err in errors {
        walk(err, &mut Vec::new(), &mut lines);
    }
    lines.join("\n")
}

enum Segment {
    Index(usize),
    Key(Key),
    Member,
}

fn walk(err: &ParseError, path: &mut Vec<Segment>, out: &mut Vec<String>) {
    match err {
        ParseError::Index(i, children) => {
            path.push(Segment::Index(*i));
            for c in children {
                walk(c, path, out);
            }
            path.pop();
        }
        ParseError::Key(k, children) => {
            path.push(Segment::Key(k.clone()));
            for c in children {
                walk(c, path, out);
            }
            path.pop();
        }
        ParseError::Member(children) => {
            path.push(Segment::Member);
            for c in children {
                walk(c, path, out);
            }
            path.pop();
        }
        leaf => out.push(format!("{}: {}", render_path(path), render_leaf(leaf))),
    }
}

fn render_path(path: &[Segment]) -> String {
    if path.is_empty() {
        return "(root)".to_owned();
    }
    let mut s = String::new();
    for seg in path {
        match seg {
            Segment::Index(i) => s.push_str(&format!("[{i}]")),
            Segment::Key(k) => {
                if !s.is_empty() {
                    s.push('.');
                }
                s.push_str(&k.to_string());
            }
            Segment::Member => s.push_str(" (union member)"),
        }
    }
    s
}

fn render_leaf(err: &ParseError) -> String {
    match err {
        ParseError::Type(ast, value) => format!("expected {}, got {}", ast.kind_name(), value),
        ParseError::Missing => "missing required value".to_owned(),
        ParseError::Unexpected(value) => format!("unexpected value: {value}"),
        ParseError::Equal(expected, actual) => format!("expected {expected}, got {actual}"),
        ParseError::Transform(from, to, value) => {
            format!("could not convert {} to {}: {value}", from.kind_name(), to.kind_name())
        }
        ParseError::Index(..) | ParseError::Key(..) | ParseError::Member(_) => {
            unreachable!("render_leaf called on a path-wrapping error")
        }
    }
}
