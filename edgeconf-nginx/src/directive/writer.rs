//! Text rendering for directive trees

use super::Directive;

const INDENT: &str = "  ";

/// Render directives as nginx configuration text.
///
/// Top-level directives are separated by newlines; each nesting level is
/// indented by two spaces. Arguments are written as given, so callers quote
/// values themselves.
pub fn stringify(directives: &[Directive]) -> String {
    let mut out = String::new();
    write_directives(&mut out, directives, 0);
    out
}

fn write_directives(out: &mut String, directives: &[Directive], depth: usize) {
    for (i, directive) in directives.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_directive(out, directive, depth);
    }
}

fn write_directive(out: &mut String, directive: &Directive, depth: usize) {
    indent(out, depth);
    for (i, token) in directive.tokens().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(token);
    }

    match &directive.block {
        Some(block) => {
            out.push_str(" {\n");
            if !block.directives.is_empty() {
                write_directives(out, &block.directives, depth + 1);
                out.push('\n');
            }
            indent(out, depth);
            out.push('}');
        }
        None => out.push(';'),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
