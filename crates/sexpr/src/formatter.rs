//! KiCad-style layout for S-expression trees.
//!
//! Lists containing only atoms, and point lists made only of `(xy ..)` entries, stay on one
//! line. Any other list puts its leading atoms on the opening line and each following child on
//! its own tab-indented line, with the closing parenthesis aligned to the opening one.

use crate::Sexpr;

const INDENT_CHAR: char = '\t';

pub fn format_tree(expr: &Sexpr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out.push('\n');
    out
}

fn write_expr(out: &mut String, expr: &Sexpr, depth: usize) {
    let items = match expr {
        Sexpr::List(items) if !is_single_line(items) => items,
        _ => {
            out.push_str(&expr.to_string());
            return
        },
    };

    out.push('(');

    let head_len = items.iter()
        .take_while(|item| !item.is_list())
        .count();

    for (index, item) in items[..head_len].iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        out.push_str(&item.to_string());
    }

    for item in items[head_len..].iter() {
        out.push('\n');
        push_indent(out, depth + 1);
        write_expr(out, item, depth + 1);
    }

    out.push('\n');
    push_indent(out, depth);
    out.push(')');
}

fn is_single_line(items: &[Sexpr]) -> bool {
    let mut child_lists = items.iter().filter(|item| item.is_list()).peekable();

    if child_lists.peek().is_none() {
        return true
    }

    child_lists.all(|child| child.is_tagged("xy"))
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(INDENT_CHAR);
    }
}
