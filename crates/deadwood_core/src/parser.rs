use log::trace;

/// Lines a multi-line declaration may span before the scan gives up on it
const MAX_CONTINUATION_LINES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Import,
    ReExport,
}

/// Extracts the module specifiers of the import declarations in `source`.
///
/// This is a line scan, not a parser: a declaration starts on a line beginning
/// with `import` (or `export {`/`export *` when `follow_reexports` is set) and
/// runs until the first line holding a quoted string. The first quoted string
/// accepted by `is_local` is the declaration's specifier; bare package names
/// are expected to be rejected by it. `import(...)` and `import.meta` are not
/// declarations and are skipped.
pub fn scan_imports<F>(source: &str, follow_reexports: bool, is_local: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut specs = Vec::new();
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        let Some(kind) = declaration_kind(line, follow_reexports) else {
            continue;
        };

        let mut statement = line.to_string();
        let mut continued = 0;
        while !has_quote(&statement)
            && !statement.contains(';')
            && continued < MAX_CONTINUATION_LINES
        {
            let Some(next) = lines.next() else { break };
            statement.push('\n');
            statement.push_str(next);
            continued += 1;
        }

        if kind == DeclKind::ReExport && !statement.contains("from") {
            continue;
        }

        if let Some(spec) = quoted_strings(&statement).into_iter().find(|s| is_local(s)) {
            trace!("Found {:?} specifier: '{}'", kind, spec);
            specs.push(spec);
        }
    }

    specs
}

fn declaration_kind(line: &str, follow_reexports: bool) -> Option<DeclKind> {
    let t = line.trim_start();
    if let Some(rest) = t.strip_prefix("import")
        && rest.starts_with(|c: char| c.is_whitespace() || matches!(c, '{' | '*' | '"' | '\''))
    {
        return Some(DeclKind::Import);
    }

    if follow_reexports && let Some(rest) = t.strip_prefix("export") {
        let rest = rest.trim_start();
        let rest = rest.strip_prefix("type ").map(str::trim_start).unwrap_or(rest);
        if rest.starts_with('{') || rest.starts_with('*') {
            return Some(DeclKind::ReExport);
        }
    }

    None
}

fn has_quote(text: &str) -> bool {
    text.contains(['"', '\''])
}

/// String literal contents in order of appearance, up to a `//` comment
fn quoted_strings(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                let mut literal = String::new();
                let mut closed = false;
                while let Some(n) = chars.next() {
                    if n == '\\' {
                        if let Some(escaped) = chars.next() {
                            literal.push(escaped);
                        }
                    } else if n == c {
                        closed = true;
                        break;
                    } else {
                        literal.push(n);
                    }
                }
                if closed && c != '`' {
                    out.push(literal);
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                // line comment: skip to the end of the line
                for n in chars.by_ref() {
                    if n == '\n' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}
