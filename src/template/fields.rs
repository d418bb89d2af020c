//! Finds the fields a template reads from its root value.
//!
//! Only runs on text `gtmpl` has already parsed, so actions are known to be
//! well formed.

/// Returns `(line, name)` for every `.Name` and `$.Name` in an action.
///
/// Trailing segments of a chain (`.IP.Host`) and fields of variables
/// (`$x.Name`) are not included.
pub(crate) fn root_fields(text: &str) -> Vec<(usize, String)> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();
    let mut line = 1;
    let mut in_action = false;
    // The two characters before `i` within the current action.
    let mut prev = [' ', ' '];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if !in_action {
            if c == '\n' {
                line += 1;
            }
            if c == '{' && next == Some('{') {
                in_action = true;
                prev = [' ', ' '];
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }

        match c {
            '}' if next == Some('}') => {
                in_action = false;
                i += 2;
                continue;
            }
            '"' | '`' | '\'' => {
                i = skip_quoted(&chars, i, &mut line);
                prev = [prev[1], c];
                continue;
            }
            '/' if next == Some('*') => {
                i = skip_comment(&chars, i, &mut line);
                continue;
            }
            '.' if starts_root_field(prev) && next.is_some_and(is_ident_start) => {
                let start = i + 1;
                let end = start + chars[start..].iter().take_while(|c| is_ident(**c)).count();
                found.push((line, chars[start..end].iter().collect()));
                prev = [prev[1], chars[end - 1]];
                i = end;
                continue;
            }
            '\n' => line += 1,
            _ => {}
        }

        prev = [prev[1], c];
        i += 1;
    }

    found
}

fn starts_root_field(prev: [char; 2]) -> bool {
    is_delimiter(prev[1]) || (prev[1] == '$' && is_delimiter(prev[0]))
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | '|' | '=' | ',')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns the index just past the closing quote of the literal at `start`.
fn skip_quoted(chars: &[char], start: usize, line: &mut usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if quote != '`' => i += 1,
            '\n' => *line += 1,
            c if c == quote => return i + 1,
            _ => {}
        }
        i += 1;
    }
    i
}

fn skip_comment(chars: &[char], start: usize, line: &mut usize) -> usize {
    let mut i = start + 2;
    while i < chars.len() {
        if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
            return i + 2;
        }
        if chars[i] == '\n' {
            *line += 1;
        }
        i += 1;
    }
    i
}
