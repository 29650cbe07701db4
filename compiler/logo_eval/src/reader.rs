//! Logo reader: turns a line of source text into a list value.
//!
//! - Words break at whitespace, brackets, braces, parentheses and the
//!   infix operators `+ - * / = < > <= >= <>`.
//! - A word starting with `"` is quoted: operators do not break it.
//! - `[ ... ]` reads a list, `{ ... }` an array, optionally followed by
//!   `@origin`.
//! - `|...|` reads characters literally; `\` escapes the next character.
//! - `;` starts a comment running to the end of the line.
//! - A `~` ending a line joins it with the next.
//! - A `-` directly before a digit, at the start of a word, reads as a
//!   negative number rather than the subtraction operator.

use logo_value::{parse_number, unexpected_bracket, Constants, Handle, Unwind};

/// Read one logical line into a list of tokens.
///
/// Unclosed brackets are closed at the end of the text; use
/// [`needs_continuation`] first to ask for more input instead.
pub fn read_line(constants: &Constants, text: &str) -> Result<Handle, Unwind> {
    Ok(scan(constants, text)?.list)
}

/// Does `text` end inside a bracket, a bar-quoted word, or after `~`?
pub fn needs_continuation(text: &str) -> bool {
    let constants = Constants::new();
    match scan(&constants, text) {
        Ok(scan) => scan.open_groups > 0 || scan.open_bar || scan.trailing_tilde,
        Err(_) => false,
    }
}

struct Scan {
    list: Handle,
    open_groups: usize,
    open_bar: bool,
    trailing_tilde: bool,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum GroupKind {
    Top,
    List,
    Array,
}

struct Group {
    kind: GroupKind,
    items: Vec<Handle>,
}

#[derive(Default)]
struct WordBuf {
    text: String,
    active: bool,
    quoted: bool,
}

impl WordBuf {
    fn push(&mut self, c: char) {
        if !self.active && c == '"' {
            self.quoted = true;
        }
        self.active = true;
        self.text.push(c);
    }

    fn start(&mut self) {
        self.active = true;
    }

    /// `1e` followed by a sign continues the exponent.
    fn is_exponent_prefix(&self) -> bool {
        !self.quoted
            && self.text.len() > 1
            && self.text.ends_with(['e', 'E'])
            && parse_number(&self.text[..self.text.len() - 1]).is_some()
    }

    fn take(&mut self) -> Option<Handle> {
        if !self.active {
            return None;
        }
        let word = Handle::word(std::mem::take(&mut self.text));
        self.active = false;
        self.quoted = false;
        Some(word)
    }
}

struct Scanner<'a> {
    constants: &'a Constants,
    groups: Vec<Group>,
    word: WordBuf,
}

impl Scanner<'_> {
    fn flush(&mut self) {
        if let Some(word) = self.word.take() {
            self.emit(word);
        }
    }

    fn emit(&mut self, item: Handle) {
        let last = self.groups.len() - 1;
        self.groups[last].items.push(item);
    }

    fn open(&mut self, kind: GroupKind) {
        self.flush();
        self.groups.push(Group {
            kind,
            items: Vec::new(),
        });
    }

    fn close(&mut self, kind: GroupKind) -> Result<Vec<Handle>, Unwind> {
        self.flush();
        match self.groups.last() {
            Some(group) if group.kind == kind => {}
            _ => return Err(unexpected_bracket()),
        }
        Ok(self.groups.pop().map(|g| g.items).unwrap_or_default())
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '=' | '<' | '>')
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| c.is_whitespace() || matches!(c, '[' | '(' | '{'))
}

fn rest_of_line_blank(chars: &[char], from: usize) -> bool {
    chars[from..]
        .iter()
        .take_while(|c| **c != '\n')
        .all(|c| c.is_whitespace())
}

fn scan(constants: &Constants, text: &str) -> Result<Scan, Unwind> {
    let chars: Vec<char> = text.chars().collect();
    let mut scanner = Scanner {
        constants,
        groups: vec![Group {
            kind: GroupKind::Top,
            items: Vec::new(),
        }],
        word: WordBuf::default(),
    };
    let mut in_bar = false;
    let mut trailing_tilde = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if in_bar {
            match c {
                '|' => in_bar = false,
                '\\' if i + 1 < chars.len() => {
                    scanner.word.push(chars[i + 1]);
                    i += 1;
                }
                _ => scanner.word.push(c),
            }
            i += 1;
            continue;
        }
        match c {
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    scanner.word.push(next);
                    i += 1;
                }
            }
            '|' => {
                scanner.word.start();
                in_bar = true;
            }
            ';' => {
                scanner.flush();
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '~' if rest_of_line_blank(&chars, i + 1) => {
                scanner.flush();
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                trailing_tilde = i >= chars.len();
                continue;
            }
            c if c.is_whitespace() => scanner.flush(),
            '[' => scanner.open(GroupKind::List),
            '{' => scanner.open(GroupKind::Array),
            ']' => {
                let items = scanner.close(GroupKind::List)?;
                let list = constants.list(items);
                scanner.emit(list);
            }
            '}' => {
                let items = scanner.close(GroupKind::Array)?;
                let (origin, consumed) = read_origin(&chars, i + 1);
                i += consumed;
                scanner.emit(Handle::array(origin, items));
            }
            '(' | ')' => {
                scanner.flush();
                scanner.emit(Handle::word(c.to_string()));
            }
            c if is_operator(c) => {
                let next = chars.get(i + 1).copied();
                let starts_number = c == '-'
                    && !scanner.word.active
                    && is_boundary(i.checked_sub(1).map(|p| chars[p]))
                    && next.is_some_and(|n| n.is_ascii_digit() || n == '.');
                if scanner.word.quoted
                    || starts_number
                    || (matches!(c, '+' | '-') && scanner.word.is_exponent_prefix())
                {
                    scanner.word.push(c);
                } else {
                    scanner.flush();
                    let two = match (c, next) {
                        ('<', Some('=' | '>')) | ('>', Some('=')) => next,
                        _ => None,
                    };
                    let mut op = c.to_string();
                    if let Some(second) = two {
                        op.push(second);
                        i += 1;
                    }
                    scanner.emit(Handle::word(op));
                }
            }
            _ => scanner.word.push(c),
        }
        i += 1;
    }
    scanner.flush();

    let open_groups = scanner.groups.len() - 1;
    while scanner.groups.len() > 1 {
        let Some(group) = scanner.groups.pop() else {
            break;
        };
        let value = match group.kind {
            GroupKind::Array => Handle::array(1, group.items),
            _ => scanner.constants.list(group.items),
        };
        scanner.emit(value);
    }
    let items = scanner
        .groups
        .pop()
        .map(|g| g.items)
        .unwrap_or_default();
    Ok(Scan {
        list: constants.list(items),
        open_groups,
        open_bar: in_bar,
        trailing_tilde,
    })
}

/// Parse `@origin` after a closing brace. Returns the origin and the
/// number of characters consumed.
fn read_origin(chars: &[char], from: usize) -> (i64, usize) {
    if chars.get(from) != Some(&'@') {
        return (1, 0);
    }
    let mut end = from + 1;
    if chars.get(end) == Some(&'-') {
        end += 1;
    }
    while chars.get(end).is_some_and(char::is_ascii_digit) {
        end += 1;
    }
    let digits: String = chars[from + 1..end].iter().collect();
    match digits.parse::<i64>() {
        Ok(origin) => (origin, end - from),
        Err(_) => (1, 0),
    }
}
