use std::cell::OnceCell;

/// A word with lazily computed numeric and boolean interpretations.
///
/// Each interpretation is computed at most once. `None` means the word is
/// not a valid number (or boolean); callers must check it rather than
/// assume a default.
pub struct Atom {
    text: Box<str>,
    number: OnceCell<Option<f64>>,
    boolean: OnceCell<Option<bool>>,
}

impl Atom {
    pub(crate) fn new(text: impl Into<Box<str>>) -> Self {
        Atom {
            text: text.into(),
            number: OnceCell::new(),
            boolean: OnceCell::new(),
        }
    }

    pub(crate) fn from_number(n: f64) -> Self {
        let atom = Atom::new(format_number(n));
        let _ = atom.number.set(Some(n));
        let _ = atom.boolean.set(None);
        atom
    }

    pub(crate) fn from_bool(b: bool) -> Self {
        let atom = Atom::new(if b { "true" } else { "false" });
        let _ = atom.boolean.set(Some(b));
        atom
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters (not bytes) in the word.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Numeric value, if the text is a Logo number.
    pub fn number(&self) -> Option<f64> {
        *self.number.get_or_init(|| parse_number(&self.text))
    }

    /// Boolean value, if the text is `true` or `false` in any case.
    pub fn boolean(&self) -> Option<bool> {
        *self.boolean.get_or_init(|| {
            if self.text.eq_ignore_ascii_case("true") {
                Some(true)
            } else if self.text.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        })
    }
}

/// Parse a word as a Logo number.
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// optional `e`/`E` exponent. Rejects words without digits and the special
/// spellings (`inf`, `NaN`) the host float parser would accept.
pub fn parse_number(text: &str) -> Option<f64> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !body.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoids rendering negative zero as "-0".
        return "0".to_string();
    }
    format!("{n}")
}
