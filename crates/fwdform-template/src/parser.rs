use crate::{
    escape::{DELIMITER, ESCAPE},
    Item, Template,
};

enum Closer {
    /// Closing delimiter at this byte offset.
    Found(usize),
    /// The opener is directly followed by another `%`.
    Empty,
    /// No usable closing delimiter before the end of the source.
    Unterminated,
}

/// Next `%` at or after `from` that is not directly preceded by `\`.
fn find_opener(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len())
        .find(|&pos| bytes[pos] == DELIMITER && (pos == 0 || bytes[pos - 1] != ESCAPE))
}

/// The placeholder name is the shortest non-empty run after the opener that
/// is followed by a `%` not preceded by `\`. A `%` preceded by `\` belongs to
/// the name, which also means a name can never end in a bare `\`.
fn find_closer(bytes: &[u8], open: usize) -> Closer {
    for pos in (open + 1)..bytes.len() {
        if bytes[pos] != DELIMITER {
            continue;
        }

        if pos == open + 1 {
            return Closer::Empty;
        }

        if bytes[pos - 1] != ESCAPE {
            return Closer::Found(pos);
        }
    }

    Closer::Unterminated
}

impl<'s> Template<'s> {
    /// Scan a template into literal text and placeholders.
    ///
    /// This never fails. Text that doesn't form a placeholder is kept as a
    /// literal, still in escaped form.
    pub fn parse(source: &'s str) -> Self {
        let bytes = source.as_bytes();
        let mut items = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        // Delimiters and escapes are ASCII, so every offset below is a char
        // boundary.
        while let Some(open) = find_opener(bytes, pos) {
            match find_closer(bytes, open) {
                Closer::Found(close) => {
                    if text_start < open {
                        items.push(Item::Literal(&source[text_start..open]));
                    }
                    items.push(Item::Placeholder(&source[(open + 1)..close]));
                    text_start = close + 1;
                    pos = close + 1;
                }
                // `%%`: the second one may still open a placeholder.
                Closer::Empty => pos = open + 1,
                // Every later `%` is escaped, so nothing else can open.
                Closer::Unterminated => break,
            }
        }

        if text_start < source.len() {
            items.push(Item::Literal(&source[text_start..]));
        }

        Template { items }
    }
}
