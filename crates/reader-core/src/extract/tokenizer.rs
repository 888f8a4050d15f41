//! Flat markup tokenizer.
//!
//! Two states only: `InText` scans up to the next tag opener, `InTag` scans a
//! single tag up to its closing `>`. There is no tree; callers that care
//! about nesting count start and end tags themselves.

pub const MAX_TAG_NAME: usize = 16;

/// Lower-cased tag name held inline. Names longer than [`MAX_TAG_NAME`]
/// bytes are truncated and never compare equal to anything.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TagName {
    bytes: [u8; MAX_TAG_NAME],
    len: u8,
    truncated: bool,
}

impl TagName {
    fn push(&mut self, b: u8) {
        if (self.len as usize) < MAX_TAG_NAME {
            self.bytes[self.len as usize] = b.to_ascii_lowercase();
            self.len += 1;
        } else {
            self.truncated = true;
        }
    }

    pub fn as_str(&self) -> &str {
        // only ASCII bytes are ever pushed
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }

    pub fn is(&self, name: &str) -> bool {
        !self.truncated && self.as_str() == name
    }

    pub fn is_any(&self, names: &[&str]) -> bool {
        !self.truncated && names.contains(&self.as_str())
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl std::fmt::Debug for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.truncated {
            write!(f, "<{}…>", self.as_str())
        } else {
            write!(f, "<{}>", self.as_str())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    /// Body of a `script` or `style` element.
    RawText(&'a str),
    StartTag {
        name: TagName,
        attrs: &'a str,
        self_closing: bool,
    },
    EndTag {
        name: TagName,
    },
    /// Comments, doctype and processing instructions.
    Comment,
    /// A tag opener with no `>` before the end of input.
    Unterminated {
        name: TagName,
        attrs: &'a str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InText,
    InTag,
}

const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    state: State,
    raw_text_end: Option<TagName>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            state: State::InText,
            raw_text_end: None,
        }
    }

    fn scan_text(&mut self) -> Option<Token<'a>> {
        let src = self.src;
        let bytes = src.as_bytes();
        let start = self.pos;
        if let Some(name) = self.raw_text_end.take() {
            let end = find_end_tag(src, start, name.as_str()).unwrap_or(bytes.len());
            self.pos = end;
            self.state = State::InTag;
            return (end > start).then(|| Token::RawText(&src[start..end]));
        }
        let mut i = start;
        while i < bytes.len() {
            if bytes[i] == b'<' && opens_tag(bytes.get(i + 1).copied()) {
                break;
            }
            i += 1;
        }
        self.pos = i;
        self.state = State::InTag;
        (i > start).then(|| Token::Text(&src[start..i]))
    }

    fn scan_tag(&mut self) -> Token<'a> {
        let src = self.src;
        let bytes = src.as_bytes();
        let start = self.pos;
        self.state = State::InText;

        if src[start..].starts_with("<!--") {
            self.pos = src[start + 4..]
                .find("-->")
                .map(|i| start + 4 + i + 3)
                .unwrap_or(bytes.len());
            return Token::Comment;
        }
        if matches!(bytes.get(start + 1), Some(b'!') | Some(b'?')) {
            self.pos = src[start..]
                .find('>')
                .map(|i| start + i + 1)
                .unwrap_or(bytes.len());
            return Token::Comment;
        }

        let closing = bytes.get(start + 1) == Some(&b'/');
        let mut i = start + if closing { 2 } else { 1 };
        let mut name = TagName::default();
        while i < bytes.len() && is_name_byte(bytes[i]) {
            name.push(bytes[i]);
            i += 1;
        }
        let attrs_start = i;
        let Some(gt) = find_tag_end(bytes, i) else {
            self.pos = bytes.len();
            return Token::Unterminated {
                name,
                attrs: &src[attrs_start..],
            };
        };
        self.pos = gt + 1;
        if closing {
            return Token::EndTag { name };
        }
        let attrs = &src[attrs_start..gt];
        let self_closing = attrs.trim_end().ends_with('/');
        if !self_closing && name.is_any(&RAW_TEXT_TAGS) {
            self.raw_text_end = Some(name);
        }
        Token::StartTag {
            name,
            attrs,
            self_closing,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.src.len() {
            match self.state {
                State::InText => {
                    if let Some(token) = self.scan_text() {
                        return Some(token);
                    }
                }
                State::InTag => return Some(self.scan_tag()),
            }
        }
        None
    }
}

fn opens_tag(next: Option<u8>) -> bool {
    matches!(next, Some(b) if b.is_ascii_alphabetic() || b == b'/' || b == b'!' || b == b'?')
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

/// Index of the `>` that closes the tag, skipping over quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_eq = false;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => {
                quote = None;
                after_eq = false;
            }
            Some(_) => {}
            None => match b {
                b'>' => return Some(i),
                b'"' | b'\'' if after_eq => quote = Some(b),
                b'=' => after_eq = true,
                b if b.is_ascii_whitespace() => {}
                _ => after_eq = false,
            },
        }
    }
    None
}

fn find_end_tag(src: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = from;
    while let Some(off) = src[i..].find("</") {
        let at = i + off;
        let candidate = &bytes[at + 2..];
        if candidate.len() >= name.len()
            && candidate[..name.len()].eq_ignore_ascii_case(name.as_bytes())
            && !candidate
                .get(name.len())
                .is_some_and(|&b| is_name_byte(b))
        {
            return Some(at);
        }
        i = at + 2;
    }
    None
}

/// Iterates `(name, value)` pairs of a raw attribute string. Bare attributes
/// yield an empty value.
pub fn attributes(raw: &str) -> Attributes<'_> {
    Attributes { raw, pos: 0 }
}

/// Value of the first attribute called `name` (ASCII case-insensitive).
pub fn attr_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    attributes(raw)
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

pub struct Attributes<'a> {
    raw: &'a str,
    pos: usize,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.raw.as_bytes();
        let mut i = self.pos;
        let name_start = loop {
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            if i >= bytes.len() {
                self.pos = i;
                return None;
            }
            if is_attr_name_byte(bytes[i]) {
                break i;
            }
            // stray `=` or `>` with no name in front
            i += 1;
        };
        while i < bytes.len() && is_attr_name_byte(bytes[i]) && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name = &self.raw[name_start..i];
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            self.pos = i;
            return Some((name, ""));
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let value = match bytes.get(j) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let value_start = j + 1;
                let value_end = self.raw[value_start..]
                    .find(q as char)
                    .map(|off| value_start + off)
                    .unwrap_or(bytes.len());
                self.pos = (value_end + 1).min(bytes.len());
                &self.raw[value_start..value_end]
            }
            _ => {
                let value_start = j;
                j = unquoted_value_end(bytes, j);
                self.pos = j;
                &self.raw[value_start..j]
            }
        };
        Some((name, value))
    }
}

fn is_attr_name_byte(b: u8) -> bool {
    !matches!(b, b'=' | b'/' | b'>')
}

/// End of an unquoted value. A quote right after an `=` opens a quoted run,
/// the same way [`find_tag_end`] reads it, so a `>` inside it stays in the value.
fn unquoted_value_end(bytes: &[u8], mut j: usize) -> usize {
    let mut after_eq = false;
    while j < bytes.len() && !bytes[j].is_ascii_whitespace() {
        match bytes[j] {
            b'"' | b'\'' if after_eq => {
                let q = bytes[j];
                j = bytes[j + 1..]
                    .iter()
                    .position(|&b| b == q)
                    .map_or(bytes.len(), |off| j + 1 + off + 1);
                after_eq = false;
                continue;
            }
            b'=' => after_eq = true,
            _ => after_eq = false,
        }
        j += 1;
    }
    j
}
