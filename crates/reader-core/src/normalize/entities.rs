use std::borrow::Cow;

/// `&#x10FFFF;` is the longest reference worth looking at.
const MAX_ENTITY_LEN: usize = 10;

/// Decodes the fixed entity table in one pass. Anything it does not
/// recognise is copied through untouched.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_one(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// `s` starts with `&`. Returns the character and the byte length of the
/// whole reference including the `;`.
fn decode_one(s: &str) -> Option<(char, usize)> {
    let semi = s.as_bytes()[1..]
        .iter()
        .take(MAX_ENTITY_LEN - 1)
        .position(|&b| b == b';')?
        + 1;
    let body = &s[1..semi];
    let ch = match body.strip_prefix('#') {
        Some(num) => decode_numeric(num)?,
        None => named(body)?,
    };
    Some((ch, semi + 1))
}

fn decode_numeric(num: &str) -> Option<char> {
    let (digits, radix) = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
        Some(hex) => (hex, 16),
        None => (num, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let code = u32::from_str_radix(digits, radix).ok()?;
    if code == 0 {
        return None;
    }
    // surrogates and anything past U+10FFFF come back as None
    char::from_u32(code)
}

fn named(name: &str) -> Option<char> {
    Some(match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => return None,
    })
}
