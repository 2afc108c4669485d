//! Minimal source scanner for object and array literals
//!
//! Only understands what the editor needs: string literals, comments and
//! bracket nesting. Everything else is treated as opaque text.

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Index just past the string literal or comment starting at `i`, if one starts there
pub fn skip_non_code(bytes: &[u8], i: usize) -> Option<usize> {
    let len = bytes.len();
    match bytes[i] {
        quote @ (b'\'' | b'"' | b'`') => {
            let mut j = i + 1;
            while j < len {
                if bytes[j] == b'\\' {
                    j += 2;
                    continue;
                }
                if bytes[j] == quote {
                    return Some(j + 1);
                }
                j += 1;
            }
            Some(len)
        }
        b'/' if bytes.get(i + 1) == Some(&b'/') => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(len, |p| i + p),
        ),
        b'/' if bytes.get(i + 1) == Some(&b'*') => Some(
            bytes[i + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map_or(len, |p| i + 2 + p + 2),
        ),
        _ => None,
    }
}

/// Index of the bracket closing the one at `open`
pub fn find_closing(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the first non-whitespace byte at or after `i`
pub fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Index of the `{` opening the object passed to `callee(...)`
///
/// Only calls in code count; mentions inside strings or comments are skipped.
pub fn find_call_object(src: &str, callee: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        if is_ident_start(bytes[i]) && (i == 0 || !is_ident_char(bytes[i - 1])) {
            let mut end = i;
            while end < bytes.len() && is_ident_char(bytes[end]) {
                end += 1;
            }
            if &src[i..end] == callee {
                let paren = skip_whitespace(bytes, end);
                if bytes.get(paren) == Some(&b'(') {
                    let open = skip_whitespace(bytes, paren + 1);
                    if bytes.get(open) == Some(&b'{') {
                        return Some(open);
                    }
                }
            }
            i = end;
            continue;
        }
        i += 1;
    }
    None
}

/// Index just past the last code byte in `from..to`, ignoring whitespace and comments
pub fn end_of_code(bytes: &[u8], from: usize, to: usize) -> usize {
    let mut last = from;
    let mut i = from;
    while i < to {
        if let Some(next) = skip_non_code(bytes, i) {
            if !matches!(bytes[i], b'/') {
                last = next.min(to);
            }
            i = next;
            continue;
        }
        if !bytes[i].is_ascii_whitespace() {
            last = i + 1;
        }
        i += 1;
    }
    last
}

/// Index where the value of property `key` starts, searching the direct
/// children of the object literal spanning `open..=close`
pub fn find_property_value(src: &str, open: usize, close: usize, key: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut i = open + 1;

    while i < close {
        let b = bytes[i];
        if depth == 0 && matches!(b, b'\'' | b'"') {
            let end = skip_non_code(bytes, i)?;
            if end - i >= 2 && &src[i + 1..end - 1] == key {
                if let Some(value) = value_after_colon(bytes, end) {
                    return Some(value);
                }
            }
            i = end;
            continue;
        }
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_ident_start(b) && !is_ident_char(bytes[i - 1]) => {
                let mut end = i;
                while end < close && is_ident_char(bytes[end]) {
                    end += 1;
                }
                if &src[i..end] == key {
                    if let Some(value) = value_after_colon(bytes, end) {
                        return Some(value);
                    }
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn value_after_colon(bytes: &[u8], after_key: usize) -> Option<usize> {
    let colon = skip_whitespace(bytes, after_key);
    if bytes.get(colon) == Some(&b':') {
        Some(skip_whitespace(bytes, colon + 1))
    } else {
        None
    }
}
