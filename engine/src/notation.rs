//! Cell names used by renderers and input parsers: column letter followed by
//! a 1-based row number, so index 0 is "A1" and index 5 on a 3x3 grid is "C2".
//! Columns past 'Z' continue as "AA", "AB", ...

use crate::error::GameError;

/// Name of `index` on a grid of side `dimension`. Indices past the last
/// cell keep counting rows, so callers pass cells of a real grid.
///
/// # Panics
///
/// Panics if `dimension` is zero.
pub fn to_notation(index: usize, dimension: usize) -> String {
    assert!(dimension > 0, "grid dimension must be positive");
    let column = index % dimension;
    let row = index / dimension + 1;
    format!("{}{}", column_name(column), row)
}

pub fn parse_notation(text: &str, dimension: usize) -> Result<usize, GameError> {
    let invalid = || GameError::InvalidNotation(text.to_string());

    let trimmed = text.trim().to_ascii_uppercase();
    let split = trimmed
        .find(|c: char| !c.is_ascii_uppercase())
        .ok_or_else(invalid)?;
    let (letters, digits) = trimmed.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let column = column_index(letters).ok_or_else(invalid)?;
    let row: usize = digits.parse().map_err(|_| invalid())?;
    if column >= dimension || row == 0 || row > dimension {
        return Err(invalid());
    }
    Ok((row - 1) * dimension + column)
}

pub fn column_name(column: usize) -> String {
    let mut name = Vec::new();
    let mut remaining = column + 1;
    while remaining > 0 {
        let letter = (remaining - 1) % 26;
        name.push(b'A' + letter as u8);
        remaining = (remaining - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

fn column_index(letters: &str) -> Option<usize> {
    letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?.checked_add((b - b'A') as usize + 1)
    })
    .map(|value| value - 1)
}
