//! Reader for the comma-separated hunting season table.
//!
//! ```text
//! SPECIES,HUNTING DATES,Notes
//! Upland Gamebirds,May to July,Pheasant; Quail; Pukeko; Peacock.
//! ```

use std::path::Path;
use std::str::FromStr;

use chrono::Month;

use crate::error::{Result, SeasonsError};
use crate::season::HuntingSeason;

const DATE_SEPARATORS: [&str; 4] = [" to ", " through ", " (", ")"];

/// Read and parse a hunting season file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<HuntingSeason>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SeasonsError::NotFound(path.to_path_buf()),
        _ => SeasonsError::Io(e),
    })?;

    let seasons = parse_str(&text)?;
    tracing::debug!("Parsed {} hunting seasons from {}", seasons.len(), path.display());
    Ok(seasons)
}

/// Parse hunting season text. The first line is a header.
pub fn parse_str(text: &str) -> Result<Vec<HuntingSeason>> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<HuntingSeason> {
    let mut columns = line.splitn(3, ',');
    let species = columns.next().map(str::trim).unwrap_or_default();
    let hunting_dates = columns
        .next()
        .map(str::trim)
        .ok_or(SeasonsError::MalformedLine { line: line_no })?;
    let notes = columns.next().map(str::trim).unwrap_or_default();

    let (start_month, end_month) = month_range(hunting_dates);

    Ok(HuntingSeason {
        species: species.to_string(),
        hunting_dates: hunting_dates.to_string(),
        notes: notes.to_string(),
        start_month,
        end_month,
    })
}

/// Start and end month, when the dates column is exactly two month parts.
fn month_range(dates: &str) -> (Option<Month>, Option<Month>) {
    match split_dates(dates).as_slice() {
        [start, end] => match (parse_month(start), parse_month(end)) {
            (Some(start), Some(end)) => (Some(start), Some(end)),
            _ => (None, None),
        },
        _ => (None, None),
    }
}

fn split_dates(dates: &str) -> Vec<&str> {
    let mut parts = vec![dates];
    for separator in DATE_SEPARATORS {
        parts = parts
            .into_iter()
            .flat_map(|part| part.split(separator))
            .collect();
    }
    parts.retain(|part| !part.trim().is_empty());
    parts
}

/// A month name, full or abbreviated, optionally followed by `yyyy` or
/// `dd, yyyy`.
fn parse_month(text: &str) -> Option<Month> {
    let text = text.trim();
    let (name, rest) = match text.split_once(' ') {
        Some((name, rest)) => (name, rest.trim()),
        None => (text, ""),
    };
    let month = Month::from_str(name).ok()?;

    let suffix_ok = rest.is_empty()
        || is_year(rest)
        || rest
            .split_once(',')
            .is_some_and(|(day, year)| is_day(day.trim()) && is_year(year.trim()));

    suffix_ok.then_some(month)
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_day(s: &str) -> bool {
    (1..=2).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_digit())
        && s.parse::<u32>().is_ok_and(|d| (1..=31).contains(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dates() {
        assert_eq!(split_dates("May to July"), vec!["May", "July"]);
        assert_eq!(
            split_dates("February to August (Rut March to April)"),
            vec!["February", "August", "Rut March", "April"]
        );
        assert_eq!(
            split_dates("Late February through May (Rut in April)"),
            vec!["Late February", "May", "Rut in April"]
        );
        assert_eq!(split_dates("All Year"), vec!["All Year"]);
    }

    #[test]
    fn test_parse_month_forms() {
        assert_eq!(parse_month("May"), Some(Month::May));
        assert_eq!(parse_month("Sep"), Some(Month::September));
        assert_eq!(parse_month("August 2024"), Some(Month::August));
        assert_eq!(parse_month("Mar 05, 2024"), Some(Month::March));
        assert_eq!(parse_month("Mid August"), None);
        assert_eq!(parse_month("August later"), None);
        assert_eq!(parse_month("Rut July and August"), None);
    }

    #[test]
    fn test_month_range_needs_exactly_two_parts() {
        assert_eq!(
            month_range("May to July"),
            (Some(Month::May), Some(Month::July))
        );
        assert_eq!(
            month_range("November through February"),
            (Some(Month::November), Some(Month::February))
        );
        assert_eq!(month_range("May to June (North Island)"), (None, None));
        assert_eq!(month_range("Mid August through September"), (None, None));
        assert_eq!(month_range("All Year"), (None, None));
    }

    #[test]
    fn test_missing_notes_column() {
        let seasons = parse_str("SPECIES,HUNTING DATES,Notes\nHare,All Year\n").unwrap();
        assert_eq!(seasons[0].species, "Hare");
        assert_eq!(seasons[0].notes, "");
    }

    #[test]
    fn test_notes_keep_commas() {
        let seasons =
            parse_str("h\nGoat,All Year,Any time, anywhere, no limit\n").unwrap();
        assert_eq!(seasons[0].notes, "Any time, anywhere, no limit");
    }

    #[test]
    fn test_single_column_is_malformed() {
        let err = parse_str("h\nRabbit,All Year\nJust a species\n").unwrap_err();
        assert!(matches!(err, SeasonsError::MalformedLine { line: 3 }));
    }

    #[test]
    fn test_header_only_and_blank_lines() {
        assert!(parse_str("SPECIES,HUNTING DATES,Notes\n").unwrap().is_empty());
        assert!(parse_str("").unwrap().is_empty());
        let seasons = parse_str("h\n\n   \nPig,All Year,\n").unwrap();
        assert_eq!(seasons.len(), 1);
    }
}
