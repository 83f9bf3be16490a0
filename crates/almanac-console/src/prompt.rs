//! Line-oriented questions on any `BufRead`/`Write` pair.

use std::io::{self, BufRead, Write};

/// Print `question` and read one trimmed line. End of input reads as empty.
pub fn ask(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> io::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Like [`ask`], with `default` used for an empty answer.
pub fn ask_or_default(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    default: &str,
) -> io::Result<String> {
    let answer = ask(input, out, &format!("{question} [{default}]: "))?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

/// Ask for a number, falling back to `default` on an empty or unreadable
/// answer.
pub fn ask_f64(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
    default: f64,
) -> io::Result<f64> {
    let answer = ask(input, out, &format!("{question} [{default}]: "))?;
    if answer.is_empty() {
        return Ok(default);
    }
    match answer.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            writeln!(out, "'{answer}' is not a number, using {default}.")?;
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims() {
        let mut input = Cursor::new("  Wellington \n");
        let mut out = Vec::new();
        let answer = ask(&mut input, &mut out, "City: ").unwrap();
        assert_eq!(answer, "Wellington");
        assert_eq!(out, b"City: ");
    }

    #[test]
    fn test_default_on_empty_and_eof() {
        let mut out = Vec::new();
        let mut input = Cursor::new("\n");
        assert_eq!(
            ask_or_default(&mut input, &mut out, "City", "Takanini").unwrap(),
            "Takanini"
        );

        let mut eof = Cursor::new("");
        assert_eq!(
            ask_or_default(&mut eof, &mut out, "City", "Takanini").unwrap(),
            "Takanini"
        );
    }

    #[test]
    fn test_ask_f64() {
        let mut out = Vec::new();
        let mut input = Cursor::new("-41.3\nsouth\n\n");
        assert_eq!(ask_f64(&mut input, &mut out, "Latitude", -39.0).unwrap(), -41.3);
        assert_eq!(ask_f64(&mut input, &mut out, "Latitude", -39.0).unwrap(), -39.0);
        assert_eq!(ask_f64(&mut input, &mut out, "Latitude", -39.0).unwrap(), -39.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("'south' is not a number"));
    }
}
