//! Interpretación y formato legible de fechas ISO-8601.

use chrono::{NaiveDate, NaiveDateTime};

/// Intenta interpretar una cadena ISO-8601, con o sin hora.
/// Una fecha sin hora se normaliza a medianoche.
pub fn parse_iso(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Convierte una cadena ISO en `DD/MM/YYYY HH:MM`, o `DD/MM/YYYY` si
/// `date_only`. Una entrada no interpretable se devuelve tal cual, sin
/// error.
pub fn format_human(iso: &str, date_only: bool) -> String {
    match parse_iso(iso) {
        Some(dt) if date_only => dt.format("%d/%m/%Y").to_string(),
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_iso_variants() {
        let valid_cases = vec![
            "2026-09-01T10:30",
            "2026-09-01T10:30:45",
            "2026-09-01",
            " 2026-09-01 ",
        ];

        for input in valid_cases {
            assert!(parse_iso(input).is_some(), "{input} should parse");
        }
    }

    #[test]
    fn rejects_non_dates() {
        let invalid_cases = vec!["", "mañana", "2026-13-01", "01/09/2026"];

        for input in invalid_cases {
            assert!(parse_iso(input).is_none(), "{input} should not parse");
        }
    }

    #[test]
    fn formats_date_and_time() {
        assert_eq!(format_human("2026-09-01T10:30", false), "01/09/2026 10:30");
        assert_eq!(format_human("2026-09-01", false), "01/09/2026 00:00");
    }

    #[test]
    fn formats_date_only() {
        assert_eq!(format_human("1990-04-17", true), "17/04/1990");
        assert_eq!(format_human("1990-04-17T08:15", true), "17/04/1990");
    }

    #[test]
    fn passes_through_unparsable_input() {
        assert_eq!(format_human("sin fecha", false), "sin fecha");
        assert_eq!(format_human("", true), "");
    }
}
