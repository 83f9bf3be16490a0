use chrono::Month;

/// One row of the hunting season table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntingSeason {
    pub species: String,
    /// The dates column as written, e.g. `May to July`
    pub hunting_dates: String,
    /// Empty when the row has no notes column
    pub notes: String,
    pub start_month: Option<Month>,
    pub end_month: Option<Month>,
}

impl HuntingSeason {
    /// Whether the season's month range covers `month`.
    ///
    /// Ranges may wrap the new year (`November to February`). Seasons whose
    /// dates could not be read as a month range never match.
    pub fn is_open_in(&self, month: Month) -> bool {
        let (Some(start), Some(end)) = (self.start_month, self.end_month) else {
            return false;
        };
        let (start, end, month) = (
            start.number_from_month(),
            end.number_from_month(),
            month.number_from_month(),
        );

        if start <= end {
            (start..=end).contains(&month)
        } else {
            month >= start || month <= end
        }
    }
}

/// Seasons open in `month`, in file order.
pub fn search_by_month(seasons: &[HuntingSeason], month: Month) -> Vec<&HuntingSeason> {
    seasons.iter().filter(|s| s.is_open_in(month)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(start: Option<Month>, end: Option<Month>) -> HuntingSeason {
        HuntingSeason {
            species: "Test".into(),
            hunting_dates: String::new(),
            notes: String::new(),
            start_month: start,
            end_month: end,
        }
    }

    #[test]
    fn test_plain_range() {
        let s = season(Some(Month::May), Some(Month::July));
        assert!(s.is_open_in(Month::May));
        assert!(s.is_open_in(Month::June));
        assert!(s.is_open_in(Month::July));
        assert!(!s.is_open_in(Month::April));
        assert!(!s.is_open_in(Month::August));
    }

    #[test]
    fn test_range_wrapping_new_year() {
        let s = season(Some(Month::November), Some(Month::February));
        assert!(s.is_open_in(Month::December));
        assert!(s.is_open_in(Month::January));
        assert!(!s.is_open_in(Month::March));
        assert!(!s.is_open_in(Month::October));
    }

    #[test]
    fn test_single_month_range() {
        let s = season(Some(Month::April), Some(Month::April));
        assert!(s.is_open_in(Month::April));
        assert!(!s.is_open_in(Month::May));
    }

    #[test]
    fn test_unknown_range_never_matches() {
        let s = season(None, None);
        assert!(!s.is_open_in(Month::January));
    }

    #[test]
    fn test_search_keeps_order() {
        let seasons = vec![
            season(Some(Month::May), Some(Month::July)),
            season(None, None),
            season(Some(Month::June), Some(Month::June)),
        ];
        let found = search_by_month(&seasons, Month::June);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start_month, Some(Month::May));
        assert_eq!(found[1].start_month, Some(Month::June));
    }
}
