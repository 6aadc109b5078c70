use chrono::{Days, Local, NaiveDate};

/// Consecutive calendar dates queried in one run, starting at the first day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow(Vec<NaiveDate>);

impl DateWindow {
    /// `days` consecutive dates from `start` (inclusive).
    pub fn new(start: NaiveDate, days: u32) -> Self {
        let dates = (0..u64::from(days))
            .map_while(|i| start.checked_add_days(Days::new(i)))
            .collect();
        Self(dates)
    }

    /// `days` consecutive dates from today, in local time.
    pub fn from_today(days: u32) -> Self {
        Self::new(Local::now().date_naive(), days)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_dates_across_month_end() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let window = DateWindow::new(start, 4);
        let dates: Vec<String> = window.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]
        );
    }

    #[test]
    fn zero_days_is_empty() {
        let window = DateWindow::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 0);
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }

    #[test]
    fn today_starts_the_window() {
        let before = Local::now().date_naive();
        let window = DateWindow::from_today(3);
        let after = Local::now().date_naive();

        let first = window.iter().next().unwrap();
        assert_eq!(window.len(), 3);
        assert!(first == before || first == after);
    }
}
