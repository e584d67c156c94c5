//! Hours/minutes editing of the free-form minute fields.

use crate::schedule::parse_non_negative;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinutesInterval {
    pub hours: u64,
    pub minutes: u64,
}

impl MinutesInterval {
    /// Split a total-minutes field. Invalid or empty input reads as zero.
    pub fn from_total(total: &str) -> Self {
        let n = parse_non_negative(total).unwrap_or(0);
        Self {
            hours: n / 60,
            minutes: n % 60,
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }

    /// Total minutes as field text. A zero interval keeps an empty field empty.
    pub fn to_field(&self, previous: &str) -> String {
        match self.total_minutes() {
            0 if previous.trim().is_empty() => String::new(),
            total => total.to_string(),
        }
    }

    /// Parse `H:MM`, `1h30m`, `45m`, `2h` or a bare minute count.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if s.is_empty() {
            return None;
        }

        if let Some((h, m)) = s.split_once(':') {
            let hours = parse_non_negative(h)?;
            let minutes = parse_non_negative(m)?;
            return Some(Self { hours, minutes }.normalized());
        }

        if s.ends_with('h') || s.ends_with('m') {
            let (h_part, rest) = match s.split_once('h') {
                Some((h, rest)) => (Some(h), rest),
                None => (None, s.as_str()),
            };
            let hours = match h_part {
                Some(h) => parse_non_negative(h)?,
                None => 0,
            };
            let minutes = match rest.strip_suffix('m') {
                Some(m) => parse_non_negative(m)?,
                None if rest.is_empty() => 0,
                None => return None,
            };
            return Some(Self { hours, minutes }.normalized());
        }

        parse_non_negative(&s).map(|n| Self {
            hours: n / 60,
            minutes: n % 60,
        })
    }

    fn normalized(self) -> Self {
        let total = self.total_minutes();
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }
}

impl std::str::FromStr for MinutesInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid interval '{s}' (expected minutes, H:MM, 1h30m, 2h or 45m)")
        })
    }
}

impl std::fmt::Display for MinutesInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} h {:02} min", self.hours, self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_total_minutes() {
        assert_eq!(
            MinutesInterval::from_total("135"),
            MinutesInterval {
                hours: 2,
                minutes: 15
            }
        );
        assert_eq!(MinutesInterval::from_total(""), MinutesInterval::default());
        assert_eq!(MinutesInterval::from_total("x"), MinutesInterval::default());
    }

    #[test]
    fn zero_keeps_empty_field_empty() {
        let zero = MinutesInterval::default();
        assert_eq!(zero.to_field(""), "");
        assert_eq!(zero.to_field("15"), "0");
        let some = MinutesInterval {
            hours: 1,
            minutes: 75,
        };
        assert_eq!(some.to_field(""), "135");
    }

    #[test]
    fn parses_common_spellings() {
        let expect = |h, m| Some(MinutesInterval { hours: h, minutes: m });
        assert_eq!(MinutesInterval::parse("1:30"), expect(1, 30));
        assert_eq!(MinutesInterval::parse("0:90"), expect(1, 30));
        assert_eq!(MinutesInterval::parse("1h30m"), expect(1, 30));
        assert_eq!(MinutesInterval::parse("2h"), expect(2, 0));
        assert_eq!(MinutesInterval::parse("45m"), expect(0, 45));
        assert_eq!(MinutesInterval::parse("180"), expect(3, 0));
        assert_eq!(MinutesInterval::parse(""), None);
        assert_eq!(MinutesInterval::parse("1h30"), None);
        assert_eq!(MinutesInterval::parse("soon"), None);
    }

    #[test]
    fn from_str_explains_rejected_input() {
        assert_eq!("1h30m".parse(), Ok(MinutesInterval { hours: 1, minutes: 30 }));
        let err = "-5".parse::<MinutesInterval>().unwrap_err();
        assert!(err.contains("'-5'"), "{err}");
    }
}
