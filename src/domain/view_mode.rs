use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which window the chart shows. Exactly one is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    #[strum(to_string = "Live")]
    Live,
    #[strum(to_string = "1H")]
    OneHour,
    #[strum(to_string = "6H")]
    SixHours,
    #[strum(to_string = "24H")]
    TwentyFourHours,
}

impl ViewMode {
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    /// Range token understood by the history endpoint. `None` for Live (nothing to fetch).
    pub fn range_token(self) -> Option<&'static str> {
        match self {
            Self::Live => None,
            Self::OneHour => Some("1h"),
            Self::SixHours => Some("6h"),
            Self::TwentyFourHours => Some("24h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!(ViewMode::from_str("6h").unwrap(), ViewMode::SixHours);
        assert_eq!(ViewMode::from_str("LIVE").unwrap(), ViewMode::Live);
        assert!(ViewMode::from_str("2H").is_err());
    }

    #[test]
    fn only_live_has_no_range_token() {
        for mode in ViewMode::iter() {
            assert_eq!(mode.range_token().is_none(), mode.is_live());
        }
        assert_eq!(ViewMode::TwentyFourHours.range_token(), Some("24h"));
    }
}
