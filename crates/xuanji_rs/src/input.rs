//! Birth input and its resolution to civil, Beijing and lunar time.

use serde::Serialize;
use xuanji_base::Gender;
use xuanji_time::{CivilDateTime, LunarDate, UtcOffset, hour_index, lunar_to_solar, solar_to_lunar};

use crate::error::XuanjiError;

/// A birth moment as a caller supplies it.
///
/// With `is_lunar` the date fields are a lunar date (`is_leap_month` marks
/// an intercalary month); otherwise they are Gregorian. `timezone` is a fixed
/// offset such as `+08:00` or `UTC-5`, or an IANA name of a UTC+8 zone.
/// `None` means Beijing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub gender: Gender,
    pub is_lunar: bool,
    pub is_leap_month: bool,
    pub timezone: Option<String>,
}

impl BirthInput {
    pub fn solar(year: i32, month: u32, day: u32, hour: u32, minute: u32, gender: Gender) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            gender,
            is_lunar: false,
            is_leap_month: false,
            timezone: None,
        }
    }

    pub fn lunar(
        year: i32,
        month: u32,
        day: u32,
        is_leap_month: bool,
        hour: u32,
        minute: u32,
        gender: Gender,
    ) -> Self {
        Self {
            is_lunar: true,
            is_leap_month,
            ..Self::solar(year, month, day, hour, minute, gender)
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn offset(&self) -> Result<UtcOffset, XuanjiError> {
        match &self.timezone {
            Some(tz) => Ok(tz.parse()?),
            None => Ok(UtcOffset::BEIJING),
        }
    }

    fn check_components(&self) -> Result<(), XuanjiError> {
        if self.hour > 23 {
            return Err(XuanjiError::InvalidInput(format!("hour {}", self.hour)));
        }
        if self.minute > 59 {
            return Err(XuanjiError::InvalidInput(format!("minute {}", self.minute)));
        }
        if self.is_lunar {
            if !(1..=12).contains(&self.month) {
                return Err(XuanjiError::InvalidInput(format!("lunar month {}", self.month)));
            }
            if !(1..=30).contains(&self.day) {
                return Err(XuanjiError::InvalidInput(format!("lunar day {}", self.day)));
            }
        }
        Ok(())
    }

    /// Validate and convert to the times every engine needs.
    pub fn resolve(&self) -> Result<ResolvedBirth, XuanjiError> {
        self.check_components()?;
        let offset = self.offset()?;
        let local = if self.is_lunar {
            let date = LunarDate::new(self.year, self.month as u8, self.day as u8, self.is_leap_month);
            let (y, m, d) = lunar_to_solar(date)?;
            CivilDateTime::new(y, m, d, self.hour, self.minute)?
        } else {
            CivilDateTime::new(self.year, self.month, self.day, self.hour, self.minute)?
        };
        let beijing = local.to_beijing(offset);
        let lunar = solar_to_lunar(beijing.year, beijing.month, beijing.day)?;
        log::debug!("birth {local} ({offset}) -> beijing {beijing}, lunar {lunar}");
        Ok(ResolvedBirth {
            local,
            offset,
            beijing,
            lunar,
            hour_index: hour_index(beijing.hour),
        })
    }
}

/// A validated birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedBirth {
    /// Gregorian wall-clock time in the input offset.
    pub local: CivilDateTime,
    pub offset: UtcOffset,
    pub beijing: CivilDateTime,
    /// Lunar date of the Beijing civil day.
    pub lunar: LunarDate,
    /// Double-hour index of the Beijing time (子 = 0).
    pub hour_index: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_beijing() {
        let r = BirthInput::solar(1990, 5, 15, 14, 30, Gender::Male).resolve().unwrap();
        assert_eq!(r.lunar, LunarDate::new(1990, 4, 21, false));
        assert_eq!(r.hour_index, 7);
        assert_eq!(r.local, r.beijing);
    }

    #[test]
    fn lunar_input_round_trips() {
        let r = BirthInput::lunar(1990, 4, 21, false, 14, 30, Gender::Male)
            .resolve()
            .unwrap();
        assert_eq!((r.local.year, r.local.month, r.local.day), (1990, 5, 15));
    }

    #[test]
    fn offset_shifts_day() {
        // 20:30 in UTC-5 is 09:30 the next day in Beijing.
        let r = BirthInput::solar(1990, 5, 14, 20, 30, Gender::Female)
            .with_timezone("-05:00")
            .resolve()
            .unwrap();
        assert_eq!((r.beijing.day, r.beijing.hour), (15, 9));
        assert_eq!(r.hour_index, 5);
        assert_eq!(r.lunar.day, 21);
    }

    #[test]
    fn components_rejected_first() {
        let mut input = BirthInput::solar(1990, 5, 15, 24, 0, Gender::Male);
        assert_eq!(
            input.resolve(),
            Err(XuanjiError::InvalidInput("hour 24".into()))
        );
        input.hour = 10;
        input.minute = 60;
        assert!(matches!(input.resolve(), Err(XuanjiError::InvalidInput(_))));

        let lunar = BirthInput::lunar(1990, 13, 1, false, 0, 0, Gender::Male);
        assert!(matches!(lunar.resolve(), Err(XuanjiError::InvalidInput(_))));
    }

    #[test]
    fn bad_dates_and_zones() {
        let feb30 = BirthInput::solar(2023, 2, 30, 0, 0, Gender::Male);
        assert!(matches!(feb30.resolve(), Err(XuanjiError::Calendar(_))));
        let zone = BirthInput::solar(2023, 2, 1, 0, 0, Gender::Male).with_timezone("Mars/Olympus");
        assert!(matches!(zone.resolve(), Err(XuanjiError::Calendar(_))));
        // 2023 has 闰二月 but no 闰三月.
        let leap = BirthInput::lunar(2023, 3, 1, true, 0, 0, Gender::Male);
        assert!(matches!(leap.resolve(), Err(XuanjiError::Calendar(_))));
    }
}
