//! Brazilian national holiday calendar.
//!
//! Covers the fixed national holidays plus the moveable ones derived from
//! Easter Sunday: Carnival Monday and Tuesday, Good Friday, and Corpus
//! Christi. Holiday sets are computed per year on first use and cached.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Minimum year supported by the calendar.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the calendar.
pub const MAX_YEAR: i32 = 2100;

/// Fixed national holidays as (month, day).
const FIXED_HOLIDAYS: &[(u32, u32)] = &[
    (1, 1),   // Confraternização Universal
    (4, 21),  // Tiradentes
    (5, 1),   // Dia do Trabalho
    (9, 7),   // Independência
    (10, 12), // Nossa Senhora Aparecida
    (11, 2),  // Finados
    (11, 15), // Proclamação da República
    (12, 25), // Natal
];

/// Consciência Negra became a national holiday in 2024 (Lei 14.759).
const CONSCIENCIA_NEGRA_FROM: i32 = 2024;

/// Moveable holidays as day offsets from Easter Sunday.
const EASTER_OFFSETS: &[i64] = &[
    -48, // Carnival Monday
    -47, // Carnival Tuesday
    -2,  // Good Friday
    60,  // Corpus Christi
];

/// Static shared calendar instance.
static BRAZIL_CALENDAR: Lazy<BrazilCalendar> = Lazy::new(BrazilCalendar::new);

/// Brazilian national holiday calendar.
///
/// ## Holidays
///
/// Fixed: New Year, Tiradentes, Labour Day, Independence Day, Nossa
/// Senhora Aparecida, Finados, Proclamation of the Republic, Christmas,
/// and (from 2024) Consciência Negra.
///
/// Moveable (from Easter Sunday): Carnival Monday (-48), Carnival
/// Tuesday (-47), Good Friday (-2), Corpus Christi (+60).
///
/// Holiday sets are generated per year via [`BrazilCalendar::holidays_for`]
/// and cached; the cache is the only interior mutability in the engine.
#[derive(Debug, Default)]
pub struct BrazilCalendar {
    cache: RwLock<HashMap<i32, Arc<BTreeSet<Date>>>>,
}

impl BrazilCalendar {
    /// Creates a new calendar with an empty year cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the shared global instance.
    pub fn global() -> &'static BrazilCalendar {
        &BRAZIL_CALENDAR
    }

    /// Builds the holiday set for one year.
    fn build_year(year: i32) -> CoreResult<BTreeSet<Date>> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(CoreError::unsupported_year(year, MIN_YEAR, MAX_YEAR));
        }

        let mut holidays = BTreeSet::new();

        for &(month, day) in FIXED_HOLIDAYS {
            holidays.insert(Date::from_ymd(year, month, day)?);
        }
        if year >= CONSCIENCIA_NEGRA_FROM {
            holidays.insert(Date::from_ymd(year, 11, 20)?);
        }

        let easter = Date::from(easter_sunday(year));
        for &offset in EASTER_OFFSETS {
            holidays.insert(easter.add_days(offset));
        }

        Ok(holidays)
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &'static str {
        "Brazil"
    }

    /// A date outside the supported year range is classified by weekend
    /// only; use [`Calendar::holidays_for`] to surface the range violation.
    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }
        match self.holidays_for(date.year()) {
            Ok(holidays) => !holidays.contains(&date),
            Err(_) => true,
        }
    }

    fn holidays_for(&self, year: i32) -> CoreResult<Arc<BTreeSet<Date>>> {
        if let Some(cached) = self.cache.read().get(&year) {
            return Ok(Arc::clone(cached));
        }

        let built = Arc::new(Self::build_year(year)?);
        self.cache.write().insert(year, Arc::clone(&built));
        Ok(built)
    }
}

/// Calculates Easter Sunday using the anonymous Gregorian (Gauss/Butcher-Meeus)
/// algorithm. Integer arithmetic only.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("computus always yields a valid March or April date")
}
