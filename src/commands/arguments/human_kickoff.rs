use std::str::FromStr;

use lazy_regex::regex_captures;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::{commands::CommandError, utils::french_dates::season_year};

const EXAMPLE_1: &str = "14/12/2024 15h00";
const EXAMPLE_2: &str = "2024-12-14 15:00";
const EXAMPLE_3: &str = "14/12 9h30";

fn invalid_argument(message: String) -> CommandError {
    super::invalid_argument(format!(
        "{message}\nExemples : `{EXAMPLE_1}`, `{EXAMPLE_2}`, `{EXAMPLE_3}`."
    ))
}

/// Kickoff typed by an admin, in club local time. The year may be left out.
#[derive(PartialEq, Eq, Debug)]
pub struct HumanKickoff {
    day: u8,
    month: Month,
    year: Option<i32>,
    time: Time,
}

impl FromStr for HumanKickoff {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut date: Option<(u8, Month, Option<i32>)> = None;
        let mut time = None;

        for token in s.split_whitespace() {
            let parsed_date = if let Some((_, year, month, day)) =
                regex_captures!(r"^(\d{4})-(\d{2})-(\d{2})$", token)
            {
                Some((day, month, year))
            } else {
                regex_captures!(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}))?$", token)
                    .map(|(_, day, month, year)| (day, month, year))
            };

            if let Some((day, month, year)) = parsed_date {
                if date.is_some() {
                    return Err(invalid_argument(format!("Date en double : `{token}`.")));
                }

                let day = day
                    .parse()
                    .map_err(|_| invalid_argument(format!("Jour invalide : `{day}`.")))?;
                let month = month
                    .parse::<u8>()
                    .ok()
                    .and_then(|month| Month::try_from(month).ok())
                    .ok_or_else(|| invalid_argument(format!("Mois invalide : `{month}`.")))?;
                let year = if year.is_empty() {
                    None
                } else {
                    Some(
                        year.parse()
                            .map_err(|_| invalid_argument(format!("Année invalide : `{year}`.")))?,
                    )
                };

                date = Some((day, month, year));
            } else if let Some((_, hour, minute)) =
                regex_captures!(r"^(\d{1,2})[hH:](\d{2})?$", token)
            {
                if time.is_some() {
                    return Err(invalid_argument(format!("Heure en double : `{token}`.")));
                }

                let hour = hour
                    .parse()
                    .map_err(|_| invalid_argument(format!("Heure invalide : `{hour}`.")))?;
                let minute = if minute.is_empty() {
                    0
                } else {
                    minute
                        .parse()
                        .map_err(|_| invalid_argument(format!("Minute invalide : `{minute}`.")))?
                };

                time = Some(
                    Time::from_hms(hour, minute, 0)
                        .map_err(|_| invalid_argument(format!("Heure invalide : `{token}`.")))?,
                );
            } else {
                return Err(invalid_argument(format!("Je ne comprends pas `{token}`.")));
            }
        }

        match (date, time) {
            (Some((day, month, year)), Some(time)) => Ok(HumanKickoff {
                day,
                month,
                year,
                time,
            }),
            (None, _) => Err(invalid_argument("La date est manquante.".to_string())),
            (_, None) => Err(invalid_argument("L'heure est manquante.".to_string())),
        }
    }
}

impl HumanKickoff {
    /// Fills in the year from the season containing `today` and checks the day exists.
    pub fn materialize(&self, today: Date) -> Result<PrimitiveDateTime, CommandError> {
        let year = self
            .year
            .unwrap_or_else(|| season_year(self.month, today));

        let date = Date::from_calendar_date(year, self.month, self.day).map_err(|_| {
            invalid_argument(format!(
                "Cette date n'existe pas : {}/{}/{year}.",
                self.day, self.month as u8
            ))
        })?;

        Ok(PrimitiveDateTime::new(date, self.time))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use time::macros::{date, datetime};

    use super::{HumanKickoff, EXAMPLE_1, EXAMPLE_2, EXAMPLE_3};

    const TODAY: time::Date = date!(2024 - 11 - 20);

    #[test]
    fn example_1() {
        assert_eq!(
            HumanKickoff::from_str(EXAMPLE_1)
                .unwrap()
                .materialize(TODAY)
                .unwrap(),
            datetime!(2024-12-14 15:00)
        );
    }

    #[test]
    fn example_2() {
        assert_eq!(
            HumanKickoff::from_str(EXAMPLE_2)
                .unwrap()
                .materialize(TODAY)
                .unwrap(),
            datetime!(2024-12-14 15:00)
        );
    }

    #[test]
    fn example_3_uses_the_season() {
        assert_eq!(
            HumanKickoff::from_str(EXAMPLE_3)
                .unwrap()
                .materialize(TODAY)
                .unwrap(),
            datetime!(2024-12-14 09:30)
        );
        assert_eq!(
            HumanKickoff::from_str("8/2 10h")
                .unwrap()
                .materialize(TODAY)
                .unwrap(),
            datetime!(2025-02-08 10:00)
        );
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(
            HumanKickoff::from_str("15:00 14/12/2024").unwrap(),
            HumanKickoff::from_str(EXAMPLE_1).unwrap()
        );
    }

    #[test]
    fn missing_parts() {
        assert!(HumanKickoff::from_str("14/12/2024").is_err());
        assert!(HumanKickoff::from_str("15h00").is_err());
        assert!(HumanKickoff::from_str("").is_err());
    }

    #[test]
    fn duplicates_and_garbage() {
        assert!(HumanKickoff::from_str("14/12 15/12 15h").is_err());
        assert!(HumanKickoff::from_str("14/12 15h 16h").is_err());
        assert!(HumanKickoff::from_str("samedi 15h").is_err());
        assert!(HumanKickoff::from_str("14/13 15h").is_err());
        assert!(HumanKickoff::from_str("14/12 25h00").is_err());
    }

    #[test]
    fn impossible_day() {
        assert!(HumanKickoff::from_str("31/02 15h")
            .unwrap()
            .materialize(TODAY)
            .is_err());
    }
}
