use poise::serenity_prelude::UserId;
use thiserror::Error;
use time::{
    format_description::well_known::Iso8601, macros::format_description, Date, OffsetDateTime,
};

use crate::models::{
    types::UtcDateTime, AnnouncementId, AnnouncementKind, AnnouncementTarget, CarpoolEntry, GameId,
    RegistrationId, Role, RoleId,
};

pub trait DBConvertible: Sized {
    type DBType;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError>;

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError>;
}

#[derive(Debug, Error)]
pub enum DBFromConversionError {
    #[error("Failed to parse datetime: {0}")]
    DateTime(#[from] time::error::Parse),
    #[error("Failed to parse enum variant: {0}")]
    NoSuchVariant(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(i64),
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DBToConversionError {
    #[error("Failed to format datetime")]
    DateTime(#[from] time::error::Format),
    #[error("Number too large: {0}")]
    InvalidNumber(u64),
    #[error("Failed to serialize JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

impl DBConvertible for UtcDateTime {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        let string = OffsetDateTime::from(*self).format(&Iso8601::DEFAULT)?;
        Ok(string)
    }

    fn from_db(db_value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        let datetime = OffsetDateTime::parse(db_value, &Iso8601::DEFAULT)?;
        Ok(UtcDateTime::from(datetime))
    }
}

/// Stored as `YYYY-MM-DD`, so dates compare correctly as text.
impl DBConvertible for Date {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.format(DATE_FORMAT)?)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(Date::parse(value, DATE_FORMAT)?)
    }
}

fn id_to_db(id: u64) -> Result<i64, DBToConversionError> {
    i64::try_from(id).map_err(|_| DBToConversionError::InvalidNumber(id))
}

fn id_from_db(value: i64) -> Result<u64, DBFromConversionError> {
    u64::try_from(value).map_err(|_| DBFromConversionError::InvalidNumber(value))
}

impl DBConvertible for GameId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        id_to_db(self.0)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(GameId(id_from_db(*value)?))
    }
}

impl DBConvertible for RegistrationId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        id_to_db(self.0)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(RegistrationId(id_from_db(*value)?))
    }
}

impl DBConvertible for AnnouncementId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        id_to_db(self.0)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(AnnouncementId(id_from_db(*value)?))
    }
}

impl DBConvertible for RoleId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.0 as _)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        u32::try_from(*value)
            .map(RoleId)
            .map_err(|_| DBFromConversionError::InvalidNumber(*value))
    }
}

impl DBConvertible for UserId {
    type DBType = i64;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        id_to_db(self.get())
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        match id_from_db(*value)? {
            0 => Err(DBFromConversionError::InvalidNumber(0)),
            id => Ok(UserId::new(id)),
        }
    }
}

impl DBConvertible for AnnouncementKind {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.as_ref().to_string())
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        AnnouncementKind::from_db_name(value)
            .ok_or_else(|| DBFromConversionError::NoSuchVariant(value.clone()))
    }
}

impl DBConvertible for AnnouncementTarget {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(self.as_ref().to_string())
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        AnnouncementTarget::from_db_name(value)
            .ok_or_else(|| DBFromConversionError::NoSuchVariant(value.clone()))
    }
}

/// Roles are kept as one JSON document per game.
impl DBConvertible for Vec<Role> {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(serde_json::from_str(value)?)
    }
}

impl DBConvertible for Vec<CarpoolEntry> {
    type DBType = String;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(serde_json::from_str(value)?)
    }
}

impl<T: DBConvertible> DBConvertible for Option<T> {
    type DBType = Option<T::DBType>;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        self.as_ref().map(T::to_db).transpose()
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        value.as_ref().map(T::from_db).transpose()
    }
}
