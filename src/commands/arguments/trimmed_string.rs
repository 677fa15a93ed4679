use std::{convert::Infallible, fmt::Display, str::FromStr};

/// A string that has no leading or trailing whitespaces.
///
/// Implemented `From*` traits trim the strings.
#[derive(Debug)]
pub struct TrimmedString(String);

impl TrimmedString {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for TrimmedString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TrimmedString::from(s))
    }
}

impl From<String> for TrimmedString {
    fn from(value: String) -> Self {
        TrimmedString::from(value.as_str())
    }
}

impl From<&str> for TrimmedString {
    fn from(value: &str) -> Self {
        TrimmedString(value.trim().to_owned())
    }
}

impl From<TrimmedString> for String {
    fn from(value: TrimmedString) -> Self {
        value.0
    }
}

impl Display for TrimmedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrimmedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::arguments::trimmed_string::TrimmedString;

    #[test]
    fn trimmed() {
        assert_eq!(TrimmedString::from("Marie et Paul").as_ref(), "Marie et Paul");
    }

    #[test]
    fn untrimmed() {
        assert_eq!(
            TrimmedString::from("  Marie  \t et Paul   ").as_ref(),
            "Marie  \t et Paul"
        );
    }

    #[test]
    fn blank_is_empty() {
        assert!(TrimmedString::from(" \t ").is_empty());
    }
}
