//! Splitting a feed `place` string into an offset phrase and a primary location.

/// Offset shown when the place text has no directional prefix.
pub const GENERIC_OFFSET: &str = "Near the";

const DELIMITER: &str = " of ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationParts {
    /// e.g. `"5km NW of"`
    pub offset: String,
    /// e.g. `"Springfield"`
    pub primary: String,
}

/// Split at the first `" of "`; without one the whole text is the primary location.
pub fn split_location(location: &str) -> LocationParts {
    match location.split_once(DELIMITER) {
        Some((offset, primary)) => LocationParts {
            offset: format!("{offset} of"),
            primary: primary.to_string(),
        },
        None => LocationParts {
            offset: GENERIC_OFFSET.to_string(),
            primary: location.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_directional_prefix() {
        let parts = split_location("5km NW of Springfield");
        assert_eq!(parts.offset, "5km NW of");
        assert_eq!(parts.primary, "Springfield");
    }

    #[test]
    fn plain_place_gets_generic_offset() {
        let parts = split_location("Springfield");
        assert_eq!(parts.offset, GENERIC_OFFSET);
        assert_eq!(parts.primary, "Springfield");
    }

    #[test]
    fn splits_at_first_delimiter_only() {
        let parts = split_location("74km S of Isle of Man");
        assert_eq!(parts.offset, "74km S of");
        assert_eq!(parts.primary, "Isle of Man");
    }

    #[test]
    fn of_without_spaces_is_not_a_delimiter() {
        let parts = split_location("Gulf of");
        assert_eq!(parts.offset, GENERIC_OFFSET);
        assert_eq!(parts.primary, "Gulf of");
    }

    #[test]
    fn empty_place() {
        let parts = split_location("");
        assert_eq!(parts.offset, GENERIC_OFFSET);
        assert_eq!(parts.primary, "");
    }
}
