//! Control commands received over the serial link

/// Token that increments the walk counter
pub const WALK_TOKEN: &str = "WALK++";

/// Token that increments the run counter
pub const RUN_TOKEN: &str = "RUN++";

/// Token that clears both counters
pub const RESET_TOKEN: &str = "RESET";

/// Errors from command parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Empty line
    Empty,
    /// Token is not part of the vocabulary
    Unknown,
}

/// Commands understood by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Count one walking step
    IncrementWalk,
    /// Count one running step
    IncrementRun,
    /// Clear both counters
    Reset,
}

impl Command {
    /// Match a received token against the vocabulary
    ///
    /// Matching is exact and case sensitive; surrounding whitespace is not
    /// stripped.
    pub fn parse(token: &[u8]) -> Result<Self, CommandError> {
        if token.is_empty() {
            return Err(CommandError::Empty);
        }

        match token {
            t if t == WALK_TOKEN.as_bytes() => Ok(Command::IncrementWalk),
            t if t == RUN_TOKEN.as_bytes() => Ok(Command::IncrementRun),
            t if t == RESET_TOKEN.as_bytes() => Ok(Command::Reset),
            _ => Err(CommandError::Unknown),
        }
    }

    /// Wire token for this command
    pub fn token(self) -> &'static str {
        match self {
            Command::IncrementWalk => WALK_TOKEN,
            Command::IncrementRun => RUN_TOKEN,
            Command::Reset => RESET_TOKEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary() {
        assert_eq!(Command::parse(b"WALK++"), Ok(Command::IncrementWalk));
        assert_eq!(Command::parse(b"RUN++"), Ok(Command::IncrementRun));
        assert_eq!(Command::parse(b"RESET"), Ok(Command::Reset));
    }

    #[test]
    fn test_token_matches_parse() {
        for cmd in [Command::IncrementWalk, Command::IncrementRun, Command::Reset] {
            assert_eq!(Command::parse(cmd.token().as_bytes()), Ok(cmd));
        }
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(Command::parse(b"walk++"), Err(CommandError::Unknown));
        assert_eq!(Command::parse(b"WALK++ "), Err(CommandError::Unknown));
        assert_eq!(Command::parse(b"WALK+"), Err(CommandError::Unknown));
        assert_eq!(Command::parse(b"RUN++RUN++"), Err(CommandError::Unknown));
    }

    #[test]
    fn test_empty() {
        assert_eq!(Command::parse(b""), Err(CommandError::Empty));
    }
}
