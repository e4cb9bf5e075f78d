//! Playback commands the tray and the action socket can send to the player page.
//!
//! The string form is the wire identity: it is the tray menu id, the socket payload, and the
//! event name the page registers its listener under.

/// A user-initiated playback action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    PlayPause,
    PlayNext,
    PlayPrevious,
    Like,
}

impl PlayerCommand {
    pub const ALL: [PlayerCommand; 4] = [
        PlayerCommand::PlayPause,
        PlayerCommand::PlayNext,
        PlayerCommand::PlayPrevious,
        PlayerCommand::Like,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayPause => "play-pause",
            Self::PlayNext => "play-next",
            Self::PlayPrevious => "play-previous",
            Self::Like => "like",
        }
    }

    /// Parses a command identifier. Accepts surrounding whitespace and underscores so
    /// `headset action play_next` works from shell scripts.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "play-pause" => Some(Self::PlayPause),
            "play-next" | "next" => Some(Self::PlayNext),
            "play-previous" | "previous" => Some(Self::PlayPrevious),
            "like" => Some(Self::Like),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_strings() {
        let names: Vec<&str> = PlayerCommand::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["play-pause", "play-next", "play-previous", "like"]);
    }

    #[test]
    fn test_parse_accepts_every_identifier() {
        for command in PlayerCommand::ALL {
            assert_eq!(PlayerCommand::parse(command.as_str()), Some(command));
        }
    }

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(
            PlayerCommand::parse("  PLAY_NEXT\n"),
            Some(PlayerCommand::PlayNext)
        );
        assert_eq!(
            PlayerCommand::parse("previous"),
            Some(PlayerCommand::PlayPrevious)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(PlayerCommand::parse(""), None);
        assert_eq!(PlayerCommand::parse("stop"), None);
        assert_eq!(PlayerCommand::parse("like'); alert(1); //"), None);
    }
}
