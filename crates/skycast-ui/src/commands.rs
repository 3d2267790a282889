//! Terminal input commands.

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for a place by name. The text is passed through untrimmed so
    /// blank input reaches the validation step.
    Search(String),
    /// Use the device position.
    Locate,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Type a city name to see its weather.
  /here   weather at your configured location
  /help   show this message
  /quit   exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(name) = trimmed.strip_prefix('/') {
            return match name.to_ascii_lowercase().as_str() {
                "here" | "locate" => Self::Locate,
                "help" | "?" => Self::Help,
                "quit" | "exit" | "q" => Self::Quit,
                _ => Self::Unknown(trimmed.to_string()),
            };
        }
        Self::Search(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            Command::parse("São Paulo\n"),
            Command::Search("São Paulo".into())
        );
    }

    #[test]
    fn test_blank_line_is_still_a_search() {
        assert_eq!(Command::parse("\n"), Command::Search(String::new()));
        assert_eq!(Command::parse("   "), Command::Search("   ".into()));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(Command::parse("/here"), Command::Locate);
        assert_eq!(Command::parse(" /LOCATE "), Command::Locate);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit\r\n"), Command::Quit);
        assert_eq!(Command::parse("/help"), Command::Help);
        assert_eq!(Command::parse("/weather"), Command::Unknown("/weather".into()));
    }
}
