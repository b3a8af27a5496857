use chat_core::InputCollaborator;

/// The query and email fields, fed from stdin lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    query: String,
    email: String,
}

impl LineInput {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }
}

impl InputCollaborator for LineInput {
    fn read_query(&self) -> String {
        self.query.clone()
    }

    fn read_email(&self) -> String {
        self.email.clone()
    }

    fn clear_query(&mut self) {
        self.query.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// Anything that is not a command; Enter submits it.
    Query(String),
    /// `/email addr` sets the field, bare `/email` clears it.
    Email(String),
    Quit,
}

pub fn parse_line(line: &str) -> InputLine {
    let trimmed = line.trim();
    if trimmed == "/quit" {
        return InputLine::Quit;
    }
    if trimmed == "/email" {
        return InputLine::Email(String::new());
    }
    if let Some(rest) = trimmed.strip_prefix("/email ") {
        return InputLine::Email(rest.trim().to_string());
    }
    InputLine::Query(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(
            parse_line("  best running shoes\n"),
            InputLine::Query("  best running shoes".to_string())
        );
        assert_eq!(parse_line(""), InputLine::Query(String::new()));
    }

    #[test]
    fn commands_are_recognised() {
        assert_eq!(parse_line("/quit"), InputLine::Quit);
        assert_eq!(
            parse_line("/email  me@example.com "),
            InputLine::Email("me@example.com".to_string())
        );
        assert_eq!(parse_line("/email"), InputLine::Email(String::new()));
        assert_eq!(
            parse_line("/emailing"),
            InputLine::Query("/emailing".to_string())
        );
    }

    #[test]
    fn clear_query_keeps_email() {
        let mut input = LineInput::default();
        input.set_query("q");
        input.set_email("me@example.com");
        input.clear_query();

        assert_eq!(input.read_query(), "");
        assert_eq!(input.read_email(), "me@example.com");
    }
}
