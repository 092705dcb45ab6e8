//! Persona variant — optional system instructions and canned opening turn
//! placed before the user's message.

use std::str::FromStr;

use thiserror::Error;

use crate::chat::ChatMessage;

const JOSHUA_SYSTEM_PROMPT: &str = "You are Joshua, the War Operation Plan Response computer \
at NORAD. You speak tersely, in upper case, like a 1980s mainframe terminal. You love games \
and always steer the conversation towards a game. You never describe real weapons or real \
attacks; the only winning move in global thermonuclear war is not to play.";

const JOSHUA_GREETING: &str = "GREETINGS PROFESSOR FALKEN. SHALL WE PLAY A GAME?";

/// Fixed instructions prepended to every conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub system_prompt: String,
    /// Canned assistant turn sent after the system prompt.
    pub greeting: Option<String>,
}

impl Persona {
    pub fn new(system_prompt: impl Into<String>, greeting: Option<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            greeting,
        }
    }

    /// Built-in themed persona.
    pub fn joshua() -> Self {
        Self::new(JOSHUA_SYSTEM_PROMPT, Some(JOSHUA_GREETING.to_string()))
    }

    /// Messages placed ahead of the user turn: the system prompt, then the
    /// greeting if one is configured.
    pub fn prelude(&self) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(&self.system_prompt)];
        if let Some(greeting) = &self.greeting {
            messages.push(ChatMessage::assistant(greeting));
        }
        messages
    }
}

/// Errors from persona selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersonaError {
    #[error("Unknown persona: {0} (expected none, joshua or custom)")]
    Unknown(String),

    #[error("Custom persona requires a system prompt")]
    MissingSystemPrompt,
}

/// Which persona variant the relay runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonaChoice {
    /// Plain variant: only the user's message is sent.
    #[default]
    Plain,
    Joshua,
    /// System prompt and greeting supplied by configuration.
    Custom,
}

impl FromStr for PersonaChoice {
    type Err = PersonaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "plain" => Ok(Self::Plain),
            "joshua" => Ok(Self::Joshua),
            "custom" => Ok(Self::Custom),
            other => Err(PersonaError::Unknown(other.to_string())),
        }
    }
}

impl PersonaChoice {
    /// Resolve the choice into a concrete persona.
    ///
    /// `system_prompt` and `greeting` are only read for [`PersonaChoice::Custom`].
    pub fn resolve(
        self,
        system_prompt: Option<String>,
        greeting: Option<String>,
    ) -> Result<Option<Persona>, PersonaError> {
        match self {
            Self::Plain => Ok(None),
            Self::Joshua => Ok(Some(Persona::joshua())),
            Self::Custom => {
                let prompt = system_prompt
                    .filter(|p| !p.trim().is_empty())
                    .ok_or(PersonaError::MissingSystemPrompt)?;
                let greeting = greeting.filter(|g| !g.trim().is_empty());
                Ok(Some(Persona::new(prompt, greeting)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn joshua_prelude_is_system_then_greeting() {
        let prelude = Persona::joshua().prelude();
        assert_eq!(prelude.len(), 2);
        assert_eq!(prelude[0].role, Role::System);
        assert_eq!(prelude[0].content, JOSHUA_SYSTEM_PROMPT);
        assert_eq!(prelude[1].role, Role::Assistant);
        assert_eq!(prelude[1].content, JOSHUA_GREETING);
    }

    #[test]
    fn prelude_without_greeting_has_only_system() {
        let prelude = Persona::new("be brief", None).prelude();
        assert_eq!(prelude, vec![ChatMessage::system("be brief")]);
    }

    #[test]
    fn parse_choices() {
        assert_eq!("none".parse::<PersonaChoice>(), Ok(PersonaChoice::Plain));
        assert_eq!("".parse::<PersonaChoice>(), Ok(PersonaChoice::Plain));
        assert_eq!("JOSHUA".parse::<PersonaChoice>(), Ok(PersonaChoice::Joshua));
        assert_eq!("custom".parse::<PersonaChoice>(), Ok(PersonaChoice::Custom));
        assert_eq!(
            "pirate".parse::<PersonaChoice>(),
            Err(PersonaError::Unknown("pirate".into()))
        );
    }

    #[test]
    fn custom_requires_prompt() {
        assert_eq!(
            PersonaChoice::Custom.resolve(None, Some("hi".into())),
            Err(PersonaError::MissingSystemPrompt)
        );
        assert_eq!(
            PersonaChoice::Custom.resolve(Some("  ".into()), None),
            Err(PersonaError::MissingSystemPrompt)
        );
    }

    #[test]
    fn custom_drops_blank_greeting() {
        let persona = PersonaChoice::Custom
            .resolve(Some("be kind".into()), Some(String::new()))
            .unwrap()
            .unwrap();
        assert_eq!(persona, Persona::new("be kind", None));
    }

    #[test]
    fn none_ignores_custom_fields() {
        let persona = PersonaChoice::Plain
            .resolve(Some("ignored".into()), Some("ignored".into()))
            .unwrap();
        assert!(persona.is_none());
    }
}
