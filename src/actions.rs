use chrono::NaiveDateTime;
use rand::{Rng, RngCore};
use serde::{Serialize, Serializer};
use std::fmt;

/// 指令动作标签（封闭集合），未知标签保留为 `Other`，只返回文本
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionTag {
    ShowTime,
    ShowDate,
    RollDice,
    RandomNumber,
    ShowHelp,
    ExitApp,
    OpenWebsite,
    OpenApplication,
    OpenBrowser,
    ActivateVoice,
    DeactivateVoice,
    ClearChat,
    Other(String),
}

const HELP_TEXT: &str = "Här är några kommandon du kan använda:\n\
- 'tid' för att se aktuell tid\n\
- 'datum' för att se dagens datum\n\
- 'tärning' för att slå en tärning\n\
- 'slumpa tal' för att få ett slumpmässigt tal\n\
- 'gå till [webbsida]' för att öppna en webbplats\n\
- 'öppna [app]' för att starta en applikation\n\
- 'rensa chatten' för att rensa chathistoriken\n\
- 'aktivera röst'/'avaktivera röst' för att hantera röstläge\n\
- 'avsluta' för att avsluta programmet";

impl ActionTag {
    /// 从配置中的字符串解析，空字符串表示没有动作
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let action = match tag {
            "" => return None,
            "show_time" => Self::ShowTime,
            "show_date" => Self::ShowDate,
            "roll_dice" => Self::RollDice,
            "random_number" => Self::RandomNumber,
            "show_help" => Self::ShowHelp,
            "exit_app" => Self::ExitApp,
            "open_website" => Self::OpenWebsite,
            "open_application" => Self::OpenApplication,
            "open_browser" => Self::OpenBrowser,
            "activate_voice" => Self::ActivateVoice,
            "deactivate_voice" => Self::DeactivateVoice,
            "clear_chat" => Self::ClearChat,
            other => Self::Other(other.to_string()),
        };
        Some(action)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ShowTime => "show_time",
            Self::ShowDate => "show_date",
            Self::RollDice => "roll_dice",
            Self::RandomNumber => "random_number",
            Self::ShowHelp => "show_help",
            Self::ExitApp => "exit_app",
            Self::OpenWebsite => "open_website",
            Self::OpenApplication => "open_application",
            Self::OpenBrowser => "open_browser",
            Self::ActivateVoice => "activate_voice",
            Self::DeactivateVoice => "deactivate_voice",
            Self::ClearChat => "clear_chat",
            Self::Other(tag) => tag,
        }
    }

    /// 无参内置回复；返回 `None` 时使用模板文本
    pub fn builtin_reply(&self, now: NaiveDateTime, rng: &mut dyn RngCore) -> Option<String> {
        let reply = match self {
            Self::ShowTime => format!("Klockan är {}.", now.format("%H:%M")),
            Self::ShowDate => format!("Dagens datum är {}.", now.format("%Y-%m-%d")),
            Self::RollDice => format!("Jag slog en tärning och fick: {}", rng.gen_range(1..=6)),
            Self::RandomNumber => {
                format!("Här är ett slumpmässigt tal: {}", rng.gen_range(1..=100))
            }
            Self::ShowHelp => HELP_TEXT.to_string(),
            Self::ExitApp => "Avslutar programmet. Hej då!".to_string(),
            Self::ActivateVoice => "Röststyrning aktiverad.".to_string(),
            Self::DeactivateVoice => "Röststyrning deaktiverad.".to_string(),
            Self::ClearChat => "Chatten har rensats.".to_string(),
            Self::OpenWebsite | Self::OpenApplication | Self::OpenBrowser | Self::Other(_) => {
                return None
            }
        };
        Some(reply)
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
