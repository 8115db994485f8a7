use crate::actions::ActionTag;
use crate::extract::{extract_application, extract_website};
use crate::legacy;
use crate::tables::{Command, CommandTable};
use chrono::NaiveDateTime;
use rand::RngCore;
use serde::Serialize;
use std::collections::BTreeMap;

pub const WEBSITE_KEY: &str = "website";
pub const APP_NAME_KEY: &str = "app_name";

const OPEN_WEBSITE: &str = "open_website";
const OPEN_APPLICATION: &str = "open_application";

/// 一次输入的匹配结果，调用方立即消费，不做持久化
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub action: Option<ActionTag>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, String>>,
}

impl MatchResult {
    /// 纯文本回复，没有动作
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            action: None,
            text: text.into(),
            extra: None,
        }
    }

    pub fn website(&self) -> Option<&str> {
        self.extra_value(WEBSITE_KEY)
    }

    pub fn app_name(&self) -> Option<&str> {
        self.extra_value(APP_NAME_KEY)
    }

    fn extra_value(&self, key: &str) -> Option<&str> {
        self.extra.as_ref()?.get(key).map(String::as_str)
    }
}

/// 去掉首尾空白后的输入，以及用于比较的小写形式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub raw: String,
    pub normalized: String,
}

impl Utterance {
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_string();
        let normalized = raw.to_lowercase();
        Self { raw, normalized }
    }
}

/// 匹配时需要的外部输入：当前本地时间和随机源
pub struct MatchContext<'a> {
    pub now: NaiveDateTime,
    pub rng: &'a mut dyn RngCore,
}

/// 指令匹配器：子串匹配 + 网站/应用参数提取
pub struct CommandMatcher {
    commands: CommandTable,
    name: String,
    legacy_keywords: bool,
}

impl CommandMatcher {
    pub fn new(commands: CommandTable, name: impl Into<String>) -> Self {
        Self {
            commands,
            name: name.into(),
            legacy_keywords: false,
        }
    }

    /// 是否在指令表都不匹配时查询旧的硬编码关键词
    pub fn with_legacy_keywords(mut self, enabled: bool) -> Self {
        self.legacy_keywords = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn match_text(&self, input: &str, ctx: &mut MatchContext<'_>) -> Option<MatchResult> {
        self.match_utterance(&Utterance::new(input), ctx)
    }

    pub fn match_utterance(
        &self,
        utterance: &Utterance,
        ctx: &mut MatchContext<'_>,
    ) -> Option<MatchResult> {
        let text = utterance.normalized.as_str();
        if text.is_empty() {
            return None;
        }
        log::debug!("搜索指令: '{text}'");

        if let Some(result) = self.match_website(utterance) {
            return Some(result);
        }
        if let Some(result) = self.match_application(utterance) {
            return Some(result);
        }

        let generic = self
            .commands
            .iter()
            .filter(|c| c.id != OPEN_WEBSITE && c.id != OPEN_APPLICATION)
            .find(|c| c.matches(text));
        if let Some(command) = generic {
            return Some(self.respond(command, ctx));
        }

        if self.legacy_keywords {
            if let Some(result) = legacy::match_keyword(text, ctx) {
                log::debug!("旧关键词命中: {:?}", result.action);
                return Some(result);
            }
        }

        log::debug!("没有匹配的指令");
        None
    }

    fn match_website(&self, utterance: &Utterance) -> Option<MatchResult> {
        let command = self.commands.get(OPEN_WEBSITE)?;
        if !command.matches(&utterance.normalized) {
            return None;
        }
        let website = extract_website(&utterance.raw)?;
        let text = self
            .substitute_name(&command.response)
            .replace("{website}", &website);
        Some(MatchResult {
            action: Some(ActionTag::OpenWebsite),
            text,
            extra: Some(BTreeMap::from([(WEBSITE_KEY.to_string(), website)])),
        })
    }

    fn match_application(&self, utterance: &Utterance) -> Option<MatchResult> {
        let command = self.commands.get(OPEN_APPLICATION)?;
        if !command.matches(&utterance.normalized) {
            return None;
        }
        let app = extract_application(&utterance.raw)?;
        let text = self.substitute_name(&command.response).replace("{app}", &app);
        Some(MatchResult {
            action: Some(ActionTag::OpenApplication),
            text,
            extra: Some(BTreeMap::from([(APP_NAME_KEY.to_string(), app)])),
        })
    }

    fn respond(&self, command: &Command, ctx: &mut MatchContext<'_>) -> MatchResult {
        let mut text = self.substitute_name(&command.response);
        if text.contains("{time}") {
            text = text.replace("{time}", &ctx.now.format("%H:%M").to_string());
        }

        let builtin = command
            .action
            .as_ref()
            .and_then(|action| action.builtin_reply(ctx.now, &mut *ctx.rng))
            .filter(|reply| !reply.is_empty());
        if let Some(reply) = builtin {
            text = reply;
        }

        if command.action == Some(ActionTag::ExitApp) {
            log::info!("识别到退出指令，程序即将结束");
        }

        MatchResult {
            action: command.action.clone(),
            text,
            extra: None,
        }
    }

    fn substitute_name(&self, template: &str) -> String {
        template.replace("{name}", &self.name)
    }
}
