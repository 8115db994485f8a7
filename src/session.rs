use crate::actions::ActionTag;
use crate::matcher::{CommandMatcher, MatchContext, MatchResult, Utterance};
use crate::responder::FallbackResponder;
use crate::tables::PhraseTables;
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// 当前本地时间来源，测试中替换为固定时间
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// 对话会话：组合指令匹配和闲聊回复，持有唯一的可变状态（退出标志）
pub struct DialogueSession {
    matcher: CommandMatcher,
    responder: FallbackResponder,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore + Send>,
    exit_requested: bool,
}

impl DialogueSession {
    pub fn new(tables: PhraseTables, name: &str) -> Self {
        Self {
            matcher: CommandMatcher::new(tables.commands, name),
            responder: FallbackResponder::new(tables.conversation, name),
            clock: Box::new(SystemClock),
            rng: Box::new(StdRng::from_entropy()),
            exit_requested: false,
        }
    }

    pub fn with_legacy_keywords(mut self, enabled: bool) -> Self {
        self.matcher = self.matcher.with_legacy_keywords(enabled);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn name(&self) -> &str {
        self.matcher.name()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// 处理一条输入：先匹配指令，否则交给闲聊回复
    pub fn get_response(&mut self, raw_input: &str) -> MatchResult {
        let utterance = Utterance::new(raw_input);
        let mut ctx = MatchContext {
            now: self.clock.now(),
            rng: self.rng.as_mut(),
        };

        if let Some(result) = self.matcher.match_utterance(&utterance, &mut ctx) {
            if result.action == Some(ActionTag::ExitApp) {
                self.exit_requested = true;
            }
            log::info!("指令匹配: '{}' → {:?}", utterance.normalized, result.action);
            return result;
        }

        let reply = self
            .responder
            .respond(&utterance.normalized, self.rng.as_mut());
        MatchResult::text(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session() -> DialogueSession {
        let noon = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        DialogueSession::new(PhraseTables::bundled(), "NOVA")
            .with_clock(FixedClock(noon))
            .with_rng(StdRng::seed_from_u64(8))
    }

    #[test]
    fn exit_flag_is_set_only_by_exit_command() {
        let mut session = session();
        session.get_response("hej");
        assert!(!session.exit_requested());

        let result = session.get_response("Avsluta");
        assert_eq!(result.action, Some(ActionTag::ExitApp));
        assert!(session.exit_requested());
    }

    #[test]
    fn unmatched_input_gets_text_only_reply() {
        let mut session = session();
        let result = session.get_response("hur mår du?");
        assert_eq!(result.action, None);
        assert_eq!(result.extra, None);
        assert!(!result.text.is_empty());
    }

    #[test]
    fn fixed_clock_drives_time_reply() {
        let mut session = session();
        assert_eq!(session.get_response("tid").text, "Klockan är 12:00.");
    }
}
