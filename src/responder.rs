use crate::tables::ConversationTable;
use rand::seq::SliceRandom;
use rand::RngCore;

/// 没有兜底分类（或兜底为空）时的固定回复
pub const DEFAULT_REPLY: &str = "Jag förstår inte riktigt. Kan du förklara på ett annat sätt?";

/// 闲聊回复：没有指令命中时按对话分类随机作答
pub struct FallbackResponder {
    table: ConversationTable,
    name: String,
}

impl FallbackResponder {
    pub fn new(table: ConversationTable, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    /// `input` 应当已经小写并去掉首尾空白
    pub fn respond(&self, input: &str, rng: &mut dyn RngCore) -> String {
        let matched = self
            .table
            .categories()
            .filter(|c| !c.replies.is_empty())
            .find(|c| c.matches(input));
        if let Some(category) = matched {
            log::debug!("对话分类命中: {}", category.id);
            if let Some(reply) = category.replies.choose(rng) {
                return self.substitute_name(reply);
            }
        }

        self.table
            .fallback()
            .and_then(|fallback| fallback.replies.choose(rng))
            .map(|reply| self.substitute_name(reply))
            .filter(|reply| !reply.is_empty())
            .unwrap_or_else(|| DEFAULT_REPLY.to_string())
    }

    fn substitute_name(&self, reply: &str) -> String {
        reply.replace("{name}", &self.name)
    }
}
