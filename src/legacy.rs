//! 旧版硬编码的瑞典语关键词表，只在指令表没有命中时才查询

use crate::actions::ActionTag;
use crate::matcher::{MatchContext, MatchResult};

/// 关键词 → 动作，按顺序匹配；"avaktivera röst" 必须排在 "aktivera röst" 之前
///
/// 这一顺序有意与旧版映射不同：旧版中 "avaktivera röst" 会被 "aktivera röst" 抢先命中
const KEYWORDS: &[(&str, ActionTag)] = &[
    ("tid", ActionTag::ShowTime),
    ("datum", ActionTag::ShowDate),
    ("tärning", ActionTag::RollDice),
    ("hjälp", ActionTag::ShowHelp),
    ("slumpa tal", ActionTag::RandomNumber),
    ("avsluta", ActionTag::ExitApp),
    ("rensa chatten", ActionTag::ClearChat),
    ("avaktivera röst", ActionTag::DeactivateVoice),
    ("aktivera röst", ActionTag::ActivateVoice),
];

pub fn match_keyword(normalized: &str, ctx: &mut MatchContext<'_>) -> Option<MatchResult> {
    let (_, action) = KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))?;
    let text = action.builtin_reply(ctx.now, &mut *ctx.rng)?;
    Some(MatchResult {
        action: Some(action.clone()),
        text,
        extra: None,
    })
}
