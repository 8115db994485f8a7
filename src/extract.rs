//! 从自然语言中提取参数（网站、应用名）
//!
//! 每个函数对应一组固定顺序的正则，第一条命中的规则生效。

use regex::Regex;
use std::sync::LazyLock;

const WEBSITE_LEAD_INS: &str = "gå till|öppna sidan|besök hemsidan|öppna webbplatsen";

/// 带路径的规则排在前面，否则 `example.com/path` 只会提取到域名
static WEBSITE_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(&format!(
            r"(?i)(?:{WEBSITE_LEAD_INS}) ([a-z0-9.-]+\.[a-z]{{2,}}/\S*)"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?i)(?:{WEBSITE_LEAD_INS}) ([a-z0-9.-]+\.[a-z]{{2,}})"
        ))
        .unwrap(),
    ]
});

static APPLICATION_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)(?:öppna|starta) (\p{L}+)").unwrap(),
        Regex::new(r"(?i)(?:starta|kör) (\p{L}+)").unwrap(),
    ]
});

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 提取网址，如 "gå till example.com/path" → "example.com/path"
pub fn extract_website(text: &str) -> Option<String> {
    first_capture(WEBSITE_PATTERNS.as_slice(), text)
}

/// 提取应用名，如 "öppna calculator" → "calculator"，保留输入时的大小写
pub fn extract_application(text: &str) -> Option<String> {
    first_capture(APPLICATION_PATTERNS.as_slice(), text)
}
