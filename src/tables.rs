use crate::actions::ActionTag;
use crate::config::DataConfig;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 随程序打包的默认短语表
const BUNDLED_COMMANDS: &str = include_str!("../data/commands.json");
const BUNDLED_RESPONSES: &str = include_str!("../data/responses.json");

/// 兜底分类的固定标识
pub const FALLBACK_CATEGORY: &str = "fallback";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("读取短语表失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析短语表失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 一条指令：触发短语、回复模板、动作标签
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: String,
    pub phrases: Vec<String>,
    pub response: String,
    pub action: Option<ActionTag>,
}

impl Command {
    /// 任一短语是否包含在（已小写的）输入中
    pub fn matches(&self, normalized: &str) -> bool {
        self.phrases.iter().any(|p| normalized.contains(p.as_str()))
    }
}

/// 对话分类：触发短语与候选回复
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationCategory {
    pub id: String,
    pub phrases: Vec<String>,
    pub replies: Vec<String>,
}

impl ConversationCategory {
    pub fn matches(&self, normalized: &str) -> bool {
        self.phrases.iter().any(|p| normalized.contains(p.as_str()))
    }

    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_CATEGORY
    }
}

#[derive(Deserialize)]
struct CommandDocument {
    #[serde(default)]
    commands: IndexMap<String, CommandEntry>,
}

#[derive(Deserialize)]
struct CommandEntry {
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    response: String,
    #[serde(default)]
    action: String,
}

#[derive(Deserialize)]
struct ResponseDocument {
    #[serde(default)]
    responses: IndexMap<String, CategoryEntry>,
}

#[derive(Deserialize)]
struct CategoryEntry {
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

fn lowercase_phrases(phrases: Vec<String>) -> Vec<String> {
    phrases
        .into_iter()
        .map(|p| p.to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

fn read_document(path: &Path) -> Result<String, TableError> {
    fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// 指令表，保持声明顺序（顺序决定冲突时的优先级）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn from_json(content: &str) -> Result<Self, TableError> {
        let document: CommandDocument = serde_json::from_str(content)?;
        let commands = document
            .commands
            .into_iter()
            .map(|(id, entry)| Command {
                id,
                phrases: lowercase_phrases(entry.phrases),
                response: entry.response,
                action: ActionTag::from_tag(&entry.action),
            })
            .collect();
        Ok(Self { commands })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_json(&read_document(path)?)
    }

    /// 打包的默认指令表，解析失败时退回最小表
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_COMMANDS).unwrap_or_else(|e| {
            log::error!("内置指令表无效: {e}，使用最小指令表");
            Self::minimal()
        })
    }

    /// 最小指令表：只有一条问候指令
    pub fn minimal() -> Self {
        Self::new(vec![Command {
            id: "greeting".to_string(),
            phrases: vec!["hej".to_string()],
            response: "Hej! Jag är {name}.".to_string(),
            action: None,
        }])
    }

    /// 按 id 查找指令
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// 对话分类表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationTable {
    categories: Vec<ConversationCategory>,
}

impl ConversationTable {
    pub fn new(categories: Vec<ConversationCategory>) -> Self {
        Self { categories }
    }

    pub fn from_json(content: &str) -> Result<Self, TableError> {
        let document: ResponseDocument = serde_json::from_str(content)?;
        let categories = document
            .responses
            .into_iter()
            .map(|(id, entry)| ConversationCategory {
                id,
                phrases: lowercase_phrases(entry.phrases),
                replies: entry.responses,
            })
            .collect();
        Ok(Self { categories })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_json(&read_document(path)?)
    }

    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_RESPONSES).unwrap_or_else(|e| {
            log::error!("内置对话表无效: {e}，使用最小对话表");
            Self::minimal()
        })
    }

    /// 最小对话表：问候 + 兜底
    pub fn minimal() -> Self {
        Self::new(vec![
            ConversationCategory {
                id: "greetings".to_string(),
                phrases: vec!["hej".to_string()],
                replies: vec!["Hej!".to_string()],
            },
            ConversationCategory {
                id: FALLBACK_CATEGORY.to_string(),
                phrases: Vec::new(),
                replies: vec!["Jag förstår inte.".to_string()],
            },
        ])
    }

    /// 普通分类（跳过兜底分类），按声明顺序
    pub fn categories(&self) -> impl Iterator<Item = &ConversationCategory> {
        self.categories.iter().filter(|c| !c.is_fallback())
    }

    pub fn fallback(&self) -> Option<&ConversationCategory> {
        self.categories.iter().find(|c| c.is_fallback())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// 启动时加载一次、之后只读的两张表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseTables {
    pub commands: CommandTable,
    pub conversation: ConversationTable,
}

impl PhraseTables {
    pub fn bundled() -> Self {
        Self {
            commands: CommandTable::bundled(),
            conversation: ConversationTable::bundled(),
        }
    }

    pub fn minimal() -> Self {
        Self {
            commands: CommandTable::minimal(),
            conversation: ConversationTable::minimal(),
        }
    }

    /// 按配置加载；任何失败都记录日志并退回最小表，不会返回错误
    pub fn load(data: &DataConfig) -> Self {
        let commands = match &data.commands {
            Some(path) => CommandTable::load(path).unwrap_or_else(|e| {
                log::error!("加载指令表失败: {e}，使用最小指令表");
                CommandTable::minimal()
            }),
            None => CommandTable::bundled(),
        };
        let conversation = match &data.responses {
            Some(path) => ConversationTable::load(path).unwrap_or_else(|e| {
                log::error!("加载对话表失败: {e}，使用最小对话表");
                ConversationTable::minimal()
            }),
            None => ConversationTable::bundled(),
        };
        log::info!(
            "已加载 {} 条指令, {} 个对话分类",
            commands.len(),
            conversation.len()
        );
        Self {
            commands,
            conversation,
        }
    }
}
