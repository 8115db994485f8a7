pub mod actions;
pub mod config;
pub mod console;
pub mod extract;
pub mod legacy;
pub mod matcher;
pub mod responder;
pub mod session;
pub mod system_actions;
pub mod tables;

use config::{load_config, load_config_from, AppConfig};
use console::{Console, ConsoleOptions};
use session::DialogueSession;
use std::io;
use std::path::PathBuf;
use system_actions::SystemActions;
use tables::PhraseTables;

/// 命令行传入的运行选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub name: Option<String>,
    pub json: bool,
    pub dry_run: bool,
    pub no_legacy: bool,
    /// 有内容时只回答这一条消息
    pub message: Option<String>,
}

pub fn run(options: RunOptions) -> io::Result<()> {
    env_logger::init();

    let loaded = match &options.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let config = loaded.unwrap_or_else(|e| {
        log::error!("加载配置失败: {e}，使用默认配置");
        AppConfig::default()
    });

    let tables = PhraseTables::load(&config.data);
    let name = options
        .name
        .clone()
        .unwrap_or_else(|| config.assistant.name.clone());
    let legacy = config.assistant.legacy_keywords && !options.no_legacy;
    let mut session = DialogueSession::new(tables, &name).with_legacy_keywords(legacy);

    let mut actions = SystemActions::new(config.applications.clone());
    let actions = if options.dry_run {
        None
    } else {
        Some(&mut actions)
    };

    let stdin = io::stdin();
    let console_options = ConsoleOptions {
        prompt: config.console.prompt.clone(),
        banner: config.console.banner,
        json: options.json,
    };
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), console_options);

    match options.message.as_deref() {
        Some(message) => {
            console.answer(&mut session, message, actions)?;
        }
        None => {
            log::info!("{name} 已启动");
            console.run(&mut session, actions)?;
        }
    }
    Ok(())
}
