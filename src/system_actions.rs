use crate::actions::ActionTag;
use crate::matcher::MatchResult;
use std::collections::HashMap;
use std::io;
use std::process::Command;

const BROWSER_HOME: &str = "https://www.google.com";

/// 打开网址、启动进程的底层原语，测试中替换为记录调用的实现
pub trait Launcher {
    fn open_url(&self, url: &str) -> io::Result<()>;
    fn spawn(&self, program: &str, args: &[&str]) -> io::Result<()>;
}

/// 使用系统默认浏览器和 `std::process::Command`
pub struct DesktopLauncher;

impl Launcher for DesktopLauncher {
    fn open_url(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }

    fn spawn(&self, program: &str, args: &[&str]) -> io::Result<()> {
        Command::new(program).args(args).spawn().map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Unsupported,
        }
    }

    /// 常用应用名 → 可执行文件
    fn known_executable(self, app: &str) -> Option<&'static str> {
        match self {
            Self::Windows => match app {
                "kalkylator" | "kalkylatorn" | "calculator" => Some("calc.exe"),
                "notepad" | "anteckningar" => Some("notepad.exe"),
                "filutforskaren" | "utforskaren" => Some("explorer.exe"),
                "paint" | "ritprogrammet" => Some("mspaint.exe"),
                "word" => Some("winword.exe"),
                "excel" => Some("excel.exe"),
                "powerpoint" => Some("powerpnt.exe"),
                "outlook" => Some("outlook.exe"),
                _ => None,
            },
            Self::MacOs => match app {
                "kalkylator" | "kalkylatorn" | "calculator" => Some("Calculator.app"),
                "anteckningar" => Some("Notes.app"),
                "utforskaren" => Some("Finder.app"),
                "safari" => Some("Safari.app"),
                "terminalen" => Some("Terminal.app"),
                "inställningar" => Some("System Preferences.app"),
                _ => None,
            },
            Self::Linux => match app {
                "kalkylator" | "kalkylatorn" | "calculator" => Some("gnome-calculator"),
                "anteckningar" => Some("gedit"),
                "utforskaren" => Some("nautilus"),
                "terminal" | "terminalen" => Some("gnome-terminal"),
                "inställningar" => Some("gnome-control-center"),
                _ => None,
            },
            Self::Unsupported => None,
        }
    }
}

/// 需要展示层处理的效果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    ClearTranscript,
    Exit,
}

/// 动作执行结果，失败也只是状态，不会向上抛错
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStatus {
    pub success: bool,
    pub message: String,
    pub effect: Option<UiEffect>,
}

impl ActionStatus {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            effect: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            effect: None,
        }
    }

    fn with_effect(mut self, effect: UiEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// 补全协议前缀：已有 http(s) 原样保留，否则去掉开头的 "www." 并加 https://
pub fn normalize_url(website: &str) -> String {
    if website.starts_with("http://") || website.starts_with("https://") {
        return website.to_string();
    }
    let host = website.strip_prefix("www.").unwrap_or(website);
    format!("https://{host}")
}

/// 执行匹配结果中的动作（打开网页、启动应用、语音开关等）
pub struct SystemActions<L: Launcher = DesktopLauncher> {
    launcher: L,
    platform: Platform,
    overrides: HashMap<String, String>,
    voice_enabled: bool,
}

impl SystemActions<DesktopLauncher> {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self::with_launcher(DesktopLauncher, Platform::current(), overrides)
    }
}

impl<L: Launcher> SystemActions<L> {
    pub fn with_launcher(
        launcher: L,
        platform: Platform,
        overrides: HashMap<String, String>,
    ) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(name, exe)| (name.to_lowercase(), exe))
            .collect();
        Self {
            launcher,
            platform,
            overrides,
            voice_enabled: false,
        }
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    #[cfg(test)]
    pub(crate) fn launcher(&self) -> &L {
        &self.launcher
    }

    /// 结果没有动作时返回 `None`
    pub fn execute(&mut self, result: &MatchResult) -> Option<ActionStatus> {
        let action = result.action.as_ref()?;
        let status = match action {
            ActionTag::OpenWebsite => match result.website() {
                Some(website) => self.open_website(website),
                None => ActionStatus::failed("Ingen webbplats angiven."),
            },
            ActionTag::OpenApplication => match result.app_name() {
                Some(app) => self.open_application(app),
                None => ActionStatus::failed("Ingen applikation angiven."),
            },
            ActionTag::OpenBrowser => match self.launcher.open_url(BROWSER_HOME) {
                Ok(()) => ActionStatus::ok("Webbläsaren öppnades framgångsrikt."),
                Err(e) => {
                    log::error!("打开浏览器失败: {e}");
                    ActionStatus::failed(format!("Kunde inte öppna webbläsaren: {e}"))
                }
            },
            ActionTag::ActivateVoice => {
                self.voice_enabled = true;
                log::info!("语音模式已开启");
                ActionStatus::ok("Röststyrning är aktiverad.")
            }
            ActionTag::DeactivateVoice => {
                self.voice_enabled = false;
                log::info!("语音模式已关闭");
                ActionStatus::ok("Röststyrning är deaktiverad.")
            }
            ActionTag::ClearChat => {
                ActionStatus::ok("Chathistoriken rensades.").with_effect(UiEffect::ClearTranscript)
            }
            ActionTag::ExitApp => ActionStatus::ok("Förbereder för att avsluta programmet.")
                .with_effect(UiEffect::Exit),
            ActionTag::ShowTime
            | ActionTag::ShowDate
            | ActionTag::RollDice
            | ActionTag::RandomNumber
            | ActionTag::ShowHelp => ActionStatus::ok(""),
            ActionTag::Other(tag) => {
                log::warn!("未知动作 '{tag}'，只显示文本");
                ActionStatus::ok("")
            }
        };
        Some(status)
    }

    fn open_website(&self, website: &str) -> ActionStatus {
        let url = normalize_url(website);
        match self.launcher.open_url(&url) {
            Ok(()) => {
                log::info!("已打开网址: {url}");
                ActionStatus::ok(format!("Öppnade {url} framgångsrikt."))
            }
            Err(e) => {
                log::error!("打开网址 {url} 失败: {e}");
                ActionStatus::failed(format!("Kunde inte öppna webbplatsen {url}: {e}"))
            }
        }
    }

    fn open_application(&self, app: &str) -> ActionStatus {
        let app = app.to_lowercase();
        if self.platform == Platform::Unsupported {
            log::error!("不支持的操作系统: {}", std::env::consts::OS);
            return ActionStatus::failed(format!(
                "Operativsystemet {} stöds inte.",
                std::env::consts::OS
            ));
        }

        let executable = self
            .overrides
            .get(&app)
            .map(String::as_str)
            .or_else(|| self.platform.known_executable(&app));

        let (spawned, message) = match executable {
            Some(exe) => {
                let spawned = if self.platform == Platform::MacOs && exe.ends_with(".app") {
                    self.launcher.spawn("open", &["-a", exe])
                } else {
                    self.launcher.spawn(exe, &[])
                };
                (spawned, format!("Applikationen {app} öppnades framgångsrikt."))
            }
            None => {
                log::warn!("未知应用 '{app}'，尝试直接启动");
                (
                    self.launcher.spawn(&app, &[]),
                    format!("Applikationen {app} öppnades direkt."),
                )
            }
        };

        match spawned {
            Ok(()) => ActionStatus::ok(message),
            Err(e) => {
                log::error!("启动应用 {app} 失败: {e}");
                ActionStatus::failed(format!("Kunde inte öppna applikationen {app}: {e}"))
            }
        }
    }
}
