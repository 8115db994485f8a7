use crate::matcher::MatchResult;
use crate::session::DialogueSession;
use crate::system_actions::{Launcher, SystemActions, UiEffect};
use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RULE: &str = "==================================================";

/// 文本界面选项
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub prompt: String,
    pub banner: bool,
    /// 每条回复输出一行 JSON，而不是 "NAME: text"
    pub json: bool,
}

/// 行式文本界面：读取输入、显示回复、执行动作
pub struct Console<R, W> {
    input: R,
    output: W,
    options: ConsoleOptions,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, options: ConsoleOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    /// 运行到退出指令或输入结束；`actions` 为 `None` 时只显示不执行
    pub fn run<L: Launcher>(
        &mut self,
        session: &mut DialogueSession,
        mut actions: Option<&mut SystemActions<L>>,
    ) -> io::Result<()> {
        if self.options.banner && !self.options.json {
            self.print_banner(session.name())?;
        }

        let mut line = String::new();
        loop {
            if !self.options.json {
                write!(self.output, "{}", self.options.prompt)?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                log::debug!("输入结束");
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let result = session.get_response(&line);
            self.display(session.name(), &result)?;

            let effect = match actions.as_deref_mut() {
                Some(actions) => self.apply(session.name(), actions, &result)?,
                None => None,
            };

            if session.exit_requested() || effect == Some(UiEffect::Exit) {
                break;
            }
        }
        Ok(())
    }

    /// 一次性模式：回答一条消息
    pub fn answer<L: Launcher>(
        &mut self,
        session: &mut DialogueSession,
        message: &str,
        actions: Option<&mut SystemActions<L>>,
    ) -> io::Result<MatchResult> {
        let result = session.get_response(message);
        self.display(session.name(), &result)?;
        if let Some(actions) = actions {
            self.apply(session.name(), actions, &result)?;
        }
        Ok(result)
    }

    fn print_banner(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(
            self.output,
            "Välkommen till {name} - Din personliga chatbot"
        )?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Skriv 'hjälp' för att se tillgängliga kommandon.")?;
        writeln!(self.output, "Skriv 'avsluta' för att avsluta programmet.")?;
        writeln!(self.output, "{RULE}")
    }

    fn display(&mut self, name: &str, result: &MatchResult) -> io::Result<()> {
        if self.options.json {
            let json = serde_json::to_string(result).map_err(io::Error::other)?;
            writeln!(self.output, "{json}")
        } else {
            writeln!(self.output, "\n{name}: {}\n", result.text)
        }
    }

    fn apply<L: Launcher>(
        &mut self,
        name: &str,
        actions: &mut SystemActions<L>,
        result: &MatchResult,
    ) -> io::Result<Option<UiEffect>> {
        let Some(status) = actions.execute(result) else {
            return Ok(None);
        };
        if !status.success {
            log::warn!("动作执行失败: {}", status.message);
            if !self.options.json {
                writeln!(self.output, "{name}: {}\n", status.message)?;
            }
        } else if !status.message.is_empty() {
            log::info!("{}", status.message);
        }

        if status.effect == Some(UiEffect::ClearTranscript) && !self.options.json {
            write!(self.output, "{CLEAR_SCREEN}")?;
            if self.options.banner {
                self.print_banner(name)?;
            }
        }
        Ok(status.effect)
    }
}
