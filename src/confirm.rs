use std::io::{self, BufRead, Write};

use log::error;

/// 是/否确认
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// 从标准输入读取确认，开启自动确认时直接返回true
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm {
    pub autoconfirm: bool,
}

impl StdinConfirm {
    pub fn new(autoconfirm: bool) -> Self {
        StdinConfirm { autoconfirm }
    }

    /// 反复提问直到读到y或n，输入结束视为否
    pub fn ask<R: BufRead, W: Write>(&self, prompt: &str, input: &mut R, output: &mut W) -> bool {
        loop {
            let _ = writeln!(output, "{} (y/n)", prompt);
            let _ = output.flush();
            if self.autoconfirm {
                return true;
            }

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    error!("标准输入已关闭，按否处理");
                    return false;
                }
                Ok(_) => {}
                Err(e) => {
                    error!("读取确认输入失败: {}", e);
                    return false;
                }
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case("y") {
                return true;
            }
            if answer.eq_ignore_ascii_case("n") {
                return false;
            }
        }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.ask(prompt, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// 固定应答，不读取任何输入
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
