use std::io::{BufRead, Write};

// Line-oriented console seam. The validator only ever sees whole lines with
// the terminator stripped, so it can be driven by a script in tests.
pub trait Console {
    fn prompt(&mut self, text: &str) -> anyhow::Result<String>;
    fn print(&mut self, text: &str);
}

pub struct StdConsole;

impl Console for StdConsole {
    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        let mut out = std::io::stdout();
        out.write_all(text.as_bytes())?;
        out.flush()?; // prompt has no newline, force it out before blocking
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn print(&mut self, text: &str) {
        println!("{text}");
    }
}

// Replays queued answers and records everything printed, for validator and
// scheduler tests.
#[cfg(test)]
pub struct ScriptedConsole {
    answers: std::collections::VecDeque<String>,
    pub printed: Vec<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            printed: Vec::new(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        self.prompts.push(text.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of answers"))
    }

    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }
}
