use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Accept whatever default the prompt offers.
    Default,
    Int(u64),
    Float(f64),
    Pick(String),
    Yes,
    No,
}

/// Replays a fixed list of answers. Once the script runs out every prompt
/// takes its default.
#[derive(Default)]
pub struct ScriptedDriver {
    script: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            script: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Titles of every prompt shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }

    fn next(&self, title: &str) -> Answer {
        self.asked.borrow_mut().push(title.to_string());
        self.script.borrow_mut().pop_front().unwrap_or(Answer::Default)
    }
}

fn in_bounds<T: PartialOrd + std::fmt::Display>(
    title: &str,
    v: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<T> {
    if let Some(lo) = min
        && v < lo
    {
        bail!("{title}: {v} is below {lo}");
    }
    if let Some(hi) = max
        && v > hi
    {
        bail!("{title}: {v} is above {hi}");
    }
    Ok(v)
}

impl PromptDriver for ScriptedDriver {
    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        match self.next(title) {
            Answer::Default => Ok(default),
            Answer::Int(v) => in_bounds(title, v, min, max),
            other => Err(anyhow!("{title}: expected a whole number, script had {other:?}")),
        }
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        match self.next(title) {
            Answer::Default => Ok(default),
            Answer::Float(v) => in_bounds(title, v, min, max),
            Answer::Int(v) => in_bounds(title, v as f64, min, max),
            other => Err(anyhow!("{title}: expected a number, script had {other:?}")),
        }
    }

    fn ask_select(
        &self,
        title: &str,
        _help: &str,
        options: &[String],
        start: usize,
    ) -> Result<String> {
        match self.next(title) {
            Answer::Default => options
                .get(start)
                .cloned()
                .ok_or_else(|| anyhow!("{title}: no option at {start}")),
            Answer::Pick(s) if options.contains(&s) => Ok(s),
            Answer::Pick(s) => bail!("{title}: '{s}' is not one of {options:?}"),
            other => Err(anyhow!("{title}: expected a selection, script had {other:?}")),
        }
    }

    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title) {
            Answer::Default => Ok(default),
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            other => Err(anyhow!("{title}: expected yes/no, script had {other:?}")),
        }
    }
}
