use crate::inventory::ResolvedInstance;
use crate::{AllyError, Result};

/// Outcome of narrowing the filtered candidates down to the instances an
/// action will run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// No candidate matched the pattern.
    Empty,
    /// The user answered `0` at the prompt; nothing will be dispatched.
    Cancelled,
    Single(ResolvedInstance),
    Multiple(Vec<ResolvedInstance>),
}

/// Line-based terminal port used by the resolver. No raw-mode TTY control.
pub trait Prompt {
    fn say(&mut self, line: &str);
    fn ask(&mut self, message: &str) -> Result<String>;
}

/// Prompt backed by stdout and `dialoguer`.
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn ask(&mut self, message: &str) -> Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(message)
            .interact_text()
            .map_err(|e| AllyError::Prompt(e.to_string()))
    }
}

/// Narrow `candidates` to a concrete target selection.
///
/// A single candidate resolves without prompting. Multiple candidates are
/// enumerated with 1-based indices and the user picks one (`3`), several
/// (`1,3`), or cancels (`0`). Candidates are never mutated; a multi-pick
/// keeps the order the indices were given in.
pub fn resolve(
    candidates: &[ResolvedInstance],
    prompt: &mut dyn Prompt,
) -> Result<TargetSelection> {
    if candidates.is_empty() {
        prompt.say("No instance name matches the pattern");
        return Ok(TargetSelection::Empty);
    }

    if candidates.len() == 1 {
        return Ok(TargetSelection::Single(candidates[0].clone()));
    }

    for (num, instance) in candidates.iter().enumerate() {
        prompt.say(&format!("[{}] {}", num + 1, instance));
    }

    let response =
        prompt.ask("Select instance(s), use commas to select multiple instances (0 to cancel)")?;
    let response = response.trim();

    if response.contains(',') {
        let mut picked = Vec::new();
        for token in response.split(',') {
            let index = parse_index(token.trim(), candidates.len())?;
            if index == 0 {
                return Err(AllyError::InvalidSelection(token.trim().to_string()));
            }
            picked.push(candidates[index - 1].clone());
        }
        return Ok(TargetSelection::Multiple(picked));
    }

    match parse_index(response, candidates.len())? {
        0 => Ok(TargetSelection::Cancelled),
        index => Ok(TargetSelection::Single(candidates[index - 1].clone())),
    }
}

/// Parse a 1-based selection token, bounds-checked against the candidate
/// count. `0` is left to the caller: it means cancel for a bare answer and
/// is invalid inside a comma list.
fn parse_index(token: &str, max: usize) -> Result<usize> {
    let index: usize = token
        .parse()
        .map_err(|_| AllyError::InvalidSelection(token.to_string()))?;

    if index > max {
        return Err(AllyError::InvalidSelection(token.to_string()));
    }

    Ok(index)
}
