mod types;

pub use types::*;

use crate::config::PromptConfig;

/// Flattens a transcript into the single text prompt the model completes.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Renders the system block, one labelled line per non-blank turn and a
    /// trailing assistant cue. Any role other than `user` is labelled as the
    /// assistant.
    pub fn build(&self, turns: &[ChatTurn]) -> String {
        let mut parts = Vec::with_capacity(turns.len() + 2);
        parts.push(format!(
            "{}\n{}\n",
            self.config.system_header, self.config.system_prompt
        ));

        for turn in turns {
            let content = turn.content.trim();
            if content.is_empty() {
                continue;
            }
            let label = if turn.is_user() {
                &self.config.user_label
            } else {
                &self.config.assistant_label
            };
            parts.push(format!("{label}: {content}"));
        }

        parts.push(format!("{}:", self.config.assistant_label));
        parts.join("\n")
    }
}

/// Builds a prompt with the default instructions and labels.
pub fn build_prompt(turns: &[ChatTurn]) -> String {
    PromptBuilder::default().build(turns)
}
