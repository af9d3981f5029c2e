use serde::{Deserialize, Serialize};

/// Tracks token usage for a single LLM call or an entire run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens:  u32,
    pub output_tokens: u32,
    pub total_tokens:  u32,
}

impl TokenUsage {
    pub fn new(input: u32, output: u32) -> Self {
        Self {
            input_tokens:  input,
            output_tokens: output,
            total_tokens:  input + output,
        }
    }

    /// Accumulate usage from another call
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_all_counters() {
        let mut total = TokenUsage::default();
        total.add(TokenUsage::new(100, 20));
        total.add(TokenUsage::new(50, 5));
        assert_eq!(total, TokenUsage { input_tokens: 150, output_tokens: 25, total_tokens: 175 });
    }
}
