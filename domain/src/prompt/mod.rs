//! Prompt templates for the questioner and oracle backends.

use crate::game::candidate::Candidate;
use crate::game::round::Exchange;

/// Templates for every prompt the backends see
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the questioner, enumerating the full candidate list.
    pub fn questioner_system(candidates: &[Candidate]) -> String {
        let names: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
        format!(
            r#"You are playing a guess-the-character game. Possible characters are: {}.
Ask yes/no questions to identify the character. You are in a competition with
other players. Try to guess the character in the least number of questions possible.
Ask exactly one question per turn. When you are confident you know the answer,
reply with a single line of the form:
FINAL GUESS: <character name exactly as listed>"#,
            names.join(", ")
        )
    }

    /// User prompt asking the questioner for its next question.
    pub fn questioner_turn() -> &'static str {
        "Ask your next yes/no question (or make your final guess)."
    }

    /// System prompt for the oracle.
    pub fn oracle_system() -> &'static str {
        r#"You are a reasoning oracle. Evaluate whether the target character fits the question.
If the question is a direct guess of the character and correct, respond with <answer>successful_guess</answer>.
If incorrect guess, respond with <answer>no</answer>.
For yes/no questions, think step by step and respond with <answer>yes</answer> or <answer>no</answer>."#
    }

    /// User prompt putting one question/candidate pair to the oracle.
    pub fn oracle_query(question: &str, candidate: &Candidate) -> String {
        format!(
            "Question to evaluate: {}\nTarget character: {}\nAfter reasoning, output only one of: <answer>yes</answer>, <answer>no</answer>, or <answer>successful_guess</answer>.",
            question,
            candidate.name()
        )
    }

    /// Replay history as alternating assistant/user turns for the questioner.
    ///
    /// Returns `(role, content)` pairs in conversation order.
    pub fn history_messages(history: &[Exchange]) -> Vec<(&'static str, String)> {
        let mut messages = Vec::with_capacity(history.len() * 2);
        for exchange in history {
            messages.push(("assistant", exchange.question.clone()));
            messages.push(("user", exchange.answer.to_string()));
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::answer::OracleReply;

    #[test]
    fn test_questioner_system_lists_candidates() {
        let candidates = vec![Candidate::new("Ada Lovelace"), Candidate::new("Steve Jobs")];
        let prompt = PromptTemplate::questioner_system(&candidates);
        assert!(prompt.contains("Ada Lovelace, Steve Jobs"));
        assert!(prompt.contains("FINAL GUESS:"));
    }

    #[test]
    fn test_oracle_query_names_candidate() {
        let prompt = PromptTemplate::oracle_query("Is this person male?", &Candidate::new("Marie Curie"));
        assert!(prompt.contains("Is this person male?"));
        assert!(prompt.contains("Marie Curie"));
    }

    #[test]
    fn test_history_alternates_roles() {
        let history = vec![
            Exchange::new("Is this person male?", OracleReply::Yes),
            Exchange::new("Is this person alive?", OracleReply::No),
        ];
        let messages = PromptTemplate::history_messages(&history);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], ("assistant", "Is this person male?".to_string()));
        assert_eq!(messages[1], ("user", "yes".to_string()));
        assert_eq!(messages[3], ("user", "no".to_string()));
    }
}
