//! Prompt templates for the three generation call sites.

use pipeline::{ChatMessage, Topic};

/// Separates the generated questions from the human's answer in `details`.
pub const DETAILS_SEPARATOR: &str = "\nUser supplement: ";

pub const SYSTEM_PROMPT: &str = "You are a research assistant.";

/// Default language the report is written in.
pub const DEFAULT_REPORT_LANGUAGE: &str = "English";

pub fn clarifying_questions(topic: &Topic) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "The user wants to research \"{topic}\". List 3-5 key details you need to \
             know before starting (for example the research goal, angle, or time range)."
        )),
    ]
}

/// The text shown to the human while the run waits for their answer.
pub fn supplement_prompt(questions: &str) -> String {
    format!("{questions}\n\nPlease enter any additional research details: ")
}

pub fn search_keywords(topic: &Topic, details: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "Based on the research topic \"{topic}\" and the supplementary details \"{details}\", \
         generate 3-5 English keywords suitable for an academic search. \
         Reply with the keywords only."
    ))]
}

pub fn report(topic: &Topic, details: &str, results: &[String], language: &str) -> Vec<ChatMessage> {
    let results = results.join("\n");
    vec![ChatMessage::user(format!(
        "Write a short research report based on the following information.\n\
         \n\
         Topic: {topic}\n\
         Details: {details}\n\
         Search results:\n\
         {results}\n\
         \n\
         Requirements:\n\
         - Write in concise, logically structured {language}\n\
         - Summarise the current state of research, trends, and potential directions\n"
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::ChatRole;

    fn topic() -> Topic {
        Topic::new("quantum error correction").unwrap()
    }

    #[test]
    fn test_clarifying_questions_has_system_then_user() {
        let messages = clarifying_questions(&topic());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert!(messages[1].content.contains("\"quantum error correction\""));
    }

    #[test]
    fn test_report_prompt_lists_results_one_per_line() {
        let results = vec!["A - https://a".to_string(), "B - https://b".to_string()];
        let messages = report(&topic(), "details", &results, "German");
        assert_eq!(messages.len(), 1);
        let content = &messages[0].content;
        assert!(content.contains("Search results:\nA - https://a\nB - https://b\n"));
        assert!(content.contains("structured German"));
    }

    #[test]
    fn test_supplement_prompt_shows_questions() {
        let prompt = supplement_prompt("1. Which hardware?");
        assert!(prompt.starts_with("1. Which hardware?\n\n"));
    }
}
