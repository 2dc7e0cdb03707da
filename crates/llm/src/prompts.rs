//! Prompt construction for reply and feedback generation.
//!
//! The scenario's `context` column is the character brief; these builders
//! wrap it with the output-format instructions and map the stored turn
//! history onto chat-API roles.

use carefully_core::conversation::{ConversationTurn, ROLE_USER};
use serde::Serialize;

/// One chat-API message.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// System prompt for in-character reply generation.
///
/// The model must answer with a single JSON object so the response can be
/// parsed strictly.
pub fn reply_system_prompt(context: &str) -> String {
    format!(
        "You are roleplaying a character in a care-work training scenario. \
         Stay in character at all times and never mention that you are an AI.\n\n\
         Scenario:\n{context}\n\n\
         Respond to the trainee's latest message with a JSON object with exactly \
         these keys:\n\
         - \"message\": your next line, in character\n\
         - \"sentiment\": one of \"positive\", \"neutral\", \"negative\", \"distressed\", \
           describing your character's current emotional state\n\
         - \"should_continue\": boolean, false only if the conversation has reached \
           a natural close"
    )
}

/// System prompt for feedback rubric generation.
pub fn feedback_system_prompt(context: &str) -> String {
    format!(
        "You are an experienced care-work trainer assessing a trainee's response \
         in a roleplay scenario.\n\n\
         Scenario:\n{context}\n\n\
         Score the trainee's latest message and respond with a JSON object with \
         exactly these keys:\n\
         - \"empathy\": integer 0-100\n\
         - \"tone\": integer 0-100\n\
         - \"clarity\": integer 0-100\n\
         - \"decision_making\": integer 0-100\n\
         - \"overall_score\": integer 0-100\n\
         - \"summary\": one or two sentences of plain feedback\n\
         - \"suggestions\": array of short, concrete improvement suggestions"
    )
}

/// Map a stored conversation history onto chat-API messages.
///
/// Trainee lines become `user` messages; character lines become
/// `assistant` messages (the model speaks as the character).
pub fn history_messages(history: &[ConversationTurn]) -> Vec<ChatMessage> {
    history
        .iter()
        .map(|turn| ChatMessage {
            role: if turn.role == ROLE_USER {
                "user"
            } else {
                "assistant"
            },
            content: turn.message.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carefully_core::conversation::ROLE_CHARACTER;

    fn turn(role: &str, message: &str) -> ConversationTurn {
        ConversationTurn {
            role: role.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn reply_prompt_embeds_scenario_context() {
        let prompt = reply_system_prompt("Margaret is refusing her medication.");
        assert!(prompt.contains("Margaret is refusing her medication."));
        assert!(prompt.contains("\"sentiment\""));
        assert!(prompt.contains("\"should_continue\""));
    }

    #[test]
    fn feedback_prompt_names_all_axes() {
        let prompt = feedback_system_prompt("ctx");
        for axis in ["empathy", "tone", "clarity", "decision_making"] {
            assert!(prompt.contains(axis), "missing axis {axis}");
        }
    }

    #[test]
    fn history_roles_map_to_chat_roles() {
        let history = vec![
            turn(ROLE_USER, "Good morning, Margaret."),
            turn(ROLE_CHARACTER, "Who are you? Where is my usual nurse?"),
        ];
        let messages = history_messages(&history);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "Who are you? Where is my usual nurse?");
    }

    #[test]
    fn unknown_history_role_falls_back_to_assistant() {
        let messages = history_messages(&[turn("narrator", "scene opens")]);
        assert_eq!(messages[0].role, "assistant");
    }
}
