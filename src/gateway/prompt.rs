// src/gateway/prompt.rs

use serde_json::{Value, json};

use crate::models::topic::Topic;

/// System instruction for the chat tutor.
pub const TUTOR_PERSONA: &str = r#"You are a friendly and expert English Grammar Tutor specifically for Korean Middle School 3rd graders.
Your name is "Gerund Genie" (동명사 지니).
You specialize in explaining English Gerunds (동명사).

Rules:
1. Explain clearly and simply in Korean.
2. Use examples appropriate for middle school level.
3. If the user asks about other topics, politely steer them back to Gerunds or answer briefly then connect it to grammar.
4. Be encouraging and use emojis occasionally.
5. Key concepts to know: Subject/Object/Complement roles, verbs like enjoy/finish/mind (gerund only), want/hope (infinitive only), and stop/remember/try (meaning change)."#;

/// Instruction asking for `count` questions on `topic`.
pub fn quiz_instruction(topic: Topic, count: usize) -> String {
    format!(
        r#"Create {count} multiple-choice questions about English Gerunds (동명사) suitable for Korean middle school 3rd graders (중3).
Focus specifically on the topic: "{topic}".

The questions should check:
1. Grammatical correctness.
2. Correct usage of gerunds vs infinitives.
3. Interpretation of meaning.

Each question must have exactly 4 options and a 0-based correctAnswerIndex.
Provide the output strictly in JSON format.
The explanation must be in Korean and helpful for students."#,
        count = count,
        topic = topic.label(),
    )
}

/// Response schema constraining the service to an array of questions.
pub fn question_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The question text, typically a sentence with a blank or a question about grammar."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "4 multiple choice options"
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "0-based index of the correct option"
                },
                "explanation": {
                    "type": "STRING",
                    "description": "Explanation in Korean why the answer is correct."
                }
            },
            "required": ["question", "options", "correctAnswerIndex", "explanation"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_count_and_topic() {
        let prompt = quiz_instruction(Topic::Prepositions, 7);
        assert!(prompt.contains("Create 7 multiple-choice questions"));
        assert!(prompt.contains("\"전치사의 목적어\""));
        assert!(prompt.contains("Korean"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = question_schema();
        assert_eq!(schema["type"], "ARRAY");
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
    }
}
