// src/models/topic.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quiz scope. The five grammar subtopics a learner can pick from.
///
/// Serialized as the Korean label shown to learners; the short key is
/// accepted as an alias on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "기본 개념", alias = "basics")]
    Basics,
    #[serde(rename = "문장 성분 (주어/목적어/보어)", alias = "roles")]
    Roles,
    #[serde(rename = "전치사의 목적어", alias = "prepositions")]
    Prepositions,
    #[serde(rename = "동명사만 목적어로 취하는 동사", alias = "verbs_gerund_only")]
    VerbsGerundOnly,
    #[serde(rename = "의미가 달라지는 동사", alias = "verbs_diff_meaning")]
    VerbsDiffMeaning,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Basics,
        Topic::Roles,
        Topic::Prepositions,
        Topic::VerbsGerundOnly,
        Topic::VerbsDiffMeaning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Topic::Basics => "기본 개념",
            Topic::Roles => "문장 성분 (주어/목적어/보어)",
            Topic::Prepositions => "전치사의 목적어",
            Topic::VerbsGerundOnly => "동명사만 목적어로 취하는 동사",
            Topic::VerbsDiffMeaning => "의미가 달라지는 동사",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Topic::Basics => "basics",
            Topic::Roles => "roles",
            Topic::Prepositions => "prepositions",
            Topic::VerbsGerundOnly => "verbs_gerund_only",
            Topic::VerbsDiffMeaning => "verbs_diff_meaning",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry of the topic list endpoint.
#[derive(Debug, Serialize)]
pub struct TopicInfo {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<Topic> for TopicInfo {
    fn from(topic: Topic) -> Self {
        Self {
            key: topic.key(),
            label: topic.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_accepts_label_and_key() {
        let by_label: Topic = serde_json::from_str("\"기본 개념\"").unwrap();
        let by_key: Topic = serde_json::from_str("\"basics\"").unwrap();
        assert_eq!(by_label, Topic::Basics);
        assert_eq!(by_key, Topic::Basics);
    }

    #[test]
    fn test_topic_serializes_as_label() {
        let json = serde_json::to_string(&Topic::VerbsDiffMeaning).unwrap();
        assert_eq!(json, "\"의미가 달라지는 동사\"");
    }

    #[test]
    fn test_unknown_topic_rejected() {
        assert!(serde_json::from_str::<Topic>("\"relative clauses\"").is_err());
    }
}
