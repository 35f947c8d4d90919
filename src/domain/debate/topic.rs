//! Debate topics and the built-in topic catalog.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{TopicId, ValidationError};

/// Maximum length for a topic title.
pub const MAX_TOPIC_TITLE_LENGTH: usize = 200;

const DEFAULT_CUSTOM_DESCRIPTION: &str = "Custom debate topic";
const DEFAULT_CUSTOM_CATEGORY: &str = "General";

/// How hard the opponent should push back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the lowercase name used in prompts and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::invalid_format(
                "difficulty",
                format!("expected easy, medium or hard, got '{}'", other),
            )),
        }
    }
}

/// The proposition being debated. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    difficulty: Difficulty,
    category: String,
}

impl Topic {
    /// Creates a topic with an explicit id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `TooLong` if the title exceeds [`MAX_TOPIC_TITLE_LENGTH`]
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = Self::validate_title(title.into())?;
        Ok(Self {
            id,
            title,
            description: description.into(),
            difficulty,
            category: category.into(),
        })
    }

    /// Creates a user-defined topic with a generated id.
    ///
    /// Blank descriptions and categories fall back to generic defaults.
    pub fn custom(
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into().trim().to_string();
        let category = category.into().trim().to_string();
        let id = TopicId::new(format!("custom-{}", TopicId::generate()))?;

        Self::new(
            id,
            title,
            if description.is_empty() {
                DEFAULT_CUSTOM_DESCRIPTION.to_string()
            } else {
                description
            },
            difficulty,
            if category.is_empty() {
                DEFAULT_CUSTOM_CATEGORY.to_string()
            } else {
                category
            },
        )
    }

    pub fn id(&self) -> &TopicId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    fn validate_title(title: String) -> Result<String, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let length = trimmed.chars().count();
        if length > MAX_TOPIC_TITLE_LENGTH {
            return Err(ValidationError::too_long(
                "title",
                MAX_TOPIC_TITLE_LENGTH,
                length,
            ));
        }
        Ok(trimmed.to_string())
    }
}

// (id, title, description, difficulty, category)
const BUILT_IN_TOPICS: [(&str, &str, &str, Difficulty, &str); 6] = [
    (
        "1",
        "AI will replace most human jobs",
        "Debate the impact of artificial intelligence on the future job market",
        Difficulty::Medium,
        "Technology",
    ),
    (
        "2",
        "Social media does more harm than good",
        "Argue about the overall impact of social media platforms on society",
        Difficulty::Easy,
        "Society",
    ),
    (
        "3",
        "Climate change requires immediate global action",
        "Discuss the urgency and necessity of coordinated climate responses",
        Difficulty::Medium,
        "Environment",
    ),
    (
        "4",
        "Universal basic income is necessary",
        "Debate the economic feasibility and social implications of UBI",
        Difficulty::Hard,
        "Economics",
    ),
    (
        "5",
        "Space exploration should be prioritized",
        "Argue about funding priorities for space programs vs Earth issues",
        Difficulty::Medium,
        "Science",
    ),
    (
        "6",
        "Privacy is more important than security",
        "Debate the balance between personal privacy and national security",
        Difficulty::Hard,
        "Ethics",
    ),
];

static CATALOG: Lazy<Vec<Topic>> = Lazy::new(|| {
    BUILT_IN_TOPICS
        .iter()
        .filter_map(|(id, title, description, difficulty, category)| {
            let id = TopicId::new(*id).ok()?;
            Topic::new(id, *title, *description, *difficulty, *category).ok()
        })
        .collect()
});

/// Returns the built-in topics in display order.
pub fn catalog() -> &'static [Topic] {
    &CATALOG
}

/// Looks up a built-in topic by id.
pub fn find_topic(id: &str) -> Option<&'static Topic> {
    CATALOG.iter().find(|topic| topic.id().as_str() == id)
}
