//! Prompt construction for each generation phase.
//!
//! Prompts are plain strings built from the topic and a slice of the
//! transcript. Nothing here touches the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use super::{DebateError, DebatePhase, Speaker, Topic, Turn};

/// Number of most recent turns included in a rebuttal prompt.
pub const REBUTTAL_WINDOW: usize = 4;

/// Which kind of text the generation backend is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPhase {
    Opening,
    Rebuttal,
    ClosingAnalysis,
}

impl PromptPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptPhase::Opening => "opening",
            PromptPhase::Rebuttal => "rebuttal",
            PromptPhase::ClosingAnalysis => "closing_analysis",
        }
    }

    /// Suggested completion budget for this phase.
    pub fn max_tokens(&self) -> u32 {
        match self {
            PromptPhase::Opening => 500,
            PromptPhase::Rebuttal => 600,
            PromptPhase::ClosingAnalysis => 800,
        }
    }

    /// Suggested sampling temperature for this phase.
    pub fn temperature(&self) -> f32 {
        match self {
            PromptPhase::Opening | PromptPhase::Rebuttal => 0.8,
            PromptPhase::ClosingAnalysis => 0.7,
        }
    }
}

impl fmt::Display for PromptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PromptPhase {
    type Err = DebateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opening" => Ok(PromptPhase::Opening),
            "rebuttal" => Ok(PromptPhase::Rebuttal),
            "closing_analysis" => Ok(PromptPhase::ClosingAnalysis),
            other => Err(DebateError::InvalidPhase(other.to_string())),
        }
    }
}

impl TryFrom<DebatePhase> for PromptPhase {
    type Error = DebateError;

    /// Maps the phase that is waiting on generated text to its prompt.
    fn try_from(phase: DebatePhase) -> Result<Self, Self::Error> {
        match phase {
            DebatePhase::AwaitingOpponentOpening => Ok(PromptPhase::Opening),
            DebatePhase::AwaitingOpponentTurn => Ok(PromptPhase::Rebuttal),
            DebatePhase::Completed => Ok(PromptPhase::ClosingAnalysis),
            other => Err(DebateError::InvalidPhase(other.to_string())),
        }
    }
}

/// Cumulative scores handed to the closing analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalScores {
    pub user: f64,
    pub opponent: f64,
    pub rounds: u32,
}

/// Builds the prompt for `phase`.
///
/// `transcript` is the window the caller wants the backend to see: ignored
/// for the opening, trimmed to the last [`REBUTTAL_WINDOW`] turns for a
/// rebuttal, and used in full for the closing analysis.
///
/// # Errors
///
/// Returns `MissingScores` for a closing analysis without `final_scores`.
pub fn build_prompt(
    phase: PromptPhase,
    topic: &Topic,
    transcript: &[Turn],
    final_scores: Option<&FinalScores>,
) -> Result<String, DebateError> {
    match phase {
        PromptPhase::Opening => Ok(opening_prompt(topic)),
        PromptPhase::Rebuttal => Ok(rebuttal_prompt(topic, transcript)),
        PromptPhase::ClosingAnalysis => {
            let scores = final_scores.ok_or(DebateError::MissingScores)?;
            Ok(closing_prompt(topic, transcript, scores))
        }
    }
}

fn opening_prompt(topic: &Topic) -> String {
    format!(
        "You are a skilled debate opponent in a formal debate.

DEBATE TOPIC: \"{title}\"
DESCRIPTION: {description}
CATEGORY: {category}
DIFFICULTY: {difficulty}

YOUR TASK:
1. Present a compelling opening statement OPPOSING this proposition
2. Support it with specific examples, facts or logical reasoning
3. Keep it conversational yet intellectual
4. Length: 3-4 well-developed paragraphs

GUIDELINES:
- Open with a strong hook
- Present 2-3 main arguments against the proposition
- End with a clear statement of your position
- Maintain a confident but respectful tone

Now present your opening statement:",
        title = topic.title(),
        description = topic.description(),
        category = topic.category(),
        difficulty = topic.difficulty(),
    )
}

fn rebuttal_prompt(topic: &Topic, transcript: &[Turn]) -> String {
    let start = transcript.len().saturating_sub(REBUTTAL_WINDOW);
    let recent = transcript[start..]
        .iter()
        .map(|turn| {
            // The backend argues as the opponent, so the user is its opponent.
            let label = match turn.speaker() {
                Speaker::User => "OPPONENT",
                Speaker::Opponent => "YOU",
            };
            format!("{}: {}", label, turn.text())
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are in an active debate about: \"{title}\"

CONTEXT: {description}
DIFFICULTY: {difficulty}

RECENT CONVERSATION:
{recent}

YOUR TASK:
Respond to the opponent's latest argument with a strong counter-position.

REQUIREMENTS:
1. Directly address their main points
2. Present 2-3 counterarguments with reasoning
3. Use specific examples, data or logical principles where relevant
4. Point out weaknesses in their logic, if any
5. Keep it to 3-4 well-structured paragraphs
6. Be persuasive and confident, but respectful

AVOID:
- Generic statements without substance
- Agreeing with the opponent
- Changing the topic
- Repeating earlier points

Now respond to their argument:",
        title = topic.title(),
        description = topic.description(),
        difficulty = topic.difficulty(),
        recent = recent,
    )
}

fn closing_prompt(topic: &Topic, transcript: &[Turn], scores: &FinalScores) -> String {
    let mut rendered = String::new();
    for (index, turn) in transcript.iter().enumerate() {
        if index > 0 {
            rendered.push_str("\n\n---\n\n");
        }
        let heading = match index {
            0 => "Opening".to_string(),
            n => format!("Round {}", (n + 1) / 2),
        };
        let speaker = match turn.speaker() {
            Speaker::User => "YOUR ARGUMENT",
            Speaker::Opponent => "AI OPPONENT",
        };
        let _ = write!(rendered, "**{} - {}:**\n{}", heading, speaker, turn.text());
    }

    format!(
        "You are an expert debate judge. Provide a comprehensive analysis of this debate.

DEBATE TOPIC: \"{title}\"
TOTAL ROUNDS: {rounds}

FINAL SCORES:
- User (You): {user}
- AI Opponent: {opponent}

FULL DEBATE TRANSCRIPT:
{rendered}

PROVIDE A DETAILED ANALYSIS WITH THESE SECTIONS:

**OVERALL VERDICT**
Who won the debate and why? Be specific.

**YOUR STRONGEST ARGUMENTS**
- 2-3 of your most effective points and why they worked

**AREAS FOR IMPROVEMENT**
- 2-3 specific weaknesses in your argumentation
- How you could have strengthened them

**AI OPPONENT'S PERFORMANCE**
- Their strongest counterarguments
- How they challenged your position

**KEY TAKEAWAYS**
- What you did well
- What to focus on next time
- One specific skill to develop

Make it constructive, specific and encouraging.",
        title = topic.title(),
        rounds = scores.rounds,
        user = scores.user,
        opponent = scores.opponent,
        rendered = rendered,
    )
}
