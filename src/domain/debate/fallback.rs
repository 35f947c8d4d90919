//! Locally synthesized content used when generation is unavailable.
//!
//! Every function here is deterministic except [`demo_score`], which takes
//! its randomness from the caller so tests can seed it.

use rand::Rng;

use super::{FinalScores, Topic};

/// Inclusive range of demo scores handed out on the fallback path.
pub const DEMO_SCORE_RANGE: std::ops::RangeInclusive<u8> = 6..=8;

/// Opening statement used when the opening cannot be generated.
pub fn opening(topic: &Topic) -> String {
    format!(
        "I'm ready to debate \"{}\". However, there was an issue connecting to the AI service. \
         I'll respond in demo mode. Make your opening argument!",
        topic.title()
    )
}

/// Templated rebuttal to `user_text`.
///
/// The template rotates with `round_count`; each template picks its middle
/// clause from a keyword in the user's text.
pub fn rebuttal(user_text: &str, round_count: u32) -> String {
    let lowered = user_text.to_lowercase();
    match round_count % 3 {
        0 => format!(
            "That's an interesting point, but I would argue that {}. \
             Research has shown multiple contradictory outcomes in this area.",
            if lowered.contains("technology") {
                "technology also poses significant risks"
            } else {
                "we need to consider alternative perspectives"
            }
        ),
        1 => format!(
            "While I understand your reasoning, {}. \
             Historical evidence suggests a more nuanced view is necessary.",
            if lowered.contains("benefit") {
                "the costs often outweigh the benefits"
            } else {
                "there are significant drawbacks to consider"
            }
        ),
        _ => format!(
            "I respectfully disagree. {}. We must examine the empirical evidence more closely.",
            if lowered.contains("should") {
                "The implementation challenges are often underestimated"
            } else {
                "The theoretical framework doesn't always translate to practical reality"
            }
        ),
    }
}

/// Templated closing analysis embedding the final scores.
pub fn analysis(topic: &Topic, scores: &FinalScores) -> String {
    format!(
        "**Debate Analysis**

**Overall Performance:**
Both participants presented well-reasoned arguments throughout this debate on \"{title}\".

**Your Strengths:**
- Clear articulation of key points
- Good use of logical reasoning
- Engaged with counterarguments

**Areas for Improvement:**
- Could strengthen arguments with more specific evidence
- Consider addressing potential weaknesses preemptively
- Develop more nuanced counterpoints

**AI Opponent Performance:**
The AI presented challenging opposition and maintained consistency throughout the debate.

**Final Verdict:**
This was a competitive debate over {rounds} round(s). Your total score: {user}, AI score: {opponent}.

*Note: This is a demo analysis. Configure an API key for detailed AI-powered evaluations.*",
        title = topic.title(),
        rounds = scores.rounds,
        user = scores.user,
        opponent = scores.opponent,
    )
}

/// Draws a whole-number demo score from [`DEMO_SCORE_RANGE`].
pub fn demo_score<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(DEMO_SCORE_RANGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::debate::find_topic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn opening_names_the_topic() {
        let topic = find_topic("1").unwrap();
        let text = opening(topic);
        assert!(text.starts_with("I'm ready to debate \"AI will replace most human jobs\"."));
        assert!(text.ends_with("Make your opening argument!"));
    }

    #[test]
    fn rebuttal_rotates_templates_by_round() {
        assert!(rebuttal("x", 0).starts_with("That's an interesting point"));
        assert!(rebuttal("x", 1).starts_with("While I understand your reasoning"));
        assert!(rebuttal("x", 2).starts_with("I respectfully disagree."));
        assert_eq!(rebuttal("x", 3), rebuttal("x", 0));
    }

    #[test]
    fn rebuttal_clause_follows_keywords() {
        assert!(rebuttal("Technology helps", 0).contains("technology also poses significant risks"));
        assert!(rebuttal("It helps", 0).contains("we need to consider alternative perspectives"));
        assert!(rebuttal("Huge BENEFIT", 1).contains("the costs often outweigh the benefits"));
        assert!(rebuttal("We should act", 2).contains("implementation challenges"));
        assert!(rebuttal("We must act", 2).contains("theoretical framework"));
    }

    #[test]
    fn analysis_embeds_scores() {
        let topic = find_topic("3").unwrap();
        let scores = FinalScores {
            user: 14.0,
            opponent: 13.5,
            rounds: 2,
        };
        let text = analysis(topic, &scores);
        assert!(text.contains("Climate change requires immediate global action"));
        assert!(text.contains("Your total score: 14, AI score: 13.5"));
        assert!(text.contains("demo analysis"));
    }

    #[test]
    fn demo_scores_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let score = demo_score(&mut rng);
            assert!((6.0..=8.0).contains(&score));
            assert_eq!(score.fract(), 0.0);
        }
    }
}
