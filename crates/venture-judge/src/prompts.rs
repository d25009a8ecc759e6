//! Prompt builders. Each returns the user message for one judge call.

use std::fmt::Write as _;

use venture_core::enums::{ComponentKey, ReportCategory};

use crate::{ComponentBrief, Rubric, ScoringRequest};

/// System message shared by every call.
pub const SYSTEM: &str = "You are a rigorous startup consultant. Answer exactly in the requested format.";

const VERDICT_FORMAT: &str = "Respond with a JSON object: {\"label\": <one of the labels>, \"confidence\": <0.0-1.0>, \"reason\": <short reason>}.";

#[must_use]
pub fn classification(text: &str, rubric: &Rubric) -> String {
    let labels = rubric.labels().join(", ");
    let mut prompt = match rubric {
        Rubric::Completeness { component } => format!(
            "Decide whether a founder's answer is complete and specific enough.\n\n\
             Component: {}\nQuestion: {}\nAnswer: \"{text}\"\n\n\
             COMPLETE: specific, detailed, fully addresses the question.\n\
             INCOMPLETE: vague, lacks details, or misses what was asked \
             (e.g. \"better services\", \"competitive prices\", \"good quality\").\n",
            component.display_name(),
            component.guiding_question(),
        ),
        Rubric::GenuineAnswer { question } => format!(
            "Decide what kind of message a founder sent in reply to a question.\n\n\
             Question: \"{question}\"\nMessage: \"{text}\"\n\n\
             GENUINE: an attempt to answer the question.\n\
             META: a question back, a request for clarification, or confusion.\n\
             GIBBERISH: random characters or unrelated filler.\n"
        ),
        Rubric::ComponentRelevance { question } => {
            let mut p = format!(
                "Decide which business component this question and answer inform most.\n\n\
                 Question: \"{question}\"\nAnswer: \"{text}\"\n\nComponents:\n"
            );
            for key in ComponentKey::ALL {
                let _ = writeln!(p, "- {}: {}", key.as_str(), key.scope_hint());
            }
            p
        }
    };
    let _ = write!(prompt, "\nLabels: {labels}\n{VERDICT_FORMAT}");
    prompt
}

#[must_use]
pub fn summary(context: &str, new_text: &str) -> String {
    format!(
        "{context}\n\nNew information from the founder:\n\"{new_text}\"\n\n\
         Write a concise summary (2-3 sentences) of this business component that \
         incorporates the new information. If it contradicts earlier information, \
         prefer the more recent and detailed statement. Return only the summary text."
    )
}

#[must_use]
pub fn comparisons(components: &[ComponentBrief], industry: Option<&str>) -> String {
    let mut prompt = String::from(
        "Suggest 5 to 6 real companies that are good benchmarks for the business below.\n\n",
    );
    if let Some(industry) = industry {
        let _ = writeln!(prompt, "Industry: {industry}");
    }
    for brief in components {
        let _ = writeln!(prompt, "{}: {}", brief.title, brief.summary);
    }
    prompt.push_str(
        "\nRespond with a JSON object: {\"companies\": [{\"name\": .., \"description\": .., \
         \"relevance\": ..}]}. Use real, distinct company names.",
    );
    prompt
}

#[must_use]
pub fn scoring(request: &ScoringRequest) -> String {
    let mut prompt = String::from(
        "You are an expert venture analyst. Evaluate the business idea below against the \
         selected benchmark companies.\n\nReturn STRICTLY this JSON (no extra text):\n\
         {\n  \"evaluation_feedback\": {\n",
    );
    for category in ReportCategory::ALL {
        let _ = writeln!(
            prompt,
            "    \"{}\": {{\"score\": \"x/5\", \"rationale\": \"...\"}},",
            category.heading()
        );
    }
    prompt.push_str(
        "    \"overall\": {\"score\": \"x/25\", \"feedback\": \"...\"}\n  },\n  \
         \"ai_investment_recommendation\": \"YES|MAYBE|NEUTRAL|NO\",\n  \
         \"investment_rationale\": \"...\"\n}\n\n\
         All category scores are out of 5. The overall score is the sum of the five, out of 25.\n\n",
    );

    let _ = writeln!(prompt, "### Business: {}", request.business_name);
    if let Some(industry) = &request.industry {
        let _ = writeln!(prompt, "Industry: {industry}");
    }
    prompt.push_str("\n### Components\n");
    for brief in &request.components {
        let _ = writeln!(prompt, "- {}: {}", brief.title, brief.summary);
    }
    prompt.push_str("\n### Full conversation\n");
    for entry in &request.history {
        let _ = writeln!(prompt, "{}: {}", entry.speaker, entry.content);
    }
    let _ = write!(
        prompt,
        "\n### Selected benchmark companies\n{}\n",
        request.comparisons.join(", ")
    );
    prompt
}
