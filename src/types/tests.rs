use crate::types::{Analyst, InterviewRequest, Perspectives, Transcript, Turn, TurnRole};

fn sample_analyst() -> Analyst {
    Analyst::new(
        "Dr. Lin",
        "Institute for Agent Systems",
        "Reliability researcher",
        "Focuses on failure modes of multi-agent pipelines.",
    )
}

#[test]
fn test_persona_contains_all_fields() {
    let persona = sample_analyst().persona();

    assert!(persona.contains("Name: Dr. Lin"));
    assert!(persona.contains("Role: Reliability researcher"));
    assert!(persona.contains("Affiliation: Institute for Agent Systems"));
    assert!(persona.contains("Description: Focuses on failure modes"));
}

#[test]
fn test_first_blank_field() {
    assert_eq!(sample_analyst().first_blank_field(), None);

    let mut analyst = sample_analyst();
    analyst.role = "   ".to_string();
    assert_eq!(analyst.first_blank_field(), Some("role"));
}

#[test]
fn test_perspectives_deserialize() {
    let json = serde_json::json!({
        "analysts": [{
            "name": "A",
            "affiliation": "B",
            "role": "C",
            "description": "D"
        }]
    });

    let perspectives: Perspectives = serde_json::from_value(json).unwrap();
    assert_eq!(perspectives.analysts, vec![Analyst::new("A", "B", "C", "D")]);
}

#[test]
fn test_perspectives_rejects_missing_field() {
    let json = serde_json::json!({ "analysts": [{ "name": "A" }] });
    assert!(serde_json::from_value::<Perspectives>(json).is_err());
}

#[test]
fn test_transcript_render_and_counts() {
    let mut transcript = Transcript::new();
    transcript.push(Turn::question("What changed?"));
    transcript.push(Turn::answer("Everything [1]."));

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.answer_count(), 1);
    assert_eq!(transcript.turns()[1].role, TurnRole::Answer);
    assert_eq!(
        transcript.render(),
        "Analyst: What changed?\n\nExpert: Everything [1]."
    );
}

#[test]
fn test_interview_request_opening() {
    let request = InterviewRequest::new("agent frameworks", sample_analyst());

    assert_eq!(request.opening.role, TurnRole::Question);
    assert_eq!(
        request.opening.content,
        "So you said you were writing an article on agent frameworks?"
    );
}
