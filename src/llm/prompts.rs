/// System instruction sent alongside every PRD prompt.
pub const PRD_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates a PRD from a transcript.";

/// PRD sections, in the order the model is asked to produce them.
pub const PRD_SECTIONS: [&str; 10] = [
    "Introduction",
    "Goals",
    "Target Users",
    "User Stories",
    "Functional Requirements",
    "Non-Functional Requirements",
    "Technical Specifications",
    "Success Metrics",
    "Future Considerations (Out of Scope for V1)",
    "Risks and Assumptions",
];

/// Build the PRD prompt. The transcript is embedded verbatim.
pub fn build_prd_prompt(transcript: &str) -> String {
    let sections = PRD_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful assistant that generates a Product Requirements Document (PRD) from a transcript.\n\
\n\
Please structure the PRD with the following sections:\n\
\n\
{sections}\n\
\n\
Here is the transcript text:\n\
{transcript}"
    )
}
