// crates/core/src/suggest/prompt.rs
//! Prompt construction for the scheduler model.

use std::fmt::Write;

use super::types::SuggestionRequest;

/// Duration assumed for tasks without an estimate, in minutes.
const FALLBACK_DURATION_MINUTES: i64 = 60;

/// Build the scheduling prompt: preference window, task lines, existing
/// session windows, and a strict JSON output-shape instruction.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an AI study scheduler. Based on the following information, \
         suggest optimal study times for the user's tasks.\n"
    );

    let prefs = &request.preferences;
    let _ = writeln!(prompt, "User's preferences:");
    let _ = writeln!(
        prompt,
        "- Study hours: {} to {}",
        prefs.preferred_study_start_time, prefs.preferred_study_end_time
    );
    let _ = writeln!(prompt, "- Break duration: {} minutes", prefs.break_duration);
    let _ = writeln!(
        prompt,
        "- Max session duration: {} minutes\n",
        prefs.max_session_duration
    );

    let _ = writeln!(prompt, "Tasks to schedule:");
    for task in &request.tasks {
        let duration = task
            .estimated_duration
            .unwrap_or(FALLBACK_DURATION_MINUTES);
        let deadline = task
            .deadline_at
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "No deadline".to_string());
        let subject = task.subject.as_deref().unwrap_or("General");
        let _ = writeln!(
            prompt,
            "- {} (Priority: {}/5, Duration: {} minutes, Deadline: {}, Subject: {})",
            task.title, task.priority, duration, deadline, subject
        );
    }

    let _ = writeln!(prompt, "\nExisting scheduled sessions:");
    for session in &request.existing_sessions {
        let _ = writeln!(
            prompt,
            "- {} to {}",
            session.scheduled_start_at.to_rfc3339(),
            session.scheduled_end_at.to_rfc3339()
        );
    }

    prompt.push_str(
        "\nPlease suggest optimal study times for today and tomorrow, considering:\n\
         1. Task priorities and deadlines\n\
         2. User's preferred study hours\n\
         3. Avoiding conflicts with existing sessions\n\
         4. Including appropriate breaks\n\
         5. Grouping similar subjects when possible\n\
         \n\
         Return a JSON object with a \"sessions\" array of suggested study \
         sessions with this structure:\n\
         {\n\
         \"sessions\": [\n\
         {\n\
         \"task_id\": number,\n\
         \"task_title\": \"string\",\n\
         \"scheduled_start_at\": \"ISO datetime string\",\n\
         \"scheduled_end_at\": \"ISO datetime string\",\n\
         \"reasoning\": \"Brief explanation for this timing\"\n\
         }\n\
         ]\n\
         }",
    );

    prompt
}
