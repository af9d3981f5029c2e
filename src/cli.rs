//! Console side of the app: the interactive questionnaire and the
//! success/failure report.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::roadmap::{normalize_and_validate, strip_code_fence, GoalResponse, RawResponse, UserProfile};
use crate::store::RoadmapStore;

pub const WELCOME: &str = "Welcome to Achieve, your AI learning coach. Let's set up your roadmap.";

const GOAL_PROMPT: &str = "🎯 What goal do you want to achieve? ";
const SKILL_PROMPT: &str = "🧠 What is your current skill level (beginner, intermediate, advanced)? ";
const WEEKS_PROMPT: &str = "📅 How many weeks do you want to work on this goal? ";
const MINUTES_PROMPT: &str = "⏱️ How many minutes per day can you dedicate to this goal? ";
const PREFERENCES_PROMPT: &str =
    "💬 Any preferences or notes? (e.g., I like video tutorials, I learn best by doing): ";

/// How the post-generation pipeline ended.
#[derive(Debug)]
pub enum Outcome {
    Saved { roadmap: GoalResponse, path: PathBuf },
    Rejected { reason: String },
}

/// Returns the answer without its line ending; other whitespace is kept.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed before all questions were answered"));
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Asks until the answer parses as an integer of at least `min`.
fn ask_number<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str, min: u32) -> io::Result<u32> {
    loop {
        let answer = ask(input, out, prompt)?;
        match answer.trim().parse::<u32>() {
            Ok(n) if n >= min => return Ok(n),
            _ => writeln!(out, "Please enter a whole number of at least {}.", min)?,
        }
    }
}

/// Asks the five questions in order: goal, skill level, weeks, minutes per day, preferences.
pub fn read_profile<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<UserProfile> {
    writeln!(out, "{}", WELCOME)?;
    let goal = ask(input, out, GOAL_PROMPT)?;
    let skill_level = ask(input, out, SKILL_PROMPT)?;
    let duration_weeks = ask_number(input, out, WEEKS_PROMPT, 1)?;
    let daily_minutes = ask_number(input, out, MINUTES_PROMPT, 0)?;
    let preferences = ask(input, out, PREFERENCES_PROMPT)?;

    Ok(UserProfile { goal, skill_level, duration_weeks, daily_minutes, preferences })
}

/// Validates the agent's answer, prints it and persists it.
///
/// Every failure after generation (syntax, schema, disk) is reported
/// here with the cleaned candidate and the full raw response; none is
/// retried and nothing partial is saved.
pub async fn deliver<W: Write>(
    raw:   &RawResponse,
    store: &dyn RoadmapStore,
    name:  &str,
    out:   &mut W,
) -> io::Result<Outcome> {
    let cleaned = strip_code_fence(&raw.output);

    let roadmap = match normalize_and_validate(&raw.output) {
        Ok(roadmap) => roadmap,
        Err(err) => {
            tracing::error!(error = %err, "model answer rejected");
            report_failure(out, "Error parsing the response", &err.to_string(), cleaned, raw)?;
            return Ok(Outcome::Rejected { reason: err.to_string() });
        }
    };

    tracing::info!(
        weeks              = roadmap.weekly_checkpoints.len(),
        assignment_minutes = roadmap.total_assignment_minutes(),
        "roadmap validated"
    );

    let pretty = serde_json::to_string_pretty(&roadmap)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(out, "\n✅ Success! Your roadmap has been generated.\n")?;
    writeln!(out, "{}", pretty)?;

    match store.save(name, &roadmap).await {
        Ok(path) => {
            writeln!(out, "\n💾 Saved to {}", path.display())?;
            Ok(Outcome::Saved { roadmap, path })
        }
        Err(err) => {
            tracing::error!(error = %err, "saving roadmap failed");
            report_failure(out, "Error saving the roadmap", &err.to_string(), cleaned, raw)?;
            Ok(Outcome::Rejected { reason: err.to_string() })
        }
    }
}

fn report_failure<W: Write>(
    out:     &mut W,
    banner:  &str,
    error:   &str,
    cleaned: &str,
    raw:     &RawResponse,
) -> io::Result<()> {
    let raw_json = serde_json::to_string_pretty(raw)
        .unwrap_or_else(|_| format!("{:?}", raw));
    writeln!(out, "\n❌ {}: {}", banner, error)?;
    writeln!(out, "🧪 Cleaned output was:\n{}", cleaned)?;
    writeln!(out, "📦 Full raw response:\n{}", raw_json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_five_answers_in_order() {
        let mut input = Cursor::new("Learn Go\nbeginner\n6\n30\nI like videos\n");
        let mut out = Vec::new();
        let profile = read_profile(&mut input, &mut out).unwrap();

        assert_eq!(profile, UserProfile {
            goal:           "Learn Go".to_string(),
            skill_level:    "beginner".to_string(),
            duration_weeks: 6,
            daily_minutes:  30,
            preferences:    "I like videos".to_string(),
        });
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(WELCOME));
        assert!(printed.contains(PREFERENCES_PROMPT));
    }

    #[test]
    fn invalid_numbers_are_asked_again() {
        let mut input = Cursor::new("Learn Go\nbeginner\nsix\n0\n6\n-5\n45\n\n");
        let mut out = Vec::new();
        let profile = read_profile(&mut input, &mut out).unwrap();

        assert_eq!(profile.duration_weeks, 6);
        assert_eq!(profile.daily_minutes, 45);
        assert_eq!(profile.preferences, "");
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Please enter a whole number").count(), 3);
    }

    #[test]
    fn free_text_answers_are_kept_verbatim() {
        let mut input = Cursor::new("  Learn Go  \r\nbeginner\n 6 \n30\r\n I like videos \n");
        let profile = read_profile(&mut input, &mut Vec::new()).unwrap();

        assert_eq!(profile.goal, "  Learn Go  ");
        assert_eq!(profile.duration_weeks, 6);
        assert_eq!(profile.daily_minutes, 30);
        assert_eq!(profile.preferences, " I like videos ");
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("Learn Go\n");
        let err = read_profile(&mut input, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
