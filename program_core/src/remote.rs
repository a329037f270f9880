//! Remote program generation through a text-generation API.
//!
//! The remote service produces the day contents of a week (split,
//! intensity and challenge) in the same schema the local pipeline uses.
//! Any failure here is absorbed by the generator, which falls back to the
//! local pipeline.

use crate::config::RemoteConfig;
use crate::intensity::{MAX_REST_SECONDS, MAX_SETS, MIN_REST_SECONDS};
use crate::{
    DayFocus, DifficultyTier, Error, Exercise, ProgramSource, Result, SessionLog, UserProfile,
    WeekProgram, Workout,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const API_VERSION: &str = "2023-06-01";

/// Most reps accepted per set in a remote plan
const MAX_REMOTE_REPS: u32 = 100;

/// Session logs included in a prompt
const PROMPT_LOG_LIMIT: usize = 10;

/// Alternate source of a week's workouts
///
/// Implementations return `Err` on any transport, status or schema
/// problem; they never retry.
#[async_trait]
pub trait RemoteProgramGenerator: Send + Sync {
    async fn generate(
        &self,
        profile: &UserProfile,
        week: u32,
        logs: &[SessionLog],
        start_date: Option<NaiveDate>,
    ) -> Result<WeekProgram>;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Week plan as produced by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteWeekPlan {
    pub workouts: Vec<RemoteWorkout>,
}

/// One day of a remote week plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteWorkout {
    pub title: String,
    pub focus: DayFocus,
    pub day: u32,
    pub difficulty: DifficultyTier,
    #[serde(default)]
    pub is_challenge: bool,
    pub exercises: Vec<Exercise>,
}

impl RemoteWeekPlan {
    /// Convert into a program for `week`; durations are recomputed locally
    pub fn into_program(self, week: u32) -> WeekProgram {
        let mut workouts: Vec<Workout> = self
            .workouts
            .into_iter()
            .map(|w| {
                let mut workout = Workout {
                    id: Uuid::new_v4(),
                    title: w.title,
                    focus: w.focus,
                    week,
                    day: w.day,
                    exercises: w.exercises,
                    duration_minutes: 0,
                    difficulty: w.difficulty,
                    scheduled_date: None,
                    is_completed: false,
                    is_challenge: w.is_challenge,
                };
                workout.recompute_duration();
                workout
            })
            .collect();
        workouts.sort_by_key(|w| w.day);

        WeekProgram {
            id: Uuid::new_v4(),
            week,
            workouts,
            generated_at: Utc::now(),
            source: ProgramSource::Remote,
        }
    }
}

/// Check a remote program against the invariants of the local pipeline
///
/// Rejects empty or oversized weeks, duplicate day numbers, exercises
/// outside the set/rep/rest bounds or the user's equipment, and any
/// challenge layout other than exactly one challenge on the last day.
pub fn validate_remote_program(program: &WeekProgram, profile: &UserProfile) -> Result<()> {
    let workouts = &program.workouts;
    if workouts.is_empty() {
        return Err(Error::Remote("remote program has no workouts".into()));
    }
    if workouts.len() > profile.sessions_per_week as usize {
        return Err(Error::Remote(format!(
            "remote program has {} workouts for {} sessions per week",
            workouts.len(),
            profile.sessions_per_week
        )));
    }

    let mut days: Vec<u32> = workouts.iter().map(|w| w.day).collect();
    days.sort_unstable();
    days.dedup();
    if days.len() != workouts.len() || days.first() != Some(&1) {
        return Err(Error::Remote("remote program day numbers are not distinct from 1".into()));
    }

    for workout in workouts {
        for e in &workout.exercises {
            let sets_ok = (1..=MAX_SETS).contains(&e.sets);
            let reps_ok = (1..=MAX_REMOTE_REPS).contains(&e.reps);
            let rest_ok = (MIN_REST_SECONDS..=MAX_REST_SECONDS).contains(&e.rest_seconds);
            if !sets_ok || !reps_ok || !rest_ok {
                return Err(Error::Remote(format!(
                    "exercise '{}' out of bounds: {} sets, {} reps, {}s rest",
                    e.name, e.sets, e.reps, e.rest_seconds
                )));
            }
            if !profile.equipment.supports(e.equipment) {
                return Err(Error::Remote(format!(
                    "exercise '{}' needs {:?}, user has {:?}",
                    e.name, e.equipment, profile.equipment
                )));
            }
        }
    }

    let challenges = workouts.iter().filter(|w| w.is_challenge).count();
    let last_is_challenge = workouts.last().is_some_and(|w| w.is_challenge);
    if challenges != 1 || !last_is_challenge {
        return Err(Error::Remote(
            "remote program must mark exactly the last workout as challenge".into(),
        ));
    }

    Ok(())
}

// ============================================================================
// HTTP client
// ============================================================================

/// `RemoteProgramGenerator` backed by a messages-style HTTP API
pub struct HttpProgramGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl HttpProgramGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            max_tokens,
        }
    }

    /// Build a client from config, reading the API key from the environment
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| Error::Remote(format!("{} not set", config.api_key_env)))?;
        Ok(Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.max_tokens,
        ))
    }

    /// Send one system + user message pair and return the reply text
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: system_prompt.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: user_message.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Remote(format!("reading body failed: {}", e)))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                return Err(Error::Remote(error_resp.error.message));
            }
            return Err(Error::Remote(format!("HTTP {}: {}", status, body)));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Remote(format!("malformed response: {}", e)))?;

        parsed
            .content
            .into_iter()
            .find(|c| c.content_type == "text")
            .and_then(|c| c.text)
            .ok_or_else(|| Error::Remote("no text content in response".into()))
    }
}

#[async_trait]
impl RemoteProgramGenerator for HttpProgramGenerator {
    async fn generate(
        &self,
        profile: &UserProfile,
        week: u32,
        logs: &[SessionLog],
        start_date: Option<NaiveDate>,
    ) -> Result<WeekProgram> {
        let user_message = build_user_message(profile, week, logs, start_date)?;
        let text = self.complete(SYSTEM_PROMPT, &user_message).await?;
        let json = extract_json(&text)?;

        let plan: RemoteWeekPlan = serde_json::from_str(&json)
            .map_err(|e| Error::Remote(format!("plan does not match schema: {}", e)))?;

        tracing::info!("Remote service returned {} workouts", plan.workouts.len());
        Ok(plan.into_program(week))
    }
}

const SYSTEM_PROMPT: &str = r#"You are a strength coach generating one week of home workouts.
Respond with a single JSON object and nothing else:
{"workouts": [{"title": string, "focus": "full_body"|"push"|"pull"|"legs",
  "day": integer from 1, "difficulty": "beginner"|"intermediate"|"advanced",
  "is_challenge": bool,
  "exercises": [{"name": snake_case string, "muscle_groups": ["chest"|"back"|"shoulders"|"legs"|"posterior_chain"|"biceps"|"triceps"|"core"|"full_body"],
    "equipment": "none"|"dumbbells", "kind": "compound"|"isolation"|"core"|"finisher",
    "sets": 1-6, "reps": >= 1, "rest_seconds": 30-120, "tempo": string|null, "notes": string|null}]}]}
Rules: use only the user's equipment; at most sessions_per_week workouts;
compound exercises first, core last; the last workout is the only one with
is_challenge = true and ends with a finisher."#;

fn build_user_message(
    profile: &UserProfile,
    week: u32,
    logs: &[SessionLog],
    start_date: Option<NaiveDate>,
) -> Result<String> {
    let recent: Vec<&SessionLog> = logs.iter().take(PROMPT_LOG_LIMIT).collect();
    let context = serde_json::json!({
        "profile": profile,
        "week": week,
        "start_date": start_date,
        "recent_sessions": recent,
    });
    Ok(format!(
        "Generate the training week described below.\n\nCONTEXT:\n{}\n\nRespond with JSON only.",
        serde_json::to_string_pretty(&context)?
    ))
}

/// Extract a JSON object from a reply that may wrap it in prose or fences
fn extract_json(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim().to_string());
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        let content_start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[content_start..].find("```") {
            return Ok(text[content_start..content_start + end].trim().to_string());
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Ok(text[start..=end].to_string());
        }
    }

    Err(Error::Remote("could not find JSON in response".into()))
}
