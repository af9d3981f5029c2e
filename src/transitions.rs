use std::collections::HashMap;
use crate::types::State;
use crate::events::Event;

pub type TransitionTable = HashMap<(State, Event), State>;

/// Builds the transition table for the roadmap tool-calling loop.
///
/// Any (State, Event) pair not in this table is illegal and makes
/// `AgentEngine::run()` return `AgentError::InvalidTransition`.
pub fn build_transition_table() -> TransitionTable {
    let mut t = HashMap::new();

    // ── IDLE ─────────────────────────────────────────────
    t.insert((State::idle(),      Event::start()),            State::planning());

    // ── PLANNING (awaiting model) ────────────────────────
    t.insert((State::planning(),  Event::llm_tool_call()),    State::acting());
    t.insert((State::planning(),  Event::llm_final_answer()), State::done());
    t.insert((State::planning(),  Event::max_steps()),        State::error());
    t.insert((State::planning(),  Event::fatal_error()),      State::error());

    // ── ACTING (execute tools) ───────────────────────────
    t.insert((State::acting(),    Event::tool_success()),     State::observing());
    t.insert((State::acting(),    Event::tool_failure()),     State::observing());
    t.insert((State::acting(),    Event::fatal_error()),      State::error());

    // ── OBSERVING ────────────────────────────────────────
    t.insert((State::observing(), Event::r#continue()),       State::planning());

    // DONE and ERROR are terminal; the engine exits before table lookup.

    t
}
