//! Anytime output scanner
//!
//! In anytime mode ENHSP prints every plan it finds to stdout, framed by
//! literal markers:
//!
//! ```text
//! Found Plan:
//! 0.0: (move l0 l1)
//! 1.0: (move l1 l2)
//! Plan-Length:2
//! ```
//!
//! The scanner is fed one line at a time and hands back the text of each
//! complete plan in the oneshot plan format, ready for [`crate::parser::parse_plan`].

use tracing::debug;

/// Marker that opens a plan block
pub const PLAN_START_MARKER: &str = "Found Plan:";

/// Marker that closes a plan block
pub const PLAN_END_MARKER: &str = "Plan-Length:";

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Collecting(Vec<String>),
}

/// Line-driven IDLE/COLLECTING state machine over engine stdout
#[derive(Debug)]
pub struct PlanScanner {
    state: State,
    plans_seen: usize,
}

impl Default for PlanScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanScanner {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            plans_seen: 0,
        }
    }

    /// Feed one output line; returns the plan text when a block closes
    pub fn feed(&mut self, line: &str) -> Option<String> {
        if line.contains(PLAN_START_MARKER) {
            debug!("PlanScanner::feed: plan start marker");
            // A new start discards any unterminated block.
            self.state = State::Collecting(Vec::new());
            return None;
        }

        if line.contains(PLAN_END_MARKER) {
            return match std::mem::replace(&mut self.state, State::Idle) {
                State::Collecting(lines) => {
                    self.plans_seen += 1;
                    debug!(steps = lines.len(), plans_seen = self.plans_seen, "PlanScanner::feed: plan complete");
                    let mut text = lines.join("\n");
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    Some(text)
                }
                State::Idle => {
                    debug!("PlanScanner::feed: end marker outside a plan, ignoring");
                    None
                }
            };
        }

        if let State::Collecting(lines) = &mut self.state {
            let step = strip_label(line);
            if !step.trim().is_empty() {
                lines.push(step.to_string());
            }
        }
        None
    }

    /// True while between a start and an end marker
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting(_))
    }

    /// Number of complete plans emitted so far
    pub fn plans_seen(&self) -> usize {
        self.plans_seen
    }
}

/// Drop the leading `<label>:` from a buffered plan line
fn strip_label(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line,
    }
}
