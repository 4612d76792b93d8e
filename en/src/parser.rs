//! Oneshot plan file parser
//!
//! Every line is either blank, a `;` comment, or `(action arg1 arg2 ...)`.
//! Anything else is an error: lines are never silently dropped.

use std::path::Path;
use std::sync::LazyLock;

use planmodel::{ActionInstance, Problem, SequentialPlan};
use regex::Regex;
use tracing::debug;

use crate::error::{EngineError, ParseError};

static IGNORED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(;.*)?$").expect("valid regex"));

static ACTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(\s*([\w?-]+)((\s+[\w?-]+)*)\s*\)\s*$").expect("valid regex"));

/// True for blank and comment-only lines
pub fn is_ignored(line: &str) -> bool {
    IGNORED_LINE.is_match(line)
}

/// Parse one non-ignored line into an action instance
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_action_line(
    line: &str,
    line_no: usize,
    problem: &Problem,
    engine: &str,
) -> Result<ActionInstance, ParseError> {
    let caps = ACTION_LINE.captures(line).ok_or_else(|| ParseError::Malformed {
        engine: engine.to_string(),
        line: line_no,
        text: line.to_string(),
    })?;

    let name = &caps[1];
    let namespace_err = |source| ParseError::Namespace {
        engine: engine.to_string(),
        line: line_no,
        source,
    };

    let action = problem.action(name).map_err(namespace_err)?;
    let args: Vec<&str> = caps.get(2).map(|m| m.as_str().split_whitespace().collect()).unwrap_or_default();

    if args.len() != action.arity() {
        return Err(ParseError::Arity {
            engine: engine.to_string(),
            line: line_no,
            action: action.name.clone(),
            expected: action.arity(),
            actual: args.len(),
        });
    }

    let parameters = args
        .iter()
        .map(|arg| problem.object(arg).cloned().map_err(namespace_err))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ActionInstance::new(action.clone(), parameters))
}

/// Parse plan text produced by `engine`
pub fn parse_plan(text: &str, problem: &Problem, engine: &str) -> Result<SequentialPlan, ParseError> {
    debug!(len = text.len(), %engine, "parse_plan: called");
    let mut actions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if is_ignored(line) {
            continue;
        }
        actions.push(parse_action_line(line, idx + 1, problem, engine)?);
    }

    debug!(steps = actions.len(), "parse_plan: done");
    Ok(SequentialPlan::new(actions))
}

/// Read and parse a plan file
pub fn parse_plan_file(path: &Path, problem: &Problem, engine: &str) -> Result<SequentialPlan, EngineError> {
    debug!(?path, "parse_plan_file: called");
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::PlanFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_plan(&text, problem, engine)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planmodel::{ActionSchema, NamespaceError, Object};
    use proptest::prelude::*;

    fn robot() -> Problem {
        let mut problem = Problem::new("robot");
        problem.add_action(ActionSchema::new("move").param("l_from", "Location").param("l_to", "Location"));
        problem.add_action(ActionSchema::new("wait"));
        problem.add_objects((0..10).map(|i| Object::new(format!("l{}", i), "Location")));
        problem
    }

    #[test]
    fn test_two_step_plan() {
        let plan = parse_plan("(move l0 l1)\n(move l1 l2)\n", &robot(), "enhsp").unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.actions()[0].to_string(), "move(l0, l1)");
        assert_eq!(plan.actions()[1].to_string(), "move(l1, l2)");
    }

    #[test]
    fn test_comments_blanks_and_spacing() {
        let text = "; plan found\n\n   \n(  move   l0 l1 )  \n;cost 1\n(wait)\n";
        let plan = parse_plan(text, &robot(), "enhsp").unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.actions()[1].name(), "wait");
        assert!(plan.actions()[1].parameters.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let plan = parse_plan("(move l0 l1)\r\n(move l1 l2)\r\n", &robot(), "enhsp").unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_garbage_line_fails() {
        let err = parse_plan("(move l0 l1)\ngarbage line\n", &robot(), "enhsp").unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed {
                engine: "enhsp".to_string(),
                line: 2,
                text: "garbage line".to_string(),
            }
        );
    }

    #[test]
    fn test_timed_line_is_malformed_in_oneshot_format() {
        let err = parse_plan("0.0: (move l0 l1)\n", &robot(), "enhsp").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_unknown_action() {
        let err = parse_plan("(fly l0 l1)\n", &robot(), "enhsp").unwrap_err();
        assert_eq!(
            err,
            ParseError::Namespace {
                engine: "enhsp".to_string(),
                line: 1,
                source: NamespaceError::UnknownAction("fly".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_object() {
        let err = parse_plan("(move l0 mars)\n", &robot(), "enhsp").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Namespace {
                source: NamespaceError::UnknownObject(_),
                ..
            }
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = parse_plan("(move l0)\n", &robot(), "enhsp").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Arity {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_lowercased_output_resolves() {
        let mut problem = Problem::new("p");
        problem.add_action(ActionSchema::new("Move").param("a", "L").param("b", "L"));
        problem.add_objects([Object::new("A", "L"), Object::new("B", "L")]);

        let plan = parse_plan("(move a b)\n", &problem, "enhsp").unwrap();
        assert_eq!(plan.actions()[0].to_string(), "Move(A, B)");
    }

    #[test]
    fn test_empty_file_is_empty_plan() {
        let plan = parse_plan("", &robot(), "enhsp").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_missing_plan_file() {
        let err = parse_plan_file(Path::new("/nonexistent/plan.txt"), &robot(), "enhsp").unwrap_err();
        assert!(matches!(err, EngineError::PlanFile { .. }));
    }

    fn line_strategy() -> impl Strategy<Value = (bool, String)> {
        prop_oneof![
            (0usize..9).prop_map(|i| (true, format!("(move l{} l{})", i, i + 1))),
            Just((true, "(wait)".to_string())),
            Just((false, String::new())),
            Just((false, "   ".to_string())),
            "[a-z ]{0,20}".prop_map(|c| (false, format!("; {}", c))),
        ]
    }

    proptest! {
        #[test]
        fn prop_plan_length_equals_action_lines(lines in proptest::collection::vec(line_strategy(), 0..40)) {
            let expected = lines.iter().filter(|(is_action, _)| *is_action).count();
            let text: String = lines.iter().map(|(_, l)| format!("{}\n", l)).collect();
            let plan = parse_plan(&text, &robot(), "enhsp").unwrap();
            prop_assert_eq!(plan.len(), expected);
        }

        #[test]
        fn prop_unmatched_lines_fail(garbage in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
            let text = format!("(move l0 l1)\n{}\n", garbage);
            let result = parse_plan(&text, &robot(), "enhsp");
            let is_malformed_on_line_2 = matches!(result, Err(ParseError::Malformed { line: 2, .. }));
            prop_assert!(is_malformed_on_line_2);
        }
    }
}
