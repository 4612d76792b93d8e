//! Plan model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::problem::{ActionSchema, Object};

/// An action schema applied to concrete objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInstance {
    pub action: ActionSchema,
    pub parameters: Vec<Object>,
}

impl ActionInstance {
    pub fn new(action: ActionSchema, parameters: Vec<Object>) -> Self {
        Self { action, parameters }
    }

    pub fn name(&self) -> &str {
        &self.action.name
    }
}

impl fmt::Display for ActionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.parameters.iter().map(|o| o.name.as_str()).collect();
        write!(f, "{}({})", self.action.name, params.join(", "))
    }
}

/// A totally ordered sequence of action instances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialPlan {
    actions: Vec<ActionInstance>,
}

impl SequentialPlan {
    pub fn new(actions: Vec<ActionInstance>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[ActionInstance] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionInstance> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for SequentialPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            writeln!(f, "{}", action)?;
        }
        Ok(())
    }
}
