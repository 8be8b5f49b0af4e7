//! Variables and variable containers.

use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Structure(IndexMap<String, Variable>),
    Array(Vec<Variable>),
}

impl Default for VariableValue {
    fn default() -> Self {
        VariableValue::Number(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub value: VariableValue,
}

impl Variable {
    pub fn number(value: f64) -> Self {
        Self {
            value: VariableValue::Number(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: VariableValue::String(value.into()),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            value: VariableValue::Boolean(value),
        }
    }

    pub fn structure() -> Self {
        Self {
            value: VariableValue::Structure(IndexMap::new()),
        }
    }

    /// Child of a structure variable.
    pub fn child(&self, name: &str) -> Option<&Variable> {
        match &self.value {
            VariableValue::Structure(children) => children.get(name),
            _ => None,
        }
    }

    /// Insert a child, turning the variable into a structure if needed.
    pub fn insert_child(&mut self, name: impl Into<String>, child: Variable) {
        if !matches!(self.value, VariableValue::Structure(_)) {
            self.value = VariableValue::Structure(IndexMap::new());
        }
        if let VariableValue::Structure(children) = &mut self.value {
            children.insert(name.into(), child);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariablesContainer {
    variables: IndexMap<String, Variable>,
}

impl VariablesContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) -> &mut Variable {
        let (index, _) = self.variables.insert_full(name.into(), variable);
        &mut self.variables[index]
    }

    pub fn has(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
