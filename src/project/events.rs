//! Events, instructions and the recursive walks the refactorer drives.
//!
//! An [`EventsList`] is a tree: every [`Event`] owns its conditions, actions
//! and sub-events. Instructions themselves can nest (`And`/`Or` conditions
//! carry sub-instructions). The walks below visit every instruction and every
//! raw expression of the tree, depth first, in document order.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Qualified instruction type, e.g. `MyExtension::MyBehavior::MyMethod`.
    pub type_name: String,
    /// Raw parameter texts.
    pub parameters: Vec<String>,
    pub sub_instructions: Vec<Instruction>,
    pub inverted: bool,
}

impl Instruction {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sub_instruction(mut self, instruction: Instruction) -> Self {
        self.sub_instructions.push(instruction);
        self
    }

    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// Set a parameter, growing the list with empty parameters if needed.
    pub fn set_parameter(&mut self, index: usize, text: impl Into<String>) {
        if self.parameters.len() <= index {
            self.parameters.resize(index + 1, String::new());
        }
        self.parameters[index] = text.into();
    }

    pub fn parameters_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Whether an instruction is read as a condition or run as an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionKind {
    Condition,
    Action,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    #[default]
    Standard,
    Group {
        name: String,
    },
    Comment {
        text: String,
    },
    While {
        while_conditions: Vec<Instruction>,
    },
    Repeat {
        expression: String,
    },
    ForEach {
        object: String,
    },
    Link {
        target: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind: EventKind,
    pub conditions: Vec<Instruction>,
    pub actions: Vec<Instruction>,
    pub sub_events: EventsList,
    pub disabled: bool,
}

impl Event {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: EventKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, instruction: Instruction) -> Self {
        self.conditions.push(instruction);
        self
    }

    pub fn with_action(mut self, instruction: Instruction) -> Self {
        self.actions.push(instruction);
        self
    }

    pub fn with_sub_event(mut self, event: Event) -> Self {
        self.sub_events.insert(event);
        self
    }

    /// Whether this event can carry instructions and sub-events at all.
    pub fn can_have_instructions(&self) -> bool {
        !matches!(self.kind, EventKind::Comment { .. } | EventKind::Link { .. })
    }

    /// Instruction lists of the event, each with the role of its instructions.
    pub fn instruction_lists_mut(&mut self) -> Vec<(&mut Vec<Instruction>, InstructionKind)> {
        let mut lists = Vec::with_capacity(3);
        if let EventKind::While { while_conditions } = &mut self.kind {
            lists.push((while_conditions, InstructionKind::Condition));
        }
        lists.push((&mut self.conditions, InstructionKind::Condition));
        lists.push((&mut self.actions, InstructionKind::Action));
        lists
    }

    /// Expressions held by the event itself (outside of instructions).
    pub fn expressions_mut(&mut self) -> Vec<&mut String> {
        match &mut self.kind {
            EventKind::Repeat { expression } => vec![expression],
            _ => Vec::new(),
        }
    }

    /// Object name held by the event itself (`ForEach` events).
    pub fn object_reference_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            EventKind::ForEach { object } => Some(object),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventsList {
    events: Vec<Event>,
}

impl EventsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: Event) -> &mut Event {
        self.events.push(event);
        let last = self.events.len() - 1;
        &mut self.events[last]
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Event> {
        self.events.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Visit every event of the tree, parents before their sub-events.
    pub fn for_each_event_mut(&mut self, f: &mut dyn FnMut(&mut Event)) {
        for event in &mut self.events {
            f(event);
            if event.can_have_instructions() {
                event.sub_events.for_each_event_mut(f);
            }
        }
    }

    /// Visit every instruction of the tree, including nested sub-instructions.
    pub fn for_each_instruction_mut(
        &mut self,
        f: &mut dyn FnMut(&mut Instruction, InstructionKind),
    ) {
        self.for_each_event_mut(&mut |event| {
            if !event.can_have_instructions() {
                return;
            }
            for (list, kind) in event.instruction_lists_mut() {
                visit_instructions(list, kind, f);
            }
        });
    }
}

fn visit_instructions(
    instructions: &mut [Instruction],
    kind: InstructionKind,
    f: &mut dyn FnMut(&mut Instruction, InstructionKind),
) {
    for instruction in instructions {
        f(instruction, kind);
        visit_instructions(&mut instruction.sub_instructions, kind, f);
    }
}
