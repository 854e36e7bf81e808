use std::{fmt, sync::Arc};

use crate::{types::ValueType, value::Value};

/// Produces a switch's value without reading anything from the input.
pub type SwitchHandler = Arc<dyn Fn(&Arg) -> Value + Send + Sync>;

/// Where a positional argument lands in the positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Inserted at this index; negative indices count from the end.
    Index(isize),
    /// Appended to the order as it stands at registration time.
    Append,
}

impl Position {
    /// Resolves the insertion point into a list of `len` declarations,
    /// clamped the same way `list.insert` clamps.
    pub(crate) fn insertion_index(self, len: usize) -> usize {
        match self {
            Self::Append => len,
            Self::Index(index) if index < 0 => len.saturating_sub(index.unsigned_abs()),
            Self::Index(index) => index.unsigned_abs().min(len),
        }
    }
}

/// One recognized argument.
///
/// Built through the constructors only, so a switch never carries a position.
#[derive(Clone)]
pub struct Arg {
    name: String,
    short: Option<char>,
    value_type: ValueType,
    switch: Option<SwitchHandler>,
    position: Option<Position>,
}

impl Arg {
    /// `--name=value`, `--name value` or `-c value`.
    pub fn named(name: impl Into<String>, short: Option<char>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            short,
            value_type,
            switch: None,
            position: None,
        }
    }

    pub fn positional(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::positional_at(name, value_type, Position::Append)
    }

    pub fn positional_at(name: impl Into<String>, value_type: ValueType, position: Position) -> Self {
        Self {
            name: name.into(),
            short: None,
            value_type,
            switch: None,
            position: Some(position),
        }
    }

    /// A switch takes its value from `handler` unless given as `--name=value`,
    /// in which case `value_type` parses the explicit value.
    pub fn switch(
        name: impl Into<String>,
        short: Option<char>,
        value_type: ValueType,
        handler: impl Fn(&Arg) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            short,
            value_type,
            switch: Some(Arc::new(handler)),
            position: None,
        }
    }

    /// A boolean switch that sets `true`.
    pub fn flag(name: impl Into<String>, short: Option<char>) -> Self {
        Self::switch(name, short, ValueType::BOOL, |_| Value::Bool(true))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_switch(&self) -> bool {
        self.switch.is_some()
    }

    pub(crate) fn invoke_switch(&self) -> Option<Value> {
        self.switch.as_ref().map(|handler| handler(self))
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("value_type", &self.value_type)
            .field("switch", &self.switch.is_some())
            .field("position", &self.position)
            .finish()
    }
}
