use crate::{
    errors::errors::{Error, ErrorImpl},
    types::types::Type,
    Position,
};

/// How many scopes may be open at once, the global scope included.
pub const MAX_FRAMES: usize = 1000;

/// A bound name. Functions are variables of `Function` type.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub type_: Type,
}

impl Variable {
    pub fn new(name: &str, type_: Type) -> Self {
        Variable {
            name: String::from(name),
            type_,
        }
    }
}

/// The scope stack.
///
/// Variables live in one flat list. Each frame marker records the length of
/// that list when the frame was opened, so closing a frame truncates back to
/// it. Frame 0 is the global scope and is never closed.
#[derive(Debug, Clone)]
pub struct Stack {
    variables: Vec<Variable>,
    frames: Vec<usize>,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            variables: vec![],
            frames: vec![0],
        }
    }

    pub fn push_frame(&mut self, position: Position) -> Result<(), Error> {
        if self.frames.len() >= MAX_FRAMES {
            return Err(Error::new(
                ErrorImpl::TooManyFrames { limit: MAX_FRAMES },
                position,
            ));
        }

        self.frames.push(self.variables.len());
        Ok(())
    }

    pub fn pop_frame(&mut self, position: Position) -> Result<(), Error> {
        if self.frames.len() <= 1 {
            return Err(Error::internal("tried to close the global scope", position));
        }

        if let Some(marker) = self.frames.pop() {
            self.variables.truncate(marker);
        }
        Ok(())
    }

    pub fn append(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Finds the innermost binding of `name`.
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.variables
            .iter()
            .rev()
            .find(|variable| variable.name == name)
    }

    /// Finds `name` among the bindings of the innermost frame only.
    pub fn find_in_current_frame(&self, name: &str) -> Option<&Variable> {
        let marker = self.frames.last().copied().unwrap_or(0);
        self.variables[marker..]
            .iter()
            .rev()
            .find(|variable| variable.name == name)
    }

    /// Number of open frames; 1 at global scope.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_global(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
