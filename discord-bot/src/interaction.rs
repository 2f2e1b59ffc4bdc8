//! Gateway-independent shape of the interactions the bot reacts to.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOption {
    pub name: String,
    pub value: String,
    /// Set on the option the user is currently typing into (autocomplete only).
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub options: Vec<InvocationOption>,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>, focused: bool) -> Self {
        self.options.push(InvocationOption {
            name: name.into(),
            value: value.into(),
            focused,
        });
        self
    }

    pub fn first_option(&self) -> Option<&InvocationOption> {
        self.options.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundInteraction {
    Autocomplete(CommandInvocation),
    Command(CommandInvocation),
    Other { kind: String },
}
