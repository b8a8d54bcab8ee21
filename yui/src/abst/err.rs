use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("failed to parse '{input}': {reason}")]
pub struct ParseError { 
    pub input: String,
    pub reason: String
}

impl ParseError { 
    pub fn new<S1, S2>(input: S1, reason: S2) -> Self
    where S1: Into<String>, S2: Into<String> { 
        Self { input: input.into(), reason: reason.into() }
    }
}

impl std::error::Error for ParseError {}
