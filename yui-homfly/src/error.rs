use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Error {
    #[display("{_0}")]
    Link(yui_link::Error),

    #[display("resource exhausted: {what} exceeded the limit of {limit}.")]
    ResourceExhausted { what: &'static str, limit: usize },
}

impl From<yui_link::Error> for Error {
    fn from(e: yui_link::Error) -> Self {
        Error::Link(e)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Link(e) => Some(e),
            _ => None
        }
    }
}
