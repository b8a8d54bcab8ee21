use derive_more::Display;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("{_0}")]
    Input(String),

    #[display("panic: {_0}")]
    Panic(String),
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

macro_rules! err {
    ($($arg:tt)*) => {{
        use crate::app::err::AppError;
        let e = AppError::Input(format!($($arg)*));
        Err(e.into())
    }}
}

macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {{
        if !$cond {
            return err!($($arg)*);
        }
    }}
}

pub(crate) use {err, ensure};
