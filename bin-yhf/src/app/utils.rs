use std::str::FromStr;
use clap::ValueEnum;
use derive_more::Display;
use yui_link::Braid;

use super::err::{err, AppError, AppResult};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Format {
    #[default] Unicode,
    Ascii
}

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> AppResult<R>
where F: FnOnce() -> AppResult<R> + std::panic::UnwindSafe {
    std::panic::catch_unwind(f).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "unknown source of error".to_owned()
            }
        };
        Err(AppError::Panic(info).into())
    })
}

// Reads a braid word (`s1 s1 -s2 t3`) or a JSON code (`[1, 1, -2]`).
pub fn load_braid(input: &str, strands: Option<usize>, mirror: bool) -> AppResult<Braid> {
    let b = match Braid::from_str(input) {
        Ok(b) => b,
        Err(e) => return err!("invalid input braid '{input}': {e}")
    };

    let b = match strands {
        Some(n) if n < b.strands() => return err!("{b} needs at least {} strands.", b.strands()),
        Some(n) => b.with_strands(n)?,
        None => b
    };

    if mirror {
        Ok(b.mirror())
    } else {
        Ok(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load() {
        let b = load_braid("s1 s1 -s2", None, false).unwrap();
        assert_eq!(b, Braid::from([1, 1, -2]));

        let b = load_braid("[1, 1, -2]", Some(4), true).unwrap();
        assert_eq!(b.strands(), 4);
        assert_eq!(b.elements(), Braid::from([-1, -1, 2]).elements());

        assert!(load_braid("s1 x", None, false).is_err());
        assert!(load_braid("s1 s2", Some(2), false).is_err());
    }

    #[test]
    fn panic_is_caught() {
        let res: AppResult<()> = guard_panic(|| panic!("boom"));
        assert_eq!(res.unwrap_err().to_string(), "panic: boom");
    }
}
