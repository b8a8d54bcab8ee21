use std::fmt::Display;
use num_traits::ToPrimitive;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') { 
        format!("({s})")
    } else { 
        s
    }
}

// Renders a linear combination `r₀x₀ + r₁x₁ + ...`, 
// omitting unit coefficients and unit monomials.
pub fn lc<X, R, S>(mut terms: S) -> String
where 
    X: Display, 
    R: Display, 
    S: Iterator<Item = (X, R)>
{ 
    let mut res: Vec<String> = vec![];
    
    if let Some((x, r)) = terms.next() {
        let r = paren_expr(r);
        let x = x.to_string();

        let term = if r == "1" { 
            x
        } else if r == "-1" && x != "1" { 
            format!("-{x}")
        } else if x == "1" {
            r
        } else { 
            format!("{r}{x}")
        };

        res.push(term)
    } else { 
        return "0".to_string()
    }

    for (x, r) in terms {
        let r = paren_expr(r);
        let x = x.to_string();

        let (op, r) = match r.strip_prefix('-') { 
            Some(r) => ("-", r.to_owned()),
            None    => ("+", r)
        };

        let term = if x == "1" { 
            r
        } else if r == "1" { 
            x
        } else { 
            format!("{r}{x}")
        };

        res.push(op.to_string());
        res.push(term);
    }

    res.join(" ")
}

pub fn subscript<I>(i: I) -> String
where I: ToPrimitive {
    script(i, '\u{208B}', |d| { 
        char::from_u32(('\u{2080}' as u32) + d)
    })
}

pub fn superscript<I>(i: I) -> String 
where I: ToPrimitive {
    script(i, '\u{207B}', |d| match d { 
        1 => Some('\u{00B9}'),
        2 => Some('\u{00B2}'),
        3 => Some('\u{00B3}'),
        _ => char::from_u32(('\u{2070}' as u32) + d)
    })
}

fn script<I, F>(i: I, minus: char, digit: F) -> String
where I: ToPrimitive, F: Fn(u32) -> Option<char> {
    let i = i.to_i64().unwrap_or_default();
    let mut res = String::new();

    if i < 0 { 
        res.push(minus);
    }

    for c in i.unsigned_abs().to_string().chars() { 
        if let Some(s) = c.to_digit(10).and_then(&digit) { 
            res.push(s);
        }
    }

    res
}
