/*
    Textual notation: `(~d0~,d1~d2~...~)*(~1~0~)**(e)`
*/

use std::fmt;
use std::str::FromStr;

use crate::digit::Digit;
use crate::poly::number::PolyNum;
use crate::{Error, Result};

/// Digit separator of the PN notation.
pub const SEP: char = '~';

const CONST_TRAPEZOID: &str = "const:(~2~,-4~4~-4~4~...~)";
const CONST_UNIT_STEP: &str = "const:(~1~,2~2~2~2~...~)";

impl<D: Digit, const N: usize> PolyNum<D, N> {
    /// Parses the PN notation.
    ///
    /// Digits left of the `,` mark places at or above `p^0`: extra leading
    /// digits raise the exponent, a zero or empty head lowers it through
    /// normalization. `const:` tokens name the built-in kernels. An
    /// exponent suffix `*(...)**(e)` scales by `p^e`.
    pub fn from_literal(s: &str) -> Result<Self> {
        let (mantissa, exponent) = parse_literal::<D>(s, N)?;
        Ok(Self::from_mantissa(mantissa, exponent))
    }

    /// Renders with at most `cut` mantissa digits, marking elision with a
    /// trailing `...~`. The value itself is not truncated.
    pub fn format_cut(&self, cut: usize) -> String {
        self.render(Some(cut))
    }

    fn render(&self, cut: Option<usize>) -> String {
        let ma = self.mantissa();
        let mut out = format!("({SEP}{}{SEP}", ma[0]);
        if !self.is_zero() {
            let rest = &ma[1..];
            let mut last = rest.len();
            while last > 0 && rest[last - 1].is_zero() {
                last -= 1;
            }
            let mut rest = &rest[..last];
            let mut elided = false;
            if let Some(c) = cut {
                let keep = c.saturating_sub(1);
                if c < N && rest.len() >= keep {
                    elided = true;
                    rest = &rest[..keep];
                }
            }
            if !rest.is_empty() {
                out.push(',');
                for d in rest {
                    out.push_str(&format!("{d}{SEP}"));
                }
            }
            if elided {
                out.push_str("...~");
            }
        }
        out.push(')');
        if self.exponent() != 0 && !self.is_zero() {
            out.push_str(&format!("*({SEP}1{SEP}0{SEP})**({})", self.exponent()));
        }
        out
    }
}

impl<D: Digit, const N: usize> FromStr for PolyNum<D, N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_literal(s)
    }
}

impl<D: Digit, const N: usize> fmt::Display for PolyNum<D, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

fn parse_literal<D: Digit>(s: &str, n: usize) -> Result<(Vec<D>, i64)> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let parts: Vec<&str> = compact.split("**").collect();
    if parts.len() > 2 {
        return Err(Error::Parse {
            input: s.to_string(),
            reason: "at most one '**' exponent group is allowed",
        });
    }
    let mut exponent = 0i64;
    if parts.len() == 2 {
        let e = parts[1].trim_matches(|c| c == '(' || c == ')');
        exponent = e.parse::<i64>().map_err(|_| Error::Parse {
            input: parts[1].to_string(),
            reason: "malformed exponent",
        })?;
    }

    // mantissa group is everything before the first '*'
    let head = parts[0].split('*').next().unwrap_or("");

    if head.starts_with('c') {
        // named constants are generated to full length, not parsed digit-wise
        let mantissa: Vec<D> = if head == CONST_TRAPEZOID {
            (0..n)
                .map(|i| {
                    D::from_i64(if i == 0 {
                        2
                    } else if i % 2 == 1 {
                        -4
                    } else {
                        4
                    })
                })
                .collect()
        } else if head == CONST_UNIT_STEP {
            let mut m = vec![D::from_i64(2); n];
            if n > 0 {
                m[0] = D::one();
            }
            m
        } else {
            return Err(Error::Parse {
                input: head.to_string(),
                reason: "unknown PN constant",
            });
        };
        return Ok((mantissa, exponent));
    }

    // mark the comma position, then strip the group decoration
    let marked = head.replace(&format!("{SEP},"), "`,");
    let trimmed = marked.trim_matches(|c: char| c == '(' || c == ')' || c == SEP);

    let mut halves = trimmed.splitn(2, "`,");
    let left = halves.next().unwrap_or("");
    let right = halves.next();

    let digits_l: Vec<&str> = if left.is_empty() {
        vec!["0"]
    } else {
        left.split(SEP).collect()
    };
    exponent += digits_l.len() as i64 - 1;

    let mut digits = digits_l;
    if let Some(r) = right {
        let r = r.trim_matches(SEP);
        if !r.is_empty() {
            digits.extend(r.split(SEP));
        }
    }

    let mut mantissa = Vec::with_capacity(digits.len());
    for d in digits {
        mantissa.push(D::from_literal(d)?);
    }
    Ok((mantissa, exponent))
}
