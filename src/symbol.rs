//! Declares the [`Schlafli`] symbol type, its parser, and the dihedral-angle
//! solver.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::{Float, EPS};

/// The result of an operation involving a Schläfli symbol.
pub type SymbolResult<T> = Result<T, SymbolError>;

/// Represents an error in a Schläfli symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolError {
    /// An entry couldn't be parsed as a number or a fraction.
    Parse {
        /// The offending token.
        token: String,
    },

    /// An entry was zero, negative, or not finite.
    NonPositive {
        /// The offending value.
        value: Float,
    },

    /// The dihedral-angle recurrence left the interval [0, 1]: the symbol
    /// does not describe a constructible reflection group in Euclidean
    /// space (e.g. a hyperbolic tiling such as {7, 3}).
    AngleDomain {
        /// The out-of-range value of the recurrence.
        value: Float,
    },
}

impl Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { token } => {
                write!(f, "couldn't parse symbol entry \"{}\"", token)
            }

            Self::NonPositive { value } => {
                write!(f, "symbol entry {} is not a positive finite number", value)
            }

            Self::AngleDomain { value } => {
                write!(
                    f,
                    "symbol has no Euclidean realization (recurrence value {})",
                    value
                )
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// A [Schläfli symbol](https://en.wikipedia.org/wiki/Schl%C3%A4fli_symbol):
/// an ordered sequence {*p*, *q*, *r*, …} of positive rationals encoding a
/// regular polytope's local structure. A symbol of length *n* describes a
/// polytope in (*n* + 1)-dimensional space; the empty symbol describes the
/// unit segment.
///
/// Entries are stored as floats; fractional entries such as 5/2 denote star
/// polytopes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schlafli(Vec<Float>);

impl Schlafli {
    /// Initializes a new symbol from its entries, validating that each is
    /// positive and finite.
    pub fn new(entries: Vec<Float>) -> SymbolResult<Self> {
        for &q in &entries {
            if !(q > 0.0 && q.is_finite()) {
                return Err(SymbolError::NonPositive { value: q });
            }
        }

        Ok(Self(entries))
    }

    /// Parses a single entry, which may be an integer like `8`, a decimal
    /// like `2.5`, or a fraction like `7/3`.
    pub fn parse_entry(token: &str) -> SymbolResult<Float> {
        let parse_err = || SymbolError::Parse {
            token: token.to_owned(),
        };

        let value = match token.split_once('/') {
            Some((num, den)) => {
                let num: Float = num.trim().parse().map_err(|_| parse_err())?;
                let den: Float = den.trim().parse().map_err(|_| parse_err())?;
                num / den
            }
            None => token.trim().parse().map_err(|_| parse_err())?,
        };

        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(SymbolError::NonPositive { value })
        }
    }

    /// Returns the entries of the symbol.
    pub fn entries(&self) -> &[Float] {
        &self.0
    }

    /// Returns the rank of the symbol, i.e. its number of entries.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Returns the dimension of the space the polytope described by the
    /// symbol lives in, which is one more than the rank.
    pub fn dim(&self) -> usize {
        self.rank() + 1
    }

    /// Returns the symbol of the polytope's facet, i.e. the symbol with its
    /// last entry removed.
    ///
    /// # Panics
    /// Panics on the empty symbol, whose segment has no facet symbol.
    pub fn facet(&self) -> Self {
        Self(self.0[..self.rank() - 1].to_vec())
    }

    /// Returns whether the symbol has any fractional ("star") entry, like
    /// the 5/2 in the small stellated dodecahedron {5/2, 5}.
    ///
    /// Star polytopes' cell complexes don't satisfy the standard Euler
    /// formula, so the self-check is skipped for them.
    pub fn is_star(&self) -> bool {
        self.0.iter().any(|&q| (q - q.round()).abs() > EPS)
    }

    /// Returns whether the symbol has any entry equal to 2, like the digon
    /// {2}. These polytopes have pairs of coincident elements which collapse
    /// under canonical deduplication, so, as with star symbols, the Euler
    /// self-check doesn't apply to them.
    pub fn is_degenerate(&self) -> bool {
        self.0.iter().any(|&q| (q - 2.0).abs() <= EPS)
    }

    /// Returns the sine and cosine of half the dihedral angle between
    /// adjacent facets of the polytope described by the symbol.
    ///
    /// This runs a continued-fraction-like recurrence over the squared
    /// cosines of π over each entry. A value within [`EPS`] of 1 is clamped
    /// to exactly 1, so that planar tilings like {6, 3} don't glitch on the
    /// final square root. A value outside [0, 1] beyond that tolerance means
    /// the symbol has no Euclidean realization, and fails.
    pub fn half_dihedral(&self) -> SymbolResult<(Float, Float)> {
        let mut s: Float = 0.0;

        for &q in &self.0 {
            s = (std::f64::consts::PI / q).cos().powi(2) / (1.0 - s);
        }

        if (1.0 - s).abs() < EPS {
            s = 1.0;
        }

        if (0.0..=1.0).contains(&s) {
            Ok((s.sqrt(), (1.0 - s).sqrt()))
        } else {
            // Also catches NaN from a division by zero mid-recurrence.
            Err(SymbolError::AngleDomain { value: s })
        }
    }
}

impl FromStr for Schlafli {
    type Err = SymbolError;

    /// Parses a symbol from entries separated by commas and/or whitespace,
    /// e.g. `"4,3"`, `"5/2 5"` or `"{3, 3, 3}"`.
    fn from_str(s: &str) -> SymbolResult<Self> {
        Self::new(
            s.trim_matches(|c: char| c == '{' || c == '}' || c.is_whitespace())
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(Self::parse_entry)
                .collect::<SymbolResult<_>>()?,
        )
    }
}

impl Display for Schlafli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        for (i, &q) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }

            if (q - q.round()).abs() <= EPS {
                write!(f, "{}", q.round() as i64)?;
            } else {
                write!(f, "{}", q)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    /// Shorthand for building a symbol out of integer entries.
    fn symbol(entries: &[u32]) -> Schlafli {
        Schlafli::new(entries.iter().map(|&q| q as Float).collect()).unwrap()
    }

    #[test]
    fn parse_entries() {
        assert_eq!(Schlafli::parse_entry("8").unwrap(), 8.0);
        assert_eq!(Schlafli::parse_entry("2.5").unwrap(), 2.5);
        assert_abs_diff_eq!(Schlafli::parse_entry("7/3").unwrap(), 7.0 / 3.0);
    }

    #[test]
    fn parse_symbol() {
        assert_eq!("4,3".parse::<Schlafli>().unwrap(), symbol(&[4, 3]));
        assert_eq!("{3, 3, 5}".parse::<Schlafli>().unwrap(), symbol(&[3, 3, 5]));
        assert_eq!(
            "5/2 5".parse::<Schlafli>().unwrap(),
            Schlafli::new(vec![2.5, 5.0]).unwrap()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Schlafli::parse_entry("five"),
            Err(SymbolError::Parse { .. })
        ));
        assert!(matches!(
            Schlafli::parse_entry("1/2/3"),
            Err(SymbolError::Parse { .. })
        ));
        assert!(matches!(
            Schlafli::parse_entry("-3"),
            Err(SymbolError::NonPositive { .. })
        ));
        assert!(matches!(
            Schlafli::parse_entry("4/0"),
            Err(SymbolError::NonPositive { .. })
        ));
    }

    #[test]
    fn star_detection() {
        assert!(!symbol(&[5, 3]).is_star());
        assert!(Schlafli::new(vec![2.5, 5.0]).unwrap().is_star());
    }

    #[test]
    fn half_dihedral_square() {
        let (s, c) = symbol(&[4]).half_dihedral().unwrap();

        assert_abs_diff_eq!(s, (0.5_f64).sqrt(), epsilon = EPS);
        assert_abs_diff_eq!(c, (0.5_f64).sqrt(), epsilon = EPS);
    }

    #[test]
    fn half_dihedral_tetrahedron() {
        // The tetrahedron's dihedral angle is arccos(1/3) ≈ 70.53°.
        let (s, _) = symbol(&[3, 3]).half_dihedral().unwrap();

        assert_abs_diff_eq!(s * s, 1.0 / 3.0, epsilon = EPS);
    }

    #[test]
    fn half_dihedral_planar_tiling_clamps() {
        // {6, 3} tiles the plane: the recurrence lands on 1 up to roundoff.
        let (s, c) = symbol(&[6, 3]).half_dihedral().unwrap();

        assert_eq!(s, 1.0);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn half_dihedral_rejects_hyperbolic() {
        assert!(matches!(
            symbol(&[7, 3]).half_dihedral(),
            Err(SymbolError::AngleDomain { .. })
        ));
    }

    #[test]
    fn facet_symbol() {
        assert_eq!(symbol(&[4, 3, 3]).facet(), symbol(&[4, 3]));
        assert_eq!(symbol(&[4]).facet(), symbol(&[]));
    }

    #[test]
    fn display() {
        assert_eq!(symbol(&[4, 3]).to_string(), "{4, 3}");
        assert_eq!(Schlafli::new(vec![2.5, 5.0]).unwrap().to_string(), "{2.5, 5}");
    }
}
