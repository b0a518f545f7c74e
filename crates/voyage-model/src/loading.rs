// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for asymmetric traveling salesperson instances.
//!
//! The loader reads whitespace-delimited text into a validated `Model`. The
//! first token is the number of locations `N`, followed by `N` rows of `N`
//! tokens each, where the token in row `i` and column `j` is the cost of
//! traveling from location `i` to location `j`:
//!
//! ```raw
//! 4
//! -   10  15  20
//! 5   -   9   10
//! 6   13  -   12
//! 8   8   9   -
//! ```
//!
//! Missing edges are written as `-`, `inf` or `x`. Formats that encode
//! infinity as a large integer are supported through `forbid_at_least`. The
//! diagonal is always unreachable, so whatever token appears there is read
//! and ignored. Comments start with `#` and run to the end of the line.

use crate::{
    index::LocationIndex,
    model::{Model, ModelBuilder},
};
use num_traits::{PrimInt, Signed};
use std::{
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Tokens that denote a missing edge.
const UNREACHABLE_TOKENS: [&str; 4] = ["-", "inf", "INF", "x"];

/// The error type for the problem loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before all costs were read.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The number of locations is not a positive integer.
    InvalidDimensions,
    /// An edge carries a negative cost.
    NegativeCost(NegativeCostError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

/// The edge that carried a negative cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeCostError {
    /// The tail of the offending edge.
    pub from: LocationIndex,
    /// The head of the offending edge.
    pub to: LocationIndex,
    /// The offending token as it appeared in the input.
    pub token: String,
}

impl std::fmt::Display for NegativeCostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge {} -> {} has negative cost {}",
            self.from.get(),
            self.to.get(),
            self.token
        )
    }
}

impl std::error::Error for NegativeCostError {}

impl Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => {
                write!(f, "The number of locations must be a positive integer")
            }
            Self::NegativeCost(e) => write!(f, "Invalid cost: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::NegativeCost(e) => Some(e),
            Self::UnexpectedEof | Self::InvalidDimensions => None,
        }
    }
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ProblemLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<NegativeCostError> for ProblemLoaderError {
    fn from(e: NegativeCostError) -> Self {
        Self::NegativeCost(e)
    }
}

/// A configurable loader for traveling salesperson instances.
///
/// # Configuration
/// * `forbid_at_least`: Any cost $\ge$ this value is treated as a missing edge.
///   Useful for formats where "Infinity" is represented by a large integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader<T> {
    forbid_at_least: Option<T>,
}

impl<T> Default for ProblemLoader<T> {
    fn default() -> Self {
        Self {
            forbid_at_least: None,
        }
    }
}

impl<T> ProblemLoader<T>
where
    T: PrimInt + Signed + FromStr + Display + Debug,
{
    /// Creates a new `ProblemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a threshold value. Any cost read from the input that is greater
    /// than or equal to `v` is treated as a missing edge.
    #[inline]
    pub fn forbid_at_least(mut self, v: T) -> Self {
        self.forbid_at_least = Some(v);
        self
    }

    /// Loads a problem from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Model<T>, ProblemLoaderError> {
        let mut sc = Scanner::new(rdr);

        let n_token = sc.next_token()?;
        let n = parse_token::<usize>(&n_token)
            .map_err(|_| ProblemLoaderError::InvalidDimensions)?;
        if n == 0 {
            return Err(ProblemLoaderError::InvalidDimensions);
        }

        let mut builder = ModelBuilder::new(n);

        for i in 0..n {
            let from = LocationIndex::new(i);
            for j in 0..n {
                let to = LocationIndex::new(j);
                let token = sc.next_token()?;

                if i == j || UNREACHABLE_TOKENS.contains(&token.as_str()) {
                    continue;
                }

                let cost: T = parse_token(&token)?;
                if cost < T::zero() {
                    return Err(ProblemLoaderError::NegativeCost(NegativeCostError {
                        from,
                        to,
                        token,
                    }));
                }

                let forbidden = cost == T::max_value()
                    || self.forbid_at_least.is_some_and(|limit| cost >= limit);
                if !forbidden {
                    builder.set_cost(from, to, cost);
                }
            }
        }

        Ok(builder.build())
    }

    /// Loads a problem from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model<T>, ProblemLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Model<T>, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Model<T>, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn parse_token<T: FromStr>(token: &str) -> Result<T, ParseTokenError> {
    token.parse::<T>().map_err(|_| ParseTokenError {
        token: token.to_owned(),
        type_name: std::any::type_name::<T>(),
    })
}

/// Splits a reader into whitespace-delimited tokens, one line at a time.
struct Scanner<R> {
    rdr: R,
    pending: std::collections::VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            pending: std::collections::VecDeque::new(),
        }
    }

    /// Returns the next token, skipping blank lines and `#` comments.
    fn next_token(&mut self) -> Result<String, ProblemLoaderError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.rdr.read_line(&mut line)? == 0 {
                return Err(ProblemLoaderError::UnexpectedEof);
            }

            let content = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line.as_str(),
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }

        self.pending
            .pop_front()
            .ok_or(ProblemLoaderError::UnexpectedEof)
    }
}
