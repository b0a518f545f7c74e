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

//! Control-flow commands that observers hand back to a running search.

/// A command issued by a search observer.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep searching.
    #[default]
    Continue,
    /// Stop the search as soon as possible. The string describes why.
    Terminate(String),
}

impl SearchCommand {
    /// Returns `true` if this command asks the search to stop.
    #[inline]
    pub fn is_terminate(&self) -> bool {
        matches!(self, SearchCommand::Terminate(_))
    }
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_continue() {
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
        assert!(!SearchCommand::default().is_terminate());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        let stop = SearchCommand::Terminate("limit".to_string());
        assert!(stop.is_terminate());
        assert_eq!(format!("{}", stop), "Terminate: limit");
    }
}
