//! Command line parser
//!
//! A line is a command name followed by positional arguments, split on
//! whitespace. There is no quoting, escaping, piping or redirection: what you
//! type is what the command gets.

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command name, lowercased
    pub name: String,
    /// Arguments as typed
    pub args: Vec<String>,
}

/// Parse a raw input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Invocation> {
    let mut words = line.split_whitespace();
    let name = words.next()?.to_lowercase();
    Some(Invocation {
        name,
        args: words.map(str::to_string).collect(),
    })
}
