/// A parsed command line: the command name and its positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Split `input` into a command name and arguments.
///
/// Tokens are separated by runs of Unicode whitespace. There is no quoting or
/// escaping, so a space always splits. Returns `None` when the input holds no
/// tokens at all.
pub fn tokenize(input: &str) -> Option<Invocation> {
    let mut tokens = input.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(Invocation {
        name,
        args: tokens.collect(),
    })
}
