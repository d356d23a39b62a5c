//! Parsing of one line typed at the question prompt.

/// What a line of input asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line.
    Empty,
    /// `exit`, `quit`, `/exit` or `/quit`, in any case.
    Exit,
    /// `/help`.
    Help,
    /// `/history`.
    History,
    /// `/reset`.
    Reset,
    /// `/load <path>`.
    Load(&'a str),
    /// `/load` without a path.
    LoadUsage,
    /// Any other slash command.
    Unknown(&'a str),
    /// A question for the model.
    Question(&'a str),
}

/// Classifies a line of input.
#[must_use]
pub fn parse(input: &str) -> Command<'_> {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }
    if is_exit(input) {
        return Command::Exit;
    }
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Question(input);
    };

    let (name, argument) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, argument)| (name, argument.trim()));
    match name.to_ascii_lowercase().as_str() {
        "exit" | "quit" | "q" => Command::Exit,
        "help" | "?" => Command::Help,
        "history" => Command::History,
        "reset" | "clear" => Command::Reset,
        "load" if argument.is_empty() => Command::LoadUsage,
        "load" => Command::Load(unquote(argument)),
        _ => Command::Unknown(input),
    }
}

fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Strips one pair of matching quotes, as left by terminals on dropped files.
#[must_use]
pub fn unquote(path: &str) -> &str {
    let path = path.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = path
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    path
}
