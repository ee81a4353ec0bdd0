use crate::alias::AliasTable;

/// Every command name the shell recognizes itself, in the order they are
/// offered as tab-completion candidates.
pub const VOCABULARY: [&str; 6] = ["exit", "alias", "mkdir", "rm", "run", "fetch"];

/// The fixed set of built-in commands (everything in [`VOCABULARY`] except
/// `exit`, which terminates the session instead of executing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Alias,
    Run,
    Mkdir,
    Rm,
    Fetch,
}

impl BuiltinKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "alias" => Some(Self::Alias),
            "run" => Some(Self::Run),
            "mkdir" => Some(Self::Mkdir),
            "rm" => Some(Self::Rm),
            "fetch" => Some(Self::Fetch),
            _ => None,
        }
    }
}

/// What the shell decided to do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The first token is exactly `exit`: terminate the session.
    Exit,
    /// The first token names a built-in; the remaining tokens are its
    /// arguments.
    Builtin(BuiltinKind, Vec<String>),
    /// The first token resolved in the alias table. Carries the stored
    /// expansion; any tokens after the alias name are discarded.
    Alias(String),
    /// None of the above: the full original line goes verbatim to the OS
    /// command interpreter.
    Passthrough(String),
}

/// Classify one raw input line.
///
/// Tokenization is naive whitespace splitting with no quoting; a blank line
/// yields `None` and the session treats it as a no-op iteration.
///
/// Precedence is fixed and enforced by the order of the checks below:
/// `Exit` > `Builtin` > `Alias` > `Passthrough`. A user-defined alias can
/// never shadow a built-in name, and nothing shadows `exit`.
pub fn classify(line: &str, aliases: &AliasTable) -> Option<Decision> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;

    if first == "exit" {
        return Some(Decision::Exit);
    }
    if let Some(kind) = BuiltinKind::from_name(first) {
        return Some(Decision::Builtin(kind, tokens.map(str::to_owned).collect()));
    }
    if let Some(expansion) = aliases.resolve(first) {
        return Some(Decision::Alias(expansion.to_owned()));
    }
    Some(Decision::Passthrough(line.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_aliases() -> AliasTable {
        AliasTable::new()
    }

    #[test]
    fn blank_line_is_none() {
        assert_eq!(classify("", &no_aliases()), None);
        assert_eq!(classify("   \t ", &no_aliases()), None);
    }

    #[test]
    fn exit_is_exact_and_case_sensitive() {
        assert_eq!(classify("exit", &no_aliases()), Some(Decision::Exit));
        assert_eq!(classify("  exit  ", &no_aliases()), Some(Decision::Exit));
        assert!(matches!(
            classify("EXIT", &no_aliases()),
            Some(Decision::Passthrough(_))
        ));
        assert!(matches!(
            classify("exits", &no_aliases()),
            Some(Decision::Passthrough(_))
        ));
    }

    #[test]
    fn exit_beats_alias_with_same_name() {
        let mut aliases = AliasTable::new();
        aliases.define("exit", "echo not really");
        assert_eq!(classify("exit", &aliases), Some(Decision::Exit));
    }

    #[test]
    fn builtin_beats_alias_with_same_name() {
        let mut aliases = AliasTable::new();
        aliases.define("mkdir", "echo shadowed");
        assert_eq!(
            classify("mkdir foo", &aliases),
            Some(Decision::Builtin(BuiltinKind::Mkdir, vec!["foo".into()]))
        );
    }

    #[test]
    fn builtin_args_are_remaining_tokens() {
        assert_eq!(
            classify("alias g git status", &no_aliases()),
            Some(Decision::Builtin(
                BuiltinKind::Alias,
                vec!["g".into(), "git".into(), "status".into()]
            ))
        );
    }

    #[test]
    fn alias_resolves_to_stored_expansion() {
        let mut aliases = AliasTable::new();
        aliases.define("g", "git status");
        assert_eq!(
            classify("g", &aliases),
            Some(Decision::Alias("git status".into()))
        );
    }

    #[test]
    fn alias_invocation_discards_extra_tokens() {
        let mut aliases = AliasTable::new();
        aliases.define("g", "git status");
        assert_eq!(
            classify("g --short", &aliases),
            Some(Decision::Alias("git status".into()))
        );
    }

    #[test]
    fn unknown_name_passes_the_raw_line_through() {
        assert_eq!(
            classify("ls -la /tmp", &no_aliases()),
            Some(Decision::Passthrough("ls -la /tmp".into()))
        );
    }
}
