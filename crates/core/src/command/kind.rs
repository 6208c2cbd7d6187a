/// The closed set of operations dispatchable through gitrelay.
///
/// `Invalid` is the default for unrecognized input and is never a valid
/// dispatch target - it exists so that command resolution is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Invalid,
    Push,
    Pull,
    Stage,
    Commit,
    Checkout,
}

impl CommandKind {
    /// Every kind that can actually be dispatched.
    pub const DISPATCHABLE: [CommandKind; 5] = [
        CommandKind::Push,
        CommandKind::Pull,
        CommandKind::Stage,
        CommandKind::Commit,
        CommandKind::Checkout,
    ];

    /// Map a textual command name to a kind. Matching is case-insensitive
    /// and exact; anything else resolves to `Invalid`, never an error.
    pub fn resolve(name: &str) -> CommandKind {
        Self::DISPATCHABLE
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(CommandKind::Invalid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Invalid => "Invalid",
            CommandKind::Push => "Push",
            CommandKind::Pull => "Pull",
            CommandKind::Stage => "Stage",
            CommandKind::Commit => "Commit",
            CommandKind::Checkout => "Checkout",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
