use crate::command::args::{CommandArgs, Flag};
use crate::errors::Error;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

pub trait FlagRule {
    fn check(&self, args: &CommandArgs) -> FlagDecision;
}

pub struct HelpFlag;
impl FlagRule for HelpFlag {
    fn check(&self, args: &CommandArgs) -> FlagDecision {
        if args.has(Flag::Help) {
            FlagDecision::ShortCircuitUsage
        } else {
            FlagDecision::Continue
        }
    }
}

/// Rejects `--name value` options the command does not understand.
pub struct KnownOptions(pub &'static [&'static str]);
impl FlagRule for KnownOptions {
    fn check(&self, args: &CommandArgs) -> FlagDecision {
        match args.option_names().find(|n| !self.0.contains(n)) {
            Some(unknown) => FlagDecision::Error(Error::parse(format!(
                "Unknown option --{unknown}."
            ))),
            None => FlagDecision::Continue,
        }
    }
}

pub struct MaxPositionals(pub usize);
impl FlagRule for MaxPositionals {
    fn check(&self, args: &CommandArgs) -> FlagDecision {
        if args.positional_count() > self.0 {
            FlagDecision::Error(Error::parse(format!(
                "Expected at most {} argument(s), got {}.",
                self.0,
                args.positional_count()
            )))
        } else {
            FlagDecision::Continue
        }
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}

impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }

    /// Help first, then option names, then arity.
    pub fn standard(options: &'static [&'static str], max_positionals: usize) -> Self {
        Self::new(vec![
            Box::new(HelpFlag),
            Box::new(KnownOptions(options)),
            Box::new(MaxPositionals(max_positionals)),
        ])
    }

    pub fn evaluate(&self, args: &CommandArgs) -> FlagDecision {
        // First matching short-circuit wins; otherwise Continue.
        for r in &self.rules {
            match r.check(args) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
