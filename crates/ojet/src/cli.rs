//! CLI argument parsing with clap
//!
//! Only global flags are declared here. Everything after them is handed to the
//! [`router`](crate::router), which validates it against the command table.

use clap::Parser;

/// ojet - scaffold, build, and serve JET web component apps
#[derive(Parser, Debug)]
#[command(name = "ojet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Task, scope, parameters, and options, e.g. `add component demo-card@1.0.0`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TASK")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_before_task() {
        let cli = Cli::parse_from(["ojet", "-vv", "build", "--release", "--platform=android"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.args, vec!["build", "--release", "--platform=android"]);
    }

    #[test]
    fn test_task_options_are_not_interpreted() {
        let cli = Cli::parse_from(["ojet", "serve", "--server-port", "9000", "-q"]);
        assert!(!cli.quiet);
        assert_eq!(cli.args, vec!["serve", "--server-port", "9000", "-q"]);
    }
}
