//! Interactive version conflict prompt

use dialoguer::Select;
use ojet_exchange::{ConflictResolver, Decision, Error, Result};
use tracing::warn;

/// Menu order of the conflict choices
const DECISIONS: [Decision; 3] = [Decision::KeepLocal, Decision::Overwrite, Decision::Cancel];

/// Asks on the terminal whether to keep or replace an installed component
pub struct TerminalResolver;

impl ConflictResolver for TerminalResolver {
    fn resolve(&self, name: &str, local: &str, requested: &str) -> Result<Decision> {
        if !console::user_attended() {
            warn!(
                "Cannot ask about '{}' without a terminal; pass --on-conflict=keep|overwrite|cancel",
                name
            );
            return Ok(Decision::Cancel);
        }

        let selection = Select::new()
            .with_prompt(format!(
                "Component '{}' {} is installed, but {} was requested",
                name, local, requested
            ))
            .items(&choices(local, requested))
            .default(0)
            .interact_opt()
            .map_err(|e| Error::Prompt(e.to_string()))?;

        Ok(decision_for(selection))
    }
}

fn choices(local: &str, requested: &str) -> [String; 3] {
    [
        format!("Keep the installed version {}", local),
        format!("Overwrite with version {}", requested),
        "Cancel".to_string(),
    ]
}

/// Escape or an out-of-range index cancels
fn decision_for(selection: Option<usize>) -> Decision {
    selection
        .and_then(|i| DECISIONS.get(i).copied())
        .unwrap_or(Decision::Cancel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_follow_decision_order() {
        let items = choices("1.0.0", "2.0.0");
        assert!(items[0].contains("1.0.0"));
        assert!(items[1].contains("2.0.0"));
        assert_eq!(decision_for(Some(0)), Decision::KeepLocal);
        assert_eq!(decision_for(Some(1)), Decision::Overwrite);
        assert_eq!(decision_for(Some(2)), Decision::Cancel);
    }

    #[test]
    fn test_escape_cancels() {
        assert_eq!(decision_for(None), Decision::Cancel);
        assert_eq!(decision_for(Some(7)), Decision::Cancel);
    }
}
