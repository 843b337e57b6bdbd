//! Plan rendering - user-facing display of convergence plans.

use colored::Colorize;
use convergence::Action;

/// Display a plan in a user-friendly format.
pub fn display_plan(actions: &[Action]) {
    if actions.is_empty() {
        println!();
        println!("  {} Already converged, nothing to do", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Convergence Plan".bold()
    );
    println!("│");

    for (step, action) in actions.iter().enumerate() {
        let (symbol, label) = describe(action);
        println!(
            "│ {:>2}. {} {:<18} {}",
            step + 1,
            symbol,
            label,
            action.target().dimmed()
        );
    }

    println!("│");
    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} actions ({} installs, {} inclusions)",
        actions.len().to_string().bold(),
        count(actions, "install_package").to_string().green(),
        count(actions, "include_policy").to_string().cyan(),
    );
    println!("└─────────────────────────────────────────────────────┘");
}

/// Render a plan as a JSON array on stdout.
pub fn display_plan_json(actions: &[Action]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(actions)?);
    Ok(())
}

fn describe(action: &Action) -> (colored::ColoredString, &'static str) {
    match action {
        Action::InstallPackage(_) => ("+".green(), "install package"),
        Action::SetAlternative(_) => ("~".yellow(), "set alternative"),
        Action::WriteFile(_) => ("+".green(), "write file"),
        Action::DeleteFile(_) => ("-".red(), "delete file"),
        Action::IncludePolicy(_) => ("»".cyan(), "include policy"),
        Action::EmitNotification(_) => ("!".blue(), "notify"),
    }
}

fn count(actions: &[Action], kind: &str) -> usize {
    actions.iter().filter(|a| a.kind() == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_by_kind() {
        let actions = [
            Action::InstallPackage("openjdk-8-jdk".into()),
            Action::InstallPackage("openjdk-8-jre-headless".into()),
            Action::IncludePolicy("default-java-symlink".into()),
        ];
        assert_eq!(count(&actions, "install_package"), 2);
        assert_eq!(count(&actions, "include_policy"), 1);
        assert_eq!(count(&actions, "delete_file"), 0);
    }
}
