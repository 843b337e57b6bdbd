//! `jconverge policies` - list the loaded policy table.

use crate::ui;
use anyhow::Result;
use colored::Colorize;
use convergence::PolicyTable;

pub fn run(table: &PolicyTable) -> Result<()> {
    ui::header("Policy table");

    if table.is_empty() {
        ui::dim("(empty)");
        return Ok(());
    }

    for (key, desired) in table.iter() {
        let mut flags = Vec::new();
        if desired.set_alternatives {
            flags.push("alternatives");
        }
        if desired.supports_default_symlink {
            flags.push("default-symlink");
        }
        if desired.license_file_required {
            flags.push("license");
        }
        println!(
            "  {:<16} {}  {}",
            key.as_str().bold(),
            desired.packages.join(", "),
            format!("[{}]", flags.join(", ")).dimmed()
        );
    }

    println!();
    ui::dim(&format!("{} entries", table.len()));
    Ok(())
}
