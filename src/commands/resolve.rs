//! `jconverge resolve` - show the policy governing a host.

use crate::cli::HostArgs;
use crate::ui;
use anyhow::Result;
use convergence::{Host, PolicyTable};

pub fn run(table: &PolicyTable, args: &HostArgs) -> Result<()> {
    let host = Host::new(&args.family, &args.os_version);
    let key = convergence::resolve(&host, table)?;
    let desired = table.lookup(&key)?;

    ui::header(&format!("{host}"));
    ui::kv("policy key", key.as_str());
    ui::kv("packages", &desired.packages.join(", "));
    ui::kv(
        "alternative",
        desired.alternative.as_deref().unwrap_or("(unmanaged)"),
    );
    ui::kv(
        "default symlink",
        if desired.supports_default_symlink {
            "yes"
        } else {
            "no"
        },
    );
    ui::kv(
        "license flow",
        if desired.license_file_required {
            "required"
        } else {
            "not required"
        },
    );
    Ok(())
}
