//! List rules command implementation.

use gear_lint_rules::default_registry;

/// Runs the list-rules command.
pub fn run() {
    println!("GEAR rules:\n");
    println!("{:<6} {:<22} {:<9} Description", "Code", "Name", "Default");
    println!("{}", "-".repeat(80));

    for rule in default_registry().iter() {
        println!(
            "{:<6} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nOverride severities in .gearrc, e.g.:");
    println!("  rules:");
    println!("    R01: error");
    println!("    R03: info");
}
