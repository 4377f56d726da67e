//! List rules command implementation.

use tracing_lint_rules::{all_rules, recommended_rules, PLUGIN};

/// Runs the list-rules command.
pub fn run() {
    let recommended: Vec<&str> = recommended_rules().iter().map(|r| r.name()).collect();

    println!("{} {}\n", PLUGIN.name, PLUGIN.version);
    println!(
        "{:<7} {:<38} {:<11} {:<9} {:<4} Description",
        "Code", "Name", "Category", "Severity", "Rec"
    );
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        let marker = if recommended.contains(&rule.name()) {
            "*"
        } else {
            ""
        };
        println!(
            "{:<7} {:<38} {:<11} {:<9} {:<4} {}",
            rule.code(),
            rule.name(),
            rule.category().to_string(),
            rule.default_severity().to_string(),
            marker,
            rule.description()
        );
    }

    println!("\nPresets (set `preset` in tracing-lint.toml):");
    println!("  recommended  - rules marked * (default)");
    println!("  all          - every rule");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  tracing-lint check --rules invalid-skip-attribute");
    println!("  tracing-lint check --rules TL001,TL002");
}
