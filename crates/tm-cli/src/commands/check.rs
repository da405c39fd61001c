use std::path::Path;

use colored::Colorize;
use tracing::warn;

pub fn run(file: &Path, start: &str) -> Result<(), String> {
    let graph = super::load_graph(file)?;

    let mut warnings = 0;
    if !graph.contains(start) {
        warn!(start, "start scene missing");
        println!(
            "  {} start scene '{start}' does not exist",
            "warning:".yellow().bold()
        );
        warnings += 1;
    }
    for dangling in graph.dangling_references() {
        warn!(
            scene = %dangling.scene,
            direction = %dangling.direction,
            target = %dangling.target,
            "dangling exit"
        );
        println!(
            "  {} scene '{}' leads {} to unknown scene '{}'",
            "warning:".yellow().bold(),
            dangling.scene,
            dangling.direction,
            dangling.target
        );
        warnings += 1;
    }

    let name = graph.title().unwrap_or("untitled");
    if warnings == 0 {
        println!("  All checks passed for '{name}'.");
    } else {
        println!(
            "  {warnings} warning{} for '{name}'.",
            if warnings == 1 { "" } else { "s" }
        );
    }
    println!("  {} scenes: {}", graph.len(), graph.names().collect::<Vec<_>>().join(", "));

    Ok(())
}
