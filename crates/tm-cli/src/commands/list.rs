use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tm_core::SceneRecord;

pub fn run(file: &Path) -> Result<(), String> {
    let graph = super::load_graph(file)?;

    if graph.is_empty() {
        println!("  No scenes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind", "Exits", "Intro"]);

    for scene in graph.scenes() {
        table.add_row(vec![
            scene.name.clone(),
            kind_label(scene),
            exits_label(scene),
            intro_label(scene),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes", graph.len());

    Ok(())
}

fn kind_label(scene: &SceneRecord) -> String {
    let mut kinds = Vec::new();
    if scene.is_death {
        kinds.push("death");
    }
    if scene.is_victory {
        kinds.push("victory");
    }
    if scene.go_to_random {
        kinds.push("random");
    }
    if scene.menu().is_some() {
        kinds.push("choices");
    }
    if kinds.is_empty() {
        "—".to_string()
    } else {
        kinds.join(", ")
    }
}

fn exits_label(scene: &SceneRecord) -> String {
    let exits: Vec<String> = scene
        .directions
        .iter()
        .flat_map(|d| d.exits())
        .map(|(dir, target)| format!("{dir}: {target}"))
        .collect();
    if exits.is_empty() {
        "—".to_string()
    } else {
        exits.join(", ")
    }
}

fn intro_label(scene: &SceneRecord) -> String {
    match scene.intro_message.as_deref() {
        None | Some("") => "—".to_string(),
        Some(intro) if intro.chars().count() > 40 => {
            let cut: String = intro.chars().take(37).collect();
            format!("{cut}...")
        }
        Some(intro) => intro.to_string(),
    }
}
