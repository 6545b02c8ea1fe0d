use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use bompa_core::{CameraSystem, WaypointGraph};

pub fn run(config: Option<&Path>) -> Result<(), String> {
    let config = super::load_config(config)?;
    config.validate().map_err(|e| e.to_string())?;

    let graph = WaypointGraph::new(config.waypoints.clone()).map_err(|e| e.to_string())?;
    let camera = CameraSystem::from_config(&config.camera_feeds, graph.len());

    println!("  {}", "Configuration OK".green().bold());
    println!(
        "  {} waypoints, {} camera feeds, {:.0} power draining {}/s per closed door",
        graph.len(),
        camera.feeds().len(),
        config.max_power,
        config.power_drain_rate
    );
    if let Some(shift) = config.shift_duration {
        println!("  Shift lasts {shift}s");
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Position", "Distance", "Door", "Cameras"]);

    for (index, point) in graph.points().iter().enumerate() {
        let door = graph
            .door_at(index)
            .map(|side| side.to_string())
            .unwrap_or_else(|| "--".to_string());
        let cameras: Vec<&str> = camera
            .feeds()
            .iter()
            .filter(|feed| feed.waypoint == index)
            .map(|feed| feed.name.as_str())
            .collect();
        table.add_row(vec![
            index.to_string(),
            format!("({:.1}, {:.1}, {:.1})", point.x, point.y, point.z),
            format!("{:.2}", point.distance(config.player_position)),
            door,
            if cameras.is_empty() {
                "--".to_string()
            } else {
                cameras.join(", ")
            },
        ]);
    }

    println!("{table}");
    Ok(())
}
