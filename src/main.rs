//! Headless driver for the vocabulary scene.
//!
//! Prints the menu items, then reads `click <node>`, `nodes` and `quit` from
//! stdin. The clips in `public/` are short silent placeholders; replace them
//! with real recordings to hear anything on a connected host.

use std::io::{self, BufRead, Write};

use clap::Parser;
use vocab_market::{
    ClickOutcome, Config, NodeId, VocabularyScene, data_structures::scene_graph::SceneGraph,
};

const USER: &str = "console";

fn print_scene(app: &VocabularyScene<SceneGraph>) {
    let mut items: Vec<_> = app.scene().items.iter().collect();
    items.sort_by_key(|(id, _)| *id);
    for (id, item) in items {
        let label = app.host().text_of(item.label).unwrap_or_default();
        println!(
            "{:<16} label {:<4} \"{}\"  cycle {:<4} play {}",
            id, item.label, label, item.cycle_trigger, item.play_trigger
        );
    }
    let mut skipped: Vec<_> = app.scene().skipped.iter().collect();
    skipped.sort_by_key(|(id, _)| *id);
    for (id, reason) in skipped {
        println!("{:<16} not shown: {:?}", id, reason);
    }
}

fn parse_node(arg: Option<&str>) -> Option<NodeId> {
    arg.map(|a| a.trim_start_matches('#'))
        .and_then(|a| a.parse().ok())
        .map(NodeId)
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let mut app = vocab_market::run(&config)?;
    print_scene(&app);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match words.next() {
            Some("click") => match parse_node(words.next()) {
                Some(node) => match app.on_click(node, USER) {
                    ClickOutcome::Ignored => println!("{} is not a trigger", node),
                    ClickOutcome::Cycled { id, state } => {
                        let item = app.scene().item(&id).map(|item| item.label);
                        let text = item.and_then(|l| app.host().text_of(l)).unwrap_or_default();
                        println!("{} -> {:?}: \"{}\"", id, state, text);
                    }
                    ClickOutcome::Played { id } => println!("playing {}", id),
                    ClickOutcome::Failed(e) => println!("failed: {}", e),
                },
                None => println!("usage: click <node>"),
            },
            Some("nodes") => print_scene(&app),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command '{}', try click, nodes or quit", other),
            None => (),
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}
