//! Exchange Tracker - Entry Point
//!
//! Interactive tracker for a combat exchange. Characters are added from the
//! command line or from templates, then driven phase by phase.

use exchange_tracker::combat::{StanceTier, TechniqueChoice};
use exchange_tracker::core::config::ExchangeConfig;
use exchange_tracker::core::error::Result;
use exchange_tracker::core::types::{Approach, CharacterId, NpcTier};
use exchange_tracker::entity::playbook::is_known_playbook;
use exchange_tracker::entity::{Character, CharacterDetails, CharacterDraft, ConditionType, Modifier, ModifierKind, Status};
use exchange_tracker::exchange::ExchangeState;
use exchange_tracker::techniques::{techniques_for, Mastery, Training};
use exchange_tracker::templates::TemplateLibrary;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Combat exchange tracker
#[derive(Parser, Debug)]
#[command(name = "exchange-tracker")]
#[command(about = "Track approaches, stances and techniques through a combat exchange")]
struct Args {
    /// Random seed for reproducible stance rolls
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding roster caps and fatigue/balance limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON template library to load and save
    #[arg(long)]
    templates: Option<PathBuf>,
}

struct Session {
    state: ExchangeState,
    library: TemplateLibrary,
    rng: ChaCha8Rng,
    templates_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("exchange_tracker=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExchangeConfig::load(path)?,
        None => ExchangeConfig::default(),
    };

    let mut library = match &args.templates {
        Some(path) if path.exists() => TemplateLibrary::load(path)?,
        _ => TemplateLibrary::new(),
    };
    library.merge_preloaded();

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, templates = library.len(), "Exchange Tracker starting");

    let mut session = Session {
        state: ExchangeState::new(config),
        library,
        rng: ChaCha8Rng::seed_from_u64(seed),
        templates_path: args.templates,
    };

    println!("\n=== EXCHANGE TRACKER ===");
    println!("Type 'help' for commands.");

    loop {
        print!("[round {} | {}] > ", session.state.round(), session.state.phase().label());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if let Err(e) = handle_command(&mut session, input) {
            println!("Error: {}", e);
        }
    }

    if let Some(path) = &session.templates_path {
        session.library.write(path)?;
        println!("Templates saved to {}", path.display());
    }

    println!("\nGoodbye! Exchange ended at round {}.", session.state.round());
    Ok(())
}

fn handle_command(session: &mut Session, input: &str) -> Result<()> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let rest = |from: usize| words.get(from..).map(|w| w.join(" ")).unwrap_or_default();

    match words.as_slice() {
        ["help" | "h"] => print_help(),
        ["status" | "s"] => display_status(&session.state),
        ["show", who] => {
            if let Some(id) = resolve(&session.state, who) {
                if let Some(c) = session.state.character(id) {
                    display_character(c);
                }
            }
        }

        // Roster
        ["add", "pc", name, ..] => {
            let playbook = rest(3);
            if !is_known_playbook(&playbook) {
                println!("Unknown playbook '{}', balance uses Control/Freedom", playbook);
            }
            let id = session.state.add_pc(&CharacterDraft::pc(*name, playbook))?;
            println!("Added PC {}", id);
        }
        ["add", "npc", name, tier] => {
            let Some(tier) = NpcTier::parse(tier) else {
                println!("Tier must be minor, moderate or major");
                return Ok(());
            };
            let id = session.state.add_npc(&CharacterDraft::npc(*name, tier))?;
            println!("Added NPC {}", id);
        }
        ["load", ..] => {
            let name = rest(1);
            match session.library.find_by_name(&name) {
                Some(template) => {
                    let id = session.state.add_character(&template.data)?;
                    println!("Loaded {} as {}", template.name, id);
                }
                None => println!("No template named '{}'", name),
            }
        }
        ["templates"] => {
            for t in session.library.templates() {
                println!("  [{}] {}", t.kind(), t.name);
            }
        }
        ["save", who, ..] => {
            if let Some(id) = resolve(&session.state, who) {
                if let Some(c) = session.state.character(id) {
                    let name = if words.len() > 2 { rest(2) } else { c.name.clone() };
                    let template_id = session.library.save_character(&name, c);
                    println!("Saved template {} ({})", name, template_id);
                }
            }
        }
        ["write"] => match &session.templates_path {
            Some(path) => {
                session.library.write(path)?;
                println!("Templates written to {}", path.display());
            }
            None => println!("Start with --templates <file> to write templates"),
        },
        ["snapshot", path] => {
            std::fs::write(path, session.state.to_json()?)?;
            println!("Exchange written to {}", path);
        }
        ["remove", who] => {
            if let Some(id) = resolve(&session.state, who) {
                let removed = session.state.remove_character(id)?;
                println!("Removed {}", removed.name);
            }
        }
        ["clear-exchange"] => {
            session.state.clear_exchange();
            println!("Exchange cleared.");
        }

        // Exchange state
        ["approach", who, approach] => {
            let Some(approach) = Approach::parse(approach) else {
                println!("Approach must be defend, attack, evade or none");
                return Ok(());
            };
            if let Some(id) = resolve(&session.state, who) {
                session.state.set_approach(id, approach)?;
                println!("Approach: {}", approach.label());
            }
        }
        ["roll", "all"] => {
            let ids: Vec<CharacterId> = session.state.characters().map(|c| c.id).collect();
            for id in ids {
                let stance = session.state.roll_stance_for(id, &mut session.rng)?;
                if let Some(c) = session.state.character(id) {
                    println!("  {} rolled {} ({:?})", c.name, stance.result, stance.tier());
                }
            }
        }
        ["roll", who] => {
            if let Some(id) = resolve(&session.state, who) {
                let stance = session.state.roll_stance_for(id, &mut session.rng)?;
                print_stance(stance.result, stance.tier());
                println!("{}", session.state.availability_for(id)?.message);
            }
        }
        ["stance", who, total] => {
            let Ok(total) = total.parse::<i64>() else {
                println!("Usage: stance <who> <2-12>");
                return Ok(());
            };
            if let Some(id) = resolve(&session.state, who) {
                let stance = session.state.set_stance_for(id, total)?;
                print_stance(stance.result, stance.tier());
                println!("{}", session.state.availability_for(id)?.message);
            }
        }
        ["fatigue", who, delta] => {
            if let (Some(id), Some(delta)) = (resolve(&session.state, who), parse_delta(delta)) {
                let fatigue = session.state.adjust_fatigue(id, delta)?;
                println!("Fatigue: {}", fatigue);
            }
        }
        ["balance", who, delta] => {
            if let (Some(id), Some(delta)) = (resolve(&session.state, who), parse_delta(delta)) {
                session.state.adjust_balance(id, delta)?;
                if let Some(c) = session.state.character(id) {
                    println!("Balance: {}", c.balance.describe());
                }
            }
        }
        ["condition", who, condition] => {
            let Some(kind) = ConditionType::parse(condition) else {
                println!("Unknown condition '{}'", condition);
                return Ok(());
            };
            if let Some(id) = resolve(&session.state, who) {
                if !session.state.toggle_condition(id, kind)? {
                    println!("{} has no {} condition", who, kind.label());
                }
            }
        }
        ["effect", "add", who, name, rest_words @ ..] => {
            if let Some(id) = resolve(&session.state, who) {
                let mut status = Status::new(*name);
                if let Some(modifier) = rest_words.first().and_then(|m| parse_delta(m)) {
                    status = status.with_techniques_modifier(modifier);
                }
                session.state.add_status(id, status)?;
                println!("Added status {}", name);
            }
        }
        ["effect", "remove", who, name] => {
            if let Some(id) = resolve(&session.state, who) {
                let status_id = session
                    .state
                    .character(id)
                    .and_then(|c| c.statuses.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
                    .map(|s| s.id);
                match status_id {
                    Some(status_id) => {
                        session.state.remove_status(id, status_id)?;
                        println!("Removed status {}", name);
                    }
                    None => println!("No status named {}", name),
                }
            }
        }
        ["modifier", "remove", who, index] => {
            if let (Some(id), Ok(index)) = (resolve(&session.state, who), index.parse::<usize>()) {
                let modifier_id = session
                    .state
                    .character(id)
                    .and_then(|c| c.modifiers.get(index.saturating_sub(1)))
                    .map(|m| m.id);
                if let Some(modifier_id) = modifier_id {
                    session.state.remove_modifier(id, modifier_id)?;
                    println!("Modifier removed");
                }
            }
        }
        ["modifier", who, kind, value, applies_to @ ..] => {
            let kind = match *kind {
                "forward" => ModifierKind::Forward,
                "ongoing" => ModifierKind::Ongoing,
                _ => {
                    println!("Modifier kind must be forward or ongoing");
                    return Ok(());
                }
            };
            if let (Some(id), Some(value)) = (resolve(&session.state, who), parse_delta(value)) {
                let mut modifier = Modifier::new(kind, value);
                if !applies_to.is_empty() {
                    modifier = modifier.applying_to(applies_to.join(" "));
                }
                session.state.add_modifier(id, modifier)?;
                println!("Modifier added");
            }
        }
        ["techmod", who, value] => {
            if let (Some(id), Some(value)) = (resolve(&session.state, who), parse_delta(value)) {
                session.state.set_techniques_modifier(id, value)?;
                println!("{}", session.state.availability_for(id)?.message);
            }
        }

        // Techniques
        ["use", who, ..] => {
            if let Some(id) = resolve(&session.state, who) {
                let selected = session
                    .state
                    .select_technique(id, &TechniqueChoice::named(rest(2)))?;
                let cost = if selected.costs_fatigue { " (costs 1 fatigue)" } else { "" };
                println!("Selected {} as {:?}{}", selected.name, selected.level, cost);
            }
        }
        ["drop", who, ..] => {
            if let Some(id) = resolve(&session.state, who) {
                let name = rest(2);
                let source_id = session
                    .state
                    .character(id)
                    .and_then(|c| {
                        c.selected_techniques
                            .iter()
                            .find(|t| t.name.eq_ignore_ascii_case(&name))
                    })
                    .map(|t| t.source_id.clone());
                if let Some(source_id) = source_id {
                    session.state.deselect_technique(id, &source_id)?;
                    println!("Dropped {}", name);
                }
            }
        }
        ["clear", who] => {
            if let Some(id) = resolve(&session.state, who) {
                session.state.clear_selected_techniques(id)?;
                println!("Selections cleared");
            }
        }
        ["offered", who] => {
            if let Some(id) = resolve(&session.state, who) {
                for t in session.state.offered_techniques(id)? {
                    println!("  {} ({:?}, {})", t.name, t.complexity, t.training);
                }
            }
        }
        ["learn", who, mastery, ..] => {
            let Some(mastery) = Mastery::parse(mastery) else {
                println!("Mastery must be learned, practiced or mastered");
                return Ok(());
            };
            if let Some(id) = resolve(&session.state, who) {
                session.state.learn_technique(id, &rest(3), mastery)?;
                println!("Learned {} ({:?})", rest(3), mastery);
            }
        }
        ["train", who, training] => {
            if let Some(id) = resolve(&session.state, who) {
                session.state.add_training(id, training)?;
                if let Some(pc) = session.state.character(id).and_then(|c| c.as_pc()) {
                    println!("Training: {}", pc.training.join(", "));
                }
            }
        }
        ["playbook", who, ..] => {
            if let Some(id) = resolve(&session.state, who) {
                session.state.set_playbook(id, &rest(2))?;
                if let Some(c) = session.state.character(id) {
                    println!("Balance: {}", c.balance.describe());
                }
            }
        }
        ["rename", who, ..] => {
            if let Some(id) = resolve(&session.state, who) {
                session.state.rename(id, &rest(2))?;
            }
        }
        ["catalog", approach, training @ ..] => {
            let Some(approach) = Approach::parse(approach) else {
                println!("Approach must be defend, attack or evade");
                return Ok(());
            };
            let filter = training.first().and_then(|t| Training::parse(t));
            for t in techniques_for(approach, filter) {
                println!("  {} ({:?}, {})", t.name, t.complexity, t.training);
            }
        }

        // Exchange flow
        ["reset", "all"] => {
            session.state.reset_all_to_base();
            println!("All characters reset.");
        }
        ["reset", who] => {
            if let Some(id) = resolve(&session.state, who) {
                session.state.reset_character_to_base(id)?;
                println!("Reset to base state.");
            }
        }
        ["order"] => {
            let order = session.state.action_order();
            if order.is_empty() {
                println!("No one has chosen an approach.");
            }
            for (i, entry) in order.iter().enumerate() {
                println!("  {}. {} [{}] {}", i + 1, entry.name, entry.kind, entry.approach.label());
            }
        }
        ["next" | "n"] => {
            let phase = session.state.next_phase();
            println!("Round {} - {}", session.state.round(), phase.label());
        }
        ["phase", "reset"] => {
            session.state.reset_phase();
            println!("Round 1 - Setup");
        }

        _ => println!("Unknown command. Type 'help' for a list."),
    }
    Ok(())
}

/// Find a character by 1-based roster index or by name
fn resolve(state: &ExchangeState, who: &str) -> Option<CharacterId> {
    let found = match who.parse::<usize>() {
        Ok(index) if index > 0 => state.characters().nth(index - 1),
        _ => state.find_by_name(&who.replace('_', " ")),
    };
    if found.is_none() {
        println!("No character '{}'", who);
    }
    found.map(|c| c.id)
}

fn parse_delta(input: &str) -> Option<i32> {
    let parsed = input.trim_start_matches('+').parse().ok();
    if parsed.is_none() {
        println!("Expected a number, got '{}'", input);
    }
    parsed
}

fn print_stance(result: u8, tier: StanceTier) {
    let label = match tier {
        StanceTier::Miss => "miss",
        StanceTier::Partial => "partial hit",
        StanceTier::Full => "full hit",
    };
    println!("Stance {}: {}", result, label);
}

fn print_help() {
    println!();
    println!("Roster:");
    println!("  add pc <name> <playbook>      - Add a player character");
    println!("  add npc <name> <tier>         - Add an NPC (minor/moderate/major)");
    println!("  load <template>               - Add a character from a template");
    println!("  templates                     - List templates");
    println!("  save <who> [template name]    - Save a character as a template");
    println!("  write                         - Write the template library");
    println!("  snapshot <file>               - Write the exchange as JSON");
    println!("  remove <who> / clear-exchange");
    println!("Exchange:");
    println!("  approach <who> <defend|attack|evade|none>");
    println!("  roll <who|all> / stance <who> <2-12>");
    println!("  fatigue <who> <+n|-n> / balance <who> <+n|-n>");
    println!("  condition <who> <condition>   - Toggle a condition mark");
    println!("  effect add <who> <name> [n] / effect remove <who> <name>");
    println!("  modifier <who> <forward|ongoing> <n> [applies to] / modifier remove <who> <index>");
    println!("  techmod <who> <n>             - Set the technique modifier");
    println!("Techniques:");
    println!("  use <who> <technique> / drop <who> <technique> / clear <who>");
    println!("  offered <who> / catalog <approach> [training]");
    println!("  learn <who> <mastery> <technique> / train <who> <training>");
    println!("  playbook <who> <playbook> / rename <who> <name>");
    println!("Flow:");
    println!("  order / next / phase reset / reset <who|all>");
    println!("  status / show <who> / quit");
    println!();
}

fn display_status(state: &ExchangeState) {
    println!();
    println!("--- Round {} | {} ---", state.round(), state.phase().label());
    for (i, c) in state.characters().enumerate() {
        let stance = c
            .stance
            .map(|s| s.result.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}. {} [{}] {} | stance {} | fatigue {}/{} | {}",
            i + 1,
            c.name,
            c.kind(),
            c.approach.label(),
            stance,
            c.fatigue,
            c.max_fatigue,
            c.balance.describe()
        );
    }
    println!();
}

fn display_character(c: &Character) {
    println!();
    println!("{} [{}]", c.name, c.kind());
    println!("  Approach: {}", c.approach.label());
    println!("  Fatigue: {}/{}", c.fatigue, c.max_fatigue);
    println!("  Balance: {} ({}..={})", c.balance.describe(), c.balance.min, c.balance.max);

    let marked: Vec<&str> = c.marked_conditions().map(|k| k.label()).collect();
    if !marked.is_empty() {
        println!("  Marked: {}", marked.join(", "));
    }
    for s in &c.statuses {
        println!("  Status: {}", s.name);
    }
    for (i, m) in c.modifiers.iter().enumerate() {
        println!("  Modifier {}: {:?} {:+}", i + 1, m.kind, m.value);
    }
    match &c.details {
        CharacterDetails::Pc(pc) => {
            println!("  Playbook: {}", pc.playbook);
            if !pc.training.is_empty() {
                println!("  Training: {}", pc.training.join(", "));
            }
            for t in &pc.techniques {
                println!("  Knows: {} ({:?})", t.name, t.mastery);
            }
        }
        CharacterDetails::Npc(npc) => {
            if let Some(role) = &npc.role {
                println!("  Role: {}", role);
            }
            if !npc.available_techniques.is_empty() {
                println!("  Techniques: {}", npc.available_techniques.join(", "));
            }
        }
    }
    for t in &c.selected_techniques {
        println!("  Selected: {} ({:?})", t.name, t.level);
    }
    println!();
}
