//! Crown Simulator
//!
//! Runs one colonial player under its monarch for a number of turns and
//! reports what the crown did.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crown_core::{Force, Monarch, MonarchOutcome, PlayerState, Rival, Stance};
use crown_rules::Ruleset;

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "crown-sim")]
#[command(about = "Simulates a colonial player's monarch over many turns")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to simulate
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Ruleset TOML file (defaults to the bundled classic ruleset)
    #[arg(long)]
    ruleset: Option<PathBuf>,

    /// Starting gold of the player
    #[arg(long, default_value_t = 1000)]
    gold: u32,

    /// Gold earned each turn
    #[arg(long, default_value_t = 150)]
    income: u32,

    /// European rivals, initially at peace
    #[arg(long, value_delimiter = ',', default_value = "english,french,spanish")]
    rivals: Vec<String>,

    /// Write the monarch to this JSON file at the end
    #[arg(long)]
    save: Option<PathBuf>,

    /// Start from a monarch saved earlier
    #[arg(long)]
    load: Option<PathBuf>,
}

/// Running totals for the end-of-reign report
#[derive(Debug, Default)]
struct Chronicle {
    actions: BTreeMap<&'static str, u32>,
    /// Units gifted by the crown or hired
    army: Force,
    mercenaries_hired: u32,
    mercenaries_declined: u32,
    gold_spent: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> crown_core::Result<()> {
    println!("Crown Simulator");
    println!("===============");
    println!("Seed: {}", args.seed);
    println!("Turns: {}", args.turns);
    println!();

    let rules = Arc::new(match &args.ruleset {
        Some(path) => Ruleset::from_file(path)?,
        None => Ruleset::classic()?,
    });
    println!("Ruleset: {}", rules.name());

    let mut player = PlayerState::new("dutch").with_settlements(1).with_gold(args.gold);
    for rival in &args.rivals {
        player = player.with_rival(Rival::european(rival.as_str(), Stance::Peace));
    }

    let mut monarch = match &args.load {
        Some(path) => {
            println!("Loading monarch from {}", path.display());
            Monarch::load_from_file(Arc::clone(&rules), &player, path)?
        }
        None => Monarch::new(Arc::clone(&rules), &player),
    };

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut chronicle = Chronicle::default();

    for turn in 1..=args.turns {
        player.gold = player.gold.saturating_add(args.income);
        player.attacked_by_privateers = rng.gen_ratio(1, 20);

        let outcome = monarch.take_turn(&player, turn, &mut rng)?;
        *chronicle.actions.entry(outcome.action().key()).or_insert(0) += 1;
        apply_outcome(&mut monarch, &mut player, &mut chronicle, outcome, turn, &mut rng);
    }

    print_summary(&monarch, &player, &chronicle);

    if let Some(path) = &args.save {
        monarch.save_to_file(path)?;
        println!("Saved monarch to {}", path.display());
    }
    Ok(())
}

/// Applies one outcome to the player, the way a turn engine would.
fn apply_outcome(
    monarch: &mut Monarch,
    player: &mut PlayerState,
    chronicle: &mut Chronicle,
    outcome: MonarchOutcome,
    turn: u32,
    rng: &mut SmallRng,
) {
    let rules = monarch.rules_handle();
    match outcome {
        MonarchOutcome::NoAction => {}
        MonarchOutcome::TaxChange { action, old_tax, new_tax } => {
            tracing::info!("Turn {}: {} changes tax {}% -> {}%", turn, action, old_tax, new_tax);
            player.tax = new_tax;
        }
        MonarchOutcome::WaiveTax => {
            tracing::info!("Turn {}: the crown waives a tax", turn);
        }
        MonarchOutcome::AddToRef { addition } => {
            tracing::info!("Turn {}: REF grows by {}", turn, addition);
            monarch.apply_ref_addition(addition);
        }
        MonarchOutcome::DeclareWar { enemy } => {
            tracing::info!("Turn {}: the crown declares war on {}", turn, enemy);
            player.set_stance(&enemy, Stance::War);
            // Relative strength is unknown here; draw one
            let ratio = rng.gen_range(0.3..0.8);
            for group in monarch.war_support(ratio, rng) {
                tracing::info!("Turn {}: war support {}", turn, group);
                chronicle.army.add(group, &rules);
            }
        }
        MonarchOutcome::DeclarePeace { friend } => {
            tracing::info!("Turn {}: the crown makes peace with {}", turn, friend);
            player.set_stance(&friend, Stance::Peace);
        }
        MonarchOutcome::Support { action, units } => {
            for group in units {
                tracing::info!("Turn {}: {} brings {}", turn, action, group);
                chronicle.army.add(group, &rules);
            }
        }
        MonarchOutcome::Mercenaries { action, units, price } => {
            if player.check_gold(price) {
                tracing::info!("Turn {}: hired {} ({:?}) for {}", turn, action, units, price);
                player.gold -= price;
                chronicle.gold_spent = chronicle.gold_spent.saturating_add(price);
                chronicle.mercenaries_hired += units.iter().map(|g| g.count).sum::<u32>();
                for group in units {
                    chronicle.army.add(group, &rules);
                }
            } else {
                tracing::info!("Turn {}: declined {} at {} (gold {})", turn, action, price, player.gold);
                chronicle.mercenaries_declined += 1;
            }
        }
    }
}

fn print_force(label: &str, force: &Force) {
    println!(
        "{} ({} units, capacity {}, space required {}):",
        label,
        force.unit_count(),
        force.capacity(),
        force.space_required()
    );
    for group in force.units() {
        println!("  {}", group);
    }
}

fn print_summary(monarch: &Monarch, player: &PlayerState, chronicle: &Chronicle) {
    println!();
    println!("=== Reign Summary ===");
    println!("Tax: {}%", player.tax);
    println!("Gold: {} (spent {} on mercenaries)", player.gold, chronicle.gold_spent);
    println!(
        "Mercenaries: {} units hired, {} offers declined",
        chronicle.mercenaries_hired, chronicle.mercenaries_declined
    );
    println!("Sea support given: {}", monarch.support_sea());

    println!();
    println!("Actions:");
    for (action, count) in &chronicle.actions {
        println!("  {}: {}", action, count);
    }

    println!();
    println!("Stances:");
    for rival in &player.rivals {
        println!("  {}: {:?}", rival.id, rival.stance);
    }

    println!();
    print_force("Royal Expeditionary Force", monarch.expeditionary_force());
    print_force("Intervention force", monarch.intervention_force());
    print_force("Colonial army", &chronicle.army);
}
