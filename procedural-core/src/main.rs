//! # rgi-gen
//!
//! Generates a content batch from a config file and either prints it or runs
//! every event category once against an in-memory host.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rgi_core::content::{ContentKind, GeneratedContent};
use rgi_core::host::sim::{SimBody, SimHost};
use rgi_core::host::{DamageReport, InteractionInfo, ProcChainMask, SkillSlot, StatHookArgs, Vec3};
use rgi_core::logging::{init_tracing, LogLevel, TracingConfig};
use rgi_core::{ContentGenerator, GenerationConfig, Registries};

/// Command line arguments for the generator.
#[derive(Parser, Debug)]
#[command(name = "rgi-gen")]
#[command(about = "Procedurally generate items and equipment and exercise their effects")]
#[command(version)]
struct Cli {
    /// Generation config (.ron or .json); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed override (0 picks a random seed)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Base log level; `RUST_LOG` overrides it
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every generated item and equipment piece
    Generate {
        /// Dump the batch as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Hold every generated item and fire each event once
    Simulate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingConfig::default().with_level(cli.log_level));

    let mut config = match &cli.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let registries = Registries::builtin().context("building registries")?;
    let content = ContentGenerator::new(&config, &registries).generate();
    info!(seed = content.seed, fingerprint = %content.fingerprint(), "Batch ready");

    match cli.command.unwrap_or(Command::Generate { json: false }) {
        Command::Generate { json: true } => println!("{}", content.to_json()),
        Command::Generate { json: false } => print_content(&content),
        Command::Simulate => simulate(&content),
    }
    Ok(())
}

fn print_content(content: &GeneratedContent) {
    println!("seed {}", content.seed);
    for record in &content.records {
        let kind = match record.kind {
            ContentKind::Item { tier } => tier.as_str().to_string(),
            ContentKind::Equipment { is_lunar: true, .. } => "Lunar Equipment".to_string(),
            ContentKind::Equipment { .. } => "Equipment".to_string(),
        };
        println!("\n{} [{}] ({})", record.display_name, kind, record.key);
        println!("  {}", record.effect.description);
        if !record.lore.is_empty() {
            println!("  \"{}\"", record.lore.trim_end());
        }
    }
    if !content.conversions.is_empty() {
        println!("\nvoid conversions:");
        for pair in &content.conversions {
            println!("  {} -> {}", pair.normal, pair.void);
        }
    }
    for failure in &content.failures {
        println!("\nfailed {}: {}", failure.slot, failure.error);
    }
    println!("\nfingerprint {}", content.fingerprint());
}

fn simulate(content: &GeneratedContent) {
    let engine = &content.engine;
    let mut host = SimHost::new();
    let mut player = SimBody::new(1);
    let mut enemy = SimBody::new(2);
    enemy.position = Vec3::new(0.0, 0.0, 10.0);

    for record in content.items() {
        let index = host.register_item(&record.key);
        player.give_item(index, 1);
    }
    let equipment_key = content.equipment().next().map(|r| r.key.clone());
    if let Some(key) = &equipment_key {
        player.equipment = Some(host.register_equipment(key));
    }

    let mut stats = StatHookArgs::default();
    let report = engine.apply_passive_effects(&player, &host, &mut stats);
    println!("passive: {report:?}");
    println!("  {stats:?}");

    let hit = DamageReport {
        attacker: Some(player.id),
        victim: enemy.id,
        victim_position: enemy.position,
        victim_is_elite: true,
        damage: player.damage,
        crit: true,
        proc_coefficient: 1.0,
        proc_chain_mask: ProcChainMask::new(),
    };
    let report = engine.on_damage_dealt(&hit, Some(&player), &enemy, &mut host);
    print_step("hit/crit/hurt", report, &mut host);

    let report = engine.on_character_death(&hit, Some(&player), &mut host);
    print_step("kill/elite kill", report, &mut host);

    let healed = engine.on_heal(&player, 10.0, ProcChainMask::new(), true, &mut host);
    println!("heal: 10 -> {healed}");
    print_actions(&mut host);

    let report = engine.on_skill_activated(&player, SkillSlot::Secondary, &mut host);
    print_step("skill", report, &mut host);

    if let Some(key) = &equipment_key {
        let used = engine.on_equipment_used(&player, key, &mut host, |_| false);
        println!("equipment {key}: used={used}");
        print_actions(&mut host);
    }

    let interaction = InteractionInfo {
        interactable: "Chest1".to_string(),
        position: Vec3::new(3.0, 0.0, 3.0),
    };
    let report = engine.on_interaction(&player, interaction, &mut host);
    print_step("interact", report, &mut host);
}

fn print_step(label: &str, report: rgi_core::dispatch::DispatchReport, host: &mut SimHost) {
    println!("{label}: {report:?}");
    print_actions(host);
}

fn print_actions(host: &mut SimHost) {
    for action in host.take_actions() {
        println!("  {action:?}");
    }
}
