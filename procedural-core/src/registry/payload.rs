use super::RegistryEntry;
use crate::host::{CharacterId, PayloadKind, PayloadRequest, ProcChainMask, ProcType, Vec3};

const PROJECTILE_SPEED: f32 = 100.0;
const PROJECTILE_FUSE: f32 = 2.0;
const DELAYED_BLAST_DELAY: f32 = 0.5;
const CHAIN_LIGHTNING_PROC_COEFFICIENT: f32 = 0.2;

/// Spawnable damage payload (projectile, blast or orb)
#[derive(Debug, Clone)]
pub struct PayloadEntry {
    pub name: &'static str,
    pub strength_modifier: f32,
    pub proc_type: ProcType,
    pub minimum_grade: u32,
    /// Display label, e.g. "<style=cIsDamage>Missile</style>"
    pub label: &'static str,
    pub prefab: &'static str,
    pub kind: PayloadKind,
    pub force: f32,
}

/// Where and how hard a payload is launched
#[derive(Debug, Clone, Copy)]
pub struct PayloadLaunch {
    pub attacker: CharacterId,
    pub origin: Vec3,
    pub direction: Vec3,
    pub damage: f32,
    pub crit: bool,
    pub stacks: u32,
    pub proc_coefficient: f32,
    pub proc_chain_mask: ProcChainMask,
    /// Character the payload must not hit first (the struck victim)
    pub exclude: Option<CharacterId>,
}

impl PayloadEntry {
    /// Fully computed spawn request for the host
    pub fn request(&self, launch: &PayloadLaunch) -> PayloadRequest {
        let stacks = launch.stacks as f32;
        let mut request = PayloadRequest {
            payload: self.name,
            prefab: self.prefab,
            kind: self.kind,
            attacker: launch.attacker,
            origin: launch.origin,
            direction: launch.direction,
            damage: launch.damage,
            crit: launch.crit,
            speed: 0.0,
            fuse: 0.0,
            radius: 0.0,
            force: self.force,
            delay: 0.0,
            bounces: 0,
            range_bonus: 0.0,
            exclude: None,
            stacks: launch.stacks,
            proc_coefficient: launch.proc_coefficient,
            proc_chain_mask: launch.proc_chain_mask,
        };
        match self.kind {
            PayloadKind::Projectile => {
                request.speed = PROJECTILE_SPEED * launch.direction.length();
                request.fuse = PROJECTILE_FUSE;
            }
            PayloadKind::Blast => {
                request.radius = (1.5 + 2.5 * stacks) * launch.proc_coefficient;
                request.proc_coefficient = 0.0;
            }
            PayloadKind::DelayedBlast => {
                request.radius = 12.0 + 2.4 * (stacks - 1.0);
                request.delay = DELAYED_BLAST_DELAY;
            }
            PayloadKind::ChainLightning => {
                request.bounces = 2 * launch.stacks;
                request.range_bonus = 2.0 * stacks;
                request.proc_coefficient = CHAIN_LIGHTNING_PROC_COEFFICIENT;
                request.exclude = launch.exclude;
            }
        }
        request
    }
}

impl RegistryEntry for PayloadEntry {
    fn name(&self) -> &'static str {
        self.name
    }

    fn minimum_grade(&self) -> u32 {
        self.minimum_grade
    }
}

fn projectile(
    name: &'static str,
    strength_modifier: f32,
    label: &'static str,
    prefab: &'static str,
    minimum_grade: u32,
) -> PayloadEntry {
    PayloadEntry {
        name,
        strength_modifier,
        proc_type: ProcType::Missile,
        minimum_grade,
        label,
        prefab,
        kind: PayloadKind::Projectile,
        force: 0.0,
    }
}

pub(super) fn builtin() -> Vec<PayloadEntry> {
    vec![
        projectile(
            "RandomMissile",
            1.0,
            "<style=cIsDamage>Missile</style>",
            "MissileProjectile",
            2,
        ),
        projectile(
            "RandomClayPot",
            2.0,
            "<style=cIsDamage>Clay Pot</style>",
            "ClayPotProjectile",
            0,
        ),
        projectile(
            "RandomVoidSpike",
            1.5,
            "<style=cIsVoid>Void Spike</style>",
            "ImpVoidspikeProjectile",
            0,
        ),
        projectile("RandomSaw", 1.0, "<style=cDeath>Sawblade</style>", "Sawmerang", 2),
        projectile(
            "RandomNade",
            2.0,
            "<style=cIsDamage>Grenade</style>",
            "CommandoGrenadeProjectile",
            0,
        ),
        projectile(
            "RandomFireball",
            1.5,
            "<style=cIsDamage>Fireball</style>",
            "LemurianBigFireball",
            0,
        ),
        PayloadEntry {
            name: "RandomExplosion",
            strength_modifier: 1.0,
            proc_type: ProcType::Behemoth,
            minimum_grade: 3,
            label: "<style=cIsDamage>Explosion</style>",
            prefab: "OmniExplosionVFXQuick",
            kind: PayloadKind::Blast,
            force: 0.0,
        },
        PayloadEntry {
            name: "RandomWispExplosion",
            strength_modifier: 1.0,
            proc_type: ProcType::Behemoth,
            minimum_grade: 0,
            label: "<style=cIsDamage>Wisp Explosion</style>",
            prefab: "WilloWispDelay",
            kind: PayloadKind::DelayedBlast,
            force: 2000.0,
        },
        PayloadEntry {
            name: "RandomVoidWispExplosion",
            strength_modifier: 1.0,
            proc_type: ProcType::Behemoth,
            minimum_grade: 2,
            label: "<style=cIsVoid>Void Wisp Explosion</style>",
            prefab: "ExplodeOnDeathVoidExplosion",
            kind: PayloadKind::DelayedBlast,
            force: 1000.0,
        },
        PayloadEntry {
            name: "RandomChainLightning",
            strength_modifier: 0.5,
            proc_type: ProcType::ChainLightning,
            minimum_grade: 2,
            label: "<style=cIsDamage>Chain Lightning</style>",
            prefab: "LightningOrb",
            kind: PayloadKind::ChainLightning,
            force: 0.0,
        },
    ]
}
