//! Demo session: pools declared from a manifest, a start countdown, a timed
//! round, cards dealt from a pool and one-shot sounds returned after playing.

use std::time::Duration;

use tagpool::hecs::Entity;
use tagpool::prelude::*;

const TICK: Duration = Duration::from_micros(16_667);
const MAX_TICKS: u32 = 60 * 60;
const PAIRS: u32 = 2;
const SFX_LENGTH: Duration = Duration::from_millis(300);

const DEFAULT_MANIFEST: &str = include_str!("../assets/pools.ron");

/// Build the scene: one container per pool group plus the prefab library
fn build_world() -> SceneWorld {
    let mut world = SceneWorld::new();
    for container in ["card_grid", "sfx", "music", "ambience", "leaderboard"] {
        world.spawn_container(container);
    }
    world.register_prefab("card", Prefab::new("Card"));
    world.register_prefab("audio_source", Prefab::new("AudioSource"));
    world.register_prefab("leaderboard_entry", Prefab::new("LeaderboardEntry"));
    world
}

/// Load the manifest named on the command line, or the bundled one
fn load_manifest() -> Result<PoolManifest, ManifestError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading pool manifest from {path}");
            PoolManifest::load_ron(path)
        }
        None => PoolManifest::from_ron_str(DEFAULT_MANIFEST),
    }
}

/// Play a one-shot sound: borrow a source and hand it back once it's done
fn play_sfx(runtime: &mut Runtime<SceneWorld>, position: Vec3) {
    let ctx = runtime.context_mut();
    let Ok(source) = ctx
        .pools
        .spawn(&mut ctx.host, "AudioSource", position, Quat::IDENTITY)
    else {
        return;
    };
    runtime.spawn(ReturnAfter::<SceneWorld>::new(
        "AudioSource",
        source,
        SFX_LENGTH,
    ));
}

/// Lay out `pairs * 2` cards in rows of four
fn deal_cards(runtime: &mut Runtime<SceneWorld>, pairs: u32) -> Vec<Entity> {
    let ctx = runtime.context_mut();
    (0..pairs * 2)
        .filter_map(|i| {
            let position = Vec3::new((i % 4) as f32 * 1.2, -((i / 4) as f32) * 1.6, 0.0);
            ctx.pools
                .spawn(&mut ctx.host, "Cards", position, Quat::IDENTITY)
                .ok()
        })
        .collect()
}

fn main() {
    env_logger::init();

    let manifest = match load_manifest() {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Manifest error: {e}");
            return;
        }
    };

    let mut runtime = Runtime::new(build_world());
    {
        let ctx = runtime.context_mut();
        manifest.apply(
            &mut ctx.pools,
            &mut ctx.host,
            |world, name| world.prefab(name).cloned(),
            |world, name| world.container(name),
        );
    }

    runtime.spawn(Countdown::default());
    runtime.spawn(Delayed::new("music", Duration::from_millis(500)));

    let mut dealt = Vec::new();
    for _ in 0..MAX_TICKS {
        runtime.tick(TICK);

        let events: Vec<GameEvent> = runtime.context().events.iter().cloned().collect();
        let mut round_over = false;
        for event in events {
            match event {
                GameEvent::CountdownTick { remaining } => {
                    log::info!("{remaining}...");
                    play_sfx(&mut runtime, Vec3::ZERO);
                }
                GameEvent::CountdownFinished => {
                    dealt = deal_cards(&mut runtime, PAIRS);
                    log::info!("Dealt {} cards", dealt.len());
                    runtime.spawn(RoundTimer::for_pairs(PAIRS));
                }
                GameEvent::Triggered { id: "music" } => {
                    let ctx = runtime.context_mut();
                    if let Ok(music) =
                        ctx.pools
                            .spawn(&mut ctx.host, "AudioSourceMusic", Vec3::ZERO, Quat::IDENTITY)
                    {
                        log::info!("Music started on {music:?}");
                    }
                }
                GameEvent::TimerChanged { seconds } => log::info!("{seconds}s left"),
                GameEvent::ItemReturned { tag } => log::debug!("Returned an item to '{tag}'"),
                GameEvent::TimeUp => {
                    log::info!("Time's up");
                    round_over = true;
                }
                other => log::debug!("{other:?}"),
            }
        }
        if round_over {
            break;
        }
    }

    let ctx = runtime.context_mut();
    for card in dealt {
        let _ = ctx.pools.return_to_pool(&mut ctx.host, "Cards", card);
    }
    log::info!(
        "Session ran {} ticks ({:.2}s), {} entities active",
        ctx.time.frame_count(),
        ctx.time.elapsed_seconds(),
        ctx.host.active_count()
    );

    let world = runtime.shutdown();
    log::info!("Shut down with {} entities", world.len());
}
