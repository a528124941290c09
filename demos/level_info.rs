//! Example: inspecting and patching a level.dat file
//!
//! Prints the decoded tree as JSON together with the game type and level
//! name. With `--creative` or `--survival` the game type is rewritten in
//! place and the result is saved next to the input as `<path>.patched`.
//!
//! Run with: cargo run --example level_info -- <path_to_level.dat> [--creative|--survival]

use std::{env, fs};

use nbt_inplace::level::{GameType, LevelData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: cargo run --example level_info -- <path_to_level.dat> [--creative|--survival]");
        return Ok(());
    }

    let path = &args[1];
    let raw = fs::read(path)?;
    println!("Reading level file: {} ({} bytes compressed)", path, raw.len());

    let mut level = LevelData::from_gzip(&raw)?;
    println!("Decompressed size: {} bytes", level.document().buffer().len());
    println!();

    println!("=== Tree ===");
    println!(
        "{}",
        serde_json::to_string_pretty(level.document().root())?
    );
    println!();

    println!("Level name: {}", level.level_name()?);
    println!("Game type:  {}", level.game_type()?);

    let target = match args.get(2).map(String::as_str) {
        Some("--creative") => GameType::Creative,
        Some("--survival") => GameType::Survival,
        Some(other) => return Err(format!("unknown option {other}").into()),
        None => return Ok(()),
    };

    level.set_game_type(target)?;
    let out_path = format!("{path}.patched");
    fs::write(&out_path, level.to_gzip()?)?;
    println!("Game type set to {target:?}, written to {out_path}");

    Ok(())
}
