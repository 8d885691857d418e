//! Debug script to print a small generated height field as text

use clap::Parser;
use isoterrain::heightmap::generate_heightfield;
use isoterrain::params::TerrainParams;
use isoterrain::seeds::TerrainSeeds;

#[derive(Parser, Debug)]
struct Args {
    /// Grid size N (power of two plus one)
    #[arg(short = 'n', long, default_value = "17")]
    size: usize,

    #[arg(short, long, default_value = "0.3")]
    roughness: f64,

    #[arg(short, long, default_value = "12345")]
    seed: u64,

    /// Print shade characters instead of numbers
    #[arg(long)]
    ascii: bool,
}

/// Ramp from lowest to highest
const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let params = TerrainParams::new(args.size, args.roughness);
    let seeds = TerrainSeeds::from_master(args.seed);

    let field = generate_heightfield(&params, &mut seeds.heightmap_rng())?;
    let (min_h, max_h) = field.height_range().unwrap_or((0.0, 0.0));
    let span = (max_h - min_h).max(f64::EPSILON);

    println!(
        "=== HEIGHT FIELD {}x{} roughness={} seed={} ===",
        args.size, args.size, args.roughness, args.seed
    );
    println!("range {:.2} .. {:.2}", min_h, max_h);
    println!();

    let size = field.size() as i64;
    for z in 0..size {
        let row: String = (0..size)
            .map(|x| {
                let h = field.height_at(x, z).unwrap_or(min_h);
                if args.ascii {
                    let t = (h - min_h) / span;
                    let top = SHADES.len() - 1;
                    let idx = ((t * top as f64).round() as usize).min(top);
                    format!("{}", SHADES[idx] as char)
                } else {
                    format!("{:7.2}", h)
                }
            })
            .collect();
        println!("{}", row);
    }

    Ok(())
}
