//! `cargo run --example grid_path -- demos/maps/courtyard.map 0 0 9 6 --near 10`

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pather::grid::{read_grid_map_file, Grid, GridGraph, FOUR_CONNECTED};
use pather::{Pather, PatherConfig, SolveStatus};

#[derive(Copy, Clone, ValueEnum)]
enum Moves {
    Four,
    Eight,
}

/// Finds a path on an octile text map and prints it.
#[derive(Parser)]
struct Options {
    /// Map in the octile text format.
    map: PathBuf,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
    #[arg(long, value_enum, default_value = "eight")]
    moves: Moves,
    /// Path nodes per pool block.
    #[arg(long, default_value_t = 1024)]
    allocate: u32,
    #[arg(long, default_value_t = 8)]
    typical_adjacent: u32,
    /// Also search for every cell within this cost of the start.
    #[arg(long)]
    near: Option<f32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Options::parse();
    let map = read_grid_map_file(&opt.map)?;
    let map = match opt.moves {
        Moves::Eight => map,
        Moves::Four => {
            let cells = Grid::new(map.width(), map.height(), |x, y| map.cost(x, y));
            GridGraph::new(cells, FOUR_CONNECTED)
        }
    };

    let config = PatherConfig::new(opt.allocate, opt.typical_adjacent);
    let mut pather = Pather::new(&map, config);
    let start = (opt.start_x, opt.start_y);
    let end = (opt.end_x, opt.end_y);

    let mut path = vec![];
    match pather.solve(start, end, &mut path)? {
        SolveStatus::Solved { cost } => {
            let on_path = Grid::new(map.width(), map.height(), |x, y| path.contains(&(x, y)));
            for y in 0..map.height() {
                let row: String = (0..map.width())
                    .map(|x| match (on_path[(x, y)], map.is_passable(x, y)) {
                        (true, _) => '*',
                        (false, true) => '.',
                        (false, false) => '@',
                    })
                    .collect();
                println!("{row}");
            }
            println!("cost={cost} length={} checksum={}", path.len(), pather.checksum());
        }
        SolveStatus::NoSolution => println!("no path"),
        SolveStatus::StartEndSame => println!("start and end are the same cell"),
    }

    if let Some(max_cost) = opt.near {
        let mut near = vec![];
        pather.solve_for_near_states(start, &mut near, max_cost)?;
        println!("{} cells within {max_cost}", near.len());
    }

    let stats = pather.pool_stats();
    tracing::info!(
        nodes = stats.allocated,
        blocks = stats.blocks,
        occupied_buckets = stats.occupied_buckets,
        colliding_buckets = stats.colliding_buckets,
        cache = stats.cache_len,
        "pool usage"
    );
    Ok(())
}
