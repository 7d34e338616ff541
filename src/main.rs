// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Clippy
#![warn(clippy::all)]

use std::env;
use std::process;

use clap::{App, Arg, ArgGroup};
#[cfg(feature = "graph")]
use clap::ArgMatches;
use log::debug;
use typed_arena::Arena;

use sliding_block_solver::config::{Format, Mode};
use sliding_block_solver::solver::{SearchEngine, Step};
use sliding_block_solver::LoadPuzzle;

fn main() {
    env_logger::init();

    let app = App::new("sliding-block-solver")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("dfs")
                .short("d")
                .long("dfs")
                .help("search depth first (default)"),
        )
        .arg(
            Arg::with_name("bfs")
                .short("b")
                .long("bfs")
                .help("search breadth first"),
        )
        .group(ArgGroup::with_name("mode").args(&["dfs", "bfs"]))
        .arg(
            Arg::with_name("numeric")
                .short("n")
                .long("numeric")
                .help("parse and print as whitespace separated numbers"),
        )
        .arg(
            Arg::with_name("compact")
                .short("c")
                .long("compact")
                .help("parse and print as one character per cell"),
        )
        .group(ArgGroup::with_name("format").args(&["numeric", "compact"]))
        .arg(
            Arg::with_name("trace")
                .short("t")
                .long("trace")
                .help("print every examined state"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print status when reaching a new depth"),
        )
        .arg(Arg::with_name("file").required(true));

    #[cfg(feature = "graph")]
    let app = app.arg(
        Arg::with_name("graph")
            .long("graph")
            .takes_value(true)
            .value_name("DOT_FILE")
            .help("write the search tree in graphviz dot format"),
    );

    let matches = app.get_matches();

    let mode = if matches.is_present("bfs") {
        Mode::Bfs
    } else {
        Mode::Dfs
    };
    let format = if matches.is_present("numeric") {
        Some(Format::Numeric)
    } else if matches.is_present("compact") {
        Some(Format::Compact)
    } else {
        None
    };
    let trace = matches.is_present("trace");
    let print_status = !matches.is_present("quiet");
    // clap makes sure it's present
    let path = matches.value_of("file").unwrap();

    let puzzle = match format {
        Some(format) => path.load_puzzle_as(format),
        None => path.load_puzzle(),
    }
    .unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!(
            "Can't load puzzle {} in {}: {}",
            path,
            current_dir.display(),
            err
        );
        process::exit(1);
    });
    debug!("Loaded puzzle:\n{}", puzzle);
    let format = format.unwrap_or(Format::Numeric);

    println!("Solving {}...", path);

    let arena = Arena::new();
    let mut engine = SearchEngine::new(&arena, puzzle.initial.clone(), puzzle.goal.clone(), mode)
        .unwrap_or_else(|err| {
            println!("Can't solve {}: {}", path, err);
            process::exit(1);
        });

    engine.run(|engine, step| {
        if trace {
            match step {
                Step::Expanded { state, .. } | Step::Solved(state) => {
                    println!("Examining depth {}:", state.depth());
                    println!("{}", state.grid().format(format));
                }
                Step::Duplicate(state) => println!("Duplicate at depth {}", state.depth()),
                Step::Exhausted => {}
            }
        }
        if let Step::Expanded {
            state,
            new_depth: true,
        } = step
        {
            if print_status {
                println!("Visited new depth: {}", state.depth());
                println!("{:?}", engine.stats());
            }
        }
    });

    #[cfg(feature = "graph")]
    write_graph(&matches, &engine);

    println!("{}", engine.stats());
    match engine.path() {
        Some(moves) => {
            println!("Found solution:");
            print!("{}", puzzle.format_solution(format, &moves));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
        }
        None => println!("No solution"),
    }
}

#[cfg(feature = "graph")]
fn write_graph(matches: &ArgMatches<'_>, engine: &SearchEngine<'_>) {
    use std::fs::File;

    if let Some(graph_path) = matches.value_of("graph") {
        let result = File::create(graph_path).and_then(|mut file| engine.write_graph(&mut file));
        if let Err(err) = result {
            println!("Can't write graph to {}: {}", graph_path, err);
            process::exit(1);
        }
    }
}
