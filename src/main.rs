//! Command-line driver: prints the vertex coordinates and per-rank element
//! index lists of the regular polytope with a given Schläfli symbol.

use std::process;

use clap::Parser;

use schlafli::{
    conc::{BuildResult, Concrete},
    element_name,
    geometry::fudge,
    symbol::Schlafli,
};

/// Prints the vertices and per-rank vertex index lists (edges, faces, …) of
/// a regular polytope, given by its Schläfli symbol {p, q, r, ...}.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The entries of the symbol, each an integer like `4` or a fraction
    /// like `5/2`.
    #[arg(required = true)]
    entries: Vec<String>,

    /// Caps the number of generated vertices; anything beyond the cap is
    /// suppressed, along with the elements touching it.
    #[arg(short = 'l', long)]
    vertex_limit: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> BuildResult<()> {
    let symbol: Schlafli = args.entries.join(" ").parse()?;

    let poly = match args.vertex_limit {
        Some(limit) => Concrete::with_vertex_limit(&symbol, limit)?,
        None => Concrete::from_symbol(&symbol)?,
    };

    println!("{} {}:", poly.vertex_count(), element_name(0));
    for vertex in &poly.vertices {
        let coords: Vec<_> = vertex.iter().map(|&x| fudge(x).to_string()).collect();
        println!("{}", coords.join(" "));
    }

    for (k, list) in poly.elements.iter().enumerate() {
        let rank = k + 1;
        println!();
        println!(
            "{} {} ({} vertices each)",
            list.len(),
            element_name(rank),
            list.first().map_or(0, Vec::len)
        );

        for element in list {
            let indices: Vec<_> = element.iter().map(usize::to_string).collect();
            println!("{}", indices.join(" "));
        }
    }

    println!();
    println!("Euler characteristic: {}", poly.euler_characteristic());
    if poly.truncated {
        println!("(vertex cap hit: element lists are incomplete)");
    }

    Ok(())
}
