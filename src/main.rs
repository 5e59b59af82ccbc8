use std::{
    io::{Stdout, Write},
    path::PathBuf,
};

use clap::Parser;
use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};
use mazerace::{
    GoalPlacement, Maze, RunConfig, RunReport, SearchOutcome, SearchStatus, Solver,
    config::parse_coord,
    maze::{Coord, Grid, Tile},
};

/// Generate a maze with Wilson's algorithm and race DFS, BFS, greedy best-first and A*
/// through it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Maze width in cells (1-255)
    #[arg(long, default_value_t = 21)]
    width: u8,
    /// Maze height in cells (1-255)
    #[arg(long, default_value_t = 21)]
    height: u8,
    /// Knock down extra walls so the maze has more than one solution
    #[arg(short, long)]
    multiple_solutions: bool,
    /// Seed for a reproducible maze
    #[arg(short, long)]
    seed: Option<u64>,
    /// Start cell as "x,y"
    #[arg(long, value_parser = parse_coord, default_value = "0,0")]
    start: Coord,
    /// Goal placement: "corner", "furthest" or "x,y"
    #[arg(long, default_value = "corner")]
    goal: GoalPlacement,
    /// Solvers to race, comma separated (dfs, bfs, greedy, astar). Defaults to all four.
    #[arg(long = "solver", value_delimiter = ',')]
    solvers: Vec<Solver>,
    /// Solver whose exploration and route are drawn. Defaults to the first raced solver.
    #[arg(long)]
    show: Option<Solver>,
    /// Only print the summary
    #[arg(long)]
    no_render: bool,
    /// Write logs to <LOG_DIR>/mazerace.log instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> RunConfig {
        let solvers = if self.solvers.is_empty() {
            Solver::ALL.to_vec()
        } else {
            self.solvers.clone()
        };
        RunConfig {
            width: self.width,
            height: self.height,
            multiple_solutions: self.multiple_solutions,
            seed: self.seed,
            start: self.start,
            goal: self.goal,
            solvers,
        }
    }
}

/// Copy the maze raster and paint one solver's exploration and route over it.
fn paint(report: &RunReport, outcome: &SearchOutcome) -> Grid {
    let mut grid = report.maze.raster().clone();
    for cell in outcome.trace.cells() {
        grid.set(Maze::cell_raster_coord(cell), Tile::Explored);
    }
    for pair in outcome.path.windows(2) {
        grid.set(Maze::wall_raster_coord(pair[0], pair[1]), Tile::Route);
    }
    for &cell in &outcome.path {
        grid.set(Maze::cell_raster_coord(cell), Tile::Route);
    }
    grid.set(Maze::cell_raster_coord(report.start), Tile::Start);
    grid.set(Maze::cell_raster_coord(report.goal), Tile::Goal);
    grid
}

fn print_summary(stdout: &mut Stdout, report: &RunReport) -> std::io::Result<()> {
    let (width, height) = report.maze.dimensions();
    queue!(
        stdout,
        style::PrintStyledContent(
            format!(
                "{}x{} maze, {} walks, {} erased loops, {} extra passages, {:?} -> {:?}\r\n",
                width,
                height,
                report.generation.walks,
                report.generation.erased_loops,
                report.generation.cycle_edges.len(),
                report.start,
                report.goal
            )
            .with(Color::Yellow)
            .attribute(Attribute::Bold)
        ),
    )?;
    for outcome in &report.outcomes {
        let status = match outcome.status {
            SearchStatus::Found => "found    ".with(Color::Green),
            SearchStatus::NoPathFound => "no path  ".with(Color::Red),
            SearchStatus::Cancelled => "cancelled".with(Color::DarkGrey),
        };
        queue!(
            stdout,
            style::PrintStyledContent(
                format!("{:<28}", outcome.solver.to_string()).with(Color::Cyan)
            ),
            style::PrintStyledContent(status.attribute(Attribute::Bold)),
            style::Print(format!(
                "  explored {:>6}  path {:>6}  max frontier {:>6}\r\n",
                outcome.explored(),
                outcome.path.len(),
                outcome.trace.max_frontier()
            )),
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = mazerace::logging::init(args.log_dir.as_deref(), args.verbose);

    let config = args.to_config();
    tracing::debug!("[main] running with {:?}", config);
    let report = mazerace::run(&config)?;

    let mut stdout = std::io::stdout();
    if !args.no_render {
        let shown = args.show.or_else(|| config.solvers.first().copied());
        if let Some(outcome) = shown.and_then(|solver| report.outcome(solver)) {
            queue!(
                stdout,
                style::PrintStyledContent(
                    format!("{}\r\n", outcome.solver)
                        .with(Color::Green)
                        .attribute(Attribute::Bold)
                ),
                style::Print(paint(&report, outcome)),
            )?;
        }
    }
    print_summary(&mut stdout, &report)?;
    stdout.flush()?;
    Ok(())
}
