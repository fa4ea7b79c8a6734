use std::{fmt::Display, str::FromStr, time::Instant};

use peak_alloc::PeakAlloc;
use planner::{
    AStar, FrontierType, HeuristicType, NoDupFrontier, Operator, PlanResult, PlanningError, Problem,
    SimpleFrontier, State,
};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

#[derive(Debug, StructOpt)]
pub enum Args {
    Solve {
        #[structopt(short, long, default_value = "toggle")]
        instance: InstanceType,
        /// The size of the instance, when it is parameterized
        #[structopt(short, long, default_value = "8")]
        size: usize,
        #[structopt(short = "H", long, default_value = "add")]
        heuristic: HeuristicType,
        #[structopt(short, long, default_value = "simple")]
        frontier: FrontierType,
        #[structopt(short = "T", long)]
        threads: Option<usize>,
    },
    PrintHeader,
}

/// The built-in demonstration instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceType {
    /// Two propositions A and B, one operator turning A into B for 3
    Toggle,
    /// A corridor of rooms to cross, with a costly teleporter
    Chain,
    /// The goal can never be produced
    DeadEnd,
}
impl FromStr for InstanceType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toggle" => Ok(Self::Toggle),
            "chain" => Ok(Self::Chain),
            "dead-end" => Ok(Self::DeadEnd),
            _ => Err("Only 'toggle', 'chain' and 'dead-end' are allowed"),
        }
    }
}
impl Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toggle => write!(f, "toggle"),
            Self::Chain => write!(f, "chain"),
            Self::DeadEnd => write!(f, "dead-end"),
        }
    }
}

struct Instance {
    problem: Problem,
    start: State,
    goal: State,
}

fn toggle() -> Result<Instance, PlanningError> {
    let ab = |a: bool, b: bool| State::from_bools(&[a, b]);
    let op = Operator::new("a-to-b", 3, ab(true, false), ab(false, true), ab(true, false));
    Ok(Instance {
        problem: Problem::new(vec!["A", "B"], vec![op])?,
        start: ab(true, false),
        goal: ab(false, true),
    })
}

fn chain(size: usize) -> Result<Instance, PlanningError> {
    let size = size.max(2);
    let at = |room: usize| State::with_true(size, [room]);
    let mut ops = vec![];
    for room in 0..size - 1 {
        ops.push(Operator::new(format!("forth-{room}"), 1, at(room), at(room + 1), at(room)));
        ops.push(Operator::new(format!("back-{}", room + 1), 1, at(room + 1), at(room), at(room + 1)));
    }
    ops.push(Operator::new("teleport", size as u64, at(0), at(size - 1), at(0)));
    let rooms = (0..size).map(|r| format!("at-{r}")).collect::<Vec<String>>();
    Ok(Instance {
        problem: Problem::new(rooms, ops)?,
        start: at(0),
        goal: at(size - 1),
    })
}

fn dead_end() -> Result<Instance, PlanningError> {
    let problem = Problem::new(vec!["A", "B", "C"], vec![])?;
    let start = problem.state(&["A"])?;
    let goal = problem.state(&["C"])?;
    Ok(Instance { problem, start, goal })
}

fn resolution_header() {
    println!(
        "{:>10} | {:>5} | {:>8} | {:>7} | {:>8} | {:>8} | {:>8} | {:>10} | {:>10} | PLAN",
        "INSTANCE", "HEUR", "FRONTIER", "STATUS", "DURATION", "RAM_(MB)", "COST", "EXPLORED", "GENERATED"
    );
}

fn solve(
    instance: InstanceType,
    size: usize,
    heuristic: HeuristicType,
    frontier: FrontierType,
    threads: usize,
) -> Result<(), PlanningError> {
    let Instance { problem, start, goal } = match instance {
        InstanceType::Toggle => toggle()?,
        InstanceType::Chain => chain(size)?,
        InstanceType::DeadEnd => dead_end()?,
    };

    let start_time = Instant::now();
    let mut astar = AStar::custom(&problem, &heuristic, threads);
    let result = match frontier {
        FrontierType::Simple => astar.search_with(&mut SimpleFrontier::new(), &start, &goal)?,
        FrontierType::NoDup => astar.search_with(&mut NoDupFrontier::new(), &start, &goal)?,
    };
    let duration = start_time.elapsed();

    let cost = result
        .cost()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_owned());
    let plan = match &result {
        PlanResult::Found(plan) => plan.names(&problem).join(" "),
        PlanResult::NotFound => String::new(),
    };

    println!(
        "{:>10} | {:>5} | {:>8} | {:>7} | {:>8.3} | {:>8.2} | {:>8} | {:>10} | {:>10} | {}",
        instance,
        heuristic,
        frontier,
        result,
        duration.as_secs_f32(),
        PEAK_ALLOC.peak_usage_as_mb(),
        cost,
        astar.get_explored(),
        astar.get_generated(),
        plan,
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::from_args();
    match args {
        Args::Solve {
            instance,
            size,
            heuristic,
            frontier,
            threads,
        } => {
            let threads = threads.unwrap_or_else(num_cpus::get);
            if let Err(e) = solve(instance, size, heuristic, frontier, threads) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Args::PrintHeader => resolution_header(),
    }
}
