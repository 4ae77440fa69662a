//! Page-replacement simulation.
//!
//! Several processes replay fixed page sequences against one shared cache.
//! Each step picks a random process, looks its next page up, and loads the
//! page on a miss.
//!
//! ```text
//! cargo run --example simulate -- --policy hybrid --size 4 -n 40 --delay-ms 0
//! RUST_LOG=evictkit=debug cargo run --features tracing --example simulate
//! ```

use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::metrics::{MetricsExporter, PrometheusTextExporter};
use evictkit::traits::CacheStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Lru,
    Lfu,
    Hybrid,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay process page sequences against a cache")]
struct Args {
    /// Eviction policy
    #[arg(short, long, value_enum, default_value = "hybrid")]
    policy: PolicyArg,

    /// Cache size in pages
    #[arg(short, long, default_value_t = 4)]
    size: usize,

    /// Frequency weight (hybrid only)
    #[arg(short, long, default_value_t = 0.5)]
    alpha: f64,

    /// Recency weight (hybrid only)
    #[arg(short, long, default_value_t = 0.5)]
    beta: f64,

    /// Number of page accesses
    #[arg(short = 'n', long, default_value_t = 20)]
    num_accesses: usize,

    /// Pause between accesses
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Seed for process selection; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print resident pages after every access
    #[arg(long)]
    show_state: bool,

    /// Dump final counters in Prometheus text format
    #[arg(long)]
    prometheus: bool,
}

/// Cycles through a fixed page sequence.
struct Process {
    id: usize,
    pages: Vec<u32>,
    cursor: usize,
}

impl Process {
    fn new(id: usize, pages: Vec<u32>) -> Self {
        Self {
            id,
            pages,
            cursor: 0,
        }
    }

    fn next_page(&mut self) -> u32 {
        if self.cursor >= self.pages.len() {
            self.cursor = 0;
        }
        let page = self.pages[self.cursor];
        self.cursor += 1;
        page
    }
}

struct Simulator {
    cache: Cache<u32, u32>,
    processes: Vec<Process>,
    rng: StdRng,
    started: Instant,
}

impl Simulator {
    fn new(cache: Cache<u32, u32>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            cache,
            processes: Vec::new(),
            rng,
            started: Instant::now(),
        }
    }

    fn add_process(&mut self, pages: Vec<u32>) {
        let id = self.processes.len() + 1;
        self.processes.push(Process::new(id, pages));
    }

    fn run(&mut self, accesses: usize, delay: Duration, show_state: bool) {
        if self.processes.is_empty() {
            return;
        }
        println!("{:<10}{:<10}{:<10}{:<10}", "Process", "Page", "Result", "Evicted");
        println!("{}", "-".repeat(40));

        for _ in 0..accesses {
            let idx = self.rng.random_range(0..self.processes.len());
            let process = &mut self.processes[idx];
            let page = process.next_page();

            let hit = self.cache.get(&page).is_some();
            let evicted = if hit { None } else { self.cache.put(page, page) };
            let evicted = evicted.map_or_else(|| "-".to_string(), |(key, _)| key.to_string());

            println!(
                "{:<10}{:<10}{:<10}{:<10}",
                process.id,
                page,
                if hit { "HIT" } else { "MISS" },
                evicted
            );

            if show_state {
                let resident: Vec<String> = self.cache.iter().map(|(k, _)| k.to_string()).collect();
                println!("  resident: [{}]", resident.join(", "));
            }

            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }

    fn print_stats(&self) {
        let stats = self.cache.stats();
        println!();
        println!("Cache Statistics ({}):", self.cache.policy_name());
        println!("{}", "-".repeat(40));
        println!("{:<20}: {}", "Total Accesses", stats.lookups());
        println!("{:<20}: {}", "Cache Hits", stats.hits);
        println!("{:<20}: {}", "Cache Misses", stats.misses);
        println!("{:<20}: {}", "Evictions", stats.evictions);
        println!("{:<20}: {:.2}%", "Hit Ratio", stats.hit_ratio() * 100.0);
        println!(
            "{:<20}: {}ms",
            "Simulation Time",
            self.started.elapsed().as_millis()
        );
        println!("{}", "-".repeat(40));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let policy = match args.policy {
        PolicyArg::Lru => CachePolicy::Lru,
        PolicyArg::Lfu => CachePolicy::Lfu,
        PolicyArg::Hybrid => CachePolicy::Hybrid {
            alpha: args.alpha,
            beta: args.beta,
        },
    };
    let cache = match CacheBuilder::new(args.size).try_build(policy) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        },
    };

    println!("Starting cache simulation with:");
    println!("  Policy: {:?}", args.policy);
    println!("  Cache size: {}", args.size);
    if let PolicyArg::Hybrid = args.policy {
        println!("  Alpha (frequency weight): {}", args.alpha);
        println!("  Beta (recency weight): {}", args.beta);
    }
    println!("  Number of accesses: {}", args.num_accesses);
    println!();

    let mut simulator = Simulator::new(cache, args.seed);
    simulator.add_process(vec![1, 2, 3, 4, 5]); // sequential
    simulator.add_process(vec![1, 1, 2, 2, 3]); // repeated
    simulator.add_process(vec![5, 4, 3, 2, 1]); // reverse
    simulator.add_process(vec![1, 3, 5, 2, 4]); // interleaved

    simulator.run(
        args.num_accesses,
        Duration::from_millis(args.delay_ms),
        args.show_state,
    );
    simulator.print_stats();

    if args.prometheus {
        let exporter = PrometheusTextExporter::new("simulate", std::io::stdout());
        if let Err(e) = exporter.export(&simulator.cache.snapshot()) {
            eprintln!("error: {}", e);
        }
    }
}
