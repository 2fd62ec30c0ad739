//! # GAZETTE
//!
//! Runs one of the two demonstrations against the configured
//! synchronization discipline.
//!
//! ```bash
//! # Defaults: pressroom scenario, exclusive gate, 15 s run
//! ./gazette
//!
//! # Everything else comes from a TOML file
//! ./gazette demos/pressroom_none.toml
//! ```
//!
//! Console output is observability only - nothing in the process gates
//! on it.

use std::path::PathBuf;
use std::process;

use gazette::config::GazetteConfig;
use gazette::context::FRONT_PAGE_QUESTION;

const RULE: &str = "═══════════════════════════════════════════════════════════════════";
const BANNER: &str = "**************************************************************";

fn main() {
    println!("{RULE}");
    println!("                    GAZETTE v0.1.0");
    println!("        one shared page, one discipline, many actors");
    println!("{RULE}");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => GazetteConfig::load(&PathBuf::from(path)),
        None => Ok(GazetteConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_target(false).init();

    println!("  scenario: {:?}", config.scenario);
    println!("  strategy: {}", config.strategy);
    println!("  rendezvous: {}", config.rendezvous);
    println!();
    println!("{BANNER}");
    println!("The opening line on the page is: {FRONT_PAGE_QUESTION}");
    println!("{BANNER}");
    println!();

    if let Err(e) = gazette::run_scenario(&config) {
        eprintln!("✗ FATAL: {e}");
        process::exit(1);
    }
}
