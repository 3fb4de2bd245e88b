//! CLI tool for inventory-table - filters and sorts a table snapshot and
//! outputs the export body JSON
//!
//! Usage:
//!   inventory_table_cli <snapshot.json>                         # Export body to stdout
//!   inventory_table_cli <snapshot.json> --bin A-01 --sort Qty:desc
//!   inventory_table_cli <snapshot.json> --text bolt -o out.json  # Export body to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use inventory_table::logging::init_logging;
use inventory_table::storage::MemoryStore;
use inventory_table::{FilterDimension, FilterState, TableConfig, TableController, TableModel};

const USAGE: &str = "Usage: inventory_table_cli <snapshot.json> [--part V] [--bin V] [--status V] [--text V] [--sort COLUMN[:desc]] [-o output.json]";

fn main() {
    init_logging(tracing::Level::WARN);

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut filters = FilterState::default();
    let mut sort: Option<String> = None;
    let mut output_path: Option<String> = None;

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let Some(value) = rest.next() else {
            eprintln!("Missing value for {flag}\n{USAGE}");
            std::process::exit(1);
        };
        match flag.as_str() {
            "--part" => filters.set_value(FilterDimension::Part, value.as_str()),
            "--bin" => filters.set_value(FilterDimension::Bin, value.as_str()),
            "--status" => filters.set_value(FilterDimension::Status, value.as_str()),
            "--text" => filters.text = value.clone(),
            "--sort" => sort = Some(value.clone()),
            "-o" => output_path = Some(value.clone()),
            other => {
                eprintln!("Unknown option {other}\n{USAGE}");
                std::process::exit(1);
            }
        }
    }

    // Read input file
    let json = match fs::read_to_string(input_path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let model = match TableModel::from_json(&json) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error parsing snapshot: {}", e);
            std::process::exit(1);
        }
    };

    let config = if filters.status.is_some() {
        TableConfig::with_status()
    } else {
        TableConfig::default()
    };
    let mut controller = TableController::new(model, config, MemoryStore::new());
    controller.initialize();
    controller.set_filters(filters, None);

    if let Some(sort_arg) = sort {
        let (column, descending) = match sort_arg.split_once(':') {
            Some((column, dir)) => (column.to_string(), dir.eq_ignore_ascii_case("desc")),
            None => (sort_arg, false),
        };
        // Clicking a new column sorts ascending; clicking it again flips.
        let clicks = if controller.sort_state().column == column {
            usize::from(descending)
        } else {
            usize::from(descending) + 1
        };
        for _ in 0..clicks {
            if let Err(e) = controller.click_column(&column) {
                eprintln!("Error sorting: {}", e);
                std::process::exit(1);
            }
        }
    }

    eprintln!("{}", controller.row_count());

    let request = match controller.prepare_export() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &request.body) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(request.body.as_bytes()).unwrap();
            println!();
        }
    }
}
