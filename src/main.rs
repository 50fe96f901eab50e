//! csvscan - scan throughput benchmark
//!
//! Opens a delimited file, optionally skips its header, and times full scans.

use clap::{Parser, ValueEnum};
use slimcsv::{Dialect, OpenMode, OpenOptions, Row, Strategy};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Load {
    /// Memory-map the file
    Mmap,
    /// Read the file into memory
    Read,
}

#[derive(Parser, Debug)]
#[command(name = "csvscan")]
#[command(about = "Time full scans of a delimited text file", long_about = None)]
struct Args {
    /// File to scan
    #[arg(value_name = "FILE", default_value = "data/orders.csv")]
    file: String,

    /// How to load the file
    #[arg(short, long, value_enum, default_value = "mmap")]
    load: Load,

    /// Treat an unreadable file as empty instead of failing
    #[arg(long)]
    lenient: bool,

    /// Do not skip the first line
    #[arg(long)]
    no_header: bool,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Number of iterations for benchmarking
    #[arg(short, long, default_value = "100")]
    iterations: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let Ok(delimiter) = u8::try_from(args.delimiter) else {
        tracing::error!(delimiter = %args.delimiter, "delimiter must be a single byte");
        std::process::exit(2);
    };
    let dialect = Dialect::default().with_delimiter(delimiter);

    let options = OpenOptions::new()
        .strategy(match args.load {
            Load::Mmap => Strategy::Mapped,
            Load::Read => Strategy::Owned,
        })
        .mode(if args.lenient {
            OpenMode::Lenient
        } else {
            OpenMode::Strict
        });

    let buffer = match options.open(&args.file) {
        Ok(buf) => buf,
        Err(e) => {
            tracing::error!(file = %args.file, error = %e, "could not load file");
            std::process::exit(1);
        }
    };
    tracing::info!(file = %args.file, bytes = buffer.len(), mapped = buffer.is_mapped(), "loaded");

    let mut row = Row::new();
    let (mut rows, mut fields) = (0usize, 0usize);
    let mut total_time = 0.0;

    for _ in 0..args.iterations {
        let mut reader = buffer.reader_with(dialect);
        let start = Instant::now();
        if !args.no_header {
            reader.skip();
        }
        let (mut scan_rows, mut scan_fields) = (0usize, 0usize);
        while reader.next(&mut row) {
            scan_rows += 1;
            scan_fields += row.len();
        }
        total_time += start.elapsed().as_secs_f64();
        (rows, fields) = (scan_rows, scan_fields);
    }

    tracing::debug!(total_time, iterations = args.iterations, "done");

    let volume = args.iterations as f64 * buffer.len() as f64;
    let per_scan = if args.iterations > 0 {
        total_time / args.iterations as f64
    } else {
        0.0
    };

    println!("rows       : {}", rows);
    println!("fields     : {}", fields);
    println!("time/scan  : {:.3} ms", per_scan * 1e3);
    if total_time > 0.0 {
        println!("GB/s       : {:.5}", volume / total_time / (1024.0 * 1024.0 * 1024.0));
    }
}
